//! Song generation on a worker thread.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use songforge_spec::{Catalog, SongRequest};

use crate::error::{AudioError, AudioResult};
use crate::generate::{generate_with, CancelToken, Progress, SongRender};

/// A running generation.
///
/// Progress events arrive over a channel, one per rendered bar. The result is
/// collected with [`SongTask::join`].
#[derive(Debug)]
pub struct SongTask {
    handle: JoinHandle<AudioResult<SongRender>>,
    progress: Receiver<Progress>,
    cancel: CancelToken,
}

impl SongTask {
    /// Starts generating `request` on a new thread.
    pub fn spawn(request: SongRequest, catalog: Arc<Catalog>) -> AudioResult<Self> {
        Self::spawn_with_cancel(request, catalog, CancelToken::new())
    }

    /// Starts generating `request` on a new thread, stopped by `cancel`.
    ///
    /// One token can be shared by several tasks, e.g. to stop them all from
    /// a signal handler.
    pub fn spawn_with_cancel(
        request: SongRequest,
        catalog: Arc<Catalog>,
        cancel: CancelToken,
    ) -> AudioResult<Self> {
        let (tx, rx) = mpsc::channel();
        let worker_cancel = cancel.clone();

        let handle = thread::Builder::new()
            .name("songforge-render".to_string())
            .spawn(move || {
                generate_with(
                    &request,
                    &catalog,
                    |progress| {
                        // the receiver may already be gone; rendering continues
                        let _ = tx.send(progress);
                    },
                    &worker_cancel,
                )
            })?;

        Ok(Self {
            handle,
            progress: rx,
            cancel,
        })
    }

    /// Requests cancellation. Takes effect before the next bar.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// A token that cancels this task, for use from other threads.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Latest progress event without blocking, draining older ones.
    pub fn latest_progress(&self) -> Option<Progress> {
        let mut latest = None;
        loop {
            match self.progress.try_recv() {
                Ok(progress) => latest = Some(progress),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => return latest,
            }
        }
    }

    /// Blocks for the next progress event. Returns `None` once the worker
    /// has finished and every event has been received.
    pub fn next_progress(&self) -> Option<Progress> {
        self.progress.recv().ok()
    }

    /// Returns true if the worker thread has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits for the worker and returns its result.
    pub fn join(self) -> AudioResult<SongRender> {
        self.handle
            .join()
            .map_err(|_| AudioError::synthesis("render thread panicked"))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_matches_direct_generation() {
        let catalog = Arc::new(Catalog::builtin());
        let request = SongRequest::new(4.0, 120.0).sample_rate(4000).seed(21);

        let task = SongTask::spawn(request.clone(), Arc::clone(&catalog)).unwrap();
        let mut events = Vec::new();
        while let Some(progress) = task.next_progress() {
            events.push(progress.completed_bars);
        }
        let threaded = task.join().unwrap();
        let direct = crate::generate::generate(&request, &catalog).unwrap();

        assert_eq!(events, vec![1, 2]);
        assert_eq!(threaded.buffer, direct.buffer);
    }

    #[test]
    fn test_cancel_discards_result() {
        let catalog = Arc::new(Catalog::builtin());
        let request = SongRequest::new(120.0, 60.0).sample_rate(8000);
        let cancel = CancelToken::new();
        cancel.cancel();

        let task = SongTask::spawn_with_cancel(request, catalog, cancel).unwrap();
        assert!(task.next_progress().is_none());
        match task.join() {
            Err(AudioError::Cancelled {
                completed_bars,
                total_bars,
            }) => {
                assert_eq!(completed_bars, 0);
                assert_eq!(total_bars, 30);
            }
            other => panic!("expected cancellation, got {:?}", other.map(|r| r.summary)),
        }
    }

    #[test]
    fn test_shared_token_cancels_running_task() {
        let catalog = Arc::new(Catalog::builtin());
        let request = SongRequest::new(8.0, 120.0).sample_rate(4000);
        let cancel = CancelToken::new();

        let task = SongTask::spawn_with_cancel(request, catalog, cancel.clone()).unwrap();
        assert!(!task.cancel_token().is_cancelled());
        cancel.cancel();
        assert!(task.cancel_token().is_cancelled());

        // the worker may finish before it sees the flag; either way it stops cleanly
        match task.join() {
            Ok(render) => assert_eq!(render.summary.total_bars, 4),
            Err(AudioError::Cancelled { total_bars, .. }) => assert_eq!(total_bars, 4),
            Err(other) => panic!("unexpected error: {}", other),
        }
    }
}

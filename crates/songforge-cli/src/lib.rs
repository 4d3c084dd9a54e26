//! SongForge CLI library.
//!
//! Command implementations, input loading and logging setup for the
//! `songforge` binary.

pub mod commands;
pub mod input;
pub mod logging;

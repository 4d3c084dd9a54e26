//! Request validation.
//!
//! Hard errors are limited to parameters that make synthesis meaningless
//! (non-positive duration, tempo or sample rate), requests over the
//! [`SongBudget`], and catalogs missing a default that a fallback needs.
//! Every other unknown id is a warning describing the fallback that rendering
//! will take.

use crate::budget::SongBudget;
use crate::catalog::Catalog;
use crate::error::{
    ErrorCode, ValidationError, ValidationResult, ValidationWarning, WarningCode,
};
use crate::mood::Mood;
use crate::request::SongRequest;

/// Validates a request against a catalog and the default budget.
pub fn validate_request(request: &SongRequest, catalog: &Catalog) -> ValidationResult {
    validate_request_with_budget(request, catalog, &SongBudget::default())
}

/// Validates a request against a catalog and an explicit budget.
pub fn validate_request_with_budget(
    request: &SongRequest,
    catalog: &Catalog,
    budget: &SongBudget,
) -> ValidationResult {
    let mut result = ValidationResult::success();
    validate_numbers(request, budget, &mut result);
    validate_ids(request, catalog, &mut result);
    result
}

fn validate_numbers(request: &SongRequest, budget: &SongBudget, result: &mut ValidationResult) {
    let duration = request.duration_seconds;
    let tempo = request.tempo_bpm;

    let duration_ok = if !(duration.is_finite() && duration > 0.0) {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidDuration,
            format!("duration must be a positive number of seconds, got {}", duration),
            "duration_seconds",
        ));
        false
    } else if duration > budget.max_duration_seconds {
        result.add_error(ValidationError::with_path(
            ErrorCode::DurationTooLong,
            format!(
                "duration {}s exceeds the {}s limit",
                duration, budget.max_duration_seconds
            ),
            "duration_seconds",
        ));
        false
    } else {
        true
    };

    let tempo_ok = if !(tempo.is_finite() && tempo > 0.0) {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidTempo,
            format!("tempo must be a positive BPM value, got {}", tempo),
            "tempo_bpm",
        ));
        false
    } else if tempo < budget.min_tempo_bpm || tempo > budget.max_tempo_bpm {
        result.add_error(ValidationError::with_path(
            ErrorCode::TempoOutOfRange,
            format!(
                "tempo {} BPM is outside {}-{} BPM",
                tempo, budget.min_tempo_bpm, budget.max_tempo_bpm
            ),
            "tempo_bpm",
        ));
        false
    } else {
        true
    };

    let rate_ok = if request.sample_rate == 0 {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidSampleRate,
            "sample rate must be positive",
            "sample_rate",
        ));
        false
    } else if request.sample_rate > budget.max_sample_rate {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidSampleRate,
            format!(
                "sample rate {} Hz exceeds the {} Hz limit",
                request.sample_rate, budget.max_sample_rate
            ),
            "sample_rate",
        ));
        false
    } else {
        true
    };

    if duration_ok && tempo_ok {
        let bars = request.bar_count();
        if bars.map_or(true, |bars| bars > budget.max_bars) {
            result.add_error(ValidationError::with_path(
                ErrorCode::TooManyBars,
                format!(
                    "{}s at {} BPM spans more than {} bars",
                    duration, tempo, budget.max_bars
                ),
                "duration_seconds",
            ));
        }
    }

    if duration_ok && rate_ok {
        let frames = (duration * request.sample_rate as f64).round();
        if frames > budget.max_frames as f64 {
            result.add_error(ValidationError::with_path(
                ErrorCode::TooManyFrames,
                format!(
                    "{}s at {} Hz needs {} frames, limit is {}",
                    duration, request.sample_rate, frames, budget.max_frames
                ),
                "duration_seconds",
            ));
        }
    }
}

fn validate_ids(request: &SongRequest, catalog: &Catalog, result: &mut ValidationResult) {
    if Mood::from_id(&request.mood).is_none() {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::UnknownMood,
            format!(
                "unknown mood '{}', using '{}'",
                request.mood,
                Mood::default()
            ),
            "mood",
        ));
    }

    let vocalist = catalog.try_vocalist(&request.vocalist_id);
    match &vocalist {
        Some(vocalist) if vocalist.fell_back => {
            result.add_warning(ValidationWarning::with_path(
                WarningCode::UnknownVocalist,
                format!(
                    "unknown vocalist '{}', using '{}'",
                    request.vocalist_id, vocalist.id
                ),
                "vocalist_id",
            ));
        }
        Some(_) => {}
        None => result.add_error(ValidationError::with_path(
            ErrorCode::MissingDefault,
            format!(
                "unknown vocalist '{}' and default vocalist '{}' is not in the catalog",
                request.vocalist_id, catalog.default_vocalist
            ),
            "vocalist_id",
        )),
    }

    let language = catalog.try_language(&request.language_id);
    match &language {
        Some(language) if language.fell_back => {
            result.add_warning(ValidationWarning::with_path(
                WarningCode::UnknownLanguage,
                format!(
                    "unknown language '{}', using '{}'",
                    request.language_id, language.id
                ),
                "language_id",
            ));
        }
        Some(_) => {}
        None => result.add_error(ValidationError::with_path(
            ErrorCode::MissingDefault,
            format!(
                "unknown language '{}' and default language '{}' is not in the catalog",
                request.language_id, catalog.default_language
            ),
            "language_id",
        )),
    }

    if let (Some(vocalist), Some(language)) = (vocalist, language) {
        if !vocalist.profile.supports_language(language.id) {
            result.add_warning(ValidationWarning::with_path(
                WarningCode::UnsupportedLanguage,
                format!(
                    "{} is still learning {}",
                    vocalist.profile.name, language.id
                ),
                "language_id",
            ));
        }
    }
}

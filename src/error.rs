use serde_json::Value as JsonValue;
use thiserror::Error;
use tracing::{error, warn};

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid time format: {value} ({reason})")]
    InvalidTimeFormat { value: String, reason: String },

    #[error("invalid event: {message}")]
    InvalidEvent { message: String },

    #[error("time {time} shifted by {delta} minutes crosses the day boundary")]
    TimeOverflow { time: String, delta: i64 },

    #[error("cannot apply {choice} while resolution is {state}")]
    IllegalTransition { state: String, choice: String },

    #[error("validation failed: {message}")]
    Validation {
        message: String,
        details: Option<JsonValue>,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl AppError {
    pub fn invalid_time_format(value: impl Into<String>, reason: impl Into<String>) -> Self {
        let value = value.into();
        let reason = reason.into();
        warn!(target: "app::time", %value, %reason, "invalid time format");
        AppError::InvalidTimeFormat { value, reason }
    }

    pub fn invalid_event(message: impl Into<String>) -> Self {
        let message = message.into();
        warn!(target: "app::event", %message, "invalid event");
        AppError::InvalidEvent { message }
    }

    pub fn time_overflow(time: impl Into<String>, delta: i64) -> Self {
        let time = time.into();
        warn!(target: "app::time", %time, delta, "time arithmetic crossed midnight");
        AppError::TimeOverflow { time, delta }
    }

    pub fn illegal_transition(state: impl Into<String>, choice: impl Into<String>) -> Self {
        let state = state.into();
        let choice = choice.into();
        warn!(target: "app::resolution", %state, %choice, "illegal resolution transition");
        AppError::IllegalTransition { state, choice }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        let message = message.into();
        warn!(target: "app::validation", %message, "validation error");
        AppError::Validation {
            message,
            details: None,
        }
    }

    pub fn validation_with_details(message: impl Into<String>, details: JsonValue) -> Self {
        let message = message.into();
        warn!(target: "app::validation", %message, details = %details, "validation error with details");
        AppError::Validation {
            message,
            details: Some(details),
        }
    }

    pub fn other(message: impl Into<String>) -> Self {
        let message = message.into();
        error!(target: "app::other", %message, "other error");
        AppError::Other(message)
    }

    /// Stable machine-readable code, shared with the command layer.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidTimeFormat { .. } => "INVALID_TIME_FORMAT",
            AppError::InvalidEvent { .. } => "INVALID_EVENT",
            AppError::TimeOverflow { .. } => "TIME_OVERFLOW",
            AppError::IllegalTransition { .. } => "ILLEGAL_TRANSITION",
            AppError::Validation { .. } => "VALIDATION_ERROR",
            AppError::Serialization(_)
            | AppError::Yaml(_)
            | AppError::Io(_)
            | AppError::Other(_) => "UNKNOWN",
        }
    }
}

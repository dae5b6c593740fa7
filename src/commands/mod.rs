pub mod settings;
pub mod timetable;

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value as JsonValue;
use tracing::{error, warn};

use crate::error::{AppError, AppResult};
use crate::models::settings::SchedulerSettings;
use crate::services::settings_service::SettingsService;

/// Shared, read-only context for command handlers.
#[derive(Debug, Clone, Default)]
pub struct EngineState {
    settings: Arc<SchedulerSettings>,
}

impl EngineState {
    pub fn new(settings: SchedulerSettings) -> AppResult<Self> {
        settings.validate()?;
        Ok(Self {
            settings: Arc::new(settings),
        })
    }

    pub fn from_env() -> AppResult<Self> {
        Self::new(SettingsService::from_env()?)
    }

    pub fn settings(&self) -> Arc<SchedulerSettings> {
        Arc::clone(&self.settings)
    }
}

pub type CommandResult<T> = Result<T, CommandError>;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<JsonValue>,
}

impl CommandError {
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        details: Option<JsonValue>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details,
        }
    }
}

impl From<AppError> for CommandError {
    fn from(error: AppError) -> Self {
        let code = error.code();
        match error {
            AppError::InvalidTimeFormat { value, reason } => CommandError::new(
                code,
                format!("invalid time format: {value}"),
                Some(serde_json::json!({ "value": value, "reason": reason })),
            ),
            AppError::InvalidEvent { message } => CommandError::new(code, message, None),
            AppError::TimeOverflow { time, delta } => CommandError::new(
                code,
                "time arithmetic would cross midnight",
                Some(serde_json::json!({ "time": time, "deltaMinutes": delta })),
            ),
            AppError::IllegalTransition { state, choice } => {
                warn!(target: "app::command", %state, %choice, "illegal transition in command");
                CommandError::new(
                    code,
                    format!("cannot {choice} while {state}"),
                    Some(serde_json::json!({ "state": state, "choice": choice })),
                )
            }
            AppError::Validation { message, details } => CommandError::new(code, message, details),
            AppError::Serialization(error) => {
                error!(target: "app::command", error = %error, "serialization error in command");
                CommandError::new(code, "serialization failed", None)
            }
            AppError::Yaml(error) => {
                error!(target: "app::command", error = %error, "yaml error in command");
                CommandError::new(code, "configuration could not be parsed", None)
            }
            AppError::Io(error) => {
                error!(target: "app::command", error = %error, "io error in command");
                CommandError::new(code, "file system access failed", None)
            }
            AppError::Other(message) => {
                error!(target: "app::command", %message, "unexpected error in command");
                CommandError::new(code, message, None)
            }
        }
    }
}

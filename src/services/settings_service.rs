use std::path::Path;

use serde_json::json;
use tracing::{info, warn};

use crate::error::{AppError, AppResult};
use crate::models::settings::SchedulerSettings;

pub const CONFIG_ENV_VAR: &str = "TIMETABLE_ENGINE_CONFIG";

/// Loads scheduler settings from YAML or JSON files.
pub struct SettingsService;

impl SettingsService {
    /// Reads `path` as YAML (`.yaml`/`.yml`) or JSON (anything else) and
    /// validates the result. Missing keys fall back to defaults.
    pub fn load(path: impl AsRef<Path>) -> AppResult<SchedulerSettings> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;

        let settings: SchedulerSettings = match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&raw)?,
            _ => serde_json::from_str(&raw)?,
        };

        settings.validate().map_err(|err| {
            warn!(target: "app::settings", path = %path.display(), error = %err, "invalid settings file");
            err
        })?;

        info!(
            target: "app::settings",
            path = %path.display(),
            day_start = %settings.day_start,
            day_end = %settings.day_end,
            horizon_days = settings.horizon_days,
            "settings loaded"
        );
        Ok(settings)
    }

    /// Uses the file named by `TIMETABLE_ENGINE_CONFIG` when set, otherwise
    /// the defaults.
    pub fn from_env() -> AppResult<SchedulerSettings> {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) if !path.trim().is_empty() => Self::load(path.trim()),
            Ok(_) | Err(std::env::VarError::NotPresent) => Ok(SchedulerSettings::default()),
            Err(err) => Err(AppError::validation_with_details(
                "settings path is not valid unicode",
                json!({"variable": CONFIG_ENV_VAR, "error": err.to_string()}),
            )),
        }
    }
}

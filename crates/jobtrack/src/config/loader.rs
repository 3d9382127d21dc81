use std::path::Path;

use crate::config::schema::TrackerConfig;
use crate::error::ConfigError;
use crate::stats::goal::{MAX_TARGET, MIN_TARGET};
use crate::stats::GoalPeriod;

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<TrackerConfig, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    load_config_from_str(&content)
}

pub fn load_config_from_str(content: &str) -> Result<TrackerConfig, ConfigError> {
    let config: TrackerConfig = serde_json::from_str(content)?;

    validate_config(&config)?;

    Ok(config)
}

fn validate_config(config: &TrackerConfig) -> Result<(), ConfigError> {
    if config.version != "1.0" {
        return Err(ConfigError::Validation {
            message: format!("Unsupported config version: {}", config.version),
        });
    }

    if config.stale_export_days == 0 {
        return Err(ConfigError::Validation {
            message: "stale_export_days must be at least 1".to_string(),
        });
    }

    if let Some(dir) = &config.data_directory {
        if dir.trim().is_empty() {
            return Err(ConfigError::Validation {
                message: "data_directory must not be blank".to_string(),
            });
        }
    }

    for period in [GoalPeriod::Day, GoalPeriod::Week, GoalPeriod::Month] {
        let raw = match period {
            GoalPeriod::Day => config.goal.targets.day,
            GoalPeriod::Week => config.goal.targets.week,
            GoalPeriod::Month => config.goal.targets.month,
        };
        if !(MIN_TARGET..=MAX_TARGET).contains(&raw) {
            return Err(ConfigError::Validation {
                message: format!(
                    "Goal target for {:?} must be between {} and {}, got {}",
                    period, MIN_TARGET, MAX_TARGET, raw
                ),
            });
        }
    }

    Ok(())
}

//! Engine settings file (TOML).
//!
//! ```toml
//! [judgement]
//! judgement_line = 500.0
//! tolerance_perfect = 40.0
//! tolerance_great = 80.0
//!
//! [scoring]
//! perfect = 100
//! ```

use crate::models::engine::JudgementConfig;
use crate::models::error::ConfigError;
use crate::models::stats::ScoreRules;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub judgement: JudgementConfig,
    pub scoring: ScoreRules,
}

impl EngineSettings {
    /// Parses settings; missing keys take their defaults.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let settings: EngineSettings = toml::from_str(content)?;
        settings.judgement.validate()?;
        Ok(settings)
    }

    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| e.to_string())
    }
}

/// Loads and validates a settings file.
pub fn load_settings(path: &Path) -> Result<EngineSettings, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    match EngineSettings::from_toml(&content) {
        Ok(settings) => Ok(settings),
        Err(e) => {
            log::error!("SETTINGS: Rejected {:?}: {}", path, e);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_uses_defaults() {
        let settings = EngineSettings::from_toml(
            r#"
            [judgement]
            tolerance_perfect = 20.0
            tolerance_great = 45.0
            note_speed = 300.0

            [scoring]
            sustain_tick = 0
            "#,
        )
        .unwrap();
        assert_eq!(settings.judgement.tolerance_perfect, 20.0);
        assert_eq!(settings.judgement.judgement_line, 500.0);
        assert_eq!(settings.scoring.sustain_tick, 0);
        assert_eq!(settings.scoring.perfect, 100);
    }

    #[test]
    fn test_invalid_values_fail_on_load() {
        let result = EngineSettings::from_toml(
            r#"
            [judgement]
            tolerance_perfect = 90.0
            "#,
        );
        assert!(matches!(result, Err(ConfigError::ToleranceOrder { .. })));

        assert!(matches!(
            EngineSettings::from_toml("judgement = 3"),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn test_round_trip_through_file() {
        let settings = EngineSettings::default();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.toml");
        fs::write(&path, settings.to_toml().unwrap()).unwrap();
        assert_eq!(load_settings(&path).unwrap(), settings);
    }
}

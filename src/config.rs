use crate::theme::WaveTheme;
use crate::wave::WaveParams;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::{fs, io};

/// Everything a refresh control needs to know up front.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RefreshConfig {
    /// Wave simulation parameters.
    pub wave: WaveParams,

    /// Wave fill colors.
    pub theme: WaveTheme,

    /// How many frames per second the wave is animated at.
    pub frames_per_second: u32,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self { wave: WaveParams::default(), theme: WaveTheme::default(), frames_per_second: 30 }
    }
}

impl RefreshConfig {
    /// Load and validate a YAML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Parse and validate a YAML config.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        // An empty document means "all defaults".
        let config: Self = if contents.trim().is_empty() { Self::default() } else { serde_yaml::from_str(contents)? };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let wave = &self.wave;
        let positive = [
            ("wave.max_variable", wave.max_variable),
            ("wave.min_variable", wave.min_variable),
            ("wave.min_step", wave.min_step),
            ("wave.max_step", wave.max_step),
            ("wave.pull_step", wave.pull_step),
            ("wave.speed", wave.speed),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NotPositive(name));
            }
        }
        if wave.min_variable > wave.max_variable {
            return Err(ConfigError::Invalid(format!(
                "wave.min_variable ({}) is larger than wave.max_variable ({})",
                wave.min_variable, wave.max_variable
            )));
        }
        if wave.max_pull_ratio == 0 {
            return Err(ConfigError::NotPositive("wave.max_pull_ratio"));
        }
        if self.frames_per_second == 0 {
            return Err(ConfigError::NotPositive("frames_per_second"));
        }
        Ok(())
    }
}

/// Errors that can occur when loading a config
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("reading config: {0}")]
    Io(#[from] io::Error),

    #[error("invalid config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("'{0}' must be a positive number")]
    NotPositive(&'static str),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Color;
    use rstest::rstest;
    use std::io::Write;

    #[test]
    fn empty_is_default() {
        let config = RefreshConfig::from_yaml("").expect("parse failed");
        assert_eq!(config, RefreshConfig::default());
    }

    #[test]
    fn partial_override() {
        let config = RefreshConfig::from_yaml(
            r##"
frames_per_second: 60
wave:
  max_pull_ratio: 4
theme:
  bottom: "#336699"
"##,
        )
        .expect("parse failed");
        assert_eq!(config.frames_per_second, 60);
        assert_eq!(config.wave.max_pull_ratio, 4);
        assert_eq!(config.wave.max_variable, 1.6);
        assert_eq!(config.theme.top, Color::LIGHT_GRAY);
        assert_eq!(config.theme.bottom, Color::new(0x33, 0x66, 0x99));
    }

    #[rstest]
    #[case("frames_per_second: 0")]
    #[case("wave:\n  min_step: 0")]
    #[case("wave:\n  max_step: -0.05")]
    #[case("wave:\n  pull_step: 0")]
    #[case("wave:\n  max_pull_ratio: 0")]
    #[case("wave:\n  min_variable: 2.0")]
    #[case("wave:\n  speed: -1")]
    #[case("wave:\n  speed: 0")]
    #[case("theme:\n  top: red")]
    #[case("unknown: 1")]
    fn rejected(#[case] input: &str) {
        assert!(RefreshConfig::from_yaml(input).is_err(), "accepted {input:?}");
    }

    #[test]
    fn negative_speed_names_field() {
        let result = RefreshConfig::from_yaml("wave:\n  speed: -1.0");
        assert!(matches!(result, Err(ConfigError::NotPositive("wave.speed"))));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "frames_per_second: 24").expect("write failed");
        let config = RefreshConfig::load(file.path()).expect("load failed");
        assert_eq!(config.frames_per_second, 24);
    }

    #[test]
    fn missing_file() {
        let result = RefreshConfig::load(Path::new("/definitely/not/here.yaml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}

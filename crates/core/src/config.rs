use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },
    #[error("{field} must be within 0.0..=1.0, got {value}")]
    OutOfRange { field: &'static str, value: f64 },
}

/// Story-wide settings. Every field has a default, so a config file only
/// needs the keys it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoryConfig {
    pub timing: Timing,
    pub tracker: TrackerConfig,
    /// Year the map layers show when the story starts.
    pub map_year: u16,
    /// Dim every step's text except the active one.
    pub highlight_steps: bool,
    /// Opacity of inactive step text when highlighting.
    pub dimmed_step_opacity: f64,
}

impl Default for StoryConfig {
    fn default() -> Self {
        Self {
            timing: Timing::default(),
            tracker: TrackerConfig::default(),
            map_year: 2018,
            highlight_steps: true,
            dimmed_step_opacity: 0.1,
        }
    }
}

impl StoryConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.timing.fade_ms == 0 {
            return Err(ConfigError::NonPositive {
                field: "timing.fade_ms",
                value: 0.0,
            });
        }
        if self.timing.reveal_ms == 0 {
            return Err(ConfigError::NonPositive {
                field: "timing.reveal_ms",
                value: 0.0,
            });
        }
        if !(0.0..=1.0).contains(&self.dimmed_step_opacity) {
            return Err(ConfigError::OutOfRange {
                field: "dimmed_step_opacity",
                value: self.dimmed_step_opacity,
            });
        }
        Ok(())
    }
}

/// Durations of the transitions panels start, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timing {
    /// Panel fade in/out.
    pub fade_ms: u32,
    /// Line-chart path drawing.
    pub reveal_ms: u32,
    /// Line label fade-in, started with the reveal.
    pub label_ms: u32,
    /// Extra delay per rank step when dropping ranking dots in.
    pub dot_stagger_ms: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            fade_ms: 600,
            reveal_ms: 4000,
            label_ms: 7000,
            dot_stagger_ms: 20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Offset of the scrolling container from the top of the page.
    pub container_top: f64,
    /// Added to the scroll offset before looking up the step, so a negative
    /// value switches sections slightly later.
    pub trigger_offset: f64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            container_top: 0.0,
            trigger_offset: -10.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_all_defaults() {
        let config = StoryConfig::from_json("{}").unwrap();
        assert_eq!(config, StoryConfig::default());
        assert_eq!(config.timing.fade_ms, 600);
        assert_eq!(config.map_year, 2018);
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config =
            StoryConfig::from_json(r#"{"timing":{"fade_ms":250},"tracker":{"trigger_offset":0}}"#)
                .unwrap();
        assert_eq!(config.timing.fade_ms, 250);
        assert_eq!(config.timing.reveal_ms, 4000);
        assert_eq!(config.tracker.trigger_offset, 0.0);
        assert!(config.highlight_steps);
    }

    #[test]
    fn rejects_zero_fade() {
        let err = StoryConfig::from_json(r#"{"timing":{"fade_ms":0}}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::NonPositive {
                field: "timing.fade_ms",
                ..
            }
        ));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            StoryConfig::from_json("{timing"),
            Err(ConfigError::Json(_))
        ));
    }
}

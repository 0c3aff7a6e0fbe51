//! Configuration schema types for `drill.toml`
//!
//! Defines the structure and validation rules for validator, renderer and
//! pipeline settings. Every field has a default, so an empty file (or no file
//! at all) is a valid configuration.

use serde::{Deserialize, Serialize};

use crate::tracker::TrackerConfig;

/// Validator thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidateConfig {
    /// Minimum distance between any two players' starting positions (inclusive)
    #[serde(default = "default_min_player_spacing")]
    pub min_player_spacing: f64,
    /// Maximum distance from a goalkeeper to the goal-mouth centre
    #[serde(default = "default_goalkeeper_max_distance")]
    pub goalkeeper_max_distance: f64,
    /// Ball-to-player distance that counts as possession at the start
    #[serde(default = "default_ball_tolerance")]
    pub ball_tolerance: f64,
    /// Widest allowed cone gate
    #[serde(default = "default_max_gate_width")]
    pub max_gate_width: f64,
    /// Width of each touchline corridor for crossing drills
    #[serde(default = "default_wide_corridor")]
    pub wide_corridor: f64,
    /// Passes longer than this draw a warning in passing drills
    #[serde(default = "default_long_pass")]
    pub long_pass: f64,
    /// Treat warnings as errors
    #[serde(default)]
    pub strict: bool,
}

fn default_min_player_spacing() -> f64 {
    3.0
}

fn default_goalkeeper_max_distance() -> f64 {
    15.0
}

fn default_ball_tolerance() -> f64 {
    1.5
}

fn default_max_gate_width() -> f64 {
    30.0
}

fn default_wide_corridor() -> f64 {
    20.0
}

fn default_long_pass() -> f64 {
    50.0
}

impl Default for ValidateConfig {
    fn default() -> Self {
        Self {
            min_player_spacing: default_min_player_spacing(),
            goalkeeper_max_distance: default_goalkeeper_max_distance(),
            ball_tolerance: default_ball_tolerance(),
            max_gate_width: default_max_gate_width(),
            wide_corridor: default_wide_corridor(),
            long_pass: default_long_pass(),
            strict: false,
        }
    }
}

impl ValidateConfig {
    /// Tracker settings implied by these thresholds.
    pub fn tracker(&self) -> TrackerConfig {
        TrackerConfig { ball_tolerance: self.ball_tolerance }
    }
}

/// Renderer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Drawing units per normalized field unit
    #[serde(default = "default_scale")]
    pub scale: f64,
    /// Blank border around the pitch, in drawing units
    #[serde(default = "default_margin")]
    pub margin: f64,
    /// Draw player labels
    #[serde(default = "default_true")]
    pub labels: bool,
    /// Number action overlays in sequence order
    #[serde(default = "default_true")]
    pub step_numbers: bool,
}

fn default_scale() -> f64 {
    6.0
}

fn default_margin() -> f64 {
    24.0
}

fn default_true() -> bool {
    true
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { scale: default_scale(), margin: default_margin(), labels: true, step_numbers: true }
    }
}

/// Regeneration loop settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Generator attempts before giving up
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

fn default_max_attempts() -> u32 {
    3
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self { max_attempts: default_max_attempts() }
    }
}

/// External generator program used by `drill generate`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Program to run; receives the request JSON on stdin
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    /// Extra arguments passed to the program
    #[serde(default)]
    pub args: Vec<String>,
}

/// Complete drill.toml configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrillConfig {
    /// Validation settings
    #[serde(default)]
    pub validate: ValidateConfig,
    /// Rendering settings
    #[serde(default)]
    pub render: RenderConfig,
    /// Pipeline settings
    #[serde(default)]
    pub pipeline: PipelineConfig,
    /// Generator program
    #[serde(default)]
    pub generator: GeneratorConfig,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "render.scale")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "drill.toml: '{}' {}", self.field, self.message)
    }
}

impl DrillConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();
        let mut positive = |field: &str, value: f64| {
            if !(value > 0.0) {
                errors.push(ConfigValidationError {
                    field: field.to_string(),
                    message: "must be a positive number".to_string(),
                });
            }
        };

        positive("validate.min_player_spacing", self.validate.min_player_spacing);
        positive("validate.goalkeeper_max_distance", self.validate.goalkeeper_max_distance);
        positive("validate.ball_tolerance", self.validate.ball_tolerance);
        positive("validate.max_gate_width", self.validate.max_gate_width);
        positive("validate.long_pass", self.validate.long_pass);
        positive("render.scale", self.render.scale);

        if !(self.validate.wide_corridor > 0.0 && self.validate.wide_corridor < 50.0) {
            errors.push(ConfigValidationError {
                field: "validate.wide_corridor".to_string(),
                message: "must be between 0 and 50 (exclusive)".to_string(),
            });
        }

        if !(self.render.margin >= 0.0) {
            errors.push(ConfigValidationError {
                field: "render.margin".to_string(),
                message: "must not be negative".to_string(),
            });
        }

        if self.pipeline.max_attempts == 0 {
            errors.push(ConfigValidationError {
                field: "pipeline.max_attempts".to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        if self.generator.command.as_deref().is_some_and(|c| c.trim().is_empty()) {
            errors.push(ConfigValidationError {
                field: "generator.command".to_string(),
                message: "must be a non-empty string".to_string(),
            });
        }

        errors
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_parse() {
        let config: DrillConfig = toml::from_str("").unwrap();
        assert_eq!(config, DrillConfig::default());
        assert_eq!(config.validate.min_player_spacing, 3.0);
        assert_eq!(config.validate.ball_tolerance, 1.5);
        assert_eq!(config.render.scale, 6.0);
        assert_eq!(config.pipeline.max_attempts, 3);
        assert!(config.generator.command.is_none());
        assert!(config.is_valid());
    }

    #[test]
    fn test_full_config_parse() {
        let toml_str = r#"
[validate]
min_player_spacing = 4.0
goalkeeper_max_distance = 12.0
ball_tolerance = 2.0
max_gate_width = 20.0
wide_corridor = 15.0
long_pass = 40.0
strict = true

[render]
scale = 8.0
margin = 10.0
labels = false
step_numbers = false

[pipeline]
max_attempts = 5

[generator]
command = "drill-gen"
args = ["--model", "small"]
"#;
        let config: DrillConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.validate.min_player_spacing, 4.0);
        assert_eq!(config.validate.tracker().ball_tolerance, 2.0);
        assert!(config.validate.strict);
        assert_eq!(config.render.scale, 8.0);
        assert!(!config.render.labels);
        assert_eq!(config.pipeline.max_attempts, 5);
        assert_eq!(config.generator.command.as_deref(), Some("drill-gen"));
        assert_eq!(config.generator.args, vec!["--model", "small"]);
        assert!(config.is_valid());
    }

    #[test]
    fn test_partial_section_keeps_defaults() {
        let config: DrillConfig = toml::from_str("[validate]\nstrict = true\n").unwrap();
        assert!(config.validate.strict);
        assert_eq!(config.validate.goalkeeper_max_distance, 15.0);
    }

    #[test]
    fn test_validation_zero_scale() {
        let mut config = DrillConfig::default();
        config.render.scale = 0.0;
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "render.scale");
    }

    #[test]
    fn test_validation_wide_corridor() {
        let mut config = DrillConfig::default();
        config.validate.wide_corridor = 50.0;
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "validate.wide_corridor");
    }

    #[test]
    fn test_validation_zero_attempts() {
        let mut config = DrillConfig::default();
        config.pipeline.max_attempts = 0;
        config.validate.ball_tolerance = -1.0;
        let fields: Vec<_> = config.validate().into_iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["validate.ball_tolerance", "pipeline.max_attempts"]);
    }

    #[test]
    fn test_validation_error_display() {
        let err = ConfigValidationError {
            field: "render.scale".to_string(),
            message: "must be a positive number".to_string(),
        };
        assert_eq!(err.to_string(), "drill.toml: 'render.scale' must be a positive number");
    }
}

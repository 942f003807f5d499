//! Configuration file support.
//!
//! Editor settings (surface size, zoom limits, edge grab distance, stroke
//! styles, log verbosity) are stored as a versioned JSON document. Every
//! field has a default, so a partial file is valid.

use serde::{Deserialize, Serialize};

use crate::constants::{self, zoom};
use crate::render::Styles;

/// Log level setting for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    #[default]
    Warn,
    /// Show errors, warnings, and info messages
    Info,
    /// Show debug-level logging (gesture transitions)
    Debug,
    /// Show all log messages including per-move traces
    Trace,
}

impl LogLevel {
    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Drawing surface dimensions in logical units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceConfig {
    #[serde(default = "default_surface_width")]
    pub width: f32,
    #[serde(default = "default_surface_height")]
    pub height: f32,
}

fn default_surface_width() -> f32 {
    constants::SURFACE_WIDTH
}

fn default_surface_height() -> f32 {
    constants::SURFACE_HEIGHT
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: default_surface_width(),
            height: default_surface_height(),
        }
    }
}

/// Zoom limits and wheel mapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomConfig {
    #[serde(default = "default_min_scale")]
    pub min_scale: f32,
    #[serde(default = "default_max_scale")]
    pub max_scale: f32,
    /// Scale change per unit of wheel delta
    #[serde(default = "default_wheel_sensitivity")]
    pub wheel_sensitivity: f32,
}

fn default_min_scale() -> f32 {
    zoom::MIN
}

fn default_max_scale() -> f32 {
    zoom::MAX
}

fn default_wheel_sensitivity() -> f32 {
    zoom::WHEEL_SENSITIVITY
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min_scale: default_min_scale(),
            max_scale: default_max_scale(),
            wheel_sensitivity: default_wheel_sensitivity(),
        }
    }
}

/// Editor configuration that can be exported and imported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Version of the configuration file format
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub surface: SurfaceConfig,

    #[serde(default)]
    pub zoom: ZoomConfig,

    /// Resize grab distance from a rectangle edge, in screen pixels
    #[serde(default = "default_edge_threshold")]
    pub edge_threshold_px: f32,

    #[serde(default)]
    pub styles: Styles,

    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

fn default_edge_threshold() -> f32 {
    constants::EDGE_THRESHOLD_PX
}

impl EditorConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            surface: SurfaceConfig::default(),
            zoom: ZoomConfig::default(),
            edge_threshold_px: default_edge_threshold(),
            styles: Styles::default(),
            log_level: LogLevel::default(),
        }
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize and validate configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        // Validate version compatibility
        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        config.validate()?;
        Ok(config)
    }

    /// Check the numeric settings for values the editor cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let zoom = &self.zoom;
        let numbers = [
            ("surface.width", self.surface.width),
            ("surface.height", self.surface.height),
            ("zoom.min_scale", zoom.min_scale),
            ("zoom.max_scale", zoom.max_scale),
            ("zoom.wheel_sensitivity", zoom.wheel_sensitivity),
            ("edge_threshold_px", self.edge_threshold_px),
        ];
        if let Some((name, _)) = numbers.iter().find(|(_, value)| !value.is_finite()) {
            return Err(ConfigError::Invalid(format!("{} must be finite", name)));
        }

        if self.surface.width <= 0.0 || self.surface.height <= 0.0 {
            return Err(ConfigError::Invalid(
                "surface dimensions must be positive".to_string(),
            ));
        }
        if zoom.min_scale <= 0.0 {
            return Err(ConfigError::Invalid(
                "zoom.min_scale must be positive".to_string(),
            ));
        }
        if zoom.min_scale > zoom.max_scale {
            return Err(ConfigError::Invalid(format!(
                "zoom.min_scale ({}) exceeds zoom.max_scale ({})",
                zoom.min_scale, zoom.max_scale
            )));
        }
        if self.edge_threshold_px < 0.0 {
            return Err(ConfigError::Invalid(
                "edge_threshold_px must not be negative".to_string(),
            ));
        }
        Ok(())
    }

    /// Get the default filename for the config file.
    pub fn default_filename() -> &'static str {
        "rect-canvas.json"
    }

    /// Get the default config file path.
    pub fn default_path() -> Option<std::path::PathBuf> {
        // Try to use XDG config directory, fall back to home directory
        if let Some(config_dir) = dirs::config_dir() {
            Some(config_dir.join("rect-canvas").join(Self::default_filename()))
        } else {
            dirs::home_dir().map(|home_dir| {
                home_dir
                    .join(".config")
                    .join("rect-canvas")
                    .join(Self::default_filename())
            })
        }
    }

    /// Load configuration from a file.
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Load configuration from the default path, falling back to defaults
    /// when the file is missing or unusable.
    pub fn load_from_default_path() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };
        if !path.exists() {
            log::debug!("No config file found at {:?}", path);
            return Self::default();
        }

        match Self::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Ignoring config file {:?}: {}", path, e);
                Self::default()
            }
        }
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration file version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// A setting has a value the editor cannot use
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// I/O error when reading the config file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

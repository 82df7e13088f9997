//! qrcraft runtime configuration handling

use crate::color::Color;
use crate::error::{Error, Result};
use crate::workflow::{DEFAULT_CAPTION, DEFAULT_FILENAME, Palette, WorkflowOptions};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level configuration structure loaded from disk or environment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QrcraftConfig {
    /// Randomization palette overrides
    pub palette: PaletteOptions,
    /// Export (download/share) configuration
    pub export: ExportOptions,
    /// Logging configuration
    pub logging: LoggingOptions,
}

impl QrcraftConfig {
    /// Load configuration from an explicit path or fall back to discovered defaults.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = if let Some(path) = explicit_path {
            Self::from_file(path)?
        } else if let Some(path) = Self::discover_file()? {
            tracing::info!("Using configuration file: {}", path.display());
            Self::from_file(&path)?
        } else {
            tracing::debug!("No qrcraft.toml / qrcraft.yaml found, using defaults");
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Attempt to locate a configuration file in common locations.
    fn discover_file() -> Result<Option<PathBuf>> {
        let cwd =
            env::current_dir().map_err(|e| Error::Config(format!("Failed to read cwd: {e}")))?;
        for candidate in ["qrcraft.toml", "qrcraft.yaml", "qrcraft.yml"] {
            let path = cwd.join(candidate);
            if path.exists() {
                return Ok(Some(path));
            }
        }

        if let Some(xdg_config) = env::var_os("XDG_CONFIG_HOME") {
            let base = PathBuf::from(xdg_config).join("qrcraft");
            for candidate in ["config.toml", "config.yaml"] {
                let path = base.join(candidate);
                if path.exists() {
                    return Ok(Some(path));
                }
            }
        }

        Ok(None)
    }

    /// Read configuration from a concrete file path.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {e}", path.display())))?;

        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_ascii_lowercase()
            .as_str()
        {
            "toml" => toml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse TOML {}: {e}", path.display()))
            }),
            "yaml" | "yml" => serde_yaml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse YAML {}: {e}", path.display()))
            }),
            other => Err(Error::Config(format!(
                "Unsupported config format '{}', expected toml/yaml",
                other
            ))),
        }
    }

    /// Apply environment variable overrides after file/default loading.
    fn apply_env_overrides(&mut self) {
        self.export.apply_env_overrides();
        self.logging.apply_env_overrides();
    }

    /// Produce fully resolved workflow options with parsed palettes.
    pub fn workflow_options(&self) -> Result<WorkflowOptions> {
        let defaults = WorkflowOptions::default();

        let palette = Palette {
            foreground: match &self.palette.foreground {
                Some(names) => parse_colors(names)?,
                None => defaults.palette.foreground,
            },
            background: match &self.palette.background {
                Some(names) => parse_colors(names)?,
                None => defaults.palette.background,
            },
        };

        Ok(WorkflowOptions {
            palette,
            foreground: defaults.foreground,
            background: defaults.background,
            filename: self.export.filename.clone(),
            caption: self.export.caption.clone(),
        })
    }
}

fn parse_colors(names: &[String]) -> Result<Vec<Color>> {
    names.iter().map(|name| name.parse()).collect()
}

/// Randomization palette overrides; `None` keeps the built-in palette
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteOptions {
    /// Dark-module color names or `#rrggbb` values
    pub foreground: Option<Vec<String>>,
    /// Light-module color names or `#rrggbb` values
    pub background: Option<Vec<String>>,
}

/// Export configuration for downloads and share deep links
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Directory downloads are written into
    pub directory: PathBuf,
    /// Output file name for downloads
    pub filename: String,
    /// Caption embedded in share deep links
    pub caption: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            filename: DEFAULT_FILENAME.to_string(),
            caption: DEFAULT_CAPTION.to_string(),
        }
    }
}

impl ExportOptions {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(dir) = env::var("QRCRAFT_EXPORT_DIR") {
            self.directory = PathBuf::from(dir);
        }
        if let Ok(filename) = env::var("QRCRAFT_EXPORT_FILENAME") {
            if !filename.trim().is_empty() {
                self.filename = filename;
            }
        }
        if let Ok(caption) = env::var("QRCRAFT_SHARE_CAPTION") {
            self.caption = caption;
        }
    }
}

/// Structured logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingOptions {
    /// Default log level (overridable via `QRCRAFT_LOG_LEVEL`)
    pub level: String,
    /// Optional log file path for teeing structured logs
    pub file: Option<PathBuf>,
    /// Force ANSI colors in stderr logging
    pub color: bool,
    /// Optional log rotation strategy applied to `file`
    pub rotation: Option<LogRotation>,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            color: true,
            rotation: None,
        }
    }
}

impl LoggingOptions {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(level) = env::var("QRCRAFT_LOG_LEVEL") {
            self.level = level;
        }
        if let Ok(file) = env::var("QRCRAFT_LOG_FILE") {
            self.file = Some(PathBuf::from(file));
        }
        if let Ok(color) = env::var("QRCRAFT_LOG_COLOR") {
            match color.to_ascii_lowercase().as_str() {
                "0" | "false" | "off" => self.color = false,
                "1" | "true" | "on" => self.color = true,
                _ => {}
            }
        }
        if let Ok(rotation) = env::var("QRCRAFT_LOG_ROTATION") {
            if let Some(parsed) = LogRotation::from_str(&rotation) {
                self.rotation = Some(parsed);
            }
        }
    }
}

/// Supported log rotation policies for file sinks
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    /// Rotate log files once per hour
    Hourly,
    /// Rotate log files once per day
    Daily,
}

impl LogRotation {
    fn from_str(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "hourly" => Some(Self::Hourly),
            "daily" => Some(Self::Daily),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_workflow_options_use_builtin_palettes() {
        let config = QrcraftConfig::default();
        let options = config.workflow_options().unwrap();
        assert_eq!(options.filename, "qr-code.png");
        assert_eq!(options.palette.foreground.len(), 4);
        assert_eq!(options.palette.background.len(), 5);
        assert!(options.palette.foreground.contains(&Color::BLACK));
        assert!(options.palette.background.contains(&Color::HONEYDEW));
    }

    #[test]
    fn toml_palette_overrides_are_parsed() {
        let config: QrcraftConfig = toml::from_str(
            r##"
            [palette]
            foreground = ["black", "#123456"]

            [export]
            caption = "scan me"
            "##,
        )
        .unwrap();

        let options = config.workflow_options().unwrap();
        assert_eq!(
            options.palette.foreground,
            vec![Color::BLACK, Color::new(0x12, 0x34, 0x56)]
        );
        // Background untouched, keeps the builtin palette
        assert_eq!(options.palette.background.len(), 5);
        assert_eq!(options.caption, "scan me");
    }

    #[test]
    fn invalid_palette_color_is_a_config_error() {
        let config: QrcraftConfig = toml::from_str(
            r#"
            [palette]
            background = ["octarine"]
            "#,
        )
        .unwrap();

        assert!(config.workflow_options().is_err());
    }
}

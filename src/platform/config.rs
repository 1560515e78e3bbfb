// LogGrid - platform/config.rs
//
// Platform-specific configuration directory resolution and config.toml
// loading with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::util::constants;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for LogGrid configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/loggrid/ or %APPDATA%\LogGrid\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to the current directory if platform dirs cannot be
    /// determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");
            Self { config_dir }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility -- a newer
/// config file can be used with an older binary without crashing.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[parse]` section.
    pub parse: ParseSection,
    /// `[display]` section.
    pub display: DisplaySection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[parse]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ParseSection {
    /// Maximum records kept from a single parse.
    pub max_records: Option<usize>,
}

/// `[display]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct DisplaySection {
    /// Cell text for absent fields.
    pub placeholder: Option<String>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// All values are validated against named constants at load time.
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Maximum records kept from a single parse.
    pub max_records: usize,

    /// Cell text for absent fields.
    pub placeholder: String,

    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_records: constants::DEFAULT_MAX_RECORDS,
            placeholder: constants::DEFAULT_PLACEHOLDER.to_string(),
            log_level: None,
        }
    }
}

/// Load and validate `config.toml` from the given config directory.
///
/// Returns `AppConfig` with validated values and a list of non-fatal
/// warnings. If the file does not exist, returns defaults with no
/// warnings (first-run). If the file is unparseable, returns defaults
/// with a warning -- the application still starts but the user is
/// informed.
pub fn load_config(config_dir: &Path) -> (AppConfig, Vec<String>) {
    let config_path = config_dir.join(constants::CONFIG_FILE_NAME);

    let mut warnings: Vec<String> = Vec::new();

    if !config_path.exists() {
        return (AppConfig::default(), warnings);
    }

    let content = match std::fs::read_to_string(&config_path) {
        Ok(c) => c,
        Err(e) => {
            warnings.push(format!(
                "Could not read config file '{}': {e}. Using defaults.",
                config_path.display()
            ));
            return (AppConfig::default(), warnings);
        }
    };

    let raw: RawConfig = match toml::from_str(&content) {
        Ok(r) => r,
        Err(e) => {
            warnings.push(format!(
                "Failed to parse config file '{}': {e}. Using defaults. \
                 See config.example.toml for the expected format.",
                config_path.display()
            ));
            return (AppConfig::default(), warnings);
        }
    };

    tracing::debug!(path = %config_path.display(), "Loaded config.toml");

    // Validate each field against named constants, accumulating all
    // warnings rather than stopping at the first.
    let mut config = AppConfig::default();

    // -- Parse: max_records --
    if let Some(max) = raw.parse.max_records {
        if (constants::MIN_MAX_RECORDS..=constants::ABSOLUTE_MAX_RECORDS).contains(&max) {
            config.max_records = max;
        } else {
            warnings.push(format!(
                "[parse] max_records = {max} is out of range ({}-{}). Using default ({}).",
                constants::MIN_MAX_RECORDS,
                constants::ABSOLUTE_MAX_RECORDS,
                constants::DEFAULT_MAX_RECORDS,
            ));
        }
    }

    // -- Display: placeholder --
    if let Some(ref placeholder) = raw.display.placeholder {
        if placeholder.is_empty() || placeholder.len() > constants::MAX_PLACEHOLDER_LEN {
            warnings.push(format!(
                "[display] placeholder = \"{placeholder}\" must be 1-{} characters. \
                 Using default (\"{}\").",
                constants::MAX_PLACEHOLDER_LEN,
                constants::DEFAULT_PLACEHOLDER,
            ));
        } else {
            config.placeholder = placeholder.clone();
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.clone());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default (info).",
            ));
        }
    }

    (config, warnings)
}

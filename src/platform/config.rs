// FleetLens - platform/config.rs
//
// Platform-specific configuration, config directory resolution, and
// config.toml loading with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::util::constants;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for FleetLens configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/fleetlens/ or %APPDATA%\FleetLens\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
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
    /// `[data]` section.
    pub data: DataSection,
    /// `[view]` section.
    pub view: ViewSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[data]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct DataSection {
    /// Maximum directory recursion depth.
    pub max_depth: Option<usize>,
    /// Maximum dataset files to load per snapshot.
    pub max_files: Option<usize>,
    /// Include glob patterns.
    pub include_patterns: Option<Vec<String>>,
    /// Exclude glob patterns.
    pub exclude_patterns: Option<Vec<String>>,
}

/// `[view]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ViewSection {
    /// Days ahead of a deadline that count as a warning.
    pub warning_window_days: Option<u32>,
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
    // -- Data --
    /// Maximum directory recursion depth.
    pub max_depth: usize,
    /// Maximum dataset files to load per snapshot.
    pub max_files: usize,
    /// Include glob patterns for dataset discovery.
    pub include_patterns: Vec<String>,
    /// Exclude glob patterns for dataset discovery.
    pub exclude_patterns: Vec<String>,

    // -- View --
    /// Days ahead of a deadline that count as a warning.
    pub warning_window_days: u32,

    // -- Logging --
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_depth: constants::DEFAULT_MAX_DEPTH,
            max_files: constants::DEFAULT_MAX_FILES,
            include_patterns: constants::DEFAULT_INCLUDE_PATTERNS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            exclude_patterns: constants::DEFAULT_EXCLUDE_PATTERNS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            warning_window_days: constants::DEFAULT_WARNING_WINDOW_DAYS,
            log_level: None,
        }
    }
}

/// Load and validate `config.toml` from the given config directory.
///
/// Returns `AppConfig` with validated values and a list of non-fatal
/// warnings. If the file does not exist, returns defaults with no warnings
/// (first-run). If the file is unparseable, returns defaults with an error
/// warning -- the application still starts but the user is informed.
pub fn load_config(config_dir: &Path) -> (AppConfig, Vec<String>) {
    let config_path = config_dir.join(constants::CONFIG_FILE_NAME);

    let mut warnings: Vec<String> = Vec::new();

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), warnings);
    }

    let content = match std::fs::read_to_string(&config_path) {
        Ok(c) => c,
        Err(e) => {
            let msg = format!(
                "Could not read config file '{}': {e}. Using defaults.",
                config_path.display()
            );
            tracing::warn!("{}", msg);
            warnings.push(msg);
            return (AppConfig::default(), warnings);
        }
    };

    let raw: RawConfig = match toml::from_str(&content) {
        Ok(r) => r,
        Err(e) => {
            let msg = format!(
                "Failed to parse config file '{}': {e}. Using defaults.",
                config_path.display()
            );
            tracing::warn!("{}", msg);
            warnings.push(msg);
            return (AppConfig::default(), warnings);
        }
    };

    tracing::info!(path = %config_path.display(), "Loaded config.toml");

    // Validate each field against named constants, accumulating all warnings.
    let mut config = AppConfig::default();

    // -- Data: max_depth --
    if let Some(depth) = raw.data.max_depth {
        if (1..=constants::ABSOLUTE_MAX_DEPTH).contains(&depth) {
            config.max_depth = depth;
        } else {
            warnings.push(format!(
                "[data] max_depth = {depth} is out of range (1-{}). Using default ({}).",
                constants::ABSOLUTE_MAX_DEPTH,
                constants::DEFAULT_MAX_DEPTH,
            ));
        }
    }

    // -- Data: max_files --
    if let Some(files) = raw.data.max_files {
        if (constants::MIN_MAX_FILES..=constants::ABSOLUTE_MAX_FILES).contains(&files) {
            config.max_files = files;
        } else {
            warnings.push(format!(
                "[data] max_files = {files} is out of range ({}-{}). Using default ({}).",
                constants::MIN_MAX_FILES,
                constants::ABSOLUTE_MAX_FILES,
                constants::DEFAULT_MAX_FILES,
            ));
        }
    }

    // -- Data: include/exclude patterns (validated at compile time by
    // discovery; an empty include list would match nothing useful) --
    if let Some(patterns) = raw.data.include_patterns {
        if patterns.is_empty() {
            warnings.push(
                "[data] include_patterns is empty. Using default (*.json).".to_string(),
            );
        } else {
            config.include_patterns = patterns;
        }
    }
    if let Some(patterns) = raw.data.exclude_patterns {
        config.exclude_patterns = patterns;
    }

    // -- View: warning_window_days --
    if let Some(days) = raw.view.warning_window_days {
        if (constants::MIN_WARNING_WINDOW_DAYS..=constants::MAX_WARNING_WINDOW_DAYS)
            .contains(&days)
        {
            config.warning_window_days = days;
        } else {
            warnings.push(format!(
                "[view] warning_window_days = {days} is out of range ({}-{}). Using default ({}).",
                constants::MIN_WARNING_WINDOW_DAYS,
                constants::MAX_WARNING_WINDOW_DAYS,
                constants::DEFAULT_WARNING_WINDOW_DAYS,
            ));
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

    if !warnings.is_empty() {
        tracing::warn!(count = warnings.len(), "Config validation produced warnings");
    }

    (config, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_missing_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let (config, warnings) = load_config(dir.path());
        assert_eq!(config.max_files, constants::DEFAULT_MAX_FILES);
        assert_eq!(
            config.warning_window_days,
            constants::DEFAULT_WARNING_WINDOW_DAYS
        );
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_valid_config_applies() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(constants::CONFIG_FILE_NAME),
            "[data]\nmax_files = 10\n\n[view]\nwarning_window_days = 14\n",
        )
        .unwrap();
        let (config, warnings) = load_config(dir.path());
        assert_eq!(config.max_files, 10);
        assert_eq!(config.warning_window_days, 14);
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
    }

    #[test]
    fn test_out_of_range_value_warns_and_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(constants::CONFIG_FILE_NAME),
            "[view]\nwarning_window_days = 9999\n",
        )
        .unwrap();
        let (config, warnings) = load_config(dir.path());
        assert_eq!(
            config.warning_window_days,
            constants::DEFAULT_WARNING_WINDOW_DAYS
        );
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("warning_window_days"));
    }

    #[test]
    fn test_unparseable_config_warns_and_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(constants::CONFIG_FILE_NAME), "not = [valid").unwrap();
        let (config, warnings) = load_config(dir.path());
        assert_eq!(config.max_files, constants::DEFAULT_MAX_FILES);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_unknown_log_level_warns() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(constants::CONFIG_FILE_NAME),
            "[logging]\nlevel = \"loud\"\n",
        )
        .unwrap();
        let (config, warnings) = load_config(dir.path());
        assert!(config.log_level.is_none());
        assert_eq!(warnings.len(), 1);
    }
}

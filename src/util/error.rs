// FleetLens - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation; all errors preserve the causal
// chain for diagnostic logging.

use crate::core::model::Collection;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all FleetLens operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum FleetLensError {
    /// Dataset discovery or loading failed.
    Data(DataError),

    /// Filter operation failed.
    Filter(FilterError),

    /// View construction failed.
    View(ViewError),

    /// Export operation failed.
    Export(ExportError),

    /// Configuration loading or validation failed.
    Config(ConfigError),

    /// I/O error with path context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for FleetLensError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Data(e) => write!(f, "Data error: {e}"),
            Self::Filter(e) => write!(f, "Filter error: {e}"),
            Self::View(e) => write!(f, "View error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for FleetLensError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Data(e) => Some(e),
            Self::Filter(e) => Some(e),
            Self::View(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Data errors
// ---------------------------------------------------------------------------

/// Errors related to dataset discovery and snapshot loading.
#[derive(Debug)]
pub enum DataError {
    /// The data directory does not exist or is not accessible.
    RootNotFound { path: PathBuf },

    /// The data path is not a directory.
    NotADirectory { path: PathBuf },

    /// Permission denied accessing the data directory.
    PermissionDenied { path: PathBuf, source: io::Error },

    /// Maximum dataset file count exceeded during discovery.
    MaxFilesExceeded { max: usize },

    /// Walkdir traversal error (wraps individual file/dir access failures).
    Traversal {
        path: PathBuf,
        source: walkdir::Error,
    },

    /// A dataset file could not be parsed as its collection.
    DatasetParse {
        path: PathBuf,
        collection: Collection,
        source: serde_json::Error,
    },

    /// A date string could not be parsed as `YYYY-MM-DD`.
    InvalidDate {
        value: String,
        source: chrono::ParseError,
    },

    /// I/O error reading a dataset file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RootNotFound { path } => {
                write!(f, "Data directory '{}' does not exist", path.display())
            }
            Self::NotADirectory { path } => {
                write!(f, "Data path '{}' is not a directory", path.display())
            }
            Self::PermissionDenied { path, source } => {
                write!(
                    f,
                    "Permission denied accessing '{}': {source}",
                    path.display()
                )
            }
            Self::MaxFilesExceeded { max } => {
                write!(
                    f,
                    "Discovery stopped: exceeded maximum of {max} dataset files. \
                     Increase [data] max_files in config or narrow the data directory."
                )
            }
            Self::Traversal { path, source } => {
                write!(f, "Error traversing '{}': {source}", path.display())
            }
            Self::DatasetParse {
                path,
                collection,
                source,
            } => write!(
                f,
                "Failed to parse '{}' as a {collection} dataset: {source}",
                path.display()
            ),
            Self::InvalidDate { value, source } => {
                write!(f, "Cannot parse '{value}' as a YYYY-MM-DD date: {source}")
            }
            Self::Io { path, source } => {
                write!(f, "I/O error reading '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for DataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::PermissionDenied { source, .. } => Some(source),
            Self::Traversal { source, .. } => Some(source),
            Self::DatasetParse { source, .. } => Some(source),
            Self::InvalidDate { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<DataError> for FleetLensError {
    fn from(e: DataError) -> Self {
        Self::Data(e)
    }
}

// ---------------------------------------------------------------------------
// Filter errors
// ---------------------------------------------------------------------------

/// Errors related to filter operations.
#[derive(Debug)]
pub enum FilterError {
    /// User-provided regex is invalid.
    InvalidRegex {
        pattern: String,
        source: regex::Error,
    },
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRegex { pattern, source } => {
                write!(f, "Invalid filter regex '{pattern}': {source}")
            }
        }
    }
}

impl std::error::Error for FilterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidRegex { source, .. } => Some(source),
        }
    }
}

impl From<FilterError> for FleetLensError {
    fn from(e: FilterError) -> Self {
        Self::Filter(e)
    }
}

// ---------------------------------------------------------------------------
// View errors
// ---------------------------------------------------------------------------

/// Errors related to view construction.
#[derive(Debug)]
pub enum ViewError {
    /// The requested group-by field is not a permitted group key.
    UnknownGroupKey {
        collection: Collection,
        key: String,
        valid: Vec<&'static str>,
    },

    /// The requested sum field is not a permitted numeric field.
    UnknownSumField {
        collection: Collection,
        field: String,
        valid: Vec<&'static str>,
    },
}

impl fmt::Display for ViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownGroupKey {
                collection,
                key,
                valid,
            } => write!(
                f,
                "'{key}' is not a group key for {collection}. Valid keys: {}",
                valid.join(", ")
            ),
            Self::UnknownSumField {
                collection,
                field,
                valid,
            } => {
                if valid.is_empty() {
                    write!(f, "{collection} has no numeric fields to sum")
                } else {
                    write!(
                        f,
                        "'{field}' is not a numeric field for {collection}. Valid fields: {}",
                        valid.join(", ")
                    )
                }
            }
        }
    }
}

impl std::error::Error for ViewError {}

impl From<ViewError> for FleetLensError {
    fn from(e: ViewError) -> Self {
        Self::View(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to export operations.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error writing the export file.
    Io { path: PathBuf, source: io::Error },

    /// CSV serialisation error.
    Csv { path: PathBuf, source: csv::Error },

    /// JSON serialisation error.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Export would exceed the maximum row count.
    TooManyRows { count: usize, max: usize },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Export I/O error '{}': {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "CSV export error '{}': {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "JSON export error '{}': {source}", path.display())
            }
            Self::TooManyRows { count, max } => write!(
                f,
                "Export of {count} rows exceeds maximum of {max}. \
                 Apply filters to reduce the result set."
            ),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ExportError> for FleetLensError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for FleetLensError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for FleetLens results.
pub type Result<T> = std::result::Result<T, FleetLensError>;

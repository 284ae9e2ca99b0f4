// FleetLens - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "FleetLens";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "FleetLens";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Dataset discovery limits
// =============================================================================

/// Maximum directory recursion depth during dataset discovery.
pub const DEFAULT_MAX_DEPTH: usize = 4;

/// Hard upper bound on max depth (prevents infinite traversal).
pub const ABSOLUTE_MAX_DEPTH: usize = 16;

/// Minimum sensible value for the max-files limit.
pub const MIN_MAX_FILES: usize = 1;

/// Maximum number of dataset files to load in a single snapshot.
pub const DEFAULT_MAX_FILES: usize = 50;

/// Hard upper bound on max files (prevents configuration mistakes).
pub const ABSOLUTE_MAX_FILES: usize = 1_000;

/// Maximum size of a single dataset file in bytes. Datasets are read whole
/// into memory for parsing; oversized files are skipped with a warning so a
/// stray multi-gigabyte file cannot exhaust memory.
pub const MAX_DATASET_FILE_SIZE: u64 = 64 * 1024 * 1024; // 64 MB

/// Default include glob patterns for dataset discovery.
pub const DEFAULT_INCLUDE_PATTERNS: &[&str] = &["*.json"];

/// Default exclude glob patterns for dataset discovery.
pub const DEFAULT_EXCLUDE_PATTERNS: &[&str] =
    &["*.bak", "*.tmp", "node_modules", ".git", "archive"];

// =============================================================================
// View defaults
// =============================================================================

/// Default warning window: days ahead of a deadline that count as a warning.
/// Applied to licence expiries, service due dates, and maintenance deadlines.
pub const DEFAULT_WARNING_WINDOW_DAYS: u32 = 30;

/// Minimum user-configurable warning window.
pub const MIN_WARNING_WINDOW_DAYS: u32 = 1;

/// Maximum user-configurable warning window (one year).
pub const MAX_WARNING_WINDOW_DAYS: u32 = 365;

// =============================================================================
// Export
// =============================================================================

/// Maximum number of rows that can be exported in a single operation.
pub const MAX_EXPORT_ROWS: usize = 1_000_000;

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

// FleetLens - data/discovery.rs
//
// Directory traversal and dataset file discovery.
//
// Architecture note: this module uses `walkdir` for directory traversal and
// reads only file *metadata* (size, mtime), never file *contents* -- parsing
// is owned by data::loader. Per-file I/O errors are non-fatal and collected
// as warnings; only an invalid root or a blown file-count limit is fatal.

use crate::core::model::Collection;
use crate::util::constants;
use crate::util::error::DataError;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

// =============================================================================
// Configuration
// =============================================================================

/// Configuration for a discovery operation.
///
/// All limits reference named constants from `util::constants` so they are
/// auditable in a single place.
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    /// Maximum directory recursion depth.
    pub max_depth: usize,

    /// Maximum number of dataset files accepted before discovery fails.
    pub max_files: usize,

    /// Glob patterns (filename-only) that a file MUST match to be included.
    /// An empty list means "include everything that is not excluded".
    pub include_patterns: Vec<String>,

    /// Glob patterns matched against filenames AND directory component names.
    /// Matching files are skipped; matching directories are not descended into.
    pub exclude_patterns: Vec<String>,

    /// File size (bytes) above which a dataset is skipped with a warning.
    pub max_file_size: u64,
}

impl Default for DiscoveryConfig {
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
            max_file_size: constants::MAX_DATASET_FILE_SIZE,
        }
    }
}

// =============================================================================
// Discovered dataset
// =============================================================================

/// Metadata about a dataset file found during discovery, before parsing.
#[derive(Debug, Clone)]
pub struct DiscoveredDataset {
    /// Full path to the file.
    pub path: PathBuf,

    /// Collection detected from the filename stem.
    pub collection: Collection,

    /// File size in bytes.
    pub size: u64,

    /// Last modification timestamp.
    pub modified: Option<DateTime<Utc>>,
}

// =============================================================================
// Discovery
// =============================================================================

/// Discover dataset files under `root`, applying include/exclude globs.
///
/// # Non-fatal problems
/// Inaccessible entries, oversized files, and files whose stem matches no
/// known collection are recorded as human-readable strings in the returned
/// warnings vector and do NOT cause the function to return `Err`.
///
/// # Fatal errors
/// Returns `Err` for an invalid root (`RootNotFound`, `NotADirectory`,
/// `PermissionDenied`) or when more than `max_files` datasets are accepted
/// (`MaxFilesExceeded`).
pub fn discover_datasets(
    root: &Path,
    config: &DiscoveryConfig,
) -> Result<(Vec<DiscoveredDataset>, Vec<String>), DataError> {
    // Pre-flight validation via fs::metadata rather than Path::exists(),
    // which maps ALL errors -- including PermissionDenied -- to `false` and
    // would make an access-denied directory indistinguishable from a
    // missing one.
    match std::fs::metadata(root) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => {
            return Err(DataError::NotADirectory {
                path: root.to_path_buf(),
            });
        }
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(DataError::PermissionDenied {
                path: root.to_path_buf(),
                source: e,
            });
        }
        Err(_) => {
            return Err(DataError::RootNotFound {
                path: root.to_path_buf(),
            });
        }
    }

    // Clamp config limits to absolute bounds.
    let max_files = config.max_files.min(constants::ABSOLUTE_MAX_FILES);
    let max_depth = config.max_depth.min(constants::ABSOLUTE_MAX_DEPTH);

    tracing::debug!(
        root = %root.display(),
        max_depth,
        max_files,
        include = ?config.include_patterns,
        exclude = ?config.exclude_patterns,
        "Dataset discovery starting"
    );

    // Compile glob patterns once; log and skip any that fail compilation.
    let include_pats = compile_patterns(&config.include_patterns, "include");
    let exclude_pats = compile_patterns(&config.exclude_patterns, "exclude");

    let mut datasets: Vec<DiscoveredDataset> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    // `filter_entry` short-circuits directory descent for excluded directory
    // names, so excluded subtrees (archive/, .git/) are never traversed.
    let walker = walkdir::WalkDir::new(root)
        .max_depth(max_depth)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            if e.file_type().is_dir() {
                let name = e.file_name().to_str().unwrap_or("");
                // Always allow the root itself
                if e.depth() == 0 {
                    return true;
                }
                return !is_excluded_component(name, &exclude_pats);
            }
            true // Visit files; we filter them individually below
        });

    for entry_result in walker {
        let entry = match entry_result {
            Ok(e) => e,
            Err(e) => {
                // Inaccessible entry: non-fatal, record warning.
                let path_str = e
                    .path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "<unknown>".to_string());
                let msg = format!("Cannot access '{path_str}': {e}");
                tracing::debug!(warning = %msg, "Discovery warning");
                warnings.push(msg);
                continue;
            }
        };

        // Skip directories (they are handled above by filter_entry).
        if entry.file_type().is_dir() {
            continue;
        }

        let path = entry.path();

        let file_name = match path.file_name().and_then(|n| n.to_str()) {
            Some(n) => n,
            None => {
                warnings.push(format!("Skipping '{}': non-UTF-8 filename", path.display()));
                continue;
            }
        };

        // Apply exclude patterns to the filename itself (*.bak, *.tmp).
        if is_excluded_filename(file_name, &exclude_pats) {
            tracing::trace!(file = file_name, "Excluded by pattern");
            continue;
        }

        // Apply include patterns to the filename.
        if !is_included(file_name, &include_pats) {
            tracing::trace!(file = file_name, "Not matched by include patterns");
            continue;
        }

        // Detect which collection the file holds from its stem.
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
        let collection = match Collection::from_stem(stem) {
            Some(c) => c,
            None => {
                warnings.push(format!(
                    "Skipping '{}': filename does not identify a collection \
                     (expected a stem starting with vehicles, drivers, trips, \
                     maintenance, or alerts)",
                    path.display()
                ));
                continue;
            }
        };

        // Collect file metadata.
        let metadata = match entry.metadata() {
            Ok(m) => m,
            Err(e) => {
                let msg = format!("Cannot read metadata for '{}': {e}", path.display());
                tracing::debug!(warning = %msg, "Discovery warning");
                warnings.push(msg);
                continue;
            }
        };

        let size = metadata.len();
        if size > config.max_file_size {
            warnings.push(format!(
                "Skipping '{}': {size} bytes exceeds the {} byte dataset limit",
                path.display(),
                config.max_file_size
            ));
            continue;
        }

        if datasets.len() >= max_files {
            return Err(DataError::MaxFilesExceeded { max: max_files });
        }

        let modified: Option<DateTime<Utc>> = metadata.modified().ok().map(DateTime::<Utc>::from);

        tracing::debug!(
            file = %path.display(),
            %collection,
            size,
            "Dataset discovered"
        );

        datasets.push(DiscoveredDataset {
            path: path.to_path_buf(),
            collection,
            size,
            modified,
        });
    }

    tracing::debug!(
        datasets = datasets.len(),
        warnings = warnings.len(),
        "Dataset discovery complete"
    );

    Ok((datasets, warnings))
}

// =============================================================================
// Glob helpers
// =============================================================================

/// Compile a list of glob pattern strings into `glob::Pattern` objects.
/// Patterns that fail to compile are logged as warnings and skipped.
fn compile_patterns(patterns: &[String], kind: &str) -> Vec<glob::Pattern> {
    patterns
        .iter()
        .filter_map(|p| match glob::Pattern::new(p) {
            Ok(compiled) => Some(compiled),
            Err(e) => {
                tracing::warn!(pattern = p, kind, error = %e, "Invalid glob pattern, skipping");
                None
            }
        })
        .collect()
}

/// Returns true if `dir_name` matches any exclude pattern that contains no
/// wildcard characters. These are treated as directory component exclusions
/// (e.g. "archive", ".git") rather than filename glob patterns.
fn is_excluded_component(dir_name: &str, exclude_pats: &[glob::Pattern]) -> bool {
    exclude_pats.iter().any(|p| {
        let s = p.as_str();
        // Only literal patterns (no wildcards) are used as component matchers.
        !s.contains('*') && !s.contains('?') && !s.contains('[') && p.matches(dir_name)
    })
}

/// Returns true if `file_name` matches any exclude pattern (wildcard or literal).
fn is_excluded_filename(file_name: &str, exclude_pats: &[glob::Pattern]) -> bool {
    exclude_pats.iter().any(|p| p.matches(file_name))
}

/// Returns true if `file_name` matches at least one include pattern.
/// An empty include list means "include all" (returns true).
fn is_included(file_name: &str, include_pats: &[glob::Pattern]) -> bool {
    if include_pats.is_empty() {
        return true;
    }
    include_pats.iter().any(|p| p.matches(file_name))
}

// =============================================================================
// Tests
// =============================================================================

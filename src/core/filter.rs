// FleetLens - core/filter.rs
//
// Composable filter engine for fleet record views.
// All active filters are AND-combined.
// Core layer: pure logic, no I/O or rendering dependencies.

use crate::core::model::{FieldValue, ViewProfile};
use crate::util::error::FilterError;
use regex::Regex;

/// Status/category filter with the reserved value `all` meaning no filtering.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum StatusFilter {
    /// Pass every record.
    #[default]
    All,

    /// Exact (case-insensitive) match on the status field.
    Only(String),
}

impl StatusFilter {
    /// Parse user input: `all` (any casing) or empty means no filtering.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Only(trimmed.to_lowercase())
        }
    }

    /// Returns true if this filter passes everything.
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

/// Complete filter state. All fields are AND-combined when applied.
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    /// Substring text search across the profile's text fields
    /// (case-insensitive). Empty = no filter.
    pub text_search: String,

    /// Status filter against the profile's status field.
    pub status: StatusFilter,

    /// Compiled regex search across the profile's text fields.
    /// None = no regex filter.
    pub regex_search: Option<Regex>,
}

impl FilterState {
    /// Returns true if no filters are active.
    pub fn is_empty(&self) -> bool {
        self.text_search.is_empty() && self.status.is_all() && self.regex_search.is_none()
    }

    /// Set the regex search pattern, compiling it.
    /// Returns an error if the pattern is invalid.
    pub fn set_regex(&mut self, pattern: &str) -> Result<(), FilterError> {
        if pattern.is_empty() {
            self.regex_search = None;
            return Ok(());
        }
        let regex = Regex::new(pattern).map_err(|e| FilterError::InvalidRegex {
            pattern: pattern.to_string(),
            source: e,
        })?;
        self.regex_search = Some(regex);
        Ok(())
    }
}

/// Apply filters to a slice of records, returning indices of matching records.
///
/// Returns a Vec of indices into the original slice. This avoids copying
/// records and keeps grouping, classification, and export working against
/// the caller-owned snapshot. The output preserves input order (stable
/// filter); an empty filter returns every index.
pub fn apply_filters<R>(records: &[R], filter: &FilterState, profile: &ViewProfile<R>) -> Vec<usize> {
    if filter.is_empty() {
        return (0..records.len()).collect();
    }

    let text_lower = filter.text_search.to_lowercase();

    records
        .iter()
        .enumerate()
        .filter(|(_, record)| matches_all(*record, filter, &text_lower, profile))
        .map(|(idx, _)| idx)
        .collect()
}

/// Check if a single record matches all active filters.
fn matches_all<R>(
    record: &R,
    filter: &FilterState,
    text_lower: &str,
    profile: &ViewProfile<R>,
) -> bool {
    // Status filter: exact case-insensitive match on the status field.
    if let StatusFilter::Only(ref wanted) = filter.status {
        let status = (profile.status_field.get)(record).as_text().to_lowercase();
        if status != *wanted {
            return false;
        }
    }

    // Text search: ANY text field containing the term retains the record.
    // Non-text values are stringified; Missing compares as empty string.
    if !text_lower.is_empty()
        && !profile
            .text_fields
            .iter()
            .any(|f| field_text_lower(record, f.get).contains(text_lower))
    {
        return false;
    }

    // Regex search across the same text fields.
    if let Some(ref regex) = filter.regex_search {
        if !profile
            .text_fields
            .iter()
            .any(|f| regex.is_match(&(f.get)(record).as_text()))
        {
            return false;
        }
    }

    true
}

fn field_text_lower<R>(record: &R, get: fn(&R) -> FieldValue) -> String {
    get(record).as_text().to_lowercase()
}

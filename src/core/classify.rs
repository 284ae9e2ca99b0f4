// FleetLens - core/classify.rs
//
// Deadline classification: licence expiries, service due dates, and
// maintenance deadlines all reduce to the same date-threshold rule.
// Core layer: pure logic, no I/O or rendering dependencies.

use crate::core::model::ViewProfile;
use crate::util::error::DataError;
use chrono::NaiveDate;

/// Classification of a deadline against a reference date.
///
/// Ordered most urgent first so sorting a mixed list surfaces the worst
/// state at the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeadlineStatus {
    /// The deadline has passed.
    Overdue,

    /// The deadline falls within the warning window.
    Warning,

    /// The deadline is comfortably in the future.
    Ok,
}

impl DeadlineStatus {
    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            DeadlineStatus::Overdue => "overdue",
            DeadlineStatus::Warning => "warning",
            DeadlineStatus::Ok => "ok",
        }
    }
}

impl std::fmt::Display for DeadlineStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a deadline date against a reference date.
///
/// `diff_days` is the exact whole-day difference of the two date-only
/// values, so time-of-day off-by-one errors cannot arise.
///
/// Boundary rule, applied uniformly everywhere: a negative difference is
/// `Overdue`; a difference from zero up to and INCLUDING the window is
/// `Warning`; anything further out is `Ok`. The inclusive upper bound means
/// a deadline exactly `warning_window_days` away is still flagged.
pub fn classify_deadline(
    target: NaiveDate,
    reference: NaiveDate,
    warning_window_days: u32,
) -> DeadlineStatus {
    let diff_days = (target - reference).num_days();
    if diff_days < 0 {
        DeadlineStatus::Overdue
    } else if diff_days <= i64::from(warning_window_days) {
        DeadlineStatus::Warning
    } else {
        DeadlineStatus::Ok
    }
}

/// Parse a `YYYY-MM-DD` date string, surfacing failures as a typed error.
///
/// This is the single parse boundary for dates arriving as text (the CLI
/// `--as-of` option); dataset dates are parsed by serde at load time.
/// Parse failures are never silently swallowed.
pub fn parse_date(value: &str) -> Result<NaiveDate, DataError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|e| DataError::InvalidDate {
        value: value.to_string(),
        source: e,
    })
}

/// Classify the profile's deadline field for every record.
///
/// Returns one entry per input record: `None` when the profile has no
/// deadline field or the record's field is unset, `Some(status)` otherwise.
/// Parallel to the record slice so callers can zip badges with records.
pub fn deadline_badges<R>(
    records: &[R],
    profile: &ViewProfile<R>,
    reference: NaiveDate,
    warning_window_days: u32,
) -> Vec<Option<DeadlineStatus>> {
    let Some(field) = profile.deadline_field else {
        return vec![None; records.len()];
    };

    records
        .iter()
        .map(|r| {
            (field.get)(r)
                .as_date()
                .map(|d| classify_deadline(d, reference, warning_window_days))
        })
        .collect()
}

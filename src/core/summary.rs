// FleetLens - core/summary.rs
//
// Top-level aggregate statistics for summary cards: named predicate counts
// plus sum/average aggregates over numeric fields.
// Core layer: pure logic, no I/O or rendering dependencies.

use crate::core::model::FieldSpec;

/// A named boolean test counted by `summarize` (e.g. "active",
/// "critical-active").
#[derive(Debug)]
pub struct NamedPredicate<R> {
    /// Name the count is reported under.
    pub name: &'static str,

    /// The test itself.
    pub test: fn(&R) -> bool,
}

// Manual Clone/Copy: derived impls would wrongly require `R: Clone`.
impl<R> Clone for NamedPredicate<R> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<R> Copy for NamedPredicate<R> {}

/// What a summary should compute: which predicates to count and which
/// numeric fields to sum and average.
#[derive(Debug, Clone)]
pub struct SummarySpec<R> {
    pub predicates: Vec<NamedPredicate<R>>,
    pub sums: Vec<FieldSpec<R>>,
    pub averages: Vec<FieldSpec<R>>,
}

/// Computed summary statistics over one filtered view.
///
/// Entries preserve the order of the spec so rendering is stable.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// Number of records summarised (the filtered subset size).
    pub total: usize,

    /// Predicate name -> matching record count.
    pub counts: Vec<(String, usize)>,

    /// Field name -> sum over the subset.
    pub sums: Vec<(String, f64)>,

    /// Field name -> arithmetic mean over the subset. An empty subset
    /// yields `0.0` (documented division-by-zero guard), never NaN.
    pub averages: Vec<(String, f64)>,
}

impl Summary {
    /// Look up a predicate count by name.
    pub fn count(&self, name: &str) -> Option<usize> {
        self.counts.iter().find(|(n, _)| n == name).map(|(_, c)| *c)
    }

    /// Look up a sum by field name.
    pub fn sum(&self, name: &str) -> Option<f64> {
        self.sums.iter().find(|(n, _)| n == name).map(|(_, s)| *s)
    }

    /// Look up an average by field name.
    pub fn average(&self, name: &str) -> Option<f64> {
        self.averages.iter().find(|(n, _)| n == name).map(|(_, a)| *a)
    }
}

/// Summarise the records selected by `indices`.
///
/// Pure single-pass computation per aggregate; an empty subset produces
/// `total == 0`, zero counts, zero sums, and `0.0` averages without error.
/// Unset and non-numeric field values contribute `0.0` to sums and are
/// still divided over the full subset size in averages, matching the
/// grouping aggregates.
pub fn summarize<R>(records: &[R], indices: &[usize], spec: &SummarySpec<R>) -> Summary {
    let total = indices.len();

    let counts = spec
        .predicates
        .iter()
        .map(|p| {
            let n = indices.iter().filter(|&&i| (p.test)(&records[i])).count();
            (p.name.to_string(), n)
        })
        .collect();

    let field_sum = |field: &FieldSpec<R>| -> f64 {
        indices
            .iter()
            .map(|&i| (field.get)(&records[i]).as_number().unwrap_or(0.0))
            .sum()
    };

    let sums = spec
        .sums
        .iter()
        .map(|f| (f.key.to_string(), field_sum(f)))
        .collect();

    let averages = spec
        .averages
        .iter()
        .map(|f| {
            let avg = if total == 0 {
                0.0
            } else {
                field_sum(f) / total as f64
            };
            (f.key.to_string(), avg)
        })
        .collect();

    Summary {
        total,
        counts,
        sums,
        averages,
    }
}

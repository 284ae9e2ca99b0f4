// FleetLens - core/group.rs
//
// Partition a filtered view into named groups with per-group aggregates.
// Core layer: pure logic, no I/O or rendering dependencies.

use crate::core::model::FieldSpec;
use std::collections::HashMap;

/// One group of records sharing a key value.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    /// String form of the shared key value (empty for unset fields).
    pub key: String,

    /// Indices into the caller's record slice, in input order.
    pub indices: Vec<usize>,

    /// Number of records in the group.
    pub count: usize,

    /// Sum of the requested numeric field, when one was supplied.
    pub sum: Option<f64>,
}

/// Partition `indices` by the string form of the key field.
///
/// Groups appear in first-occurrence order of each key in the input
/// sequence (reduce-style accumulation, not sorted), so two runs over the
/// same input produce identical output.
///
/// When `sum_field` is supplied, each group carries the sum of that field
/// over its records; unset and non-numeric values contribute `0.0`, keeping
/// the aggregate total over sparse data. Without it, `sum` is `None`.
///
/// Partition invariant: every input index lands in exactly one group, so
/// group counts always sum to `indices.len()`.
pub fn group_records<R>(
    records: &[R],
    indices: &[usize],
    key_field: FieldSpec<R>,
    sum_field: Option<FieldSpec<R>>,
) -> Vec<Group> {
    let mut groups: Vec<Group> = Vec::new();
    let mut slot_by_key: HashMap<String, usize> = HashMap::new();

    for &idx in indices {
        let record = &records[idx];
        let key = (key_field.get)(record).as_text();

        let slot = match slot_by_key.get(&key) {
            Some(&slot) => slot,
            None => {
                let slot = groups.len();
                slot_by_key.insert(key.clone(), slot);
                groups.push(Group {
                    key,
                    indices: Vec::new(),
                    count: 0,
                    sum: sum_field.map(|_| 0.0),
                });
                slot
            }
        };

        let group = &mut groups[slot];
        group.indices.push(idx);
        group.count += 1;
        if let (Some(field), Some(sum)) = (sum_field, group.sum.as_mut()) {
            *sum += (field.get)(record).as_number().unwrap_or(0.0);
        }
    }

    groups
}

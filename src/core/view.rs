// FleetLens - core/view.rs
//
// The view-model builder: one query in, one renderable view model out.
// Runs the whole derivation pipeline over a snapshot collection:
// filter -> deadline classification -> grouping -> summary statistics.
// Core layer: pure logic, no I/O or rendering dependencies.

use crate::core::classify::{classify_deadline, DeadlineStatus};
use crate::core::filter::{apply_filters, FilterState};
use crate::core::group::{group_records, Group};
use crate::core::model::{
    Alert, AlertSeverity, AlertStatus, Collection, Driver, DriverStatus, MaintenanceItem,
    MaintenanceStatus, Trip, TripStatus, Vehicle, VehicleStatus, ViewProfile,
};
use crate::core::summary::{summarize, NamedPredicate, Summary, SummarySpec};
use crate::util::error::ViewError;
use chrono::NaiveDate;

/// One dashboard query against a collection.
#[derive(Debug, Clone)]
pub struct ViewQuery {
    /// Search / status / regex filtering.
    pub filter: FilterState,

    /// Group-by field name; must be one of the profile's group keys.
    pub group_by: Option<String>,

    /// Numeric field summed per group; must be one of the profile's
    /// numeric fields. Ignored unless `group_by` is set.
    pub sum_by: Option<String>,

    /// Reference date for deadline classification ("today" on a live
    /// dashboard; pinned in tests and reproducible reports).
    pub reference: NaiveDate,

    /// Days ahead of a deadline that count as a warning.
    pub warning_window_days: u32,
}

/// Deadline badge totals over the filtered subset, for summary cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BadgeCounts {
    pub overdue: usize,
    pub warning: usize,
    pub ok: usize,
}

/// The derived view a presentation layer consumes: plain data, no
/// rendering concerns.
#[derive(Debug, Clone)]
pub struct ViewModel {
    /// Which collection was queried.
    pub collection: Collection,

    /// Indices of the filtered records, in snapshot order.
    pub indices: Vec<usize>,

    /// Deadline badge per filtered record, parallel to `indices`.
    /// `None` where the collection has no deadline field or the record's
    /// field is unset.
    pub badges: Vec<Option<DeadlineStatus>>,

    /// Groups with per-group aggregates; empty when no group-by was asked.
    pub groups: Vec<Group>,

    /// Summary statistics over the filtered subset.
    pub summary: Summary,

    /// Badge totals over the filtered subset.
    pub badge_counts: BadgeCounts,
}

/// Derive a view model from a collection snapshot.
///
/// Pure: repeated calls over the same snapshot and query yield identical
/// view models. Fails only on an unknown group/sum field name; filtering,
/// classification, and summarisation are total.
pub fn build_view<R>(
    records: &[R],
    query: &ViewQuery,
    profile: &ViewProfile<R>,
    spec: &SummarySpec<R>,
) -> Result<ViewModel, ViewError> {
    let indices = apply_filters(records, &query.filter, profile);

    // Deadline badges for the filtered subset, parallel to `indices`.
    let badges: Vec<Option<DeadlineStatus>> = match profile.deadline_field {
        Some(field) => indices
            .iter()
            .map(|&i| {
                (field.get)(&records[i])
                    .as_date()
                    .map(|d| classify_deadline(d, query.reference, query.warning_window_days))
            })
            .collect(),
        None => vec![None; indices.len()],
    };

    let mut badge_counts = BadgeCounts::default();
    for badge in badges.iter().flatten() {
        match badge {
            DeadlineStatus::Overdue => badge_counts.overdue += 1,
            DeadlineStatus::Warning => badge_counts.warning += 1,
            DeadlineStatus::Ok => badge_counts.ok += 1,
        }
    }

    let groups: Vec<Group> = match &query.group_by {
        Some(name) => {
            let key_field =
                profile
                    .group_key(name)
                    .ok_or_else(|| ViewError::UnknownGroupKey {
                        collection: profile.collection,
                        key: name.clone(),
                        valid: profile.group_key_names(),
                    })?;
            let sum_field = match &query.sum_by {
                Some(sum_name) => Some(profile.numeric_field(sum_name).ok_or_else(|| {
                    ViewError::UnknownSumField {
                        collection: profile.collection,
                        field: sum_name.clone(),
                        valid: profile.numeric_field_names(),
                    }
                })?),
                None => None,
            };
            group_records(records, &indices, key_field, sum_field)
        }
        None => Vec::new(),
    };

    let summary = summarize(records, &indices, spec);

    Ok(ViewModel {
        collection: profile.collection,
        indices,
        badges,
        groups,
        summary,
        badge_counts,
    })
}

// =============================================================================
// Default summary specs (the counts shown on each collection's cards)
// =============================================================================

/// Vehicle cards: operational state counts and mean mileage.
pub fn vehicle_summary_spec() -> SummarySpec<Vehicle> {
    let profile = Vehicle::view_profile();
    SummarySpec {
        predicates: vec![
            NamedPredicate {
                name: "active",
                test: |v: &Vehicle| v.status == VehicleStatus::Active,
            },
            NamedPredicate {
                name: "in-shop",
                test: |v: &Vehicle| v.status == VehicleStatus::InShop,
            },
            NamedPredicate {
                name: "retired",
                test: |v: &Vehicle| v.status == VehicleStatus::Retired,
            },
        ],
        sums: Vec::new(),
        averages: profile.numeric_fields.clone(),
    }
}

/// Driver cards: duty state counts and mean safety score.
pub fn driver_summary_spec() -> SummarySpec<Driver> {
    let profile = Driver::view_profile();
    SummarySpec {
        predicates: vec![
            NamedPredicate {
                name: "on-duty",
                test: |d: &Driver| d.status == DriverStatus::OnDuty,
            },
            NamedPredicate {
                name: "suspended",
                test: |d: &Driver| d.status == DriverStatus::Suspended,
            },
        ],
        sums: Vec::new(),
        averages: profile.numeric_fields.clone(),
    }
}

/// Trip cards: lifecycle counts, total and mean distance, total cargo.
pub fn trip_summary_spec() -> SummarySpec<Trip> {
    let profile = Trip::view_profile();
    SummarySpec {
        predicates: vec![
            NamedPredicate {
                name: "scheduled",
                test: |t: &Trip| t.status == TripStatus::Scheduled,
            },
            NamedPredicate {
                name: "in-transit",
                test: |t: &Trip| t.status == TripStatus::InTransit,
            },
            NamedPredicate {
                name: "completed",
                test: |t: &Trip| t.status == TripStatus::Completed,
            },
        ],
        sums: profile.numeric_fields.clone(),
        averages: profile.numeric_field("distance_km").into_iter().collect(),
    }
}

/// Maintenance cards: open-work counts and total cost.
pub fn maintenance_summary_spec() -> SummarySpec<MaintenanceItem> {
    let profile = MaintenanceItem::view_profile();
    SummarySpec {
        predicates: vec![
            NamedPredicate {
                name: "pending",
                test: |m: &MaintenanceItem| m.status == MaintenanceStatus::Pending,
            },
            NamedPredicate {
                name: "in-progress",
                test: |m: &MaintenanceItem| m.status == MaintenanceStatus::InProgress,
            },
        ],
        sums: profile.numeric_fields.clone(),
        averages: Vec::new(),
    }
}

/// Alert cards: active and critical-active counts.
pub fn alert_summary_spec() -> SummarySpec<Alert> {
    SummarySpec {
        predicates: vec![
            NamedPredicate {
                name: "active",
                test: |a: &Alert| a.status == AlertStatus::Active,
            },
            NamedPredicate {
                name: "critical-active",
                test: |a: &Alert| {
                    a.severity == AlertSeverity::Critical && a.status == AlertStatus::Active
                },
            },
            NamedPredicate {
                name: "resolved",
                test: |a: &Alert| a.status == AlertStatus::Resolved,
            },
        ],
        sums: Vec::new(),
        averages: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::filter::StatusFilter;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn make_driver(id: &str, name: &str, depot: &str, expiry: NaiveDate, status: DriverStatus) -> Driver {
        Driver {
            id: id.to_string(),
            name: name.to_string(),
            licence_number: format!("LN-{id}"),
            licence_expiry: expiry,
            status,
            depot: depot.to_string(),
            safety_score: Some(90.0),
            assigned_vehicle: None,
        }
    }

    fn roster() -> Vec<Driver> {
        vec![
            make_driver("DR-1", "A. Mercer", "North", date(2023, 11, 1), DriverStatus::OnDuty),
            make_driver("DR-2", "B. Okafor", "South", date(2023, 12, 20), DriverStatus::OnDuty),
            make_driver("DR-3", "C. Lindqvist", "North", date(2024, 8, 1), DriverStatus::OffDuty),
            make_driver("DR-4", "D. Varga", "South", date(2024, 9, 1), DriverStatus::Suspended),
        ]
    }

    fn base_query() -> ViewQuery {
        ViewQuery {
            filter: FilterState::default(),
            group_by: None,
            sum_by: None,
            reference: date(2023, 12, 1),
            warning_window_days: 30,
        }
    }

    #[test]
    fn test_build_view_unfiltered() {
        let drivers = roster();
        let view = build_view(
            &drivers,
            &base_query(),
            &Driver::view_profile(),
            &driver_summary_spec(),
        )
        .unwrap();

        assert_eq!(view.indices, vec![0, 1, 2, 3]);
        assert_eq!(view.summary.total, 4);
        assert_eq!(view.summary.count("on-duty"), Some(2));
        assert_eq!(view.summary.count("suspended"), Some(1));
        assert_eq!(view.badge_counts, BadgeCounts { overdue: 1, warning: 1, ok: 2 });
        assert!(view.groups.is_empty());
    }

    #[test]
    fn test_build_view_badges_parallel_to_filtered_indices() {
        let drivers = roster();
        let query = ViewQuery {
            filter: FilterState {
                status: StatusFilter::parse("on-duty"),
                ..Default::default()
            },
            ..base_query()
        };
        let view = build_view(
            &drivers,
            &query,
            &Driver::view_profile(),
            &driver_summary_spec(),
        )
        .unwrap();

        assert_eq!(view.indices, vec![0, 1]);
        assert_eq!(view.badges.len(), view.indices.len());
        assert_eq!(view.badges[0], Some(DeadlineStatus::Overdue));
        assert_eq!(view.badges[1], Some(DeadlineStatus::Warning));
        assert_eq!(view.badge_counts, BadgeCounts { overdue: 1, warning: 1, ok: 0 });
    }

    #[test]
    fn test_build_view_grouped() {
        let drivers = roster();
        let query = ViewQuery {
            group_by: Some("depot".to_string()),
            ..base_query()
        };
        let view = build_view(
            &drivers,
            &query,
            &Driver::view_profile(),
            &driver_summary_spec(),
        )
        .unwrap();

        let keys: Vec<&str> = view.groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["North", "South"]);
        let total: usize = view.groups.iter().map(|g| g.count).sum();
        assert_eq!(total, view.indices.len());
    }

    #[test]
    fn test_build_view_unknown_group_key() {
        let drivers = roster();
        let query = ViewQuery {
            group_by: Some("licence_number".to_string()),
            ..base_query()
        };
        let result = build_view(
            &drivers,
            &query,
            &Driver::view_profile(),
            &driver_summary_spec(),
        );
        assert!(matches!(result, Err(ViewError::UnknownGroupKey { .. })));
    }

    #[test]
    fn test_build_view_unknown_sum_field() {
        let drivers = roster();
        let query = ViewQuery {
            group_by: Some("depot".to_string()),
            sum_by: Some("mileage_km".to_string()), // a vehicle field, not a driver field
            ..base_query()
        };
        let result = build_view(
            &drivers,
            &query,
            &Driver::view_profile(),
            &driver_summary_spec(),
        );
        assert!(matches!(result, Err(ViewError::UnknownSumField { .. })));
    }

    /// Same snapshot, same query, same view model.
    #[test]
    fn test_build_view_idempotent() {
        let drivers = roster();
        let query = ViewQuery {
            group_by: Some("depot".to_string()),
            ..base_query()
        };
        let profile = Driver::view_profile();
        let spec = driver_summary_spec();
        let first = build_view(&drivers, &query, &profile, &spec).unwrap();
        let second = build_view(&drivers, &query, &profile, &spec).unwrap();
        assert_eq!(first.indices, second.indices);
        assert_eq!(first.groups, second.groups);
        assert_eq!(first.summary, second.summary);
    }
}

// FleetLens - tests/e2e_snapshot.rs
//
// End-to-end tests for the snapshot and view pipeline.
//
// These tests exercise the real filesystem, real walkdir traversal, real
// serde_json dataset parsing, and real chrono date arithmetic — no mocks,
// no stubs. This exercises the full path from raw JSON dataset files on
// disk to filtered, grouped, classified, and summarised view models.

use chrono::NaiveDate;
use fleetlens::core::classify::DeadlineStatus;
use fleetlens::core::export::export_csv;
use fleetlens::core::filter::{FilterState, StatusFilter};
use fleetlens::core::model::{Alert, Collection, Driver, Vehicle};
use fleetlens::core::view::{
    alert_summary_spec, build_view, driver_summary_spec, vehicle_summary_spec, ViewQuery,
};
use fleetlens::data::discovery::DiscoveryConfig;
use fleetlens::data::loader::load_snapshot;
use fleetlens::util::error::DataError;
use std::fs;
use tempfile::TempDir;

// =============================================================================
// Helpers
// =============================================================================

const VEHICLES_JSON: &str = r#"[
  {"id": "VH-1", "name": "TR-1001", "model": "Volvo FH16", "depot": "North",
   "status": "active", "mileage_km": 120000.0, "next_service_due": "2023-12-10",
   "assigned_driver": "A. Mercer"},
  {"id": "VH-2", "name": "TR-1002", "model": "Scania R450", "depot": "South",
   "status": "active", "mileage_km": 80000.0, "next_service_due": "2024-06-01"},
  {"id": "VH-3", "name": "TR-1003", "model": "Volvo FH16", "depot": "North",
   "status": "in-shop", "mileage_km": 210000.0, "next_service_due": "2023-11-20"},
  {"id": "VH-4", "name": "TR-1004", "model": "DAF XF", "depot": "East",
   "status": "retired"}
]"#;

const DRIVERS_JSON: &str = r#"[
  {"id": "DR-1", "name": "A. Mercer", "licence_number": "LN-4410",
   "licence_expiry": "2023-11-30", "status": "on-duty", "depot": "North",
   "safety_score": 92.0, "assigned_vehicle": "TR-1001"},
  {"id": "DR-2", "name": "B. Okafor", "licence_number": "LN-8123",
   "licence_expiry": "2023-12-31", "status": "on-duty", "depot": "South",
   "safety_score": 88.0},
  {"id": "DR-3", "name": "C. Lindqvist", "licence_number": "LN-2290",
   "licence_expiry": "2024-03-01", "status": "off-duty", "depot": "North"}
]"#;

const TRIPS_JSON: &str = r#"[
  {"id": "TP-1", "vehicle": "TR-1001", "driver": "A. Mercer", "origin": "North depot",
   "destination": "Leeds", "scheduled": "2023-12-04", "status": "in-transit",
   "distance_km": 120.0, "cargo_tons": 14.0},
  {"id": "TP-2", "vehicle": "TR-1002", "driver": "B. Okafor", "origin": "South depot",
   "destination": "York", "scheduled": "2023-12-05", "status": "scheduled",
   "distance_km": 80.0},
  {"id": "TP-3", "vehicle": "TR-1001", "driver": "A. Mercer", "origin": "Leeds",
   "destination": "North depot", "scheduled": "2023-12-01", "status": "completed",
   "distance_km": 120.0, "cargo_tons": 2.5}
]"#;

const MAINTENANCE_JSON: &str = r#"[
  {"id": "MT-1", "vehicle": "TR-1003", "task": "Gearbox overhaul", "workshop": "North yard",
   "due_date": "2023-11-25", "status": "in-progress", "cost": 4200.0},
  {"id": "MT-2", "vehicle": "TR-1001", "task": "Brake pad replacement", "workshop": "North yard",
   "due_date": "2023-12-15", "status": "pending", "cost": 380.0}
]"#;

const ALERTS_JSON: &str = r#"[
  {"id": "AL-1", "severity": "critical", "category": "engine", "vehicle": "TR-1001",
   "message": "Coolant temperature high", "raised": "2023-11-28", "status": "active"},
  {"id": "AL-2", "severity": "info", "category": "route", "vehicle": "TR-1002",
   "message": "Route deviation cleared", "raised": "2023-11-25", "status": "resolved"},
  {"id": "AL-3", "severity": "warning", "category": "licence", "vehicle": "TR-1003",
   "message": "Licence expiring within 30 days", "raised": "2023-11-30", "status": "active"}
]"#;

/// Write the full fixture dataset tree into a tempdir.
fn fixture_tree() -> TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    let root = dir.path();
    fs::write(root.join("vehicles.json"), VEHICLES_JSON).expect("write vehicles");
    fs::write(root.join("drivers.json"), DRIVERS_JSON).expect("write drivers");
    fs::write(root.join("trips.json"), TRIPS_JSON).expect("write trips");
    fs::write(root.join("maintenance.json"), MAINTENANCE_JSON).expect("write maintenance");
    fs::write(root.join("alerts.json"), ALERTS_JSON).expect("write alerts");
    dir
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// The reference date all classification tests pin against.
fn reference() -> NaiveDate {
    date(2023, 12, 1)
}

fn plain_query() -> ViewQuery {
    ViewQuery {
        filter: FilterState::default(),
        group_by: None,
        sum_by: None,
        reference: reference(),
        warning_window_days: 30,
    }
}

// =============================================================================
// Loading E2E
// =============================================================================

/// Loading the fixture tree yields a snapshot with every collection populated.
#[test]
fn e2e_loads_fixture_snapshot() {
    let dir = fixture_tree();
    let (snapshot, summary) = load_snapshot(dir.path(), &DiscoveryConfig::default()).unwrap();

    assert_eq!(snapshot.vehicles.len(), 4);
    assert_eq!(snapshot.drivers.len(), 3);
    assert_eq!(snapshot.trips.len(), 3);
    assert_eq!(snapshot.maintenance.len(), 2);
    assert_eq!(snapshot.alerts.len(), 3);
    assert_eq!(snapshot.total_records(), 15);

    assert_eq!(summary.files_discovered, 5);
    assert_eq!(summary.files_loaded, 5);
    assert!(summary.warnings.is_empty(), "unexpected warnings: {:?}", summary.warnings);
    assert_eq!(
        summary.records_by_collection.get(&Collection::Vehicles),
        Some(&4)
    );
}

/// A dataset with an invalid date is a typed parse error naming the file.
#[test]
fn e2e_invalid_date_in_dataset_is_typed_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("drivers.json"),
        r#"[{"id": "DR-1", "name": "X", "licence_number": "LN-1",
            "licence_expiry": "not-a-date", "status": "on-duty", "depot": "North"}]"#,
    )
    .unwrap();

    let result = load_snapshot(dir.path(), &DiscoveryConfig::default());
    match result {
        Err(DataError::DatasetParse { path, collection, .. }) => {
            assert_eq!(collection, Collection::Drivers);
            assert!(path.ends_with("drivers.json"));
        }
        other => panic!("expected DatasetParse, got {other:?}"),
    }
}

/// Files that identify no collection are warned about and skipped, and the
/// rest of the snapshot still loads.
#[test]
fn e2e_unknown_dataset_stem_warns_but_loads_rest() {
    let dir = fixture_tree();
    fs::write(dir.path().join("inventory.json"), "[]").unwrap();

    let (snapshot, summary) = load_snapshot(dir.path(), &DiscoveryConfig::default()).unwrap();
    assert_eq!(snapshot.total_records(), 15);
    assert!(
        summary.warnings.iter().any(|w| w.contains("inventory.json")),
        "expected a warning for inventory.json, got {:?}",
        summary.warnings
    );
}

// =============================================================================
// View pipeline E2E
// =============================================================================

/// Search + status filter + group-by over the loaded vehicles, end to end.
#[test]
fn e2e_vehicle_view_filters_and_groups() {
    let dir = fixture_tree();
    let (snapshot, _) = load_snapshot(dir.path(), &DiscoveryConfig::default()).unwrap();

    let query = ViewQuery {
        filter: FilterState {
            text_search: "volvo".to_string(),
            status: StatusFilter::All,
            regex_search: None,
        },
        group_by: Some("depot".to_string()),
        sum_by: Some("mileage_km".to_string()),
        ..plain_query()
    };
    let view = build_view(
        &snapshot.vehicles,
        &query,
        &Vehicle::view_profile(),
        &vehicle_summary_spec(),
    )
    .unwrap();

    // Both Volvos live in the North depot.
    assert_eq!(view.indices, vec![0, 2]);
    assert_eq!(view.groups.len(), 1);
    assert_eq!(view.groups[0].key, "North");
    assert_eq!(view.groups[0].count, 2);
    assert_eq!(view.groups[0].sum, Some(330000.0));
    assert_eq!(view.summary.total, 2);
}

/// Licence expiry classification against a pinned reference date, with the
/// window boundary exercised on real loaded data: DR-1 expired yesterday,
/// DR-2 expires in exactly 30 days, DR-3 is months out.
#[test]
fn e2e_driver_licence_classification_boundaries() {
    let dir = fixture_tree();
    let (snapshot, _) = load_snapshot(dir.path(), &DiscoveryConfig::default()).unwrap();

    let view = build_view(
        &snapshot.drivers,
        &plain_query(),
        &Driver::view_profile(),
        &driver_summary_spec(),
    )
    .unwrap();

    assert_eq!(
        view.badges,
        vec![
            Some(DeadlineStatus::Overdue),
            Some(DeadlineStatus::Warning),
            Some(DeadlineStatus::Ok),
        ]
    );
    assert_eq!(view.badge_counts.overdue, 1);
    assert_eq!(view.badge_counts.warning, 1);
    assert_eq!(view.badge_counts.ok, 1);
}

/// The alert summary scenario: three alerts, two active, one critical.
#[test]
fn e2e_alert_summary_counts() {
    let dir = fixture_tree();
    let (snapshot, _) = load_snapshot(dir.path(), &DiscoveryConfig::default()).unwrap();

    let view = build_view(
        &snapshot.alerts,
        &plain_query(),
        &Alert::view_profile(),
        &alert_summary_spec(),
    )
    .unwrap();

    assert_eq!(view.summary.total, 3);
    assert_eq!(view.summary.count("active"), Some(2));
    assert_eq!(view.summary.count("critical-active"), Some(1));
    assert_eq!(view.summary.count("resolved"), Some(1));
}

/// A status-filtered view feeds its subset (not the whole snapshot) into
/// grouping and summary.
#[test]
fn e2e_status_filter_narrows_groups_and_summary() {
    let dir = fixture_tree();
    let (snapshot, _) = load_snapshot(dir.path(), &DiscoveryConfig::default()).unwrap();

    let query = ViewQuery {
        filter: FilterState {
            status: StatusFilter::parse("active"),
            ..Default::default()
        },
        group_by: Some("depot".to_string()),
        ..plain_query()
    };
    let view = build_view(
        &snapshot.vehicles,
        &query,
        &Vehicle::view_profile(),
        &vehicle_summary_spec(),
    )
    .unwrap();

    assert_eq!(view.indices, vec![0, 1]);
    let total: usize = view.groups.iter().map(|g| g.count).sum();
    assert_eq!(total, 2, "groups must partition the filtered subset");
    assert_eq!(view.summary.total, 2);
    assert_eq!(view.summary.count("in-shop"), Some(0));
}

// =============================================================================
// Export E2E
// =============================================================================

/// Export a filtered vehicle view to CSV on disk and read it back.
#[test]
fn e2e_export_filtered_view_to_csv() {
    let dir = fixture_tree();
    let (snapshot, _) = load_snapshot(dir.path(), &DiscoveryConfig::default()).unwrap();

    let query = ViewQuery {
        filter: FilterState {
            status: StatusFilter::parse("active"),
            ..Default::default()
        },
        ..plain_query()
    };
    let view = build_view(
        &snapshot.vehicles,
        &query,
        &Vehicle::view_profile(),
        &vehicle_summary_spec(),
    )
    .unwrap();

    let export_path = dir.path().join("export.csv");
    let file = fs::File::create(&export_path).unwrap();
    let rows = export_csv(
        &snapshot.vehicles,
        &view.indices,
        &Vehicle::view_profile(),
        file,
        &export_path,
    )
    .unwrap();
    assert_eq!(rows, 2);

    let content = fs::read_to_string(&export_path).unwrap();
    let mut lines = content.lines();
    assert!(
        lines.next().unwrap().starts_with("id,name,model,depot,status"),
        "header row should lead with the profile columns"
    );
    assert!(content.contains("TR-1001"));
    assert!(content.contains("TR-1002"));
    assert!(!content.contains("TR-1003"), "in-shop vehicle was filtered out");
}

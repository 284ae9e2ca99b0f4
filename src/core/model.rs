// FleetLens - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no rendering,
// no platform dependencies.
//
// These types are the shared vocabulary across all layers: the five fleet
// record collections, the field-accessor vocabulary the generic pipeline is
// built on, and the snapshot/summary containers the data layer produces.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Field values and accessors
// =============================================================================

/// A single field value as seen by the generic pipeline.
///
/// Every record type exposes its fields to the pipeline through accessors
/// returning one of these variants, so filtering, grouping, and aggregation
/// are written once and reused across all five collections.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Free text (names, registrations, messages, status labels).
    Text(String),

    /// Numeric value (mileage, distance, cost, scores).
    Number(f64),

    /// Calendar date (expiry, due, scheduled dates). Date-only: day
    /// differences are exact with no time-of-day component.
    Date(NaiveDate),

    /// The field is absent on this record (unset `Option` fields).
    Missing,
}

impl FieldValue {
    /// Build a `Text` value from any string-ish source.
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Build a `Text` value from an optional field, `Missing` when unset.
    pub fn opt_text(s: Option<&str>) -> Self {
        match s {
            Some(s) => Self::Text(s.to_string()),
            None => Self::Missing,
        }
    }

    /// Build a `Number` value from an optional field, `Missing` when unset.
    pub fn opt_number(n: Option<f64>) -> Self {
        match n {
            Some(n) => Self::Number(n),
            None => Self::Missing,
        }
    }

    /// Build a `Date` value from an optional field, `Missing` when unset.
    pub fn opt_date(d: Option<NaiveDate>) -> Self {
        match d {
            Some(d) => Self::Date(d),
            None => Self::Missing,
        }
    }

    /// String form used for substring search, grouping keys, and CSV cells.
    ///
    /// Numbers and dates are stringified; `Missing` is the empty string, so
    /// an unset field never matches a non-empty search term and groups under
    /// the empty key.
    pub fn as_text(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) => format_number(*n),
            Self::Date(d) => d.format("%Y-%m-%d").to_string(),
            Self::Missing => String::new(),
        }
    }

    /// Numeric form used by sums and averages. `None` for non-numeric values.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Date form used by deadline classification. `None` for non-date values.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(d) => Some(*d),
            _ => None,
        }
    }
}

/// Trailing-zero-free rendering so `120000.0` groups and prints as `120000`.
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

/// Accessor extracting one field from a record.
///
/// Plain function pointers rather than boxed closures: profiles are static
/// tables of named accessors, and the per-record path stays free of
/// allocation and dynamic dispatch.
pub type FieldAccessor<R> = fn(&R) -> FieldValue;

/// A named field accessor. The key is what users type for `--group-by` and
/// `--sum`, and what the CSV exporter writes as the column header.
#[derive(Debug)]
pub struct FieldSpec<R> {
    /// Stable field name (e.g. "depot", "distance_km").
    pub key: &'static str,

    /// Accessor returning the field's value for a record.
    pub get: FieldAccessor<R>,
}

// Manual Clone/Copy: derived impls would wrongly require `R: Clone`.
impl<R> Clone for FieldSpec<R> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<R> Copy for FieldSpec<R> {}

/// Per-collection accessor bundle the generic pipeline runs against.
///
/// One profile per record type describes which fields are searched, which
/// field carries the status, which fields may be grouped or summed, and
/// which date field (if any) is a deadline to classify.
#[derive(Debug, Clone)]
pub struct ViewProfile<R> {
    /// Which collection this profile describes.
    pub collection: Collection,

    /// Display/export columns, in table order.
    pub columns: Vec<FieldSpec<R>>,

    /// Fields searched by the case-insensitive substring filter.
    pub text_fields: Vec<FieldSpec<R>>,

    /// The status/category field for exact-match filtering.
    pub status_field: FieldSpec<R>,

    /// Fields a view may be grouped by.
    pub group_keys: Vec<FieldSpec<R>>,

    /// Fields a view may sum or average.
    pub numeric_fields: Vec<FieldSpec<R>>,

    /// The deadline date field classified against the reference date.
    /// `None` for collections with no forward-looking date.
    pub deadline_field: Option<FieldSpec<R>>,
}

impl<R> ViewProfile<R> {
    /// Look up a permitted group key by name.
    pub fn group_key(&self, name: &str) -> Option<FieldSpec<R>> {
        self.group_keys.iter().find(|f| f.key == name).copied()
    }

    /// Look up a permitted numeric field by name.
    pub fn numeric_field(&self, name: &str) -> Option<FieldSpec<R>> {
        self.numeric_fields.iter().find(|f| f.key == name).copied()
    }

    /// Names of the permitted group keys (for error messages and help text).
    pub fn group_key_names(&self) -> Vec<&'static str> {
        self.group_keys.iter().map(|f| f.key).collect()
    }

    /// Names of the permitted numeric fields.
    pub fn numeric_field_names(&self) -> Vec<&'static str> {
        self.numeric_fields.iter().map(|f| f.key).collect()
    }
}

/// Select a subset of columns by key, preserving the requested order.
/// Used by the per-collection profile constructors below.
fn pick<R>(columns: &[FieldSpec<R>], keys: &[&str]) -> Vec<FieldSpec<R>> {
    keys.iter()
        .filter_map(|k| columns.iter().find(|c| c.key == *k).copied())
        .collect()
}

// =============================================================================
// Collections
// =============================================================================

/// The five fleet record collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Vehicles,
    Drivers,
    Trips,
    Maintenance,
    Alerts,
}

impl Collection {
    /// All collections in display order.
    pub fn all() -> &'static [Collection] {
        &[
            Collection::Vehicles,
            Collection::Drivers,
            Collection::Trips,
            Collection::Maintenance,
            Collection::Alerts,
        ]
    }

    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            Collection::Vehicles => "Vehicles",
            Collection::Drivers => "Drivers",
            Collection::Trips => "Trips",
            Collection::Maintenance => "Maintenance",
            Collection::Alerts => "Alerts",
        }
    }

    /// Canonical dataset filename stem (e.g. `vehicles` -> vehicles.json).
    pub fn dataset_stem(&self) -> &'static str {
        match self {
            Collection::Vehicles => "vehicles",
            Collection::Drivers => "drivers",
            Collection::Trips => "trips",
            Collection::Maintenance => "maintenance",
            Collection::Alerts => "alerts",
        }
    }

    /// Detect the collection a dataset file holds from its filename stem.
    ///
    /// Matches on prefix so dated exports like `vehicles_2024-06.json` are
    /// recognised. Returns `None` for unrecognised stems; discovery warns
    /// and skips those rather than failing the load.
    pub fn from_stem(stem: &str) -> Option<Self> {
        let stem = stem.to_lowercase();
        Self::all()
            .iter()
            .find(|c| stem.starts_with(c.dataset_stem()))
            .copied()
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Status enums
// =============================================================================

/// Operational state of a vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VehicleStatus {
    Active,
    InShop,
    Retired,
}

impl VehicleStatus {
    pub fn label(&self) -> &'static str {
        match self {
            VehicleStatus::Active => "active",
            VehicleStatus::InShop => "in-shop",
            VehicleStatus::Retired => "retired",
        }
    }
}

impl std::fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Duty state of a driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DriverStatus {
    OnDuty,
    OffDuty,
    Suspended,
}

impl DriverStatus {
    pub fn label(&self) -> &'static str {
        match self {
            DriverStatus::OnDuty => "on-duty",
            DriverStatus::OffDuty => "off-duty",
            DriverStatus::Suspended => "suspended",
        }
    }
}

impl std::fmt::Display for DriverStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Lifecycle state of a trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TripStatus {
    Scheduled,
    InTransit,
    Completed,
    Cancelled,
}

impl TripStatus {
    pub fn label(&self) -> &'static str {
        match self {
            TripStatus::Scheduled => "scheduled",
            TripStatus::InTransit => "in-transit",
            TripStatus::Completed => "completed",
            TripStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for TripStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Progress state of a maintenance item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MaintenanceStatus {
    Pending,
    InProgress,
    Completed,
}

impl MaintenanceStatus {
    pub fn label(&self) -> &'static str {
        match self {
            MaintenanceStatus::Pending => "pending",
            MaintenanceStatus::InProgress => "in-progress",
            MaintenanceStatus::Completed => "completed",
        }
    }
}

impl std::fmt::Display for MaintenanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Severity of an alert, ordered from most to least severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlertSeverity {
    Critical,
    Warning,
    Info,
}

impl AlertSeverity {
    /// All severities in display order (most severe first).
    pub fn all() -> &'static [AlertSeverity] {
        &[
            AlertSeverity::Critical,
            AlertSeverity::Warning,
            AlertSeverity::Info,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            AlertSeverity::Critical => "critical",
            AlertSeverity::Warning => "warning",
            AlertSeverity::Info => "info",
        }
    }
}

impl std::fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Handling state of an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlertStatus {
    Active,
    Acknowledged,
    Resolved,
}

impl AlertStatus {
    pub fn label(&self) -> &'static str {
        match self {
            AlertStatus::Active => "active",
            AlertStatus::Acknowledged => "acknowledged",
            AlertStatus::Resolved => "resolved",
        }
    }
}

impl std::fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Domain records
// =============================================================================

/// A vehicle in the fleet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    /// Stable identifier (e.g. "VH-0042").
    pub id: String,

    /// Registration / fleet name shown on dashboards (e.g. "TR-1001").
    pub name: String,

    /// Manufacturer model designation.
    pub model: String,

    /// Home depot.
    pub depot: String,

    /// Operational state.
    pub status: VehicleStatus,

    /// Odometer reading in kilometres.
    #[serde(default)]
    pub mileage_km: Option<f64>,

    /// Date the next scheduled service is due.
    #[serde(default)]
    pub next_service_due: Option<NaiveDate>,

    /// Name of the currently assigned driver, if any.
    #[serde(default)]
    pub assigned_driver: Option<String>,
}

impl Vehicle {
    /// Accessor profile for the generic view pipeline.
    pub fn view_profile() -> ViewProfile<Vehicle> {
        let columns: Vec<FieldSpec<Vehicle>> = vec![
            FieldSpec { key: "id", get: |v: &Vehicle| FieldValue::text(&v.id) },
            FieldSpec { key: "name", get: |v: &Vehicle| FieldValue::text(&v.name) },
            FieldSpec { key: "model", get: |v: &Vehicle| FieldValue::text(&v.model) },
            FieldSpec { key: "depot", get: |v: &Vehicle| FieldValue::text(&v.depot) },
            FieldSpec { key: "status", get: |v: &Vehicle| FieldValue::text(v.status.label()) },
            FieldSpec {
                key: "mileage_km",
                get: |v: &Vehicle| FieldValue::opt_number(v.mileage_km),
            },
            FieldSpec {
                key: "next_service_due",
                get: |v: &Vehicle| FieldValue::opt_date(v.next_service_due),
            },
            FieldSpec {
                key: "assigned_driver",
                get: |v: &Vehicle| FieldValue::opt_text(v.assigned_driver.as_deref()),
            },
        ];
        ViewProfile {
            collection: Collection::Vehicles,
            text_fields: pick(&columns, &["id", "name", "model", "depot", "assigned_driver"]),
            status_field: columns[4],
            group_keys: pick(&columns, &["status", "depot", "model"]),
            numeric_fields: pick(&columns, &["mileage_km"]),
            deadline_field: pick(&columns, &["next_service_due"]).first().copied(),
            columns,
        }
    }
}

/// A driver on the roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Driver {
    /// Stable identifier (e.g. "DR-0017").
    pub id: String,

    /// Full name.
    pub name: String,

    /// Licence number as issued.
    pub licence_number: String,

    /// Date the licence expires.
    pub licence_expiry: NaiveDate,

    /// Duty state.
    pub status: DriverStatus,

    /// Home depot.
    pub depot: String,

    /// Rolling safety score (0-100).
    #[serde(default)]
    pub safety_score: Option<f64>,

    /// Name of the currently assigned vehicle, if any.
    #[serde(default)]
    pub assigned_vehicle: Option<String>,
}

impl Driver {
    /// Accessor profile for the generic view pipeline.
    pub fn view_profile() -> ViewProfile<Driver> {
        let columns: Vec<FieldSpec<Driver>> = vec![
            FieldSpec { key: "id", get: |d: &Driver| FieldValue::text(&d.id) },
            FieldSpec { key: "name", get: |d: &Driver| FieldValue::text(&d.name) },
            FieldSpec {
                key: "licence_number",
                get: |d: &Driver| FieldValue::text(&d.licence_number),
            },
            FieldSpec {
                key: "licence_expiry",
                get: |d: &Driver| FieldValue::Date(d.licence_expiry),
            },
            FieldSpec { key: "status", get: |d: &Driver| FieldValue::text(d.status.label()) },
            FieldSpec { key: "depot", get: |d: &Driver| FieldValue::text(&d.depot) },
            FieldSpec {
                key: "safety_score",
                get: |d: &Driver| FieldValue::opt_number(d.safety_score),
            },
            FieldSpec {
                key: "assigned_vehicle",
                get: |d: &Driver| FieldValue::opt_text(d.assigned_vehicle.as_deref()),
            },
        ];
        ViewProfile {
            collection: Collection::Drivers,
            text_fields: pick(
                &columns,
                &["id", "name", "licence_number", "depot", "assigned_vehicle"],
            ),
            status_field: columns[4],
            group_keys: pick(&columns, &["status", "depot"]),
            numeric_fields: pick(&columns, &["safety_score"]),
            deadline_field: pick(&columns, &["licence_expiry"]).first().copied(),
            columns,
        }
    }
}

/// A trip between two locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trip {
    /// Stable identifier (e.g. "TP-1203").
    pub id: String,

    /// Vehicle name making the trip.
    pub vehicle: String,

    /// Driver name on the trip.
    pub driver: String,

    /// Departure location.
    pub origin: String,

    /// Arrival location.
    pub destination: String,

    /// Scheduled departure date.
    pub scheduled: NaiveDate,

    /// Lifecycle state.
    pub status: TripStatus,

    /// Planned route distance in kilometres.
    #[serde(default)]
    pub distance_km: Option<f64>,

    /// Cargo weight in tonnes.
    #[serde(default)]
    pub cargo_tons: Option<f64>,
}

impl Trip {
    /// Accessor profile for the generic view pipeline.
    pub fn view_profile() -> ViewProfile<Trip> {
        let columns: Vec<FieldSpec<Trip>> = vec![
            FieldSpec { key: "id", get: |t: &Trip| FieldValue::text(&t.id) },
            FieldSpec { key: "vehicle", get: |t: &Trip| FieldValue::text(&t.vehicle) },
            FieldSpec { key: "driver", get: |t: &Trip| FieldValue::text(&t.driver) },
            FieldSpec { key: "origin", get: |t: &Trip| FieldValue::text(&t.origin) },
            FieldSpec { key: "destination", get: |t: &Trip| FieldValue::text(&t.destination) },
            FieldSpec { key: "scheduled", get: |t: &Trip| FieldValue::Date(t.scheduled) },
            FieldSpec { key: "status", get: |t: &Trip| FieldValue::text(t.status.label()) },
            FieldSpec {
                key: "distance_km",
                get: |t: &Trip| FieldValue::opt_number(t.distance_km),
            },
            FieldSpec {
                key: "cargo_tons",
                get: |t: &Trip| FieldValue::opt_number(t.cargo_tons),
            },
        ];
        ViewProfile {
            collection: Collection::Trips,
            text_fields: pick(&columns, &["id", "vehicle", "driver", "origin", "destination"]),
            status_field: columns[6],
            group_keys: pick(&columns, &["status", "vehicle", "driver", "destination"]),
            numeric_fields: pick(&columns, &["distance_km", "cargo_tons"]),
            deadline_field: None,
            columns,
        }
    }
}

/// A maintenance work item against a vehicle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceItem {
    /// Stable identifier (e.g. "MT-0310").
    pub id: String,

    /// Vehicle name the work is for.
    pub vehicle: String,

    /// Short description of the work (e.g. "Brake pad replacement").
    pub task: String,

    /// Workshop carrying out the work.
    pub workshop: String,

    /// Date the work is due.
    pub due_date: NaiveDate,

    /// Progress state.
    pub status: MaintenanceStatus,

    /// Estimated or invoiced cost.
    #[serde(default)]
    pub cost: Option<f64>,
}

impl MaintenanceItem {
    /// Accessor profile for the generic view pipeline.
    pub fn view_profile() -> ViewProfile<MaintenanceItem> {
        let columns: Vec<FieldSpec<MaintenanceItem>> = vec![
            FieldSpec { key: "id", get: |m: &MaintenanceItem| FieldValue::text(&m.id) },
            FieldSpec {
                key: "vehicle",
                get: |m: &MaintenanceItem| FieldValue::text(&m.vehicle),
            },
            FieldSpec { key: "task", get: |m: &MaintenanceItem| FieldValue::text(&m.task) },
            FieldSpec {
                key: "workshop",
                get: |m: &MaintenanceItem| FieldValue::text(&m.workshop),
            },
            FieldSpec {
                key: "due_date",
                get: |m: &MaintenanceItem| FieldValue::Date(m.due_date),
            },
            FieldSpec {
                key: "status",
                get: |m: &MaintenanceItem| FieldValue::text(m.status.label()),
            },
            FieldSpec { key: "cost", get: |m: &MaintenanceItem| FieldValue::opt_number(m.cost) },
        ];
        ViewProfile {
            collection: Collection::Maintenance,
            text_fields: pick(&columns, &["id", "vehicle", "task", "workshop"]),
            status_field: columns[5],
            group_keys: pick(&columns, &["status", "workshop", "vehicle"]),
            numeric_fields: pick(&columns, &["cost"]),
            deadline_field: pick(&columns, &["due_date"]).first().copied(),
            columns,
        }
    }
}

/// An operational alert raised against a vehicle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    /// Stable identifier (e.g. "AL-0088").
    pub id: String,

    /// Severity of the condition.
    pub severity: AlertSeverity,

    /// Alert category (e.g. "engine", "licence", "route").
    pub category: String,

    /// Vehicle name the alert concerns.
    pub vehicle: String,

    /// Human-readable description.
    pub message: String,

    /// Date the alert was raised.
    pub raised: NaiveDate,

    /// Handling state.
    pub status: AlertStatus,
}

impl Alert {
    /// Accessor profile for the generic view pipeline.
    pub fn view_profile() -> ViewProfile<Alert> {
        let columns: Vec<FieldSpec<Alert>> = vec![
            FieldSpec { key: "id", get: |a: &Alert| FieldValue::text(&a.id) },
            FieldSpec {
                key: "severity",
                get: |a: &Alert| FieldValue::text(a.severity.label()),
            },
            FieldSpec { key: "category", get: |a: &Alert| FieldValue::text(&a.category) },
            FieldSpec { key: "vehicle", get: |a: &Alert| FieldValue::text(&a.vehicle) },
            FieldSpec { key: "message", get: |a: &Alert| FieldValue::text(&a.message) },
            FieldSpec { key: "raised", get: |a: &Alert| FieldValue::Date(a.raised) },
            FieldSpec { key: "status", get: |a: &Alert| FieldValue::text(a.status.label()) },
        ];
        ViewProfile {
            collection: Collection::Alerts,
            text_fields: pick(&columns, &["id", "category", "vehicle", "message"]),
            status_field: columns[6],
            group_keys: pick(&columns, &["severity", "category", "status", "vehicle"]),
            numeric_fields: Vec::new(),
            deadline_field: None,
            columns,
        }
    }
}

// =============================================================================
// Snapshot (output of the data layer)
// =============================================================================

/// An in-memory snapshot of all loaded fleet records.
///
/// This is the unit the view pipeline operates on. The pipeline never
/// mutates it; re-deriving a view after an external change means loading a
/// fresh snapshot and querying again.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FleetSnapshot {
    pub vehicles: Vec<Vehicle>,
    pub drivers: Vec<Driver>,
    pub trips: Vec<Trip>,
    pub maintenance: Vec<MaintenanceItem>,
    pub alerts: Vec<Alert>,
}

impl FleetSnapshot {
    /// Record count for one collection.
    pub fn count(&self, collection: Collection) -> usize {
        match collection {
            Collection::Vehicles => self.vehicles.len(),
            Collection::Drivers => self.drivers.len(),
            Collection::Trips => self.trips.len(),
            Collection::Maintenance => self.maintenance.len(),
            Collection::Alerts => self.alerts.len(),
        }
    }

    /// Total records across all collections.
    pub fn total_records(&self) -> usize {
        Collection::all().iter().map(|c| self.count(*c)).sum()
    }
}

// =============================================================================
// Load summary
// =============================================================================

/// Summary statistics for a completed snapshot load.
#[derive(Debug, Clone, Default)]
pub struct LoadSummary {
    /// Dataset files discovered (before collection detection).
    pub files_discovered: usize,

    /// Dataset files successfully parsed into a collection.
    pub files_loaded: usize,

    /// Records loaded per collection.
    pub records_by_collection: HashMap<Collection, usize>,

    /// Non-fatal warnings accumulated during discovery and parsing.
    pub warnings: Vec<String>,

    /// Wall-clock load duration.
    pub duration: std::time::Duration,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_value_as_text() {
        assert_eq!(FieldValue::text("TR-1001").as_text(), "TR-1001");
        assert_eq!(FieldValue::Number(120000.0).as_text(), "120000");
        assert_eq!(FieldValue::Number(3.5).as_text(), "3.5");
        let d = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(FieldValue::Date(d).as_text(), "2024-01-15");
        assert_eq!(FieldValue::Missing.as_text(), "");
    }

    #[test]
    fn test_collection_from_stem() {
        assert_eq!(Collection::from_stem("vehicles"), Some(Collection::Vehicles));
        assert_eq!(
            Collection::from_stem("vehicles_2024-06"),
            Some(Collection::Vehicles)
        );
        assert_eq!(Collection::from_stem("Drivers"), Some(Collection::Drivers));
        assert_eq!(Collection::from_stem("inventory"), None);
    }

    #[test]
    fn test_profile_group_key_lookup() {
        let profile = Vehicle::view_profile();
        assert!(profile.group_key("depot").is_some());
        assert!(profile.group_key("mileage_km").is_none());
        assert_eq!(profile.group_key_names(), vec!["status", "depot", "model"]);
    }

    #[test]
    fn test_vehicle_dataset_round_trip() {
        let json = r#"{
            "id": "VH-0001",
            "name": "TR-1001",
            "model": "Volvo FH16",
            "depot": "North",
            "status": "in-shop",
            "mileage_km": 182450.0,
            "next_service_due": "2024-02-01"
        }"#;
        let v: Vehicle = serde_json::from_str(json).unwrap();
        assert_eq!(v.status, VehicleStatus::InShop);
        assert_eq!(
            v.next_service_due,
            Some(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap())
        );
        assert!(v.assigned_driver.is_none(), "omitted optional defaults to None");
    }
}

// FleetLens - data/loader.rs
//
// Snapshot loading: parse discovered dataset files into typed collections
// and merge them into one FleetSnapshot.
//
// Files are independent of each other, so they are parsed in parallel with
// rayon and merged afterwards in discovery order -- repeated loads of the
// same tree produce identical snapshots.

use crate::core::model::{
    Alert, Collection, Driver, FleetSnapshot, LoadSummary, MaintenanceItem, Trip, Vehicle,
};
use crate::data::discovery::{discover_datasets, DiscoveredDataset, DiscoveryConfig};
use crate::util::error::DataError;
use rayon::prelude::*;
use std::path::Path;
use std::time::Instant;

/// Records parsed from one dataset file.
#[derive(Debug)]
enum ParsedDataset {
    Vehicles(Vec<Vehicle>),
    Drivers(Vec<Driver>),
    Trips(Vec<Trip>),
    Maintenance(Vec<MaintenanceItem>),
    Alerts(Vec<Alert>),
}

impl ParsedDataset {
    fn len(&self) -> usize {
        match self {
            Self::Vehicles(v) => v.len(),
            Self::Drivers(v) => v.len(),
            Self::Trips(v) => v.len(),
            Self::Maintenance(v) => v.len(),
            Self::Alerts(v) => v.len(),
        }
    }
}

/// Discover and load all datasets under `root` into a snapshot.
///
/// A malformed dataset fails the whole load with `DatasetParse` -- there is
/// no partial snapshot. Discovery warnings (skipped files) are non-fatal
/// and surface in the returned `LoadSummary`.
pub fn load_snapshot(
    root: &Path,
    config: &DiscoveryConfig,
) -> Result<(FleetSnapshot, LoadSummary), DataError> {
    let start = Instant::now();

    let (datasets, warnings) = discover_datasets(root, config)?;
    let files_discovered = datasets.len();

    // Parse in parallel; each file is self-contained.
    let parsed: Vec<Result<(Collection, ParsedDataset), DataError>> =
        datasets.par_iter().map(parse_dataset).collect();

    // Merge in discovery order. Multiple files of one collection (e.g.
    // monthly trip exports) concatenate in that order.
    let mut snapshot = FleetSnapshot::default();
    let mut summary = LoadSummary {
        files_discovered,
        warnings,
        ..Default::default()
    };

    for result in parsed {
        let (collection, records) = result?;
        *summary.records_by_collection.entry(collection).or_insert(0) += records.len();
        summary.files_loaded += 1;
        match records {
            ParsedDataset::Vehicles(mut v) => snapshot.vehicles.append(&mut v),
            ParsedDataset::Drivers(mut v) => snapshot.drivers.append(&mut v),
            ParsedDataset::Trips(mut v) => snapshot.trips.append(&mut v),
            ParsedDataset::Maintenance(mut v) => snapshot.maintenance.append(&mut v),
            ParsedDataset::Alerts(mut v) => snapshot.alerts.append(&mut v),
        }
    }

    summary.duration = start.elapsed();

    tracing::info!(
        files = summary.files_loaded,
        records = snapshot.total_records(),
        warnings = summary.warnings.len(),
        duration_ms = summary.duration.as_millis() as u64,
        "Snapshot loaded"
    );

    Ok((snapshot, summary))
}

/// Read and parse one dataset file into its typed collection.
fn parse_dataset(dataset: &DiscoveredDataset) -> Result<(Collection, ParsedDataset), DataError> {
    let content = std::fs::read_to_string(&dataset.path).map_err(|e| DataError::Io {
        path: dataset.path.clone(),
        source: e,
    })?;

    let parse_err = |e: serde_json::Error| DataError::DatasetParse {
        path: dataset.path.clone(),
        collection: dataset.collection,
        source: e,
    };

    let records = match dataset.collection {
        Collection::Vehicles => {
            ParsedDataset::Vehicles(serde_json::from_str(&content).map_err(parse_err)?)
        }
        Collection::Drivers => {
            ParsedDataset::Drivers(serde_json::from_str(&content).map_err(parse_err)?)
        }
        Collection::Trips => {
            ParsedDataset::Trips(serde_json::from_str(&content).map_err(parse_err)?)
        }
        Collection::Maintenance => {
            ParsedDataset::Maintenance(serde_json::from_str(&content).map_err(parse_err)?)
        }
        Collection::Alerts => {
            ParsedDataset::Alerts(serde_json::from_str(&content).map_err(parse_err)?)
        }
    };

    tracing::debug!(
        file = %dataset.path.display(),
        collection = %dataset.collection,
        records = records.len(),
        "Dataset parsed"
    );

    Ok((dataset.collection, records))
}

// FleetLens - core/export.rs
//
// CSV and JSON export of a filtered view.
// Core layer: writes to any Write trait object.

use crate::core::model::ViewProfile;
use crate::util::constants;
use crate::util::error::ExportError;
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

/// Export the filtered records to CSV format.
///
/// The header row is the profile's column names; each record row is built
/// through the profile's accessors, so the CSV matches the on-screen table.
/// Returns the number of rows written.
pub fn export_csv<R, W: Write>(
    records: &[R],
    indices: &[usize],
    profile: &ViewProfile<R>,
    writer: W,
    export_path: &PathBuf,
) -> Result<usize, ExportError> {
    if indices.len() > constants::MAX_EXPORT_ROWS {
        return Err(ExportError::TooManyRows {
            count: indices.len(),
            max: constants::MAX_EXPORT_ROWS,
        });
    }

    let mut csv_writer = csv::Writer::from_writer(writer);

    // Header
    let header: Vec<&str> = profile.columns.iter().map(|c| c.key).collect();
    csv_writer.write_record(&header).map_err(|e| ExportError::Csv {
        path: export_path.clone(),
        source: e,
    })?;

    let mut count = 0;
    for &idx in indices {
        let record = &records[idx];
        let row: Vec<String> = profile
            .columns
            .iter()
            .map(|c| (c.get)(record).as_text())
            .collect();

        csv_writer.write_record(&row).map_err(|e| ExportError::Csv {
            path: export_path.clone(),
            source: e,
        })?;
        count += 1;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.clone(),
        source: e,
    })?;

    Ok(count)
}

/// Export the filtered records to JSON format (array of objects).
pub fn export_json<R: Serialize, W: Write>(
    records: &[R],
    indices: &[usize],
    writer: W,
    export_path: &PathBuf,
) -> Result<usize, ExportError> {
    if indices.len() > constants::MAX_EXPORT_ROWS {
        return Err(ExportError::TooManyRows {
            count: indices.len(),
            max: constants::MAX_EXPORT_ROWS,
        });
    }

    let selected: Vec<&R> = indices.iter().map(|&i| &records[i]).collect();
    serde_json::to_writer_pretty(writer, &selected).map_err(|e| ExportError::Json {
        path: export_path.clone(),
        source: e,
    })?;
    Ok(selected.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{Vehicle, VehicleStatus};

    fn make_vehicle(id: &str, name: &str) -> Vehicle {
        Vehicle {
            id: id.to_string(),
            name: name.to_string(),
            model: "Volvo FH16".to_string(),
            depot: "North".to_string(),
            status: VehicleStatus::Active,
            mileage_km: Some(120000.0),
            next_service_due: None,
            assigned_driver: None,
        }
    }

    #[test]
    fn test_csv_export() {
        let vehicles = vec![make_vehicle("VH-1", "TR-1001"), make_vehicle("VH-2", "TR-1002")];
        let mut buf = Vec::new();
        let count = export_csv(
            &vehicles,
            &[0, 1],
            &Vehicle::view_profile(),
            &mut buf,
            &PathBuf::from("out.csv"),
        )
        .unwrap();
        assert_eq!(count, 2);

        let output = String::from_utf8(buf).unwrap();
        assert!(output.starts_with("id,name,model,depot,status"));
        assert!(output.contains("TR-1001"));
        assert!(output.contains("TR-1002"));
        assert!(output.contains("120000"));
    }

    #[test]
    fn test_csv_export_respects_filter_subset() {
        let vehicles = vec![make_vehicle("VH-1", "TR-1001"), make_vehicle("VH-2", "TR-1002")];
        let mut buf = Vec::new();
        let count = export_csv(
            &vehicles,
            &[1],
            &Vehicle::view_profile(),
            &mut buf,
            &PathBuf::from("out.csv"),
        )
        .unwrap();
        assert_eq!(count, 1);

        let output = String::from_utf8(buf).unwrap();
        assert!(!output.contains("TR-1001"));
        assert!(output.contains("TR-1002"));
    }

    #[test]
    fn test_json_export() {
        let vehicles = vec![make_vehicle("VH-1", "TR-1001")];
        let mut buf = Vec::new();
        let count = export_json(&vehicles, &[0], &mut buf, &PathBuf::from("out.json")).unwrap();
        assert_eq!(count, 1);

        let output = String::from_utf8(buf).unwrap();
        assert!(output.contains("TR-1001"));
        assert!(output.contains("\"status\": \"active\""));
    }

    #[test]
    fn test_export_row_limit() {
        let vehicles = vec![make_vehicle("VH-1", "TR-1001")];
        let indices: Vec<usize> = vec![0; constants::MAX_EXPORT_ROWS + 1];
        let mut buf = Vec::new();
        let result = export_csv(
            &vehicles,
            &indices,
            &Vehicle::view_profile(),
            &mut buf,
            &PathBuf::from("out.csv"),
        );
        assert!(matches!(result, Err(ExportError::TooManyRows { .. })));
    }
}

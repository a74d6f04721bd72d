//! Telemetry Table Storage and Loading
//!
//! The table is the external collaborator the sequence builder reads from:
//! a row-indexed, column-named collection of fixed-width `f32` vectors,
//! immutable for the lifetime of sequence extraction. A JSON loader covers
//! the on-disk telemetry capture format, and a seeded synthetic generator
//! provides plausible data for demos and tests.

use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use tracing::info;

use crate::error::SequenceError;

/// Column name for actuator position profiles
pub const ACTUATOR_POSITIONS: &str = "ActuatorPositions";
/// Column name for actuator deviation profiles
pub const ACTUATOR_DEVIATIONS: &str = "ActuatorDeviations";
/// Column name for discrete actuator actions
pub const ACTUATOR_ACTIONS: &str = "ActuatorActions";
/// Column name for thickness scan profiles
pub const THICKNESS_PROFILES: &str = "ThicknessProfiles";
/// Column name for per-row aggregate values
pub const AVERAGES: &str = "Averages";

#[derive(Debug, Clone)]
struct Column {
    name: String,
    width: usize,
    /// Row-major flat storage, `rows * width` values
    data: Vec<f32>,
}

/// Row-indexed, column-named telemetry storage
///
/// Every column holds one fixed-width vector per row; all columns share the
/// same row count. Width is part of column metadata, so it is known even for
/// a table with zero rows.
#[derive(Debug, Clone, Default)]
pub struct FeatureTable {
    columns: Vec<Column>,
}

impl FeatureTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows shared by all columns
    pub fn rows(&self) -> usize {
        self.columns
            .first()
            .map(|c| c.data.len() / c.width)
            .unwrap_or(0)
    }

    /// Insert a column from flat row-major data
    pub fn insert_column(
        &mut self,
        name: &str,
        width: usize,
        data: Vec<f32>,
    ) -> Result<(), SequenceError> {
        if width == 0 {
            return Err(SequenceError::Config(format!(
                "column '{name}' must have positive width"
            )));
        }
        if data.len() % width != 0 {
            return Err(SequenceError::Config(format!(
                "column '{name}' has {} values, not divisible by width {width}",
                data.len()
            )));
        }
        if self.columns.iter().any(|c| c.name == name) {
            return Err(SequenceError::Config(format!(
                "column '{name}' already exists"
            )));
        }

        let rows = data.len() / width;
        if !self.columns.is_empty() && rows != self.rows() {
            return Err(SequenceError::Config(format!(
                "column '{name}' has {rows} rows, table has {}",
                self.rows()
            )));
        }

        self.columns.push(Column {
            name: name.to_string(),
            width,
            data,
        });
        Ok(())
    }

    fn column(&self, name: &str) -> Result<&Column, SequenceError> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| SequenceError::ColumnNotFound(name.to_string()))
    }

    /// Fixed per-row vector length of a column
    pub fn column_width(&self, name: &str) -> Result<usize, SequenceError> {
        Ok(self.column(name)?.width)
    }

    /// One row of one column
    ///
    /// The index must be below [`rows`](Self::rows); the builder's loop
    /// bounds guarantee that.
    pub fn row(&self, name: &str, index: usize) -> Result<&[f32], SequenceError> {
        let column = self.column(name)?;
        let start = index * column.width;
        Ok(&column.data[start..start + column.width])
    }

    /// Declared column names, in insertion order
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }
}

/// On-disk telemetry capture: one JSON array of per-row vectors per column
///
/// The legacy capture tool misspelled the thickness key; the alias keeps old
/// files loadable.
#[derive(Debug, Deserialize)]
struct TelemetryRecords {
    #[serde(rename = "ActuatorPositions")]
    actuator_positions: Vec<Vec<f32>>,
    #[serde(rename = "ActuatorDeviations")]
    actuator_deviations: Vec<Vec<f32>>,
    #[serde(rename = "ActuatorActions")]
    actuator_actions: Vec<Vec<f32>>,
    #[serde(rename = "ThicknessProfiles", alias = "ThiknessProfiles")]
    thickness_profiles: Vec<Vec<f32>>,
    #[serde(rename = "Averages")]
    averages: Vec<Vec<f32>>,
}

/// Load a telemetry capture file into a [`FeatureTable`]
pub fn load_telemetry(path: &Path) -> Result<FeatureTable, SequenceError> {
    let text = std::fs::read_to_string(path)?;
    let records: TelemetryRecords = serde_json::from_str(&text)?;

    let mut table = FeatureTable::new();
    insert_rows(&mut table, ACTUATOR_POSITIONS, &records.actuator_positions)?;
    insert_rows(&mut table, ACTUATOR_DEVIATIONS, &records.actuator_deviations)?;
    insert_rows(&mut table, ACTUATOR_ACTIONS, &records.actuator_actions)?;
    insert_rows(&mut table, THICKNESS_PROFILES, &records.thickness_profiles)?;
    insert_rows(&mut table, AVERAGES, &records.averages)?;

    info!("loaded telemetry table with {} rows", table.rows());
    Ok(table)
}

fn insert_rows(
    table: &mut FeatureTable,
    name: &str,
    rows: &[Vec<f32>],
) -> Result<(), SequenceError> {
    let width = match rows.first() {
        Some(first) => first.len(),
        None => {
            return Err(SequenceError::Config(format!(
                "telemetry column '{name}' is empty"
            )))
        }
    };

    let mut data = Vec::with_capacity(rows.len() * width);
    for (index, row) in rows.iter().enumerate() {
        if row.len() != width {
            return Err(SequenceError::Config(format!(
                "telemetry column '{name}' row {index} has width {}, expected {width}",
                row.len()
            )));
        }
        data.extend_from_slice(row);
    }

    table.insert_column(name, width, data)
}

/// Generate a synthetic telemetry table for demos and tests
///
/// Deterministic per seed: the same `(rows, seed)` always produces the same
/// table. Widths follow a real rig: 48 actuators, a 360-point thickness
/// scan, and two per-row aggregates.
pub fn generate_synthetic_telemetry(rows: usize, seed: u64) -> FeatureTable {
    const ACTUATORS: usize = 48;
    const SCAN_POINTS: usize = 360;
    const AGGREGATES: usize = 2;

    let mut rng = StdRng::seed_from_u64(seed);

    let mut positions = Vec::with_capacity(rows * ACTUATORS);
    let mut deviations = Vec::with_capacity(rows * ACTUATORS);
    let mut actions = Vec::with_capacity(rows * ACTUATORS);
    let mut thickness = Vec::with_capacity(rows * SCAN_POINTS);
    let mut averages = Vec::with_capacity(rows * AGGREGATES);

    for _ in 0..rows {
        let mut deviation_sum = 0.0f32;
        for a in 0..ACTUATORS {
            // Position setpoints drift around a bowed baseline profile.
            let baseline = 50.0 + 10.0 * (a as f32 / ACTUATORS as f32 * std::f32::consts::PI).sin();
            let position = baseline + rng.gen::<f32>() * 2.0 - 1.0;
            let deviation = rng.gen::<f32>() * 0.6 - 0.3;
            positions.push(position);
            deviations.push(deviation);
            actions.push(rng.gen_range(0..3) as f32);
            deviation_sum += deviation;
        }

        let mut thickness_sum = 0.0f32;
        for p in 0..SCAN_POINTS {
            let ripple = 0.02 * (p as f32 / SCAN_POINTS as f32 * 4.0 * std::f32::consts::PI).sin();
            let value = 1.0 + ripple + rng.gen::<f32>() * 0.01 - 0.005;
            thickness.push(value);
            thickness_sum += value;
        }

        averages.push(thickness_sum / SCAN_POINTS as f32);
        averages.push(deviation_sum / ACTUATORS as f32);
    }

    FeatureTable {
        columns: vec![
            Column {
                name: ACTUATOR_POSITIONS.to_string(),
                width: ACTUATORS,
                data: positions,
            },
            Column {
                name: ACTUATOR_DEVIATIONS.to_string(),
                width: ACTUATORS,
                data: deviations,
            },
            Column {
                name: ACTUATOR_ACTIONS.to_string(),
                width: ACTUATORS,
                data: actions,
            },
            Column {
                name: THICKNESS_PROFILES.to_string(),
                width: SCAN_POINTS,
                data: thickness,
            },
            Column {
                name: AVERAGES.to_string(),
                width: AGGREGATES,
                data: averages,
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_insert_and_access() {
        let mut table = FeatureTable::new();
        table
            .insert_column("A", 2, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0])
            .unwrap();

        assert_eq!(table.rows(), 3);
        assert_eq!(table.column_width("A").unwrap(), 2);
        assert_eq!(table.row("A", 0).unwrap(), &[1.0, 2.0]);
        assert_eq!(table.row("A", 2).unwrap(), &[5.0, 6.0]);
    }

    #[test]
    fn test_missing_column() {
        let table = FeatureTable::new();
        assert!(matches!(
            table.row("Missing", 0),
            Err(SequenceError::ColumnNotFound(_))
        ));
        assert!(table.column_width("Missing").is_err());
    }

    #[test]
    fn test_row_count_mismatch() {
        let mut table = FeatureTable::new();
        table.insert_column("A", 2, vec![0.0; 6]).unwrap();
        assert!(matches!(
            table.insert_column("B", 2, vec![0.0; 4]),
            Err(SequenceError::Config(_))
        ));
    }

    #[test]
    fn test_duplicate_column() {
        let mut table = FeatureTable::new();
        table.insert_column("A", 1, vec![0.0; 3]).unwrap();
        assert!(table.insert_column("A", 1, vec![0.0; 3]).is_err());
    }

    #[test]
    fn test_indivisible_data() {
        let mut table = FeatureTable::new();
        assert!(table.insert_column("A", 4, vec![0.0; 6]).is_err());
        assert!(table.insert_column("B", 0, vec![]).is_err());
    }

    #[test]
    fn test_empty_table() {
        let table = FeatureTable::new();
        assert_eq!(table.rows(), 0);
    }

    #[test]
    fn test_width_known_with_zero_rows() {
        let mut table = FeatureTable::new();
        table.insert_column("A", 4, vec![]).unwrap();
        assert_eq!(table.rows(), 0);
        assert_eq!(table.column_width("A").unwrap(), 4);
    }

    #[test]
    fn test_synthetic_determinism() {
        let a = generate_synthetic_telemetry(20, 42);
        let b = generate_synthetic_telemetry(20, 42);

        assert_eq!(a.rows(), 20);
        for name in [ACTUATOR_POSITIONS, THICKNESS_PROFILES, AVERAGES] {
            assert_eq!(a.row(name, 7).unwrap(), b.row(name, 7).unwrap());
        }
    }

    #[test]
    fn test_synthetic_widths_and_classes() {
        let table = generate_synthetic_telemetry(5, 1);

        assert_eq!(table.column_width(ACTUATOR_POSITIONS).unwrap(), 48);
        assert_eq!(table.column_width(ACTUATOR_DEVIATIONS).unwrap(), 48);
        assert_eq!(table.column_width(ACTUATOR_ACTIONS).unwrap(), 48);
        assert_eq!(table.column_width(THICKNESS_PROFILES).unwrap(), 360);
        assert_eq!(table.column_width(AVERAGES).unwrap(), 2);

        for row in 0..5 {
            for &action in table.row(ACTUATOR_ACTIONS, row).unwrap() {
                assert!(action == 0.0 || action == 1.0 || action == 2.0);
            }
        }
    }

    #[test]
    fn test_load_telemetry() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        // Two rows, misspelled thickness key as written by the legacy tool.
        write!(
            file,
            r#"{{
                "ActuatorPositions": [[1.0, 2.0], [3.0, 4.0]],
                "ActuatorDeviations": [[0.1, 0.2], [0.3, 0.4]],
                "ActuatorActions": [[0, 2], [1, 1]],
                "ThiknessProfiles": [[1.0, 1.1, 1.2], [0.9, 1.0, 1.1]],
                "Averages": [[1.1], [1.0]]
            }}"#
        )
        .unwrap();

        let table = load_telemetry(file.path()).unwrap();
        assert_eq!(table.rows(), 2);
        assert_eq!(table.column_width(ACTUATOR_POSITIONS).unwrap(), 2);
        assert_eq!(table.column_width(THICKNESS_PROFILES).unwrap(), 3);
        assert_eq!(table.row(ACTUATOR_ACTIONS, 1).unwrap(), &[1.0, 1.0]);
    }

    #[test]
    fn test_load_telemetry_ragged_rows() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "ActuatorPositions": [[1.0, 2.0], [3.0]],
                "ActuatorDeviations": [[0.1, 0.2], [0.3, 0.4]],
                "ActuatorActions": [[0, 2], [1, 1]],
                "ThicknessProfiles": [[1.0], [0.9]],
                "Averages": [[1.1], [1.0]]
            }}"#
        )
        .unwrap();

        assert!(matches!(
            load_telemetry(file.path()),
            Err(SequenceError::Config(_))
        ));
    }

    #[test]
    fn test_load_telemetry_malformed_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        assert!(matches!(
            load_telemetry(file.path()),
            Err(SequenceError::Json(_))
        ));
    }

    #[test]
    fn test_load_telemetry_missing_file() {
        assert!(matches!(
            load_telemetry(Path::new("/nonexistent/telemetry.json")),
            Err(SequenceError::Io(_))
        ));
    }
}

//! Reads reference tables from a directory of JSON arrays, one file per table.

use super::records::*;
use super::tables::{ReferenceTables, Table};
use super::wheel::{GateWheel, GateWheelFile};
use crate::error::{AtlasError, AtlasResult};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

pub const GATE_WHEEL_FILE: &str = "gate-wheel.json";

pub fn table_path(dir: &Path, table: &str) -> PathBuf {
    dir.join(format!("{table}.json"))
}

fn read_file(path: &Path) -> AtlasResult<String> {
    std::fs::read_to_string(path).map_err(|source| AtlasError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Load one table. A missing file yields an empty table and a warning.
fn load_table<T: Record + DeserializeOwned>(dir: &Path) -> AtlasResult<Table<T>> {
    let path = table_path(dir, T::TABLE);
    if !path.is_file() {
        tracing::warn!(target: "atlas::loader", table = T::TABLE, path = %path.display(), "Table file missing; using empty table");
        return Ok(Table::default());
    }
    let raw = read_file(&path)?;
    let rows: Vec<T> = serde_json::from_str(&raw).map_err(|source| AtlasError::Json {
        table: T::TABLE,
        path: path.clone(),
        source,
    })?;
    let table = Table::from_rows(rows)?;
    tracing::debug!(target: "atlas::loader", table = T::TABLE, rows = table.len(), "Table loaded");
    Ok(table)
}

fn load_wheel(dir: &Path) -> AtlasResult<GateWheel> {
    let path = dir.join(GATE_WHEEL_FILE);
    if !path.is_file() {
        return Ok(GateWheel::default());
    }
    let raw = read_file(&path)?;
    let file: GateWheelFile = serde_json::from_str(&raw).map_err(|source| AtlasError::Json {
        table: "gate-wheel",
        path,
        source,
    })?;
    GateWheel::from_file(&file)
}

impl ReferenceTables {
    /// Load every table from `dir`. Malformed files and duplicate ids are errors;
    /// absent files are not.
    pub fn load_dir(dir: impl AsRef<Path>) -> AtlasResult<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(AtlasError::Io {
                path: dir.to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "data directory not found",
                ),
            });
        }

        let tables = Self {
            signs: load_table(dir)?,
            planets: load_table(dir)?,
            points: load_table(dir)?,
            houses: load_table(dir)?,
            elements: load_table(dir)?,
            aspects: load_table(dir)?,
            configurations: load_table(dir)?,
            decans: load_table(dir)?,
            dignities: load_table(dir)?,
            hd_gates: load_table(dir)?,
            hd_gates_72: load_table(dir)?,
            hd_centers: load_table(dir)?,
            hd_channels: load_table(dir)?,
            hd_authorities: load_table(dir)?,
            hd_profiles: load_table(dir)?,
            hd_lines: load_table(dir)?,
            gene_keys: load_table(dir)?,
            gk_spheres: load_table(dir)?,
            gk_sequences: load_table(dir)?,
            codon_rings: load_table(dir)?,
            chakras: load_table(dir)?,
            numerology: load_table(dir)?,
            wheel: load_wheel(dir)?,
        };

        tracing::info!(
            target: "atlas::loader",
            dir = %dir.display(),
            records = tables.total_records(),
            wheel_origin = tables.wheel.origin_degree(),
            "Reference tables loaded"
        );
        Ok(tables)
    }
}

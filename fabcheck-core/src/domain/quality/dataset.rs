// fabcheck-core/src/domain/quality/dataset.rs

use std::collections::BTreeMap;

use super::checks::CheckError;
use super::rule::Layer;

// Table names the checks read.
pub const TEST_RESULTS: &str = "test_results";
pub const WAFER_BATCHES: &str = "wafer_batches";
pub const EQUIPMENT_LOGS: &str = "equipment_logs";

/// Column-major, string-typed table. `None` is a null cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    name: String,
    columns: Vec<String>,
    cells: Vec<Vec<Option<String>>>,
    row_count: usize,
}

impl Table {
    /// Builds a table from row-major data. Short rows are padded with nulls,
    /// extra cells are dropped.
    pub fn from_rows(
        name: impl Into<String>,
        columns: Vec<String>,
        rows: Vec<Vec<Option<String>>>,
    ) -> Self {
        let row_count = rows.len();
        let mut cells: Vec<Vec<Option<String>>> = columns
            .iter()
            .map(|_| Vec::with_capacity(row_count))
            .collect();

        for row in rows {
            let mut values = row.into_iter();
            for column in cells.iter_mut() {
                column.push(values.next().flatten());
            }
        }

        Self {
            name: name.into(),
            columns,
            cells,
            row_count,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column(&self, column: &str) -> Result<&[Option<String>], CheckError> {
        self.columns
            .iter()
            .position(|c| c == column)
            .and_then(|idx| self.cells.get(idx))
            .map(Vec::as_slice)
            .ok_or_else(|| CheckError::MissingColumn {
                table: self.name.clone(),
                column: column.to_string(),
            })
    }
}

/// Immutable view of every table of one layer. All rules of a run read the
/// same snapshot.
#[derive(Debug, Clone)]
pub struct LayerSnapshot {
    layer: Layer,
    tables: BTreeMap<String, Table>,
}

impl LayerSnapshot {
    pub fn empty(layer: Layer) -> Self {
        Self {
            layer,
            tables: BTreeMap::new(),
        }
    }

    pub fn from_tables(layer: Layer, tables: impl IntoIterator<Item = Table>) -> Self {
        Self {
            layer,
            tables: tables
                .into_iter()
                .map(|t| (t.name().to_string(), t))
                .collect(),
        }
    }

    pub fn layer(&self) -> Layer {
        self.layer
    }

    pub fn table(&self, name: &str) -> Result<&Table, CheckError> {
        self.tables
            .get(name)
            .ok_or_else(|| CheckError::MissingTable(name.to_string()))
    }

    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.values()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }
}

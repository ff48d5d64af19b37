// fabcheck-core/src/infrastructure/adapters/duckdb.rs

use duckdb::Connection;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};
use walkdir::WalkDir;

// Imports Hexagonaux
use crate::domain::ports::DatasetSource;
use crate::domain::quality::{Layer, LayerSnapshot, Table};
use crate::error::FabcheckError;
use crate::infrastructure::error::InfrastructureError;

const SUPPORTED_EXTENSION: &str = "csv";

/// Reads `<data_root>/<layer>/*.csv` through an in-memory DuckDB.
/// Every cell is handed to the engine as text.
#[derive(Debug, Clone)]
pub struct DuckDbDatasetRegistry {
    data_root: PathBuf,
}

impl DuckDbDatasetRegistry {
    pub fn new(data_root: impl Into<PathBuf>) -> Self {
        Self {
            data_root: data_root.into(),
        }
    }

    pub fn layer_dir(&self, layer: Layer) -> PathBuf {
        self.data_root.join(layer.as_str())
    }

    /// Dataset files directly under `dir`, sorted by file name.
    fn discover(dir: &Path) -> Vec<PathBuf> {
        WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .map(|e| e.into_path())
            .filter(|path| {
                path.is_file()
                    && path
                        .extension()
                        .and_then(|s| s.to_str())
                        .is_some_and(|ext| ext.eq_ignore_ascii_case(SUPPORTED_EXTENSION))
            })
            .collect()
    }
}

impl DatasetSource for DuckDbDatasetRegistry {
    #[instrument(skip(self), fields(root = %self.data_root.display()))]
    fn load_layer(&self, layer: Layer) -> Result<LayerSnapshot, FabcheckError> {
        let dir = self.layer_dir(layer);
        if !dir.is_dir() {
            info!(path = ?dir, "Layer directory not found");
            return Ok(LayerSnapshot::empty(layer));
        }

        let files = Self::discover(&dir);
        if files.is_empty() {
            return Ok(LayerSnapshot::empty(layer));
        }

        load_files(layer, files)
    }
}

/// One table per file, named after the file stem. A file DuckDB cannot read
/// is left out of the snapshot.
fn load_files(layer: Layer, files: Vec<PathBuf>) -> Result<LayerSnapshot, FabcheckError> {
    let conn = Connection::open_in_memory().map_err(InfrastructureError::from)?;

    let mut tables = Vec::with_capacity(files.len());
    for path in files {
        let name = path
            .file_stem()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        match read_table(&conn, &name, &path) {
            Ok(table) => {
                info!(table = %name, rows = table.row_count(), "Loaded table");
                tables.push(table);
            }
            Err(e) => {
                // the rules that need this table will report ERROR
                warn!(table = %name, path = ?path, error = %e, "Skipping unreadable dataset file");
            }
        }
    }

    Ok(LayerSnapshot::from_tables(layer, tables))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

fn source_expr(path: &Path) -> String {
    format!(
        "read_csv_auto({}, header = true, all_varchar = true)",
        quote_literal(&path.to_string_lossy())
    )
}

fn read_table(conn: &Connection, name: &str, path: &Path) -> Result<Table, InfrastructureError> {
    let view = quote_ident(name);
    conn.execute_batch(&format!(
        "CREATE OR REPLACE VIEW {} AS SELECT * FROM {}",
        view,
        source_expr(path)
    ))?;

    let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", quote_literal(name)))?;
    let columns: Vec<String> = stmt
        .query_map([], |row| row.get::<_, String>("name"))?
        .collect::<Result<Vec<_>, _>>()?;

    if columns.is_empty() {
        return Ok(Table::from_rows(name, columns, Vec::new()));
    }

    // all_varchar already yields text; the cast keeps the row reader uniform
    let projection = columns
        .iter()
        .map(|c| format!("CAST({} AS VARCHAR)", quote_ident(c)))
        .collect::<Vec<_>>()
        .join(", ");

    let mut stmt = conn.prepare(&format!("SELECT {} FROM {}", projection, view))?;
    let mut rows = stmt.query([])?;

    let mut data = Vec::new();
    while let Some(row) = rows.next()? {
        let mut values = Vec::with_capacity(columns.len());
        for idx in 0..columns.len() {
            values.push(row.get::<_, Option<String>>(idx)?);
        }
        data.push(values);
    }
    debug!(table = %name, columns = columns.len(), "Table materialized");

    Ok(Table::from_rows(name, columns, data))
}

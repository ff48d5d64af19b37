// fabcheck-core/src/domain/ports/datasets.rs

use crate::domain::quality::{Layer, LayerSnapshot};
use crate::error::FabcheckError;

/// Supplies the tables of one layer. A layer with nothing on disk is an
/// empty snapshot, never an error.
pub trait DatasetSource {
    fn load_layer(&self, layer: Layer) -> Result<LayerSnapshot, FabcheckError>;
}

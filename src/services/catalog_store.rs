use std::sync::{Arc, RwLock};

use crate::domain::catalog::{CatalogError, ShiftCatalog, ShiftDefinition};

/// Holds the current catalog snapshot for the running service.
///
/// Snapshots are immutable; a catalog change rebuilds the whole index and
/// swaps the `Arc`, so a validation pass that grabbed a snapshot keeps
/// seeing a consistent catalog for its entire duration.
#[derive(Debug)]
pub struct CatalogStore {
    current: RwLock<Arc<ShiftCatalog>>,
}

impl CatalogStore {
    pub fn new(catalog: ShiftCatalog) -> Self {
        Self {
            current: RwLock::new(Arc::new(catalog)),
        }
    }

    pub fn snapshot(&self) -> Arc<ShiftCatalog> {
        self.current
            .read()
            .expect("catalog lock poisoned")
            .clone()
    }

    pub fn replace(
        &self,
        definitions: impl IntoIterator<Item = ShiftDefinition>,
    ) -> Result<(), CatalogError> {
        let catalog = ShiftCatalog::from_definitions(definitions)?;
        *self.current.write().expect("catalog lock poisoned") = Arc::new(catalog);
        Ok(())
    }
}

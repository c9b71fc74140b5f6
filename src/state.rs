use crate::catalog::CatalogHandle;

/// Shared by every handler; cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogHandle,
}

impl AppState {
    pub fn new(catalog: CatalogHandle) -> Self {
        Self { catalog }
    }
}

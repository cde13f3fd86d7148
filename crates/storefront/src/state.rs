//! Application state shared across handlers.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use spicebox_core::{Catalog, CatalogError, Product};

use crate::config::StorefrontConfig;
use crate::error::AppError;
use crate::models::StoreSession;

/// Error building the application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("failed to read catalog {path}: {source}")]
    ReadCatalog {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The catalog is read-only;
/// everything the shopper changes sits in the [`StoreSession`] behind a
/// mutex.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    featured: Product,
    session: Mutex<StoreSession>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Storefront configuration
    /// * `catalog` - Products on sale; the first one is shown on the store page
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog fails validation.
    pub fn new(config: StorefrontConfig, catalog: Catalog) -> Result<Self, StateError> {
        catalog.validate()?;
        let featured = catalog.featured().cloned().ok_or(CatalogError::Empty)?;
        let session = StoreSession::new(&catalog, &featured);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                featured,
                session: Mutex::new(session),
            }),
        })
    }

    /// Build the state from configuration, loading the catalog it names.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog file cannot be read or is invalid.
    pub fn from_config(config: StorefrontConfig) -> Result<Self, StateError> {
        let catalog = load_catalog(config.catalog_path.as_deref())?;
        Self::new(config, catalog)
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// The product shown on the store page.
    #[must_use]
    pub fn featured(&self) -> &Product {
        &self.inner.featured
    }

    /// Run `f` with exclusive access to the shopper's session.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if an earlier handler panicked while
    /// holding the lock.
    pub fn with_session<T>(&self, f: impl FnOnce(&mut StoreSession) -> T) -> Result<T, AppError> {
        let mut session = self
            .inner
            .session
            .lock()
            .map_err(|_| AppError::Internal("store session lock poisoned".to_string()))?;
        Ok(f(&mut session))
    }
}

/// Load the catalog at `path`, or the built-in catalog when there is none.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not parse.
pub fn load_catalog(path: Option<&Path>) -> Result<Catalog, StateError> {
    let Some(path) = path else {
        return Ok(Catalog::builtin());
    };

    let json = std::fs::read_to_string(path).map_err(|source| StateError::ReadCatalog {
        path: path.to_path_buf(),
        source,
    })?;
    let catalog = Catalog::from_json(&json)?;
    tracing::info!(
        path = %path.display(),
        products = catalog.products.len(),
        "Loaded catalog"
    );
    Ok(catalog)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn test_config() -> StorefrontConfig {
        StorefrontConfig::from_vars(|_| None).unwrap()
    }

    #[test]
    fn test_builtin_catalog_when_no_path() {
        let catalog = load_catalog(None).unwrap();
        assert_eq!(catalog, Catalog::builtin());
    }

    #[test]
    fn test_missing_catalog_file() {
        let err = load_catalog(Some(Path::new("/nonexistent/catalog.json"))).unwrap_err();
        assert!(matches!(err, StateError::ReadCatalog { .. }));
    }

    #[test]
    fn test_empty_catalog_is_rejected() {
        let mut catalog = Catalog::builtin();
        catalog.products.clear();
        let err = AppState::new(test_config(), catalog).err().unwrap();
        assert!(matches!(err, StateError::Catalog(CatalogError::Empty)));
    }

    #[test]
    fn test_session_changes_persist_between_calls() {
        let state = AppState::new(test_config(), Catalog::builtin()).unwrap();
        let product = state.featured().clone();

        state
            .with_session(|session| session.cart.add_item(&product, &"250g".into()))
            .unwrap()
            .unwrap();
        let lines = state.with_session(|session| session.cart.len()).unwrap();
        assert_eq!(lines, 1);
    }
}

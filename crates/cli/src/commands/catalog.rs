//! Catalog inspection.
//!
//! # Usage
//!
//! ```bash
//! spicebox catalog
//! spicebox catalog --file catalog.json
//! ```

use std::path::{Path, PathBuf};

use spicebox_core::{Catalog, CatalogError, Money};
use thiserror::Error;
use tracing::info;

/// Errors loading a catalog file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Load and validate the catalog at `path`, or the built-in one.
///
/// # Errors
///
/// Returns an error if the file cannot be read or fails validation.
pub async fn load(path: Option<&Path>) -> Result<Catalog, LoadError> {
    let Some(path) = path else {
        return Ok(Catalog::builtin());
    };

    info!(path = %path.display(), "Loading catalog from file");
    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(Catalog::from_json(&json)?)
}

/// Log the price table of a catalog.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded.
pub async fn show(path: Option<&Path>) -> Result<(), LoadError> {
    let catalog = load(path).await?;

    info!(
        products = catalog.products.len(),
        currency = catalog.currency_code.code(),
        "Catalog is valid"
    );
    for line in price_table(&catalog) {
        info!("{line}");
    }
    info!(terms = %catalog.featured_terms.join(", "), "Search suggestions");
    Ok(())
}

/// One row per product variant: id, name, variant and formatted price.
fn price_table(catalog: &Catalog) -> Vec<String> {
    catalog
        .products
        .iter()
        .flat_map(|product| {
            product.variants.iter().map(move |variant| {
                let price = Money::new(variant.price, catalog.currency_code);
                format!(
                    "{:<12} {:<24} {:<8} {:>10}",
                    product.id.as_str(),
                    product.name,
                    variant.key.as_str(),
                    price.display()
                )
            })
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_price_table_lists_every_variant() {
        let rows = price_table(&Catalog::builtin());
        assert_eq!(rows.len(), 3);
        assert!(rows[0].starts_with("cumin-001"));
        assert!(rows[0].contains("100g"));
        assert!(rows[0].ends_with("₹199.00"));
        assert!(rows[2].ends_with("₹800.00"));
    }

    #[tokio::test]
    async fn test_load_builtin() {
        let catalog = load(None).await.unwrap();
        assert_eq!(catalog, Catalog::builtin());
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let err = load(Some(Path::new("/nonexistent/catalog.json")))
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::Read { .. }));
    }
}

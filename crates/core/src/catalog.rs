//! Static product catalog, price tables and the product gallery.
//!
//! The catalog is the sole source of variant keys: the cart only ever adds
//! variants that a [`PriceTable`] lists. Catalogs can be built in code
//! ([`Catalog::builtin`]) or loaded from JSON and then validated.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{CurrencyCode, Money, ProductId, VariantKey};

/// Errors raised while loading or querying a catalog.
#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("catalog has no products")]
    Empty,
    #[error("duplicate product id: {0}")]
    DuplicateProduct(ProductId),
    #[error("product {0} has no variants")]
    NoVariants(ProductId),
    #[error("product {product} lists variant {variant} twice")]
    DuplicateVariant {
        product: ProductId,
        variant: VariantKey,
    },
    #[error("product {product} variant {variant} has a negative price")]
    NegativePrice {
        product: ProductId,
        variant: VariantKey,
    },
    #[error("unknown product: {0}")]
    UnknownProduct(ProductId),
    #[error("thumbnail {index} out of range (product has {len})")]
    ThumbnailOutOfRange { index: usize, len: usize },
    #[error("invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One purchasable size/weight option and its unit price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub key: VariantKey,
    /// Unit price in the catalog currency.
    pub price: Decimal,
}

/// Ordered mapping from variant key to unit price.
///
/// Order is the order shown in the variant selector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceTable(Vec<Variant>);

impl PriceTable {
    /// Build a table from `(key, price)` pairs.
    #[must_use]
    pub fn new(entries: impl IntoIterator<Item = (VariantKey, Decimal)>) -> Self {
        Self(
            entries
                .into_iter()
                .map(|(key, price)| Variant { key, price })
                .collect(),
        )
    }

    /// Unit price for a variant, if the table lists it.
    #[must_use]
    pub fn price_of(&self, key: &VariantKey) -> Option<Decimal> {
        self.0.iter().find(|v| &v.key == key).map(|v| v.price)
    }

    /// The first variant, used as the selector's initial value.
    #[must_use]
    pub fn first(&self) -> Option<&Variant> {
        self.0.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Variant> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A gallery thumbnail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thumbnail {
    pub alt: String,
    pub src: String,
}

/// A product listed in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Small image shown next to cart lines.
    pub image: String,
    /// Large image shown before any thumbnail is picked.
    pub main_image: String,
    #[serde(default)]
    pub thumbnails: Vec<Thumbnail>,
    pub variants: PriceTable,
}

impl Product {
    /// Unit price of `variant` as money in `currency_code`.
    #[must_use]
    pub fn unit_price(&self, variant: &VariantKey, currency_code: CurrencyCode) -> Option<Money> {
        self.variants
            .price_of(variant)
            .map(|price| Money::new(price, currency_code))
    }
}

fn default_featured_terms() -> Vec<String> {
    ["rice", "flour", "lentils", "cumin", "turmeric", "cinnamon", "combo pack"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// The full set of products on sale plus the featured search terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub currency_code: CurrencyCode,
    pub products: Vec<Product>,
    /// Terms offered as search suggestions, in display order.
    #[serde(default = "default_featured_terms")]
    pub featured_terms: Vec<String>,
}

impl Catalog {
    /// The catalog the storefront ships with: one spice in three weights.
    #[must_use]
    pub fn builtin() -> Self {
        let placeholder = "https://via.placeholder.com/400x400.png?bg=f4e4c1";
        let thumbnails = ["Front", "Back", "Seeds"]
            .into_iter()
            .map(|alt| Thumbnail {
                alt: alt.to_owned(),
                src: format!("{placeholder}&text={alt}"),
            })
            .collect();

        Self {
            currency_code: CurrencyCode::INR,
            products: vec![Product {
                id: ProductId::new("cumin-001"),
                name: "Premium Cumin Seeds".to_owned(),
                image: "https://via.placeholder.com/60x60?text=Cumin".to_owned(),
                main_image: format!("{placeholder}&text=Premium Cumin Seeds"),
                thumbnails,
                variants: PriceTable::new([
                    (VariantKey::new("100g"), Decimal::new(19_900, 2)),
                    (VariantKey::new("250g"), Decimal::new(45_000, 2)),
                    (VariantKey::new("500g"), Decimal::new(80_000, 2)),
                ]),
            }],
            featured_terms: default_featured_terms(),
        }
    }

    /// Parse and validate a catalog from JSON.
    ///
    /// Prices are decimal strings (`"450.00"`) so they never pass through
    /// binary floating point.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the catalog fails
    /// [`Catalog::validate`].
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: Self = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Check catalog invariants.
    ///
    /// # Errors
    ///
    /// Returns the first violation found: no products, duplicate product
    /// ids, a product without variants, duplicate variant keys within a
    /// product, or a negative price.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.products.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut product_ids = HashSet::new();
        for product in &self.products {
            if !product_ids.insert(&product.id) {
                return Err(CatalogError::DuplicateProduct(product.id.clone()));
            }
            if product.variants.is_empty() {
                return Err(CatalogError::NoVariants(product.id.clone()));
            }

            let mut keys = HashSet::new();
            for variant in product.variants.iter() {
                if !keys.insert(&variant.key) {
                    return Err(CatalogError::DuplicateVariant {
                        product: product.id.clone(),
                        variant: variant.key.clone(),
                    });
                }
                if variant.price.is_sign_negative() && !variant.price.is_zero() {
                    return Err(CatalogError::NegativePrice {
                        product: product.id.clone(),
                        variant: variant.key.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Look up a product by id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownProduct`] if no product has this id.
    pub fn product(&self, id: &ProductId) -> Result<&Product, CatalogError> {
        self.products
            .iter()
            .find(|p| &p.id == id)
            .ok_or_else(|| CatalogError::UnknownProduct(id.clone()))
    }

    /// The product featured on the store page.
    #[must_use]
    pub fn featured(&self) -> Option<&Product> {
        self.products.first()
    }
}

/// Which thumbnail is active and what the main image shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gallery {
    active: Option<usize>,
    main_image: String,
}

impl Gallery {
    /// A gallery showing the product's main image with no active thumbnail.
    #[must_use]
    pub fn new(product: &Product) -> Self {
        Self {
            active: None,
            main_image: product.main_image.clone(),
        }
    }

    /// Make thumbnail `index` active and swap the main image to its label.
    ///
    /// The main image reuses the thumbnail URL with its `&text=` label
    /// replaced by the thumbnail's alt text.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::ThumbnailOutOfRange`] for a bad index; the
    /// gallery is unchanged.
    pub fn select(&mut self, product: &Product, index: usize) -> Result<(), CatalogError> {
        let thumb = product
            .thumbnails
            .get(index)
            .ok_or(CatalogError::ThumbnailOutOfRange {
                index,
                len: product.thumbnails.len(),
            })?;

        self.main_image = match thumb.src.split_once("&text=") {
            Some((base, _)) => format!("{base}&text={}", thumb.alt),
            None => thumb.src.clone(),
        };
        self.active = Some(index);
        Ok(())
    }

    #[must_use]
    pub const fn active(&self) -> Option<usize> {
        self.active
    }

    #[must_use]
    pub fn main_image(&self) -> &str {
        &self.main_image
    }
}

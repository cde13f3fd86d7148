//! Product panel route handlers: size selector price and gallery.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use spicebox_core::{CartError, CurrencyCode, Gallery, Product, VariantKey};
use tracing::instrument;

use crate::error::Result;
use crate::state::AppState;

/// One option in the size selector.
#[derive(Clone)]
pub struct VariantOptionView {
    pub key: String,
    pub price: String,
    pub selected: bool,
}

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub variants: Vec<VariantOptionView>,
    /// Price of the selected variant.
    pub price: String,
}

impl ProductView {
    /// Build the view with `selected` highlighted in the size selector.
    #[must_use]
    pub fn new(product: &Product, selected: &VariantKey, currency_code: CurrencyCode) -> Self {
        let variants = product
            .variants
            .iter()
            .map(|variant| VariantOptionView {
                key: variant.key.to_string(),
                price: product
                    .unit_price(&variant.key, currency_code)
                    .map(|money| money.display())
                    .unwrap_or_default(),
                selected: &variant.key == selected,
            })
            .collect();
        let price = product
            .unit_price(selected, currency_code)
            .map(|money| money.display())
            .unwrap_or_default();

        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            variants,
            price,
        }
    }
}

/// Gallery thumbnail display data.
#[derive(Clone)]
pub struct ThumbnailView {
    pub index: usize,
    pub alt: String,
    pub src: String,
    pub active: bool,
}

/// Gallery display data for templates.
#[derive(Clone)]
pub struct GalleryView {
    pub product_name: String,
    pub main_image: String,
    pub thumbnails: Vec<ThumbnailView>,
}

impl GalleryView {
    #[must_use]
    pub fn new(product: &Product, gallery: &Gallery) -> Self {
        Self {
            product_name: product.name.clone(),
            main_image: gallery.main_image().to_string(),
            thumbnails: product
                .thumbnails
                .iter()
                .enumerate()
                .map(|(index, thumb)| ThumbnailView {
                    index,
                    alt: thumb.alt.clone(),
                    src: thumb.src.clone(),
                    active: gallery.active() == Some(index),
                })
                .collect(),
        }
    }
}

/// Variant selector query.
#[derive(Debug, Deserialize)]
pub struct VariantQuery {
    pub variant: VariantKey,
}

/// Thumbnail click form data.
#[derive(Debug, Deserialize)]
pub struct ThumbnailForm {
    pub index: usize,
}

/// Price display fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/price.html")]
pub struct PriceTemplate {
    pub price: String,
}

/// Gallery fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/gallery.html")]
pub struct GalleryTemplate {
    pub gallery: GalleryView,
}

/// Show the price of the chosen size.
#[instrument(skip(state))]
pub async fn variant(
    State(state): State<AppState>,
    Query(query): Query<VariantQuery>,
) -> Result<impl IntoResponse> {
    let product = state.featured();
    let price = product
        .unit_price(&query.variant, state.catalog().currency_code)
        .ok_or_else(|| CartError::UnknownVariant {
            product: product.id.clone(),
            variant: query.variant.clone(),
        })?;

    state.with_session(|session| session.selected_variant = query.variant)?;

    Ok(PriceTemplate {
        price: price.display(),
    })
}

/// Make a thumbnail active and swap the main image.
#[instrument(skip(state))]
pub async fn thumbnail(
    State(state): State<AppState>,
    Form(form): Form<ThumbnailForm>,
) -> Result<impl IntoResponse> {
    let product = state.featured();
    let gallery = state.with_session(|session| -> Result<GalleryView> {
        session.gallery.select(product, form.index)?;
        Ok(GalleryView::new(product, &session.gallery))
    })??;

    Ok(GalleryTemplate { gallery })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use spicebox_core::Catalog;

    use super::*;

    #[test]
    fn test_product_view_marks_selected_variant() {
        let catalog = Catalog::builtin();
        let product = catalog.featured().unwrap();
        let view = ProductView::new(product, &VariantKey::new("250g"), catalog.currency_code);

        assert_eq!(view.price, "₹450.00");
        let selected: Vec<_> = view.variants.iter().filter(|v| v.selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].key, "250g");
        assert_eq!(view.variants[2].price, "₹800.00");
    }

    #[test]
    fn test_gallery_view_tracks_active_thumbnail() {
        let catalog = Catalog::builtin();
        let product = catalog.featured().unwrap();
        let mut gallery = Gallery::new(product);
        assert!(GalleryView::new(product, &gallery).thumbnails.iter().all(|t| !t.active));

        gallery.select(product, 1).unwrap();
        let view = GalleryView::new(product, &gallery);
        assert!(view.thumbnails[1].active);
        assert!(view.main_image.ends_with("&text=Back"));
    }
}

//! Embedded fallback catalog.
//!
//! The upstream API sits behind aggressive bot protection and regularly
//! blocks or times out, so a complete twenty-product catalog is compiled into
//! the binary. Image URLs point at a stable public CDN rather than the
//! upstream's asset host, keeping them loadable even while the API itself is
//! refusing traffic.
//!
//! The dataset is loaded once per process and never mutated afterwards.

use std::sync::LazyLock;

use rust_decimal::Decimal;
use storefront_core::Product;

const FALLBACK_JSON: &str = include_str!("fallback_products.json");

/// Number of products the embedded dataset must contain.
const FALLBACK_LEN: usize = 20;

static FALLBACK_PRODUCTS: LazyLock<Vec<Product>> = LazyLock::new(|| {
    let products: Vec<Product> =
        serde_json::from_str(FALLBACK_JSON).expect("embedded fallback catalog parses as JSON");
    if let Err(reason) = validate_fallback(&products) {
        panic!("embedded fallback catalog is inconsistent: {reason}");
    }
    products
});

/// Read-only view of the embedded fallback catalog.
///
/// Ids are exactly `1..=20` and every product carries a non-empty title and a
/// non-negative price.
#[must_use]
pub fn fallback_products() -> &'static [Product] {
    &FALLBACK_PRODUCTS
}

/// Looks up a product in the fallback dataset by id.
#[must_use]
pub fn fallback_product_by_id(id: u32) -> Option<Product> {
    FALLBACK_PRODUCTS.iter().find(|p| p.id == id).cloned()
}

/// Structural checks for the embedded dataset, run once at first access.
///
/// Exactly [`FALLBACK_LEN`] products with unique ids in `1..=20`; by the
/// pigeonhole principle that means every id in the range is present.
fn validate_fallback(products: &[Product]) -> Result<(), String> {
    if products.len() != FALLBACK_LEN {
        return Err(format!(
            "expected {FALLBACK_LEN} products, found {}",
            products.len()
        ));
    }

    let mut seen_ids = std::collections::HashSet::new();
    for product in products {
        if !(1..=20).contains(&product.id) {
            return Err(format!("product id {} is outside 1..=20", product.id));
        }
        if !seen_ids.insert(product.id) {
            return Err(format!("duplicate product id {}", product.id));
        }
        if product.title.trim().is_empty() {
            return Err(format!("product {} has an empty title", product.id));
        }
        if product.category.trim().is_empty() {
            return Err(format!("product {} has an empty category", product.id));
        }
        if product.price < Decimal::ZERO {
            return Err(format!("product {} has a negative price", product.id));
        }
    }

    Ok(())
}

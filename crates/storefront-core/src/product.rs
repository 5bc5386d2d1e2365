use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A catalog product, as served by the upstream catalog API and as stored in
/// the embedded fallback dataset.
///
/// ## Observed wire shape (fakestoreapi.com)
///
/// ### `price`
/// The upstream serves `price` as a JSON **number** (`109.95`); the embedded
/// fallback dataset stores it as a decimal **string** (`"109.95"`) so no
/// binary float ever touches the value. [`Decimal`]'s deserializer accepts
/// both and strips float noise from the numeric form, so `109.95` is exactly
/// `109.95` either way.
///
/// ### `image`
/// A URI to a displayable image. Live products point at the upstream's asset
/// host; fallback products point at an independent CDN so they stay
/// renderable when the upstream is blocking us.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Positive id, unique within one catalog snapshot.
    pub id: u32,
    pub title: String,
    pub price: Decimal,
    pub description: String,
    /// Category label, e.g. `"men's clothing"` or `"electronics"`.
    pub category: String,
    pub image: String,
}

impl Product {
    /// Returns `true` if this product belongs to `category`, compared
    /// case-insensitively (the upstream is inconsistent about casing in its
    /// category route).
    #[must_use]
    pub fn matches_category(&self, category: &str) -> bool {
        self.category.eq_ignore_ascii_case(category)
    }
}

use rust_decimal::Decimal;
use storefront_core::Product;

/// One cart line: a product and how many of it the session holds.
///
/// A cart never carries two entries for the same product id; repeat additions
/// increment `quantity` on the existing entry instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartEntry {
    pub product: Product,
    pub quantity: u32,
}

impl CartEntry {
    /// Price of this line: unit price times quantity, in exact decimal
    /// arithmetic.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

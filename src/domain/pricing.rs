//! Order pricing using rust_decimal for precision

use rust_decimal::Decimal;

use crate::schemas::{LineItem, Order, ProductCategory};

/// Prices line items and whole orders
pub trait Pricing {
    fn line_total(&self, item: &LineItem) -> Decimal;

    /// Sum of line totals minus the discount. A discount larger than the
    /// lines yields a negative total, which lowers the member's spend.
    ///
    /// Deposit and delivery fee do not count towards spend.
    fn order_total(&self, order: &Order) -> Decimal {
        let gross: Decimal = order.products.iter().map(|item| self.line_total(item)).sum();
        gross - order.discount
    }
}

/// Default pricing: a fish is a unique animal sold at a flat price, every
/// other category is priced per unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryPricing;

impl Pricing for CategoryPricing {
    fn line_total(&self, item: &LineItem) -> Decimal {
        match item.category {
            ProductCategory::Fish => item.unit_price,
            _ => item.unit_price * Decimal::from(item.quantity),
        }
    }
}

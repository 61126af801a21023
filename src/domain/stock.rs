//! Stock deduction planning for committed sales
//!
//! Only plans the new balances; writing them back belongs to the inventory
//! owner.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::schemas::{Order, ProductCategory};

/// Current stock of one product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLevel {
    pub product_id: String,
    pub category: ProductCategory,
    #[serde(default)]
    pub balance: u32,
    #[serde(default)]
    pub sold: bool,
}

/// Planned stock change for one product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockDeduction {
    pub product_id: String,
    pub balance: u32,
    pub sold: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl StockDeduction {
    pub fn is_clean(&self) -> bool {
        self.warning.is_none()
    }
}

/// Plan the stock changes a committed order causes.
///
/// Quantities of repeated lines are summed per product. Products with no
/// known stock level are skipped. Results follow `stock` order.
pub fn plan_stock_deduction(order: &Order, stock: &[StockLevel]) -> Vec<StockDeduction> {
    let mut purchased: BTreeMap<&str, u32> = BTreeMap::new();
    for item in &order.products {
        let qty = purchased.entry(item.product_id.as_str()).or_insert(0);
        *qty = qty.saturating_add(item.quantity);
    }

    stock
        .iter()
        .filter_map(|level| {
            purchased
                .get(level.product_id.as_str())
                .map(|qty| deduct(level, *qty))
        })
        .collect()
}

fn deduct(level: &StockLevel, quantity: u32) -> StockDeduction {
    if level.category == ProductCategory::Fish {
        // each fish is a single animal; only the sold flag moves
        return StockDeduction {
            product_id: level.product_id.clone(),
            balance: level.balance,
            sold: true,
            warning: None,
        };
    }

    match level.balance.checked_sub(quantity) {
        Some(balance) => StockDeduction {
            product_id: level.product_id.clone(),
            balance,
            sold: balance == 0,
            warning: None,
        },
        None => {
            let warning = format!(
                "insufficient stock for {} (have {}, sold {})",
                level.product_id, level.balance, quantity
            );
            tracing::warn!(product_id = %level.product_id, "{}", warning);
            StockDeduction {
                product_id: level.product_id.clone(),
                balance: 0,
                sold: true,
                warning: Some(warning),
            }
        }
    }
}

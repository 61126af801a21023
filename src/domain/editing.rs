//! Editable-field gate
//!
//! Which fields an operator may still change while an order sits in a
//! status, without the edit being a transition. Commercial terms freeze once
//! payment is confirmed.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{KoiflowError, Result};
use crate::schemas::{BankAccountRef, LineItem, Order, OrderField, SellingStatus};

/// Fields editable while sitting in `status`
pub fn editable_fields(status: SellingStatus) -> &'static [OrderField] {
    match status {
        SellingStatus::Unset | SellingStatus::Order => &[OrderField::Products, OrderField::BankInfo],
        SellingStatus::WaitPayment => &[
            OrderField::Products,
            OrderField::BankInfo,
            OrderField::PaymentSlip,
        ],
        SellingStatus::Preparing => &[OrderField::ShippingSlip],
        SellingStatus::Shipping | SellingStatus::Received | SellingStatus::Damaged => &[],
    }
}

pub fn can_edit_field(field: OrderField, status: SellingStatus) -> bool {
    editable_fields(status).contains(&field)
}

/// Fail with `FieldLocked` unless `field` is editable in `status`
pub fn ensure_editable(field: OrderField, status: SellingStatus) -> Result<()> {
    if can_edit_field(field, status) {
        Ok(())
    } else {
        Err(KoiflowError::FieldLocked { field, status })
    }
}

/// An operator edit that does not change status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "edit", rename_all = "snake_case")]
pub enum OrderEdit {
    /// Replace the line items
    Products { items: Vec<LineItem> },
    /// Change deposit, discount and delivery fee
    Adjustments {
        #[serde(default)]
        deposit: Decimal,
        #[serde(default)]
        discount: Decimal,
        #[serde(default)]
        delivery_fee: Decimal,
    },
    /// Set or clear the bank account
    BankAccount {
        #[serde(default)]
        account: Option<BankAccountRef>,
    },
}

impl OrderEdit {
    /// Gated field this edit touches. Price adjustments are commercial
    /// terms and share the products gate.
    pub fn field(&self) -> OrderField {
        match self {
            OrderEdit::Products { .. } | OrderEdit::Adjustments { .. } => OrderField::Products,
            OrderEdit::BankAccount { .. } => OrderField::BankInfo,
        }
    }
}

/// Apply an edit to an order, returning the edited copy.
///
/// The input order is never mutated. The edit is checked against the gate
/// of the current status and the result against the order invariants.
pub fn apply_edit(order: &Order, edit: OrderEdit) -> Result<Order> {
    ensure_editable(edit.field(), order.selling_status)?;

    let next = match edit {
        OrderEdit::Products { items } => order.clone().with_products(items),
        OrderEdit::Adjustments {
            deposit,
            discount,
            delivery_fee,
        } => order.clone().with_adjustments(deposit, discount, delivery_fee),
        OrderEdit::BankAccount { account } => order.clone().with_bank_account(account),
    };

    next.validate().map_err(KoiflowError::InvalidOrder)?;
    Ok(next)
}

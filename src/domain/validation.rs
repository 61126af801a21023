//! Validation rules for status transitions

use crate::errors::{KoiflowError, Result};
use crate::schemas::{MissingField, Order, OrderField, PaymentMethod, SellingStatus};

use super::StatusWorkflow;

/// Snapshot of the order facts a transition depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationContext {
    pub method: PaymentMethod,
    pub has_products: bool,
    pub has_bank_info: bool,
    pub has_payment_slip: bool,
    pub has_shipping_slip: bool,
    pub has_shipping_address: bool,
}

impl ValidationContext {
    pub fn from_order(order: &Order) -> Self {
        ValidationContext {
            method: order.payment_method(),
            has_products: order.has_products(),
            has_bank_info: order.has_bank_info(),
            has_payment_slip: order.has_payment_slip,
            has_shipping_slip: order.has_shipping_slip,
            has_shipping_address: order.has_shipping_address(),
        }
    }

    /// Whether the order carries `field`
    pub fn has(&self, field: OrderField) -> bool {
        match field {
            OrderField::Products => self.has_products,
            OrderField::BankInfo => self.has_bank_info,
            OrderField::PaymentSlip => self.has_payment_slip,
            OrderField::ShippingSlip => self.has_shipping_slip,
            OrderField::ShippingAddress => self.has_shipping_address,
        }
    }
}

/// Every requirement of `target` the context does not meet, in table order.
pub fn missing_fields(
    workflow: &StatusWorkflow,
    target: SellingStatus,
    ctx: &ValidationContext,
) -> Vec<MissingField> {
    workflow
        .required_fields_for(target, ctx.method)
        .into_iter()
        .filter(|field| !ctx.has(*field))
        .map(|field| MissingField {
            status: target,
            field,
        })
        .collect()
}

/// Validate a status transition.
///
/// The graph is checked first; an unreachable target is reported as
/// `InvalidTransition` without looking at fields. Otherwise all missing
/// fields of the target are returned together.
pub fn validate_transition(
    workflow: &StatusWorkflow,
    current: SellingStatus,
    target: SellingStatus,
    ctx: &ValidationContext,
) -> Result<()> {
    if !workflow.can_transition(current, target) {
        return Err(KoiflowError::InvalidTransition {
            from: current,
            to: target,
        });
    }

    let missing = missing_fields(workflow, target, ctx);
    if !missing.is_empty() {
        return Err(KoiflowError::MissingRequiredFields(missing));
    }
    Ok(())
}

//! Selling status workflow table
//!
//! The happy path is linear:
//! none → order → wait_payment → preparing → shipping → received
//! with damaged as a side branch out of any post-order status and a
//! recovery edge back to order / wait_payment.

use serde::Serialize;

use crate::schemas::{OrderField, PaymentMethod, SellingStatus};

/// The canonical happy-path ordering, excluding the damaged side branch.
pub const HAPPY_PATH: &[SellingStatus] = &[
    SellingStatus::Unset,
    SellingStatus::Order,
    SellingStatus::WaitPayment,
    SellingStatus::Preparing,
    SellingStatus::Shipping,
    SellingStatus::Received,
];

/// Metadata for a single status
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusRule {
    pub status: SellingStatus,

    /// Operator-facing label
    pub label: &'static str,

    /// Statuses reachable in one transition
    pub next_steps: Vec<SellingStatus>,

    /// Fields the order must carry to enter this status
    pub required: Vec<OrderField>,
}

/// Immutable status graph with per-status requirements.
///
/// Built once with [`StatusWorkflow::standard`] and passed by reference to
/// every validator and resolver call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusWorkflow {
    rules: Vec<StatusRule>,
}

impl StatusWorkflow {
    /// The farm's standard workflow
    pub fn standard() -> Self {
        use OrderField::*;
        use SellingStatus::*;

        let rule = |status, label, next_steps: &[SellingStatus], required: &[OrderField]| StatusRule {
            status,
            label,
            next_steps: next_steps.to_vec(),
            required: required.to_vec(),
        };

        StatusWorkflow {
            rules: vec![
                rule(
                    Unset,
                    "Not placed",
                    &[Order, WaitPayment, Preparing, Shipping, Received, Damaged],
                    &[],
                ),
                rule(
                    Order,
                    "Order taken",
                    &[WaitPayment, Preparing, Shipping, Received, Damaged],
                    &[],
                ),
                rule(
                    WaitPayment,
                    "Awaiting payment",
                    &[Preparing, Shipping, Received, Damaged],
                    &[Products, BankInfo],
                ),
                rule(
                    Preparing,
                    "Packing for shipment",
                    &[Shipping, Received, Damaged],
                    &[Products, BankInfo, PaymentSlip],
                ),
                rule(
                    Shipping,
                    "In transit",
                    &[Received, Damaged],
                    &[Products, BankInfo, PaymentSlip, ShippingSlip],
                ),
                rule(Received, "Received", &[], &[]),
                rule(Damaged, "Damaged", &[Order, WaitPayment], &[]),
            ],
        }
    }

    /// Rule for a status. Rules are stored in step order.
    pub fn rule(&self, status: SellingStatus) -> &StatusRule {
        &self.rules[status.step_order() as usize]
    }

    pub fn rules(&self) -> impl Iterator<Item = &StatusRule> {
        self.rules.iter()
    }

    pub fn label(&self, status: SellingStatus) -> &'static str {
        self.rule(status).label
    }

    /// Statuses reachable from `current` in one transition
    pub fn allowed_next_states(&self, current: SellingStatus) -> &[SellingStatus] {
        &self.rule(current).next_steps
    }

    pub fn can_transition(&self, from: SellingStatus, to: SellingStatus) -> bool {
        self.allowed_next_states(from).contains(&to)
    }

    /// A status with no outgoing transitions
    pub fn is_terminal(&self, status: SellingStatus) -> bool {
        self.allowed_next_states(status).is_empty()
    }

    /// Default requirement set of a status, independent of payment method
    pub fn required_fields(&self, status: SellingStatus) -> &[OrderField] {
        &self.rule(status).required
    }

    /// Requirement set of a status for a given payment method.
    ///
    /// Bank info and the payment slip only apply when payment is routed
    /// through a bank account. Delivery methods additionally need a shipping
    /// address from `wait_payment` on, so every status the resolver can
    /// fast-forward to asks for nothing beyond the slip that moved it.
    pub fn required_fields_for(&self, status: SellingStatus, method: PaymentMethod) -> Vec<OrderField> {
        let mut fields: Vec<OrderField> = self
            .required_fields(status)
            .iter()
            .copied()
            .filter(|field| match field {
                OrderField::BankInfo | OrderField::PaymentSlip => method.routes_through_bank(),
                _ => true,
            })
            .collect();

        if method.requires_delivery()
            && matches!(
                status,
                SellingStatus::WaitPayment | SellingStatus::Preparing | SellingStatus::Shipping
            )
        {
            fields.push(OrderField::ShippingAddress);
        }
        fields
    }
}

impl Default for StatusWorkflow {
    fn default() -> Self {
        Self::standard()
    }
}

//! Status transition logic
//!
//! Pure functions that take an order and return the next version of it.
//! Inputs are never mutated; nothing is returned unless every check passed.

use crate::errors::{KoiflowError, Result};
use crate::schemas::{MissingField, Order, OrderField, SellingStatus, SlipKind};

use super::editing::ensure_editable;
use super::initial::initial_status;
use super::resolve::resolve_status;
use super::validation::{missing_fields, validate_transition, ValidationContext};
use super::StatusWorkflow;

/// Result of a successful status transition
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionOutcome {
    /// The order with its resolved status
    pub order: Order,

    /// Status before the transition
    pub from: SellingStatus,

    /// Status the operator asked for
    pub requested: SellingStatus,

    /// Status actually persisted after slip evidence was applied
    pub resolved: SellingStatus,
}

impl TransitionOutcome {
    /// Whether slip evidence moved the order past the requested status
    pub fn auto_advanced(&self) -> bool {
        self.requested != self.resolved
    }

    /// Whether the resolved status confirms the purchase
    pub fn commits_purchase(&self) -> bool {
        self.resolved.is_committed()
    }
}

/// Move an order to `requested`, validating first and then resolving the
/// status the slips on file support.
///
/// Only the requested status is validated. A status the resolver moves to
/// needs nothing beyond the slips that moved it there.
pub fn apply_state_transition(
    workflow: &StatusWorkflow,
    order: &Order,
    requested: SellingStatus,
) -> Result<TransitionOutcome> {
    let ctx = ValidationContext::from_order(order);
    validate_transition(workflow, order.selling_status, requested, &ctx)?;

    let resolved = resolve_status(requested, ctx.has_payment_slip, ctx.has_shipping_slip);

    Ok(TransitionOutcome {
        order: order.clone().with_status(resolved),
        from: order.selling_status,
        requested,
        resolved,
    })
}

/// Place a draft order: the transition from `none` to the status implied by
/// its payment terms.
pub fn create_order(workflow: &StatusWorkflow, draft: &Order) -> Result<TransitionOutcome> {
    if draft.selling_status != SellingStatus::Unset {
        return Err(KoiflowError::InvalidOrder(format!(
            "order {} is already placed ({})",
            draft.id, draft.selling_status
        )));
    }
    if draft.has_payment_slip || draft.has_shipping_slip {
        return Err(KoiflowError::InvalidOrder(format!(
            "order {} arrives with slip flags set; slips are recorded by upload only",
            draft.id
        )));
    }
    draft.validate().map_err(KoiflowError::InvalidOrder)?;

    apply_state_transition(workflow, draft, initial_status(&draft.payment))
}

/// Result of recording an uploaded slip
#[derive(Debug, Clone, PartialEq)]
pub struct SlipOutcome {
    /// The order with the slip recorded (and possibly advanced)
    pub order: Order,

    pub kind: SlipKind,

    /// Status the slip advanced the order to, if any
    pub advanced_to: Option<SellingStatus>,

    /// Requirements that kept the order from advancing
    pub blocked_by: Vec<MissingField>,
}

impl SlipOutcome {
    pub fn commits_purchase(&self) -> bool {
        self.advanced_to.is_some_and(SellingStatus::is_committed)
    }
}

fn slip_field(kind: SlipKind) -> OrderField {
    match kind {
        SlipKind::Payment => OrderField::PaymentSlip,
        SlipKind::Shipping => OrderField::ShippingSlip,
    }
}

/// Record an uploaded slip and auto-advance the order if the evidence
/// allows it.
///
/// The slip field must be editable in the current status. If the status the
/// evidence points to still lacks other requirements, the slip is kept and
/// the status stays where it was; the gaps are reported in `blocked_by`.
pub fn record_slip(workflow: &StatusWorkflow, order: &Order, kind: SlipKind) -> Result<SlipOutcome> {
    ensure_editable(slip_field(kind), order.selling_status)?;

    let recorded = order.clone().with_slip(kind, true);
    let current = recorded.selling_status;
    let target = resolve_status(current, recorded.has_payment_slip, recorded.has_shipping_slip);

    if target == current {
        return Ok(SlipOutcome {
            order: recorded,
            kind,
            advanced_to: None,
            blocked_by: Vec::new(),
        });
    }

    let ctx = ValidationContext::from_order(&recorded);
    let missing = missing_fields(workflow, target, &ctx);
    if !missing.is_empty() {
        return Ok(SlipOutcome {
            order: recorded,
            kind,
            advanced_to: None,
            blocked_by: missing,
        });
    }

    Ok(SlipOutcome {
        order: recorded.with_status(target),
        kind,
        advanced_to: Some(target),
        blocked_by: Vec::new(),
    })
}

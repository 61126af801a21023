//! Auto-advance resolution
//!
//! An uploaded slip is itself evidence of progress, so a requested status
//! is fast-forwarded to what the evidence supports.

use crate::schemas::SellingStatus;

/// Compute the status that is actually persisted for a request.
///
/// Pure and total. Only `wait_payment` and `preparing` requests can move;
/// every other status passes through unchanged.
pub fn resolve_status(
    requested: SellingStatus,
    has_payment_slip: bool,
    has_shipping_slip: bool,
) -> SellingStatus {
    match requested {
        SellingStatus::WaitPayment => match (has_payment_slip, has_shipping_slip) {
            (true, true) => SellingStatus::Shipping,
            (true, false) => SellingStatus::Preparing,
            _ => SellingStatus::WaitPayment,
        },
        SellingStatus::Preparing if has_shipping_slip => SellingStatus::Shipping,
        other => other,
    }
}

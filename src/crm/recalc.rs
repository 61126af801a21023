//! Member derived-state recalculation
//!
//! Rebuilds every derived member field from the purchase history in one
//! pass. Running it twice with the same inputs yields the same member.

use std::collections::HashMap;

use crate::domain::Pricing;
use crate::schemas::{Member, MemberStatus, Order, TierThresholds};

/// Recompute a member after `order` reached a committed status.
///
/// `history` holds the member's orders that still exist; ids in
/// `purchase_history` without a matching order are kept but not counted.
/// `order` takes precedence over a stale copy of itself in `history`.
/// An order below `preparing` leaves the member untouched.
pub fn recalculate_member<P: Pricing + ?Sized>(
    member: &Member,
    order: &Order,
    history: &[Order],
    tiers: &TierThresholds,
    pricing: &P,
) -> Member {
    if !order.selling_status.is_committed() {
        return member.clone();
    }

    let mut next = member.clone();
    if !next.has_purchased(&order.id) {
        next.purchase_history.push(order.id.clone());
    }

    let mut known: HashMap<&str, &Order> = history.iter().map(|o| (o.id.as_str(), o)).collect();
    known.insert(order.id.as_str(), order);

    let existing: Vec<&Order> = next
        .purchase_history
        .iter()
        .filter_map(|id| known.get(id.as_str()).copied())
        .collect();

    next.purchase_count = existing.len() as u32;
    next.last_purchase_date = existing.iter().map(|o| o.created_at).max();
    next.total_purchase_amount = existing.iter().map(|o| pricing.order_total(o)).sum();
    next.customer_level = tiers.level_for(next.total_purchase_amount);

    if next.status == MemberStatus::Inquiry {
        next.status = MemberStatus::Purchased;
    }

    next
}

//! Recency-based member activity

use chrono::{DateTime, Utc};

use crate::schemas::{ActivityWindows, Member, MemberStatus};

/// Activity status for a member whose last purchase was at `last`.
///
/// Whole days are counted; a purchase dated in the future counts as today.
pub fn classify_activity(last: DateTime<Utc>, now: DateTime<Utc>, windows: &ActivityWindows) -> MemberStatus {
    let days = (now - last).num_days().max(0);

    if days <= windows.hot_days {
        MemberStatus::HotActive
    } else if days <= windows.warm_days {
        MemberStatus::WarmActive
    } else if days <= windows.cold_days {
        MemberStatus::ColdActive
    } else {
        MemberStatus::Purchased
    }
}

/// Return the member with its status refreshed from purchase recency.
///
/// Inquiry members and members without a purchase date are returned as is.
pub fn refresh_activity(member: &Member, now: DateTime<Utc>, windows: &ActivityWindows) -> Member {
    let Some(last) = member.last_purchase_date else {
        return member.clone();
    };
    if member.status == MemberStatus::Inquiry {
        return member.clone();
    }

    let mut next = member.clone();
    next.status = classify_activity(last, now, windows);
    next
}

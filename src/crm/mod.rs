//! Member CRM state derived from committed sales

mod activity;
mod recalc;

pub use activity::{classify_activity, refresh_activity};
pub use recalc::recalculate_member;

//! Member schema - a customer and their derived CRM state

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Life-cycle signal of a member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MemberStatus {
    /// Has asked about stock, never bought
    #[default]
    Inquiry,
    /// Has at least one committed purchase
    Purchased,
    /// Bought within the hot window
    HotActive,
    /// Bought within the warm window
    WarmActive,
    /// Bought within the cold window
    ColdActive,
}

impl std::fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MemberStatus::Inquiry => write!(f, "inquiry"),
            MemberStatus::Purchased => write!(f, "purchased"),
            MemberStatus::HotActive => write!(f, "hot_active"),
            MemberStatus::WarmActive => write!(f, "warm_active"),
            MemberStatus::ColdActive => write!(f, "cold_active"),
        }
    }
}

/// CRM tier derived from cumulative confirmed spend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CustomerLevel {
    #[default]
    General,
    Vip,
    Vvip,
}

impl std::fmt::Display for CustomerLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CustomerLevel::General => write!(f, "general"),
            CustomerLevel::Vip => write!(f, "vip"),
            CustomerLevel::Vvip => write!(f, "vvip"),
        }
    }
}

/// A customer of the farm
///
/// `purchase_count`, `total_purchase_amount`, `last_purchase_date` and
/// `customer_level` are derived from `purchase_history` and are rewritten
/// together by the recalculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    pub id: String,

    pub display_name: String,

    #[serde(default)]
    pub status: MemberStatus,

    #[serde(default)]
    pub customer_level: CustomerLevel,

    /// Committed order ids, append-only
    #[serde(default)]
    pub purchase_history: Vec<String>,

    #[serde(default)]
    pub purchase_count: u32,

    #[serde(default)]
    pub total_purchase_amount: Decimal,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_purchase_date: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
}

fn default_schema_version() -> u32 {
    1
}

impl Member {
    /// Create a fresh inquiry-stage member with no purchases
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Member {
            schema_version: 1,
            id: id.into(),
            display_name: display_name.into(),
            status: MemberStatus::Inquiry,
            customer_level: CustomerLevel::General,
            purchase_history: Vec::new(),
            purchase_count: 0,
            total_purchase_amount: Decimal::ZERO,
            last_purchase_date: None,
            created_at: Utc::now(),
        }
    }

    pub fn has_purchased(&self, order_id: &str) -> bool {
        self.purchase_history.iter().any(|id| id == order_id)
    }
}

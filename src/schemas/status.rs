//! Selling status - the single internal status enumeration

use serde::{Deserialize, Serialize};

/// Status of a sale in the order workflow.
///
/// Step order is derived from the variant and is the only numeric
/// representation; numeric codes coming from older records are converted
/// at the boundary with `TryFrom<u8>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SellingStatus {
    /// Not yet placed (draft before creation)
    #[serde(rename = "none")]
    Unset,
    /// Order taken, nothing confirmed
    Order,
    /// Waiting for the buyer to pay
    WaitPayment,
    /// Payment or commitment confirmed, packing
    Preparing,
    /// Handed to the carrier
    Shipping,
    /// Buyer received the goods (terminal)
    Received,
    /// Goods arrived damaged
    Damaged,
}

impl SellingStatus {
    /// Every status, ordered by step order.
    pub const ALL: [SellingStatus; 7] = [
        SellingStatus::Unset,
        SellingStatus::Order,
        SellingStatus::WaitPayment,
        SellingStatus::Preparing,
        SellingStatus::Shipping,
        SellingStatus::Received,
        SellingStatus::Damaged,
    ];

    /// Position of the status in the canonical sequence (0-6).
    pub fn step_order(self) -> u8 {
        match self {
            SellingStatus::Unset => 0,
            SellingStatus::Order => 1,
            SellingStatus::WaitPayment => 2,
            SellingStatus::Preparing => 3,
            SellingStatus::Shipping => 4,
            SellingStatus::Received => 5,
            SellingStatus::Damaged => 6,
        }
    }

    /// Whether the sale has progressed at least as far as `other`.
    pub fn has_reached(self, other: SellingStatus) -> bool {
        self.step_order() >= other.step_order()
    }

    /// Whether payment or commitment is confirmed (step order >= preparing).
    ///
    /// Only committed sales count towards a member's purchase history.
    pub fn is_committed(self) -> bool {
        self.has_reached(SellingStatus::Preparing)
    }
}

impl std::fmt::Display for SellingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SellingStatus::Unset => write!(f, "none"),
            SellingStatus::Order => write!(f, "order"),
            SellingStatus::WaitPayment => write!(f, "wait_payment"),
            SellingStatus::Preparing => write!(f, "preparing"),
            SellingStatus::Shipping => write!(f, "shipping"),
            SellingStatus::Received => write!(f, "received"),
            SellingStatus::Damaged => write!(f, "damaged"),
        }
    }
}

impl std::str::FromStr for SellingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(SellingStatus::Unset),
            "order" => Ok(SellingStatus::Order),
            "wait_payment" => Ok(SellingStatus::WaitPayment),
            "preparing" => Ok(SellingStatus::Preparing),
            "shipping" => Ok(SellingStatus::Shipping),
            "received" => Ok(SellingStatus::Received),
            "damaged" => Ok(SellingStatus::Damaged),
            _ => Err(format!("Unknown selling status: {}", s)),
        }
    }
}

impl TryFrom<u8> for SellingStatus {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        SellingStatus::ALL
            .get(code as usize)
            .copied()
            .ok_or_else(|| format!("Unknown selling status code: {}", code))
    }
}

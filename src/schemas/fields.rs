//! Order fields referenced by requirement checks and the edit gate

use serde::{Deserialize, Serialize};

use super::SellingStatus;

/// A field of an order that the workflow can require or lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderField {
    /// Line items (and the price adjustments that go with them)
    Products,
    /// Bank account the payment is routed to
    BankInfo,
    /// Uploaded proof of payment
    PaymentSlip,
    /// Uploaded proof of shipment
    ShippingSlip,
    /// Delivery address and province
    ShippingAddress,
}

impl std::fmt::Display for OrderField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderField::Products => write!(f, "products"),
            OrderField::BankInfo => write!(f, "bank_info"),
            OrderField::PaymentSlip => write!(f, "payment_slip"),
            OrderField::ShippingSlip => write!(f, "shipping_slip"),
            OrderField::ShippingAddress => write!(f, "shipping_address"),
        }
    }
}

/// One requirement of a target status that the order does not satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingField {
    /// The status that demands the field
    pub status: SellingStatus,
    /// The absent field
    pub field: OrderField,
}

impl std::fmt::Display for MissingField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} is required for {}", self.field, self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_field_serialization() {
        assert_eq!(serde_json::to_string(&OrderField::BankInfo).unwrap(), "\"bank_info\"");
        assert_eq!(serde_json::to_string(&OrderField::ShippingSlip).unwrap(), "\"shipping_slip\"");
    }

    #[test]
    fn test_missing_field_message() {
        let missing = MissingField {
            status: SellingStatus::Preparing,
            field: OrderField::PaymentSlip,
        };
        assert_eq!(missing.to_string(), "payment_slip is required for preparing");
    }
}

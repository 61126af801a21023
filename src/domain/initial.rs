//! Initial status of a new sale, derived from its payment terms

use crate::schemas::{DeliveryStatus, PaymentTerms, SellingStatus};

/// Status a sale enters when it is created.
///
/// Cash sales handed over on the spot skip straight to `received`. Methods
/// where the farm already holds the money or ships on trust start at
/// `preparing`; bank-routed methods wait for payment.
pub fn initial_status(payment: &PaymentTerms) -> SellingStatus {
    match payment {
        PaymentTerms::Order => SellingStatus::Order,
        PaymentTerms::Cash {
            delivery: DeliveryStatus::Received,
        } => SellingStatus::Received,
        PaymentTerms::Cash { .. } => SellingStatus::Preparing,
        PaymentTerms::Credit { .. } => SellingStatus::Preparing,
        PaymentTerms::Transfer | PaymentTerms::Card => SellingStatus::WaitPayment,
        PaymentTerms::Cod => SellingStatus::Preparing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_status_per_method() {
        assert_eq!(initial_status(&PaymentTerms::Order), SellingStatus::Order);
        assert_eq!(initial_status(&PaymentTerms::Transfer), SellingStatus::WaitPayment);
        assert_eq!(initial_status(&PaymentTerms::Card), SellingStatus::WaitPayment);
        assert_eq!(
            initial_status(&PaymentTerms::Credit { payment_due_date: None }),
            SellingStatus::Preparing
        );
        assert_eq!(initial_status(&PaymentTerms::Cod), SellingStatus::Preparing);
    }

    #[test]
    fn test_cash_depends_on_delivery() {
        assert_eq!(
            initial_status(&PaymentTerms::Cash { delivery: DeliveryStatus::Received }),
            SellingStatus::Received
        );
        assert_eq!(
            initial_status(&PaymentTerms::Cash { delivery: DeliveryStatus::Pending }),
            SellingStatus::Preparing
        );
    }
}

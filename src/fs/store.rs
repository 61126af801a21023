//! Repositories over a data directory of JSON files
//!
//! One file per record, written atomically. No locking: one writer per
//! record is assumed.

use std::path::{Path, PathBuf};

use crate::errors::Result;
use crate::repository::{MemberRepository, OrderRepository};
use crate::schemas::{Member, Order};

use super::json::{read_member, read_order, write_member, write_order};

#[derive(Debug, Clone)]
pub struct JsonStore {
    root: PathBuf,
}

impl JsonStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        JsonStore { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl OrderRepository for JsonStore {
    fn get(&self, id: &str) -> Result<Option<Order>> {
        read_order(&self.root, id)
    }

    fn save(&mut self, order: Order) -> Result<Order> {
        write_order(&self.root, &order)?;
        tracing::debug!(order_id = %order.id, root = %self.root.display(), "Wrote order");
        Ok(order)
    }
}

impl MemberRepository for JsonStore {
    fn find_by_buyer_id(&self, buyer_id: &str) -> Result<Option<Member>> {
        read_member(&self.root, buyer_id)
    }

    fn save(&mut self, member: Member) -> Result<Member> {
        write_member(&self.root, &member)?;
        tracing::debug!(member_id = %member.id, root = %self.root.display(), "Wrote member");
        Ok(member)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StatusWorkflow;
    use crate::schemas::{
        BankAccountRef, Config, CustomerLevel, DeliveryStatus, LineItem, PaymentTerms, ProductCategory,
        SellingStatus, SlipKind,
    };
    use crate::fs::get_member_path;
    use crate::service::SalesWorkflow;
    use rust_decimal::Decimal;
    use tempfile::TempDir;

    #[test]
    fn test_store_round_trip() {
        let temp = TempDir::new().unwrap();
        let mut store = JsonStore::new(temp.path());

        let order = Order::new("sale-001", "member-001", PaymentTerms::Card);
        OrderRepository::save(&mut store, order.clone()).unwrap();
        assert_eq!(OrderRepository::get(&store, "sale-001").unwrap(), Some(order));

        MemberRepository::save(&mut store, Member::new("member-001", "Somchai")).unwrap();
        assert!(store.find_by_buyer_id("member-001").unwrap().is_some());
        assert!(store.find_by_buyer_id("member-002").unwrap().is_none());
    }

    #[test]
    fn test_workflow_over_json_store() {
        let temp = TempDir::new().unwrap();
        let mut store = JsonStore::new(temp.path());
        MemberRepository::save(&mut store, Member::new("member-001", "Somchai")).unwrap();

        let workflow = StatusWorkflow::standard();
        let config = Config::default();
        let mut sales = SalesWorkflow::new(&workflow, &config, store);

        let draft = Order::new("sale-001", "member-001", PaymentTerms::Transfer)
            .with_products(vec![LineItem::new("koi-001", ProductCategory::Fish, 1, Decimal::from(12_500))])
            .with_bank_account(Some(BankAccountRef {
                bank_code: "BBL".to_string(),
                account_number: "000-1-11111-1".to_string(),
            }));
        sales.create_order(draft).unwrap();
        sales.record_slip("sale-001", SlipKind::Payment).unwrap();

        let reopened = JsonStore::new(temp.path());
        let order = OrderRepository::get(&reopened, "sale-001").unwrap().unwrap();
        assert_eq!(order.selling_status, SellingStatus::Preparing);
        let member = reopened.find_by_buyer_id("member-001").unwrap().unwrap();
        assert_eq!(member.customer_level, CustomerLevel::Vip);
    }

    fn corrupt_member(root: &Path) {
        let path = get_member_path(root, "member-001");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{corrupt").unwrap();
    }

    #[test]
    fn test_unreadable_member_leaves_new_order_unwritten() {
        let temp = TempDir::new().unwrap();
        corrupt_member(temp.path());

        let workflow = StatusWorkflow::standard();
        let config = Config::default();
        let mut sales = SalesWorkflow::new(&workflow, &config, JsonStore::new(temp.path()));

        let draft = Order::new("sale-001", "member-001", PaymentTerms::Cash {
            delivery: DeliveryStatus::Received,
        })
        .with_products(vec![LineItem::new("koi-001", ProductCategory::Fish, 1, Decimal::from(8_000))]);

        let err = sales.create_order(draft).unwrap_err();
        assert_eq!(err.code(), "INVALID_JSON");

        let reopened = JsonStore::new(temp.path());
        assert!(OrderRepository::get(&reopened, "sale-001").unwrap().is_none());
    }

    #[test]
    fn test_unreadable_member_leaves_slip_unrecorded() {
        let temp = TempDir::new().unwrap();
        let mut store = JsonStore::new(temp.path());
        let waiting = Order::new("sale-002", "member-001", PaymentTerms::Transfer)
            .with_products(vec![LineItem::new("koi-002", ProductCategory::Fish, 1, Decimal::from(4_000))])
            .with_bank_account(Some(BankAccountRef {
                bank_code: "BBL".to_string(),
                account_number: "000-1-11111-1".to_string(),
            }))
            .with_status(SellingStatus::WaitPayment);
        OrderRepository::save(&mut store, waiting.clone()).unwrap();
        corrupt_member(temp.path());

        let workflow = StatusWorkflow::standard();
        let config = Config::default();
        let mut sales = SalesWorkflow::new(&workflow, &config, store);

        let err = sales.record_slip("sale-002", SlipKind::Payment).unwrap_err();
        assert_eq!(err.code(), "INVALID_JSON");

        let reopened = JsonStore::new(temp.path());
        assert_eq!(OrderRepository::get(&reopened, "sale-002").unwrap(), Some(waiting));
    }
}

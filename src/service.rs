//! Sales workflow service
//!
//! Composes the pure domain steps with storage: validate, resolve, read the
//! buyer, save the order, then save the buyer. Nothing is written until
//! every check and every read for the step has succeeded.

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::crm::{recalculate_member, refresh_activity};
use crate::domain::{self, CategoryPricing, OrderEdit, SlipOutcome, StatusWorkflow, TransitionOutcome};
use crate::errors::{KoiflowError, Result};
use crate::evidence::{gather_evidence, SlipProbe};
use crate::repository::{MemberRepository, OrderRepository};
use crate::schemas::{Config, Member, Order, SellingStatus, SlipKind};

/// Entry point for every order mutation
pub struct SalesWorkflow<'a, R> {
    workflow: &'a StatusWorkflow,
    config: &'a Config,
    store: R,
}

impl<'a, R> SalesWorkflow<'a, R>
where
    R: OrderRepository + MemberRepository,
{
    pub fn new(workflow: &'a StatusWorkflow, config: &'a Config, store: R) -> Self {
        SalesWorkflow { workflow, config, store }
    }

    pub fn load_order(&self, order_id: &str) -> Result<Order> {
        OrderRepository::get(&self.store, order_id)?
            .ok_or_else(|| KoiflowError::NotFound(format!("order {}", order_id)))
    }

    pub fn load_member(&self, member_id: &str) -> Result<Member> {
        self.store
            .find_by_buyer_id(member_id)?
            .ok_or_else(|| KoiflowError::NotFound(format!("member {}", member_id)))
    }

    /// Place a new order in the status its payment terms imply.
    pub fn create_order(&mut self, draft: Order) -> Result<TransitionOutcome> {
        if OrderRepository::get(&self.store, &draft.id)?.is_some() {
            return Err(KoiflowError::InvalidOrder(format!("order {} already exists", draft.id)));
        }

        let outcome = domain::create_order(self.workflow, &draft)?;
        tracing::info!(
            order_id = %outcome.order.id,
            status = %outcome.resolved,
            method = %outcome.order.payment_method(),
            "Created order"
        );
        self.persist_transition(outcome)
    }

    /// Move an order to `target`, fast-forwarding on slip evidence.
    pub fn change_status(&mut self, order_id: &str, target: SellingStatus) -> Result<TransitionOutcome> {
        let order = self.load_order(order_id)?;
        let outcome = domain::apply_state_transition(self.workflow, &order, target)?;

        if outcome.auto_advanced() {
            tracing::info!(
                order_id,
                requested = %outcome.requested,
                resolved = %outcome.resolved,
                "Slip evidence advanced status"
            );
        } else {
            tracing::info!(order_id, from = %outcome.from, to = %outcome.resolved, "Changed status");
        }
        self.persist_transition(outcome)
    }

    /// Apply a non-status edit, subject to the editable-field gate.
    pub fn edit_order(&mut self, order_id: &str, edit: OrderEdit) -> Result<Order> {
        let order = self.load_order(order_id)?;
        let field = edit.field();
        let edited = domain::apply_edit(&order, edit)?;
        tracing::debug!(order_id, %field, "Edited order");
        OrderRepository::save(&mut self.store, edited)
    }

    /// Record an uploaded slip and auto-advance if the order allows it.
    pub fn record_slip(&mut self, order_id: &str, kind: SlipKind) -> Result<SlipOutcome> {
        let order = self.load_order(order_id)?;
        let outcome = domain::record_slip(self.workflow, &order, kind)?;

        match outcome.advanced_to {
            Some(status) => tracing::info!(order_id, %kind, %status, "Slip advanced status"),
            None if !outcome.blocked_by.is_empty() => {
                let missing: Vec<String> = outcome.blocked_by.iter().map(|m| m.to_string()).collect();
                tracing::warn!(
                    order_id,
                    %kind,
                    missing = %missing.join(", "),
                    "Slip recorded but status cannot advance"
                );
            }
            None => tracing::info!(order_id, %kind, "Slip recorded"),
        }

        let plan = if outcome.commits_purchase() {
            self.plan_recalculation(&outcome.order)?
        } else {
            None
        };
        let saved = OrderRepository::save(&mut self.store, outcome.order.clone())?;
        if let Some((current, updated)) = plan {
            self.commit_member(current, updated)?;
        }
        Ok(SlipOutcome { order: saved, ..outcome })
    }

    /// Confirm an upload with the slip store, then record it.
    ///
    /// Fails with `NotFound` when the probe does not see the slip.
    pub async fn record_uploaded_slip<S: SlipProbe + ?Sized>(
        &mut self,
        order_id: &str,
        kind: SlipKind,
        probe: &S,
    ) -> Result<SlipOutcome> {
        let timeout = Duration::from_millis(self.config.slips.probe_timeout_ms);
        let evidence = gather_evidence(probe, order_id, timeout).await;
        if !evidence.has(kind) {
            return Err(KoiflowError::NotFound(format!("{} slip for order {}", kind, order_id)));
        }
        self.record_slip(order_id, kind)
    }

    /// Recalculate the buyer of a committed order.
    ///
    /// Returns `None` when the buyer has no member record.
    pub fn recalculate_for(&mut self, order: &Order) -> Result<Option<Member>> {
        match self.plan_recalculation(order)? {
            Some((current, updated)) => self.commit_member(current, updated).map(Some),
            None => Ok(None),
        }
    }

    /// Refresh a member's recency-based status as of `now`.
    pub fn refresh_member_activity(&mut self, member_id: &str, now: DateTime<Utc>) -> Result<Member> {
        let member = self.load_member(member_id)?;
        let refreshed = refresh_activity(&member, now, &self.config.activity);
        if refreshed == member {
            return Ok(member);
        }
        tracing::info!(member_id, from = %member.status, to = %refreshed.status, "Refreshed member activity");
        MemberRepository::save(&mut self.store, refreshed)
    }

    /// Read the buyer and their history and compute the recalculated
    /// member, without writing anything.
    fn plan_recalculation(&self, order: &Order) -> Result<Option<(Member, Member)>> {
        let Some(member) = self.store.find_by_buyer_id(&order.buyer_id)? else {
            tracing::debug!(order_id = %order.id, buyer_id = %order.buyer_id, "No member for buyer, skipping recalculation");
            return Ok(None);
        };

        let mut history = Vec::with_capacity(member.purchase_history.len());
        for id in &member.purchase_history {
            if let Some(past) = OrderRepository::get(&self.store, id)? {
                history.push(past);
            }
        }

        let updated = recalculate_member(&member, order, &history, &self.config.tiers, &CategoryPricing);
        Ok(Some((member, updated)))
    }

    fn commit_member(&mut self, current: Member, updated: Member) -> Result<Member> {
        if updated == current {
            return Ok(current);
        }

        tracing::info!(
            member_id = %updated.id,
            purchase_count = updated.purchase_count,
            total = %updated.total_purchase_amount,
            level = %updated.customer_level,
            "Recalculated member"
        );
        MemberRepository::save(&mut self.store, updated)
    }

    /// All reads for the member update happen before the order is written.
    fn persist_transition(&mut self, outcome: TransitionOutcome) -> Result<TransitionOutcome> {
        let plan = if outcome.commits_purchase() {
            self.plan_recalculation(&outcome.order)?
        } else {
            None
        };
        let saved = OrderRepository::save(&mut self.store, outcome.order.clone())?;
        if let Some((current, updated)) = plan {
            self.commit_member(current, updated)?;
        }
        Ok(TransitionOutcome { order: saved, ..outcome })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryStore;
    use crate::schemas::{
        BankAccountRef, CustomerLevel, DeliveryStatus, LineItem, MemberStatus, OrderField, PaymentTerms,
        ProductCategory,
    };
    use async_trait::async_trait;
    use chrono::Duration as ChronoDuration;
    use rust_decimal::Decimal;

    fn koi(price: i64) -> LineItem {
        LineItem::new("koi-001", ProductCategory::Fish, 1, Decimal::from(price))
    }

    fn bank() -> BankAccountRef {
        BankAccountRef {
            bank_code: "KBANK".to_string(),
            account_number: "123-4-56789-0".to_string(),
        }
    }

    fn store_with_member() -> InMemoryStore {
        InMemoryStore::new().with_member(Member::new("member-001", "Somchai"))
    }

    fn transfer_draft(id: &str, price: i64) -> Order {
        Order::new(id, "member-001", PaymentTerms::Transfer)
            .with_products(vec![koi(price)])
            .with_bank_account(Some(bank()))
    }

    #[test]
    fn test_transfer_happy_path() {
        let workflow = StatusWorkflow::standard();
        let config = Config::default();
        let mut sales = SalesWorkflow::new(&workflow, &config, store_with_member());

        let created = sales.create_order(transfer_draft("sale-001", 15_000)).unwrap();
        assert_eq!(created.order.selling_status, SellingStatus::WaitPayment);
        let member = sales.load_member("member-001").unwrap();
        assert!(member.purchase_history.is_empty());

        let paid = sales.record_slip("sale-001", SlipKind::Payment).unwrap();
        assert_eq!(paid.advanced_to, Some(SellingStatus::Preparing));

        let member = sales.load_member("member-001").unwrap();
        assert_eq!(member.purchase_history, vec!["sale-001".to_string()]);
        assert_eq!(member.purchase_count, 1);
        assert_eq!(member.total_purchase_amount, Decimal::from(15_000));
        assert_eq!(member.customer_level, CustomerLevel::Vip);
        assert_eq!(member.status, MemberStatus::Purchased);

        let err = sales.change_status("sale-001", SellingStatus::Shipping).unwrap_err();
        assert_eq!(err.missing_fields()[0].field, OrderField::ShippingSlip);

        let shipped = sales.record_slip("sale-001", SlipKind::Shipping).unwrap();
        assert_eq!(shipped.advanced_to, Some(SellingStatus::Shipping));

        let received = sales.change_status("sale-001", SellingStatus::Received).unwrap();
        assert_eq!(received.order.selling_status, SellingStatus::Received);

        let member = sales.load_member("member-001").unwrap();
        assert_eq!(member.purchase_count, 1);
        assert_eq!(member.purchase_history.len(), 1);
    }

    #[test]
    fn test_cash_received_recalculates_on_create() {
        let workflow = StatusWorkflow::standard();
        let config = Config::default();
        let mut sales = SalesWorkflow::new(&workflow, &config, store_with_member());

        let draft = Order::new("sale-002", "member-001", PaymentTerms::Cash {
            delivery: DeliveryStatus::Received,
        })
        .with_products(vec![koi(32_000)]);

        let outcome = sales.create_order(draft).unwrap();
        assert_eq!(outcome.order.selling_status, SellingStatus::Received);

        let member = sales.load_member("member-001").unwrap();
        assert_eq!(member.purchase_history, vec!["sale-002".to_string()]);
        assert_eq!(member.customer_level, CustomerLevel::Vvip);
    }

    #[test]
    fn test_locked_edit_leaves_order_untouched() {
        let workflow = StatusWorkflow::standard();
        let config = Config::default();
        let shipping = transfer_draft("sale-003", 5_000).with_status(SellingStatus::Shipping);
        let mut sales = SalesWorkflow::new(&workflow, &config, store_with_member().with_order(shipping.clone()));

        let err = sales
            .edit_order("sale-003", OrderEdit::Products { items: vec![koi(1)] })
            .unwrap_err();
        assert!(matches!(
            err,
            KoiflowError::FieldLocked {
                field: OrderField::Products,
                status: SellingStatus::Shipping
            }
        ));
        assert_eq!(sales.load_order("sale-003").unwrap(), shipping);
    }

    #[test]
    fn test_orphaned_buyer_is_not_an_error() {
        let workflow = StatusWorkflow::standard();
        let config = Config::default();
        let mut sales = SalesWorkflow::new(&workflow, &config, InMemoryStore::new());

        let draft = Order::new("sale-004", "member-404", PaymentTerms::Cash {
            delivery: DeliveryStatus::Received,
        })
        .with_products(vec![koi(2_000)]);

        let outcome = sales.create_order(draft).unwrap();
        assert_eq!(outcome.order.selling_status, SellingStatus::Received);
        assert!(sales.recalculate_for(&outcome.order).unwrap().is_none());
    }

    #[test]
    fn test_recalculate_for_is_idempotent() {
        let workflow = StatusWorkflow::standard();
        let config = Config::default();
        let mut sales = SalesWorkflow::new(&workflow, &config, store_with_member());

        let draft = Order::new("sale-005", "member-001", PaymentTerms::Cod).with_products(vec![koi(9_000)]);
        let draft = draft.with_shipping(Some(crate::schemas::ShippingAddress {
            address: "5 Moo 2".to_string(),
            province: "Nakhon Pathom".to_string(),
        }));
        let outcome = sales.create_order(draft).unwrap();

        let first = sales.load_member("member-001").unwrap();
        let again = sales.recalculate_for(&outcome.order).unwrap().unwrap();
        assert_eq!(first, again);
    }

    #[test]
    fn test_create_rejects_duplicate_id() {
        let workflow = StatusWorkflow::standard();
        let config = Config::default();
        let mut sales = SalesWorkflow::new(&workflow, &config, store_with_member());
        sales.create_order(transfer_draft("sale-006", 100)).unwrap();

        let err = sales.create_order(transfer_draft("sale-006", 100)).unwrap_err();
        assert_eq!(err.code(), "INVALID_ORDER");
    }

    #[test]
    fn test_failed_transition_writes_nothing() {
        let workflow = StatusWorkflow::standard();
        let config = Config::default();
        let order = Order::new("sale-007", "member-001", PaymentTerms::Transfer).with_status(SellingStatus::Order);
        let mut sales = SalesWorkflow::new(&workflow, &config, store_with_member().with_order(order.clone()));

        assert!(sales.change_status("sale-007", SellingStatus::Preparing).is_err());
        assert_eq!(sales.load_order("sale-007").unwrap(), order);
    }

    #[test]
    fn test_change_status_unknown_order() {
        let workflow = StatusWorkflow::standard();
        let config = Config::default();
        let mut sales = SalesWorkflow::new(&workflow, &config, InMemoryStore::new());
        let err = sales.change_status("sale-404", SellingStatus::Order).unwrap_err();
        assert_eq!(err.code(), "NOT_FOUND");
    }

    #[test]
    fn test_refresh_member_activity() {
        let workflow = StatusWorkflow::standard();
        let config = Config::default();
        let mut member = Member::new("member-001", "Somchai");
        member.status = MemberStatus::Purchased;
        let now = Utc::now();
        member.last_purchase_date = Some(now - ChronoDuration::days(10));
        let mut sales = SalesWorkflow::new(&workflow, &config, InMemoryStore::new().with_member(member));

        let refreshed = sales.refresh_member_activity("member-001", now).unwrap();
        assert_eq!(refreshed.status, MemberStatus::HotActive);
        assert_eq!(sales.load_member("member-001").unwrap().status, MemberStatus::HotActive);
    }

    struct Uploaded(Vec<SlipKind>);

    #[async_trait]
    impl SlipProbe for Uploaded {
        async fn exists(&self, _order_id: &str, kind: SlipKind) -> Result<bool> {
            Ok(self.0.contains(&kind))
        }
    }

    #[tokio::test]
    async fn test_record_uploaded_slip_checks_probe() {
        let workflow = StatusWorkflow::standard();
        let config = Config::default();
        let mut sales = SalesWorkflow::new(&workflow, &config, store_with_member());
        sales.create_order(transfer_draft("sale-008", 1_000)).unwrap();

        let err = sales
            .record_uploaded_slip("sale-008", SlipKind::Payment, &Uploaded(vec![]))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "NOT_FOUND");

        let outcome = sales
            .record_uploaded_slip("sale-008", SlipKind::Payment, &Uploaded(vec![SlipKind::Payment]))
            .await
            .unwrap();
        assert_eq!(outcome.advanced_to, Some(SellingStatus::Preparing));
    }
}

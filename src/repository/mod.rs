//! Storage seams for orders and members
//!
//! The workflow only ever reads and writes full records through these
//! traits. `InMemoryStore` backs tests and embedding; the JSON data-dir
//! store lives in `crate::fs`.

use std::collections::HashMap;

use crate::errors::Result;
use crate::schemas::{Member, Order};

pub trait OrderRepository {
    fn get(&self, id: &str) -> Result<Option<Order>>;

    /// Persist the full order, returning what was stored
    fn save(&mut self, order: Order) -> Result<Order>;
}

pub trait MemberRepository {
    /// Member that placed orders under `buyer_id`
    fn find_by_buyer_id(&self, buyer_id: &str) -> Result<Option<Member>>;

    fn save(&mut self, member: Member) -> Result<Member>;
}

/// Both repositories over hash maps
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    orders: HashMap<String, Order>,
    members: HashMap<String, Member>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_member(mut self, member: Member) -> Self {
        self.members.insert(member.id.clone(), member);
        self
    }

    pub fn with_order(mut self, order: Order) -> Self {
        self.orders.insert(order.id.clone(), order);
        self
    }

    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    /// Drop an order, leaving any member history that references it
    pub fn remove_order(&mut self, id: &str) -> Option<Order> {
        self.orders.remove(id)
    }
}

impl OrderRepository for InMemoryStore {
    fn get(&self, id: &str) -> Result<Option<Order>> {
        Ok(self.orders.get(id).cloned())
    }

    fn save(&mut self, order: Order) -> Result<Order> {
        self.orders.insert(order.id.clone(), order.clone());
        Ok(order)
    }
}

impl MemberRepository for InMemoryStore {
    fn find_by_buyer_id(&self, buyer_id: &str) -> Result<Option<Member>> {
        Ok(self.members.get(buyer_id).cloned())
    }

    fn save(&mut self, member: Member) -> Result<Member> {
        self.members.insert(member.id.clone(), member.clone());
        Ok(member)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::PaymentTerms;

    #[test]
    fn test_order_round_trip() {
        let mut store = InMemoryStore::new();
        assert!(OrderRepository::get(&store, "sale-001").unwrap().is_none());

        let order = Order::new("sale-001", "member-001", PaymentTerms::Card);
        OrderRepository::save(&mut store, order.clone()).unwrap();
        assert_eq!(store.get("sale-001").unwrap(), Some(order));
        assert_eq!(store.order_count(), 1);
    }

    #[test]
    fn test_member_lookup_by_buyer() {
        let store = InMemoryStore::new().with_member(Member::new("member-001", "Somchai"));
        assert!(store.find_by_buyer_id("member-001").unwrap().is_some());
        assert!(store.find_by_buyer_id("member-404").unwrap().is_none());
    }

    #[test]
    fn test_save_replaces_member() {
        let mut store = InMemoryStore::new().with_member(Member::new("member-001", "Somchai"));
        let mut member = store.find_by_buyer_id("member-001").unwrap().unwrap();
        member.purchase_count = 3;
        MemberRepository::save(&mut store, member).unwrap();
        assert_eq!(store.find_by_buyer_id("member-001").unwrap().unwrap().purchase_count, 3);
    }

    #[test]
    fn test_remove_order() {
        let mut store =
            InMemoryStore::new().with_order(Order::new("sale-001", "member-001", PaymentTerms::Card));
        assert!(store.remove_order("sale-001").is_some());
        assert!(store.get("sale-001").unwrap().is_none());
    }
}

//! Schema types for orders, members and configuration
//!
//! Field names and enum spellings match the JSON records exchanged with the
//! back-office REST API.

mod config;
mod fields;
mod member;
mod order;
mod status;

pub use config::{ActivityWindows, Config, SlipConfig, TierThresholds};
pub use fields::{MissingField, OrderField};
pub use member::{CustomerLevel, Member, MemberStatus};
pub use order::{
    BankAccountRef, DeliveryStatus, LineItem, Order, PaymentMethod, PaymentTerms,
    ProductCategory, ShippingAddress, SlipKind,
};
pub use status::SellingStatus;

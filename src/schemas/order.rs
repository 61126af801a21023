//! Order schema - a single sale and its line items

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::SellingStatus;

/// Product category of a line item; decides how the line is priced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductCategory {
    Fish,
    Water,
    Construction,
    Service,
    Food,
    Medicine,
    Equipment,
}

/// One product on an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub product_id: String,

    /// Units sold, always greater than zero
    pub quantity: u32,

    /// Flat price for fish, per-unit customer price for everything else
    pub unit_price: Decimal,

    pub category: ProductCategory,
}

impl LineItem {
    pub fn new(
        product_id: impl Into<String>,
        category: ProductCategory,
        quantity: u32,
        unit_price: Decimal,
    ) -> Self {
        LineItem {
            product_id: product_id.into(),
            quantity,
            unit_price,
            category,
        }
    }
}

/// How the buyer pays, without method-specific data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Order,
    Cash,
    Transfer,
    Card,
    Credit,
    Cod,
}

impl PaymentMethod {
    /// Payment is proven by a slip against one of the farm's bank accounts.
    pub fn routes_through_bank(self) -> bool {
        matches!(self, PaymentMethod::Order | PaymentMethod::Transfer | PaymentMethod::Card)
    }

    /// Goods are physically delivered to the buyer.
    pub fn requires_delivery(self) -> bool {
        matches!(self, PaymentMethod::Cod)
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentMethod::Order => write!(f, "order"),
            PaymentMethod::Cash => write!(f, "cash"),
            PaymentMethod::Transfer => write!(f, "transfer"),
            PaymentMethod::Card => write!(f, "card"),
            PaymentMethod::Credit => write!(f, "credit"),
            PaymentMethod::Cod => write!(f, "cod"),
        }
    }
}

/// Delivery state captured when a cash sale is entered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    /// Packed, waiting to be handed over
    #[default]
    Pending,
    /// Buyer took the goods on the spot
    Received,
}

/// Payment terms of an order, tagged by method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum PaymentTerms {
    Order,
    Cash {
        #[serde(default)]
        delivery: DeliveryStatus,
    },
    Transfer,
    Card,
    Credit {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        payment_due_date: Option<NaiveDate>,
    },
    Cod,
}

impl PaymentTerms {
    pub fn method(&self) -> PaymentMethod {
        match self {
            PaymentTerms::Order => PaymentMethod::Order,
            PaymentTerms::Cash { .. } => PaymentMethod::Cash,
            PaymentTerms::Transfer => PaymentMethod::Transfer,
            PaymentTerms::Card => PaymentMethod::Card,
            PaymentTerms::Credit { .. } => PaymentMethod::Credit,
            PaymentTerms::Cod => PaymentMethod::Cod,
        }
    }
}

/// Reference to the bank account a payment is routed to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankAccountRef {
    pub bank_code: String,
    pub account_number: String,
}

/// Delivery destination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub address: String,
    pub province: String,
}

/// Kind of uploaded proof
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlipKind {
    Payment,
    Shipping,
}

impl std::fmt::Display for SlipKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SlipKind::Payment => write!(f, "payment"),
            SlipKind::Shipping => write!(f, "shipping"),
        }
    }
}

impl std::str::FromStr for SlipKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "payment" => Ok(SlipKind::Payment),
            "shipping" => Ok(SlipKind::Shipping),
            _ => Err(format!("Unknown slip kind: {}", s)),
        }
    }
}

/// A sale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Schema version for forward compatibility
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    pub id: String,

    /// Member id of the buyer
    pub buyer_id: String,

    #[serde(default = "default_status")]
    pub selling_status: SellingStatus,

    pub payment: PaymentTerms,

    #[serde(default)]
    pub products: Vec<LineItem>,

    #[serde(default)]
    pub deposit: Decimal,

    #[serde(default)]
    pub discount: Decimal,

    #[serde(default)]
    pub delivery_fee: Decimal,

    /// Set only by the slip upload entry point
    #[serde(default)]
    pub has_payment_slip: bool,

    /// Set only by the slip upload entry point
    #[serde(default)]
    pub has_shipping_slip: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_account: Option<BankAccountRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping: Option<ShippingAddress>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    /// Drafts without timestamps are stamped when parsed
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_status() -> SellingStatus {
    SellingStatus::Unset
}

impl Order {
    /// Create a draft order with no status and no line items
    pub fn new(id: impl Into<String>, buyer_id: impl Into<String>, payment: PaymentTerms) -> Self {
        let now = Utc::now();
        Order {
            schema_version: 1,
            id: id.into(),
            buyer_id: buyer_id.into(),
            selling_status: SellingStatus::Unset,
            payment,
            products: Vec::new(),
            deposit: Decimal::ZERO,
            discount: Decimal::ZERO,
            delivery_fee: Decimal::ZERO,
            has_payment_slip: false,
            has_shipping_slip: false,
            bank_account: None,
            shipping: None,
            note: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.payment.method()
    }

    pub fn has_products(&self) -> bool {
        !self.products.is_empty()
    }

    pub fn has_bank_info(&self) -> bool {
        self.bank_account.is_some()
    }

    pub fn has_shipping_address(&self) -> bool {
        self.shipping
            .as_ref()
            .is_some_and(|s| !s.address.trim().is_empty() && !s.province.trim().is_empty())
    }

    pub fn has_slip(&self, kind: SlipKind) -> bool {
        match kind {
            SlipKind::Payment => self.has_payment_slip,
            SlipKind::Shipping => self.has_shipping_slip,
        }
    }

    /// Check the record-level invariants: positive quantities and
    /// non-negative money fields.
    ///
    /// Returns the first violation as a human readable reason.
    pub fn validate(&self) -> std::result::Result<(), String> {
        for item in &self.products {
            if item.quantity == 0 {
                return Err(format!("quantity of {} must be greater than 0", item.product_id));
            }
            if item.unit_price < Decimal::ZERO {
                return Err(format!("unit_price of {} must not be negative", item.product_id));
            }
        }
        for (name, value) in [
            ("deposit", self.deposit),
            ("discount", self.discount),
            ("delivery_fee", self.delivery_fee),
        ] {
            if value < Decimal::ZERO {
                return Err(format!("{} must not be negative, got {}", name, value));
            }
        }
        Ok(())
    }

    // ===== IMMUTABLE BUILDER METHODS =====

    /// Return a new Order with the given status, updating the timestamp
    pub fn with_status(mut self, status: SellingStatus) -> Self {
        self.selling_status = status;
        self.touch_returning()
    }

    pub fn with_products(mut self, products: Vec<LineItem>) -> Self {
        self.products = products;
        self.touch_returning()
    }

    pub fn with_adjustments(mut self, deposit: Decimal, discount: Decimal, delivery_fee: Decimal) -> Self {
        self.deposit = deposit;
        self.discount = discount;
        self.delivery_fee = delivery_fee;
        self.touch_returning()
    }

    pub fn with_bank_account(mut self, bank_account: Option<BankAccountRef>) -> Self {
        self.bank_account = bank_account;
        self.touch_returning()
    }

    pub fn with_shipping(mut self, shipping: Option<ShippingAddress>) -> Self {
        self.shipping = shipping;
        self.touch_returning()
    }

    /// Record slip presence. Only the slip upload path calls this.
    pub(crate) fn with_slip(mut self, kind: SlipKind, present: bool) -> Self {
        match kind {
            SlipKind::Payment => self.has_payment_slip = present,
            SlipKind::Shipping => self.has_shipping_slip = present,
        }
        self.touch_returning()
    }

    fn touch_returning(mut self) -> Self {
        self.updated_at = Utc::now();
        self
    }
}

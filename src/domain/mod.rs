//! Domain logic for the sales status workflow

mod editing;
mod initial;
mod pricing;
mod resolve;
mod states;
mod stock;
mod transitions;
mod validation;


pub use editing::{apply_edit, can_edit_field, editable_fields, ensure_editable, OrderEdit};
pub use initial::initial_status;
pub use pricing::{CategoryPricing, Pricing};
pub use resolve::resolve_status;
pub use states::{StatusRule, StatusWorkflow, HAPPY_PATH};
pub use stock::{plan_stock_deduction, StockDeduction, StockLevel};
pub use transitions::{apply_state_transition, create_order, record_slip, SlipOutcome, TransitionOutcome};
pub use validation::{missing_fields, validate_transition, ValidationContext};

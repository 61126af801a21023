//! Show command - Show an order and what can happen to it next

use std::path::Path;

use serde::Serialize;

use crate::domain::{editable_fields, CategoryPricing, Pricing, StatusWorkflow};
use crate::errors::Result;
use crate::schemas::{Order, OrderField, SellingStatus};

use super::{print_json, Context};

#[derive(Serialize)]
struct OrderView<'a> {
    order: &'a Order,
    total: rust_decimal::Decimal,
    next_steps: &'a [SellingStatus],
    editable: &'static [OrderField],
}

pub async fn run(data_dir: Option<&Path>, id: &str, json: bool) -> Result<()> {
    let ctx = Context::open(data_dir)?;
    let order = ctx.sales().load_order(id)?;

    if json {
        return print_json(&OrderView {
            order: &order,
            total: CategoryPricing.order_total(&order),
            next_steps: ctx.workflow.allowed_next_states(order.selling_status),
            editable: editable_fields(order.selling_status),
        });
    }

    print_order(&ctx.workflow, &order);
    Ok(())
}

/// Human readable summary shared by the mutating commands
pub(crate) fn print_order(workflow: &StatusWorkflow, order: &Order) {
    let status = order.selling_status;
    println!("Order {} for {}", order.id, order.buyer_id);
    println!("  status:   {} ({})", status, workflow.label(status));
    println!("  payment:  {}", order.payment_method());
    println!("  products: {}", order.products.len());
    println!("  total:    {}", CategoryPricing.order_total(order));
    println!(
        "  slips:    payment={} shipping={}",
        yes_no(order.has_payment_slip),
        yes_no(order.has_shipping_slip)
    );

    let next: Vec<String> = workflow.allowed_next_states(status).iter().map(|s| s.to_string()).collect();
    println!("  next:     {}", if next.is_empty() { "-".to_string() } else { next.join(", ") });

    let editable: Vec<String> = editable_fields(status).iter().map(|f| f.to_string()).collect();
    println!("  editable: {}", if editable.is_empty() { "-".to_string() } else { editable.join(", ") });
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

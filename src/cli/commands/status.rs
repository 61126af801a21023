//! Status command - Move an order to another status

use std::path::Path;

use crate::errors::Result;
use crate::schemas::SellingStatus;

use super::show::print_order;
use super::{print_json, Context};

pub async fn run(data_dir: Option<&Path>, id: &str, target: SellingStatus, json: bool) -> Result<()> {
    let ctx = Context::open(data_dir)?;
    let mut sales = ctx.sales();
    let outcome = sales.change_status(id, target)?;

    if json {
        return print_json(&outcome.order);
    }
    if outcome.auto_advanced() {
        println!(
            "Requested {}, advanced to {} by uploaded slips",
            outcome.requested, outcome.resolved
        );
    }
    print_order(&ctx.workflow, &outcome.order);
    Ok(())
}

//! Create command - Place an order from a JSON draft

use std::path::Path;

use crate::errors::Result;
use crate::fs::read_json;
use crate::schemas::Order;

use super::show::print_order;
use super::{print_json, Context};

pub async fn run(data_dir: Option<&Path>, file: &Path, json: bool) -> Result<()> {
    let ctx = Context::open(data_dir)?;
    let draft: Order = read_json(file)?;

    let mut sales = ctx.sales();
    let outcome = sales.create_order(draft)?;

    if json {
        return print_json(&outcome.order);
    }
    print_order(&ctx.workflow, &outcome.order);
    Ok(())
}

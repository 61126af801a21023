//! Edit command - Apply a non-status edit to an order

use std::path::Path;

use crate::domain::OrderEdit;
use crate::errors::Result;
use crate::fs::read_json;

use super::show::print_order;
use super::{print_json, Context};

pub async fn run(data_dir: Option<&Path>, id: &str, file: &Path, json: bool) -> Result<()> {
    let ctx = Context::open(data_dir)?;
    let edit: OrderEdit = read_json(file)?;

    let mut sales = ctx.sales();
    let order = sales.edit_order(id, edit)?;

    if json {
        return print_json(&order);
    }
    print_order(&ctx.workflow, &order);
    Ok(())
}

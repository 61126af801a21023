//! Stock command - Plan stock deductions for a committed order

use std::path::Path;

use crate::domain::{plan_stock_deduction, StockLevel};
use crate::errors::{KoiflowError, Result};
use crate::fs::read_json;

use super::{print_json, Context};

pub async fn run(data_dir: Option<&Path>, id: &str, file: &Path, json: bool) -> Result<()> {
    let ctx = Context::open(data_dir)?;
    let order = ctx.sales().load_order(id)?;
    if !order.selling_status.is_committed() {
        return Err(KoiflowError::InvalidOrder(format!(
            "order {} is {}; stock is only deducted from preparing on",
            order.id, order.selling_status
        )));
    }

    let stock: Vec<StockLevel> = read_json(file)?;
    let plan = plan_stock_deduction(&order, &stock);

    if json {
        return print_json(&plan);
    }
    for change in &plan {
        print!("{}: balance={} sold={}", change.product_id, change.balance, change.sold);
        match &change.warning {
            Some(warning) => println!("  ({})", warning),
            None => println!(),
        }
    }
    Ok(())
}

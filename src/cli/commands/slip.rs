//! Slip command - Record an uploaded payment or shipping slip

use std::path::Path;

use crate::errors::Result;
use crate::fs::FsSlipProbe;
use crate::schemas::SlipKind;

use super::show::print_order;
use super::{print_json, Context};

pub async fn run(data_dir: Option<&Path>, id: &str, kind: SlipKind, json: bool) -> Result<()> {
    let ctx = Context::open(data_dir)?;
    let probe = FsSlipProbe::new(&ctx.root, &ctx.config.slips);

    let mut sales = ctx.sales();
    let outcome = sales.record_uploaded_slip(id, kind, &probe).await?;

    if json {
        return print_json(&outcome.order);
    }
    match outcome.advanced_to {
        Some(status) => println!("Recorded {} slip, advanced to {}", kind, status),
        None if !outcome.blocked_by.is_empty() => {
            println!("Recorded {} slip; status unchanged until:", kind);
            for missing in &outcome.blocked_by {
                println!("  - {}", missing);
            }
        }
        None => println!("Recorded {} slip", kind),
    }
    print_order(&ctx.workflow, &outcome.order);
    Ok(())
}

//! Activity command - Refresh a member's recency status

use std::path::Path;

use chrono::Utc;

use crate::errors::Result;

use super::{print_json, Context};

pub async fn run(data_dir: Option<&Path>, member_id: &str, json: bool) -> Result<()> {
    let ctx = Context::open(data_dir)?;
    let mut sales = ctx.sales();
    let member = sales.refresh_member_activity(member_id, Utc::now())?;

    if json {
        return print_json(&member);
    }
    println!("Member {} ({})", member.id, member.display_name);
    println!("  status:    {}", member.status);
    println!("  level:     {}", member.customer_level);
    println!("  purchases: {}", member.purchase_count);
    println!("  spent:     {}", member.total_purchase_amount);
    if let Some(last) = member.last_purchase_date {
        println!("  last:      {}", last.format("%Y-%m-%d"));
    }
    Ok(())
}

//! Workflow command - Print the status transition table

use std::path::Path;

use crate::errors::Result;

use super::{print_json, Context};

pub async fn run(data_dir: Option<&Path>, json: bool) -> Result<()> {
    let ctx = Context::open(data_dir)?;
    let rules: Vec<_> = ctx.workflow.rules().collect();

    if json {
        return print_json(&rules);
    }

    for rule in rules {
        let next: Vec<String> = rule.next_steps.iter().map(|s| s.to_string()).collect();
        let required: Vec<String> = rule.required.iter().map(|f| f.to_string()).collect();
        println!("{} ({})", rule.status, rule.label);
        println!(
            "  next:     {}",
            if next.is_empty() { "(terminal)".to_string() } else { next.join(", ") }
        );
        if !required.is_empty() {
            println!("  requires: {}", required.join(", "));
        }
    }
    Ok(())
}

//! CLI module for koiflow
//!
//! Provides the command-line interface using clap.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::schemas::{SellingStatus, SlipKind};

/// koiflow - Sales order status workflow for the farm back office
#[derive(Parser, Debug)]
#[command(name = "koiflow")]
#[command(version)]
#[command(about = "Move sales orders through their status workflow and keep member CRM state in sync")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Data directory holding config.json, orders/, members/ and slips/
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the status transition table
    Workflow {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show an order with its allowed next statuses and editable fields
    Show {
        /// Order ID
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create an order from a JSON draft
    Create {
        /// Path to the order draft
        #[arg(short, long)]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Move an order to another status
    Status {
        /// Order ID
        id: String,

        /// Target status (order, wait_payment, preparing, shipping, received, damaged)
        #[arg(value_parser = parse_status)]
        target: SellingStatus,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Apply a JSON edit (products, adjustments or bank account) to an order
    Edit {
        /// Order ID
        id: String,

        /// Path to the edit
        #[arg(short, long)]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Record an uploaded slip found under slips/<id>/
    Slip {
        /// Order ID
        id: String,

        /// Slip kind (payment, shipping)
        #[arg(value_parser = parse_slip_kind)]
        kind: SlipKind,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Refresh a member's activity status from their last purchase
    Activity {
        /// Member ID
        member_id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Plan stock deductions for a committed order
    Stock {
        /// Order ID
        id: String,

        /// Path to a JSON array of current stock levels
        #[arg(short, long)]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn parse_status(s: &str) -> Result<SellingStatus, String> {
    s.parse()
}

fn parse_slip_kind(s: &str) -> Result<SlipKind, String> {
    s.parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_status_command() {
        let cli = Cli::try_parse_from(["koiflow", "--data-dir", "/tmp/farm", "status", "sale-001", "preparing"]).unwrap();
        match cli.command {
            Some(Commands::Status { id, target, json }) => {
                assert_eq!(id, "sale-001");
                assert_eq!(target, SellingStatus::Preparing);
                assert!(!json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/farm")));
    }

    #[test]
    fn test_rejects_unknown_status() {
        assert!(Cli::try_parse_from(["koiflow", "status", "sale-001", "packed"]).is_err());
    }

    #[test]
    fn test_parse_slip_command() {
        let cli = Cli::try_parse_from(["koiflow", "-v", "slip", "sale-001", "shipping", "--json"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Some(Commands::Slip {
                kind: SlipKind::Shipping,
                json: true,
                ..
            })
        ));
    }
}

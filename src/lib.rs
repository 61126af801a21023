//! koiflow - Sales order status workflow for a koi farm back office
//!
//! This library provides:
//! - Schema definitions for orders, members and configuration
//! - The status graph, field requirement validator, auto-advance resolver
//!   and editable-field gate
//! - Member purchase history, spend tier and activity recalculation
//! - Repository seams with in-memory and JSON data-dir implementations
//! - Slip evidence probing under a timeout

pub mod cli;
pub mod config;
pub mod crm;
pub mod domain;
pub mod errors;
pub mod evidence;
pub mod fs;
pub mod repository;
pub mod schemas;
pub mod service;

// Re-export commonly used types
pub use domain::{StatusWorkflow, TransitionOutcome};
pub use errors::{KoiflowError, Result};
pub use schemas::{Config, Member, Order, SellingStatus};
pub use service::SalesWorkflow;

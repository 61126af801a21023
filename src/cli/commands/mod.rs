//! CLI command implementations

pub mod activity;
pub mod create;
pub mod edit;
pub mod show;
pub mod slip;
pub mod status;
pub mod stock;
pub mod workflow;

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::load_config;
use crate::domain::StatusWorkflow;
use crate::errors::{KoiflowError, Result};
use crate::fs::{resolve_data_dir, JsonStore};
use crate::schemas::Config;
use crate::service::SalesWorkflow;

/// Resolved data directory with its configuration
pub(crate) struct Context {
    pub root: PathBuf,
    pub config: Config,
    pub workflow: StatusWorkflow,
}

impl Context {
    pub fn open(data_dir: Option<&Path>) -> Result<Self> {
        let root = resolve_data_dir(data_dir);
        let config = load_config(&root)?;
        Ok(Context {
            root,
            config,
            workflow: StatusWorkflow::standard(),
        })
    }

    pub fn sales(&self) -> SalesWorkflow<'_, JsonStore> {
        SalesWorkflow::new(&self.workflow, &self.config, JsonStore::new(&self.root))
    }
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).map_err(|e| KoiflowError::InvalidJson(e.to_string()))?;
    println!("{}", out);
    Ok(())
}

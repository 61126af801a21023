//! Slip probe over the data directory

use std::path::PathBuf;

use async_trait::async_trait;

use crate::errors::Result;
use crate::evidence::SlipProbe;
use crate::schemas::{SlipConfig, SlipKind};

use super::paths::{ensure_safe_id, get_slip_path};

/// Looks for `slips/<order-id>/<kind>.<ext>` under the data directory,
/// trying each configured extension in order.
#[derive(Debug, Clone)]
pub struct FsSlipProbe {
    root: PathBuf,
    extensions: Vec<String>,
}

impl FsSlipProbe {
    pub fn new(root: impl Into<PathBuf>, config: &SlipConfig) -> Self {
        FsSlipProbe {
            root: root.into(),
            extensions: config.extensions.clone(),
        }
    }
}

#[async_trait]
impl SlipProbe for FsSlipProbe {
    async fn exists(&self, order_id: &str, kind: SlipKind) -> Result<bool> {
        ensure_safe_id(order_id)?;
        for ext in &self.extensions {
            let path = get_slip_path(&self.root, order_id, kind, ext);
            if tokio::fs::try_exists(&path).await? {
                tracing::debug!(order_id, %kind, path = %path.display(), "Found slip");
                return Ok(true);
            }
        }
        Ok(false)
    }
}

//! Slip evidence gathering
//!
//! The only asynchronous boundary of the workflow. Probes are awaited under
//! a timeout and their answers collapsed to plain booleans before any status
//! logic runs.

use std::time::Duration;

use async_trait::async_trait;

use crate::errors::Result;
use crate::schemas::SlipKind;

/// Answers whether a slip has been uploaded for an order
#[async_trait]
pub trait SlipProbe: Send + Sync {
    async fn exists(&self, order_id: &str, kind: SlipKind) -> Result<bool>;
}

/// Slip presence for one order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlipEvidence {
    pub payment: bool,
    pub shipping: bool,
}

impl SlipEvidence {
    pub fn has(&self, kind: SlipKind) -> bool {
        match kind {
            SlipKind::Payment => self.payment,
            SlipKind::Shipping => self.shipping,
        }
    }
}

/// Ask the probe about both slips concurrently.
///
/// A probe that errors or does not answer within `timeout` counts as
/// "absent"; this function itself never fails.
pub async fn gather_evidence<P: SlipProbe + ?Sized>(
    probe: &P,
    order_id: &str,
    timeout: Duration,
) -> SlipEvidence {
    let (payment, shipping) = tokio::join!(
        probe_one(probe, order_id, SlipKind::Payment, timeout),
        probe_one(probe, order_id, SlipKind::Shipping, timeout),
    );
    SlipEvidence { payment, shipping }
}

async fn probe_one<P: SlipProbe + ?Sized>(
    probe: &P,
    order_id: &str,
    kind: SlipKind,
    timeout: Duration,
) -> bool {
    match tokio::time::timeout(timeout, probe.exists(order_id, kind)).await {
        Ok(Ok(found)) => found,
        Ok(Err(e)) => {
            tracing::warn!(order_id, %kind, error = %e, "Slip probe failed, treating as absent");
            false
        }
        Err(_) => {
            tracing::warn!(order_id, %kind, ?timeout, "Slip probe timed out, treating as absent");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::KoiflowError;

    struct FixedProbe {
        payment: bool,
        shipping: bool,
    }

    #[async_trait]
    impl SlipProbe for FixedProbe {
        async fn exists(&self, _order_id: &str, kind: SlipKind) -> Result<bool> {
            Ok(match kind {
                SlipKind::Payment => self.payment,
                SlipKind::Shipping => self.shipping,
            })
        }
    }

    struct FailingProbe;

    #[async_trait]
    impl SlipProbe for FailingProbe {
        async fn exists(&self, order_id: &str, _kind: SlipKind) -> Result<bool> {
            Err(KoiflowError::NotFound(format!("storage offline for {}", order_id)))
        }
    }

    struct SlowProbe;

    #[async_trait]
    impl SlipProbe for SlowProbe {
        async fn exists(&self, _order_id: &str, _kind: SlipKind) -> Result<bool> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(true)
        }
    }

    #[tokio::test]
    async fn test_gather_reports_probe_answers() {
        let probe = FixedProbe {
            payment: true,
            shipping: false,
        };
        let evidence = gather_evidence(&probe, "sale-001", Duration::from_secs(1)).await;
        assert_eq!(
            evidence,
            SlipEvidence {
                payment: true,
                shipping: false
            }
        );
        assert!(evidence.has(SlipKind::Payment));
        assert!(!evidence.has(SlipKind::Shipping));
    }

    #[tokio::test]
    async fn test_probe_errors_count_as_absent() {
        let evidence = gather_evidence(&FailingProbe, "sale-001", Duration::from_secs(1)).await;
        assert_eq!(evidence, SlipEvidence::default());
    }

    #[tokio::test]
    async fn test_probe_timeout_counts_as_absent() {
        let evidence = gather_evidence(&SlowProbe, "sale-001", Duration::from_millis(50)).await;
        assert_eq!(evidence, SlipEvidence::default());
    }
}

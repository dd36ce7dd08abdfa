//! Delegation manager: the redemption pipeline.
//!
//! A redemption runs as snapshot -> resolve enforcers -> pre-checks ->
//! execute batch -> post-checks. Any failure restores the snapshot, so a
//! redemption either commits whole or leaves the ledger untouched.

use std::sync::Arc;

use ethers_core::types::Address;

use tokengate_core::error::Result;
use tokengate_core::mode::ExecutionMode;

use crate::caveat::{Caveat, EnforcerRegistry, RedemptionCtx};
use crate::enforcers::BalanceEnvelopeEnforcer;
use crate::exec::{self, ExecutionBatch};
use crate::ledger::TokenLedger;
use crate::obs::metrics::HarnessMetrics;

/// One delegation redemption request.
#[derive(Debug, Clone)]
pub struct Redemption {
    pub label: String,
    pub subject: Address,
    pub mode: ExecutionMode,
    pub caveats: Vec<Caveat>,
    pub batch: ExecutionBatch,
}

pub struct DelegationManager {
    registry: EnforcerRegistry,
    metrics: Arc<HarnessMetrics>,
}

impl DelegationManager {
    /// Build a manager with the built-in enforcers registered.
    pub fn new(metrics: Arc<HarnessMetrics>) -> Self {
        let registry = EnforcerRegistry::new();
        registry.register(Arc::new(BalanceEnvelopeEnforcer::new()));

        Self { registry, metrics }
    }

    pub fn registry(&self) -> &EnforcerRegistry {
        &self.registry
    }

    /// Redeem one delegation against the ledger.
    ///
    /// Returns how many operations were applied. On any error the ledger is
    /// rolled back to its state before the call.
    pub fn redeem(&self, ledger: &TokenLedger, redemption: &Redemption) -> Result<usize> {
        let span = tracing::info_span!(
            "redeem",
            label = %redemption.label,
            subject = %redemption.subject,
            mode = %redemption.mode,
        );
        let _guard = span.enter();

        let snapshot = ledger.snapshot();
        let result = self.run_guarded(ledger, redemption);

        match &result {
            Ok(applied) => {
                self.metrics.redemptions.inc(&[("outcome", "committed")]);
                self.metrics.ops_applied.add(&[], *applied as u64);
                tracing::info!(applied, "redemption committed");
            }
            Err(e) => {
                ledger.restore(&snapshot);
                self.metrics.redemptions.inc(&[("outcome", "rolled_back")]);
                self.metrics
                    .check_failures
                    .inc(&[("code", e.check_code().as_str())]);
                tracing::warn!(code = e.check_code().as_str(), error = %e, "redemption rolled back");
            }
        }

        result
    }

    fn run_guarded(&self, ledger: &TokenLedger, redemption: &Redemption) -> Result<usize> {
        // Resolve every enforcer up front so an unknown kind fails the whole
        // redemption before any check or operation runs.
        let mut enforcers = Vec::with_capacity(redemption.caveats.len());
        for caveat in &redemption.caveats {
            enforcers.push((self.registry.resolve(&caveat.enforcer)?, &caveat.terms));
        }

        let ctx = RedemptionCtx::new(redemption.subject, redemption.mode, &redemption.batch, ledger);

        for (enforcer, terms) in &enforcers {
            enforcer.pre_check(&ctx, terms.as_ref())?;
        }

        let applied = exec::apply_batch(ledger, redemption.subject, redemption.mode, &redemption.batch)?;

        for (enforcer, terms) in &enforcers {
            enforcer.post_check(&ctx, terms.as_ref())?;
        }

        Ok(applied)
    }
}

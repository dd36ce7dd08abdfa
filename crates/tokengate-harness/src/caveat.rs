//! Caveats and the enforcer registry.
//!
//! A delegation carries zero or more caveats. Each caveat names an enforcer
//! kind and hands it an opaque terms blob; the enforcer alone knows how to
//! read it. The registry resolves kinds to shared enforcer instances.

use std::sync::Arc;

use bytes::Bytes;
use dashmap::DashMap;
use ethers_core::types::Address;

use tokengate_core::error::{Result, TokenGateError};
use tokengate_core::mode::ExecutionMode;
use tokengate_core::oracle::BalanceOracle;

use crate::exec::ExecutionBatch;

/// One restriction attached to a delegation.
#[derive(Debug, Clone)]
pub struct Caveat {
    pub enforcer: String,
    pub terms: Bytes,
}

/// Everything an enforcer may look at while judging a redemption.
pub struct RedemptionCtx<'a> {
    subject: Address,
    mode: ExecutionMode,
    batch: &'a ExecutionBatch,
    oracle: &'a dyn BalanceOracle,
}

impl<'a> RedemptionCtx<'a> {
    pub fn new(
        subject: Address,
        mode: ExecutionMode,
        batch: &'a ExecutionBatch,
        oracle: &'a dyn BalanceOracle,
    ) -> Self {
        Self {
            subject,
            mode,
            batch,
            oracle,
        }
    }

    pub fn subject(&self) -> Address {
        self.subject
    }

    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    pub fn batch(&self) -> &ExecutionBatch {
        self.batch
    }

    pub fn oracle(&self) -> &dyn BalanceOracle {
        self.oracle
    }
}

/// A caveat enforcer judges a redemption twice: before the batch runs and
/// after it has run. Either hook may veto by returning an error.
pub trait CaveatEnforcer: Send + Sync {
    fn kind(&self) -> &'static str;
    fn pre_check(&self, ctx: &RedemptionCtx<'_>, terms: &[u8]) -> Result<()>;
    fn post_check(&self, ctx: &RedemptionCtx<'_>, terms: &[u8]) -> Result<()>;
}

/// Registry mapping caveat kinds to enforcer instances.
#[derive(Default)]
pub struct EnforcerRegistry {
    by_kind: DashMap<&'static str, Arc<dyn CaveatEnforcer>>,
}

impl EnforcerRegistry {
    pub fn new() -> Self {
        Self {
            by_kind: DashMap::new(),
        }
    }

    pub fn register(&self, enforcer: Arc<dyn CaveatEnforcer>) {
        self.by_kind.insert(enforcer.kind(), enforcer);
    }

    pub fn resolve(&self, kind: &str) -> Result<Arc<dyn CaveatEnforcer>> {
        self.by_kind
            .get(kind)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| TokenGateError::UnknownEnforcer(kind.to_string()))
    }

    pub fn registered_kinds(&self) -> Vec<&'static str> {
        self.by_kind.iter().map(|entry| *entry.key()).collect()
    }
}

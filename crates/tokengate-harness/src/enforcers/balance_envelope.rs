//! The balance envelope enforcer.

use tokengate_core::checks;
use tokengate_core::error::Result;

use crate::caveat::{CaveatEnforcer, RedemptionCtx};

/// Keeps a recipient's token balance inside a one-sided envelope: below a
/// threshold before execution, or above it afterwards, depending on the
/// direction byte in the terms. All decoding and comparison logic lives in
/// the core checks; this type only adapts them to the enforcer seam.
#[derive(Debug, Default)]
pub struct BalanceEnvelopeEnforcer;

impl BalanceEnvelopeEnforcer {
    pub const KIND: &'static str = "balance-envelope";

    pub fn new() -> Self {
        Self
    }
}

impl CaveatEnforcer for BalanceEnvelopeEnforcer {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn pre_check(&self, ctx: &RedemptionCtx<'_>, terms: &[u8]) -> Result<()> {
        checks::pre_check(terms, ctx.mode(), ctx.subject(), ctx.oracle())
    }

    fn post_check(&self, ctx: &RedemptionCtx<'_>, terms: &[u8]) -> Result<()> {
        checks::post_check(terms, ctx.mode(), ctx.subject(), ctx.oracle())
    }
}

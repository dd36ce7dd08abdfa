//! Guardrail checks bracketing a guarded batch.
//!
//! Check order (identical on both sides):
//! - Gate on the claimed execution mode, before touching the terms.
//! - Decode the terms blob fresh (no state carries over from the other side).
//! - Enforce the envelope side that is meaningful at this boundary instant.
//!
//! The other side is deliberately a no-op. The lower bound is only meaningful
//! as a post-condition. The upper bound is only enforced pre-batch: a
//! legitimate operation (e.g. an incoming mint triggered by the batch itself)
//! may push the balance past it afterwards.

use ethers_core::types::Address;

use crate::error::{Result, TokenGateError};
use crate::mode::ExecutionMode;
use crate::oracle::BalanceOracle;
use crate::terms::decode_terms;

/// Check run once before the guarded batch executes.
///
/// Upper-limit terms require `balance < threshold` (strict). Lower-limit
/// terms pass without consulting the oracle.
pub fn pre_check(
    terms: &[u8],
    mode: ExecutionMode,
    subject: Address,
    oracle: &dyn BalanceOracle,
) -> Result<()> {
    ensure_default_batch(mode)?;
    let terms = decode_terms(terms)?;

    if terms.enforce_lower {
        // Lower bound is a post-condition; nothing to observe yet.
        return Ok(());
    }

    let balance = oracle.balance_of(terms.token, subject)?;
    tracing::debug!(
        token = %terms.token,
        subject = %subject,
        recipient = %terms.recipient,
        %balance,
        threshold = %terms.threshold,
        "upper-limit pre-check"
    );

    if balance < terms.threshold {
        Ok(())
    } else {
        tracing::warn!(%balance, threshold = %terms.threshold, "upper limit exceeded");
        Err(TokenGateError::UpperLimitExceeded {
            balance,
            threshold: terms.threshold,
        })
    }
}

/// Check run once after the guarded batch completes.
///
/// Lower-limit terms require `balance > threshold` (strict). Upper-limit
/// terms pass without consulting the oracle.
pub fn post_check(
    terms: &[u8],
    mode: ExecutionMode,
    subject: Address,
    oracle: &dyn BalanceOracle,
) -> Result<()> {
    ensure_default_batch(mode)?;
    let terms = decode_terms(terms)?;

    if !terms.enforce_lower {
        // Upper bound was enforced before the batch; the balance may move
        // freely in between.
        return Ok(());
    }

    let balance = oracle.balance_of(terms.token, subject)?;
    tracing::debug!(
        token = %terms.token,
        subject = %subject,
        recipient = %terms.recipient,
        %balance,
        threshold = %terms.threshold,
        "lower-limit post-check"
    );

    if balance > terms.threshold {
        Ok(())
    } else {
        tracing::warn!(%balance, threshold = %terms.threshold, "lower limit violated");
        Err(TokenGateError::LowerLimitViolated {
            balance,
            threshold: terms.threshold,
        })
    }
}

/// The guardrail supports exactly one execution mode; reject anything else
/// before decoding.
fn ensure_default_batch(mode: ExecutionMode) -> Result<()> {
    if mode == ExecutionMode::DefaultBatch {
        Ok(())
    } else {
        Err(TokenGateError::UnsupportedExecutionMode(mode))
    }
}

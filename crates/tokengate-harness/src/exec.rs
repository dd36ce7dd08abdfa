//! Execution payloads and the batch interpreter.
//!
//! Operations always act on behalf of a subject: transfers and burns spend
//! the subject's funds, mints credit an arbitrary account. Mode semantics
//! live here and nowhere else.

use ethers_core::types::{Address, U256};
use serde::Deserialize;

use tokengate_core::error::{Result, TokenGateError};
use tokengate_core::mode::ExecutionMode;

use crate::ledger::TokenLedger;

/// One ledger mutation inside a guarded batch.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    /// Move `amount` of `token` from the subject to `to`.
    Transfer { token: Address, to: Address, amount: u64 },
    /// Create `amount` of `token` for `to`. The harness mints freely.
    Mint { token: Address, to: Address, amount: u64 },
    /// Destroy `amount` of `token` held by the subject.
    Burn { token: Address, amount: u64 },
}

/// The ordered operations a redemption asks to run.
#[derive(Debug, Clone, Default)]
pub struct ExecutionBatch {
    pub ops: Vec<Operation>,
}

impl ExecutionBatch {
    pub fn new(ops: Vec<Operation>) -> Self {
        Self { ops }
    }
}

/// Run a batch under the claimed mode and return how many operations landed.
///
/// `default_batch` aborts on the first failure, `single_call` requires exactly
/// one operation, and `try_batch` skips failed operations with a warning.
pub fn apply_batch(
    ledger: &TokenLedger,
    subject: Address,
    mode: ExecutionMode,
    batch: &ExecutionBatch,
) -> Result<usize> {
    if mode == ExecutionMode::SingleCall && batch.ops.len() != 1 {
        return Err(TokenGateError::BadRequest(format!(
            "single_call expects exactly one operation, got {}",
            batch.ops.len()
        )));
    }

    let mut applied = 0usize;
    for (idx, op) in batch.ops.iter().enumerate() {
        match apply_op(ledger, subject, op) {
            Ok(()) => applied += 1,
            Err(e) if mode == ExecutionMode::TryBatch => {
                tracing::warn!(op = idx, error = %e, "operation skipped");
            }
            Err(e) => {
                tracing::warn!(op = idx, error = %e, "batch aborted");
                return Err(e);
            }
        }
    }
    Ok(applied)
}

fn apply_op(ledger: &TokenLedger, subject: Address, op: &Operation) -> Result<()> {
    match op {
        Operation::Transfer { token, to, amount } => {
            ledger.transfer(*token, subject, *to, U256::from(*amount))
        }
        Operation::Mint { token, to, amount } => ledger.mint(*token, *to, U256::from(*amount)),
        Operation::Burn { token, amount } => ledger.burn(*token, subject, U256::from(*amount)),
    }
}

//! Execution mode tags supplied by the execution context.

use serde::{Deserialize, Serialize};

/// The execution mode a redemption claims for its guarded batch.
///
/// The balance guardrail supports exactly one mode, [`ExecutionMode::DefaultBatch`];
/// the other tags exist so callers can state what they actually requested and
/// receive a precise rejection instead of a generic one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMode {
    /// Default batch execution: operations run in order, first failure aborts.
    #[default]
    DefaultBatch,
    /// Single-call execution: the batch holds exactly one operation.
    SingleCall,
    /// Try-batch execution: failed operations are skipped, not fatal.
    TryBatch,
}

impl ExecutionMode {
    /// String representation (matches the serde names).
    pub fn as_str(self) -> &'static str {
        match self {
            ExecutionMode::DefaultBatch => "default_batch",
            ExecutionMode::SingleCall => "single_call",
            ExecutionMode::TryBatch => "try_batch",
        }
    }
}

impl std::fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

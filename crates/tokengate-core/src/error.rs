//! Shared error type across tokengate crates.

use ethers_core::types::U256;
use thiserror::Error;

use crate::mode::ExecutionMode;

/// Stable check-failure codes (surface API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckCode {
    /// Terms blob has the wrong shape.
    MalformedTerms,
    /// Check was invoked under an execution mode the guardrail does not support.
    UnsupportedExecutionMode,
    /// Upper-limit pre-check found the balance at or above the threshold.
    UpperLimitExceeded,
    /// Lower-limit post-check found the balance at or below the threshold.
    LowerLimitViolated,
    /// Balance oracle failed; carried opaquely.
    OracleFailure,
    /// Caveat names an enforcer kind that was never registered.
    UnknownEnforcer,
    /// Guarded batch failed to apply.
    ExecutionFailed,
    /// Invalid input / malformed scenario.
    BadRequest,
    /// Internal error.
    Internal,
}

impl CheckCode {
    /// String representation used in reports and test vectors.
    pub fn as_str(self) -> &'static str {
        match self {
            CheckCode::MalformedTerms => "MALFORMED_TERMS",
            CheckCode::UnsupportedExecutionMode => "UNSUPPORTED_EXECUTION_MODE",
            CheckCode::UpperLimitExceeded => "UPPER_LIMIT_EXCEEDED",
            CheckCode::LowerLimitViolated => "LOWER_LIMIT_VIOLATED",
            CheckCode::OracleFailure => "ORACLE_FAILURE",
            CheckCode::UnknownEnforcer => "UNKNOWN_ENFORCER",
            CheckCode::ExecutionFailed => "EXECUTION_FAILED",
            CheckCode::BadRequest => "BAD_REQUEST",
            CheckCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, TokenGateError>;

/// Unified error type used by core and harness.
///
/// Every variant is immediately fatal to the guarded batch it belongs to;
/// nothing here is retried.
#[derive(Debug, Error)]
pub enum TokenGateError {
    #[error("malformed terms: {0}")]
    MalformedTerms(String),
    #[error("unsupported execution mode: {0}")]
    UnsupportedExecutionMode(ExecutionMode),
    #[error("upper limit exceeded: balance {balance} is not below threshold {threshold}")]
    UpperLimitExceeded { balance: U256, threshold: U256 },
    #[error("lower limit violated: balance {balance} is not above threshold {threshold}")]
    LowerLimitViolated { balance: U256, threshold: U256 },
    #[error("balance oracle failure: {0}")]
    Oracle(String),
    #[error("unknown enforcer: {0}")]
    UnknownEnforcer(String),
    #[error("execution failed: {0}")]
    Execution(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl TokenGateError {
    /// Map internal error to a stable surface code.
    pub fn check_code(&self) -> CheckCode {
        match self {
            TokenGateError::MalformedTerms(_) => CheckCode::MalformedTerms,
            TokenGateError::UnsupportedExecutionMode(_) => CheckCode::UnsupportedExecutionMode,
            TokenGateError::UpperLimitExceeded { .. } => CheckCode::UpperLimitExceeded,
            TokenGateError::LowerLimitViolated { .. } => CheckCode::LowerLimitViolated,
            TokenGateError::Oracle(_) => CheckCode::OracleFailure,
            TokenGateError::UnknownEnforcer(_) => CheckCode::UnknownEnforcer,
            TokenGateError::Execution(_) => CheckCode::ExecutionFailed,
            TokenGateError::BadRequest(_) => CheckCode::BadRequest,
            TokenGateError::Internal(_) => CheckCode::Internal,
        }
    }
}

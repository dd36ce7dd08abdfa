//! tokengate core: terms wire format, execution modes, the balance oracle
//! seam, and the pre/post guardrail checks.
//!
//! This crate defines the 73-byte balance-envelope terms blob and the
//! stateless checks an authorization framework invokes around a guarded
//! batch. It intentionally carries no I/O or runtime dependencies so it can
//! be embedded in any framework able to supply a [`oracle::BalanceOracle`].
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `TokenGateError`/`Result` so a
//! malformed terms blob or a failing oracle can never crash the caller.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod checks;
pub mod error;
pub mod mode;
pub mod oracle;
pub mod terms;

/// Shared result type.
pub use error::{Result, TokenGateError};

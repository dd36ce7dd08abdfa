//! Balance oracle seam.

use ethers_core::types::{Address, U256};

use crate::error::Result;

/// Read-only view of fungible token balances.
///
/// The call is synchronous and either succeeds or fails atomically; the
/// checks in this crate perform at most one `balance_of` per invocation and
/// propagate failures instead of swallowing them.
///
/// Implementations must fail for a token identifier that does not resolve to
/// a known token. An unknown holder of a known token is balance zero.
pub trait BalanceOracle: Send + Sync {
    /// Current balance of `holder` for `token`.
    fn balance_of(&self, token: Address, holder: Address) -> Result<U256>;
}

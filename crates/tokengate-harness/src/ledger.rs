//! In-memory token ledger.
//!
//! The ledger plays two roles: it is the state the execution batch mutates,
//! and it answers balance queries as the [`BalanceOracle`] behind the caveat
//! checks. Unknown tokens fail the oracle; unknown holders of a known token
//! read as zero, the same answer a fresh account would get.

use dashmap::DashMap;
use ethers_core::types::{Address, U256};

use tokengate_core::error::{Result, TokenGateError};
use tokengate_core::oracle::BalanceOracle;

#[derive(Default)]
pub struct TokenLedger {
    tokens: DashMap<Address, TokenBook>,
}

struct TokenBook {
    symbol: String,
    balances: DashMap<Address, U256>,
}

impl TokenBook {
    fn credit(&self, holder: Address, amount: U256) -> Result<()> {
        let mut entry = self.balances.entry(holder).or_default();
        *entry = entry.checked_add(amount).ok_or_else(|| {
            TokenGateError::Execution(format!("balance overflow for holder {holder:?}"))
        })?;
        Ok(())
    }

    fn debit(&self, holder: Address, amount: U256) -> Result<()> {
        let mut entry = self.balances.entry(holder).or_default();
        *entry = entry.checked_sub(amount).ok_or_else(|| {
            TokenGateError::Execution(format!("insufficient funds for holder {holder:?}"))
        })?;
        Ok(())
    }
}

/// Point-in-time copy of every book, used to roll back failed redemptions.
pub struct LedgerSnapshot {
    books: Vec<SnapshotBook>,
}

struct SnapshotBook {
    token: Address,
    symbol: String,
    balances: Vec<(Address, U256)>,
}

impl TokenLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_token(&self, token: Address, symbol: &str) -> Result<()> {
        if self.tokens.contains_key(&token) {
            return Err(TokenGateError::BadRequest(format!(
                "token already registered: {token:?}"
            )));
        }
        self.tokens.insert(
            token,
            TokenBook {
                symbol: symbol.to_string(),
                balances: DashMap::new(),
            },
        );
        Ok(())
    }

    pub fn mint(&self, token: Address, to: Address, amount: U256) -> Result<()> {
        self.book(token)?.credit(to, amount)
    }

    pub fn burn(&self, token: Address, from: Address, amount: U256) -> Result<()> {
        self.book(token)?.debit(from, amount)
    }

    /// Move funds within one book. The debit is undone if the credit cannot
    /// land, so a failed transfer leaves both balances untouched.
    pub fn transfer(&self, token: Address, from: Address, to: Address, amount: U256) -> Result<()> {
        let book = self.book(token)?;
        book.debit(from, amount)?;
        if let Err(e) = book.credit(to, amount) {
            // Crediting back what was just debited cannot overflow.
            let _ = book.credit(from, amount);
            return Err(e);
        }
        Ok(())
    }

    /// Registered tokens, sorted by symbol for stable reporting.
    pub fn tokens(&self) -> Vec<(Address, String)> {
        let mut out: Vec<(Address, String)> = self
            .tokens
            .iter()
            .map(|entry| (*entry.key(), entry.value().symbol.clone()))
            .collect();
        out.sort_by(|a, b| a.1.cmp(&b.1));
        out
    }

    /// Holders of one token, sorted by address for stable reporting.
    pub fn holdings(&self, token: Address) -> Vec<(Address, U256)> {
        let mut out: Vec<(Address, U256)> = match self.tokens.get(&token) {
            Some(book) => book
                .balances
                .iter()
                .map(|entry| (*entry.key(), *entry.value()))
                .collect(),
            None => Vec::new(),
        };
        out.sort_by_key(|(holder, _)| *holder);
        out
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        let books = self
            .tokens
            .iter()
            .map(|entry| SnapshotBook {
                token: *entry.key(),
                symbol: entry.value().symbol.clone(),
                balances: entry
                    .value()
                    .balances
                    .iter()
                    .map(|b| (*b.key(), *b.value()))
                    .collect(),
            })
            .collect();
        LedgerSnapshot { books }
    }

    pub fn restore(&self, snapshot: &LedgerSnapshot) {
        self.tokens.clear();
        for book in &snapshot.books {
            let balances = DashMap::new();
            for (holder, amount) in &book.balances {
                balances.insert(*holder, *amount);
            }
            self.tokens.insert(
                book.token,
                TokenBook {
                    symbol: book.symbol.clone(),
                    balances,
                },
            );
        }
    }

    fn book(&self, token: Address) -> Result<dashmap::mapref::one::Ref<'_, Address, TokenBook>> {
        self.tokens
            .get(&token)
            .ok_or_else(|| TokenGateError::Execution(format!("unknown token: {token:?}")))
    }
}

impl BalanceOracle for TokenLedger {
    fn balance_of(&self, token: Address, holder: Address) -> Result<U256> {
        let book = self
            .tokens
            .get(&token)
            .ok_or_else(|| TokenGateError::Oracle(format!("unknown token: {token:?}")))?;
        Ok(book
            .balances
            .get(&holder)
            .map(|entry| *entry.value())
            .unwrap_or_default())
    }
}

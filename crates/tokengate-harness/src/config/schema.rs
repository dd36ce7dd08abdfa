use std::collections::HashSet;

use bytes::Bytes;
use ethers_core::types::{Address, U256};
use serde::Deserialize;

use tokengate_core::error::{Result, TokenGateError};
use tokengate_core::mode::ExecutionMode;
use tokengate_core::terms::BalanceTerms;

use crate::exec::Operation;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    pub version: u32,

    pub tokens: Vec<TokenSetup>,

    #[serde(default)]
    pub redemptions: Vec<RedemptionSpec>,
}

impl Scenario {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(TokenGateError::BadRequest(format!(
                "unsupported scenario version: {}",
                self.version
            )));
        }
        if self.tokens.is_empty() {
            return Err(TokenGateError::BadRequest("tokens must not be empty".into()));
        }

        let mut seen = HashSet::new();
        for token in &self.tokens {
            if !seen.insert(token.address) {
                return Err(TokenGateError::BadRequest(format!(
                    "duplicate token address: {:?}",
                    token.address
                )));
            }
        }

        for redemption in &self.redemptions {
            redemption.validate()?;
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TokenSetup {
    pub address: Address,
    pub symbol: String,

    #[serde(default)]
    pub balances: Vec<BalanceSetup>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BalanceSetup {
    pub account: Address,
    pub amount: u64,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RedemptionSpec {
    pub label: String,
    pub subject: Address,

    #[serde(default)]
    pub mode: ExecutionMode,

    #[serde(default)]
    pub caveats: Vec<CaveatSpec>,

    #[serde(default)]
    pub ops: Vec<Operation>,
}

impl RedemptionSpec {
    pub fn validate(&self) -> Result<()> {
        if self.label.is_empty() {
            return Err(TokenGateError::BadRequest(
                "redemption label must not be empty".into(),
            ));
        }
        // Terms must at least be decodable hex. Length is deliberately not
        // checked here; a wrong-sized blob is the enforcer's verdict to give.
        for caveat in &self.caveats {
            caveat.terms.to_blob()?;
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CaveatSpec {
    pub enforcer: String,
    pub terms: TermsSpec,
}

/// Caveat terms, either raw hex or spelled out field by field.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum TermsSpec {
    Hex(String),
    Structured(TermsFields),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TermsFields {
    pub direction: Direction,
    pub token: Address,
    pub recipient: Address,
    pub threshold: u64,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Upper,
    Lower,
}

impl TermsSpec {
    /// Render into the packed blob the enforcer consumes.
    pub fn to_blob(&self) -> Result<Bytes> {
        match self {
            TermsSpec::Hex(s) => {
                let raw = hex::decode(s.trim_start_matches("0x")).map_err(|e| {
                    TokenGateError::BadRequest(format!("invalid terms hex: {e}"))
                })?;
                Ok(Bytes::from(raw))
            }
            TermsSpec::Structured(fields) => Ok(BalanceTerms {
                enforce_lower: matches!(fields.direction, Direction::Lower),
                token: fields.token,
                recipient: fields.recipient,
                threshold: U256::from(fields.threshold),
            }
            .encode()),
        }
    }
}

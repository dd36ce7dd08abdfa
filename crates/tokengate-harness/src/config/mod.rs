//! Scenario config loader (strict parsing).

pub mod schema;

use std::fs;

use tokengate_core::error::{Result, TokenGateError};

pub use schema::{
    BalanceSetup, CaveatSpec, Direction, RedemptionSpec, Scenario, TermsFields, TermsSpec,
    TokenSetup,
};

pub fn load_from_file(path: &str) -> Result<Scenario> {
    let s = fs::read_to_string(path)
        .map_err(|e| TokenGateError::Internal(format!("read scenario failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<Scenario> {
    let scenario: Scenario = serde_yaml::from_str(s)
        .map_err(|e| TokenGateError::BadRequest(format!("invalid yaml: {e}")))?;
    scenario.validate()?;
    Ok(scenario)
}

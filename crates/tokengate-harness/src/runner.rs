//! Scenario runner.
//!
//! Seeds a fresh ledger from the scenario, redeems each delegation in order,
//! and collects per-redemption outcomes. Redemptions are independent: a
//! failed one is rolled back by the manager and the next still runs.

use ethers_core::types::U256;

use tokengate_core::error::Result;

use crate::caveat::Caveat;
use crate::config::{RedemptionSpec, Scenario};
use crate::exec::ExecutionBatch;
use crate::ledger::TokenLedger;
use crate::manager::{DelegationManager, Redemption};

pub struct ScenarioReport {
    pub ledger: TokenLedger,
    pub outcomes: Vec<RedemptionOutcome>,
}

pub struct RedemptionOutcome {
    pub label: String,
    pub result: Result<usize>,
}

impl RedemptionOutcome {
    pub fn committed(&self) -> bool {
        self.result.is_ok()
    }
}

/// Build the ledger a scenario starts from.
pub fn seed_ledger(scenario: &Scenario) -> Result<TokenLedger> {
    let ledger = TokenLedger::new();
    for token in &scenario.tokens {
        ledger.register_token(token.address, &token.symbol)?;
        for balance in &token.balances {
            ledger.mint(token.address, balance.account, U256::from(balance.amount))?;
        }
    }
    Ok(ledger)
}

/// Run every redemption in the scenario against one seeded ledger.
pub fn run_scenario(manager: &DelegationManager, scenario: &Scenario) -> Result<ScenarioReport> {
    let ledger = seed_ledger(scenario)?;

    let mut outcomes = Vec::with_capacity(scenario.redemptions.len());
    for spec in &scenario.redemptions {
        let result =
            build_redemption(spec).and_then(|redemption| manager.redeem(&ledger, &redemption));
        outcomes.push(RedemptionOutcome {
            label: spec.label.clone(),
            result,
        });
    }

    Ok(ScenarioReport { ledger, outcomes })
}

fn build_redemption(spec: &RedemptionSpec) -> Result<Redemption> {
    let mut caveats = Vec::with_capacity(spec.caveats.len());
    for caveat in &spec.caveats {
        caveats.push(Caveat {
            enforcer: caveat.enforcer.clone(),
            terms: caveat.terms.to_blob()?,
        });
    }

    Ok(Redemption {
        label: spec.label.clone(),
        subject: spec.subject,
        mode: spec.mode,
        caveats,
        batch: ExecutionBatch::new(spec.ops.clone()),
    })
}

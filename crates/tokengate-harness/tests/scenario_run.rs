#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;

use ethers_core::types::{Address, U256};

use tokengate_core::oracle::BalanceOracle;
use tokengate_harness::manager::DelegationManager;
use tokengate_harness::obs::metrics::HarnessMetrics;
use tokengate_harness::{config, runner};

const SCENARIO: &str = r#"
version: 1
tokens:
  - address: "0x00000000000000000000000000000000000000aa"
    symbol: "GLD"
    balances:
      - account: "0x0000000000000000000000000000000000000001"
        amount: 200
redemptions:
  - label: "keep-a-floor"
    subject: "0x0000000000000000000000000000000000000001"
    caveats:
      - enforcer: "balance-envelope"
        terms:
          direction: lower
          token: "0x00000000000000000000000000000000000000aa"
          recipient: "0x0000000000000000000000000000000000000002"
          threshold: 100
    ops:
      - op: transfer
        token: "0x00000000000000000000000000000000000000aa"
        to: "0x0000000000000000000000000000000000000002"
        amount: 50
  - label: "overspend-is-undone"
    subject: "0x0000000000000000000000000000000000000001"
    caveats:
      - enforcer: "balance-envelope"
        terms:
          direction: lower
          token: "0x00000000000000000000000000000000000000aa"
          recipient: "0x0000000000000000000000000000000000000002"
          threshold: 100
    ops:
      - op: transfer
        token: "0x00000000000000000000000000000000000000aa"
        to: "0x0000000000000000000000000000000000000002"
        amount: 100
"#;

#[test]
fn scenario_runs_each_redemption_independently() {
    let scenario = config::load_from_str(SCENARIO).expect("scenario must parse");

    let metrics = Arc::new(HarnessMetrics::default());
    let manager = DelegationManager::new(Arc::clone(&metrics));
    let report = runner::run_scenario(&manager, &scenario).expect("run must start");

    assert_eq!(report.outcomes.len(), 2);

    // First spend commits: 200 -> 150 stays above the floor of 100.
    assert!(report.outcomes[0].committed());
    assert_eq!(report.outcomes[0].label, "keep-a-floor");

    // Second spend would land exactly on the floor (150 - 100 = 50) and is
    // rolled back, leaving the first redemption's result intact.
    assert!(!report.outcomes[1].committed());
    let err = report.outcomes[1].result.as_ref().expect_err("must fail");
    assert_eq!(err.check_code().as_str(), "LOWER_LIMIT_VIOLATED");

    let token: Address = "0x00000000000000000000000000000000000000aa".parse().unwrap();
    let alice: Address = "0x0000000000000000000000000000000000000001".parse().unwrap();
    let bob: Address = "0x0000000000000000000000000000000000000002".parse().unwrap();

    assert_eq!(report.ledger.balance_of(token, alice).unwrap(), U256::from(150u64));
    assert_eq!(report.ledger.balance_of(token, bob).unwrap(), U256::from(50u64));

    assert_eq!(metrics.redemptions.value(&[("outcome", "committed")]), 1);
    assert_eq!(metrics.redemptions.value(&[("outcome", "rolled_back")]), 1);
    assert_eq!(metrics.ops_applied.value(&[]), 1);
}

#[test]
fn hex_terms_flow_through_to_the_enforcer() {
    // Same floor caveat, but spelled as the packed 73-byte blob. A wrong
    // length would only surface at redemption time with MALFORMED_TERMS.
    let scenario_yaml = r#"
version: 1
tokens:
  - address: "0x00000000000000000000000000000000000000aa"
    symbol: "GLD"
    balances:
      - account: "0x0000000000000000000000000000000000000001"
        amount: 200
redemptions:
  - label: "truncated-terms"
    subject: "0x0000000000000000000000000000000000000001"
    caveats:
      - enforcer: "balance-envelope"
        terms: "0x01aaaa"
"#;
    let scenario = config::load_from_str(scenario_yaml).expect("scenario must parse");

    let metrics = Arc::new(HarnessMetrics::default());
    let manager = DelegationManager::new(Arc::clone(&metrics));
    let report = runner::run_scenario(&manager, &scenario).expect("run must start");

    let err = report.outcomes[0].result.as_ref().expect_err("short blob must fail");
    assert_eq!(err.check_code().as_str(), "MALFORMED_TERMS");
    assert_eq!(metrics.check_failures.value(&[("code", "MALFORMED_TERMS")]), 1);
}

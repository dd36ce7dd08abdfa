//! tokengate scenario runner.
//!
//! - Load a YAML scenario (strict parsing + validate)
//! - Seed the in-memory ledger
//! - Redeem each delegation under its caveat checks
//! - Print outcomes, final balances, and metrics

use std::sync::Arc;

use tracing_subscriber::{fmt, EnvFilter};

use tokengate_harness::manager::DelegationManager;
use tokengate_harness::obs::metrics::HarnessMetrics;
use tokengate_harness::{config, runner};

fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "tokengate.yaml".to_string());
    let scenario = config::load_from_file(&path).expect("scenario load failed");

    let metrics = Arc::new(HarnessMetrics::default());
    let manager = DelegationManager::new(Arc::clone(&metrics));

    tracing::info!(%path, redemptions = scenario.redemptions.len(), "tokengate harness starting");
    let report = runner::run_scenario(&manager, &scenario).expect("scenario run failed");

    for outcome in &report.outcomes {
        match &outcome.result {
            Ok(applied) => println!("[PASS] {} ({applied} ops applied)", outcome.label),
            Err(e) => println!("[FAIL] {} ({}: {e})", outcome.label, e.check_code().as_str()),
        }
    }

    println!();
    println!("final balances:");
    for (token, symbol) in report.ledger.tokens() {
        for (holder, amount) in report.ledger.holdings(token) {
            println!("  {symbol} {holder:?}: {amount}");
        }
    }

    println!();
    print!("{}", metrics.render());
}

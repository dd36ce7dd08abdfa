//! Lightweight in-process metrics (dependency-free).
//!
//! Counters are atomics keyed by sorted label sets, rendered in Prometheus
//! text format by the scenario binary after a run.

pub mod metrics;

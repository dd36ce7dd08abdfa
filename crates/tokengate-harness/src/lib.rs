//! tokengate harness library entry.
//!
//! This crate wires the ledger, enforcer registry, delegation manager, and
//! scenario runner into a cohesive redemption stack. It is intended to be
//! consumed by the binary (`main.rs`) and by integration tests.

pub mod caveat;
pub mod config;
pub mod enforcers;
pub mod exec;
pub mod ledger;
pub mod manager;
pub mod obs;
pub mod runner;

//! Top-level facade crate for tokengate.
//!
//! Re-exports the core checks and the harness library so users can depend on
//! a single crate.

pub mod core {
    pub use tokengate_core::*;
}

pub mod harness {
    pub use tokengate_harness::*;
}

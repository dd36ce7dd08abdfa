//! Built-in caveat enforcers.

pub mod balance_envelope;

pub use balance_envelope::BalanceEnvelopeEnforcer;

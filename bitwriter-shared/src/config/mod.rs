//! # Configuration
//!
//! Settings that shape how a session is bootstrapped and torn down. Values are
//! platform independent; the web client fills them in from its build environment.

/// Session bootstrap and logout settings.
pub mod session;

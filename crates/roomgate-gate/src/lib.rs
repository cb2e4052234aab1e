//! # roomgate-gate
//!
//! The access gate itself: a bounded-timeout HTTP lookup against the
//! external authorization service, the fail-open policy that collapses
//! every remote failure to "allow", and the pre-join hook that vetoes
//! joins for rooms the service reports as gone.

pub mod client;
pub mod gate;
pub mod hook;

pub use client::{AccessCheckClient, AccessChecker, AccessResult};
pub use gate::AccessGate;
pub use hook::AccessGateHook;

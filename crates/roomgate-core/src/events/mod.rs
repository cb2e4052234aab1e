//! Domain events exchanged with the host conferencing server.

pub mod join;

pub use join::{HookDecision, JoinRejection, PreJoinEvent};

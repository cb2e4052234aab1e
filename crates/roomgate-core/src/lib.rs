//! # roomgate-core
//!
//! Core crate for Roomgate. Contains configuration schemas, the pre-join
//! event and hook model, the injectable clock, and the unified error
//! system.
//!
//! This crate has **no** internal dependencies on other Roomgate crates.

pub mod config;
pub mod error;
pub mod events;
pub mod hooks;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;

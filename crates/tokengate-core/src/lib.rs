//! # tokengate-core
//!
//! Core crate for Tokengate. Holds the configuration schemas and the
//! unified error type shared by every other crate in the workspace.
//!
//! This crate has **no** internal dependencies on other Tokengate crates.

pub mod config;
pub mod error;
pub mod result;

pub use error::AppError;
pub use result::AppResult;

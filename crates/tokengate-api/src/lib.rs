//! # tokengate-api
//!
//! HTTP layer for Tokengate: the Axum router, the authentication middleware
//! that runs the gate on every request, handlers, and DTOs.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::{ApiError, ApiResult};
pub use router::build_router;
pub use state::AppState;

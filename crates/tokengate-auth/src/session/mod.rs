//! Single-session enforcement and the account sign-in lifecycle.

pub mod manager;
pub mod policy;

pub use manager::{NewAccount, SessionManager, SignInResult};
pub use policy::{ResolvedToken, SingleSessionPolicy};

//! # tokengate-auth
//!
//! Token-based authentication with a single live session per account.
//!
//! ## Modules
//!
//! - `jwt`: signed session token issuance, decoding, and validation
//! - `password`: Argon2id password hashing and policy enforcement
//! - `identity`: authenticated principal view and identity resolution
//! - `session`: single-session policy and the sign-in lifecycle
//! - `gate`: per-request authentication and path-based access rules

pub mod gate;
pub mod identity;
pub mod jwt;
pub mod password;
pub mod session;

pub use gate::{
    AccessDecision, AccessRules, AuthenticationGate, GateOutcome, RejectReason, Requirement,
};
pub use identity::{IdentityResolver, Principal, StoreIdentityResolver};
pub use jwt::{Claims, InvalidReason, SigningSecret, TokenCodec, TokenValidity};
pub use password::{PasswordHasher, PasswordValidator};
pub use session::{NewAccount, ResolvedToken, SessionManager, SignInResult, SingleSessionPolicy};

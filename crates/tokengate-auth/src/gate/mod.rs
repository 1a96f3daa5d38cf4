//! Request authentication gate and path-based access rules.

pub mod authenticator;
pub mod rules;

pub use authenticator::{AccessDecision, AuthenticationGate, GateOutcome, RejectReason};
pub use rules::{AccessRule, AccessRules, PathPattern, Requirement};

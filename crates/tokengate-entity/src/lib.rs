//! # tokengate-entity
//!
//! Domain entity models for Tokengate. The only persisted entity is the
//! user record, which also carries the single current session token.

pub mod user;

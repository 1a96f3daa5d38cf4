//! Authenticated principals and how they are loaded.

pub mod principal;
pub mod resolver;

pub use principal::Principal;
pub use resolver::{IdentityResolver, StoreIdentityResolver};

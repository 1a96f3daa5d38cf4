//! # tokengate-database
//!
//! PostgreSQL connection management and storage for user records.
//!
//! [`UserStore`] is the seam the auth layer depends on. It is implemented by
//! [`UserRepository`] (PostgreSQL) and [`MemoryUserStore`] (in-process).

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryUserStore;
pub use repositories::UserRepository;
pub use store::UserStore;

//! In-memory data stores.
//!
//! Both stores are built once at startup and never mutated afterwards, so they
//! are shared across request handlers without locking.

pub mod interactions;
pub mod sample;
pub mod users;

pub use interactions::InteractionStore;
pub use users::UserRegistry;

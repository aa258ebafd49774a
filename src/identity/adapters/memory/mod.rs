//! In-memory adapters for accounts and sessions.

mod accounts;

pub use accounts::InMemoryAccountStore;

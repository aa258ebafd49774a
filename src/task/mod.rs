//! Personal tasks and the task status machine for Chantier.
//!
//! A personal task belongs to exactly one user, carries a validated schedule,
//! and moves between `A faire`, `En cours`, and `Terminé`. The status
//! machine, details, and schedule types defined here are shared with
//! project tasks. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;

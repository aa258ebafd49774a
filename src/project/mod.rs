//! Shared projects, project tasks, and the collaboration workflow.
//!
//! A project is owned by one user, who is implicitly its `Admin`. Other
//! users join as collaborators with a [`domain::Role`], either directly or by
//! accepting an invitation. Every operation resolves the caller's role
//! through [`domain::role_of`] and checks it against the capability table in
//! [`domain::Role::grants`] before touching storage.
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

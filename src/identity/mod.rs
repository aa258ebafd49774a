//! Accounts and authenticated identities for Chantier.
//!
//! Users register with an email address and a password, log in to obtain an
//! opaque credential, and present that credential to be resolved into an
//! [`domain::Identity`]. Every other service takes that identity as an
//! explicit parameter; nothing here keeps ambient session state. The module
//! follows hexagonal architecture:
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

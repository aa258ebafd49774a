//! Step definitions for project collaboration scenarios.

mod given;
mod then;
mod when;
pub mod world;

//! Step definitions for personal task status scenarios.

mod given;
mod then;
mod when;
pub mod world;

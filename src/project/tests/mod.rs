//! Unit tests for the project context.

mod support;

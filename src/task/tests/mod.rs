//! Unit tests for the personal task context.

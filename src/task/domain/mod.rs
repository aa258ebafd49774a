//! Domain model for personal tasks.
//!
//! Validation of titles, descriptions, and date ranges happens when values
//! are constructed from user input. Values rebuilt from storage are trusted
//! and never re-validated.

mod details;
mod error;
mod ids;
mod schedule;
mod status;
mod task;

pub use details::Details;
pub use error::{ParseTaskStatusError, TaskDomainError};
pub use ids::TaskId;
pub use schedule::Schedule;
pub use status::{TRANSITIONS, TaskStatus};
pub use task::{PersistedTaskData, Task, TaskEdit};

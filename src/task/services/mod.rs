//! Application services for personal task orchestration.

mod lifecycle;

pub use lifecycle::{
    ChangeStatusRequest, CreateTaskRequest, EditTaskRequest, TaskLifecycleError,
    TaskLifecycleResult, TaskLifecycleService,
};

//! Shared world state for personal task status BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use chantier::ErrorKind;
use chantier::identity::domain::Identity;
use chantier::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::Task,
    services::{TaskLifecycleResult, TaskLifecycleService},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Service type used by the BDD world.
pub type TestTaskService = TaskLifecycleService<InMemoryTaskRepository, DefaultClock>;

/// Scenario world for task status behaviour tests.
pub struct TaskStatusWorld {
    pub service: TestTaskService,
    pub identities: HashMap<String, Identity>,
    pub owner: Option<Identity>,
    pub created: Option<Task>,
    pub last_change: Option<TaskLifecycleResult<Task>>,
}

impl TaskStatusWorld {
    /// Creates a world with an empty task store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            service: TaskLifecycleService::new(
                Arc::new(InMemoryTaskRepository::new()),
                Arc::new(DefaultClock),
            ),
            identities: HashMap::new(),
            owner: None,
            created: None,
            last_change: None,
        }
    }

    /// Returns the task created by the background steps.
    pub fn created(&self) -> Result<&Task, eyre::Report> {
        self.created
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing created task in scenario world"))
    }

    /// Returns the owner of the scenario task.
    pub fn owner(&self) -> Result<&Identity, eyre::Report> {
        self.owner
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing task owner in scenario world"))
    }

    /// Returns the failure category of the last status change.
    pub fn last_failure(&self) -> Option<ErrorKind> {
        match self.last_change {
            Some(Err(ref err)) => Some(err.kind()),
            _ => None,
        }
    }
}

impl Default for TaskStatusWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskStatusWorld {
    TaskStatusWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

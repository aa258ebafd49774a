//! Shared world state for project collaboration BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use chantier::ErrorKind;
use chantier::config::AccountSettings;
use chantier::identity::{
    adapters::memory::InMemoryAccountStore, domain::Identity, services::AccountService,
};
use chantier::project::{
    adapters::memory::InMemoryProjectStore,
    domain::{InvitationId, Project, ProjectTaskId},
    services::{CollaborationService, ProjectService, ProjectTaskService},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Scenario world for collaboration behaviour tests.
pub struct CollaborationWorld {
    pub accounts: AccountService<InMemoryAccountStore, DefaultClock>,
    pub projects: ProjectService<InMemoryProjectStore, DefaultClock>,
    pub tasks: ProjectTaskService<InMemoryProjectStore, DefaultClock>,
    pub collaboration:
        CollaborationService<InMemoryProjectStore, InMemoryAccountStore, DefaultClock>,
    pub identities: HashMap<String, Identity>,
    pub project: Option<Project>,
    pub task_ids: HashMap<String, ProjectTaskId>,
    pub last_invitation: Option<InvitationId>,
    pub last_outcome: Option<Result<(), ErrorKind>>,
}

impl CollaborationWorld {
    /// Creates a world over empty in-memory stores.
    ///
    /// # Panics
    ///
    /// Panics when the fixed hashing parameters are rejected.
    #[must_use]
    #[expect(
        clippy::expect_used,
        reason = "Fixtures cannot return errors and the parameters are fixed"
    )]
    pub fn new() -> Self {
        let users = Arc::new(InMemoryAccountStore::new());
        let store = Arc::new(InMemoryProjectStore::new());
        let clock = Arc::new(DefaultClock);
        let settings = AccountSettings {
            password_memory_kib: 1024,
            password_iterations: 1,
            password_parallelism: 1,
            ..AccountSettings::default()
        };
        Self {
            accounts: AccountService::new(Arc::clone(&users), Arc::clone(&clock), &settings)
                .expect("valid hashing parameters"),
            projects: ProjectService::new(Arc::clone(&store), Arc::clone(&clock)),
            tasks: ProjectTaskService::new(Arc::clone(&store), Arc::clone(&clock)),
            collaboration: CollaborationService::new(store, users, clock),
            identities: HashMap::new(),
            project: None,
            task_ids: HashMap::new(),
            last_invitation: None,
            last_outcome: None,
        }
    }

    /// Returns the identity registered for `email`.
    pub fn identity(&self, email: &str) -> Result<Identity, eyre::Report> {
        self.identities
            .get(email)
            .cloned()
            .ok_or_else(|| eyre::eyre!("{email} is not registered in this scenario"))
    }

    /// Returns the scenario project.
    pub fn project(&self) -> Result<&Project, eyre::Report> {
        self.project
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing project in scenario world"))
    }

    /// Records the outcome of the operation under test.
    pub fn record<T, E>(&mut self, result: Result<T, E>, kind: impl Fn(&E) -> ErrorKind) {
        self.last_outcome = Some(result.map(|_| ()).map_err(|err| kind(&err)));
    }
}

impl Default for CollaborationWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> CollaborationWorld {
    CollaborationWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

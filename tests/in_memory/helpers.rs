//! Shared wiring for in-memory integration tests.

use std::sync::Arc;

use chantier::config::AccountSettings;
use chantier::identity::{
    adapters::memory::InMemoryAccountStore,
    domain::Identity,
    services::{AccountService, LoginRequest, RegisterUserRequest},
};
use chantier::project::{
    adapters::memory::InMemoryProjectStore,
    services::{CollaborationService, ProjectService, ProjectTaskService},
};
use chantier::task::{adapters::memory::InMemoryTaskRepository, services::TaskLifecycleService};
use chrono::{Days, NaiveDate, Utc};
use eyre::WrapErr;
use mockable::DefaultClock;

/// Password used by every registered test user.
pub const PASSWORD: &str = "correct horse battery";

/// Every service wired over shared in-memory stores.
pub struct Workspace {
    pub accounts: AccountService<InMemoryAccountStore, DefaultClock>,
    pub tasks: TaskLifecycleService<InMemoryTaskRepository, DefaultClock>,
    pub projects: ProjectService<InMemoryProjectStore, DefaultClock>,
    pub project_tasks: ProjectTaskService<InMemoryProjectStore, DefaultClock>,
    pub collaboration:
        CollaborationService<InMemoryProjectStore, InMemoryAccountStore, DefaultClock>,
}

impl Workspace {
    /// Wires a fresh workspace with cheap hashing parameters.
    pub fn new() -> Result<Self, eyre::Report> {
        let users = Arc::new(InMemoryAccountStore::new());
        let store = Arc::new(InMemoryProjectStore::new());
        let clock = Arc::new(DefaultClock);
        let settings = AccountSettings {
            password_memory_kib: 1024,
            password_iterations: 1,
            password_parallelism: 1,
            ..AccountSettings::default()
        };
        Ok(Self {
            accounts: AccountService::new(Arc::clone(&users), Arc::clone(&clock), &settings)
                .wrap_err("build account service")?,
            tasks: TaskLifecycleService::new(
                Arc::new(InMemoryTaskRepository::new()),
                Arc::clone(&clock),
            ),
            projects: ProjectService::new(Arc::clone(&store), Arc::clone(&clock)),
            project_tasks: ProjectTaskService::new(Arc::clone(&store), Arc::clone(&clock)),
            collaboration: CollaborationService::new(store, users, clock),
        })
    }

    /// Registers `email` and resolves a fresh login credential into an
    /// identity, the way a caller would.
    pub async fn sign_up(&self, email: &str) -> Result<Identity, eyre::Report> {
        let first_name = email.split('@').next().unwrap_or(email);
        self.accounts
            .register(RegisterUserRequest::new(
                email,
                "Martin",
                first_name,
                "0102030405",
                PASSWORD,
            ))
            .await
            .wrap_err_with(|| format!("register {email}"))?;
        let session = self
            .accounts
            .login(LoginRequest::new(email, PASSWORD))
            .await
            .wrap_err_with(|| format!("log in {email}"))?;
        self.accounts
            .authenticate(session.credential())
            .await
            .wrap_err("resolve credential")
    }
}

/// Returns the date `n` days from today.
pub fn in_days(n: u64) -> Result<NaiveDate, eyre::Report> {
    Utc::now()
        .date_naive()
        .checked_add_days(Days::new(n))
        .ok_or_else(|| eyre::eyre!("date out of range"))
}

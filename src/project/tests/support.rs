//! Shared fixtures for project service tests.

use std::sync::Arc;

use crate::config::AccountSettings;
use crate::identity::{
    adapters::memory::InMemoryAccountStore,
    domain::{EmailAddress, Identity},
    services::{AccountService, RegisterUserRequest},
};
use crate::project::{
    adapters::memory::InMemoryProjectStore,
    domain::Project,
    services::{CollaborationService, CreateProjectRequest, ProjectService, ProjectTaskService},
};
use chrono::{Days, NaiveDate, Utc};
use mockable::DefaultClock;

pub(super) type Collaboration =
    CollaborationService<InMemoryProjectStore, InMemoryAccountStore, DefaultClock>;

/// Wired services over shared in-memory stores.
pub(super) struct Harness {
    pub accounts: AccountService<InMemoryAccountStore, DefaultClock>,
    pub projects: ProjectService<InMemoryProjectStore, DefaultClock>,
    pub tasks: ProjectTaskService<InMemoryProjectStore, DefaultClock>,
    pub collaboration: Collaboration,
    pub store: Arc<InMemoryProjectStore>,
}

impl Harness {
    pub(super) fn new() -> Self {
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
            collaboration: CollaborationService::new(Arc::clone(&store), users, clock),
            store,
        }
    }

    /// Registers a user named after the local part of `email`.
    pub(super) async fn register(&self, email: &str) -> Identity {
        let name = email.split('@').next().unwrap_or(email);
        let user = self
            .accounts
            .register(RegisterUserRequest::new(
                email,
                "Tester",
                name,
                "0600000000",
                "long enough password",
            ))
            .await
            .expect("registration succeeds");
        Identity::new(user.email().clone())
    }

    pub(super) async fn create_project(&self, owner: &Identity, title: &str) -> Project {
        self.projects
            .create_project(
                owner,
                CreateProjectRequest::new(title, "Shared work", in_days(0), in_days(30)),
            )
            .await
            .expect("project creation succeeds")
    }
}

pub(super) fn email(raw: &str) -> EmailAddress {
    EmailAddress::new(raw).expect("valid email")
}

pub(super) fn in_days(n: u64) -> NaiveDate {
    Utc::now()
        .date_naive()
        .checked_add_days(Days::new(n))
        .expect("date in range")
}

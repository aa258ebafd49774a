//! Shared wiring for the embedded `PostgreSQL` tests.

use std::sync::Arc;

use chantier::config::AccountSettings;
use chantier::db::{MIGRATIONS, PgPool};
use chantier::identity::{
    adapters::postgres::PostgresAccountStore,
    domain::{EmailAddress, Identity},
    services::{AccountService, RegisterUserRequest},
};
use chantier::project::{
    adapters::postgres::PostgresProjectStore,
    domain::Project,
    services::{CollaborationService, CreateProjectRequest, ProjectService, ProjectTaskService},
};
use chantier::task::{adapters::postgres::PostgresTaskRepository, services::TaskLifecycleService};
use chrono::{Days, NaiveDate, Utc};
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use mockable::DefaultClock;
use pg_embedded_setup_unpriv::TestCluster;
use tokio::runtime::Runtime;

/// Boxed error used by the setup helpers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Template database name for the pre-migrated schema.
pub const TEMPLATE_DB: &str = "chantier_test_template";

/// Password used by every registered test user.
pub const PASSWORD: &str = "correct horse battery";

/// Creates a tokio runtime for async operations in tests.
pub fn test_runtime() -> Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to create test runtime")
}

/// Ensures the template database exists with every migration applied.
pub fn ensure_template(cluster: &TestCluster) -> Result<(), BoxError> {
    cluster
        .ensure_template_exists(TEMPLATE_DB, |db_name| {
            let url = cluster.connection().database_url(db_name);
            let mut conn = PgConnection::establish(&url).map_err(|e| eyre::eyre!("{e}"))?;
            for (name, sql) in MIGRATIONS {
                conn.batch_execute(sql)
                    .map_err(|e| eyre::eyre!("migration {name} failed: {e}"))?;
            }
            Ok(())
        })
        .map_err(|e| Box::new(e) as BoxError)?;
    Ok(())
}

/// Guard that drops the test database even if the test panics.
///
/// Declare it before anything holding a pool so the connections close
/// first.
pub struct CleanupGuard {
    cluster: &'static TestCluster,
    db_name: String,
}

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        if let Err(e) = self.cluster.drop_database(self.db_name.as_str()) {
            eprintln!("Warning: failed to drop test database {}: {e}", self.db_name);
        }
    }
}

/// Clones a fresh database from the template and returns its cleanup guard
/// and a small pool.
pub fn fresh_database(
    cluster: &'static TestCluster,
    prefix: &str,
) -> Result<(CleanupGuard, PgPool), BoxError> {
    ensure_template(cluster)?;
    let db_name = format!("{prefix}_{}", uuid::Uuid::new_v4().simple());
    cluster
        .create_database_from_template(db_name.as_str(), TEMPLATE_DB)
        .map_err(|e| Box::new(e) as BoxError)?;
    let guard = CleanupGuard {
        cluster,
        db_name: db_name.clone(),
    };

    let url = cluster.connection().database_url(&db_name);
    let manager = ConnectionManager::<PgConnection>::new(url);
    let pool = Pool::builder()
        .max_size(2)
        .build(manager)
        .map_err(|e| Box::new(e) as BoxError)?;
    Ok((guard, pool))
}

/// Every service wired over the `PostgreSQL` adapters of one database.
pub struct Services {
    pub accounts: AccountService<PostgresAccountStore, DefaultClock>,
    pub tasks: TaskLifecycleService<PostgresTaskRepository, DefaultClock>,
    pub projects: ProjectService<PostgresProjectStore, DefaultClock>,
    pub project_tasks: ProjectTaskService<PostgresProjectStore, DefaultClock>,
    pub collaboration:
        CollaborationService<PostgresProjectStore, PostgresAccountStore, DefaultClock>,
    pub store: Arc<PostgresProjectStore>,
}

impl Services {
    /// Wires the services with cheap hashing parameters.
    pub fn new(pool: &PgPool) -> Self {
        let users = Arc::new(PostgresAccountStore::new(pool.clone()));
        let store = Arc::new(PostgresProjectStore::new(pool.clone()));
        let clock = Arc::new(DefaultClock);
        let settings = AccountSettings {
            password_memory_kib: 1024,
            password_iterations: 1,
            password_parallelism: 1,
            ..AccountSettings::default()
        };
        Self {
            accounts: AccountService::new(Arc::clone(&users), Arc::clone(&clock), &settings)
                .expect("valid account settings"),
            tasks: TaskLifecycleService::new(
                Arc::new(PostgresTaskRepository::new(pool.clone())),
                Arc::clone(&clock),
            ),
            projects: ProjectService::new(Arc::clone(&store), Arc::clone(&clock)),
            project_tasks: ProjectTaskService::new(Arc::clone(&store), Arc::clone(&clock)),
            collaboration: CollaborationService::new(Arc::clone(&store), users, clock),
            store,
        }
    }

    /// Registers a user named after the local part of `email`.
    pub async fn register(&self, email: &str) -> Identity {
        let first_name = email.split('@').next().unwrap_or(email);
        let user = self
            .accounts
            .register(RegisterUserRequest::new(
                email,
                "Martin",
                first_name,
                "0102030405",
                PASSWORD,
            ))
            .await
            .expect("registration succeeds");
        Identity::new(user.email().clone())
    }

    /// Creates a month-long project owned by `owner`.
    pub async fn create_project(&self, owner: &Identity, title: &str) -> Project {
        self.projects
            .create_project(
                owner,
                CreateProjectRequest::new(title, "Shared work", in_days(0), in_days(30)),
            )
            .await
            .expect("project creation succeeds")
    }
}

/// Parses a known-good email address.
pub fn email(raw: &str) -> EmailAddress {
    EmailAddress::new(raw).expect("valid email")
}

/// Returns the date `n` days from today.
pub fn in_days(n: u64) -> NaiveDate {
    Utc::now()
        .date_naive()
        .checked_add_days(Days::new(n))
        .expect("date in range")
}

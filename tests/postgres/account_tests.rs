//! Users and sessions against `PostgreSQL`.

use chantier::ErrorKind;
use chantier::identity::services::{AccountError, LoginRequest, RegisterUserRequest};
use pg_embedded_setup_unpriv::{TestCluster, test_support::shared_test_cluster};
use rstest::rstest;

use crate::postgres::helpers::{PASSWORD, Services, fresh_database, test_runtime};

#[rstest]
fn registered_user_logs_in_and_out(shared_test_cluster: &'static TestCluster) {
    let (_guard, pool) = fresh_database(shared_test_cluster, "accounts").expect("database setup");
    let services = Services::new(&pool);
    let rt = test_runtime();

    rt.block_on(async {
        let alice = services.register("Alice@Example.com").await;
        assert_eq!(alice.email().as_str(), "alice@example.com");

        let duplicate = services
            .accounts
            .register(RegisterUserRequest::new(
                "alice@example.com",
                "Martin",
                "Alice",
                "0102030405",
                PASSWORD,
            ))
            .await;
        assert_eq!(
            duplicate.expect_err("email already taken").kind(),
            ErrorKind::Conflict
        );

        let session = services
            .accounts
            .login(LoginRequest::new("alice@example.com", PASSWORD))
            .await
            .expect("login succeeds");
        let resolved = services
            .accounts
            .authenticate(session.credential())
            .await
            .expect("credential resolves");
        assert_eq!(resolved, alice);

        services
            .accounts
            .logout(session.credential())
            .await
            .expect("logout succeeds");
        let revoked = services.accounts.authenticate(session.credential()).await;
        assert!(matches!(revoked, Err(AccountError::UnknownCredential)));
    });
}

#[rstest]
fn stored_profile_is_read_back(shared_test_cluster: &'static TestCluster) {
    let (_guard, pool) = fresh_database(shared_test_cluster, "profiles").expect("database setup");
    let services = Services::new(&pool);
    let rt = test_runtime();

    rt.block_on(async {
        let bob = services.register("bob@example.com").await;

        let profile = services.accounts.profile(&bob).await.expect("profile found");
        let missing = services
            .accounts
            .find_by_email("carol@example.com")
            .await
            .expect("lookup succeeds");

        assert_eq!(profile.first_name(), "bob");
        assert_eq!(profile.last_name(), "Martin");
        assert!(missing.is_none());
    });
}

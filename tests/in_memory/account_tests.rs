//! In-memory integration tests for the account lifecycle.

use super::helpers::{PASSWORD, Workspace};
use chantier::ErrorKind;
use chantier::identity::services::{AccountError, LoginRequest, RegisterUserRequest};
use eyre::WrapErr;

#[tokio::test(flavor = "multi_thread")]
async fn credential_works_until_logout() -> Result<(), eyre::Report> {
    let workspace = Workspace::new()?;
    workspace.sign_up("alice@example.com").await?;

    let session = workspace
        .accounts
        .login(LoginRequest::new("  Alice@Example.com ", PASSWORD))
        .await
        .wrap_err("log in with unnormalized email")?;
    let identity = workspace
        .accounts
        .authenticate(session.credential())
        .await
        .wrap_err("resolve credential")?;
    eyre::ensure!(identity.email().as_str() == "alice@example.com");

    workspace
        .accounts
        .logout(session.credential())
        .await
        .wrap_err("log out")?;
    let revoked = workspace.accounts.authenticate(session.credential()).await;
    eyre::ensure!(
        matches!(revoked, Err(AccountError::UnknownCredential)),
        "expected revoked credential, got {revoked:?}"
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn each_login_issues_a_distinct_credential() -> Result<(), eyre::Report> {
    let workspace = Workspace::new()?;
    workspace.sign_up("alice@example.com").await?;

    let first = workspace
        .accounts
        .login(LoginRequest::new("alice@example.com", PASSWORD))
        .await?;
    let second = workspace
        .accounts
        .login(LoginRequest::new("alice@example.com", PASSWORD))
        .await?;
    eyre::ensure!(first.credential() != second.credential());

    workspace.accounts.logout(first.credential()).await?;
    let still_valid = workspace.accounts.authenticate(second.credential()).await?;
    eyre::ensure!(still_valid.email().as_str() == "alice@example.com");
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn email_is_registered_once() -> Result<(), eyre::Report> {
    let workspace = Workspace::new()?;
    workspace.sign_up("alice@example.com").await?;

    let duplicate = workspace
        .accounts
        .register(RegisterUserRequest::new(
            "ALICE@example.com",
            "Other",
            "Alice",
            "0600000000",
            PASSWORD,
        ))
        .await;
    let kind = duplicate.map(|_| ()).map_err(|err| err.kind());
    eyre::ensure!(kind == Err(ErrorKind::Conflict), "got {kind:?}");
    Ok(())
}

//! Collaborator removal, invitations, and racing task writes against
//! `PostgreSQL`.

use std::collections::BTreeSet;

use chantier::ErrorKind;
use chantier::identity::domain::Identity;
use chantier::project::{
    domain::{Collaborator, InvitationState, ProjectTask, Role},
    ports::{InvitationRepository, ProjectRepository, ProjectRepositoryError},
    services::{CollaboratorRequest, CreateProjectTaskRequest, InviteRequest},
};
use chantier::task::domain::TaskStatus;
use mockable::DefaultClock;
use pg_embedded_setup_unpriv::{TestCluster, test_support::shared_test_cluster};
use rstest::rstest;

use crate::postgres::helpers::{Services, email, fresh_database, test_runtime};

/// Alice's project with bob as a collaborator and a task assigned to both.
async fn shared_task(services: &Services) -> (Identity, Identity, ProjectTask) {
    let alice = services.register("alice@example.com").await;
    let bob = services.register("bob@example.com").await;
    let project = services.create_project(&alice, "Alpha").await;
    services
        .collaboration
        .add_collaborator(
            &alice,
            CollaboratorRequest::new(project.id(), "bob@example.com", Role::User),
        )
        .await
        .expect("admin adds bob");
    let task = services
        .project_tasks
        .create_task(
            &alice,
            CreateProjectTaskRequest::new(project.id(), "T1", "Work")
                .with_assignee("alice@example.com")
                .with_assignee("bob@example.com"),
        )
        .await
        .expect("task created");
    (alice, bob, task)
}

#[rstest]
fn removing_collaborator_detaches_them_from_tasks(shared_test_cluster: &'static TestCluster) {
    let (_guard, pool) = fresh_database(shared_test_cluster, "removal").expect("database setup");
    let services = Services::new(&pool);
    let rt = test_runtime();

    rt.block_on(async {
        let (alice, bob, task) = shared_task(&services).await;
        assert_eq!(
            services
                .project_tasks
                .list_assigned_tasks(&bob)
                .await
                .expect("list succeeds")
                .len(),
            1
        );

        services
            .collaboration
            .remove_collaborator(&alice, task.project_id(), "bob@example.com")
            .await
            .expect("admin removes bob");

        let stored = services
            .project_tasks
            .find_task(&alice, task.id())
            .await
            .expect("task found");
        assert_eq!(
            stored.assignees(),
            &BTreeSet::from([email("alice@example.com")])
        );
        assert!(stored.updated_at() >= task.updated_at());
        assert!(services
            .project_tasks
            .list_assigned_tasks(&bob)
            .await
            .expect("list succeeds")
            .is_empty());
        assert!(services
            .projects
            .list_shared_projects(&bob)
            .await
            .expect("list succeeds")
            .is_empty());
        let members = services
            .collaboration
            .list_collaborators(&alice, task.project_id())
            .await
            .expect("list succeeds");
        assert_eq!(members.len(), 1);
    });
}

#[rstest]
fn stale_task_writes_do_not_restore_removed_assignee(shared_test_cluster: &'static TestCluster) {
    let (_guard, pool) = fresh_database(shared_test_cluster, "stale").expect("database setup");
    let services = Services::new(&pool);
    let rt = test_runtime();

    rt.block_on(async {
        let (alice, _bob, task) = shared_task(&services).await;
        let mut stale = services
            .store
            .find_task(task.id())
            .await
            .expect("lookup succeeds")
            .expect("task exists");
        let mut reassigned = stale.clone();

        services
            .collaboration
            .remove_collaborator(&alice, task.project_id(), "bob@example.com")
            .await
            .expect("admin removes bob");

        stale
            .transition_to(TaskStatus::Done, &DefaultClock)
            .expect("todo moves to done");
        services
            .store
            .update_task_status(&stale)
            .await
            .expect("status write succeeds");
        services
            .store
            .update_task(&stale)
            .await
            .expect("scalar write succeeds");
        reassigned
            .assign(BTreeSet::from([email("bob@example.com")]), &DefaultClock)
            .expect("non-empty set");
        let assign = services.store.replace_assignees(&reassigned).await;

        let err = assign.expect_err("bob left the project");
        assert!(matches!(err, ProjectRepositoryError::AssigneeNotMember(_)));
        assert_eq!(err.kind(), ErrorKind::Conflict);
        let stored = services
            .project_tasks
            .find_task(&alice, task.id())
            .await
            .expect("task found");
        assert_eq!(stored.status(), TaskStatus::Done);
        assert_eq!(
            stored.assignees(),
            &BTreeSet::from([email("alice@example.com")])
        );
    });
}

#[rstest]
fn answered_invitations_stay_closed(shared_test_cluster: &'static TestCluster) {
    let (_guard, pool) = fresh_database(shared_test_cluster, "invites").expect("database setup");
    let services = Services::new(&pool);
    let rt = test_runtime();

    rt.block_on(async {
        let alice = services.register("alice@example.com").await;
        let bob = services.register("bob@example.com").await;
        let project = services.create_project(&alice, "Alpha").await;
        let first = services
            .collaboration
            .invite(&alice, InviteRequest::new(project.id(), "bob@example.com"))
            .await
            .expect("owner invites bob");

        let duplicate = services
            .collaboration
            .invite(&alice, InviteRequest::new(project.id(), "bob@example.com"))
            .await;
        assert_eq!(
            duplicate.expect_err("one pending invitation per invitee").kind(),
            ErrorKind::Conflict
        );

        let mut stale = first.clone();
        services
            .collaboration
            .decline(&bob, first.id())
            .await
            .expect("bob declines");
        stale
            .accept(bob.email(), &DefaultClock)
            .expect("stale copy is still pending");
        let joining = Collaborator::from_persisted(
            email("bob@example.com"),
            "Martin".to_owned(),
            "bob".to_owned(),
            Role::User,
            project.created_at(),
        );
        let late_accept = services
            .store
            .accept_invitation(&stale, &project, &joining)
            .await;
        assert!(matches!(
            late_accept,
            Err(ProjectRepositoryError::InvitationNotPending(id)) if id == first.id()
        ));
        let stored = services
            .store
            .find_invitation(first.id())
            .await
            .expect("lookup succeeds")
            .expect("invitation kept");
        assert_eq!(stored.state(), InvitationState::Declined);

        let second = services
            .collaboration
            .invite(&alice, InviteRequest::new(project.id(), "bob@example.com"))
            .await
            .expect("a declined invitation does not block a new one");
        services
            .collaboration
            .accept(&bob, second.id())
            .await
            .expect("bob accepts");
        let again = services.store.decline_invitation(&second).await;
        assert_eq!(
            again.expect_err("already accepted").kind(),
            ErrorKind::Conflict
        );

        let members = services
            .collaboration
            .list_collaborators(&alice, project.id())
            .await
            .expect("list succeeds");
        let summary: Vec<(&str, Role)> = members
            .iter()
            .map(|m| (m.email().as_str(), m.role()))
            .collect();
        assert_eq!(
            summary,
            [("alice@example.com", Role::Admin), ("bob@example.com", Role::User)]
        );
        assert!(services
            .collaboration
            .list_invitations(&bob)
            .await
            .expect("list succeeds")
            .is_empty());
    });
}

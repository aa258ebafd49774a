//! Project persistence and the deletion cascade against `PostgreSQL`.

use chantier::ErrorKind;
use chantier::project::{
    domain::Role,
    ports::{InvitationRepository, ProjectRepository},
    services::{CollaboratorRequest, CreateProjectTaskRequest, EditProjectRequest, InviteRequest},
};
use pg_embedded_setup_unpriv::{TestCluster, test_support::shared_test_cluster};
use rstest::rstest;

use crate::postgres::helpers::{Services, fresh_database, test_runtime};

#[rstest]
fn edited_project_is_read_back(shared_test_cluster: &'static TestCluster) {
    let (_guard, pool) = fresh_database(shared_test_cluster, "projects").expect("database setup");
    let services = Services::new(&pool);
    let rt = test_runtime();

    rt.block_on(async {
        let alice = services.register("alice@example.com").await;
        let project = services.create_project(&alice, "Alpha").await;

        let edited = services
            .projects
            .edit_project(
                &alice,
                EditProjectRequest::new(project.id()).with_details("Alpha 2", "Second phase"),
            )
            .await
            .expect("owner edits");
        let owned = services
            .projects
            .list_projects(&alice)
            .await
            .expect("list succeeds");

        let stored = owned.first().expect("one owned project");
        assert_eq!(owned.len(), 1);
        assert_eq!(stored.id(), project.id());
        assert_eq!(stored.details(), edited.details());
        assert_eq!(stored.details().title(), "Alpha 2");
        assert_eq!(stored.schedule(), project.schedule());
    });
}

#[rstest]
fn deleting_project_removes_its_children(shared_test_cluster: &'static TestCluster) {
    let (_guard, pool) = fresh_database(shared_test_cluster, "cascade").expect("database setup");
    let services = Services::new(&pool);
    let rt = test_runtime();

    rt.block_on(async {
        let alice = services.register("alice@example.com").await;
        let bob = services.register("bob@example.com").await;
        let carol = services.register("carol@example.com").await;
        let project = services.create_project(&alice, "Alpha").await;
        services
            .collaboration
            .add_collaborator(
                &alice,
                CollaboratorRequest::new(project.id(), "bob@example.com", Role::Manager),
            )
            .await
            .expect("admin adds bob");
        let task = services
            .project_tasks
            .create_task(
                &alice,
                CreateProjectTaskRequest::new(project.id(), "T1", "Work")
                    .with_assignee("bob@example.com"),
            )
            .await
            .expect("task created");
        let invitation = services
            .collaboration
            .invite(&alice, InviteRequest::new(project.id(), "carol@example.com"))
            .await
            .expect("owner invites carol");

        let refused = services.projects.delete_project(&bob, project.id()).await;
        assert_eq!(
            refused.expect_err("only the owner deletes").kind(),
            ErrorKind::NotAuthorized
        );
        services
            .projects
            .delete_project(&alice, project.id())
            .await
            .expect("owner deletes");

        assert!(services
            .store
            .find_project(project.id())
            .await
            .expect("lookup succeeds")
            .is_none());
        assert!(services
            .store
            .find_task(task.id())
            .await
            .expect("lookup succeeds")
            .is_none());
        assert!(services
            .store
            .find_invitation(invitation.id())
            .await
            .expect("lookup succeeds")
            .is_none());
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
        assert!(services
            .collaboration
            .list_invitations(&carol)
            .await
            .expect("list succeeds")
            .is_empty());
    });
}

//! Personal task persistence against `PostgreSQL`.

use chantier::ErrorKind;
use chantier::task::{
    domain::TaskStatus,
    services::{ChangeStatusRequest, CreateTaskRequest, EditTaskRequest},
};
use pg_embedded_setup_unpriv::{TestCluster, test_support::shared_test_cluster};
use rstest::rstest;

use crate::postgres::helpers::{Services, fresh_database, in_days, test_runtime};

#[rstest]
fn personal_task_lifecycle_is_persisted(shared_test_cluster: &'static TestCluster) {
    let (_guard, pool) = fresh_database(shared_test_cluster, "tasks").expect("database setup");
    let services = Services::new(&pool);
    let rt = test_runtime();

    rt.block_on(async {
        let alice = services.register("alice@example.com").await;
        let bob = services.register("bob@example.com").await;
        let task = services
            .tasks
            .create_task(
                &alice,
                CreateTaskRequest::new("Plan", "Sprint planning", in_days(0), in_days(3)),
            )
            .await
            .expect("task created");

        let edited = services
            .tasks
            .edit_task(
                &alice,
                EditTaskRequest::new(task.id()).with_details("Plan v2", "Sprint review"),
            )
            .await
            .expect("task edited");
        services
            .tasks
            .change_status(&alice, ChangeStatusRequest::new(task.id(), "en cours"))
            .await
            .expect("status changed");

        let stored = services
            .tasks
            .find_task(&alice, task.id())
            .await
            .expect("task found");
        assert_eq!(stored.details(), edited.details());
        assert_eq!(stored.status(), TaskStatus::InProgress);
        assert_eq!(stored.schedule(), task.schedule());

        let foreign = services.tasks.find_task(&bob, task.id()).await;
        assert_eq!(
            foreign.expect_err("bob does not own the task").kind(),
            ErrorKind::NotAuthorized
        );
        assert!(services
            .tasks
            .list_tasks(&bob)
            .await
            .expect("list succeeds")
            .is_empty());

        services
            .tasks
            .delete_task(&alice, task.id())
            .await
            .expect("task deleted");
        assert!(services
            .tasks
            .list_tasks(&alice)
            .await
            .expect("list succeeds")
            .is_empty());
    });
}

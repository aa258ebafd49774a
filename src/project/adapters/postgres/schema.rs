//! Diesel schema for project persistence.

diesel::table! {
    /// Shared projects.
    projects (id) {
        /// Internal project identifier.
        id -> Uuid,
        /// Owner email address.
        #[max_length = 254]
        owner_email -> Varchar,
        /// Project title.
        #[max_length = 255]
        title -> Varchar,
        /// Project description.
        description -> Text,
        /// First day of the project.
        starts_on -> Date,
        /// Last day of the project.
        ends_on -> Date,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Project members other than the owner.
    project_collaborators (project_id, email) {
        /// Owning project.
        project_id -> Uuid,
        /// Collaborator email address.
        #[max_length = 254]
        email -> Varchar,
        /// Collaborator last name.
        #[max_length = 255]
        last_name -> Varchar,
        /// Collaborator first name.
        #[max_length = 255]
        first_name -> Varchar,
        /// Collaborator role.
        #[max_length = 16]
        role -> Varchar,
        /// When the collaborator joined.
        joined_at -> Timestamptz,
    }
}

diesel::table! {
    /// Tasks that belong to projects.
    project_tasks (id) {
        /// Internal task identifier.
        id -> Uuid,
        /// Owning project.
        project_id -> Uuid,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Task description.
        description -> Text,
        /// First day of the task, when scheduled.
        starts_on -> Nullable<Date>,
        /// Last day of the task, when scheduled.
        ends_on -> Nullable<Date>,
        /// Task status.
        #[max_length = 20]
        status -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Assignees of project tasks.
    project_task_assignees (task_id, email) {
        /// Assigned task.
        task_id -> Uuid,
        /// Assignee email address.
        #[max_length = 254]
        email -> Varchar,
    }
}

diesel::table! {
    /// Invitations to join projects.
    project_invitations (id) {
        /// Internal invitation identifier.
        id -> Uuid,
        /// Target project.
        project_id -> Uuid,
        /// Inviter email address.
        #[max_length = 254]
        inviter_email -> Varchar,
        /// Invitee email address.
        #[max_length = 254]
        invitee_email -> Varchar,
        /// Offered role.
        #[max_length = 16]
        role -> Varchar,
        /// Invitation state.
        #[max_length = 16]
        state -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// When the invitee answered.
        responded_at -> Nullable<Timestamptz>,
    }
}

diesel::joinable!(project_collaborators -> projects (project_id));
diesel::joinable!(project_tasks -> projects (project_id));
diesel::joinable!(project_task_assignees -> project_tasks (task_id));
diesel::joinable!(project_invitations -> projects (project_id));

diesel::allow_tables_to_appear_in_same_query!(
    projects,
    project_collaborators,
    project_tasks,
    project_task_assignees,
    project_invitations,
);

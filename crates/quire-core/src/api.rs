//! Typed project, note, search and account operations.
//!
//! Every call goes through the authenticated pipeline, so it carries the
//! session's bearer token and ends the session if the server rejects it.

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::graphql::documents::{
    ARCHIVE_PROJECT, CHANGE_PASSWORD, CREATE_NOTE, CREATE_PROJECT, GET_PROJECT,
    GET_PROJECT_NOTES, GET_USERS_NOTES, GET_USERS_PROJECTS, REMOVE_NOTE, REMOVE_PROJECT, SEARCH,
    UNARCHIVE_PROJECT, UPDATE_PROJECT, UPDATE_USER,
};
use crate::graphql::GraphqlRequest;
use crate::models::{
    ArchiveState, ChangePasswordInput, CreateNoteInput, CreateProjectInput, Note, PasswordChange,
    Project, SearchHit, UpdateProjectInput, UpdateUserInput, User,
};
use crate::pipeline::Pipeline;
use crate::util::{normalize_text_option, require_text};

#[derive(Clone)]
pub struct Api {
    pipeline: Arc<Pipeline>,
}

impl Api {
    pub fn new(pipeline: Pipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }

    pub async fn list_projects(&self) -> Result<Vec<Project>> {
        self.pipeline
            .fetch(
                GraphqlRequest::new(GET_USERS_PROJECTS, "GetUsersProjects"),
                "getUsersProjects",
            )
            .await
    }

    /// Fetch one project together with its notes.
    pub async fn get_project(&self, project_id: &str) -> Result<Project> {
        let request = GraphqlRequest::new(GET_PROJECT, "GetProject")
            .variable("projectId", require_text(project_id, "Project ID")?)?;
        self.pipeline.fetch(request, "getProject").await
    }

    pub async fn create_project(&self, name: &str, description: Option<&str>) -> Result<Project> {
        let input = CreateProjectInput {
            name: require_text(name, "Project name")?,
            description: normalize_text_option(description.map(str::to_string)),
        };
        let request =
            GraphqlRequest::new(CREATE_PROJECT, "CreateProject").variable("input", input)?;
        self.pipeline.fetch(request, "createProject").await
    }

    pub async fn update_project(
        &self,
        project_id: &str,
        input: UpdateProjectInput,
    ) -> Result<Project> {
        let input = UpdateProjectInput {
            name: input
                .name
                .map(|name| require_text(&name, "Project name"))
                .transpose()?,
            description: input.description.map(|description| description.trim().to_string()),
        };
        if input.is_empty() {
            return Err(Error::InvalidInput(
                "Nothing to update: provide a name or description".to_string(),
            ));
        }
        let request = GraphqlRequest::new(UPDATE_PROJECT, "UpdateProject")
            .variable("projectId", require_text(project_id, "Project ID")?)?
            .variable("input", input)?;
        self.pipeline.fetch(request, "updateProject").await
    }

    pub async fn remove_project(&self, project_id: &str) -> Result<bool> {
        let request = GraphqlRequest::new(REMOVE_PROJECT, "RemoveProject")
            .variable("projectId", require_text(project_id, "Project ID")?)?;
        self.pipeline.fetch(request, "removeProject").await
    }

    pub async fn archive_project(&self, project_id: &str) -> Result<ArchiveState> {
        let request = GraphqlRequest::new(ARCHIVE_PROJECT, "ArchiveProject")
            .variable("projectId", require_text(project_id, "Project ID")?)?;
        self.pipeline.fetch(request, "archiveProject").await
    }

    pub async fn unarchive_project(&self, project_id: &str) -> Result<ArchiveState> {
        let request = GraphqlRequest::new(UNARCHIVE_PROJECT, "UnarchiveProject")
            .variable("projectId", require_text(project_id, "Project ID")?)?;
        self.pipeline.fetch(request, "unarchiveProject").await
    }

    /// Archive or unarchive in one call.
    pub async fn set_archived(&self, project_id: &str, archived: bool) -> Result<ArchiveState> {
        if archived {
            self.archive_project(project_id).await
        } else {
            self.unarchive_project(project_id).await
        }
    }

    pub async fn list_project_notes(&self, project_id: &str) -> Result<Vec<Note>> {
        let request = GraphqlRequest::new(GET_PROJECT_NOTES, "GetProjectNotes")
            .variable("projectId", require_text(project_id, "Project ID")?)?;
        self.pipeline.fetch(request, "getProjectsNotes").await
    }

    /// Every note the signed-in user owns, across projects.
    pub async fn list_notes(&self) -> Result<Vec<Note>> {
        self.pipeline
            .fetch(
                GraphqlRequest::new(GET_USERS_NOTES, "GetUsersNotes"),
                "getUsersNotes",
            )
            .await
    }

    pub async fn create_note(&self, input: CreateNoteInput) -> Result<Note> {
        let input = CreateNoteInput {
            project_id: require_text(&input.project_id, "Project ID")?,
            title: require_text(&input.title, "Note title")?,
            content: normalize_text_option(input.content),
            labels: input
                .labels
                .into_iter()
                .filter_map(|label| normalize_text_option(Some(label)))
                .collect(),
            pinned: input.pinned,
            visibility: normalize_text_option(input.visibility),
        };
        let request = GraphqlRequest::new(CREATE_NOTE, "CreateNote").variable("input", input)?;
        self.pipeline.fetch(request, "createNote").await
    }

    pub async fn remove_note(&self, note_id: &str) -> Result<bool> {
        let request = GraphqlRequest::new(REMOVE_NOTE, "RemoveNote")
            .variable("noteId", require_text(note_id, "Note ID")?)?;
        self.pipeline.fetch(request, "removeNote").await
    }

    pub async fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        let request = GraphqlRequest::new(SEARCH, "Search")
            .variable("query", require_text(query, "Search query")?)?;
        self.pipeline.fetch(request, "search").await
    }

    pub async fn update_user(&self, input: UpdateUserInput) -> Result<User> {
        let input = UpdateUserInput {
            name: normalize_text_option(input.name),
            email: normalize_text_option(input.email),
        };
        if input.is_empty() {
            return Err(Error::InvalidInput(
                "Nothing to update: provide a name or email".to_string(),
            ));
        }
        let request = GraphqlRequest::new(UPDATE_USER, "UpdateUser").variable("input", input)?;
        self.pipeline.fetch(request, "updateUser").await
    }

    pub async fn change_password(
        &self,
        current_password: &str,
        new_password: &str,
    ) -> Result<PasswordChange> {
        if current_password.is_empty() || new_password.trim().is_empty() {
            return Err(Error::InvalidInput(
                "Current and new password are required".to_string(),
            ));
        }
        let input = ChangePasswordInput {
            current_password: current_password.to_string(),
            new_password: new_password.to_string(),
        };
        let request =
            GraphqlRequest::new(CHANGE_PASSWORD, "ChangePassword").variable("input", input)?;
        self.pipeline.fetch(request, "changePassword").await
    }
}

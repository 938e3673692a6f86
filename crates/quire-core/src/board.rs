//! Loaded project list with optimistic archive/unarchive.

use crate::api::Api;
use crate::error::{Error, Result};
use crate::models::Project;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectBoard {
    projects: Vec<Project>,
}

impl ProjectBoard {
    pub async fn load(api: &Api) -> Result<Self> {
        Ok(Self::from_projects(api.list_projects().await?))
    }

    pub const fn from_projects(projects: Vec<Project>) -> Self {
        Self { projects }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn get(&self, project_id: &str) -> Option<&Project> {
        self.projects.iter().find(|project| project.id == project_id)
    }

    pub fn active(&self) -> impl Iterator<Item = &Project> {
        self.projects.iter().filter(|project| !project.is_archive)
    }

    pub fn archived(&self) -> impl Iterator<Item = &Project> {
        self.projects.iter().filter(|project| project.is_archive)
    }

    /// Flip a project's archive flag. See [`Self::set_archived`].
    pub async fn toggle_archive(&mut self, api: &Api, project_id: &str) -> Result<bool> {
        let current = self
            .get(project_id)
            .map(|project| project.is_archive)
            .ok_or_else(|| unknown_project(project_id))?;
        self.set_archived(api, project_id, !current).await
    }

    /// Apply the change locally, then confirm it with the server.
    ///
    /// On failure the previous flag is restored and the error returned. On
    /// success the server's answer is authoritative.
    pub async fn set_archived(
        &mut self,
        api: &Api,
        project_id: &str,
        archived: bool,
    ) -> Result<bool> {
        let previous = {
            let project = self.project_mut(project_id)?;
            let previous = project.is_archive;
            project.is_archive = archived;
            previous
        };

        let outcome = api.set_archived(project_id, archived).await;

        let project = self.project_mut(project_id)?;
        match outcome {
            Ok(state) => {
                project.is_archive = state.is_archive;
                Ok(state.is_archive)
            }
            Err(error) => {
                tracing::debug!(project_id, "Reverting optimistic archive change");
                project.is_archive = previous;
                Err(error)
            }
        }
    }

    fn project_mut(&mut self, project_id: &str) -> Result<&mut Project> {
        self.projects
            .iter_mut()
            .find(|project| project.id == project_id)
            .ok_or_else(|| unknown_project(project_id))
    }
}

fn unknown_project(project_id: &str) -> Error {
    Error::InvalidInput(format!("Project {project_id} is not on the board"))
}

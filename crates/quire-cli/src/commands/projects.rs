use quire_core::board::ProjectBoard;
use quire_core::models::{Project, UpdateProjectInput};
use quire_core::Api;

use crate::cli::ProjectCommands;
use crate::commands::common::{
    format_note_lines, format_project_lines, format_timestamp, open_signed_in_client,
    print_json, print_lines,
};
use crate::error::CliError;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProjectFilter {
    Active,
    Archived,
    All,
}

impl ProjectFilter {
    pub const fn from_flags(archived: bool, all: bool) -> Self {
        if all {
            Self::All
        } else if archived {
            Self::Archived
        } else {
            Self::Active
        }
    }
}

pub async fn run_projects(
    command: ProjectCommands,
    global_profile: Option<&str>,
    as_json: bool,
) -> Result<(), CliError> {
    let context = open_signed_in_client(global_profile)?;
    let api = context.client.api();

    match command {
        ProjectCommands::List { archived, all } => {
            let board = ProjectBoard::load(api).await?;
            let projects = select_projects(&board, ProjectFilter::from_flags(archived, all));
            if as_json {
                print_json(&projects)?;
            } else {
                print_lines(&format_project_lines(&projects), "No projects.");
            }
        }
        ProjectCommands::Show { id } => {
            let project = api.get_project(&id).await?;
            if as_json {
                print_json(&project)?;
            } else {
                println!("{} ({})", project.name, project.id);
                if let Some(description) = project.description.as_deref() {
                    println!("{description}");
                }
                println!(
                    "owner: {}  created: {}  modified: {}{}",
                    project.owner_name.as_deref().unwrap_or("-"),
                    format_timestamp(project.created_date),
                    format_timestamp(project.modified_date),
                    if project.is_archive { "  [archived]" } else { "" }
                );
                let notes = project.notes.unwrap_or_default();
                print_lines(&format_note_lines(&notes), "No notes.");
            }
        }
        ProjectCommands::Create { name, description } => {
            let project = api.create_project(&name, description.as_deref()).await?;
            if as_json {
                print_json(&project)?;
            } else {
                println!("Created project {} ({})", project.name, project.id);
            }
        }
        ProjectCommands::Update {
            id,
            name,
            description,
        } => {
            let project = api
                .update_project(&id, UpdateProjectInput { name, description })
                .await?;
            if as_json {
                print_json(&project)?;
            } else {
                println!("Updated project {} ({})", project.name, project.id);
            }
        }
        ProjectCommands::Remove { id } => {
            let removed = api.remove_project(&id).await?;
            report_removal("project", &id, removed, as_json)?;
        }
        ProjectCommands::Archive { id } => set_archived(api, &id, true, as_json).await?,
        ProjectCommands::Unarchive { id } => set_archived(api, &id, false, as_json).await?,
    }
    Ok(())
}

pub fn select_projects(board: &ProjectBoard, filter: ProjectFilter) -> Vec<Project> {
    match filter {
        ProjectFilter::Active => board.active().cloned().collect(),
        ProjectFilter::Archived => board.archived().cloned().collect(),
        ProjectFilter::All => board.projects().to_vec(),
    }
}

async fn set_archived(
    api: &Api,
    project_id: &str,
    archived: bool,
    as_json: bool,
) -> Result<(), CliError> {
    let state = api.set_archived(project_id, archived).await?;
    if as_json {
        print_json(&serde_json::json!({ "id": state.id, "isArchive": state.is_archive }))?;
    } else if state.is_archive {
        println!("Archived project {project_id}");
    } else {
        println!("Project {project_id} is active");
    }
    Ok(())
}

pub fn report_removal(kind: &str, id: &str, removed: bool, as_json: bool) -> Result<(), CliError> {
    if as_json {
        print_json(&serde_json::json!({ "id": id, "removed": removed }))?;
    } else if removed {
        println!("Removed {kind} {id}");
    } else {
        println!("Server did not remove {kind} {id}");
    }
    Ok(())
}

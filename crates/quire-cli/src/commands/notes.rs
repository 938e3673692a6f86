use quire_core::models::CreateNoteInput;

use crate::cli::NoteCommands;
use crate::commands::common::{format_note_lines, open_signed_in_client, print_json, print_lines};
use crate::commands::projects::report_removal;
use crate::error::CliError;

pub async fn run_notes(
    command: NoteCommands,
    global_profile: Option<&str>,
    as_json: bool,
) -> Result<(), CliError> {
    let context = open_signed_in_client(global_profile)?;
    let api = context.client.api();

    match command {
        NoteCommands::List { project } => {
            let notes = match project.as_deref() {
                Some(project_id) => api.list_project_notes(project_id).await?,
                None => api.list_notes().await?,
            };
            if as_json {
                print_json(&notes)?;
            } else {
                print_lines(&format_note_lines(&notes), "No notes.");
            }
        }
        NoteCommands::Create {
            project,
            title,
            content,
            labels,
            pinned,
            visibility,
        } => {
            let note = api
                .create_note(CreateNoteInput {
                    project_id: project,
                    title,
                    content,
                    labels,
                    pinned,
                    visibility,
                })
                .await?;
            if as_json {
                print_json(&note)?;
            } else {
                println!("Created note {} ({})", note.title, note.id);
            }
        }
        NoteCommands::Remove { id } => {
            let removed = api.remove_note(&id).await?;
            report_removal("note", &id, removed, as_json)?;
        }
    }
    Ok(())
}

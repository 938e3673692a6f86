use std::env;

use chrono::{DateTime, Utc};
use quire_core::models::{Note, Project, SearchHit};
use quire_core::session::require_authenticated;
use quire_core::util::normalize_text_option;
use quire_core::Client;
use serde::Serialize;

use crate::config_profiles::CliProfilesConfig;
use crate::error::CliError;
use crate::token_store::open_token_store;

/// A client bound to the resolved CLI profile.
pub struct ProfileClient {
    pub profile_name: String,
    pub client: Client,
}

pub fn open_client(global_profile: Option<&str>) -> Result<ProfileClient, CliError> {
    let config = CliProfilesConfig::load().map_err(CliError::Config)?;
    let profile_name = config.resolve_profile_name(global_profile);
    let profile = config.profile(&profile_name).cloned().unwrap_or_default();
    let client_config = profile
        .client_config(normalize_text_option(env::var("QUIRE_API_URL").ok()))
        .map_err(CliError::Config)?;
    let store = open_token_store(&profile_name, &profile)?;
    let client = Client::new(&client_config, store)?;
    tracing::debug!(
        profile = %profile_name,
        api_url = %client_config.api_url,
        "Opened client for profile"
    );
    Ok(ProfileClient {
        profile_name,
        client,
    })
}

/// Open the profile's client and refuse to continue without a session.
pub fn open_signed_in_client(global_profile: Option<&str>) -> Result<ProfileClient, CliError> {
    let context = open_client(global_profile)?;
    if require_authenticated(context.client.session()).is_err() {
        return Err(CliError::NotSignedIn(context.profile_name));
    }
    Ok(context)
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn short_id(id: &str) -> String {
    id.chars().take(13).collect()
}

pub fn truncate_label(text: &str, max_chars: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max_chars {
        collapsed
    } else {
        let take_len = max_chars.saturating_sub(3);
        let mut truncated = collapsed.chars().take(take_len).collect::<String>();
        truncated.push_str("...");
        truncated
    }
}

pub fn format_timestamp(timestamp: Option<DateTime<Utc>>) -> String {
    timestamp.map_or_else(
        || "-".to_string(),
        |date_time| date_time.format("%Y-%m-%d %H:%M UTC").to_string(),
    )
}

pub fn format_project_lines(projects: &[Project]) -> Vec<String> {
    projects
        .iter()
        .map(|project| {
            let name = truncate_label(&project.name, 32);
            let line = format!(
                "{:<13}  {name:<32}  {:>3} notes  {}",
                short_id(&project.id),
                project.note_count,
                format_timestamp(project.modified_date.or(project.created_date))
            );
            if project.is_archive {
                format!("{line}  [archived]")
            } else {
                line
            }
        })
        .collect()
}

pub fn format_note_lines(notes: &[Note]) -> Vec<String> {
    notes
        .iter()
        .map(|note| {
            let marker = if note.pinned { "*" } else { " " };
            let title = truncate_label(&note.title, 32);
            let preview = note.preview(40);
            let labels = note
                .labels
                .iter()
                .map(|label| format!("#{label}"))
                .collect::<Vec<_>>()
                .join(" ");

            let line = format!("{marker} {:<13}  {title:<32}  {preview}", short_id(&note.id));
            if labels.is_empty() {
                line.trim_end().to_string()
            } else {
                format!("{}  {labels}", line.trim_end())
            }
        })
        .collect()
}

pub fn format_search_lines(hits: &[SearchHit]) -> Vec<String> {
    hits.iter()
        .map(|hit| {
            format!(
                "{:<8}  {:<13}  {}",
                hit.kind(),
                short_id(hit.id()),
                truncate_label(hit.title(), 60)
            )
        })
        .collect()
}

pub fn print_lines(lines: &[String], empty_message: &str) {
    if lines.is_empty() {
        println!("{empty_message}");
    }
    for line in lines {
        println!("{line}");
    }
}

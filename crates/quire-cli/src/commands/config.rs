use std::env;

use quire_core::util::normalize_text_option;
use serde::Serialize;

use crate::cli::ConfigCommands;
use crate::commands::common::print_json;
use crate::config_profiles::{CliProfile, CliProfilesConfig, TokenStoreKind};
use crate::error::CliError;

#[derive(Debug, Serialize)]
pub struct ResolvedProfile {
    pub profile: String,
    pub configured: bool,
    pub api_url: String,
    pub request_timeout_secs: u64,
    pub token_store: TokenStoreKind,
}

pub fn run_config(
    command: ConfigCommands,
    global_profile: Option<&str>,
    as_json: bool,
) -> Result<(), CliError> {
    match command {
        ConfigCommands::Init {
            api_url,
            timeout,
            token_store,
            no_activate,
        } => run_config_init(global_profile, api_url, timeout, token_store, no_activate),
        ConfigCommands::Show => run_config_show(global_profile, as_json),
    }
}

pub fn run_config_init(
    profile_name: Option<&str>,
    api_url: Option<String>,
    timeout: Option<u64>,
    token_store: Option<TokenStoreKind>,
    no_activate: bool,
) -> Result<(), CliError> {
    let mut config = CliProfilesConfig::load().map_err(CliError::Config)?;
    let profile_name = config.resolve_profile_name(profile_name);

    let profile = config.profile_mut_or_default(&profile_name);
    merge_profile(profile, api_url, timeout, token_store);
    profile.validate().map_err(CliError::Config)?;

    if !no_activate {
        config.active_profile = Some(profile_name.clone());
    }

    let path = config.save().map_err(CliError::Config)?;
    println!(
        "Profile '{}' initialized at {}",
        profile_name,
        path.display()
    );
    println!("Run `quire auth login --email <email> --password <password>` to sign in.");
    Ok(())
}

/// Explicit values win, then `QUIRE_API_URL`, then what the profile already had.
pub fn merge_profile(
    profile: &mut CliProfile,
    api_url: Option<String>,
    timeout: Option<u64>,
    token_store: Option<TokenStoreKind>,
) {
    if let Some(url) = normalize_text_option(api_url)
        .or_else(|| normalize_text_option(env::var("QUIRE_API_URL").ok()))
    {
        profile.api_url = Some(url.trim_end_matches('/').to_string());
    }
    if let Some(timeout) = timeout {
        profile.request_timeout_secs = Some(timeout);
    }
    if let Some(kind) = token_store {
        profile.token_store = Some(kind);
    }
}

fn run_config_show(global_profile: Option<&str>, as_json: bool) -> Result<(), CliError> {
    let config = CliProfilesConfig::load().map_err(CliError::Config)?;
    let profile_name = config.resolve_profile_name(global_profile);
    let stored = config.profile(&profile_name);
    let profile = stored.cloned().unwrap_or_default();
    let client_config = profile
        .client_config(normalize_text_option(env::var("QUIRE_API_URL").ok()))
        .map_err(CliError::Config)?;

    let resolved = ResolvedProfile {
        profile: profile_name,
        configured: stored.is_some(),
        api_url: client_config.api_url,
        request_timeout_secs: client_config.request_timeout_secs,
        token_store: profile.token_store_kind(),
    };

    if as_json {
        print_json(&resolved)?;
    } else {
        for line in render_resolved_profile(&resolved) {
            println!("{line}");
        }
    }
    Ok(())
}

pub fn render_resolved_profile(resolved: &ResolvedProfile) -> Vec<String> {
    let configured = if resolved.configured {
        ""
    } else {
        " (not configured, using defaults)"
    };
    vec![
        format!("profile:      {}{configured}", resolved.profile),
        format!("api_url:      {}", resolved.api_url),
        format!("timeout:      {}s", resolved.request_timeout_secs),
        format!(
            "token_store:  {}",
            match resolved.token_store {
                TokenStoreKind::Keyring => "keyring",
                TokenStoreKind::File => "file",
            }
        ),
    ]
}

use serde::Serialize;

use crate::cli::AuthCommands;
use crate::commands::common::{open_client, print_json};
use crate::error::CliError;

#[derive(Debug, Serialize)]
pub struct AuthStatus {
    pub profile: String,
    pub authenticated: bool,
}

pub async fn run_auth(
    command: AuthCommands,
    global_profile: Option<&str>,
    as_json: bool,
) -> Result<(), CliError> {
    let context = open_client(global_profile)?;
    let session = context.client.session();
    let profile_name = context.profile_name.as_str();

    match command {
        AuthCommands::Signup {
            email,
            password,
            name,
        } => {
            session.sign_up(&email, &password, &name).await?;
            println!("Signed up and signed in profile '{profile_name}' as {email}");
        }
        AuthCommands::Login { email, password } => {
            session.sign_in(&email, &password).await?;
            println!("Signed in profile '{profile_name}' as {email}");
        }
        AuthCommands::Logout => {
            session.logout().await;
            println!("Signed out profile '{profile_name}'");
        }
        AuthCommands::Status => {
            let status = AuthStatus {
                profile: profile_name.to_string(),
                authenticated: session.is_authenticated(),
            };
            if as_json {
                print_json(&status)?;
            } else {
                println!("{}", render_status(&status));
            }
        }
        AuthCommands::Refresh => {
            session.refresh_tokens().await?;
            println!("Refreshed session for profile '{profile_name}'");
        }
    }
    Ok(())
}

pub fn render_status(status: &AuthStatus) -> String {
    if status.authenticated {
        format!("Profile '{}' is signed in.", status.profile)
    } else {
        format!("Profile '{}' is not signed in.", status.profile)
    }
}

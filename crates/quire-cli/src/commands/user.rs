use quire_core::models::UpdateUserInput;

use crate::cli::UserCommands;
use crate::commands::common::{open_signed_in_client, print_json};
use crate::error::CliError;

pub async fn run_user(
    command: UserCommands,
    global_profile: Option<&str>,
    as_json: bool,
) -> Result<(), CliError> {
    let context = open_signed_in_client(global_profile)?;
    let api = context.client.api();

    match command {
        UserCommands::Update { name, email } => {
            let user = api.update_user(UpdateUserInput { name, email }).await?;
            if as_json {
                print_json(&user)?;
            } else {
                println!("Updated account {} <{}>", user.name, user.email);
            }
        }
        UserCommands::Password {
            current,
            new_password,
        } => {
            let outcome = api.change_password(&current, &new_password).await?;
            if as_json {
                print_json(&outcome)?;
            } else if outcome.success {
                println!(
                    "{}",
                    outcome.message.as_deref().unwrap_or("Password changed")
                );
            } else {
                println!(
                    "Password not changed: {}",
                    outcome.message.as_deref().unwrap_or("no reason given")
                );
            }
        }
    }
    Ok(())
}

use crate::commands::common::{format_search_lines, open_signed_in_client, print_json, print_lines};
use crate::error::CliError;

pub async fn run_search(
    query: &str,
    global_profile: Option<&str>,
    as_json: bool,
) -> Result<(), CliError> {
    let context = open_signed_in_client(global_profile)?;
    let hits = context.client.api().search(query).await?;

    if as_json {
        print_json(&hits)?;
    } else {
        print_lines(&format_search_lines(&hits), "No matches.");
    }

    Ok(())
}

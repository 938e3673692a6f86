use std::fs;
use std::io::{self, Write};
use std::path::Path;

use clap::CommandFactory;
use clap_complete::{generate, Shell};

use crate::cli::Cli;
use crate::error::CliError;

/// Completion script for `shell`, named after the binary.
pub fn render_completions(shell: Shell) -> Vec<u8> {
    let mut command = Cli::command();
    let bin_name = command.get_name().to_string();
    let mut script = Vec::new();
    generate(shell, &mut command, bin_name, &mut script);
    script
}

pub fn run_completions(shell: Shell, output_path: Option<&Path>) -> Result<(), CliError> {
    let script = render_completions(shell);
    let Some(path) = output_path else {
        io::stdout().lock().write_all(&script)?;
        return Ok(());
    };

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, &script)?;
    tracing::debug!(%shell, path = %path.display(), "Wrote completion script");
    println!("Wrote {shell} completions to {}", path.display());
    Ok(())
}

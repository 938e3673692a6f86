use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use crate::config_profiles::TokenStoreKind;

#[derive(Parser)]
#[command(name = "quire")]
#[command(about = "Manage projects and notes on a Quire server")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// CLI profile name (endpoint and stored session)
    #[arg(long, global = true, value_name = "NAME")]
    pub profile: Option<String>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Configure CLI profiles
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Sign up, sign in and manage the stored session
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
    /// Manage projects
    #[command(alias = "project")]
    Projects {
        #[command(subcommand)]
        command: ProjectCommands,
    },
    /// Manage notes
    #[command(alias = "note")]
    Notes {
        #[command(subcommand)]
        command: NoteCommands,
    },
    /// Search projects and notes
    Search {
        /// Search query
        query: String,
    },
    /// Manage the signed-in account
    User {
        #[command(subcommand)]
        command: UserCommands,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Initialize or update profile config
    Init {
        /// GraphQL endpoint URL
        #[arg(long, value_name = "URL")]
        api_url: Option<String>,
        /// Request timeout in seconds
        #[arg(long, value_name = "SECS")]
        timeout: Option<u64>,
        /// Where to keep session tokens
        #[arg(long, value_enum, value_name = "KIND")]
        token_store: Option<TokenStoreKind>,
        /// Keep current active profile instead of activating this one
        #[arg(long)]
        no_activate: bool,
    },
    /// Show the resolved profile
    Show,
}

#[derive(Subcommand)]
pub enum AuthCommands {
    /// Create an account and store its session
    Signup {
        #[arg(long, value_name = "EMAIL")]
        email: String,
        #[arg(long, value_name = "PASSWORD")]
        password: String,
        /// Display name
        #[arg(long, value_name = "NAME")]
        name: String,
    },
    /// Sign in with email/password and store the session
    Login {
        #[arg(long, value_name = "EMAIL")]
        email: String,
        #[arg(long, value_name = "PASSWORD")]
        password: String,
    },
    /// End the session and clear stored tokens
    Logout,
    /// Show whether the profile holds a session
    Status,
    /// Exchange the stored refresh token for a new token pair
    Refresh,
}

#[derive(Subcommand)]
pub enum ProjectCommands {
    /// List projects (active only by default)
    List {
        /// Show only archived projects
        #[arg(long, conflicts_with = "all")]
        archived: bool,
        /// Show active and archived projects
        #[arg(long)]
        all: bool,
    },
    /// Show a project and its notes
    Show {
        id: String,
    },
    /// Create a project
    Create {
        name: String,
        #[arg(long, value_name = "TEXT")]
        description: Option<String>,
    },
    /// Rename or re-describe a project
    Update {
        id: String,
        #[arg(long, value_name = "NAME")]
        name: Option<String>,
        #[arg(long, value_name = "TEXT")]
        description: Option<String>,
    },
    /// Delete a project
    #[command(alias = "delete")]
    Remove {
        id: String,
    },
    /// Archive a project
    Archive {
        id: String,
    },
    /// Restore an archived project
    Unarchive {
        id: String,
    },
}

#[derive(Subcommand)]
pub enum NoteCommands {
    /// List notes, optionally for one project
    List {
        #[arg(long, value_name = "ID")]
        project: Option<String>,
    },
    /// Create a note in a project
    Create {
        #[arg(long, value_name = "ID")]
        project: String,
        #[arg(long, value_name = "TEXT")]
        title: String,
        #[arg(long, value_name = "TEXT")]
        content: Option<String>,
        /// Label to attach (repeatable)
        #[arg(long = "label", value_name = "LABEL")]
        labels: Vec<String>,
        #[arg(long)]
        pinned: bool,
        #[arg(long, value_name = "VISIBILITY")]
        visibility: Option<String>,
    },
    /// Delete a note
    #[command(alias = "delete")]
    Remove {
        id: String,
    },
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// Change display name or email
    Update {
        #[arg(long, value_name = "NAME")]
        name: Option<String>,
        #[arg(long, value_name = "EMAIL")]
        email: Option<String>,
    },
    /// Change the account password
    Password {
        #[arg(long, value_name = "PASSWORD")]
        current: String,
        #[arg(long = "new", value_name = "PASSWORD")]
        new_password: String,
    },
}

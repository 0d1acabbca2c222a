use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::model::{Sort, StatusFilter, ThemeName};

#[derive(Parser)]
#[command(name = "td", about = concat!("taskdeck v", env!("CARGO_PKG_VERSION"), " - your task list in the terminal"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Base URL of the task store (omit for read-only snapshot mode)
    #[arg(long, env = "TASKDECK_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Snapshot file used when the store is unavailable
    #[arg(long, global = true)]
    pub snapshot: Option<PathBuf>,

    /// Color theme (indigo, purple, teal, rose)
    #[arg(long, global = true)]
    pub theme: Option<ThemeName>,

    /// Config file (default: $XDG_CONFIG_HOME/taskdeck/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List tasks from the store
    List(ListArgs),
    /// Show completion and due-date statistics
    Stats,
}

#[derive(Args, Default)]
pub struct ListArgs {
    /// Filter by status (all, active, completed)
    #[arg(long)]
    pub status: Option<StatusFilter>,
    /// Sort as <field>-<asc|desc>, e.g. priority-desc
    #[arg(long)]
    pub sort: Option<Sort>,
    /// Only tasks matching this term
    #[arg(long)]
    pub search: Option<String>,
}

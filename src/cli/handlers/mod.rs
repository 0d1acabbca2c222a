use chrono::{DateTime, Local};

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::io::store::{StoreClient, TaskService};
use crate::model::{Config, ListQuery};
use crate::ops::stats;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Load the config file and apply command-line overrides on top.
///
/// `--api-url` (or `TASKDECK_API_URL`, bound by clap) wins over the file;
/// an empty value clears the file's URL and selects read-only mode.
pub fn build_config(cli: &Cli) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = config_io::load_config(cli.config.as_deref())?;
    if let Some(url) = &cli.api_url {
        config.api.base_url = Some(url.clone());
    }
    if let Some(path) = &cli.snapshot {
        config.snapshot.path = path.clone();
    }
    if let Some(theme) = cli.theme {
        config.ui.theme = theme;
    }
    Ok(config)
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = build_config(&cli)?;
    let json = cli.json;

    match cli.command {
        None => crate::tui::run(&config),
        Some(Commands::List(args)) => cmd_list(&config, args, json),
        Some(Commands::Stats) => cmd_stats(&config, json),
    }
}

/// The list query for `td list`: config defaults, overridden by flags
fn list_query(config: &Config, args: ListArgs) -> ListQuery {
    ListQuery {
        sort: args.sort.unwrap_or(config.ui.sort),
        status: args.status.unwrap_or(config.ui.filter),
        search: args.search.unwrap_or_default(),
    }
}

fn cmd_list(config: &Config, args: ListArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let client = StoreClient::from_config(config)?;
    let query = list_query(config, args);
    tracing::debug!(?query, "listing tasks");
    let tasks = client.list(&query)?;
    let now = Local::now();

    if json {
        let out: Vec<TaskJson> = tasks.iter().map(|t| task_to_json(t, now)).collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for line in format_task_listing(&tasks, now) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_stats(config: &Config, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let client = StoreClient::from_config(config)?;
    // Stats cover the whole collection, whatever the configured filter
    let tasks = client.list(&ListQuery::default())?;
    let now: DateTime<Local> = Local::now();
    let s = stats::stats(&tasks, now);

    if json {
        println!("{}", serde_json::to_string_pretty(&s)?);
    } else {
        for line in format_stats(&s) {
            println!("{}", line);
        }
    }
    Ok(())
}

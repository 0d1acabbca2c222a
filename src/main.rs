use clap::Parser;
use taskdeck::cli::commands::Cli;
use taskdeck::cli::handlers;
use taskdeck::logging;

fn main() {
    let cli = Cli::parse();

    // The TUI owns the terminal, so it logs to a file; subcommands use stderr
    let _log_guard = if cli.command.is_none() {
        logging::init_file()
    } else {
        logging::init_stderr(cli.verbose);
        None
    };

    if let Err(e) = handlers::dispatch(cli) {
        tracing::error!(error = %e, "command failed");
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

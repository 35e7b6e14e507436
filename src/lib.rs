pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod error_suggestions;
pub mod pipeline;
pub mod project_identity;
pub mod tools;
pub mod traits;
pub mod ui;
pub mod utils;
pub mod vars;

use clap::Parser;
use error::MnqnError;
use error_suggestions::ErrorSuggestions;
use std::process::exit;

/// Run mnqnctl CLI entrypoint.
pub fn run_cli() {
    // 1. Parse first so --no-color applies to everything after
    let args = match cli::args::Cli::parse().normalized() {
        Ok(args) => args,
        Err(e) => {
            ui::init_colors(false);
            ui::error(&e.to_string());
            exit(e.exit_code());
        }
    };
    ui::init_colors(args.global.no_color);
    ui::set_quiet(args.global.quiet);
    ui::set_verbose(args.global.verbose);

    // 2. Signal handling
    if let Err(e) = ctrlc::set_handler(move || {
        eprintln!();
        ui::warning("Operation cancelled by user.");
        exit(MnqnError::Interrupted.exit_code());
    }) {
        ui::warning(&format!("Couldn't install Ctrl-C handler: {}", e));
    }

    // 3. Run
    if let Err(e) = cli::dispatcher::dispatch(&args) {
        ui::error(&e.display_with_suggestion());
        exit(e.exit_code());
    }
}

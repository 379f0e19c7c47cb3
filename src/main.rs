use clap::{CommandFactory, Parser};
use todo::cli::commands::Cli;
use todo::cli::handlers;

fn main() {
    let cli = Cli::parse();

    if cli.command.is_none() {
        // No arguments → usage
        let _ = Cli::command().print_help();
        return;
    }

    if let Err(e) = handlers::dispatch(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

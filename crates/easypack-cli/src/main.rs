mod cli;
mod commands;
mod logging;
mod render;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands, Verbosity};
use colored::Colorize;

fn main() {
    let cli = Cli::parse();
    let verbosity = cli.verbosity();
    logging::init(verbosity);

    // JSON output must stay machine-readable, so no status banner
    let json = matches!(&cli.command, Commands::Generate(args) if args.json);

    let result = match cli.command {
        Commands::Completion(args) => {
            clap_complete::generate(
                args.shell,
                &mut Cli::command(),
                "easypack",
                &mut std::io::stdout(),
            );
            return;
        }
        Commands::Generate(args) => {
            commands::generate::run(cli.config.as_deref(), args, verbosity)
        }
        Commands::Init(args) => commands::init::run(args),
    };

    match result {
        Ok(()) => {
            if verbosity != Verbosity::Quiet && !json {
                println!("\n{}", "SUCCESS".green().bold());
            }
        }
        Err(e) => {
            eprintln!("\n{} {:#}", "FAILED".red().bold(), e);
            std::process::exit(1);
        }
    }
}

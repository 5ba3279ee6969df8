use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use easypack_core::config;

use crate::render::display_path;

/// Arguments for the `init` command
#[derive(Args, Debug, Default)]
pub struct InitArgs {
    /// Process name (defaults to the target directory name)
    pub name: Option<String>,

    /// Directory to write easypack.yaml into
    #[arg(short = 'd', long)]
    pub directory: Option<String>,
}

/// Write a starter easypack.yaml
pub fn run(args: InitArgs) -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;

    let target_dir = match args.directory.as_deref() {
        None | Some(".") => cwd.clone(),
        Some(dir) => cwd.join(dir),
    };

    let name = match args.name {
        Some(name) => name,
        None => target_dir
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("app")
            .to_string(),
    };

    println!(
        "{} Initializing '{}' in '{}'...\n",
        "$".cyan(),
        name.bold(),
        display_path(&target_dir, &cwd)
    );

    let path = config::write_starter_config(&target_dir, &name)?;

    println!("{} {}", "Created:".green().bold(), display_path(&path, &cwd));
    println!(
        "\n{} Run '{}' to write the start scripts.",
        "i".blue(),
        "easypack generate".cyan()
    );

    Ok(())
}

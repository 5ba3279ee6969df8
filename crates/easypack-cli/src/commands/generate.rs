use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Args;
use colored::Colorize;

use easypack_core::config::pre_start::PreStartConfig;
use easypack_core::config::{self, CONFIG_FILE_NAME, PlatformsEntry, ProjectConfig};

use crate::cli::Verbosity;
use crate::render;

/// Arguments for the `generate` command. Every value set here overrides
/// the matching key of easypack.yaml.
#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// Process name; the start script launches <NAME>.jar
    #[arg(long)]
    pub name: Option<String>,

    /// JVM options placed before -jar (e.g. "-Xmx512m")
    #[arg(long, allow_hyphen_values = true)]
    pub opts: Option<String>,

    /// Program arguments placed after the jar
    #[arg(long = "args", allow_hyphen_values = true)]
    pub program_args: Option<String>,

    /// Comma-separated target platforms (linux, windows)
    #[arg(short, long)]
    pub platforms: Option<String>,

    /// Echo mode: "" (off), all, java
    #[arg(long)]
    pub echo: Option<String>,

    /// Also generate shutdown.sh (linux only)
    #[arg(long)]
    pub shutdown: bool,

    /// Do not generate a shutdown script even if easypack.yaml asks for one
    #[arg(long, conflicts_with = "shutdown")]
    pub no_shutdown: bool,

    /// Output folder (wiped before generation)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Pre-start fragment merged into start.sh
    #[arg(long)]
    pub pre_start_linux: Option<String>,

    /// Pre-start fragment merged into start.bat
    #[arg(long)]
    pub pre_start_windows: Option<String>,

    /// Print the scripts that would be generated without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Print the list of generated files as JSON
    #[arg(long, conflicts_with = "dry_run")]
    pub json: bool,
}

impl GenerateArgs {
    /// Turn the flags into a config overlay. Paths are made absolute against
    /// `cwd` so they mean what the user typed, not something relative to
    /// the config file.
    fn overrides(&self, cwd: &Path) -> ProjectConfig {
        let absolute = |p: &String| cwd.join(p).display().to_string();

        let pre_start = if self.pre_start_linux.is_some() || self.pre_start_windows.is_some() {
            Some(PreStartConfig {
                linux: self.pre_start_linux.as_ref().map(absolute),
                windows: self.pre_start_windows.as_ref().map(absolute),
            })
        } else {
            None
        };

        let shutdown = match (self.shutdown, self.no_shutdown) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };

        ProjectConfig {
            name: self.name.clone(),
            opts: self.opts.clone(),
            args: self.program_args.clone(),
            platforms: self.platforms.clone().map(PlatformsEntry::Csv),
            pre_start,
            echo: self.echo.clone(),
            shutdown,
            output: self.output.as_ref().map(absolute),
        }
    }
}

/// Locate and parse easypack.yaml, returning the project root and its config.
///
/// Without a config file the current directory is the root, which is only
/// allowed when `--name` supplies the one required value.
fn load_project(
    explicit: Option<&Path>,
    cwd: &Path,
    has_name_override: bool,
) -> Result<(PathBuf, ProjectConfig)> {
    let path = match explicit {
        Some(path) => Some(cwd.join(path)),
        None => config::find_config(cwd),
    };

    match path {
        Some(path) => {
            let root = path
                .parent()
                .context("Config file has no parent directory")?
                .to_path_buf();
            let project = config::parse_config(&path)?;
            tracing::debug!(config = %path.display(), "loaded configuration");
            Ok((root, project))
        }
        None if has_name_override => Ok((cwd.to_path_buf(), ProjectConfig::default())),
        None => bail!(
            "Could not find {CONFIG_FILE_NAME} in '{}' or any parent directory.\n\
             \n\
             Hint: Run 'easypack init' to create one, or pass --name to generate without it.",
            cwd.display()
        ),
    }
}

/// Generate the scripts
pub fn run(config_path: Option<&Path>, args: GenerateArgs, verbosity: Verbosity) -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;

    let overrides = args.overrides(&cwd);
    let (root, project) = load_project(config_path, &cwd, overrides.name.is_some())?;
    let launch = project.merge(overrides).resolve(&root)?;

    if args.dry_run {
        let scripts = easypack_core::plan(&launch)?;
        render::print_plan(&launch, &scripts, &cwd);
        println!(
            "\n{}",
            "DRY RUN: no scripts were written.".yellow().bold()
        );
        return Ok(());
    }

    if !args.json && verbosity != Verbosity::Quiet {
        render::print_header(&launch, &cwd);
    }

    let report = easypack_core::generate(&launch).context("Failed to create scripts")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if verbosity != Verbosity::Quiet {
        render::print_report(&report, &cwd);
    }

    Ok(())
}

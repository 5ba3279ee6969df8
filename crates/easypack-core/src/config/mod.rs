pub mod pre_start;

use std::ffi::OsString;
use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::platform::{Platform, PlatformSet};
use crate::script::ScriptKind;

use self::pre_start::{PreStart, PreStartConfig};

/// Name of the project configuration file.
pub const CONFIG_FILE_NAME: &str = "easypack.yaml";

/// Platforms generated when none are configured.
pub const DEFAULT_PLATFORMS: &str = "linux, windows";

/// Output folder, relative to the project root, when none is configured.
pub const DEFAULT_OUTPUT_DIR: &str = "target/bin";

/// Which part of a start script echoes its commands while running.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EchoMode {
    /// No echo directives at all
    #[default]
    None,
    /// Echo every command of the script
    All,
    /// Echo only the java launch line
    Java,
}

impl FromStr for EchoMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "none" => Ok(EchoMode::None),
            "all" => Ok(EchoMode::All),
            "java" => Ok(EchoMode::Java),
            other => Err(Error::config(format!(
                "unknown echo mode '{other}' (expected \"\", \"all\" or \"java\")"
            ))),
        }
    }
}

impl fmt::Display for EchoMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EchoMode::None => "none",
            EchoMode::All => "all",
            EchoMode::Java => "java",
        })
    }
}

/// The `platforms` key accepts either `"linux, windows"` or a YAML list.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum PlatformsEntry {
    List(Vec<String>),
    Csv(String),
}

impl PlatformsEntry {
    pub fn parse(&self) -> Result<PlatformSet> {
        match self {
            PlatformsEntry::List(names) => PlatformSet::from_tokens(names),
            PlatformsEntry::Csv(raw) => PlatformSet::parse(raw),
        }
    }
}

/// `easypack.yaml` as written by the user. Every key is optional here so that
/// command-line flags can fill or override it; [`ProjectConfig::resolve`]
/// applies defaults and validates.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    /// Process / artifact name; the launched jar is `<name>.jar`
    #[serde(default, alias = "processName")]
    pub name: Option<String>,

    /// JVM options inserted before `-jar`
    #[serde(default)]
    pub opts: Option<String>,

    /// Program arguments appended after the jar
    #[serde(default)]
    pub args: Option<String>,

    /// Target platforms (default: linux, windows)
    #[serde(default)]
    pub platforms: Option<PlatformsEntry>,

    /// Fragments merged into the start scripts before the launch line
    #[serde(default, alias = "start")]
    pub pre_start: Option<PreStartConfig>,

    /// Echo mode: "", "all" or "java"
    #[serde(default)]
    pub echo: Option<String>,

    /// Also generate a shutdown script (linux only)
    #[serde(default)]
    pub shutdown: Option<bool>,

    /// Destination folder for generated scripts (default: target/bin)
    #[serde(default)]
    pub output: Option<String>,
}

impl ProjectConfig {
    /// Overlay `overrides` on top of `self`: every field set there wins.
    pub fn merge(mut self, overrides: ProjectConfig) -> Self {
        if overrides.name.is_some() {
            self.name = overrides.name;
        }
        if overrides.opts.is_some() {
            self.opts = overrides.opts;
        }
        if overrides.args.is_some() {
            self.args = overrides.args;
        }
        if overrides.platforms.is_some() {
            self.platforms = overrides.platforms;
        }
        if let Some(pre_start) = overrides.pre_start {
            self.pre_start
                .get_or_insert_with(PreStartConfig::default)
                .merge(pre_start);
        }
        if overrides.echo.is_some() {
            self.echo = overrides.echo;
        }
        if overrides.shutdown.is_some() {
            self.shutdown = overrides.shutdown;
        }
        if overrides.output.is_some() {
            self.output = overrides.output;
        }
        self
    }

    /// Apply defaults and validate, producing the immutable [`LaunchConfig`].
    ///
    /// Relative paths (output folder, pre-start fragments) resolve against
    /// `root`, normally the directory holding `easypack.yaml`.
    pub fn resolve(&self, root: &Path) -> Result<LaunchConfig> {
        let process_name = self.name.as_deref().map(str::trim).unwrap_or_default();

        let platforms = match &self.platforms {
            Some(entry) => entry.parse()?,
            None => PlatformSet::parse(DEFAULT_PLATFORMS)?,
        };

        let echo = match &self.echo {
            Some(raw) => raw.parse()?,
            None => EchoMode::default(),
        };

        let output = self.output.as_deref().unwrap_or(DEFAULT_OUTPUT_DIR);
        let output_dir = normalize(&root.join(output));
        let pre_start = PreStart::resolve(&self.pre_start.clone().unwrap_or_default(), root);

        let launch = LaunchConfig {
            process_name: process_name.to_string(),
            opts: self.opts.as_deref().unwrap_or_default().trim().to_string(),
            args: self.args.as_deref().unwrap_or_default().trim().to_string(),
            platforms,
            echo,
            shutdown: self.shutdown.unwrap_or(false),
            pre_start,
            output_dir,
        };
        launch.validate()?;
        Ok(launch)
    }
}

/// Fully resolved, validated configuration for one generation run.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchConfig {
    /// Non-empty process name; the jar is `<process_name>.jar`
    pub process_name: String,
    pub opts: String,
    pub args: String,
    pub platforms: PlatformSet,
    pub echo: EchoMode,
    pub shutdown: bool,
    pub pre_start: PreStart,
    pub output_dir: PathBuf,
}

impl LaunchConfig {
    /// Configuration with every default applied, for library callers that
    /// do not go through `easypack.yaml`.
    pub fn new(process_name: impl Into<String>, output_dir: impl Into<PathBuf>) -> Self {
        LaunchConfig {
            process_name: process_name.into(),
            opts: String::new(),
            args: String::new(),
            platforms: Platform::ALL.into_iter().collect(),
            echo: EchoMode::None,
            shutdown: false,
            pre_start: PreStart::default(),
            output_dir: output_dir.into(),
        }
    }

    /// Check the invariants every generation run relies on.
    ///
    /// [`ProjectConfig::resolve`] calls this, and so do
    /// [`crate::generate()`] and [`crate::plan()`] for configurations built
    /// by hand.
    pub fn validate(&self) -> Result<()> {
        if self.process_name.trim().is_empty() {
            return Err(Error::config("process name must not be empty"));
        }

        if self.platforms.is_empty() {
            return Err(Error::config("no target platforms selected"));
        }

        if self.shutdown && !self.platforms.iter().any(|p| ScriptKind::Shutdown.supports(p)) {
            return Err(Error::config(format!(
                "shutdown script requested but none of the selected platforms ({}) supports it",
                self.platforms
            )));
        }

        let output_dir = real_path(&self.output_dir);
        for platform in self.platforms.iter() {
            if let Some(source) = self.pre_start.source(platform)
                && (source.explicit || source.path.exists())
                && real_path(&source.path).starts_with(&output_dir)
            {
                return Err(Error::config(format!(
                    "pre-start fragment '{}' lies inside the output folder '{}' and would be deleted before it is read",
                    source.path.display(),
                    self.output_dir.display()
                )));
            }
        }

        Ok(())
    }

    /// File name of the launched artifact.
    pub fn jar_name(&self) -> String {
        format!("{}.jar", self.process_name)
    }

    /// Script kinds to generate, in writer order.
    pub fn script_kinds(&self) -> Vec<ScriptKind> {
        let mut kinds = vec![ScriptKind::Start];
        if self.shutdown {
            kinds.push(ScriptKind::Shutdown);
        }
        kinds
    }
}

/// Read and parse an `easypack.yaml` file.
pub fn parse_config(path: &Path) -> Result<ProjectConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;

    yaml_serde::from_str(&content)
        .map_err(|e| Error::config(format!("failed to parse {}: {e}", path.display())))
}

/// Find `easypack.yaml` in `start` or any of its parent directories.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    let mut dir = start;
    loop {
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        dir = dir.parent()?;
    }
}

/// Write a commented starter `easypack.yaml` into `dir`.
///
/// Refuses to overwrite an existing file.
pub fn write_starter_config(dir: &Path, name: &str) -> Result<PathBuf> {
    let path = dir.join(CONFIG_FILE_NAME);
    if path.exists() {
        return Err(Error::config(format!(
            "{} already exists. Remove it first or use a different directory.",
            path.display()
        )));
    }

    let quoted_name = format!("\"{}\"", name.replace('\\', "\\\\").replace('"', "\\\""));
    let content = format!(
        r#"# Process name. The start script launches <name>.jar
name: {quoted_name}

# JVM options placed before -jar, e.g. -Xmx512m -Dfile.encoding=UTF-8
opts: ""

# Program arguments placed after the jar
args: ""

# Comma-separated target platforms: linux, windows
platforms: {DEFAULT_PLATFORMS}

# Echo commands while the start script runs: "" (off), all, java
echo: ""

# Also generate shutdown.sh (linux only)
shutdown: false

# Where scripts are written, relative to this file. Wiped on every run.
output: {DEFAULT_OUTPUT_DIR}

# Script fragments merged into the start scripts right before the java line.
# The defaults below are picked up whenever the files exist.
# preStart:
#   linux: bin/start-linux
#   windows: bin/start-windows
"#
    );

    std::fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
    std::fs::write(&path, content).map_err(|e| Error::io(&path, e))?;
    Ok(path)
}

/// Lexically clean a path (drop `.`, fold `..`) without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}

/// Absolute form of `path` with symlinks followed through its longest
/// existing prefix. The missing remainder is appended as written.
fn real_path(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let normalized = normalize(&absolute);
    let mut missing: Vec<OsString> = Vec::new();
    for ancestor in normalized.ancestors() {
        if let Ok(real) = ancestor.canonicalize() {
            return missing.iter().rev().fold(real, |acc, part| acc.join(part));
        }
        if let Some(name) = ancestor.file_name() {
            missing.push(name.to_os_string());
        }
    }
    normalized
}

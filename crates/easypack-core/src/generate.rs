use std::path::PathBuf;

use serde::Serialize;

use crate::config::LaunchConfig;
use crate::dispatch::{self, RenderedScript};
use crate::error::Result;
use crate::output;
use crate::platform::Platform;
use crate::script::{ScriptKind, ScriptWriter, ShutdownScriptWriter, StartScriptWriter};

/// A script written to disk by [`generate`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedFile {
    pub kind: ScriptKind,
    pub platform: Platform,
    pub path: PathBuf,
    pub bytes: usize,
}

/// Outcome of a successful generation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationReport {
    pub output_dir: PathBuf,
    pub files: Vec<GeneratedFile>,
}

fn writer_for(kind: ScriptKind, config: &LaunchConfig) -> Box<dyn ScriptWriter + '_> {
    match kind {
        ScriptKind::Start => Box::new(StartScriptWriter::new(config)),
        ScriptKind::Shutdown => Box::new(ShutdownScriptWriter::new(config)),
    }
}

/// Render with the writer sequence for `config`: start, then shutdown when enabled.
fn run<F>(config: &LaunchConfig, sink: F) -> Result<()>
where
    F: FnMut(RenderedScript) -> Result<()>,
{
    let writers: Vec<Box<dyn ScriptWriter + '_>> = config
        .script_kinds()
        .into_iter()
        .map(|kind| writer_for(kind, config))
        .collect();
    let writers: Vec<&dyn ScriptWriter> = writers.iter().map(|w| w.as_ref()).collect();
    dispatch::dispatch(&config.platforms, &writers, sink)
}

/// Generate every script for `config` into its output folder.
///
/// `config` is validated before anything on disk changes. The folder is
/// then wiped. There is no rollback: if a later step fails,
/// scripts written before the failure stay on disk.
pub fn generate(config: &LaunchConfig) -> Result<GenerationReport> {
    config.validate()?;

    tracing::info!(
        process = %config.process_name,
        platforms = %config.platforms,
        output = %config.output_dir.display(),
        "generating scripts"
    );

    output::prepare(&config.output_dir)?;

    let mut files = Vec::new();
    run(config, |script| {
        let path = output::write_script(&config.output_dir, &script)?;
        files.push(GeneratedFile {
            kind: script.kind,
            platform: script.platform,
            path,
            bytes: script.content.len(),
        });
        Ok(())
    })?;

    Ok(GenerationReport {
        output_dir: config.output_dir.clone(),
        files,
    })
}

/// Render every script for `config` without touching the output folder.
pub fn plan(config: &LaunchConfig) -> Result<Vec<RenderedScript>> {
    config.validate()?;
    let mut scripts = Vec::new();
    run(config, |script| {
        scripts.push(script);
        Ok(())
    })?;
    Ok(scripts)
}

use crate::config::{EchoMode, LaunchConfig};
use crate::error::Result;
use crate::platform::Platform;

use super::{GENERATED_NOTICE, ScriptKind, ScriptText, ScriptWriter, quote_token};

/// Writes `start.sh` / `start.bat`: preamble, optional echo directive,
/// the merged pre-start fragment, then the java launch line.
#[derive(Debug, Clone, Copy)]
pub struct StartScriptWriter<'a> {
    config: &'a LaunchConfig,
}

impl<'a> StartScriptWriter<'a> {
    pub fn new(config: &'a LaunchConfig) -> Self {
        Self { config }
    }

    /// `java [opts] -jar <name>.jar [args]`, with no empty tokens.
    pub fn launch_line(&self, platform: Platform) -> String {
        let jar = self.config.jar_name();
        let mut parts: Vec<&str> = vec!["java"];
        if !self.config.opts.is_empty() {
            parts.push(&self.config.opts);
        }
        parts.push("-jar");
        let jar = quote_token(platform, &jar);
        parts.push(&jar);
        if !self.config.args.is_empty() {
            parts.push(&self.config.args);
        }
        parts.join(" ")
    }

    fn render(&self, platform: Platform, preamble: &[&str], echo_on: &str) -> Result<String> {
        let fragment = self.config.pre_start.read(platform)?;

        let mut text = ScriptText::new(platform);
        for line in preamble {
            text.line(*line);
        }
        text.comment(&format!(
            "Start script for {}. {GENERATED_NOTICE}",
            self.config.process_name
        ));

        if self.config.echo == EchoMode::All && platform == Platform::Linux {
            text.line(echo_on);
        }
        if let Some(fragment) = fragment {
            text.block(&fragment);
        }
        if self.config.echo == EchoMode::Java {
            text.line(echo_on);
        }
        text.line(self.launch_line(platform));

        Ok(text.finish())
    }
}

impl ScriptWriter for StartScriptWriter<'_> {
    fn kind(&self) -> ScriptKind {
        ScriptKind::Start
    }

    fn linux(&self) -> Result<String> {
        self.render(Platform::Linux, &["#!/bin/sh"], "set -x")
    }

    fn windows(&self) -> Result<String> {
        // With echo "all" the header itself is the echo directive.
        let header = match self.config.echo {
            EchoMode::All => "@echo on",
            EchoMode::None | EchoMode::Java => "@echo off",
        };
        self.render(Platform::Windows, &[header], "@echo on")
    }
}

use crate::config::LaunchConfig;
use crate::error::{Error, Result};
use crate::platform::Platform;

use super::{GENERATED_NOTICE, ScriptKind, ScriptText, ScriptWriter, quote_token};

/// Writes `shutdown.sh`, which finds the running `java -jar <name>.jar`
/// process by its command line and sends it SIGTERM.
///
/// Only linux is supported; [`ScriptWriter::windows`] always fails.
#[derive(Debug, Clone, Copy)]
pub struct ShutdownScriptWriter<'a> {
    config: &'a LaunchConfig,
}

impl<'a> ShutdownScriptWriter<'a> {
    pub fn new(config: &'a LaunchConfig) -> Self {
        Self { config }
    }

    /// `pgrep -f` pattern matching the launch line's `-jar <name>.jar`.
    ///
    /// The jar must be followed by a space or the end of the command line,
    /// so `app.jar.bak` or `app.jarvis` never match.
    pub fn process_pattern(&self) -> String {
        format!("-jar {}( |$)", escape_ere(&self.config.jar_name()))
    }
}

impl ScriptWriter for ShutdownScriptWriter<'_> {
    fn kind(&self) -> ScriptKind {
        ScriptKind::Shutdown
    }

    fn linux(&self) -> Result<String> {
        let name = &self.config.process_name;
        let pattern = self.process_pattern();

        let mut text = ScriptText::new(Platform::Linux);
        text.line("#!/bin/sh")
            .comment(&format!("Shutdown script for {name}. {GENERATED_NOTICE}"))
            .line(format!(
                "PIDS=$(pgrep -f -- {})",
                quote_token(Platform::Linux, &pattern)
            ))
            .line("if [ -z \"$PIDS\" ]; then")
            .line(format!(
                "    echo {}",
                quote_token(Platform::Linux, &format!("{name} is not running"))
            ))
            .line("    exit 1")
            .line("fi")
            .line(format!(
                "echo {}",
                quote_token(Platform::Linux, &format!("Stopping {name}"))
            ))
            .line("kill $PIDS");

        Ok(text.finish())
    }

    fn windows(&self) -> Result<String> {
        Err(Error::UnsupportedOperation {
            script: ScriptKind::Shutdown,
            platform: Platform::Windows,
        })
    }
}

/// Escape POSIX extended regular expression metacharacters.
fn escape_ere(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if r"\.[]()*+?{}|^$".contains(c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

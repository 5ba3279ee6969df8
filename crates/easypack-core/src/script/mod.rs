pub mod shutdown;
pub mod start;

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;

use crate::error::Result;
use crate::platform::Platform;

pub use shutdown::ShutdownScriptWriter;
pub use start::StartScriptWriter;

/// Comment placed under the preamble of every generated script.
pub(crate) const GENERATED_NOTICE: &str = "Generated by easypack. Do not edit.";

/// The kinds of script a generation run can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptKind {
    Start,
    Shutdown,
}

impl ScriptKind {
    pub fn name(self) -> &'static str {
        match self {
            ScriptKind::Start => "start",
            ScriptKind::Shutdown => "shutdown",
        }
    }

    /// Shutdown scripts only exist for linux.
    pub fn supports(self, platform: Platform) -> bool {
        match self {
            ScriptKind::Start => true,
            ScriptKind::Shutdown => platform == Platform::Linux,
        }
    }

    /// Platform file name, e.g. `start.bat` or `shutdown.sh`.
    pub fn file_name(self, platform: Platform) -> String {
        format!("{}.{}", self.name(), platform.script_extension())
    }
}

impl fmt::Display for ScriptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Produces the text of one kind of script, with one method per platform.
///
/// Adding a platform means adding a method here and an arm in
/// [`crate::dispatch::render`]; the compiler then points at every writer
/// that still needs it.
pub trait ScriptWriter {
    fn kind(&self) -> ScriptKind;

    fn supports(&self, platform: Platform) -> bool {
        self.kind().supports(platform)
    }

    fn linux(&self) -> Result<String>;

    fn windows(&self) -> Result<String>;
}

/// Line-oriented script text that is joined with the platform's line ending.
#[derive(Debug)]
pub(crate) struct ScriptText {
    platform: Platform,
    lines: Vec<String>,
}

impl ScriptText {
    pub(crate) fn new(platform: Platform) -> Self {
        Self {
            platform,
            lines: Vec::new(),
        }
    }

    pub(crate) fn line(&mut self, line: impl Into<String>) -> &mut Self {
        self.lines.push(line.into());
        self
    }

    pub(crate) fn comment(&mut self, text: &str) -> &mut Self {
        let line = format!("{} {}", self.platform.comment_prefix(), text);
        self.line(line)
    }

    /// Append externally authored content verbatim, one entry per source line.
    ///
    /// Trailing blank lines are dropped so the result does not depend on
    /// whether the source ended with a newline.
    pub(crate) fn block(&mut self, content: &str) -> &mut Self {
        let mut lines: Vec<&str> = content
            .lines()
            .map(|l| l.strip_suffix('\r').unwrap_or(l))
            .collect();
        while lines.last().is_some_and(|l| l.trim().is_empty()) {
            lines.pop();
        }
        self.lines.extend(lines.into_iter().map(str::to_string));
        self
    }

    /// Join every line with the platform line ending, ending with one too.
    pub(crate) fn finish(&self) -> String {
        let eol = self.platform.line_ending();
        let mut out = self.lines.join(eol);
        out.push_str(eol);
        out
    }
}

/// Quote a single token so the platform shell passes it through as one word.
///
/// Tokens made only of characters the shell leaves alone are returned as is.
/// On windows `%` is always doubled.
pub fn quote_token(platform: Platform, token: &str) -> Cow<'_, str> {
    match platform {
        Platform::Linux => {
            let safe = !token.is_empty()
                && token
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || "_-./+=:@%,".contains(c));
            if safe {
                Cow::Borrowed(token)
            } else {
                Cow::Owned(format!("'{}'", token.replace('\'', r"'\''")))
            }
        }
        Platform::Windows => {
            let needs_quotes = token.is_empty()
                || token
                    .chars()
                    .any(|c| c.is_whitespace() || "&|<>^(),;=\"".contains(c));
            // Batch files expand `%` even inside double quotes
            let token: Cow<'_, str> = if token.contains('%') {
                Cow::Owned(token.replace('%', "%%"))
            } else {
                Cow::Borrowed(token)
            };
            if needs_quotes {
                Cow::Owned(format!("\"{}\"", token.replace('"', "\"\"")))
            } else {
                token
            }
        }
    }
}

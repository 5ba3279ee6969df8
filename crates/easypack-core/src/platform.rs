use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{Error, Result};

/// Target operating-system family. Each one needs its own script syntax.
///
/// The declaration order is the generation order: platforms are always
/// dispatched linux first, then windows, whatever order they were listed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Linux,
    Windows,
}

impl Platform {
    /// Every known platform, in generation order.
    pub const ALL: [Platform; 2] = [Platform::Linux, Platform::Windows];

    /// Lowercase name used in configuration and file names.
    pub fn name(self) -> &'static str {
        match self {
            Platform::Linux => "linux",
            Platform::Windows => "windows",
        }
    }

    /// Comma-separated list of every known platform name.
    pub fn names() -> String {
        Self::ALL
            .iter()
            .map(|p| p.name())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// File extension of scripts for this platform.
    pub fn script_extension(self) -> &'static str {
        match self {
            Platform::Linux => "sh",
            Platform::Windows => "bat",
        }
    }

    pub fn line_ending(self) -> &'static str {
        match self {
            Platform::Linux => "\n",
            Platform::Windows => "\r\n",
        }
    }

    /// Prefix that turns a line into a comment.
    pub fn comment_prefix(self) -> &'static str {
        match self {
            Platform::Linux => "#",
            Platform::Windows => "rem",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Platform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let token = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(token))
            .ok_or_else(|| Error::UnsupportedPlatform(token.to_string()))
    }
}

/// A deduplicated set of platforms that iterates in generation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformSet(BTreeSet<Platform>);

impl PlatformSet {
    /// Parse a comma-separated platform list such as `"linux, windows"`.
    ///
    /// Tokens are trimmed and matched case-insensitively. Empty tokens are
    /// ignored, so `""` and `" , "` both yield an empty set. The first unknown
    /// token aborts parsing.
    pub fn parse(raw: &str) -> Result<Self> {
        Self::from_tokens(raw.split(','))
    }

    /// Parse individual platform names, e.g. from a YAML list.
    pub fn from_tokens<I, S>(tokens: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = BTreeSet::new();
        for token in tokens {
            let token = token.as_ref().trim();
            if token.is_empty() {
                continue;
            }
            set.insert(token.parse::<Platform>()?);
        }
        Ok(PlatformSet(set))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, platform: Platform) -> bool {
        self.0.contains(&platform)
    }

    /// Iterate in generation order.
    pub fn iter(&self) -> impl Iterator<Item = Platform> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Platform> for PlatformSet {
    fn from_iter<T: IntoIterator<Item = Platform>>(iter: T) -> Self {
        PlatformSet(iter.into_iter().collect())
    }
}

impl fmt::Display for PlatformSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(Platform::name).collect();
        f.write_str(&names.join(", "))
    }
}

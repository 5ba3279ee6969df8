use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::platform::Platform;
use crate::script::ScriptKind;

/// Errors raised while resolving configuration or generating scripts.
///
/// Every variant is fatal for a generation run: nothing is retried and the
/// caller reports the first error it sees.
#[derive(Debug, Error)]
pub enum Error {
    /// A platform token did not match any known platform.
    #[error("Unsupported platform '{0}' (supported: {supported})", supported = Platform::names())]
    UnsupportedPlatform(String),

    /// Invalid value or combination of values in the configuration.
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// A writer was asked to render a script for a platform it does not support.
    #[error("{script} scripts are not supported on {platform}")]
    UnsupportedOperation { script: ScriptKind, platform: Platform },

    /// Filesystem failure while preparing the output folder or writing a script.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    pub(crate) fn config<S: Into<String>>(message: S) -> Self {
        Error::Configuration(message.into())
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

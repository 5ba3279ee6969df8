//! easypack-core: start and shutdown script generation for packaged JVM
//! applications.
//!
//! The pipeline is synchronous and single-threaded: resolve a
//! [`config::LaunchConfig`], wipe the output folder, then let every script
//! writer render once per selected platform, writing one file at a time.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod generate;
pub mod output;
pub mod platform;
pub mod script;

pub use config::{EchoMode, LaunchConfig, ProjectConfig};
pub use error::{Error, Result};
pub use generate::{GeneratedFile, GenerationReport, generate, plan};
pub use platform::{Platform, PlatformSet};
pub use script::{ScriptKind, ScriptWriter};

use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::platform::Platform;

/// Per-platform pre-start fragment paths as written in `easypack.yaml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct PreStartConfig {
    /// Fragment merged into `start.sh` (default: `bin/start-linux`)
    #[serde(default)]
    pub linux: Option<String>,

    /// Fragment merged into `start.bat` (default: `bin/start-windows`)
    #[serde(default)]
    pub windows: Option<String>,
}

impl PreStartConfig {
    fn path_for(&self, platform: Platform) -> Option<&str> {
        match platform {
            Platform::Linux => self.linux.as_deref(),
            Platform::Windows => self.windows.as_deref(),
        }
    }

    /// Fields set in `other` replace the ones in `self`.
    pub fn merge(&mut self, other: PreStartConfig) {
        if other.linux.is_some() {
            self.linux = other.linux;
        }
        if other.windows.is_some() {
            self.windows = other.windows;
        }
    }
}

/// Default fragment location for a platform, relative to the project root.
pub fn default_fragment_path(platform: Platform) -> PathBuf {
    Path::new("bin").join(format!("start-{}", platform.name()))
}

/// Where a platform's fragment is looked up.
#[derive(Debug, Clone, PartialEq)]
pub struct FragmentSource {
    pub path: PathBuf,
    /// Set when the path came from configuration rather than the default.
    pub explicit: bool,
}

/// Resolved pre-start fragments: at most one fragment source per platform.
///
/// Fragments are only read when the matching start script is rendered. A
/// missing file means "nothing to merge".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreStart {
    linux: Option<FragmentSource>,
    windows: Option<FragmentSource>,
}

impl PreStart {
    /// Resolve configured paths against `root`, falling back to the defaults.
    pub fn resolve(config: &PreStartConfig, root: &Path) -> Self {
        let source = |platform: Platform| {
            let (path, explicit) = match config.path_for(platform) {
                Some(p) => (root.join(p), true),
                None => (root.join(default_fragment_path(platform)), false),
            };
            FragmentSource { path, explicit }
        };
        PreStart {
            linux: Some(source(Platform::Linux)),
            windows: Some(source(Platform::Windows)),
        }
    }

    /// Use exactly this fragment for `platform`.
    pub fn with_fragment(mut self, platform: Platform, path: impl Into<PathBuf>) -> Self {
        let source = Some(FragmentSource {
            path: path.into(),
            explicit: true,
        });
        match platform {
            Platform::Linux => self.linux = source,
            Platform::Windows => self.windows = source,
        }
        self
    }

    pub fn source(&self, platform: Platform) -> Option<&FragmentSource> {
        match platform {
            Platform::Linux => self.linux.as_ref(),
            Platform::Windows => self.windows.as_ref(),
        }
    }

    /// Read the fragment for `platform`, if one exists on disk.
    pub fn read(&self, platform: Platform) -> Result<Option<String>> {
        let Some(source) = self.source(platform) else {
            return Ok(None);
        };

        match std::fs::read_to_string(&source.path) {
            Ok(content) => {
                tracing::debug!(
                    platform = %platform,
                    path = %source.path.display(),
                    "merging pre-start fragment"
                );
                Ok(Some(content))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                if source.explicit {
                    tracing::warn!(
                        platform = %platform,
                        path = %source.path.display(),
                        "configured pre-start fragment does not exist, nothing merged"
                    );
                }
                Ok(None)
            }
            Err(e) => Err(Error::io(&source.path, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_paths() {
        let root = Path::new("/project");
        let pre_start = PreStart::resolve(&PreStartConfig::default(), root);

        let linux = pre_start.source(Platform::Linux).unwrap();
        assert_eq!(linux.path, PathBuf::from("/project/bin/start-linux"));
        assert!(!linux.explicit);

        let windows = pre_start.source(Platform::Windows).unwrap();
        assert_eq!(windows.path, PathBuf::from("/project/bin/start-windows"));
    }

    #[test]
    fn test_configured_path_is_explicit() {
        let config = PreStartConfig {
            linux: Some("scripts/env.sh".to_string()),
            windows: None,
        };
        let pre_start = PreStart::resolve(&config, Path::new("/project"));
        let linux = pre_start.source(Platform::Linux).unwrap();
        assert_eq!(linux.path, PathBuf::from("/project/scripts/env.sh"));
        assert!(linux.explicit);
        assert!(!pre_start.source(Platform::Windows).unwrap().explicit);
    }

    #[test]
    fn test_read_missing_fragment_is_none() {
        let dir = TempDir::new().unwrap();
        let pre_start = PreStart::resolve(&PreStartConfig::default(), dir.path());
        assert_eq!(pre_start.read(Platform::Linux).unwrap(), None);
        assert_eq!(PreStart::default().read(Platform::Windows).unwrap(), None);
    }

    #[test]
    fn test_read_existing_fragment() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("bin")).unwrap();
        std::fs::write(dir.path().join("bin/start-linux"), "export A=1\n").unwrap();

        let pre_start = PreStart::resolve(&PreStartConfig::default(), dir.path());
        assert_eq!(
            pre_start.read(Platform::Linux).unwrap().as_deref(),
            Some("export A=1\n")
        );
        assert_eq!(pre_start.read(Platform::Windows).unwrap(), None);
    }

    #[test]
    fn test_read_directory_is_io_error() {
        let dir = TempDir::new().unwrap();
        let pre_start = PreStart::default().with_fragment(Platform::Linux, dir.path());
        assert!(matches!(
            pre_start.read(Platform::Linux),
            Err(Error::Io { .. })
        ));
    }

    #[test]
    fn test_merge_overrides_only_set_fields() {
        let mut base = PreStartConfig {
            linux: Some("a".to_string()),
            windows: Some("b".to_string()),
        };
        base.merge(PreStartConfig {
            linux: None,
            windows: Some("c".to_string()),
        });
        assert_eq!(base.linux.as_deref(), Some("a"));
        assert_eq!(base.windows.as_deref(), Some("c"));
    }
}

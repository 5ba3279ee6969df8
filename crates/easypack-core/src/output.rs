use std::path::{Path, PathBuf};

use crate::dispatch::RenderedScript;
use crate::error::{Error, Result};
use crate::platform::Platform;

/// Make `folder` exist and be empty.
///
/// An existing folder is removed with everything in it and created again, so
/// no script from an earlier run survives.
pub fn prepare(folder: &Path) -> Result<()> {
    if folder.exists() {
        tracing::info!(path = %folder.display(), "removing previous output folder");
        std::fs::remove_dir_all(folder).map_err(|e| Error::io(folder, e))?;
    }
    std::fs::create_dir_all(folder).map_err(|e| Error::io(folder, e))?;
    Ok(())
}

/// Write one rendered script into `folder` as a whole file.
///
/// Linux scripts are made executable on Unix hosts.
pub fn write_script(folder: &Path, script: &RenderedScript) -> Result<PathBuf> {
    let path = folder.join(&script.file_name);
    std::fs::write(&path, &script.content).map_err(|e| Error::io(&path, e))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if script.platform == Platform::Linux {
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
                .map_err(|e| Error::io(&path, e))?;
        }
    }

    tracing::debug!(path = %path.display(), bytes = script.content.len(), "wrote script");
    Ok(path)
}

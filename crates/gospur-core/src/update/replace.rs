//! Swapping an executable for a new build

use crate::error::{Error, Result};
use std::io::Write;
use std::path::Path;

/// Put `bytes` in place of the executable at `target`.
///
/// The new binary is staged beside the target and renamed over it, so a
/// failure at any step leaves the old binary untouched.
pub fn replace_executable(bytes: &[u8], target: &Path) -> Result<()> {
    let failed = |reason: String| Error::ReplaceFailed {
        path: target.to_path_buf(),
        reason,
    };

    let dir = target
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));

    let mut staged = tempfile::Builder::new()
        .prefix(".gospur-update-")
        .tempfile_in(dir)
        .map_err(|e| failed(format!("cannot stage new binary: {e}")))?;
    staged
        .write_all(bytes)
        .and_then(|_| staged.as_file().sync_all())
        .map_err(|e| failed(format!("cannot write new binary: {e}")))?;
    set_executable(staged.path()).map_err(|e| failed(format!("cannot set permissions: {e}")))?;

    if is_current_exe(target) {
        // The running image cannot always be renamed over directly.
        self_replace::self_replace(staged.path()).map_err(|e| failed(e.to_string()))?;
        tracing::debug!(path = %target.display(), "replaced running executable");
    } else {
        staged
            .persist(target)
            .map_err(|e| failed(e.error.to_string()))?;
        tracing::debug!(path = %target.display(), "replaced executable");
    }

    Ok(())
}

#[cfg(unix)]
fn set_executable(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
}

#[cfg(not(unix))]
fn set_executable(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

fn is_current_exe(target: &Path) -> bool {
    let Ok(current) = std::env::current_exe() else {
        return false;
    };
    match (current.canonicalize(), target.canonicalize()) {
        (Ok(current), Ok(target)) => current == target,
        _ => false,
    }
}

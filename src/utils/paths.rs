use crate::error::{MnqnError, Result};
use crate::project_identity;
use directories::UserDirs;
use std::path::{Path, PathBuf};

pub fn home_dir() -> Result<PathBuf> {
    let user_dirs = UserDirs::new()
        .ok_or_else(|| MnqnError::Other("Could not determine user home directory".to_string()))?;
    Ok(user_dirs.home_dir().to_path_buf())
}

/// `~/.mnqn`
pub fn global_config_dir() -> Result<PathBuf> {
    Ok(home_dir()?.join(project_identity::CONFIG_DIR_NAME))
}

/// `~/.mnqn/config.yaml`
pub fn global_config_file() -> Result<PathBuf> {
    Ok(global_config_dir()?.join(project_identity::CONFIG_FILE_NAME))
}

pub fn local_config_file(project_dir: &Path) -> PathBuf {
    project_dir.join(project_identity::LOCAL_CONFIG_FILE_NAME)
}

/// Resolve `path` against `base` unless it is already absolute.
pub fn resolve(base: &Path, path: &str) -> PathBuf {
    let path = Path::new(path);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Check that `path` (relative to `base`) exists and is a regular file.
pub fn ensure_file(base: &Path, path: &str) -> Result<PathBuf> {
    let full = resolve(base, path);
    let meta = std::fs::metadata(&full)
        .map_err(|_| MnqnError::NotFound(format!("file \"{}\" does not exist", path)))?;
    if meta.is_dir() {
        return Err(MnqnError::Validation(format!(
            "\"{}\" points to a folder, expected a file",
            path
        )));
    }
    Ok(full)
}

/// Check that `path` (relative to `base`) exists and is a directory.
pub fn ensure_dir(base: &Path, path: &str) -> Result<PathBuf> {
    let full = resolve(base, path);
    let meta = std::fs::metadata(&full)
        .map_err(|_| MnqnError::NotFound(format!("directory \"{}\" does not exist", path)))?;
    if !meta.is_dir() {
        return Err(MnqnError::Validation(format!(
            "\"{}\" points to a file, expected a folder",
            path
        )));
    }
    Ok(full)
}

use crate::error::{MnqnError, Result};
use crate::ui;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

fn temp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "config".to_string());
    path.with_file_name(format!(".{}.tmp", name))
}

/// Replace `path` with `content` without exposing a half-written file:
/// write a sibling temp file, sync it, then rename it over the target.
pub(super) fn write_atomically(path: &Path, content: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let tmp_path = temp_path_for(path);
    let mut tmp_file = fs::File::create(&tmp_path).map_err(|e| MnqnError::io(&tmp_path, e))?;

    let written = tmp_file
        .write_all(content.as_bytes())
        .and_then(|_| tmp_file.sync_all());
    drop(tmp_file);
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(MnqnError::io(&tmp_path, e));
    }

    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(MnqnError::io(path, e));
    }

    if let Ok(dir_file) = fs::File::open(&dir)
        && let Err(e) = dir_file.sync_all()
    {
        ui::debug(&format!("Failed to sync directory {}: {}", dir.display(), e));
    }

    Ok(())
}

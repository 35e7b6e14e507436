use crate::error::{MnqnError, Result};
use crate::project_identity;
use fs2::FileExt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Advisory lock on a configuration file, held through a sibling
/// `<file>.lock`. Released (and the lock file removed) on drop.
#[derive(Debug)]
pub struct FileLock {
    _file: fs::File,
    path: PathBuf,
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

impl FileLock {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

pub fn lock_path_for(target: &Path) -> PathBuf {
    let mut name = target
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".lock");
    target.with_file_name(name)
}

pub fn acquire_lock(target: &Path) -> Result<FileLock> {
    let lock_path = lock_path_for(target);

    let lock_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(&lock_path)
        .map_err(|e| MnqnError::io(&lock_path, e))?;

    if lock_file.try_lock_exclusive().is_err() {
        return Err(MnqnError::Other(format!(
            "Another {} process is currently using {}.\n\
             Lock file: {}\n\
             Wait for it to complete, or delete the lock file if you're sure no other process is running.",
            project_identity::BINARY_NAME,
            target.display(),
            lock_path.display()
        )));
    }

    let _ = lock_file.set_len(0);
    let _ = writeln!(&lock_file, "{}", std::process::id());

    Ok(FileLock {
        _file: lock_file,
        path: lock_path,
    })
}

//! File system utilities.
//!
//! All operations work on whole files: a copy either completes (and
//! optionally verifies) or leaves no partial target behind.

use crate::utils::hash;
use crate::Result;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Directory that receives backups of deleted files, below the datasource.
pub const BACKUP_DIR: &str = ".deleted";

/// What a copy request ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transfer {
    /// Source and target are the same path.
    Unchanged,
    /// Bytes were copied; the source is still there.
    Copied,
    /// Source and target name the same file; it was renamed instead.
    Moved,
}

/// Check if a path exists and is a directory.
pub fn ensure_directory(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(crate::Error::PathNotFound(path.display().to_string()));
    }
    if !path.is_dir() {
        return Err(crate::Error::layout(path, "not a directory"));
    }
    Ok(())
}

/// Whether a directory has no entries. Unreadable directories count as
/// non-empty.
pub fn is_dir_empty(path: &Path) -> bool {
    match fs::read_dir(path) {
        Ok(mut entries) => entries.next().is_none(),
        Err(_) => false,
    }
}

/// Whether two paths name the same file on disk (e.g. differing only in case
/// on a case-insensitive file system).
pub fn is_same_file(a: &Path, b: &Path) -> bool {
    let (Ok(meta_a), Ok(meta_b)) = (fs::metadata(a), fs::metadata(b)) else {
        return false;
    };

    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;
        meta_a.dev() == meta_b.dev() && meta_a.ino() == meta_b.ino()
    }

    #[cfg(not(unix))]
    {
        let _ = (meta_a, meta_b);
        match (fs::canonicalize(a), fs::canonicalize(b)) {
            (Ok(ca), Ok(cb)) => ca.to_string_lossy().to_lowercase() == cb.to_string_lossy().to_lowercase(),
            _ => false,
        }
    }
}

/// Probe whether a file can be moved by renaming it onto itself.
pub fn probe_writable(path: &Path) -> std::io::Result<()> {
    if !path.is_file() {
        return Err(std::io::Error::new(
            ErrorKind::NotFound,
            format!("{} does not exist", path.display()),
        ));
    }
    fs::rename(path, path)
}

/// Create the parent directory of a path if needed.
fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Temporary sibling name used for case-only renames.
fn temp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.renaming", name))
}

/// Copy `from` to `to` and compare checksums, removing the copy on mismatch.
fn copy_verified(from: &Path, to: &Path, verify: bool) -> Result<()> {
    let checksum = if verify {
        Some(hash::sha256_file(from)?)
    } else {
        None
    };

    fs::copy(from, to)?;

    if let Some(original) = checksum {
        let copied = hash::sha256_file(to)?;
        if original != copied {
            let _ = fs::remove_file(to);
            return Err(crate::Error::ChecksumMismatch(to.to_path_buf()));
        }
    }
    Ok(())
}

/// Move a file from one location to another.
///
/// Refuses to overwrite a different existing file. Falls back to
/// copy + delete across file systems.
pub fn move_file(from: &Path, to: &Path, verify: bool) -> Result<()> {
    if from == to {
        return Ok(());
    }
    if !from.exists() {
        return Err(crate::Error::PathNotFound(from.display().to_string()));
    }

    if to.exists() {
        if !is_same_file(from, to) {
            return Err(crate::Error::FileAlreadyExists(to.display().to_string()));
        }
        // Same file under another spelling: go through a temporary name so
        // case-insensitive file systems pick up the new case.
        let temp = temp_sibling(from);
        fs::rename(from, &temp)?;
        fs::rename(&temp, to)?;
        tracing::debug!("Moved (case change): {:?} -> {:?}", from, to);
        return Ok(());
    }

    ensure_parent(to)?;

    match fs::rename(from, to) {
        Ok(()) => {
            tracing::debug!("Moved (rename): {:?} -> {:?}", from, to);
            return Ok(());
        }
        Err(e) if e.kind() == ErrorKind::CrossesDevices => {
            tracing::debug!("Cross-filesystem move detected, using copy+delete");
        }
        Err(e) => return Err(e.into()),
    }

    copy_verified(from, to, verify)?;
    fs::remove_file(from)?;
    tracing::debug!("Moved (copy+delete): {:?} -> {:?}", from, to);
    Ok(())
}

/// Copy a file, overwriting the target.
///
/// Identical paths are a no-op; two spellings of the same file are handled
/// as a move.
pub fn copy_file(from: &Path, to: &Path, verify: bool) -> Result<Transfer> {
    if from == to {
        return Ok(Transfer::Unchanged);
    }
    if is_same_file(from, to) {
        move_file(from, to, verify)?;
        return Ok(Transfer::Moved);
    }
    if !from.is_file() {
        return Err(crate::Error::PathNotFound(from.display().to_string()));
    }

    ensure_parent(to)?;
    copy_verified(from, to, verify)?;
    tracing::debug!("Copied: {:?} -> {:?}", from, to);
    Ok(Transfer::Copied)
}

/// Move a whole directory. The destination must not exist yet (unless it is
/// the same directory spelled differently).
pub fn move_directory(from: &Path, to: &Path) -> Result<()> {
    if from == to {
        return Ok(());
    }
    ensure_directory(from)?;

    if to.exists() {
        if !is_same_file(from, to) {
            return Err(crate::Error::FileAlreadyExists(to.display().to_string()));
        }
        let temp = temp_sibling(from);
        fs::rename(from, &temp)?;
        fs::rename(&temp, to)?;
        return Ok(());
    }

    ensure_parent(to)?;

    match fs::rename(from, to) {
        Ok(()) => {
            tracing::debug!("Moved directory (rename): {:?} -> {:?}", from, to);
            return Ok(());
        }
        Err(e) if e.kind() == ErrorKind::CrossesDevices => {
            tracing::debug!("Cross-filesystem directory move, copying tree");
        }
        Err(e) => return Err(e.into()),
    }

    copy_tree(from, to)?;
    fs::remove_dir_all(from)?;
    tracing::debug!("Moved directory (copy+delete): {:?} -> {:?}", from, to);
    Ok(())
}

/// Recursively copy a directory tree.
fn copy_tree(from: &Path, to: &Path) -> Result<()> {
    for entry in WalkDir::new(from).follow_links(false) {
        let entry = entry.map_err(|e| crate::Error::other(e.to_string()))?;
        let relative = entry
            .path()
            .strip_prefix(from)
            .map_err(|e| crate::Error::other(e.to_string()))?;
        let target = to.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            copy_verified(entry.path(), &target, false)?;
        }
    }
    Ok(())
}

/// Delete a file, optionally keeping a backup below
/// `<data_source>/.deleted/` at the same relative position.
pub fn delete_with_backup(path: &Path, data_source: &Path, backup: bool) -> Result<()> {
    if backup {
        if let Ok(relative) = path.strip_prefix(data_source) {
            let target = data_source.join(BACKUP_DIR).join(relative);
            if target.exists() {
                fs::remove_file(&target)?;
            }
            ensure_parent(&target)?;
            match fs::rename(path, &target) {
                Ok(()) => {
                    tracing::debug!("Backed up {:?} to {:?}", path, target);
                    return Ok(());
                }
                Err(e) => {
                    tracing::warn!("Could not back up {:?}: {}, deleting", path, e);
                }
            }
        }
    }

    fs::remove_file(path)?;
    Ok(())
}

/// Get file extension in lowercase.
pub fn get_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}

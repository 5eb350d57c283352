// src/file.rs

use std::{
    fs,
    io::{BufWriter, Write},
    path::Path,
};

use serde::Serialize;
use tempfile::NamedTempFile;

use crate::error::{SyncError, SyncResult};

/// Serialize `value` as compact JSON and move it over `path` in one rename.
/// The temp file lives next to the target so the rename never crosses devices;
/// on any error it is removed and `path` is left as it was.
pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> SyncResult<()> {
    let dir = parent_dir(path);
    ensure_directory(dir)?;

    let tmp = NamedTempFile::new_in(dir)?;
    {
        let mut out = BufWriter::new(tmp.as_file());
        serde_json::to_writer(&mut out, value)?;
        out.flush()?;
    }
    tmp.as_file().sync_all()?;
    tmp.persist(path)?;
    Ok(())
}

/// Last resort when even the atomic path failed: plain overwrite.
pub fn write_json_direct<T: Serialize>(path: &Path, value: &T) -> SyncResult<()> {
    ensure_directory(parent_dir(path))?;
    fs::write(path, serde_json::to_vec(value)?)?;
    Ok(())
}

pub fn ensure_directory(dir: &Path) -> SyncResult<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(SyncError::NotADirectory(dir.to_path_buf()));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}

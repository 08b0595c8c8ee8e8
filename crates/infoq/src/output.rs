use std::path::{Path, PathBuf};

use tempfile::TempPath;

use crate::error::{InfoqError, InfoqResult};

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Reject an output path before any work is done.
///
/// The parent directory must exist, and an existing file is only accepted
/// when `overwrite` is set. Nothing is written here.
pub fn check_output(path: &Path, overwrite: bool) -> InfoqResult<()> {
    let parent = parent_dir(path);
    if !parent.is_dir() {
        return Err(InfoqError::OutputDirMissing(parent.to_path_buf()));
    }

    if path.exists() {
        if !overwrite {
            return Err(InfoqError::OutputExists(path.to_path_buf()));
        }
        log::warn!("{} will be overwritten", path.display());
    }
    Ok(())
}

/// A file next to the final output that tools write into.
///
/// It only replaces the output in [`StagedOutput::commit`]; dropping it
/// removes the staging file, so a failed run never leaves a partial file at
/// the output path.
pub struct StagedOutput {
    temp: TempPath,
    target: PathBuf,
}

impl StagedOutput {
    pub fn new(target: impl Into<PathBuf>) -> InfoqResult<Self> {
        let target = target.into();
        let suffix = target
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();

        let temp = tempfile::Builder::new()
            .prefix(".infoqscraper-")
            .suffix(&suffix)
            .tempfile_in(parent_dir(&target))?
            .into_temp_path();

        Ok(Self { temp, target })
    }

    pub fn path(&self) -> &Path {
        &self.temp
    }

    /// Move the staged file onto the output path.
    pub fn commit(self) -> InfoqResult<PathBuf> {
        let size = std::fs::metadata(&self.temp)?.len();
        if size == 0 {
            return Err(InfoqError::EmptyOutput(self.target));
        }

        self.temp.persist(&self.target).map_err(|e| e.error)?;
        Ok(self.target)
    }
}

use std::path::{Path, PathBuf};

use crate::foundation::error::{AnimError, AnimResult};

/// Frames read from the image files of a folder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FolderSource {
    extension: String,
    dir: Option<PathBuf>,
}

impl FolderSource {
    /// Collect files with `extension` (leading dot optional, case-sensitive).
    ///
    /// Unless [`FolderSource::in_dir`] is used, the folder is the output path without its
    /// extension: `out/run.gif` reads frames from `out/run/`.
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
            dir: None,
        }
    }

    /// Read frames from an explicit folder instead of the one derived from the output path.
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    /// Image extension collected, as configured.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub(crate) fn prepare(&self, out_path: &Path) -> AnimResult<Vec<PathBuf>> {
        let dir = match &self.dir {
            Some(dir) => dir.clone(),
            None => out_path.with_extension(""),
        };
        list_frame_files(&dir, &self.extension)
    }
}

impl Default for FolderSource {
    fn default() -> Self {
        Self::new(".png")
    }
}

/// List regular files in `dir` whose extension is `extension`, sorted by file name.
pub fn list_frame_files(dir: &Path, extension: &str) -> AnimResult<Vec<PathBuf>> {
    let ext = extension.strip_prefix('.').unwrap_or(extension);
    if ext.is_empty() {
        return Err(AnimError::config("frame image extension must not be empty"));
    }

    let entries = std::fs::read_dir(dir).map_err(|e| {
        AnimError::config(format!(
            "cannot read frame folder '{}': {e}",
            dir.display()
        ))
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) == Some(ext) && path.is_file() {
            files.push(path);
        }
    }

    if files.is_empty() {
        return Err(AnimError::config(format!(
            "no '.{ext}' images found in '{}'",
            dir.display()
        )));
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

#[cfg(test)]
#[path = "../../tests/unit/source/folder.rs"]
mod tests;

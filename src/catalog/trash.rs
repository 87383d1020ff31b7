// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Relocation of discarded images.

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::error::{CatalogError, CatalogResult};

/// Where "send to trash" puts an image.
#[derive(Debug, Clone)]
pub(crate) enum TrashBin {
    /// The desktop trash of the current user.
    System,
    /// A plain directory, created on first use.
    Directory(PathBuf),
}

impl TrashBin {
    pub(crate) fn from_config(dir: Option<&Path>) -> Self {
        match dir {
            Some(dir) => Self::Directory(dir.to_path_buf()),
            None => Self::System,
        }
    }

    /// Moves `path` out of its current location.
    pub(crate) fn discard(&self, path: &Path) -> CatalogResult<()> {
        match self {
            TrashBin::System => trash::delete(path).map_err(|e| CatalogError::Trash {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?,
            TrashBin::Directory(dir) => {
                fs::create_dir_all(dir).map_err(|e| CatalogError::io(dir, e))?;
                let target = free_target(dir, path)?;
                move_file(path, &target)?;
            }
        }

        tracing::info!(path = %path.display(), "moved to trash");
        Ok(())
    }
}

/// Picks `dir/<name>`, or `dir/<stem> (n).<ext>` when that is taken.
fn free_target(dir: &Path, path: &Path) -> CatalogResult<PathBuf> {
    let name = path.file_name().ok_or_else(|| CatalogError::Trash {
        path: path.to_path_buf(),
        reason: "not a file".to_string(),
    })?;

    let target = dir.join(name);
    if !target.exists() {
        return Ok(target);
    }

    let stem = path.file_stem().unwrap_or(name).to_string_lossy();
    let ext = path.extension().map(|e| e.to_string_lossy());

    let mut n = 1;
    loop {
        let candidate = match &ext {
            Some(ext) => dir.join(format!("{stem} ({n}).{ext}")),
            None => dir.join(format!("{stem} ({n})")),
        };
        if !candidate.exists() {
            return Ok(candidate);
        }
        n += 1;
    }
}

/// Renames, falling back to copy and delete across filesystems.
fn move_file(from: &Path, to: &Path) -> CatalogResult<()> {
    if fs::rename(from, to).is_ok() {
        return Ok(());
    }

    fs::copy(from, to).map_err(|e| CatalogError::io(from, e))?;
    fs::remove_file(from).map_err(|e| CatalogError::io(from, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn directory_bin_keeps_both_files_on_name_clash() {
        let dir = TempDir::new().unwrap();
        let bin_dir = dir.path().join("trash");
        let bin = TrashBin::Directory(bin_dir.clone());

        let first = dir.path().join("a/pic.jpg");
        let second = dir.path().join("b/pic.jpg");
        for path in [&first, &second] {
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, b"x").unwrap();
        }

        bin.discard(&first).unwrap();
        bin.discard(&second).unwrap();

        assert!(!first.exists() && !second.exists());
        assert!(bin_dir.join("pic.jpg").exists());
        assert!(bin_dir.join("pic (1).jpg").exists());
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let bin = TrashBin::Directory(dir.path().join("trash"));

        assert!(bin.discard(&dir.path().join("gone.jpg")).is_err());
    }
}

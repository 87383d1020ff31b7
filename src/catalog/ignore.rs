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

//! Ignored path matching.
//!
//! An ignore list is a set of paths. A candidate path is ignored when it is
//! one of those paths or lies anywhere beneath one of them. Matching is by
//! whole path components, so an entry `/photos/raw` covers
//! `/photos/raw/a.jpg` but not `/photos/raw-edits/a.jpg`.
//!
//! Relative entries and candidates are resolved against the current working
//! directory and `.`/`..` components are folded away before comparing.

use std::{
    fs,
    path::{Component, Path, PathBuf},
};

use crate::error::{CatalogError, CatalogResult};

#[derive(Debug, Clone, Default)]
pub(crate) struct IgnoreList {
    entries: Vec<PathBuf>,
}

impl IgnoreList {
    pub(crate) fn from_entries<I, P>(entries: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        Self {
            entries: entries.into_iter().map(|p| normalize(p.as_ref())).collect(),
        }
    }

    /// Reads an ignore file, one path per line.
    ///
    /// No file, or a file that does not exist, gives an empty list. Trailing
    /// whitespace is trimmed and blank lines are skipped.
    pub(crate) fn load(path: Option<&Path>) -> CatalogResult<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        if !path.exists() {
            tracing::info!(path = %path.display(), "ignore file not found, ignoring nothing");
            return Ok(Self::default());
        }

        let text = fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))?;
        let list = Self::from_entries(
            text.lines()
                .map(str::trim_end)
                .filter(|line| !line.is_empty()),
        );

        tracing::info!(path = %path.display(), entries = list.len(), "loaded ignore list");
        Ok(list)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn is_ignored(&self, path: &Path) -> bool {
        if self.entries.is_empty() {
            return false;
        }
        let path = normalize(path);
        self.entries.iter().any(|entry| path.starts_with(entry))
    }
}

/// Makes a path absolute and folds `.` and `..` without touching the
/// filesystem.
fn normalize(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };

    let mut out = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }

    fold_case(out)
}

#[cfg(windows)]
fn fold_case(path: PathBuf) -> PathBuf {
    PathBuf::from(path.to_string_lossy().to_lowercase())
}

#[cfg(not(windows))]
fn fold_case(path: PathBuf) -> PathBuf {
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn exact_and_nested_paths_are_ignored() {
        let ignore = IgnoreList::from_entries(["/home/me/Pictures/private"]);

        assert!(ignore.is_ignored(Path::new("/home/me/Pictures/private")));
        assert!(ignore.is_ignored(Path::new("/home/me/Pictures/private/a.jpg")));
        assert!(ignore.is_ignored(Path::new("/home/me/Pictures/private/x/y/b.png")));
        assert!(ignore.is_ignored(Path::new("/home/me/Pictures/./private/../private/c.gif")));
    }

    #[test]
    fn sibling_with_common_prefix_is_not_ignored() {
        let ignore = IgnoreList::from_entries(["/home/me/Pictures/private"]);

        assert!(!ignore.is_ignored(Path::new("/home/me/Pictures/private-share/a.jpg")));
        assert!(!ignore.is_ignored(Path::new("/home/me/Pictures/a.jpg")));
        assert!(!ignore.is_ignored(Path::new("/home/me")));
    }

    #[test]
    fn single_file_entry() {
        let ignore = IgnoreList::from_entries(["/data/shot.jpg"]);

        assert!(ignore.is_ignored(Path::new("/data/shot.jpg")));
        assert!(!ignore.is_ignored(Path::new("/data/shot.jpeg")));
    }

    #[test]
    fn relative_entries_resolve_against_working_directory() {
        let ignore = IgnoreList::from_entries(["skip"]);
        let cwd = std::env::current_dir().unwrap();

        assert!(ignore.is_ignored(&cwd.join("skip/a.jpg")));
        assert!(ignore.is_ignored(Path::new("skip/a.jpg")));
        assert!(!ignore.is_ignored(&cwd.join("keep/a.jpg")));
    }

    #[test]
    fn load_trims_lines_and_skips_blanks() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("ignore_this.txt");
        fs::write(&file, "/a/b   \n\n/c/d\n").unwrap();

        let ignore = IgnoreList::load(Some(&file)).unwrap();

        assert_eq!(ignore.len(), 2);
        assert!(ignore.is_ignored(Path::new("/a/b/x.jpg")));
        assert!(ignore.is_ignored(Path::new("/c/d")));
    }

    #[test]
    fn missing_ignore_file_is_empty() {
        let dir = TempDir::new().unwrap();

        let ignore = IgnoreList::load(Some(&dir.path().join("nope.txt"))).unwrap();
        assert!(ignore.is_empty());

        let ignore = IgnoreList::load(None).unwrap();
        assert!(!ignore.is_ignored(Path::new("/anything")));
    }
}

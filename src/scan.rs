//! Sibling-file listing and sequential navigation within a directory.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;
use walkdir::WalkDir;

use crate::error::Error;

/// Extensions recognized for navigation and save validation (without dot).
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "bmp", "jpg"];

/// How file extensions are compared against [`IMAGE_EXTENSIONS`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExtensionCase {
    /// `a.PNG` is not an image.
    #[default]
    Sensitive,
    /// `a.PNG` is an image.
    Insensitive,
}

impl ExtensionCase {
    /// Return `true` if `ext` (without dot) is a recognized image extension.
    #[must_use]
    pub fn matches(self, ext: &str) -> bool {
        IMAGE_EXTENSIONS.iter().any(|e| match self {
            Self::Sensitive => *e == ext,
            Self::Insensitive => e.eq_ignore_ascii_case(ext),
        })
    }
}

/// Return `true` if `path` has a recognized image extension.
#[must_use]
pub fn is_supported_image(path: &Path, case: ExtensionCase) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| case.matches(ext))
}

/// Direction of a sequential navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// Result of stepping through a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step<'a> {
    /// The neighboring file name in the requested direction.
    Neighbor(&'a OsStr),
    /// No further file exists in the requested direction.
    AtBoundary,
}

/// Image file names of one directory, sorted by byte-wise name order.
///
/// Ordering is plain lexicographic: `img10.png` sorts before `img2.png`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryListing {
    dir: PathBuf,
    names: Vec<OsString>,
}

impl DirectoryListing {
    /// Build a listing from already collected names; sorts them.
    #[must_use]
    pub fn from_names(dir: impl Into<PathBuf>, mut names: Vec<OsString>) -> Self {
        names.sort();
        Self {
            dir: dir.into(),
            names,
        }
    }

    /// Directory the names belong to.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn names(&self) -> &[OsString] {
        &self.names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Index of the file name of `path` within the listing.
    ///
    /// # Errors
    /// Returns [`Error::NotListed`] if the name is absent.
    pub fn locate(&self, path: &Path) -> Result<usize, Error> {
        path.file_name()
            .and_then(|name| self.names.iter().position(|n| n.as_os_str() == name))
            .ok_or_else(|| Error::NotListed(path.to_path_buf()))
    }

    /// Name before `index`; [`Step::AtBoundary`] when `index == 0`.
    #[must_use]
    pub fn previous(&self, index: usize) -> Step<'_> {
        match index.checked_sub(1).and_then(|i| self.names.get(i)) {
            Some(name) => Step::Neighbor(name),
            None => Step::AtBoundary,
        }
    }

    /// Name after `index`; [`Step::AtBoundary`] at the last entry.
    #[must_use]
    pub fn next(&self, index: usize) -> Step<'_> {
        match index.checked_add(1).and_then(|i| self.names.get(i)) {
            Some(name) => Step::Neighbor(name),
            None => Step::AtBoundary,
        }
    }

    /// Neighbor of `index` in `direction`.
    #[must_use]
    pub fn step(&self, index: usize, direction: Direction) -> Step<'_> {
        match direction {
            Direction::Previous => self.previous(index),
            Direction::Next => self.next(index),
        }
    }

    /// Full path of a name from this listing.
    #[must_use]
    pub fn path_of(&self, name: &OsStr) -> PathBuf {
        self.dir.join(name)
    }
}

/// Lists the image siblings of a file. Holds no cached state: every call
/// reads the directory afresh.
#[derive(Debug, Clone, Copy, Default)]
pub struct Navigator {
    case: ExtensionCase,
}

impl Navigator {
    #[must_use]
    pub const fn new(case: ExtensionCase) -> Self {
        Self { case }
    }

    #[must_use]
    pub const fn extension_case(&self) -> ExtensionCase {
        self.case
    }

    /// List the parent directory of `path`, keeping regular image files.
    ///
    /// # Errors
    /// Returns [`Error::BadDir`] if the parent directory is missing or not a
    /// directory, and [`Error::Io`] if reading it fails. Entries that cannot
    /// be resolved, such as dangling symlinks, are skipped.
    pub fn list(&self, path: &Path) -> Result<DirectoryListing, Error> {
        let dir = parent_dir(path);
        if !dir.is_dir() {
            return Err(Error::BadDir(dir.to_string_lossy().into_owned()));
        }

        let mut names = Vec::new();
        for entry in WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                // Dangling links and unreadable siblings are not images.
                Err(err) if err.depth() > 0 => {
                    debug!(path = ?err.path(), "skipping entry: {err}");
                    continue;
                }
                Err(err) => {
                    return Err(match err.into_io_error() {
                        Some(io) => Error::Io(io),
                        None => Error::BadDir(dir.to_string_lossy().into_owned()),
                    });
                }
            };
            if entry.file_type().is_file() && is_supported_image(entry.path(), self.case) {
                names.push(entry.file_name().to_os_string());
            }
        }
        debug!(dir = %dir.display(), count = names.len(), "listed directory");

        Ok(DirectoryListing { dir, names })
    }
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(names: &[&str]) -> DirectoryListing {
        DirectoryListing::from_names("/d", names.iter().map(OsString::from).collect())
    }

    #[test]
    fn sorts_lexicographically_not_naturally() {
        let l = listing(&["img2.png", "img10.png", "img1.png"]);
        assert_eq!(l.names(), &["img1.png", "img10.png", "img2.png"]);
    }

    #[test]
    fn steps_stop_at_both_ends() {
        let l = listing(&["a.png", "b.jpg", "c.bmp"]);
        assert_eq!(l.previous(1), Step::Neighbor(OsStr::new("a.png")));
        assert_eq!(l.next(1), Step::Neighbor(OsStr::new("c.bmp")));
        assert_eq!(l.previous(0), Step::AtBoundary);
        assert_eq!(l.next(2), Step::AtBoundary);
        assert_eq!(l.next(usize::MAX), Step::AtBoundary);
    }

    #[test]
    fn locate_reports_missing_name() {
        let l = listing(&["a.png"]);
        assert_eq!(l.locate(Path::new("/d/a.png")).unwrap(), 0);
        assert!(matches!(
            l.locate(Path::new("/d/z.png")),
            Err(Error::NotListed(_))
        ));
    }

    #[test]
    fn extension_case_modes() {
        let p = Path::new("shot.PNG");
        assert!(!is_supported_image(p, ExtensionCase::Sensitive));
        assert!(is_supported_image(p, ExtensionCase::Insensitive));
        assert!(!is_supported_image(Path::new("anim.gif"), ExtensionCase::Insensitive));
        assert!(!is_supported_image(Path::new("photo.jpeg"), ExtensionCase::Sensitive));
    }
}

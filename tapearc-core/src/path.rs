//! Archive-internal path model.
//!
//! TAR entries in this family carry `./`-rooted paths. [`ArchivePath`]
//! normalizes such a path into an ordered list of segments plus a directory
//! flag, validating it on construction: no empty segments, no `.` or `..`,
//! no NUL bytes. Two paths compare equal when their segments are equal; the
//! directory flag does not participate, so `./foo` and `./foo/` name the
//! same object.
//!
//! # Example
//!
//! ```
//! use tapearc_core::path::ArchivePath;
//!
//! let path = ArchivePath::parse("./foo/bar").unwrap();
//! assert!(!path.is_directory());
//! assert_eq!(path.parent().unwrap().to_string(), "./foo/");
//! assert_eq!(path.to_string(), "./foo/bar");
//! ```

use crate::error::{Result, TapeArcError};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

/// A validated, normalized archive path.
///
/// Immutable after construction. The root path has zero segments and is
/// always a directory.
#[derive(Debug, Clone)]
pub struct ArchivePath {
    segments: Vec<String>,
    directory: bool,
}

impl ArchivePath {
    /// The root path `./`.
    pub fn root() -> Self {
        Self {
            segments: Vec::new(),
            directory: true,
        }
    }

    /// Parse a TAR path.
    ///
    /// The value must start with `./`. A trailing `/` (or zero segments)
    /// marks a directory.
    pub fn parse(value: &str) -> Result<Self> {
        let rest = value
            .strip_prefix("./")
            .ok_or_else(|| TapeArcError::invalid_path("must start with \"./\""))?;

        if rest.is_empty() {
            return Ok(Self::root());
        }

        let directory = rest.ends_with('/');
        let trimmed = if directory {
            &rest[..rest.len() - 1]
        } else {
            rest
        };

        if trimmed.is_empty() {
            // The value was ".//" or similar.
            return Err(TapeArcError::invalid_path(
                "contains consecutive path separators",
            ));
        }

        let mut segments = Vec::new();

        for segment in trimmed.split('/') {
            segments.push(Self::check_segment(segment)?.to_string());
        }

        Ok(Self {
            segments,
            directory,
        })
    }

    /// Convert a path of the current running filesystem to an [`ArchivePath`].
    ///
    /// The path must be relative, must not end with a path separator, and
    /// must not contain `.` or `..` components. An empty path stands for the
    /// root and requires `is_directory` to be `true`.
    pub fn from_file_system(path: impl AsRef<Path>, is_directory: bool) -> Result<Self> {
        let text = path
            .as_ref()
            .to_str()
            .ok_or_else(|| TapeArcError::invalid_path("is not valid UTF-8"))?;

        if text.chars().last().is_some_and(std::path::is_separator) {
            return Err(TapeArcError::invalid_path("ends with a path separator"));
        }

        let mut segments = Vec::new();
        let mut start = 0;

        for (i, ch) in text.char_indices() {
            if ch == '\0' {
                return Err(TapeArcError::invalid_path("contains a NUL byte"));
            }

            if std::path::is_separator(ch) {
                if i == start {
                    return Err(if i == 0 {
                        TapeArcError::invalid_path("starts with a path separator")
                    } else {
                        TapeArcError::invalid_path("contains consecutive path separators")
                    });
                }

                segments.push(Self::check_segment(&text[start..i])?.to_string());
                start = i + ch.len_utf8();
            }
        }

        if start != text.len() {
            segments.push(Self::check_segment(&text[start..])?.to_string());
        }

        if segments.is_empty() && !is_directory {
            return Err(TapeArcError::invalid_path(
                "the root requires a directory flag",
            ));
        }

        Ok(Self {
            segments,
            directory: is_directory,
        })
    }

    /// Whether this is the root path.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Whether this path denotes a directory.
    pub fn is_directory(&self) -> bool {
        self.directory
    }

    /// The validated segments of this path.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The parent of this path, always a directory. The root has no parent.
    pub fn parent(&self) -> Option<ArchivePath> {
        if self.segments.is_empty() {
            None
        } else {
            Some(Self {
                segments: self.segments[..self.segments.len() - 1].to_vec(),
                directory: true,
            })
        }
    }

    /// Build a filesystem path for this name by joining `prefix` with each
    /// segment.
    ///
    /// Fails when a segment contains a character the current running system
    /// forbids in file names. Traversal outside `prefix` is impossible by
    /// construction.
    pub fn to_file_system_path(&self, prefix: impl AsRef<Path>) -> Result<PathBuf> {
        let mut result = prefix.as_ref().to_path_buf();

        for segment in &self.segments {
            if segment.chars().any(forbidden_in_file_name) {
                return Err(TapeArcError::unsupported_segment(segment.clone()));
            }

            result.push(segment);
        }

        Ok(result)
    }

    fn check_segment(segment: &str) -> Result<&str> {
        if segment.is_empty() {
            return Err(TapeArcError::invalid_path(
                "contains consecutive path separators",
            ));
        }

        if segment == "." || segment == ".." {
            return Err(TapeArcError::invalid_path("contains a forbidden segment"));
        }

        if segment.contains('\0') {
            return Err(TapeArcError::invalid_path("contains a NUL byte"));
        }

        Ok(segment)
    }
}

#[cfg(windows)]
fn forbidden_in_file_name(ch: char) -> bool {
    matches!(ch, '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*') || (ch as u32) < 32
}

#[cfg(not(windows))]
fn forbidden_in_file_name(ch: char) -> bool {
    ch == '/' || ch == '\0'
}

impl PartialEq for ArchivePath {
    fn eq(&self, other: &Self) -> bool {
        self.segments == other.segments
    }
}

impl Eq for ArchivePath {}

impl Hash for ArchivePath {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.segments.hash(state);
    }
}

impl fmt::Display for ArchivePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "./{}", self.segments.join("/"))?;

        if self.directory && !self.segments.is_empty() {
            write!(f, "/")?;
        }

        Ok(())
    }
}

//! Archive entry metadata.
//!
//! [`Entry`] is the unit of archive content: a type flag, a path, POSIX
//! metadata, and the declared content size. Entries are fully constructed in
//! one step, either by [`Entry::new`] with explicit defaults for writing or
//! by the header decoder for reading; no field is ever observable in an
//! unset state. The one exception by design is [`Entry::checksum`], which is
//! `None` until a header has been encoded or successfully decoded.

use crate::header::Format;
use std::time::SystemTime;
use tapearc_core::error::{Result, TapeArcError};
use tapearc_core::path::ArchivePath;
use tapearc_core::perm;

/// Default mode for directory entries.
const DEFAULT_DIRECTORY_MODE: u32 = 0o755;

/// Default mode for everything else.
const DEFAULT_FILE_MODE: u32 = 0o644;

/// Raw type tag from byte 156 of a header record.
///
/// Only the two named constants are ever produced by this library; the
/// pre-POSIX and ustar decoders additionally pass through unrecognized,
/// non-reserved tag bytes as opaque regular-file tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeFlag(u8);

impl TypeFlag {
    /// A regular file (the absent linkflag of the Version-7 layout).
    pub const REGULAR_FILE: Self = Self(0);

    /// A directory (pre-POSIX and ustar).
    pub const DIRECTORY: Self = Self(b'5');

    /// Wrap a raw tag byte.
    pub const fn new(raw: u8) -> Self {
        Self(raw)
    }

    /// The raw tag byte.
    pub const fn raw(self) -> u8 {
        self.0
    }
}

/// Optional overrides applied when the builder synthesizes a parent
/// directory; any unset field falls back to a value derived from the child.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParentOverride {
    /// Mode for the synthesized directory.
    pub mode: Option<u32>,
    /// Owner id for the synthesized directory.
    pub uid: Option<u32>,
    /// Group id for the synthesized directory.
    pub gid: Option<u32>,
    /// Modification time for the synthesized directory.
    pub mtime: Option<SystemTime>,
}

/// An entry in an archive.
///
/// When writing, `size` must equal the number of bytes actually streamed as
/// the entry's content; the codec does not verify this, and a mismatch
/// produces a corrupt archive rather than an error.
#[derive(Debug, Clone)]
pub struct Entry {
    /// The header format this entry is encoded with.
    pub format: Format,
    /// The raw type tag.
    pub type_flag: TypeFlag,
    /// The archive path.
    pub path: ArchivePath,
    /// POSIX permission bits.
    pub mode: u32,
    /// Owner id.
    pub uid: u32,
    /// Group id.
    pub gid: u32,
    /// Content length in bytes.
    pub size: u64,
    /// Modification time; must not precede the Unix epoch.
    pub mtime: SystemTime,
    /// Owner name (pre-POSIX and ustar; unused by V7).
    pub user_name: String,
    /// Group name (pre-POSIX and ustar; unused by V7).
    pub group_name: String,
    /// Header checksum, populated by header encode or successful decode.
    pub checksum: Option<u32>,
}

impl Entry {
    /// Create a new entry with defaults: mode 0755 for directories and 0644
    /// otherwise, zero ids, the current time, empty names, no content.
    pub fn new(format: Format, type_flag: TypeFlag, path: ArchivePath) -> Self {
        let mode = if path.is_directory() {
            DEFAULT_DIRECTORY_MODE
        } else {
            DEFAULT_FILE_MODE
        };

        Self {
            format,
            type_flag,
            path,
            mode,
            uid: 0,
            gid: 0,
            size: 0,
            mtime: SystemTime::now(),
            user_name: String::new(),
            group_name: String::new(),
            checksum: None,
        }
    }

    /// Builder method to set the mode.
    pub fn with_mode(mut self, mode: u32) -> Self {
        self.mode = mode;
        self
    }

    /// Builder method to set the owner id.
    pub fn with_uid(mut self, uid: u32) -> Self {
        self.uid = uid;
        self
    }

    /// Builder method to set the group id.
    pub fn with_gid(mut self, gid: u32) -> Self {
        self.gid = gid;
        self
    }

    /// Builder method to set the content length.
    pub fn with_size(mut self, size: u64) -> Self {
        self.size = size;
        self
    }

    /// Builder method to set the modification time.
    pub fn with_mtime(mut self, mtime: SystemTime) -> Self {
        self.mtime = mtime;
        self
    }

    /// Builder method to set the owner name.
    pub fn with_user_name(mut self, name: impl Into<String>) -> Self {
        self.user_name = name.into();
        self
    }

    /// Builder method to set the group name.
    pub fn with_group_name(mut self, name: impl Into<String>) -> Self {
        self.group_name = name.into();
        self
    }

    /// Check if this entry is a regular file.
    pub fn is_regular_file(&self) -> bool {
        let v7_file = self.type_flag == TypeFlag::REGULAR_FILE && !self.path.is_directory();

        match self.format {
            Format::V7 => v7_file,
            Format::PrePosix | Format::Ustar => self.type_flag.raw() == b'0' || v7_file,
        }
    }

    /// Check if this entry is a directory.
    pub fn is_directory(&self) -> bool {
        let v7_dir = self.type_flag == TypeFlag::REGULAR_FILE && self.path.is_directory();

        match self.format {
            Format::V7 => v7_dir,
            Format::PrePosix | Format::Ustar => self.type_flag == TypeFlag::DIRECTORY || v7_dir,
        }
    }

    /// Derive the directory entry for `path` that the builder emits when an
    /// ancestor of this entry was never written.
    ///
    /// Ids, time and names are copied from this entry unless overridden. The
    /// mode is the override when given; otherwise this entry's mode with the
    /// execute bit raised for every class whose read bit is set.
    pub fn derive_parent(
        &self,
        path: ArchivePath,
        overrides: Option<&ParentOverride>,
    ) -> Result<Entry> {
        if !path.is_directory() {
            return Err(TapeArcError::invalid_path("a parent must be a directory"));
        }

        let type_flag = match self.format {
            Format::V7 => TypeFlag::REGULAR_FILE,
            Format::PrePosix | Format::Ustar => TypeFlag::DIRECTORY,
        };

        Ok(Entry {
            format: self.format,
            type_flag,
            path,
            mode: overrides
                .and_then(|o| o.mode)
                .unwrap_or_else(|| parent_mode(self.mode)),
            uid: overrides.and_then(|o| o.uid).unwrap_or(self.uid),
            gid: overrides.and_then(|o| o.gid).unwrap_or(self.gid),
            size: 0,
            mtime: overrides.and_then(|o| o.mtime).unwrap_or(self.mtime),
            user_name: self.user_name.clone(),
            group_name: self.group_name.clone(),
            checksum: None,
        })
    }
}

/// A readable directory must also be searchable: raise the execute bit for
/// every class whose read bit is set in the child's mode.
fn parent_mode(child: u32) -> u32 {
    let mut mode = child;

    if mode & perm::OWNER_READ != 0 {
        mode |= perm::OWNER_EXECUTE;
    }

    if mode & perm::GROUP_READ != 0 {
        mode |= perm::GROUP_EXECUTE;
    }

    if mode & perm::OTHER_READ != 0 {
        mode |= perm::OTHER_EXECUTE;
    }

    mode
}

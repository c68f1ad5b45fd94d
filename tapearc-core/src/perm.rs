//! POSIX permission bits.
//!
//! Named constants for the nine permission flags carried by the mode field
//! of an archive entry.

/// The owner has read permission (S_IRUSR, 0400).
pub const OWNER_READ: u32 = 0o400;

/// The owner has write permission (S_IWUSR, 0200).
pub const OWNER_WRITE: u32 = 0o200;

/// The owner has execute permission (S_IXUSR, 0100).
pub const OWNER_EXECUTE: u32 = 0o100;

/// The group has read permission (S_IRGRP, 0040).
pub const GROUP_READ: u32 = 0o040;

/// The group has write permission (S_IWGRP, 0020).
pub const GROUP_WRITE: u32 = 0o020;

/// The group has execute permission (S_IXGRP, 0010).
pub const GROUP_EXECUTE: u32 = 0o010;

/// Everyone else has read permission (S_IROTH, 0004).
pub const OTHER_READ: u32 = 0o004;

/// Everyone else has write permission (S_IWOTH, 0002).
pub const OTHER_WRITE: u32 = 0o002;

/// Everyone else has execute permission (S_IXOTH, 0001).
pub const OTHER_EXECUTE: u32 = 0o001;

//! The polymorphic header codec.
//!
//! Three header layouts diverged from the original Version-7 TAR: the V7
//! layout itself, the pre-POSIX draft (`"ustar "` magic with a space/NUL
//! version), and POSIX ustar (`"ustar\0"` magic, `"00"` version, long-name
//! prefix splitting). [`Format`] is the closed set of those variants and
//! carries the whole capability surface: variant detection, header decode
//! and encode, and the per-field framing policies that differ between them.
//!
//! The differences are subtle and byte-level. V7 frames mode/uid/gid with a
//! trailing space-then-NUL pair and size/mtime with a single space, and pads
//! numeric fields with spaces; the pre-POSIX draft tolerates one trailing
//! space-or-NUL everywhere and NUL-frames what it writes; ustar does the
//! same but pads with `'0'`. The checksum field is framed NUL-then-space in
//! every variant.

use crate::entry::{Entry, TypeFlag};
use std::time::{Duration, UNIX_EPOCH};
use tapearc_core::error::{Result, TapeArcError};
use tapearc_core::octal::{header_checksum, parse_octal, write_octal};
use tapearc_core::path::ArchivePath;
use tapearc_core::record::RECORD_LEN;

/// The header format variants supported by this library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// The original TAR shipped with Version 7 AT&T UNIX.
    V7,
    /// The early draft of IEEE Std 1003.1-1988 ("POSIX.1") TAR.
    PrePosix,
    /// POSIX.1-1988 TAR ("ustar", Unix Standard TAR).
    Ustar,
}

impl Format {
    /// Inspect a header record and select the variant that encodes it.
    ///
    /// Returns `None` when the record is a candidate end-of-archive marker
    /// (first name byte zero).
    ///
    /// # Errors
    ///
    /// [`TapeArcError::UnknownMagic`] for a `ustar`-prefixed magic with an
    /// unrecognized variant byte, [`TapeArcError::UnknownVersion`] for a
    /// recognized magic paired with an unrecognized version.
    pub fn detect(record: &[u8; RECORD_LEN]) -> Result<Option<Format>> {
        if record[0] == 0 {
            // Cheap way to check if the record is empty.
            return Ok(None);
        }

        let magic = &record[257..263];
        let version = &record[263..265];

        if &magic[..5] != b"ustar" {
            return Ok(Some(Format::V7));
        }

        match magic[5] {
            0 => {
                if version != b"00" {
                    return Err(TapeArcError::UnknownVersion { variant: "ustar" });
                }

                Ok(Some(Format::Ustar))
            }
            b' ' => {
                if version != b" \0" {
                    return Err(TapeArcError::UnknownVersion {
                        variant: "pre-POSIX",
                    });
                }

                Ok(Some(Format::PrePosix))
            }
            _ => Err(TapeArcError::UnknownMagic),
        }
    }

    /// Number of 512-byte records the header for `entry` occupies.
    pub fn header_blocks(self, _entry: &Entry) -> usize {
        1
    }

    /// Decode a header record into an [`Entry`].
    ///
    /// The checksum is validated first, against both the unsigned and the
    /// signed summation.
    pub fn decode(self, record: &[u8; RECORD_LEN]) -> Result<Entry> {
        let checksum = self.parse_checksum(record)?;
        let type_flag = self.parse_type(record[156])?;
        let path = self.parse_path(record)?;

        let size = parse_octal(
            &record[124..136],
            "size",
            |b| self.is_leading(b),
            |f| self.time_trailer(f),
        )?;
        let mode = parse_octal(
            &record[100..108],
            "mode",
            |b| self.is_leading(b),
            |f| self.id_trailer(f),
        )? as u32;
        let uid = parse_octal(
            &record[108..116],
            "uid",
            |b| self.is_leading(b),
            |f| self.id_trailer(f),
        )? as u32;
        let gid = parse_octal(
            &record[116..124],
            "gid",
            |b| self.is_leading(b),
            |f| self.id_trailer(f),
        )? as u32;
        let mtime = parse_octal(
            &record[136..148],
            "mtime",
            |b| self.is_leading(b),
            |f| self.time_trailer(f),
        )?;

        let (user_name, group_name) = match self {
            Format::V7 => (String::new(), String::new()),
            Format::PrePosix | Format::Ustar => (
                nul_terminated(&record[265..297])
                    .ok_or(TapeArcError::InvalidField { field: "uname" })?,
                nul_terminated(&record[297..329])
                    .ok_or(TapeArcError::InvalidField { field: "gname" })?,
            ),
        };

        Ok(Entry {
            format: self,
            type_flag,
            path,
            mode,
            uid,
            gid,
            size,
            mtime: UNIX_EPOCH + Duration::from_secs(mtime),
            user_name,
            group_name,
            checksum: Some(checksum),
        })
    }

    /// Encode `entry` into a zero-filled header buffer of
    /// [`header_blocks`](Format::header_blocks) records, computing and
    /// writing the checksum last. Returns the checksum.
    pub fn encode(self, entry: &Entry, output: &mut [u8]) -> Result<u32> {
        output[156] = entry.type_flag.raw();

        self.write_path(&entry.path, output)?;
        self.write_id(output, 100, entry.mode, "mode")?;
        self.write_id(output, 108, entry.uid, "uid")?;
        self.write_id(output, 116, entry.gid, "gid")?;
        self.write_time(output, 124, entry.size, "size")?;

        let seconds = entry
            .mtime
            .duration_since(UNIX_EPOCH)
            .map_err(|_| TapeArcError::TimeBeforeEpoch)?
            .as_secs();
        self.write_time(output, 136, seconds, "mtime")?;

        if self != Format::V7 {
            self.write_magic(output);
            write_name_field(&mut output[265..296], &entry.user_name, "uname")?;
            write_name_field(&mut output[297..328], &entry.group_name, "gname")?;
        }

        self.write_checksum(output)
    }

    fn is_leading(self, b: u8) -> bool {
        match self {
            Format::V7 => b == b' ' || b == b'0',
            Format::PrePosix => b == b' ',
            Format::Ustar => b == b'0',
        }
    }

    fn fill(self) -> u8 {
        match self {
            Format::V7 | Format::PrePosix => b' ',
            Format::Ustar => b'0',
        }
    }

    /// Trailer rule for the 8-byte mode/uid/gid fields.
    fn id_trailer(self, field: &[u8]) -> Option<usize> {
        match self {
            Format::V7 => {
                (field[field.len() - 2] == b' ' && field[field.len() - 1] == 0).then_some(2)
            }
            Format::PrePosix | Format::Ustar => {
                let last = field[field.len() - 1];
                (last == b' ' || last == 0).then_some(1)
            }
        }
    }

    /// Trailer rule for the 12-byte size/mtime fields.
    fn time_trailer(self, field: &[u8]) -> Option<usize> {
        match self {
            Format::V7 => (field[field.len() - 1] == b' ').then_some(1),
            Format::PrePosix | Format::Ustar => {
                let last = field[field.len() - 1];
                (last == b' ' || last == 0).then_some(1)
            }
        }
    }

    fn parse_checksum(self, record: &[u8; RECORD_LEN]) -> Result<u32> {
        let stored = parse_octal(
            &record[148..156],
            "checksum",
            |b| self.is_leading(b),
            |f| (f[f.len() - 2] == 0 && f[f.len() - 1] == b' ').then_some(2),
        )? as i64;

        if stored != header_checksum(record, false) && stored != header_checksum(record, true) {
            return Err(TapeArcError::ChecksumMismatch {
                stored: stored as u32,
            });
        }

        Ok(stored as u32)
    }

    fn parse_type(self, flag: u8) -> Result<TypeFlag> {
        match self {
            Format::V7 => match flag {
                0 => Ok(TypeFlag::REGULAR_FILE),
                b'1' => Err(TapeArcError::unsupported_type(flag, "hard link")),
                _ => Err(TapeArcError::UnknownType { flag }),
            },
            Format::PrePosix | Format::Ustar => match flag {
                0 => Ok(TypeFlag::REGULAR_FILE),
                b'1' => Err(TapeArcError::unsupported_type(flag, "hard link")),
                b'2' => Err(TapeArcError::unsupported_type(flag, "symbolic link")),
                b'3' => Err(TapeArcError::unsupported_type(flag, "character device node")),
                b'4' => Err(TapeArcError::unsupported_type(flag, "block device node")),
                b'5' => Ok(TypeFlag::DIRECTORY),
                b'6' => Err(TapeArcError::unsupported_type(flag, "FIFO node")),
                b'7' => Err(TapeArcError::unsupported_type(flag, "reserved type")),
                b'A'..=b'Z' => Err(TapeArcError::unsupported_type(flag, "custom extension")),
                // All remaining tags are opaque regular files.
                _ => Ok(TypeFlag::new(flag)),
            },
        }
    }

    fn parse_path(self, record: &[u8; RECORD_LEN]) -> Result<ArchivePath> {
        let text = match self {
            // The classic layouts require a NUL-terminated name.
            Format::V7 | Format::PrePosix => {
                nul_terminated(&record[..100]).ok_or(TapeArcError::InvalidField { field: "name" })?
            }
            Format::Ustar => {
                let name = &record[..100];
                let prefix = &record[345..500];

                // Either half may legally fill its field without a NUL.
                if prefix[0] != 0 {
                    format!("{}/{}", field_text(prefix), field_text(name))
                } else {
                    field_text(name)
                }
            }
        };

        ArchivePath::parse(&text).map_err(|_| TapeArcError::InvalidField { field: "name" })
    }

    fn write_path(self, path: &ArchivePath, output: &mut [u8]) -> Result<()> {
        let text = path.to_string();
        let value = text.as_bytes();

        match self {
            Format::V7 | Format::PrePosix => {
                if value.len() >= 100 {
                    return Err(TapeArcError::NameTooLong { len: value.len() });
                }

                output[..value.len()].copy_from_slice(value);
                output[value.len()] = 0;
            }
            Format::Ustar => self.write_split_path(value, output)?,
        }

        Ok(())
    }

    /// Ustar name encoding: short names go in the name field alone; longer
    /// ones are split at a `/` so the tail fits 100 bytes and the head fits
    /// the 155-byte prefix field.
    fn write_split_path(self, value: &[u8], output: &mut [u8]) -> Result<()> {
        if value.len() > 255 {
            return Err(TapeArcError::NameTooLong { len: value.len() });
        }

        if value.len() <= 100 {
            output[..value.len()].copy_from_slice(value);

            if value.len() < 100 {
                output[value.len()] = 0;
            }

            return Ok(());
        }

        // Prefer the split where the last 100 bytes begin right after a '/'.
        let (prefix, name) = if value[value.len() - 101] == b'/' {
            (&value[..value.len() - 101], &value[value.len() - 100..])
        } else {
            let window = value.len() - 100;
            let split = value[window..]
                .iter()
                .position(|&b| b == b'/')
                .map(|i| i + window)
                .filter(|&i| i <= 155)
                .ok_or(TapeArcError::NameUnsplittable)?;

            (&value[..split], &value[split + 1..])
        };

        output[345..345 + prefix.len()].copy_from_slice(prefix);
        output[..name.len()].copy_from_slice(name);

        if prefix.len() < 155 {
            output[345 + prefix.len()] = 0;
        }

        if name.len() < 100 {
            output[name.len()] = 0;
        }

        Ok(())
    }

    /// Write one of the three 8-byte id fields starting at `offset`.
    fn write_id(self, output: &mut [u8], offset: usize, value: u32, field: &'static str) -> Result<()> {
        match self {
            Format::V7 => {
                if !write_octal(&mut output[offset..offset + 6], u64::from(value), self.fill()) {
                    return Err(TapeArcError::ValueTooLarge { field });
                }

                output[offset + 6] = b' ';
                output[offset + 7] = 0;
            }
            Format::PrePosix | Format::Ustar => {
                if !write_octal(&mut output[offset..offset + 7], u64::from(value), self.fill()) {
                    return Err(TapeArcError::ValueTooLarge { field });
                }

                output[offset + 7] = 0;
            }
        }

        Ok(())
    }

    /// Write one of the two 12-byte size/mtime fields starting at `offset`.
    fn write_time(self, output: &mut [u8], offset: usize, value: u64, field: &'static str) -> Result<()> {
        if !write_octal(&mut output[offset..offset + 11], value, self.fill()) {
            return Err(TapeArcError::ValueTooLarge { field });
        }

        output[offset + 11] = match self {
            Format::V7 => b' ',
            Format::PrePosix | Format::Ustar => 0,
        };

        Ok(())
    }

    fn write_magic(self, output: &mut [u8]) {
        output[257..262].copy_from_slice(b"ustar");

        match self {
            Format::V7 => {}
            Format::PrePosix => {
                output[262] = b' ';
                output[263] = b' ';
                output[264] = 0;
            }
            Format::Ustar => {
                output[262] = 0;
                output[263] = b'0';
                output[264] = b'0';
            }
        }
    }

    fn write_checksum(self, output: &mut [u8]) -> Result<u32> {
        let sum = header_checksum(&output[..RECORD_LEN], false);

        // The maximum sum of 512 bytes is 130,560 and always fits 6 digits.
        if !write_octal(&mut output[148..154], sum as u64, self.fill()) {
            return Err(TapeArcError::ValueTooLarge { field: "checksum" });
        }

        output[154] = 0;
        output[155] = b' ';

        Ok(sum as u32)
    }
}

/// Decode an ASCII field that must contain a NUL terminator.
fn nul_terminated(field: &[u8]) -> Option<String> {
    let end = field.iter().position(|&b| b == 0)?;
    Some(String::from_utf8_lossy(&field[..end]).into_owned())
}

/// Decode an ASCII field up to its NUL terminator or the field end.
fn field_text(field: &[u8]) -> String {
    let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    String::from_utf8_lossy(&field[..end]).into_owned()
}

/// Write a NUL-terminated owner/group name into its 31-byte write window.
fn write_name_field(field: &mut [u8], value: &str, name: &'static str) -> Result<()> {
    let value = value.as_bytes();

    if value.len() >= field.len() {
        return Err(TapeArcError::ValueTooLarge { field: name });
    }

    field[..value.len()].copy_from_slice(value);
    field[value.len()] = 0;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_entry(format: Format, path: &str) -> Entry {
        let path = ArchivePath::parse(path).unwrap();
        let type_flag = match format {
            Format::V7 => TypeFlag::REGULAR_FILE,
            _ if path.is_directory() => TypeFlag::DIRECTORY,
            _ => TypeFlag::REGULAR_FILE,
        };

        Entry::new(format, type_flag, path)
            .with_uid(1000)
            .with_gid(1000)
            .with_mtime(UNIX_EPOCH + Duration::from_secs(1_647_808_514))
    }

    fn encode_record(entry: &Entry) -> [u8; RECORD_LEN] {
        let mut record = [0u8; RECORD_LEN];
        entry.format.encode(entry, &mut record).unwrap();
        record
    }

    fn restamp_checksum(record: &mut [u8; RECORD_LEN]) {
        let sum = header_checksum(record, false);
        assert!(write_octal(&mut record[148..154], sum as u64, b'0'));
        record[154] = 0;
        record[155] = b' ';
    }

    #[test]
    fn test_detect_variants() {
        let mut record = [0u8; RECORD_LEN];
        record[0] = b'.';
        assert_eq!(Format::detect(&record).unwrap(), Some(Format::V7));

        record[257..265].copy_from_slice(b"ustar\000");
        assert_eq!(Format::detect(&record).unwrap(), Some(Format::Ustar));

        record[257..265].copy_from_slice(b"ustar  \0");
        assert_eq!(Format::detect(&record).unwrap(), Some(Format::PrePosix));

        record[0] = 0;
        assert_eq!(Format::detect(&record).unwrap(), None);
    }

    #[test]
    fn test_detect_rejects_unknown_combinations() {
        let mut record = [0u8; RECORD_LEN];
        record[0] = b'.';

        record[257..265].copy_from_slice(b"ustar\09!");
        assert!(matches!(
            Format::detect(&record),
            Err(TapeArcError::UnknownVersion { variant: "ustar" })
        ));

        record[257..265].copy_from_slice(b"ustar 00");
        assert!(matches!(
            Format::detect(&record),
            Err(TapeArcError::UnknownVersion {
                variant: "pre-POSIX"
            })
        ));

        record[257..265].copy_from_slice(b"ustarX00");
        assert!(matches!(
            Format::detect(&record),
            Err(TapeArcError::UnknownMagic)
        ));
    }

    #[test]
    fn test_v7_numeric_field_images() {
        let entry = sample_entry(Format::V7, "./file").with_size(14);
        let record = encode_record(&entry);

        assert_eq!(&record[100..108], b"   644 \0");
        assert_eq!(&record[108..116], b"  1750 \0");
        assert_eq!(&record[124..136], b"         16 ");
        assert_eq!(record[156], 0);
        // No magic in V7.
        assert_eq!(&record[257..265], [0u8; 8]);
    }

    #[test]
    fn test_preposix_numeric_field_images() {
        let entry = sample_entry(Format::PrePosix, "./file").with_size(14);
        let record = encode_record(&entry);

        assert_eq!(&record[100..108], b"    644\0");
        assert_eq!(&record[108..116], b"   1750\0");
        assert_eq!(&record[124..136], b"         16\0");
        assert_eq!(&record[257..265], b"ustar  \0");
    }

    #[test]
    fn test_ustar_numeric_field_images() {
        let entry = sample_entry(Format::Ustar, "./file").with_size(14);
        let record = encode_record(&entry);

        assert_eq!(&record[100..108], b"0000644\0");
        assert_eq!(&record[108..116], b"0001750\0");
        assert_eq!(&record[124..136], b"00000000016\0");
        assert_eq!(&record[257..265], b"ustar\000");
    }

    #[test]
    fn test_decode_roundtrip_all_variants() {
        for format in [Format::V7, Format::PrePosix, Format::Ustar] {
            let mut entry = sample_entry(format, "./some/file").with_size(1234);

            if format != Format::V7 {
                entry = entry.with_user_name("alice").with_group_name("users");
            }

            let record = encode_record(&entry);
            assert_eq!(Format::detect(&record).unwrap(), Some(format));

            let decoded = format.decode(&record).unwrap();
            assert_eq!(decoded.path, entry.path);
            assert_eq!(decoded.type_flag, entry.type_flag);
            assert_eq!(decoded.mode, entry.mode);
            assert_eq!(decoded.uid, entry.uid);
            assert_eq!(decoded.gid, entry.gid);
            assert_eq!(decoded.size, entry.size);
            assert_eq!(decoded.mtime, entry.mtime);
            assert_eq!(decoded.user_name, entry.user_name);
            assert_eq!(decoded.group_name, entry.group_name);
            assert!(decoded.checksum.is_some());
        }
    }

    #[test]
    fn test_checksum_mismatch_on_flipped_byte() {
        let entry = sample_entry(Format::Ustar, "./file");
        let mut record = encode_record(&entry);
        record[101] ^= 1;

        assert!(matches!(
            Format::Ustar.decode(&record),
            Err(TapeArcError::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn test_signed_checksum_accepted() {
        let entry = sample_entry(Format::Ustar, "./file");
        let mut record = encode_record(&entry);

        // High bytes in a region the decoder never parses make the two
        // summation modes disagree.
        record[200] = 0xFF;
        record[201] = 0xFF;

        let signed = header_checksum(&record, true);
        assert_ne!(signed, header_checksum(&record, false));

        assert!(write_octal(&mut record[148..154], signed as u64, b'0'));
        record[154] = 0;
        record[155] = b' ';

        let decoded = Format::Ustar.decode(&record).unwrap();
        assert_eq!(decoded.checksum, Some(signed as u32));
    }

    #[test]
    fn test_unsupported_type_flags() {
        let entry = sample_entry(Format::Ustar, "./file");
        let mut record = encode_record(&entry);

        let cases: [(u8, &str); 7] = [
            (b'1', "hard link"),
            (b'2', "symbolic link"),
            (b'3', "character device node"),
            (b'4', "block device node"),
            (b'6', "FIFO node"),
            (b'7', "reserved type"),
            (b'L', "custom extension"),
        ];

        for (flag, kind) in cases {
            record[156] = flag;
            restamp_checksum(&mut record);

            match Format::Ustar.decode(&record) {
                Err(TapeArcError::UnsupportedType { kind: got, .. }) => assert_eq!(got, kind),
                other => panic!("flag {flag:#04x}: expected unsupported type, got {other:?}"),
            }
        }

        // Unrecognized, non-reserved tags pass through as opaque files.
        record[156] = b'z';
        restamp_checksum(&mut record);
        let decoded = Format::Ustar.decode(&record).unwrap();
        assert_eq!(decoded.type_flag, TypeFlag::new(b'z'));
    }

    #[test]
    fn test_v7_rejects_foreign_type_flags() {
        let entry = sample_entry(Format::V7, "./file");
        let mut record = encode_record(&entry);

        record[156] = b'5';
        restamp_checksum(&mut record);
        assert!(matches!(
            Format::V7.decode(&record),
            Err(TapeArcError::UnknownType { flag: b'5' })
        ));

        record[156] = b'1';
        restamp_checksum(&mut record);
        assert!(matches!(
            Format::V7.decode(&record),
            Err(TapeArcError::UnsupportedType { .. })
        ));
    }

    #[test]
    fn test_v7_name_requires_nul() {
        let entry = sample_entry(Format::V7, "./file");
        let mut record = encode_record(&entry);

        for b in &mut record[..100] {
            *b = b'a';
        }
        record[0] = b'.';
        record[1] = b'/';
        restamp_checksum(&mut record);

        assert!(matches!(
            Format::V7.decode(&record),
            Err(TapeArcError::InvalidField { field: "name" })
        ));
    }

    #[test]
    fn test_v7_name_length_limit() {
        // 97 segment bytes + "./" renders to 99 bytes and still fits.
        let path = format!("./{}", "a".repeat(97));
        let entry = sample_entry(Format::V7, &path);
        let record = encode_record(&entry);
        assert_eq!(Format::V7.decode(&record).unwrap().path, entry.path);

        let path = format!("./{}", "a".repeat(98));
        let entry = sample_entry(Format::V7, &path);
        let mut record = [0u8; RECORD_LEN];
        assert!(matches!(
            Format::V7.encode(&entry, &mut record),
            Err(TapeArcError::NameTooLong { len: 100 })
        ));
    }

    #[test]
    fn test_ustar_split_at_exact_boundary() {
        // Build a path whose rendered form has '/' exactly 101 bytes from
        // the end, so the preferred split applies and the name field is
        // filled completely.
        let tail = "b".repeat(100);
        let path = format!("./{}/{}", "a".repeat(40), tail);
        assert_eq!(path.len(), 143);
        assert_eq!(path.as_bytes()[path.len() - 101], b'/');

        let entry = sample_entry(Format::Ustar, &path);
        let record = encode_record(&entry);

        assert_eq!(&record[..100], tail.as_bytes());
        assert_eq!(
            &record[345..388],
            format!("./{}\0", "a".repeat(40)).as_bytes()
        );

        let decoded = Format::Ustar.decode(&record).unwrap();
        assert_eq!(decoded.path.to_string(), path);
    }

    #[test]
    fn test_ustar_split_reassembles_with_prefilled_header() {
        let paths = [
            "./this/is/very/long/path/it/is/really/long/so/long/super/long/exceptional/long/still/not/long/enought/".to_string(),
            // Last component does not fit in the name field.
            format!("./{}/", "1234567890".repeat(10)),
        ];

        for path in &paths {
            let entry = sample_entry(Format::Ustar, path);

            // Non-zero bytes surface any missing NUL termination.
            let mut record = [0xFFu8; RECORD_LEN];
            Format::Ustar.encode(&entry, &mut record).unwrap();

            let prefix = field_text(&record[345..500]);
            let name = field_text(&record[..100]);
            assert_eq!(&format!("{prefix}/{name}"), path);
        }
    }

    #[test]
    fn test_ustar_name_length_failures() {
        let path = format!("./{}", "a".repeat(260));
        let entry = sample_entry(Format::Ustar, &path);
        let mut record = [0u8; RECORD_LEN];
        assert!(matches!(
            Format::Ustar.encode(&entry, &mut record),
            Err(TapeArcError::NameTooLong { .. })
        ));

        // No '/' inside the final 100-byte window at all.
        let path = format!("./{}", "a".repeat(200));
        let entry = sample_entry(Format::Ustar, &path);
        let mut record = [0u8; RECORD_LEN];
        assert!(matches!(
            Format::Ustar.encode(&entry, &mut record),
            Err(TapeArcError::NameUnsplittable)
        ));

        // A '/' exists in the window but the resulting prefix would exceed
        // the 155-byte prefix field.
        let path = format!("./{}/{}", "a".repeat(160), "b".repeat(80));
        let entry = sample_entry(Format::Ustar, &path);
        let mut record = [0u8; RECORD_LEN];
        assert!(matches!(
            Format::Ustar.encode(&entry, &mut record),
            Err(TapeArcError::NameUnsplittable)
        ));
    }

    #[test]
    fn test_ustar_full_name_field_without_nul() {
        // Exactly 100 rendered bytes occupy the whole name field.
        let path = format!("./{}", "a".repeat(98));
        let entry = sample_entry(Format::Ustar, &path);
        let record = encode_record(&entry);

        assert!(!record[..100].contains(&0));
        assert_eq!(record[345], 0);

        let decoded = Format::Ustar.decode(&record).unwrap();
        assert_eq!(decoded.path.to_string(), path);
    }

    #[test]
    fn test_owner_name_too_long() {
        let entry = sample_entry(Format::Ustar, "./file").with_user_name("x".repeat(31));
        let mut record = [0u8; RECORD_LEN];
        assert!(matches!(
            Format::Ustar.encode(&entry, &mut record),
            Err(TapeArcError::ValueTooLarge { field: "uname" })
        ));

        let entry = sample_entry(Format::Ustar, "./file").with_user_name("x".repeat(30));
        let mut record = [0u8; RECORD_LEN];
        assert!(Format::Ustar.encode(&entry, &mut record).is_ok());
    }

    #[test]
    fn test_mtime_before_epoch_rejected() {
        let entry = sample_entry(Format::Ustar, "./file")
            .with_mtime(UNIX_EPOCH - Duration::from_secs(1));
        let mut record = [0u8; RECORD_LEN];
        assert!(matches!(
            Format::Ustar.encode(&entry, &mut record),
            Err(TapeArcError::TimeBeforeEpoch)
        ));
    }
}

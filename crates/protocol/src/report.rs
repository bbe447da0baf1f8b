//! crates/protocol/src/report.rs
//!
//! Human-readable region listings.

use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::region::Region;

/// Writes one `Region <i> - Start: <s>, End: <e>` line per region.
///
/// # Errors
///
/// Propagates any error returned by `writer`.
pub fn format_region_report<W: Write>(regions: &[Region], mut writer: W) -> io::Result<()> {
    for (index, region) in regions.iter().enumerate() {
        writeln!(
            writer,
            "Region {index} - Start: {}, End: {}",
            region.start_byte(),
            region.end_byte()
        )?;
    }
    writer.flush()
}

/// Writes the region report to a new file at `path`.
///
/// The file is created with owner-only permissions on unix. An existing file
/// is never overwritten.
///
/// # Errors
///
/// Fails with [`io::ErrorKind::AlreadyExists`] when `path` exists, or with
/// the underlying error when the file cannot be created or written.
pub fn write_region_report(regions: &[Region], path: &Path) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let file = options.open(path)?;
    format_region_report(regions, BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_one_line_per_region() {
        let regions = [Region::new(0, 4), Region::new(5, 8)];
        let mut out = Vec::new();
        format_region_report(&regions, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Region 0 - Start: 0, End: 4\nRegion 1 - Start: 5, End: 8\n"
        );
    }

    #[test]
    fn empty_report_is_empty() {
        let mut out = Vec::new();
        format_region_report(&[], &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn writes_new_file_and_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("regions.txt");
        let regions = [Region::new(0, 9)];

        write_region_report(&regions, &path).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "Region 0 - Start: 0, End: 9\n"
        );

        let err = write_region_report(&regions, &path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
    }
}

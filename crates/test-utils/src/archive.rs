//! In-memory KMZ archives.

use std::io::{Cursor, Write};
use std::path::PathBuf;

use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Build a zip archive holding `entries` (name, body) in the given order.
///
/// Entries are deflated, as the agency's KMZ files are.
///
/// # Example
///
/// ```
/// use test_utils::build_kmz;
///
/// let kmz = build_kmz(&[("doc.kml", "<kml/>")]);
/// assert_eq!(&kmz[..2], b"PK");
/// ```
pub fn build_kmz<B: AsRef<[u8]>>(entries: &[(&str, B)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    for (name, body) in entries {
        writer
            .start_file(*name, options)
            .expect("start zip entry");
        writer.write_all(body.as_ref()).expect("write zip entry");
    }

    writer.finish().expect("finish zip archive").into_inner()
}

/// A KMZ with a single KML document plus one icon entry before it.
pub fn kmz_with_kml(kml: &str) -> Vec<u8> {
    build_kmz(&[
        ("files/icon.png", &b"\x89PNG\r\n\x1a\n"[..]),
        ("doc.kml", kml.as_bytes()),
    ])
}

/// Write `bytes` to a fresh temporary directory as `name`.
///
/// The directory lives as long as the returned guard.
pub fn write_temp_file(name: &str, bytes: &[u8]) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join(name);
    std::fs::write(&path, bytes).expect("write temp file");
    (dir, path)
}

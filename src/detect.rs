//! PDF header sniffing.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

const PDF_MAGIC: &[u8] = b"%PDF-";

/// Read the `%PDF-x.y` header of a file and return its version string.
///
/// Only the first few bytes are read; the handle is closed before returning.
pub fn sniff_version<P: AsRef<Path>>(path: P) -> Result<String> {
    let mut header = Vec::with_capacity(16);
    File::open(path)?.take(16).read_to_end(&mut header)?;
    version_from_header(&header)
}

/// Extract the PDF version from the leading bytes of a document.
pub fn version_from_header(data: &[u8]) -> Result<String> {
    let rest = data.strip_prefix(PDF_MAGIC).ok_or(Error::UnknownFormat)?;
    let version = rest.get(..3).ok_or(Error::UnknownFormat)?;

    match version {
        [major, b'.', minor] if major.is_ascii_digit() && minor.is_ascii_digit() => {
            Ok(String::from_utf8_lossy(version).into_owned())
        }
        _ => Err(Error::UnsupportedVersion(
            String::from_utf8_lossy(version).into_owned(),
        )),
    }
}

/// Check if a file starts with a valid PDF header.
pub fn is_pdf<P: AsRef<Path>>(path: P) -> bool {
    sniff_version(path).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_from_header() {
        assert_eq!(version_from_header(b"%PDF-1.7\n%\xe2\xe3").unwrap(), "1.7");
        assert_eq!(version_from_header(b"%PDF-2.0\n").unwrap(), "2.0");
    }

    #[test]
    fn test_rejects_non_pdf() {
        assert!(matches!(
            version_from_header(b"<!DOCTYPE html>"),
            Err(Error::UnknownFormat)
        ));
        assert!(matches!(version_from_header(b"%PDF"), Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_rejects_bad_version() {
        assert!(matches!(
            version_from_header(b"%PDF-x.y"),
            Err(Error::UnsupportedVersion(_))
        ));
    }

    #[test]
    fn test_is_pdf_on_missing_file() {
        assert!(!is_pdf("/nonexistent/file.pdf"));
    }
}

//! File storage for raw and encoded data.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use huffer_core::Result;
use tracing::trace;

/// Read a whole file into memory.
pub fn read(path: &Path) -> Result<Vec<u8>> {
    let bytes = fs::read(path)?;
    trace!(path = %path.display(), bytes = bytes.len(), "read");
    Ok(bytes)
}

/// Write `bytes` to `path`, replacing the file or appending to it.
pub fn write(path: &Path, bytes: &[u8], append: bool) -> Result<()> {
    if append {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        file.write_all(bytes)?;
    } else {
        fs::write(path, bytes)?;
    }
    trace!(path = %path.display(), bytes = bytes.len(), append, "wrote");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_then_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.bin");

        write(&path, b"first", false).unwrap();
        assert_eq!(read(&path).unwrap(), b"first");

        write(&path, b"second", false).unwrap();
        assert_eq!(read(&path).unwrap(), b"second");
    }

    #[test]
    fn test_append() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("log.bin");

        write(&path, b"ab", true).unwrap();
        write(&path, b"cd", true).unwrap();
        assert_eq!(read(&path).unwrap(), b"abcd");
    }

    #[test]
    fn test_read_missing() {
        let dir = tempdir().unwrap();
        let err = read(&dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, huffer_core::Error::Io(_)));
    }
}

//! Test utilities for creating temporary log files.

#[cfg(test)]
use std::fs::{File, OpenOptions};
#[cfg(test)]
use std::io::Write;
#[cfg(test)]
use std::path::{Path, PathBuf};

#[cfg(test)]
pub struct TempLogFile {
    path: PathBuf,
    _temp_dir: tempfile::TempDir,
}

#[cfg(test)]
impl TempLogFile {
    /// Create an empty temporary log file.
    pub fn new() -> std::io::Result<Self> {
        let temp_dir = tempfile::tempdir()?;
        let path = temp_dir.path().join("test.log");

        File::create(&path)?;

        Ok(Self {
            path,
            _temp_dir: temp_dir,
        })
    }

    /// Create a temporary log file holding exactly `content` (no implicit
    /// trailing newline, so unterminated final lines can be exercised).
    pub fn with_content(content: &str) -> std::io::Result<Self> {
        let temp_file = Self::new()?;
        temp_file.append(content)?;
        Ok(temp_file)
    }

    /// Append raw bytes to the file; callers supply their own newlines.
    pub fn append(&self, content: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        file.write_all(content.as_bytes())?;
        file.flush()?;
        Ok(())
    }

    /// Truncate the file to zero length (simulate log rotation).
    pub fn truncate(&self) -> std::io::Result<()> {
        File::create(&self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creation_and_append() {
        let log = TempLogFile::new().unwrap();
        assert!(log.path().exists());

        log.append("line 1\n").unwrap();
        log.append("line 2").unwrap();

        let content = std::fs::read_to_string(log.path()).unwrap();
        assert_eq!(content, "line 1\nline 2");
    }

    #[test]
    fn test_with_content_writes_exact_bytes() {
        let log = TempLogFile::with_content("hello").unwrap();
        let content = std::fs::read_to_string(log.path()).unwrap();
        assert_eq!(content, "hello");
    }

    #[test]
    fn test_truncate() {
        let log = TempLogFile::with_content("initial content\n").unwrap();
        log.truncate().unwrap();

        let content = std::fs::read_to_string(log.path()).unwrap();
        assert!(content.is_empty());
    }
}

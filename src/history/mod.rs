//! Match history persistence
//!
//! The history is a flat UTF-8 text file, one rendered match per line,
//! newest entries at the top. It is read once at the start of a run and
//! rewritten at most once at the end, with the new matches prepended.
//! The rewrite goes through a temporary file in the same directory and an
//! atomic rename, so a crash mid-write never leaves a partial file behind.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

/// Errors that can occur during history file operations
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("failed to read history file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to replace history file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Loads the full history file contents
///
/// A missing file is not an error: the first run of a new keyword set has
/// no history yet, and returns an empty snapshot. Any other read failure
/// propagates, since silently treating an unreadable history as empty
/// would re-report every match it contains.
pub fn load(path: &Path) -> Result<String, HistoryError> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(contents),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(HistoryError::Read {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Prepends new lines to the history file, keeping the previous contents
///
/// Writes `new_lines` (newest first, one per line) followed by
/// `previous_text` verbatim, then atomically replaces the file at `path`.
/// `previous_text` must be the snapshot read at the start of the run; no
/// line of it is dropped, duplicated, or reordered.
pub fn prepend(path: &Path, new_lines: &[String], previous_text: &str) -> Result<(), HistoryError> {
    let write_err = |source: io::Error| HistoryError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(write_err)?;
            parent
        }
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir).map_err(write_err)?;
    for line in new_lines {
        writeln!(file, "{}", line).map_err(write_err)?;
    }
    file.write_all(previous_text.as_bytes()).map_err(write_err)?;
    file.flush().map_err(write_err)?;

    file.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_file_returns_empty() {
        let dir = TempDir::new().unwrap();
        let contents = load(&dir.path().join("absent.log")).unwrap();
        assert_eq!(contents, "");
    }

    #[test]
    fn test_prepend_creates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("watch-monitor.log");

        prepend(&path, &["Foo: supost.com/post/index/1".to_string()], "").unwrap();

        assert_eq!(
            load(&path).unwrap(),
            "Foo: supost.com/post/index/1\n"
        );
    }

    #[test]
    fn test_prepend_keeps_previous_contents_in_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("watch-monitor.log");
        let previous = "old one: supost.com/post/index/2\nold two: supost.com/post/index/1\n";
        fs::write(&path, previous).unwrap();

        prepend(
            &path,
            &[
                "new one: supost.com/post/index/4".to_string(),
                "new two: supost.com/post/index/3".to_string(),
            ],
            previous,
        )
        .unwrap();

        let expected = "new one: supost.com/post/index/4\nnew two: supost.com/post/index/3\n\
                        old one: supost.com/post/index/2\nold two: supost.com/post/index/1\n";
        assert_eq!(load(&path).unwrap(), expected);
    }

    #[test]
    fn test_prepend_creates_missing_parent_dir() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("watch-monitor.log");

        prepend(&path, &["Foo: supost.com/post/index/1".to_string()], "").unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_load_then_prepend_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("watch-monitor.log");

        prepend(&path, &["first: supost.com/post/index/1".to_string()], "").unwrap();
        let snapshot = load(&path).unwrap();
        prepend(
            &path,
            &["second: supost.com/post/index/2".to_string()],
            &snapshot,
        )
        .unwrap();

        assert_eq!(
            load(&path).unwrap(),
            "second: supost.com/post/index/2\nfirst: supost.com/post/index/1\n"
        );
    }
}

//! PID file I/O.
//!
//! Format: the decimal PID and nothing else.
//! ```text
//! <pid>
//! ```
//! Readers trim surrounding whitespace, so a trailing newline is accepted.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

/// Publish `pid` at `path`, failing with `AlreadyExists` if a PID file is there.
///
/// # Atomicity
/// 1. Write to `<name>.<our pid>.tmp` next to the target
/// 2. Hard-link the temp file to `path` (fails if `path` exists)
/// 3. Remove the temp file
///
/// Filesystems without hard links fall back to an exclusive create.
pub fn publish_pidfile(path: &Path, pid: u32) -> io::Result<()> {
    let temp_path = temp_path_for(path);
    fs::write(&temp_path, pid.to_string())?;

    let linked = fs::hard_link(&temp_path, path);
    let _ = fs::remove_file(&temp_path);

    match linked {
        Ok(()) => Ok(()),
        Err(e) if matches!(
            e.kind(),
            io::ErrorKind::Unsupported | io::ErrorKind::PermissionDenied
        ) =>
        {
            debug!(path = %path.display(), error = %e, "hard link unavailable, using exclusive create");
            create_exclusive(path, pid)
        }
        Err(e) => Err(e),
    }
}

/// Overwrite the PID file we already own with `pid`.
///
/// Writes a temp file and renames it over `path`, so readers see either the
/// old PID or the new one.
pub fn replace_pidfile(path: &Path, pid: u32) -> io::Result<()> {
    let temp_path = temp_path_for(path);
    fs::write(&temp_path, pid.to_string())?;

    fs::rename(&temp_path, path).inspect_err(|_| {
        let _ = fs::remove_file(&temp_path);
    })
}

/// Read the PID stored at `path`.
///
/// Returns `NotFound` if there is no file and `InvalidData` if the content
/// is not a positive integer.
pub fn read_pidfile(path: &Path) -> io::Result<u32> {
    let content = fs::read_to_string(path)?;
    parse_pidfile_content(&content)
}

/// Delete PID file (idempotent - no error if missing).
pub fn delete_pidfile(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

fn create_exclusive(path: &Path, pid: u32) -> io::Result<()> {
    let mut file = OpenOptions::new().write(true).create_new(true).open(path)?;
    file.write_all(pid.to_string().as_bytes())?;
    file.sync_all()
}

fn temp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map_or_else(|| "pid".into(), |n| n.to_string_lossy().into_owned());
    path.with_file_name(format!("{name}.{}.tmp", std::process::id()))
}

fn parse_pidfile_content(content: &str) -> io::Result<u32> {
    content
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|pid| *pid > 0)
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, "missing or invalid PID"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn pid_path(dir: &TempDir) -> PathBuf {
        dir.path().join("app.pid")
    }

    #[test]
    fn publish_then_read() {
        let dir = TempDir::new().expect("tempdir");
        let path = pid_path(&dir);

        publish_pidfile(&path, 98765).expect("publish failed");
        assert_eq!(fs::read_to_string(&path).expect("read raw"), "98765");
        assert_eq!(read_pidfile(&path).expect("read failed"), 98765);
    }

    #[test]
    fn publish_refuses_to_overwrite() {
        let dir = TempDir::new().expect("tempdir");
        let path = pid_path(&dir);
        fs::write(&path, "111").expect("seed");

        let err = publish_pidfile(&path, 222).expect_err("must not overwrite");
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        assert_eq!(read_pidfile(&path).expect("read"), 111);
    }

    #[test]
    fn publish_leaves_no_temp_files() {
        let dir = TempDir::new().expect("tempdir");
        let path = pid_path(&dir);
        fs::write(&path, "111").expect("seed");

        let _ = publish_pidfile(&path, 222);
        publish_pidfile(&dir.path().join("other.pid"), 333).expect("publish other");

        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .expect("read_dir")
            .flatten()
            .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("tmp"))
            .collect();
        assert!(leftovers.is_empty(), "temp files left: {leftovers:?}");
    }

    #[test]
    fn replace_overwrites_own_claim() {
        let dir = TempDir::new().expect("tempdir");
        let path = pid_path(&dir);
        publish_pidfile(&path, 111).expect("claim");

        replace_pidfile(&path, 222).expect("replace");
        assert_eq!(read_pidfile(&path).expect("read"), 222);

        let entries = fs::read_dir(dir.path()).expect("read_dir").count();
        assert_eq!(entries, 1, "only the PID file should remain");
    }

    #[test]
    fn read_accepts_trailing_whitespace() {
        let dir = TempDir::new().expect("tempdir");
        let path = pid_path(&dir);
        fs::write(&path, " 4242\n").expect("seed");
        assert_eq!(read_pidfile(&path).expect("read"), 4242);
    }

    #[test]
    fn read_rejects_garbage() {
        let dir = TempDir::new().expect("tempdir");
        let path = pid_path(&dir);
        for content in ["", "abc", "-5", "0", "12 34"] {
            fs::write(&path, content).expect("seed");
            let err = read_pidfile(&path).expect_err(content);
            assert_eq!(err.kind(), io::ErrorKind::InvalidData, "content {content:?}");
        }
    }

    #[test]
    fn read_missing_is_not_found() {
        let dir = TempDir::new().expect("tempdir");
        let err = read_pidfile(&pid_path(&dir)).expect_err("missing");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn delete_is_idempotent() {
        let dir = TempDir::new().expect("tempdir");
        let path = pid_path(&dir);
        publish_pidfile(&path, 7).expect("publish");

        delete_pidfile(&path).expect("delete failed");
        assert!(!path.exists());

        // Second delete should be idempotent
        delete_pidfile(&path).expect("second delete failed");
    }
}

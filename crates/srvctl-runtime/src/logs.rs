//! Server log following.
//!
//! Behaves like `tail -n N -f`: print the last lines, then stream bytes as
//! they are appended. The file is reopened by path on every poll, so a log
//! truncated by a restart (or deleted and recreated) is picked up from the
//! beginning.

use std::future::Future;
use std::io::{self, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::fs::{self, File};
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tokio::time::sleep;
use tracing::debug;

/// Lines printed before following starts, matching `tail`.
pub const DEFAULT_TAIL_LINES: usize = 10;

/// How often the file is checked for new data.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Only this many trailing bytes are scanned for the initial lines.
const TAIL_WINDOW: u64 = 64 * 1024;

/// Follows a single log file.
#[derive(Debug, Clone)]
pub struct LogFollower {
    path: PathBuf,
    poll_interval: Duration,
}

impl LogFollower {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            poll_interval: POLL_INTERVAL,
        }
    }

    /// Override the poll interval.
    #[must_use]
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the last `lines` lines. Returns the bytes and the offset they end at.
    pub async fn tail(&self, lines: usize) -> io::Result<(Vec<u8>, u64)> {
        let mut file = File::open(&self.path).await?;
        let len = file.metadata().await?.len();
        let start = len.saturating_sub(TAIL_WINDOW);

        file.seek(SeekFrom::Start(start)).await?;
        let mut buf = Vec::new();
        (&mut file).take(len - start).read_to_end(&mut buf).await?;

        let end = start + buf.len() as u64;
        let tail = last_lines(&buf, lines, start > 0).to_vec();
        Ok((tail, end))
    }

    /// Print the last `lines` lines to `out`, then stream new data until
    /// `shutdown` resolves.
    pub async fn follow<W, F>(&self, lines: usize, out: &mut W, shutdown: F) -> io::Result<()>
    where
        W: Write,
        F: Future<Output = ()>,
    {
        let (initial, mut offset) = self.tail(lines).await?;
        out.write_all(&initial)?;
        out.flush()?;

        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                () = &mut shutdown => return Ok(()),
                () = sleep(self.poll_interval) => {}
            }
            offset = self.drain_from(offset, out).await?;
        }
    }

    /// Copy everything past `offset` to `out` and return the new offset.
    async fn drain_from<W: Write>(&self, offset: u64, out: &mut W) -> io::Result<u64> {
        let len = match fs::metadata(&self.path).await {
            Ok(meta) => meta.len(),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "log file removed, waiting for it to reappear");
                return Ok(0);
            }
            Err(e) => return Err(e),
        };

        let from = if len < offset {
            debug!(path = %self.path.display(), "log file truncated, following from start");
            0
        } else {
            offset
        };
        if len == from {
            return Ok(from);
        }

        let mut file = File::open(&self.path).await?;
        file.seek(SeekFrom::Start(from)).await?;
        let mut buf = Vec::new();
        file.take(len - from).read_to_end(&mut buf).await?;

        out.write_all(&buf)?;
        out.flush()?;
        Ok(from + buf.len() as u64)
    }
}

/// The suffix of `buf` holding its last `lines` lines.
///
/// When `partial_front` is set the buffer starts mid-file, so its first
/// (possibly cut) line is dropped if the window holds fewer lines than asked.
fn last_lines(buf: &[u8], lines: usize, partial_front: bool) -> &[u8] {
    if lines == 0 {
        return &[];
    }

    let body = buf.strip_suffix(b"\n").unwrap_or(buf);
    let mut seen = 0;
    for (idx, byte) in body.iter().enumerate().rev() {
        if *byte == b'\n' {
            seen += 1;
            if seen == lines {
                return &buf[idx + 1..];
            }
        }
    }

    if partial_front {
        buf.iter()
            .position(|b| *b == b'\n')
            .map_or(&buf[buf.len()..], |idx| &buf[idx + 1..])
    } else {
        buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as stdfs;
    use tempfile::TempDir;

    #[test]
    fn last_lines_takes_suffix() {
        assert_eq!(last_lines(b"a\nb\nc\n", 2, false), b"b\nc\n");
        assert_eq!(last_lines(b"a\nb\nc", 1, false), b"c");
        assert_eq!(last_lines(b"a\nb\n", 10, false), b"a\nb\n");
        assert_eq!(last_lines(b"a\nb\n", 0, false), b"");
    }

    #[test]
    fn last_lines_drops_cut_line_in_window() {
        assert_eq!(last_lines(b"tail of x\nfull\n", 5, true), b"full\n");
        assert_eq!(last_lines(b"no newline at all", 5, true), b"");
    }

    #[tokio::test]
    async fn tail_reports_end_offset() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("app.log");
        stdfs::write(&path, "1\n2\n3\n4\n").expect("seed");

        let (bytes, offset) = LogFollower::new(&path).tail(2).await.expect("tail");
        assert_eq!(bytes, b"3\n4\n");
        assert_eq!(offset, 8);
    }

    #[tokio::test]
    async fn tail_of_large_file_stays_in_window() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("app.log");
        let mut file = stdfs::File::create(&path).expect("create");
        for i in 0..20_000 {
            writeln!(file, "line {i}").expect("write");
        }
        drop(file);

        let (bytes, _) = LogFollower::new(&path).tail(3).await.expect("tail");
        assert_eq!(bytes, b"line 19997\nline 19998\nline 19999\n");
    }

    #[tokio::test]
    async fn follow_streams_appended_lines() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("app.log");
        stdfs::write(&path, "one\ntwo\n").expect("seed");

        let writer_path = path.clone();
        let writer = tokio::spawn(async move {
            sleep(Duration::from_millis(100)).await;
            let mut file = stdfs::OpenOptions::new()
                .append(true)
                .open(&writer_path)
                .expect("open for append");
            file.write_all(b"three\n").expect("append");
        });

        let mut out = Vec::new();
        LogFollower::new(&path)
            .with_poll_interval(Duration::from_millis(20))
            .follow(10, &mut out, sleep(Duration::from_millis(600)))
            .await
            .expect("follow");
        writer.await.expect("writer task");

        assert_eq!(String::from_utf8_lossy(&out), "one\ntwo\nthree\n");
    }

    #[tokio::test]
    async fn follow_restarts_after_truncation() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("app.log");
        stdfs::write(&path, "old server output\n").expect("seed");

        let writer_path = path.clone();
        let writer = tokio::spawn(async move {
            sleep(Duration::from_millis(100)).await;
            stdfs::write(&writer_path, "new\n").expect("truncate");
        });

        let mut out = Vec::new();
        LogFollower::new(&path)
            .with_poll_interval(Duration::from_millis(20))
            .follow(10, &mut out, sleep(Duration::from_millis(600)))
            .await
            .expect("follow");
        writer.await.expect("writer task");

        assert_eq!(String::from_utf8_lossy(&out), "old server output\nnew\n");
    }

    #[tokio::test]
    async fn follow_missing_file_fails_fast() {
        let dir = TempDir::new().expect("tempdir");
        let mut out = Vec::new();
        let result = LogFollower::new(dir.path().join("absent.log"))
            .follow(10, &mut out, std::future::pending())
            .await;
        assert_eq!(
            result.expect_err("missing").kind(),
            io::ErrorKind::NotFound
        );
    }
}

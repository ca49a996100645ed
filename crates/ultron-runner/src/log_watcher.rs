use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::time::{sleep, Instant};
use tracing::{debug, info, warn};

/// Interval between polls while waiting for a log sentinel
const SENTINEL_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Tails a growing log file by byte offset.
///
/// The watcher never re-reads a line: each poll picks up where the last
/// one stopped, and partial lines (no trailing newline yet) are left for
/// the next poll. Log rotation and truncation are not handled.
#[derive(Debug, Clone)]
pub struct LogWatcher {
    path: PathBuf,
    offset: u64,
}

impl LogWatcher {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            offset: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Skip everything already in the file, so only lines written after
    /// this call are reported.
    pub fn seek_to_end(&mut self) -> io::Result<()> {
        let mut file = File::open(&self.path)?;
        self.offset = file.seek(SeekFrom::End(0))?;
        debug!(target: "watcher", "log offset set to end ({})", self.offset);
        Ok(())
    }

    /// Read every complete new line since the last poll, advancing the
    /// offset past them. Trailing partial lines stay unread.
    pub fn poll_new_lines(&mut self) -> io::Result<Vec<String>> {
        let mut file = File::open(&self.path)?;
        file.seek(SeekFrom::Start(self.offset))?;
        let mut reader = BufReader::new(file);

        let mut lines = Vec::new();
        loop {
            let mut line = String::new();
            let read = reader.read_line(&mut line)?;
            if read == 0 {
                break;
            }
            if !line.ends_with('\n') {
                // Incomplete line still being written; try again next poll
                break;
            }
            self.offset += read as u64;
            lines.push(line.trim_end().to_string());
        }
        Ok(lines)
    }

    /// Read the last `bytes` of the file, for checking very recent output
    /// without touching the watcher offset.
    pub fn read_tail(&self, bytes: u64) -> io::Result<String> {
        let mut file = File::open(&self.path)?;
        let len = file.seek(SeekFrom::End(0))?;
        let start = len.saturating_sub(bytes);
        file.seek(SeekFrom::Start(start))?;
        let mut tail = String::new();
        file.read_to_string(&mut tail)?;
        Ok(tail)
    }
}

/// Tail the log from its current end until any of the target substrings
/// appears (case-insensitive). Returns the matched target, or None on
/// timeout.
pub async fn wait_for_any(
    path: &Path,
    targets: &[&str],
    timeout: Duration,
) -> io::Result<Option<String>> {
    info!(target: "watcher", "waiting for any of {:?} in the log", targets);
    let mut watcher = LogWatcher::new(path);
    watcher.seek_to_end()?;

    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        for line in watcher.poll_new_lines()? {
            let lower = line.to_lowercase();
            for target in targets {
                if lower.contains(&target.to_lowercase()) {
                    info!(target: "watcher", "found in log: {}", line);
                    return Ok(Some(target.to_string()));
                }
            }
        }
        sleep(SENTINEL_POLL_INTERVAL).await;
    }

    warn!(target: "watcher", "timeout: none of {:?} found", targets);
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_lines_wait_for_newline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latest.log");
        std::fs::write(&path, "complete line\npartial").unwrap();

        let mut watcher = LogWatcher::new(&path);
        let lines = watcher.poll_new_lines().unwrap();
        assert_eq!(lines, vec!["complete line".to_string()]);

        // Completing the line makes it visible on the next poll
        let mut file = std::fs::OpenOptions::new().append(true).open(&path).unwrap();
        writeln!(file, " now complete").unwrap();
        let lines = watcher.poll_new_lines().unwrap();
        assert_eq!(lines, vec!["partial now complete".to_string()]);
    }

    #[test]
    fn test_seek_to_end_skips_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latest.log");
        std::fs::write(&path, "old line 1\nold line 2\n").unwrap();

        let mut watcher = LogWatcher::new(&path);
        watcher.seek_to_end().unwrap();
        assert!(watcher.poll_new_lines().unwrap().is_empty());
    }
}

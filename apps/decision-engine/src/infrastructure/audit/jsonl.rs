//! NDJSON audit log.
//!
//! One JSON object per line, every [`RegimeTransitionEvent`] field present.
//! Each write is flushed and `sync_data`'d before `record` returns. A torn
//! final line left by a crash is terminated on the next `open` so later
//! records start on a fresh line.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::application::ports::{AuditError, AuditSink};
use crate::domain::regime::RegimeTransitionEvent;

/// Append-only JSONL writer.
#[derive(Debug)]
pub struct JsonlAuditWriter {
    path: PathBuf,
    file: Mutex<File>,
}

impl JsonlAuditWriter {
    /// Open (or create) the log, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::Io`] if the directory or file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, AuditError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .read(true)
            .open(&path)?;
        terminate_torn_tail(&mut file, &path)?;
        tracing::info!(path = %path.display(), "Regime audit log opened");
        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    /// Log location.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Append a newline when the log does not end with one.
fn terminate_torn_tail(file: &mut File, path: &Path) -> Result<(), AuditError> {
    if file.metadata()?.len() == 0 {
        return Ok(());
    }
    let mut last = [0_u8; 1];
    file.seek(SeekFrom::End(-1))?;
    file.read_exact(&mut last)?;
    if last[0] != b'\n' {
        tracing::warn!(path = %path.display(), "Terminating torn audit line left by a previous run");
        file.write_all(b"\n")?;
        file.sync_data()?;
    }
    Ok(())
}

impl AuditSink for JsonlAuditWriter {
    fn record(&self, event: &RegimeTransitionEvent) -> Result<(), AuditError> {
        let mut line = serde_json::to_vec(event)?;
        line.push(b'\n');

        let mut file = self.file.lock();
        file.write_all(&line)?;
        file.flush()?;
        file.sync_data()?;
        Ok(())
    }
}

/// Read every complete event from a log.
///
/// A trailing line without a newline is a torn write and is skipped, as is
/// any complete line that does not parse. A missing file reads as empty.
///
/// # Errors
///
/// Returns [`AuditError::Io`] on read failure.
pub fn read_audit_log(path: impl AsRef<Path>) -> Result<Vec<RegimeTransitionEvent>, AuditError> {
    let contents = match std::fs::read_to_string(path.as_ref()) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let complete = match contents.rfind('\n') {
        Some(end) => &contents[..=end],
        None => "",
    };
    if complete.len() < contents.len() {
        tracing::warn!(
            path = %path.as_ref().display(),
            bytes = contents.len() - complete.len(),
            "Skipping partial trailing audit line"
        );
    }

    let mut events = Vec::new();
    let mut skipped = 0_usize;
    for (index, line) in complete.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str(line) {
            Ok(event) => events.push(event),
            Err(e) => {
                skipped += 1;
                tracing::warn!(line = index + 1, error = %e, "Skipping malformed audit line");
            }
        }
    }
    if skipped > 0 {
        tracing::warn!(
            path = %path.as_ref().display(),
            skipped,
            read = events.len(),
            "Audit log contained malformed lines"
        );
    }
    Ok(events)
}

//! Append-only JSONL audit log

use std::collections::VecDeque;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, ErrorKind, Write};
use std::path::PathBuf;

use crate::error::{PlannerError, PlannerResult};

use super::entry::AuditEntry;

pub struct AuditLogger {
    path: PathBuf,
}

impl AuditLogger {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Append one entry as a single line
    pub fn log(&self, entry: &AuditEntry) -> PlannerResult<()> {
        let mut line = serde_json::to_vec(entry)?;
        line.push(b'\n');

        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| file.write_all(&line))
            .map_err(|e| PlannerError::Io(format!("Failed to append to audit log: {}", e)))
    }

    /// The last `count` entries, oldest first. A missing log is empty.
    pub fn read_recent(&self, count: usize) -> PlannerResult<Vec<AuditEntry>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        if count == 0 {
            return Ok(Vec::new());
        }

        let mut recent = VecDeque::with_capacity(count.min(64));
        let stream = serde_json::Deserializer::from_reader(BufReader::new(file));
        for entry in stream.into_iter::<AuditEntry>() {
            let entry =
                entry.map_err(|e| PlannerError::Json(format!("Corrupt audit log: {}", e)))?;
            if recent.len() == count {
                recent.pop_front();
            }
            recent.push_back(entry);
        }

        Ok(recent.into())
    }
}

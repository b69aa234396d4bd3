//! Per-file records emitted by the walker

use std::path::PathBuf;
use std::time::SystemTime;

/// Metadata for one file that passed every filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// User name of the file's owner (or the numeric uid if unknown)
    pub owner: String,
    pub size_bytes: u64,
    pub modified: SystemTime,
    pub path: PathBuf,
}

/// Receives matched files in traversal order.
pub trait RecordSink {
    fn record(&mut self, record: FileRecord);
}

impl RecordSink for Vec<FileRecord> {
    fn record(&mut self, record: FileRecord) {
        self.push(record);
    }
}

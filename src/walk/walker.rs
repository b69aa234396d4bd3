//! TreeWalker - a single linear pass over the directory tree

use std::os::unix::fs::MetadataExt;
use std::path::Path;
use std::time::UNIX_EPOCH;

use ignore::WalkBuilder;
use log::{debug, warn};

use crate::error::{AuditError, Result};
use crate::filter::FilePredicate;

use super::owner::OwnerResolver;
use super::record::{FileRecord, RecordSink};

/// Counters collected during one walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    /// Entries yielded by the traversal, including directories
    pub visited: usize,
    /// Regular files that passed every filter
    pub matched: usize,
    /// Entries that could not be read and were skipped
    pub skipped: usize,
}

/// Walks a directory tree and emits a [`FileRecord`] for every regular file
/// accepted by the predicate.
pub struct TreeWalker {
    predicate: FilePredicate,
}

impl TreeWalker {
    pub fn new(predicate: FilePredicate) -> Self {
        Self { predicate }
    }

    pub fn predicate(&self) -> &FilePredicate {
        &self.predicate
    }

    /// Walk `root` and feed matches to `sink`.
    ///
    /// Unreadable entries are logged and skipped; they never abort the walk.
    /// Symlinks are not followed, and hidden or gitignored files are included.
    /// Entries are visited in file-name order within each directory, so an
    /// unchanged tree always produces the same record sequence.
    pub fn walk<S: RecordSink>(&self, root: &Path, sink: &mut S) -> WalkStats {
        let mut owners = OwnerResolver::new();
        let mut stats = WalkStats::default();

        let walker = WalkBuilder::new(root)
            .standard_filters(false)
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();

        for result in walker {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    warn!("skipping unreadable entry: {}", err);
                    stats.skipped += 1;
                    continue;
                }
            };
            stats.visited += 1;

            // Directories, symlinks and special files are never reported
            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }
            if !self.predicate.matches_name(entry.file_name()) {
                continue;
            }

            let metadata = match entry.metadata() {
                Ok(metadata) => metadata,
                Err(err) => {
                    warn!("cannot read metadata for {}: {}", entry.path().display(), err);
                    stats.skipped += 1;
                    continue;
                }
            };
            if !self.predicate.matches_metadata(&metadata) {
                continue;
            }

            stats.matched += 1;
            sink.record(FileRecord {
                owner: owners.resolve(metadata.uid()),
                size_bytes: metadata.len(),
                modified: metadata.modified().unwrap_or(UNIX_EPOCH),
                path: entry.into_path(),
            });
        }

        debug!(
            "walked {}: {} entries visited, {} matched, {} skipped",
            root.display(),
            stats.visited,
            stats.matched,
            stats.skipped
        );
        stats
    }
}

/// Ensure the walk root exists and is a directory.
pub fn validate_root(path: &Path) -> Result<()> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(AuditError::InvalidDirectory(path.to_path_buf()))
    }
}

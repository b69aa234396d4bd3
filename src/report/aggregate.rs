//! Aggregation of walked files into a report structure

use std::collections::HashMap;

use crate::walk::{FileRecord, RecordSink};

/// Which report a run produces. Selected once per invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportMode {
    /// Every matched file, grouped and totaled by owner
    #[default]
    Detailed,
    /// Count, total size and largest file only
    Summary,
}

/// Files owned by one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerAggregate {
    pub owner: String,
    pub file_count: usize,
    pub total_size_bytes: u64,
    /// Files in traversal order
    pub listing: Vec<FileRecord>,
}

impl OwnerAggregate {
    fn new(owner: &str) -> Self {
        Self {
            owner: owner.to_string(),
            file_count: 0,
            total_size_bytes: 0,
            listing: Vec::new(),
        }
    }

    fn add(&mut self, record: FileRecord) {
        self.file_count += 1;
        self.total_size_bytes += record.size_bytes;
        self.listing.push(record);
    }
}

/// Detailed-mode result: owners sorted by total size, largest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailedReport {
    pub owners: Vec<OwnerAggregate>,
}

impl DetailedReport {
    pub fn file_count(&self) -> usize {
        self.owners.iter().map(|o| o.file_count).sum()
    }

    pub fn total_size_bytes(&self) -> u64 {
        self.owners.iter().map(|o| o.total_size_bytes).sum()
    }
}

/// Summary-mode result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryResult {
    pub file_count: usize,
    pub total_size_bytes: u64,
    /// First-encountered file among those with the largest size
    pub largest_file: Option<FileRecord>,
}

/// Accumulates per-owner listings and totals.
#[derive(Debug, Default)]
pub struct DetailedAggregator {
    owners: HashMap<String, OwnerAggregate>,
}

impl DetailedAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finalize and return owners sorted by total size descending, then by name.
    pub fn finalize(self) -> DetailedReport {
        let mut owners: Vec<OwnerAggregate> = self.owners.into_values().collect();
        owners.sort_by(|a, b| {
            b.total_size_bytes
                .cmp(&a.total_size_bytes)
                .then_with(|| a.owner.cmp(&b.owner))
        });
        DetailedReport { owners }
    }
}

impl RecordSink for DetailedAggregator {
    fn record(&mut self, record: FileRecord) {
        self.owners
            .entry(record.owner.clone())
            .or_insert_with(|| OwnerAggregate::new(&record.owner))
            .add(record);
    }
}

#[derive(Debug, Default)]
pub struct SummaryAggregator {
    result: SummaryResult,
}

impl SummaryAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finalize(self) -> SummaryResult {
        self.result
    }
}

impl RecordSink for SummaryAggregator {
    fn record(&mut self, record: FileRecord) {
        self.result.file_count += 1;
        self.result.total_size_bytes += record.size_bytes;

        let is_larger = self
            .result
            .largest_file
            .as_ref()
            .is_none_or(|largest| record.size_bytes > largest.size_bytes);
        if is_larger {
            self.result.largest_file = Some(record);
        }
    }
}

/// Finished report of either shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    Detailed(DetailedReport),
    Summary(SummaryResult),
}

/// Aggregator for the mode chosen at startup.
#[derive(Debug)]
pub enum ReportAggregator {
    Detailed(DetailedAggregator),
    Summary(SummaryAggregator),
}

impl ReportAggregator {
    pub fn new(mode: ReportMode) -> Self {
        match mode {
            ReportMode::Detailed => ReportAggregator::Detailed(DetailedAggregator::new()),
            ReportMode::Summary => ReportAggregator::Summary(SummaryAggregator::new()),
        }
    }

    pub fn finalize(self) -> Report {
        match self {
            ReportAggregator::Detailed(agg) => Report::Detailed(agg.finalize()),
            ReportAggregator::Summary(agg) => Report::Summary(agg.finalize()),
        }
    }
}

impl RecordSink for ReportAggregator {
    fn record(&mut self, record: FileRecord) {
        match self {
            ReportAggregator::Detailed(agg) => agg.record(record),
            ReportAggregator::Summary(agg) => agg.record(record),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::UNIX_EPOCH;

    fn record(owner: &str, size: u64, path: &str) -> FileRecord {
        FileRecord {
            owner: owner.to_string(),
            size_bytes: size,
            modified: UNIX_EPOCH,
            path: PathBuf::from(path),
        }
    }

    #[test]
    fn test_detailed_groups_by_owner() {
        let mut agg = DetailedAggregator::new();
        agg.record(record("alice", 10, "/a/1.txt"));
        agg.record(record("bob", 500, "/b/1.txt"));
        agg.record(record("alice", 30, "/a/2.txt"));

        let report = agg.finalize();
        assert_eq!(report.owners.len(), 2);

        let bob = &report.owners[0];
        assert_eq!(bob.owner, "bob");
        assert_eq!(bob.file_count, 1);
        assert_eq!(bob.total_size_bytes, 500);

        let alice = &report.owners[1];
        assert_eq!(alice.owner, "alice");
        assert_eq!(alice.file_count, 2);
        assert_eq!(alice.total_size_bytes, 40);
        let paths: Vec<_> = alice.listing.iter().map(|r| r.path.clone()).collect();
        assert_eq!(paths, vec![PathBuf::from("/a/1.txt"), PathBuf::from("/a/2.txt")]);
    }

    #[test]
    fn test_detailed_totals_match_records() {
        let records = vec![
            record("alice", 1, "/1"),
            record("bob", 2, "/2"),
            record("carol", 3, "/3"),
            record("bob", 4, "/4"),
            record("alice", 5, "/5"),
        ];
        let expected: u64 = records.iter().map(|r| r.size_bytes).sum();

        let mut agg = DetailedAggregator::new();
        for r in records {
            agg.record(r);
        }
        let report = agg.finalize();

        for owner in &report.owners {
            let listed: u64 = owner.listing.iter().map(|r| r.size_bytes).sum();
            assert_eq!(owner.total_size_bytes, listed);
            assert_eq!(owner.file_count, owner.listing.len());
        }
        assert_eq!(report.total_size_bytes(), expected);
        assert_eq!(report.file_count(), 5);
    }

    #[test]
    fn test_detailed_ties_sorted_by_name() {
        let mut agg = DetailedAggregator::new();
        agg.record(record("zed", 7, "/z"));
        agg.record(record("amy", 7, "/a"));
        let report = agg.finalize();
        let owners: Vec<_> = report.owners.iter().map(|o| o.owner.as_str()).collect();
        assert_eq!(owners, vec!["amy", "zed"]);
    }

    #[test]
    fn test_summary_tracks_largest() {
        let mut agg = SummaryAggregator::new();
        agg.record(record("alice", 10, "/small"));
        agg.record(record("bob", 90, "/first-big"));
        agg.record(record("bob", 90, "/second-big"));
        agg.record(record("alice", 5, "/tiny"));

        let summary = agg.finalize();
        assert_eq!(summary.file_count, 4);
        assert_eq!(summary.total_size_bytes, 195);
        assert_eq!(
            summary.largest_file.map(|r| r.path),
            Some(PathBuf::from("/first-big"))
        );
    }

    #[test]
    fn test_summary_empty() {
        let summary = SummaryAggregator::new().finalize();
        assert_eq!(summary.file_count, 0);
        assert_eq!(summary.total_size_bytes, 0);
        assert!(summary.largest_file.is_none());
    }

    #[test]
    fn test_summary_zero_byte_file_is_largest() {
        let mut agg = SummaryAggregator::new();
        agg.record(record("alice", 0, "/empty"));
        let summary = agg.finalize();
        assert_eq!(summary.largest_file.map(|r| r.size_bytes), Some(0));
    }

    #[test]
    fn test_report_aggregator_dispatches_by_mode() {
        let mut agg = ReportAggregator::new(ReportMode::Summary);
        agg.record(record("alice", 3, "/x"));
        match agg.finalize() {
            Report::Summary(s) => assert_eq!(s.file_count, 1),
            other => panic!("expected summary, got {:?}", other),
        }

        let mut agg = ReportAggregator::new(ReportMode::Detailed);
        agg.record(record("alice", 3, "/x"));
        match agg.finalize() {
            Report::Detailed(d) => assert_eq!(d.owners.len(), 1),
            other => panic!("expected detailed, got {:?}", other),
        }
    }
}

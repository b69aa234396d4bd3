//! fileaudit - audit a directory tree by extension, size, permissions and age

pub mod error;
pub mod filter;
pub mod report;
pub mod walk;

#[cfg(feature = "test-utils")]
pub mod test_utils;

use std::path::Path;
use std::time::SystemTime;

pub use error::{AuditError, Result};
pub use filter::{FilePredicate, FilterSpec};
pub use report::{Report, ReportAggregator, ReportMode};
pub use walk::{FileRecord, RecordSink, TreeWalker, WalkStats};

/// Run one audit: validate the root, compile the filters, walk once and
/// aggregate. Nothing is read from the tree if validation fails.
pub fn audit(root: &Path, spec: &FilterSpec, mode: ReportMode) -> Result<Report> {
    walk::validate_root(root)?;
    let predicate = FilePredicate::compile(spec, SystemTime::now())?;
    log::debug!("filters: {}", predicate);

    let mut aggregator = ReportAggregator::new(mode);
    TreeWalker::new(predicate).walk(root, &mut aggregator);
    Ok(aggregator.finalize())
}

//! Report aggregation and output
//!
//! - `DetailedAggregator` groups every matched file by owner and is written
//!   to [`REPORT_FILE_NAME`] in the working directory.
//! - `SummaryAggregator` keeps only the count, total size and largest file,
//!   and is printed to stdout.

mod aggregate;
mod format;
mod writer;

pub use aggregate::{
    DetailedAggregator, DetailedReport, OwnerAggregate, Report, ReportAggregator, ReportMode,
    SummaryAggregator, SummaryResult,
};
pub use format::{format_size, format_timestamp};
pub use writer::{
    REPORT_FILE_NAME, print_summary, render_detailed, render_summary, write_detailed,
};

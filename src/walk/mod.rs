//! Directory tree walking
//!
//! The walker visits every entry below a validated root once, keeps only
//! regular files accepted by the compiled [`FilePredicate`](crate::filter::FilePredicate),
//! and hands each match to a [`RecordSink`] as a [`FileRecord`].

mod owner;
mod record;
mod walker;

pub use owner::OwnerResolver;
pub use record::{FileRecord, RecordSink};
pub use walker::{TreeWalker, WalkStats, validate_root};

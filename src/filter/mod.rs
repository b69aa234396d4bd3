//! Filter construction
//!
//! Raw command-line filter values are collected into a [`FilterSpec`] and
//! compiled once into a [`FilePredicate`] before traversal starts. Each
//! dimension (extension, size, permissions, modified time) is independent
//! and the dimensions are combined with logical AND.

mod compile;
mod permissions;
mod spec;

pub use compile::{FilePredicate, ModifiedFilter, ModifiedOp, SizeFilter, SizeOp};
pub use permissions::{PermissionKind, PermissionMatcher};
pub use spec::FilterSpec;

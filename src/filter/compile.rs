//! Compilation of raw filter strings into a file predicate

use std::ffi::OsStr;
use std::fmt;
use std::fs::Metadata;
use std::os::unix::fs::MetadataExt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::error::{AuditError, Result};

use super::permissions::PermissionMatcher;
use super::spec::{FilterSpec, present};

const SECONDS_PER_DAY: u64 = 86_400;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeOp {
    Greater,
    Less,
    Equal,
}

/// Size constraint in plain bytes. Unit suffixes are not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeFilter {
    pub op: SizeOp,
    pub bytes: u64,
}

impl SizeFilter {
    pub fn parse(raw: &str) -> Result<Self> {
        let (op_char, count) = split_operator(raw);
        let op = match op_char {
            Some('+') => SizeOp::Greater,
            Some('-') => SizeOp::Less,
            Some('=') => SizeOp::Equal,
            Some(c) => {
                return Err(AuditError::invalid_filter(
                    "size",
                    raw,
                    format!("unknown operator '{}', expected '+', '-' or '='", c),
                ));
            }
            None => return Err(AuditError::invalid_filter("size", raw, "missing operator")),
        };
        let bytes = parse_count(count)
            .ok_or_else(|| AuditError::invalid_filter("size", raw, "expected a byte count"))?;
        Ok(Self { op, bytes })
    }

    pub fn matches(&self, size: u64) -> bool {
        match self.op {
            SizeOp::Greater => size > self.bytes,
            SizeOp::Less => size < self.bytes,
            SizeOp::Equal => size == self.bytes,
        }
    }
}

impl fmt::Display for SizeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self.op {
            SizeOp::Greater => ">",
            SizeOp::Less => "<",
            SizeOp::Equal => "==",
        };
        write!(f, "size {} {} bytes", op, self.bytes)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModifiedOp {
    /// Modified more than N days ago (`+N`)
    OlderThan,
    /// Modified within the last N days (`-N`)
    NewerThan,
}

/// Modification-time constraint, resolved against the run's start time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModifiedFilter {
    pub op: ModifiedOp,
    pub days: u64,
    pub cutoff: SystemTime,
}

impl ModifiedFilter {
    pub fn parse(raw: &str, now: SystemTime) -> Result<Self> {
        let (op_char, count) = split_operator(raw);
        let op = match op_char {
            Some('+') => ModifiedOp::OlderThan,
            Some('-') => ModifiedOp::NewerThan,
            Some(c) => {
                return Err(AuditError::invalid_filter(
                    "modified",
                    raw,
                    format!("unknown operator '{}', expected '+' or '-'", c),
                ));
            }
            None => return Err(AuditError::invalid_filter("modified", raw, "missing operator")),
        };
        let days = parse_count(count)
            .ok_or_else(|| AuditError::invalid_filter("modified", raw, "expected a day count"))?;
        let span = days
            .checked_mul(SECONDS_PER_DAY)
            .map(Duration::from_secs)
            .ok_or_else(|| AuditError::invalid_filter("modified", raw, "day count too large"))?;
        let cutoff = now.checked_sub(span).unwrap_or(UNIX_EPOCH);

        Ok(Self { op, days, cutoff })
    }

    pub fn matches(&self, mtime: SystemTime) -> bool {
        match self.op {
            ModifiedOp::OlderThan => mtime < self.cutoff,
            ModifiedOp::NewerThan => mtime > self.cutoff,
        }
    }
}

impl fmt::Display for ModifiedFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self.op {
            ModifiedOp::OlderThan => "before",
            ModifiedOp::NewerThan => "after",
        };
        write!(
            f,
            "modified {} {} ({} days)",
            op,
            humantime::format_rfc3339_seconds(self.cutoff),
            self.days
        )
    }
}

/// All predicate dimensions for one run, combined with logical AND.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePredicate {
    /// Required file name suffix, including the leading dot.
    pub suffix: String,
    pub size: Option<SizeFilter>,
    pub permissions: Option<PermissionMatcher>,
    pub modified: Option<ModifiedFilter>,
}

impl FilePredicate {
    /// Validate and compile every dimension of `spec`. Fails on the first
    /// malformed filter, before any filesystem access.
    pub fn compile(spec: &FilterSpec, now: SystemTime) -> Result<Self> {
        let extension = present(&spec.extension).unwrap_or_default();
        if extension.is_empty() {
            log::warn!("no extension given; only file names ending in '.' can match");
        }
        let suffix = format!(".{}", extension.strip_prefix('.').unwrap_or(extension));

        let size = present(&spec.size).map(SizeFilter::parse).transpose()?;
        let permissions = present(&spec.permissions)
            .map(PermissionMatcher::parse)
            .transpose()?;
        let modified = present(&spec.modified)
            .map(|raw| ModifiedFilter::parse(raw, now))
            .transpose()?;

        Ok(Self {
            suffix,
            size,
            permissions,
            modified,
        })
    }

    /// Exact, case-sensitive suffix match on the file name.
    pub fn matches_name(&self, name: &OsStr) -> bool {
        name.as_encoded_bytes().ends_with(self.suffix.as_bytes())
    }

    /// Size, permission and modification-time dimensions.
    pub fn matches_metadata(&self, metadata: &Metadata) -> bool {
        if let Some(size) = &self.size {
            if !size.matches(metadata.len()) {
                return false;
            }
        }

        if let Some(permissions) = &self.permissions {
            if !permissions.matches(metadata.mode()) {
                return false;
            }
        }

        if let Some(modified) = &self.modified {
            // If we can't get mtime, include the file
            if let Ok(mtime) = metadata.modified() {
                if !modified.matches(mtime) {
                    return false;
                }
            }
        }

        true
    }

    pub fn matches(&self, name: &OsStr, metadata: &Metadata) -> bool {
        self.matches_name(name) && self.matches_metadata(metadata)
    }
}

impl fmt::Display for FilePredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "name ends with '{}'", self.suffix)?;
        if let Some(size) = &self.size {
            write!(f, ", {}", size)?;
        }
        if let Some(permissions) = &self.permissions {
            write!(f, ", {}", permissions)?;
        }
        if let Some(modified) = &self.modified {
            write!(f, ", {}", modified)?;
        }
        Ok(())
    }
}

fn split_operator(raw: &str) -> (Option<char>, &str) {
    let mut chars = raw.chars();
    let op = chars.next();
    (op, chars.as_str())
}

/// Parse a plain decimal count. Signs, spaces and unit suffixes are rejected.
fn parse_count(count: &str) -> Option<u64> {
    if count.is_empty() || !count.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    count.parse().ok()
}

//! Permission mode matching in the style of `find -perm`

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{AuditError, Result};

/// Bits compared against a file's mode: permissions plus setuid/setgid/sticky.
const MODE_MASK: u32 = 0o7777;

/// One symbolic clause: who-list followed by one or more actions.
static SYMBOLIC_CLAUSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([ugoa]*)((?:[-+=][rwxXst]*)+)$").expect("SYMBOLIC_CLAUSE regex is invalid")
});

static SYMBOLIC_ACTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([-+=])([rwxXst]*)").expect("SYMBOLIC_ACTION regex is invalid")
});

/// How the parsed mode is compared against a file's mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionKind {
    /// Mode bits must equal the value exactly (`644`)
    Exact,
    /// Every given bit must be set (`-644`)
    AllOf,
    /// At least one given bit must be set (`/644`)
    AnyOf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermissionMatcher {
    pub mode: u32,
    pub kind: PermissionKind,
}

impl PermissionMatcher {
    /// Parse an octal (`0644`) or symbolic (`u=rw,go=r`) mode, optionally
    /// prefixed with `-` (all bits) or `/` (any bit).
    pub fn parse(raw: &str) -> Result<Self> {
        let (kind, body) = if let Some(rest) = raw.strip_prefix('-') {
            (PermissionKind::AllOf, rest)
        } else if let Some(rest) = raw.strip_prefix('/') {
            (PermissionKind::AnyOf, rest)
        } else {
            (PermissionKind::Exact, raw)
        };

        if body.is_empty() {
            return Err(AuditError::invalid_filter("permissions", raw, "missing mode"));
        }

        let mode = if body.bytes().all(|b| b.is_ascii_digit()) {
            parse_octal(raw, body)?
        } else {
            parse_symbolic(raw, body)?
        };

        Ok(Self { mode, kind })
    }

    /// Check a file's `st_mode` against this matcher.
    pub fn matches(&self, file_mode: u32) -> bool {
        let file_mode = file_mode & MODE_MASK;
        match self.kind {
            PermissionKind::Exact => file_mode == self.mode,
            PermissionKind::AllOf => file_mode & self.mode == self.mode,
            // find treats `/000` as matching everything
            PermissionKind::AnyOf => self.mode == 0 || file_mode & self.mode != 0,
        }
    }
}

impl fmt::Display for PermissionMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.kind {
            PermissionKind::Exact => "",
            PermissionKind::AllOf => "-",
            PermissionKind::AnyOf => "/",
        };
        write!(f, "mode {}{:04o}", prefix, self.mode)
    }
}

fn parse_octal(raw: &str, body: &str) -> Result<u32> {
    let mode = u32::from_str_radix(body, 8)
        .map_err(|_| AuditError::invalid_filter("permissions", raw, "not an octal mode"))?;
    if mode > MODE_MASK {
        return Err(AuditError::invalid_filter(
            "permissions",
            raw,
            "octal mode out of range",
        ));
    }
    Ok(mode)
}

/// Build a mode from symbolic clauses, starting from zero.
fn parse_symbolic(raw: &str, body: &str) -> Result<u32> {
    let mut mode = 0u32;

    for clause in body.split(',') {
        let caps = SYMBOLIC_CLAUSE.captures(clause).ok_or_else(|| {
            AuditError::invalid_filter(
                "permissions",
                raw,
                format!("invalid symbolic clause '{}'", clause),
            )
        })?;
        let who = who_mask(&caps[1]);

        for action in SYMBOLIC_ACTION.captures_iter(&caps[2]) {
            let bits = permission_bits(&action[2]) & who;
            match &action[1] {
                "+" => mode |= bits,
                "-" => mode &= !bits,
                _ => mode = (mode & !who) | bits,
            }
        }
    }

    Ok(mode)
}

fn who_mask(who: &str) -> u32 {
    if who.is_empty() {
        return MODE_MASK;
    }
    who.chars().fold(0, |mask, c| {
        mask | match c {
            'u' => 0o4700,
            'g' => 0o2070,
            'o' => 0o1007,
            _ => MODE_MASK,
        }
    })
}

fn permission_bits(perms: &str) -> u32 {
    perms.chars().fold(0, |bits, c| {
        bits | match c {
            'r' => 0o444,
            'w' => 0o222,
            'x' | 'X' => 0o111,
            's' => 0o6000,
            't' => 0o1000,
            _ => 0,
        }
    })
}

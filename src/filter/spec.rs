//! Raw filter values as supplied on the command line

/// Uncompiled filter expressions for one run.
///
/// Each field is one predicate dimension. `None` or an empty string leaves
/// that dimension unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    /// File name extension, matched after a literal dot.
    pub extension: Option<String>,
    /// `{+,-,=}<bytes>`
    pub size: Option<String>,
    /// Octal or symbolic mode, optionally prefixed with `-` or `/`.
    pub permissions: Option<String>,
    /// `{+,-}<days>`
    pub modified: Option<String>,
}

impl FilterSpec {
    /// Create a spec that only constrains the extension.
    pub fn with_extension(extension: impl Into<String>) -> Self {
        Self {
            extension: Some(extension.into()),
            ..Default::default()
        }
    }

    pub fn size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    pub fn permissions(mut self, permissions: impl Into<String>) -> Self {
        self.permissions = Some(permissions.into());
        self
    }

    pub fn modified(mut self, modified: impl Into<String>) -> Self {
        self.modified = Some(modified.into());
        self
    }
}

/// Treat a missing or blank value as "no constraint".
pub(crate) fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

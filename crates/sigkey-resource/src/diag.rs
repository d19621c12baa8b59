// ABOUTME: Host-facing diagnostics produced from resource errors.
// ABOUTME: A Diagnostics list with any error entry means the operation failed.

use std::fmt;

use crate::error::ResourceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "Error"),
            Severity::Warning => write!(f, "Warning"),
        }
    }
}

/// One user-visible message about an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub summary: String,
    pub detail: Option<String>,
}

impl Diagnostic {
    pub fn error(summary: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            summary: summary.into(),
            detail: None,
        }
    }

    pub fn warning(summary: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            summary: summary.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.summary)?;
        if let Some(ref detail) = self.detail {
            write!(f, "\n  {}", detail)?;
        }
        Ok(())
    }
}

impl From<&ResourceError> for Diagnostic {
    fn from(err: &ResourceError) -> Self {
        let diag = Diagnostic::error(err.to_string());
        match err {
            ResourceError::InvalidIdentifier { id, .. } => diag.with_detail(format!(
                "the resource ID '{id}' must be the numeric ID GitHub assigned to the key"
            )),
            _ => diag,
        }
    }
}

impl From<ResourceError> for Diagnostic {
    fn from(err: ResourceError) -> Self {
        Diagnostic::from(&err)
    }
}

/// Ordered collection of diagnostics for one operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diag: Diagnostic) {
        self.0.push(diag);
    }

    pub fn has_errors(&self) -> bool {
        self.0.iter().any(|d| d.severity == Severity::Error)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter()
    }

    /// Empty on success, a single error diagnostic on failure.
    pub fn from_result<T>(result: &crate::error::Result<T>) -> Self {
        match result {
            Ok(_) => Self::new(),
            Err(e) => Self(vec![Diagnostic::from(e)]),
        }
    }
}

impl From<ResourceError> for Diagnostics {
    fn from(err: ResourceError) -> Self {
        Self(vec![Diagnostic::from(err)])
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

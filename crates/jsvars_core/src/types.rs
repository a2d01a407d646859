use std::fmt;

/// One URL to fetch and scan. No validation is performed on it.
pub type Target = String;

/// A `(name, value)` pair taken from a `var`/`let`/`const` declaration.
///
/// The value is the verbatim source text between `=` and the next `;`,
/// trimmed of surrounding whitespace. It is never evaluated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableBinding {
    pub name: String,
    pub value: String,
}

impl VariableBinding {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Raw bytes retrieved for a target, with the `Content-Type` header if the
/// server sent one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Content {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

/// Every binding found in one target's content, in match order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRecord {
    pub target: Target,
    pub bindings: Vec<VariableBinding>,
}

impl ReportRecord {
    pub fn has_matches(&self) -> bool {
        !self.bindings.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Connection, DNS, TLS or URL-level failure before any status arrived.
    Transport,
    /// The server answered with a status outside 2xx.
    NonSuccessStatus(u16),
    /// Success status, but the body could not be read to the end.
    BodyRead,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Transport => write!(f, "transport failure"),
            FailureKind::NonSuccessStatus(code) => write!(f, "http status {code}"),
            FailureKind::BodyRead => write!(f, "body read failure"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureRecord {
    pub target: Target,
    pub kind: FailureKind,
    pub detail: String,
}

/// The single outcome produced for each processed target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanRecord {
    Report(ReportRecord),
    Failure(FailureRecord),
}

impl ScanRecord {
    pub fn target(&self) -> &str {
        match self {
            ScanRecord::Report(report) => &report.target,
            ScanRecord::Failure(failure) => &failure.target,
        }
    }
}

//! Non-fatal warning reporting for the numbering pass.
//!
//! Every error condition in this crate is local and recoverable: a broken
//! reference or a malformed depth value must never abort processing of the
//! whole document. The pass records what it glossed over here and the host
//! decides what to surface.

use serde::Serialize;
use std::fmt;

use crate::passes::toc::TocEntry;

/// Warning categories (determines host-side handling).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WarningKind {
    /// A reference link whose target identifier does not exist; the link
    /// content was replaced with a visible `??` placeholder.
    BrokenReference,
    /// A depth value in the metadata that did not parse as an integer; the
    /// default limit was used instead.
    MalformedConfig,
}

/// A single recoverable condition encountered during the pass.
#[derive(Debug, Clone, Serialize)]
pub struct PassWarning {
    pub kind: WarningKind,
    /// Human-readable message
    pub message: String,
    /// Location context (e.g. the offending link target)
    pub context: Option<String>,
}

impl PassWarning {
    pub fn new(kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            context: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

impl fmt::Display for PassWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.context {
            Some(ref ctx) => write!(f, "[{:?}] {}: {}", self.kind, ctx, self.message),
            None => write!(f, "[{:?}] {}", self.kind, self.message),
        }
    }
}

/// Outcome of a full numbering pass: the TOC outline plus any warnings.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PassReport {
    /// Nested table-of-contents outline, top-level entries first.
    pub toc: Vec<TocEntry>,
    pub warnings: Vec<PassWarning>,
}

impl PassReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warn(&mut self, warning: PassWarning) {
        self.warnings.push(warning);
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// JSON export for hosts that persist the outline or the diagnostics.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

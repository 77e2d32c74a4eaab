//! Utility modules
//!
//! Diagnostics and non-fatal warning reporting for the numbering pass.

pub mod report;

// Re-export commonly used items
pub use report::{PassReport, PassWarning, WarningKind};

//! docnum - numbering, TOC, and cross-reference pass for converted
//! document trees.
//!
//! Given a fully materialized [`tree::DocumentTree`], a single call to
//! [`number_document`] assigns hierarchical numbers to parts, chapters, and
//! headings, labels theorem-like environments relative to their enclosing
//! section, builds a nested table of contents, and resolves internal
//! cross-reference links to the labels it computed. The tree is mutated in
//! place; the returned [`PassReport`] carries the TOC outline and any
//! recoverable conditions encountered on the way.
//!
//! The pass runs exactly once per tree. Re-running it on an already
//! numbered tree is undefined.

pub mod config;
pub mod counter;
pub mod data;
pub mod passes;
pub mod roman;
pub mod tree;
pub mod utils;

pub use config::NumberingConfig;
pub use counter::CounterEngine;
pub use passes::{EnvironmentLabeler, ReferenceResolver, TocBuilder, TocEntry};
pub use tree::{DocumentTree, Inline, NodeId, NodeKind};
pub use utils::report::{PassReport, PassWarning, WarningKind};

/// Run the full pass with configuration discovered from the tree's
/// metadata nodes.
pub fn number_document(tree: &mut DocumentTree) -> PassReport {
    let mut report = PassReport::new();
    let config = NumberingConfig::from_tree(tree, &mut report);
    number_document_with(tree, &config, report)
}

/// Run the full pass with an explicit configuration.
///
/// Phase order is load-bearing: the environment labeler reads the stable
/// indices the TOC builder writes, and the reference resolver reads both
/// sets of labels.
pub fn number_document_with(
    tree: &mut DocumentTree,
    config: &NumberingConfig,
    mut report: PassReport,
) -> PassReport {
    report.toc = TocBuilder::new(config).run(tree);
    EnvironmentLabeler::new(config).run(tree);
    ReferenceResolver::run(tree, &mut report);
    report
}

//! Numbering options discovered from the document's metadata.

use crate::tree::{DocumentTree, NodeKind};
use crate::utils::report::{PassReport, PassWarning, WarningKind};

pub const DEFAULT_NUMBER_DEPTH: i32 = 6;
pub const DEFAULT_TOC_DEPTH: i32 = 7;

/// Options for the numbering pass.
///
/// The two depth limits are independent: a heading can be numbered yet
/// excluded from the TOC, or listed unnumbered.
#[derive(Debug, Clone)]
pub struct NumberingConfig {
    /// How deep hierarchical numbering goes (Section = depth 0).
    pub number_depth: i32,
    /// How deep TOC inclusion goes (same axis).
    pub toc_depth: i32,
    /// Scope environment counters to their enclosing section. When false,
    /// theorem-like environments are numbered flat across the document.
    pub scope_environments: bool,
    /// Layout tag of the sectioning nodes that bound an environment scope.
    pub scope_tag: String,
}

impl Default for NumberingConfig {
    fn default() -> Self {
        Self {
            number_depth: DEFAULT_NUMBER_DEPTH,
            toc_depth: DEFAULT_TOC_DEPTH,
            scope_environments: true,
            scope_tag: "Section".to_string(),
        }
    }
}

impl NumberingConfig {
    /// Read the depth limits from the document's metadata nodes.
    ///
    /// A `Meta` node tagged `secnumdepth` (resp. `tocdepth`) carries the
    /// limit as a numeric tag. A missing node means the default; a node
    /// whose tags hold no parseable integer also means the default, but is
    /// worth a warning.
    pub fn from_tree(tree: &DocumentTree, report: &mut PassReport) -> Self {
        Self {
            number_depth: read_depth(tree, "secnumdepth", DEFAULT_NUMBER_DEPTH, report),
            toc_depth: read_depth(tree, "tocdepth", DEFAULT_TOC_DEPTH, report),
            ..Self::default()
        }
    }

    /// Is a sectioning node at flat `rank` (Part = 0 … Subparagraph = 6)
    /// within the numbering limit? The limit counts Section as depth 0, so
    /// Part and Chapter sit below any non-pathological limit.
    pub fn numbers(&self, rank: u8) -> bool {
        (rank as i32) - 2 < self.number_depth
    }

    /// Same check against the TOC-inclusion limit.
    pub fn includes_in_toc(&self, rank: u8) -> bool {
        (rank as i32) - 2 < self.toc_depth
    }
}

fn read_depth(tree: &DocumentTree, tag: &str, default: i32, report: &mut PassReport) -> i32 {
    let metas = tree.select(|kind, tags| {
        matches!(kind, NodeKind::Meta) && tags.iter().any(|t| t == tag)
    });
    let Some(&meta) = metas.first() else {
        return default;
    };
    let parsed = tree
        .tags(meta)
        .iter()
        .find_map(|t| t.parse::<i32>().ok());
    match parsed {
        Some(depth) => depth,
        None => {
            report.warn(
                PassWarning::new(
                    WarningKind::MalformedConfig,
                    format!("no numeric value on {} node, using {}", tag, default),
                )
                .with_context(tag),
            );
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::DocumentTree;

    #[test]
    fn defaults_when_no_meta() {
        let tree = DocumentTree::new();
        let mut report = PassReport::new();
        let config = NumberingConfig::from_tree(&tree, &mut report);
        assert_eq!(config.number_depth, 6);
        assert_eq!(config.toc_depth, 7);
        assert!(!report.has_warnings());
    }

    #[test]
    fn reads_numeric_tags() {
        let mut tree = DocumentTree::new();
        let root = tree.root();
        tree.append_tagged(root, NodeKind::Meta, &["secnumdepth", "2"]);
        tree.append_tagged(root, NodeKind::Meta, &["tocdepth", "3"]);
        let mut report = PassReport::new();
        let config = NumberingConfig::from_tree(&tree, &mut report);
        assert_eq!(config.number_depth, 2);
        assert_eq!(config.toc_depth, 3);
    }

    #[test]
    fn malformed_depth_falls_back_with_warning() {
        let mut tree = DocumentTree::new();
        let root = tree.root();
        tree.append_tagged(root, NodeKind::Meta, &["secnumdepth", "deep"]);
        let mut report = PassReport::new();
        let config = NumberingConfig::from_tree(&tree, &mut report);
        assert_eq!(config.number_depth, DEFAULT_NUMBER_DEPTH);
        assert!(report.has_warnings());
    }

    #[test]
    fn limit_axis_counts_section_as_zero() {
        let config = NumberingConfig {
            number_depth: 1,
            ..Default::default()
        };
        assert!(config.numbers(0), "Part");
        assert!(config.numbers(1), "Chapter");
        assert!(config.numbers(2), "Section");
        assert!(!config.numbers(3), "Subsection past limit 1");
    }
}

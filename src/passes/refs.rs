//! Cross-reference resolution.
//!
//! Runs last: it reads the identifiers and stable indices the earlier passes
//! wrote. Only links tagged `ref` are cross-references; the untagged links
//! the TOC builder materializes are left alone.

use fxhash::FxHashMap;
use lazy_static::lazy_static;
use regex::Regex;

use crate::tree::{DocumentTree, Inline, NodeId, NodeKind};
use crate::utils::report::{PassReport, PassWarning, WarningKind};

lazy_static! {
    /// Everything that is not part of a numeral path.
    static ref NON_NUMERAL: Regex = Regex::new(r"[^0-9.]").expect("static pattern");
}

/// Placeholder substituted for links whose target does not exist.
const BROKEN_REF_PLACEHOLDER: &str = "??";

pub struct ReferenceResolver;

impl ReferenceResolver {
    pub fn run(tree: &mut DocumentTree, report: &mut PassReport) {
        // Identifiers are globally unique by construction, so a flat map
        // over the whole tree is enough.
        let mut by_id: FxHashMap<String, NodeId> = FxHashMap::default();
        for node in tree.descendants(tree.root()) {
            if let Some(ident) = tree.identifier(node) {
                by_id.entry(ident.to_string()).or_insert(node);
            }
        }

        let links = tree.select(|kind, tags| {
            matches!(kind, NodeKind::RefLink { .. }) && tags.iter().any(|t| t == "ref")
        });
        for link in links {
            let NodeKind::RefLink { target } = tree.kind(link) else {
                continue;
            };
            // Fragment portion of the link target.
            let ident = target.rsplit('#').next().unwrap_or_default().to_string();

            let Some(&node) = by_id.get(ident.as_str()) else {
                report.warn(
                    PassWarning::new(
                        WarningKind::BrokenReference,
                        format!("no node with identifier {}", ident),
                    )
                    .with_context(target.clone()),
                );
                tree.set_content(link, vec![Inline::text(BROKEN_REF_PLACEHOLDER)]);
                continue;
            };

            let caption = tree.find_descendant(node, |kind| matches!(kind, NodeKind::Caption));
            let pieces = match caption {
                // Custom caption wins over the computed numeral.
                Some(caption) => tree.content(caption).to_vec(),
                None => {
                    let label = NON_NUMERAL.replace_all(&ident, "").into_owned();
                    vec![Inline::Text(label)]
                }
            };
            tree.set_content(link, pieces);
        }
    }
}

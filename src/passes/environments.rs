//! Theorem, case, and proof labeling.
//!
//! Theorem-like environments are numbered relative to their nearest
//! enclosing sectioning node; the counter restarts whenever the enclosing
//! node changes. Must run after section numbering, since the scope prefix is
//! the enclosing node's stable index.

use crate::config::NumberingConfig;
use crate::data::constants::EmphasisStyle;
use crate::tree::{DocumentTree, Inline, NodeId, NodeKind};

pub struct EnvironmentLabeler<'a> {
    config: &'a NumberingConfig,
    /// Enclosing sectioning node of the previous environment visited.
    last_scope: Option<NodeId>,
    /// Stable index of `last_scope`, ready to prepend.
    prefix: Option<String>,
    /// Section-relative counter, used while `prefix` is set.
    counter: u32,
    /// Document-wide counter for environments without a numbered scope.
    /// Never resets: a per-scope count would restart at 1 in every
    /// unnumbered section and hand out colliding identifiers.
    flat: u32,
}

impl<'a> EnvironmentLabeler<'a> {
    pub fn new(config: &'a NumberingConfig) -> Self {
        Self {
            config,
            last_scope: None,
            prefix: None,
            counter: 0,
            flat: 0,
        }
    }

    pub fn run(mut self, tree: &mut DocumentTree) {
        self.label_theorems(tree);
        label_cases(tree);
        wrap_proofs(tree);
    }

    fn label_theorems(&mut self, tree: &mut DocumentTree) {
        let environments = tree.select(|kind, _| matches!(kind, NodeKind::Environment(_)));
        for node in environments {
            let NodeKind::Environment(variant) = tree.kind(node) else {
                continue;
            };
            let variant = *variant;

            if self.config.scope_environments {
                let scope = self.enclosing_scope(tree, node);
                if scope != self.last_scope {
                    self.last_scope = scope;
                    self.prefix = scope
                        .and_then(|s| tree.index(s))
                        .map(str::to_string);
                    self.counter = 0;
                }
            }
            let label = match self.prefix {
                Some(ref prefix) => {
                    self.counter += 1;
                    format!("{}.{}", prefix, self.counter)
                }
                None => {
                    self.flat += 1;
                    self.flat.to_string()
                }
            };

            tree.set_identifier(node, format!("{}_{}", variant.name(), label));

            // Caption presence is checked before any mutation; a custom
            // caption suppresses the trailing period and later feeds the
            // reference resolver.
            let has_caption = tree
                .find_descendant(node, |kind| matches!(kind, NodeKind::Caption))
                .is_some();

            let heading = format!("{} {}", variant.name(), label);
            let mut pieces = vec![emphasize(heading, variant.style())];
            pieces.push(Inline::text(if has_caption { " " } else { ". " }));
            tree.prepend_content(node, pieces);
        }
    }

    /// Nearest ancestor carrying the configured sectioning tag, or `None`
    /// when the environment sits directly under the root (flat numbering,
    /// not an error).
    fn enclosing_scope(&self, tree: &DocumentTree, node: NodeId) -> Option<NodeId> {
        tree.ancestors(node)
            .find(|&a| tree.has_tag(a, &self.config.scope_tag))
    }
}

fn emphasize(text: String, style: EmphasisStyle) -> Inline {
    match style {
        EmphasisStyle::Bold => Inline::Strong(vec![Inline::Text(text)]),
        EmphasisStyle::Italic => Inline::Emph(vec![Inline::Text(text)]),
        EmphasisStyle::Plain => Inline::Text(text),
    }
}

/// Number runs of consecutive Case siblings, restarting at every break in
/// the run. A Case with no preceding sibling starts a fresh run.
fn label_cases(tree: &mut DocumentTree) {
    let cases = tree.select(|kind, _| matches!(kind, NodeKind::Case));
    let mut counter = 0u32;
    for node in cases {
        let continues_run = tree
            .prev_sibling(node)
            .is_some_and(|prev| matches!(tree.kind(prev), NodeKind::Case));
        if !continues_run {
            counter = 0;
        }
        counter += 1;
        tree.prepend_content(
            node,
            vec![
                Inline::Emph(vec![Inline::text(format!("Case {}", counter))]),
                Inline::text(". "),
            ],
        );
    }
}

/// Proofs are unnumbered: italic "Proof." lead-in, end-of-proof mark last.
fn wrap_proofs(tree: &mut DocumentTree) {
    let proofs = tree.select(|kind, _| matches!(kind, NodeKind::Proof));
    for node in proofs {
        tree.prepend_content(
            node,
            vec![
                Inline::Emph(vec![Inline::text("Proof")]),
                Inline::text(". "),
            ],
        );
        tree.push_content(node, Inline::QedMark);
    }
}

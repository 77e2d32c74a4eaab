//! Section numbering and table-of-contents construction.
//!
//! Sectioning nodes are walked flat in document order, not by tree nesting:
//! the converted tree interleaves headings with ordinary content at the same
//! structural level, so depth comes from the node's kind. The TOC nesting is
//! reconstructed with an explicit stack of open lists.

use serde::Serialize;

use crate::config::NumberingConfig;
use crate::counter::CounterEngine;
use crate::roman::to_roman;
use crate::tree::{DocumentTree, Inline, NodeId, NodeKind};

/// One entry of the nested TOC outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    /// Identifier of the node this entry links to.
    pub target: String,
    /// Display label: numeral plus heading text, or raw text when the
    /// heading is unnumbered.
    pub label: String,
    pub children: Vec<TocEntry>,
}

/// Flat rank of a sectioning kind: Part=0, Chapter=1, Section=2 …
/// Subparagraph=6. `None` for non-sectioning kinds.
pub fn section_rank(kind: &NodeKind) -> Option<u8> {
    match kind {
        NodeKind::Part => Some(0),
        NodeKind::Chapter => Some(1),
        NodeKind::Heading(level @ 2..=6) => Some(*level),
        _ => None,
    }
}

fn rank_name(rank: u8) -> &'static str {
    match rank {
        0 => "Part",
        1 => "Chapter",
        2 => "Section",
        3 => "Subsection",
        4 => "Subsubsection",
        5 => "Paragraph",
        _ => "Subparagraph",
    }
}

/// Numbers sectioning nodes and builds the TOC outline.
pub struct TocBuilder<'a> {
    config: &'a NumberingConfig,
    /// Part/Chapter counters, independent from the heading counters.
    divisions: CounterEngine,
    /// Section through Subparagraph.
    headings: CounterEngine,
    stack: Vec<Frame>,
    /// Sequence for link targets of headings past the numbering limit.
    unnumbered: u32,
}

struct Frame {
    rank: u8,
    entries: Vec<TocEntry>,
}

impl<'a> TocBuilder<'a> {
    pub fn new(config: &'a NumberingConfig) -> Self {
        Self {
            config,
            divisions: CounterEngine::new(2),
            headings: CounterEngine::new(5),
            stack: Vec::new(),
            unnumbered: 0,
        }
    }

    /// Number every sectioning node, collect the outline, and materialize it
    /// into any `TocContainer` in the tree.
    pub fn run(mut self, tree: &mut DocumentTree) -> Vec<TocEntry> {
        let sections = tree.select(|kind, _| section_rank(kind).is_some());
        for node in sections {
            let Some(rank) = section_rank(tree.kind(node)) else {
                continue;
            };
            if self.config.numbers(rank) {
                self.number_node(tree, node, rank);
            }
            if self.config.includes_in_toc(rank) {
                if tree.identifier(node).is_none() {
                    // Past the numbering limit but still listed, so it needs
                    // a link target.
                    self.unnumbered += 1;
                    tree.set_identifier(node, format!("{}_u{}", rank_name(rank), self.unnumbered));
                }
                let target = tree
                    .identifier(node)
                    .unwrap_or_default()
                    .to_string();
                let label = tree.plain_text(node).trim().to_string();
                self.push_entry(
                    rank,
                    TocEntry {
                        target,
                        label,
                        children: Vec::new(),
                    },
                );
            }
        }
        let outline = self.finish();

        let containers = tree.select(|kind, _| matches!(kind, NodeKind::TocContainer));
        for container in containers {
            materialize(tree, container, &outline);
        }
        outline
    }

    fn number_node(&mut self, tree: &mut DocumentTree, node: NodeId, rank: u8) {
        let (index, display) = match rank {
            0 => {
                let n = self.divisions.increment(0);
                (
                    n.to_string(),
                    vec![
                        Inline::text(format!("Part {}", to_roman(n))),
                        Inline::LineBreak,
                    ],
                )
            }
            1 => {
                let n = self.divisions.increment(1);
                (n.to_string(), vec![Inline::text(format!("Chapter {} ", n))])
            }
            _ => {
                let depth = (rank - 2) as usize;
                self.headings.increment(depth);
                let path = self.headings.snapshot(depth);
                let display = vec![Inline::text(format!("{} ", path))];
                (path, display)
            }
        };
        tree.prepend_content(node, display);
        tree.set_index(node, index.clone());
        tree.set_identifier(node, format!("{}_{}", rank_name(rank), index));
    }

    /// Attach `entry` at `rank`, maintaining the nesting stack.
    ///
    /// Going deeper pushes exactly one level no matter how large the rank
    /// jump is; going shallower pops back frame by frame; equal ranks are
    /// siblings in the open list.
    fn push_entry(&mut self, rank: u8, entry: TocEntry) {
        match self.stack.last() {
            None => self.stack.push(Frame {
                rank,
                entries: vec![entry],
            }),
            Some(top) if rank > top.rank => self.stack.push(Frame {
                rank,
                entries: vec![entry],
            }),
            Some(_) => {
                while self.stack.len() > 1 && self.stack.last().is_some_and(|f| f.rank > rank) {
                    self.pop_frame();
                }
                if let Some(top) = self.stack.last_mut() {
                    // A shallower rank than the bottom frame degrades to
                    // siblings.
                    if top.rank > rank {
                        top.rank = rank;
                    }
                    top.entries.push(entry);
                }
            }
        }
    }

    fn pop_frame(&mut self) {
        let Some(frame) = self.stack.pop() else { return };
        let Some(parent) = self.stack.last_mut() else { return };
        match parent.entries.last_mut() {
            Some(last) => last.children.extend(frame.entries),
            // No entry to nest under; promote to siblings.
            None => parent.entries.extend(frame.entries),
        }
    }

    fn finish(&mut self) -> Vec<TocEntry> {
        while self.stack.len() > 1 {
            self.pop_frame();
        }
        self.stack.pop().map(|f| f.entries).unwrap_or_default()
    }
}

/// Build the nested list subtree inside a TOC container, prefixed with the
/// fixed heading caption.
fn materialize(tree: &mut DocumentTree, container: NodeId, outline: &[TocEntry]) {
    tree.append_text(container, NodeKind::Heading(2), "Table of Contents");
    if !outline.is_empty() {
        materialize_list(tree, container, outline);
    }
}

fn materialize_list(tree: &mut DocumentTree, parent: NodeId, entries: &[TocEntry]) {
    let list = tree.append(parent, NodeKind::List);
    for entry in entries {
        let item = tree.append(list, NodeKind::ListItem);
        let link = tree.append(
            item,
            NodeKind::RefLink {
                target: format!("#{}", entry.target),
            },
        );
        tree.set_content(link, vec![Inline::text(entry.label.clone())]);
        if !entry.children.is_empty() {
            materialize_list(tree, item, &entry.children);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::report::PassReport;
    use pretty_assertions::assert_eq;

    fn section(tree: &mut DocumentTree, title: &str) -> NodeId {
        let root = tree.root();
        let node = tree.append_tagged(root, NodeKind::Heading(2), &["layout", "Section"]);
        tree.set_content(node, vec![Inline::text(title)]);
        node
    }

    fn subsection(tree: &mut DocumentTree, parent: NodeId, title: &str) -> NodeId {
        let node = tree.append_tagged(parent, NodeKind::Heading(3), &["layout", "Subsection"]);
        tree.set_content(node, vec![Inline::text(title)]);
        node
    }

    #[test]
    fn sections_and_subsections_get_dot_paths() {
        let mut tree = DocumentTree::new();
        let _s1 = section(&mut tree, "One");
        let s2 = section(&mut tree, "Two");
        subsection(&mut tree, s2, "Two A");
        subsection(&mut tree, s2, "Two B");
        section(&mut tree, "Three");

        let config = NumberingConfig::default();
        let outline = TocBuilder::new(&config).run(&mut tree);

        let indices: Vec<_> = tree
            .select(|kind, _| matches!(kind, NodeKind::Heading(_)))
            .into_iter()
            .map(|id| tree.index(id).unwrap_or("").to_string())
            .collect();
        assert_eq!(indices, vec!["1", "2", "2.1", "2.2", "3"]);

        assert_eq!(outline.len(), 3);
        assert_eq!(outline[1].children.len(), 2);
        assert_eq!(outline[1].children[0].label, "2.1 Two A");
        assert_eq!(outline[2].target, "Section_3");
    }

    #[test]
    fn numbering_limit_excludes_but_toc_still_lists() {
        let mut tree = DocumentTree::new();
        let s = section(&mut tree, "Top");
        let sub = subsection(&mut tree, s, "Deep");

        let config = NumberingConfig {
            number_depth: 1,
            toc_depth: 6,
            ..Default::default()
        };
        let outline = TocBuilder::new(&config).run(&mut tree);

        assert_eq!(tree.index(sub), None);
        assert_eq!(tree.plain_text(sub), "Deep", "no numeral prepended");
        assert_eq!(outline[0].children[0].label, "Deep");
        assert_eq!(outline[0].children[0].target, "Subsection_u1");
    }

    #[test]
    fn headings_outside_both_limits_get_no_identifier() {
        let mut tree = DocumentTree::new();
        let s = section(&mut tree, "Top");
        let sub = subsection(&mut tree, s, "Invisible");

        let config = NumberingConfig {
            number_depth: 1,
            toc_depth: 1,
            ..Default::default()
        };
        let outline = TocBuilder::new(&config).run(&mut tree);

        assert_eq!(tree.index(sub), None);
        assert_eq!(tree.identifier(sub), None, "no dead link target");
        assert_eq!(outline.len(), 1);
        assert!(outline[0].children.is_empty());
    }

    #[test]
    fn deep_jump_pushes_a_single_level() {
        let mut tree = DocumentTree::new();
        let s = section(&mut tree, "Top");
        // Subsubsection directly under a Section: rank jumps 2..=4.
        let deep = tree.append_tagged(s, NodeKind::Heading(4), &["layout", "Subsubsection"]);
        tree.set_content(deep, vec![Inline::text("Skipped")]);

        let config = NumberingConfig::default();
        let outline = TocBuilder::new(&config).run(&mut tree);

        assert_eq!(outline.len(), 1);
        assert_eq!(outline[0].children.len(), 1);
        assert!(outline[0].children[0].children.is_empty());
    }

    #[test]
    fn parts_render_roman_and_do_not_touch_sections() {
        let mut tree = DocumentTree::new();
        let root = tree.root();
        let p1 = tree.append_text(root, NodeKind::Part, "Beginnings");
        section(&mut tree, "Alpha");
        let p2 = tree.append_text(root, NodeKind::Part, "Endings");
        let chapter = tree.append_text(root, NodeKind::Chapter, "First");
        section(&mut tree, "Beta");

        let config = NumberingConfig::default();
        TocBuilder::new(&config).run(&mut tree);

        assert_eq!(tree.plain_text(p1), "Part I Beginnings");
        assert_eq!(tree.plain_text(p2), "Part II Endings");
        assert_eq!(tree.plain_text(chapter), "Chapter 1 First");
        // Section counters run independently of parts and chapters.
        let betas = tree.select(|kind, _| matches!(kind, NodeKind::Heading(2)));
        assert_eq!(tree.index(betas[1]), Some("2"));
    }

    #[test]
    fn toc_container_gets_heading_and_nested_lists() {
        let mut tree = DocumentTree::new();
        let root = tree.root();
        let container = tree.append_tagged(root, NodeKind::TocContainer, &["inset", "toc"]);
        let s = section(&mut tree, "Only");
        subsection(&mut tree, s, "Child");

        let config = NumberingConfig::default();
        TocBuilder::new(&config).run(&mut tree);

        let children = tree.children(container).to_vec();
        assert_eq!(children.len(), 2);
        assert_eq!(tree.plain_text(children[0]), "Table of Contents");
        assert!(matches!(tree.kind(children[1]), NodeKind::List));

        let item = tree.children(children[1])[0];
        let link = tree.children(item)[0];
        assert!(matches!(
            tree.kind(link),
            NodeKind::RefLink { target } if target == "#Section_1"
        ));
        assert_eq!(tree.plain_text(link), "1 Only");
        // Nested list for the subsection hangs off the item, not the link.
        assert_eq!(tree.children(item).len(), 2);
    }

    #[test]
    fn config_discovery_drives_the_builder() {
        let mut tree = DocumentTree::new();
        let root = tree.root();
        tree.append_tagged(root, NodeKind::Meta, &["secnumdepth", "0"]);
        let s = section(&mut tree, "Unnumbered world");
        subsection(&mut tree, s, "Still here");

        let mut report = PassReport::new();
        let config = NumberingConfig::from_tree(&tree, &mut report);
        let outline = TocBuilder::new(&config).run(&mut tree);

        assert_eq!(tree.index(s), None);
        assert_eq!(outline[0].label, "Unnumbered world");
    }
}

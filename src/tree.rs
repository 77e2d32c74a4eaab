//! Arena document tree the numbering passes operate on.
//!
//! The tree arrives fully materialized from the conversion front end; this
//! module only models it. Content is structured (`Inline` pieces), never
//! concatenated markup strings, so prepending a label cannot introduce
//! escaping bugs.

use crate::data::constants::EnvVariant;

/// Index of a node inside its `DocumentTree` arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// What a node structurally is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Root,
    /// Document-level metadata carrier (depth limits live here).
    Meta,
    Part,
    Chapter,
    /// Heading levels 2..=6 (Section through Subparagraph).
    Heading(u8),
    Environment(EnvVariant),
    Case,
    Proof,
    /// Internal cross-reference link; `target` keeps the raw link target,
    /// fragment included (e.g. `#Theorem_2.1`).
    RefLink { target: String },
    /// Placeholder the table of contents gets materialized into.
    TocContainer,
    /// Custom caption attached to an environment or heading.
    Caption,
    List,
    ListItem,
    Text,
}

/// A piece of node content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Strong(Vec<Inline>),
    Emph(Vec<Inline>),
    LineBreak,
    /// End-of-proof mark; the rendering host right-aligns it.
    QedMark,
}

impl Inline {
    pub fn text(s: impl Into<String>) -> Self {
        Inline::Text(s.into())
    }
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    tags: Vec<String>,
    content: Vec<Inline>,
    /// Stable index attribute ("2.1"); assigned once, never recomputed.
    index: Option<String>,
    /// Unique identifier ("Theorem_2.1"); assigned once.
    id: Option<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// The document tree, exclusively owned by the pass for its duration.
#[derive(Debug, Clone)]
pub struct DocumentTree {
    nodes: Vec<NodeData>,
}

impl DocumentTree {
    /// Create a tree holding only a root node.
    pub fn new() -> Self {
        Self {
            nodes: vec![NodeData {
                kind: NodeKind::Root,
                tags: Vec::new(),
                content: Vec::new(),
                index: None,
                id: None,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Append a new node as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            kind,
            tags: Vec::new(),
            content: Vec::new(),
            index: None,
            id: None,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Append a node carrying layout tags (the converter's role labels).
    pub fn append_tagged(
        &mut self,
        parent: NodeId,
        kind: NodeKind,
        tags: &[&str],
    ) -> NodeId {
        let id = self.append(parent, kind);
        self.nodes[id.0].tags = tags.iter().map(|t| t.to_string()).collect();
        id
    }

    /// Append a node with plain text content.
    pub fn append_text(&mut self, parent: NodeId, kind: NodeKind, text: &str) -> NodeId {
        let id = self.append(parent, kind);
        self.nodes[id.0].content = vec![Inline::text(text)];
        id
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.0].kind
    }

    pub fn tags(&self, id: NodeId) -> &[String] {
        &self.nodes[id.0].tags
    }

    pub fn has_tag(&self, id: NodeId, tag: &str) -> bool {
        self.nodes[id.0].tags.iter().any(|t| t == tag)
    }

    pub fn content(&self, id: NodeId) -> &[Inline] {
        &self.nodes[id.0].content
    }

    pub fn set_content(&mut self, id: NodeId, content: Vec<Inline>) {
        self.nodes[id.0].content = content;
    }

    /// Insert pieces in front of the node's existing content.
    pub fn prepend_content(&mut self, id: NodeId, pieces: Vec<Inline>) {
        let node = &mut self.nodes[id.0];
        let mut merged = pieces;
        merged.append(&mut node.content);
        node.content = merged;
    }

    pub fn push_content(&mut self, id: NodeId, piece: Inline) {
        self.nodes[id.0].content.push(piece);
    }

    pub fn index(&self, id: NodeId) -> Option<&str> {
        self.nodes[id.0].index.as_deref()
    }

    /// Write the stable index. The first write wins; the attribute is never
    /// recomputed.
    pub fn set_index(&mut self, id: NodeId, index: impl Into<String>) {
        let node = &mut self.nodes[id.0];
        if node.index.is_none() {
            node.index = Some(index.into());
        }
    }

    pub fn identifier(&self, id: NodeId) -> Option<&str> {
        self.nodes[id.0].id.as_deref()
    }

    /// Write the identifier. First write wins, like `set_index`.
    pub fn set_identifier(&mut self, id: NodeId, ident: impl Into<String>) {
        let node = &mut self.nodes[id.0];
        if node.id.is_none() {
            node.id = Some(ident.into());
        }
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.nodes[id.0].parent?;
        let siblings = &self.nodes[parent.0].children;
        let pos = siblings.iter().position(|&c| c == id)?;
        if pos == 0 {
            None
        } else {
            Some(siblings[pos - 1])
        }
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.nodes[id.0].parent?;
        let siblings = &self.nodes[parent.0].children;
        let pos = siblings.iter().position(|&c| c == id)?;
        siblings.get(pos + 1).copied()
    }

    /// Ancestors of `id`, nearest first, root last.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.nodes[id.0].parent,
        }
    }

    /// All nodes in document order (pre-order), root included.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(node) = stack.pop() {
            out.push(node);
            for &child in self.nodes[node.0].children.iter().rev() {
                stack.push(child);
            }
        }
        out
    }

    /// Document-order node discovery by predicate, the analogue of the
    /// converter's kind+tag selector queries.
    pub fn select(&self, pred: impl Fn(&NodeKind, &[String]) -> bool) -> Vec<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .filter(|&id| {
                let node = &self.nodes[id.0];
                pred(&node.kind, &node.tags)
            })
            .collect()
    }

    /// First descendant of `id` (excluding `id`) with the given kind.
    pub fn find_descendant(&self, id: NodeId, pred: impl Fn(&NodeKind) -> bool) -> Option<NodeId> {
        self.descendants(id)
            .into_iter()
            .skip(1)
            .find(|&d| pred(&self.nodes[d.0].kind))
    }

    /// Concatenated text of the node's own content, markup dropped.
    pub fn plain_text(&self, id: NodeId) -> String {
        let mut out = String::new();
        collect_text(&self.nodes[id.0].content, &mut out);
        out
    }
}

impl Default for DocumentTree {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Ancestors<'a> {
    tree: &'a DocumentTree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.nodes[current.0].parent;
        Some(current)
    }
}

fn collect_text(pieces: &[Inline], out: &mut String) {
    for piece in pieces {
        match piece {
            Inline::Text(s) => out.push_str(s),
            Inline::Strong(inner) | Inline::Emph(inner) => collect_text(inner, out),
            Inline::LineBreak => out.push(' '),
            Inline::QedMark => {}
        }
    }
}

//! Tree-owning arena for syntax nodes.

use crate::{
    error::AstError,
    kinds::{Family, NodeKind, Slots},
    visitor::MAX_DEPTH,
};
use serde::{Deserialize, Serialize};
use std::{
    collections::{BTreeMap, HashSet},
    fmt,
};

/// Index of a node inside its [`Ast`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(usize);

impl NodeId {
    pub fn new(index: usize) -> Self {
        NodeId(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where a node came from in the source text. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcePos {
    pub line: u32,
    pub column: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    kind: NodeKind,

    /// Back-reference to the owning node. Derived from the child slots,
    /// so it is rebuilt on deserialization rather than stored.
    #[serde(skip)]
    parent: Option<NodeId>,

    #[serde(default, skip_serializing_if = "is_false")]
    parenthesized: bool,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    attributes: BTreeMap<String, serde_json::Value>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    before_comments: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    after_comments: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    source: Option<SourcePos>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Node {
    fn new(kind: NodeKind) -> Self {
        Node {
            kind,
            parent: None,
            parenthesized: false,
            attributes: BTreeMap::new(),
            before_comments: Vec::new(),
            after_comments: Vec::new(),
            source: None,
        }
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Grammar name of the node kind, e.g. `"AlterTableAlterColumn"`.
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn family(&self) -> Family {
        self.kind.family()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn is_parenthesized(&self) -> bool {
        self.parenthesized
    }

    pub fn set_parenthesized(&mut self, parenthesized: bool) {
        self.parenthesized = parenthesized;
    }

    pub fn attribute(&self, name: &str) -> Option<&serde_json::Value> {
        self.attributes.get(name)
    }

    pub fn contains_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn put_attribute(&mut self, name: impl Into<String>, value: serde_json::Value) {
        self.attributes.insert(name.into(), value);
    }

    pub fn remove_attribute(&mut self, name: &str) -> Option<serde_json::Value> {
        self.attributes.remove(name)
    }

    pub fn attributes(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.attributes
    }

    pub fn before_comments(&self) -> &[String] {
        &self.before_comments
    }

    pub fn add_before_comment(&mut self, comment: impl Into<String>) {
        self.before_comments.push(comment.into());
    }

    pub fn after_comments(&self) -> &[String] {
        &self.after_comments
    }

    pub fn add_after_comment(&mut self, comment: impl Into<String>) {
        self.after_comments.push(comment.into());
    }

    pub fn source(&self) -> Option<SourcePos> {
        self.source
    }

    pub fn set_source(&mut self, line: u32, column: u32) {
        self.source = Some(SourcePos { line, column });
    }
}

/// Owns every node of one or more statement trees.
///
/// Children are attached when their parent is pushed, so a tree is built
/// bottom-up: push the leaves, then the node that names them. A node can
/// be attached to at most one parent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AstRepr", into = "AstRepr")]
pub struct Ast {
    nodes: Vec<Node>,
}

#[derive(Serialize, Deserialize)]
struct AstRepr {
    nodes: Vec<Node>,
}

impl TryFrom<AstRepr> for Ast {
    type Error = AstError;

    fn try_from(repr: AstRepr) -> Result<Self, Self::Error> {
        Ast::from_nodes(repr.nodes)
    }
}

impl From<Ast> for AstRepr {
    fn from(ast: Ast) -> Self {
        AstRepr { nodes: ast.nodes }
    }
}

impl Ast {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds an arena from a flat node list, re-deriving every parent
    /// link from the child slots.
    pub fn from_nodes(mut nodes: Vec<Node>) -> Result<Self, AstError> {
        for node in nodes.iter_mut() {
            node.parent = None;
        }

        let mut links = Vec::new();
        for (index, node) in nodes.iter().enumerate() {
            let parent = NodeId(index);
            let mut error = None;
            node.kind.for_each_child(&mut |child| {
                if error.is_none() {
                    if child == parent {
                        error = Some(AstError::SelfReference(child));
                    } else if child.0 >= nodes.len() {
                        error = Some(AstError::UnknownNode(child));
                    } else {
                        links.push((child, parent));
                    }
                }
            });
            if let Some(error) = error {
                return Err(error);
            }
        }

        for (child, parent) in links {
            if let Some(existing) = nodes[child.0].parent {
                return Err(AstError::AlreadyAttached {
                    child,
                    parent: existing,
                });
            }
            nodes[child.0].parent = Some(parent);
        }

        let ast = Ast { nodes };
        for index in 0..ast.nodes.len() {
            ast.check_acyclic(NodeId(index))?;
        }
        Ok(ast)
    }

    fn check_acyclic(&self, id: NodeId) -> Result<(), AstError> {
        let mut current = self.nodes[id.0].parent;
        let mut steps = 0;
        while let Some(parent) = current {
            steps += 1;
            if parent == id || steps > self.nodes.len() {
                return Err(AstError::Cycle(id));
            }
            current = self.nodes[parent.0].parent;
        }
        Ok(())
    }

    /// Adds a node and attaches every child it names.
    ///
    /// All children must already exist and be parentless; on error the
    /// arena is left unchanged.
    pub fn push(&mut self, kind: impl Into<NodeKind>) -> Result<NodeId, AstError> {
        let kind = kind.into();
        let id = NodeId(self.nodes.len());

        let children = kind.children();
        let mut seen = HashSet::with_capacity(children.len());
        for &child in &children {
            let node = self.get(child)?;
            if let Some(parent) = node.parent {
                return Err(AstError::AlreadyAttached { child, parent });
            }
            if !seen.insert(child) {
                return Err(AstError::AlreadyAttached { child, parent: id });
            }
        }

        for child in children {
            self.nodes[child.0].parent = Some(id);
        }
        self.nodes.push(Node::new(kind));
        Ok(id)
    }

    /// Pushes a node and marks it parenthesized.
    pub fn push_parenthesized(&mut self, kind: impl Into<NodeKind>) -> Result<NodeId, AstError> {
        let id = self.push(kind)?;
        self.nodes[id.0].parenthesized = true;
        Ok(id)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Like [`Ast::node`] but reports a missing id as an error.
    pub fn get(&self, id: NodeId) -> Result<&Node, AstError> {
        self.nodes.get(id.0).ok_or(AstError::UnknownNode(id))
    }

    pub fn get_mut(&mut self, id: NodeId) -> Result<&mut Node, AstError> {
        self.nodes.get_mut(id.0).ok_or(AstError::UnknownNode(id))
    }

    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.node(id).map(Node::kind)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(Node::parent)
    }

    /// Walks `level` steps up the tree. Level 0 is the node itself.
    pub fn ancestor(&self, id: NodeId, level: usize) -> Option<NodeId> {
        let mut current = self.node(id).map(|_| id);
        for _ in 0..level {
            current = current.and_then(|id| self.parent(id));
        }
        current
    }

    /// Children in grammar order. Unknown ids have no children.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.node(id)
            .map(|node| node.kind.children())
            .unwrap_or_default()
    }

    /// Nodes without a parent, in insertion order.
    pub fn roots(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.parent.is_none())
            .map(|(index, _)| NodeId(index))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId(index), node))
    }

    /// Removes `child` from its parent's slot and clears its back-reference.
    /// An optional slot becomes absent, a list slot loses the element.
    pub fn detach(&mut self, child: NodeId) -> Result<NodeId, AstError> {
        let parent = self.get(child)?.parent.ok_or(AstError::NotAttached(child))?;
        self.nodes[parent.0].kind.remove_child(child);
        self.nodes[child.0].parent = None;
        Ok(parent)
    }

    /// Copies the subtree rooted at `id`. The copy is parentless and
    /// shares no nodes with the original.
    /// Fails with [`AstError::DepthExceeded`] before copying anything when the
    /// subtree nests deeper than [`MAX_DEPTH`].
    pub fn deep_clone(&mut self, id: NodeId) -> Result<NodeId, AstError> {
        self.check_depth(id, MAX_DEPTH)?;
        self.clone_subtree(id)
    }

    fn clone_subtree(&mut self, id: NodeId) -> Result<NodeId, AstError> {
        let source = self.get(id)?.clone();

        let mut mapping = Vec::new();
        for child in source.kind.children() {
            mapping.push((child, self.clone_subtree(child)?));
        }

        let mut kind = source.kind;
        kind.for_each_child_mut(&mut |slot| {
            if let Some((_, copy)) = mapping.iter().find(|(original, _)| *original == *slot) {
                *slot = *copy;
            }
        });

        let copy = self.push(kind)?;
        let node = &mut self.nodes[copy.0];
        node.parenthesized = source.parenthesized;
        node.attributes = source.attributes;
        node.before_comments = source.before_comments;
        node.after_comments = source.after_comments;
        node.source = source.source;
        Ok(copy)
    }

    /// Iterative walk over the subtree rooted at `id`.
    fn check_depth(&self, id: NodeId, limit: usize) -> Result<(), AstError> {
        let mut stack = vec![(id, 1)];
        while let Some((id, depth)) = stack.pop() {
            if depth > limit {
                return Err(AstError::DepthExceeded { limit });
            }
            for child in self.get(id)?.kind.children() {
                stack.push((child, depth + 1));
            }
        }
        Ok(())
    }

    /// Dotted name of an identifier or property chain, e.g. `db.orders`.
    pub fn qualified_name(&self, id: NodeId) -> Option<String> {
        let mut parts = Vec::new();
        let mut current = Some(id);
        while let Some(id) = current {
            match self.kind(id)? {
                NodeKind::Identifier(ident) => {
                    parts.push(ident.name.as_str());
                    current = None;
                }
                NodeKind::PropertyExpr(prop) => {
                    parts.push(prop.name.as_str());
                    current = prop.owner;
                }
                _ => return None,
            }
        }
        parts.reverse();
        Some(parts.join("."))
    }
}

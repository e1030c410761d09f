//! Depth-first traversal shared by the renderer and analysis passes.

use crate::{
    arena::{Ast, Node, NodeId},
    error::AstError,
    kinds::{NodeKind, Slots},
};

/// Visitor trait for AST traversal.
///
/// For each node [`Ast::accept`] calls `visit`; when it returns `true` the
/// node's children are walked in grammar order, when it returns `false`
/// the visitor has handled the subtree itself. `end_visit` runs in both
/// cases.
pub trait Visitor {
    type Error: From<AstError>;

    fn visit(&mut self, _ast: &Ast, _id: NodeId, _node: &Node) -> Result<bool, Self::Error> {
        Ok(true)
    }

    fn end_visit(&mut self, _ast: &Ast, _id: NodeId, _node: &Node) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Nesting depth past which a walk fails with [`AstError::DepthExceeded`]
/// instead of exhausting the stack.
pub const MAX_DEPTH: usize = 1024;

impl Ast {
    pub fn accept<V: Visitor + ?Sized>(&self, id: NodeId, visitor: &mut V) -> Result<(), V::Error> {
        self.accept_bounded(id, visitor, MAX_DEPTH)
    }

    /// Like [`Ast::accept`], failing once the walk nests deeper than `limit`.
    pub fn accept_bounded<V: Visitor + ?Sized>(
        &self,
        id: NodeId,
        visitor: &mut V,
        limit: usize,
    ) -> Result<(), V::Error> {
        self.walk(id, visitor, 1, limit)
    }

    fn walk<V: Visitor + ?Sized>(
        &self,
        id: NodeId,
        visitor: &mut V,
        depth: usize,
        limit: usize,
    ) -> Result<(), V::Error> {
        if depth > limit {
            return Err(AstError::DepthExceeded { limit }.into());
        }
        let node = self.get(id)?;
        if visitor.visit(self, id, node)? {
            for child in node.kind().children() {
                self.walk(child, visitor, depth + 1, limit)?;
            }
        }
        visitor.end_visit(self, id, node)
    }
}

struct TableCollector {
    tables: Vec<String>,
}

impl Visitor for TableCollector {
    type Error = AstError;

    fn visit(&mut self, ast: &Ast, _id: NodeId, node: &Node) -> Result<bool, AstError> {
        if let NodeKind::TableRef(table) = node.kind() {
            if let Some(name) = table.name.and_then(|name| ast.qualified_name(name)) {
                if !self.tables.contains(&name) {
                    self.tables.push(name);
                }
            }
        }
        Ok(true)
    }
}

/// Every distinct table name referenced under `root`, in first-seen order.
pub fn collect_tables(ast: &Ast, root: NodeId) -> Result<Vec<String>, AstError> {
    let mut collector = TableCollector { tables: Vec::new() };
    ast.accept(root, &mut collector)?;
    Ok(collector.tables)
}

struct LiteralCounter {
    count: usize,
}

impl Visitor for LiteralCounter {
    type Error = AstError;

    fn visit(&mut self, _ast: &Ast, _id: NodeId, node: &Node) -> Result<bool, AstError> {
        if node.kind().is_literal() {
            self.count += 1;
        }
        Ok(true)
    }
}

/// Number of literals under `root` that parameterized rendering would
/// lift into the parameter list.
pub fn count_literals(ast: &Ast, root: NodeId) -> Result<usize, AstError> {
    let mut counter = LiteralCounter { count: 0 };
    ast.accept(root, &mut counter)?;
    Ok(counter.count)
}

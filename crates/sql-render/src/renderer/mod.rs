//! Defines the core rendering trait and context for converting an AST to SQL.

use crate::{
    buffer::SqlBuffer,
    config::RenderConfig,
    dialect::Dialect,
    error::{Diagnostic, DropReason, RenderError, RenderResult},
};
use serde::Serialize;
use sql_ast::{Ast, Node, NodeId, NodeKind, Value, Visitor};
use tracing::{debug, trace};

pub mod alter_table;
pub mod create_table;
pub mod ddl;
pub mod dml;
pub mod escape;
pub mod expr;
pub mod insert;
pub mod merge;
pub mod select;

/// Base rendering rule for a node kind. Dialects fall back to these rules
/// for everything they do not override.
pub trait Render {
    fn render(&self, r: &mut Renderer<'_>, id: NodeId) -> RenderResult;
}

/// Output of a finished render call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rendered {
    pub sql: String,
    /// Captured literal values in placeholder order. Empty unless the
    /// render was parameterized.
    pub params: Vec<Value>,
    /// Number of literals replaced by a placeholder.
    pub replaced: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl Rendered {
    /// Hex md5 of the rendered text. Parameterized renders of statements
    /// that differ only in their literals share a fingerprint.
    pub fn fingerprint(&self) -> String {
        format!("{:x}", md5::compute(self.sql.as_bytes()))
    }
}

/// A context that holds the state during one rendering pass.
///
/// It accumulates the SQL text and the parameters, tracks indentation,
/// and provides access to the dialect for syntax-specific details.
pub struct Renderer<'a> {
    ast: &'a Ast,
    dialect: &'a dyn Dialect,
    config: &'a RenderConfig,
    buf: SqlBuffer,
    indent: usize,
    lines: usize,
    params: Vec<Value>,
    replaced: usize,
    depth: usize,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Renderer<'a> {
    pub fn new(ast: &'a Ast, dialect: &'a dyn Dialect, config: &'a RenderConfig) -> Self {
        Self {
            ast,
            dialect,
            config,
            buf: SqlBuffer::new(),
            indent: 0,
            lines: 0,
            params: Vec::new(),
            replaced: 0,
            depth: 0,
            diagnostics: Vec::new(),
        }
    }

    /// Renders the tree rooted at `root` into the buffer.
    pub fn render(&mut self, root: NodeId) -> RenderResult {
        debug!(root = %root, dialect = self.dialect.name(), "rendering statement");
        self.accept(root)?;
        debug_assert_eq!(self.indent, 0, "unbalanced indentation");
        Ok(())
    }

    /// Consumes the renderer and returns the text, parameters and diagnostics.
    pub fn finish(self) -> Rendered {
        debug!(
            bytes = self.buf.len(),
            params = self.params.len(),
            dropped = self.diagnostics.len(),
            "render finished"
        );
        Rendered {
            sql: self.buf.into_string(),
            params: self.params,
            replaced: self.replaced,
            diagnostics: self.diagnostics,
        }
    }

    pub fn ast(&self) -> &'a Ast {
        self.ast
    }

    pub fn dialect(&self) -> &'a dyn Dialect {
        self.dialect
    }

    pub fn sql(&self) -> &str {
        self.buf.as_str()
    }

    pub fn is_pretty(&self) -> bool {
        self.config.pretty
    }

    pub fn is_uppercase(&self) -> bool {
        self.config.uppercase
    }

    pub fn is_parameterized(&self) -> bool {
        self.config.parameterized
    }

    pub fn indent_level(&self) -> usize {
        self.indent
    }

    /// Line breaks emitted so far.
    pub fn lines(&self) -> usize {
        self.lines
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn print(&mut self, text: &str) {
        self.buf.push_str(text);
    }

    pub fn print_char(&mut self, c: char) {
        self.buf.push(c);
    }

    /// Prints a keyword (or keyword phrase) in the configured case.
    /// Keywords are written upper-case at the call site.
    pub fn keyword(&mut self, word: &str) {
        if self.config.uppercase {
            self.buf.push_str(word);
        } else {
            self.buf.push_str(&word.to_ascii_lowercase());
        }
    }

    /// Line break plus indentation in pretty mode, a single space otherwise.
    pub fn newline(&mut self) {
        if self.config.pretty {
            self.hard_newline();
        } else {
            self.buf.push(' ');
        }
    }

    /// Line break in pretty mode, `compact` otherwise.
    pub fn break_or(&mut self, compact: &str) {
        if self.config.pretty {
            self.hard_newline();
        } else {
            self.buf.push_str(compact);
        }
    }

    /// Line break regardless of mode. Needed after `--` comments.
    pub fn hard_newline(&mut self) {
        self.buf.push('\n');
        for _ in 0..self.indent {
            self.buf.push_str(&self.config.indent_unit);
        }
        self.lines += 1;
    }

    /// Runs `f` one indentation level deeper. The level is restored on
    /// every path, including errors.
    pub fn indented<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, RenderError>,
    ) -> Result<T, RenderError> {
        self.indent += 1;
        let result = f(self);
        self.indent -= 1;
        result
    }

    /// Prints a space unless the buffer already ends in whitespace.
    pub fn ensure_space(&mut self) {
        if !self.buf.ends_with_whitespace() {
            self.buf.push(' ');
        }
    }

    pub fn last_char(&self) -> Option<char> {
        self.buf.last_char()
    }

    pub fn accept(&mut self, id: NodeId) -> RenderResult {
        let ast = self.ast;
        ast.accept(id, self)
    }

    /// Renders `id` after a [`newline`](Self::newline), taking the break
    /// back out when the node printed nothing.
    pub fn accept_on_new_line(&mut self, id: NodeId) -> RenderResult {
        let mark = self.buf.len();
        self.newline();
        let start = self.buf.len();
        self.accept(id)?;
        if self.buf.len() == start {
            self.buf.truncate(mark);
        }
        Ok(())
    }

    pub fn accept_opt(&mut self, id: Option<NodeId>) -> RenderResult {
        match id {
            Some(id) => self.accept(id),
            None => Ok(()),
        }
    }

    /// Renders `ids` with `separator` between them.
    pub fn join(&mut self, ids: &[NodeId], separator: &str) -> RenderResult {
        for (i, id) in ids.iter().enumerate() {
            if i > 0 {
                self.print(separator);
            }
            self.accept(*id)?;
        }
        Ok(())
    }

    /// Renders `ids` separated by `,` and a line break.
    pub fn join_lines(&mut self, ids: &[NodeId]) -> RenderResult {
        for (i, id) in ids.iter().enumerate() {
            if i > 0 {
                self.print(",");
                self.newline();
            }
            self.accept(*id)?;
        }
        Ok(())
    }

    /// `(a, b, c)`
    pub fn parenthesized_list(&mut self, ids: &[NodeId]) -> RenderResult {
        self.print("(");
        self.join(ids, ", ")?;
        self.print(")");
        Ok(())
    }

    /// Unwraps a slot the grammar requires, failing the render otherwise.
    pub fn required(
        &self,
        owner: NodeId,
        slot: &'static str,
        child: Option<NodeId>,
    ) -> Result<NodeId, RenderError> {
        child.ok_or_else(|| RenderError::MissingChild {
            node: owner,
            kind: self.ast.node(owner).map_or("Unknown", Node::name),
            slot,
        })
    }

    pub fn kind_of(&self, id: NodeId) -> Option<&'a NodeKind> {
        self.ast.kind(id)
    }

    /// Kind of the ancestor `level` steps above `id`.
    pub fn ancestor_kind(&self, id: NodeId, level: usize) -> Option<&'a NodeKind> {
        self.ast
            .ancestor(id, level)
            .and_then(|ancestor| self.ast.kind(ancestor))
    }

    pub fn is_parenthesized(&self, id: NodeId) -> bool {
        self.ast.node(id).is_some_and(Node::is_parenthesized)
    }

    /// Whether a query under `owner` already sits inside parentheses
    /// printed by `owner` itself.
    pub fn implies_parens(&self, owner: Option<&NodeKind>) -> bool {
        matches!(
            owner,
            Some(
                NodeKind::SubqueryTableSource(_)
                    | NodeKind::SubqueryExpr(_)
                    | NodeKind::Exists(_)
                    | NodeKind::WithEntry(_)
            )
        )
    }

    /// Whether `id` is the whole body of a parenthesized `Select`, whose
    /// own brackets already enclose it.
    pub fn wrapped_by_select(&self, id: NodeId) -> bool {
        let Some(owner) = self.ast.parent(id) else {
            return false;
        };
        match self.ast.kind(owner) {
            Some(NodeKind::Select(select)) => {
                self.is_parenthesized(owner)
                    && select.query == Some(id)
                    && select.with.is_none()
                    && select.order_by.is_none()
                    && select.limit.is_none()
            }
            _ => false,
        }
    }

    /// In parameterized mode prints the placeholder, records the value and
    /// returns `true`; otherwise leaves the buffer untouched.
    pub fn capture(&mut self, value: impl FnOnce() -> Value) -> bool {
        if !self.config.parameterized {
            return false;
        }
        let value = value();
        let index = self.params.len();
        trace!(index, %value, "captured parameter");
        let placeholder = self.dialect.placeholder(index);
        self.buf.push_str(&placeholder);
        self.params.push(value);
        self.replaced += 1;
        true
    }

    /// Leaves a whole node out of the output and records why.
    pub fn drop_node(&mut self, id: NodeId, reason: DropReason) -> RenderResult {
        let kind = self.ast.get(id)?.name();
        debug!(node = %id, kind, dialect = self.dialect.name(), ?reason, "dropped node");
        self.diagnostics.push(Diagnostic {
            node: id,
            kind,
            clause: None,
            dialect: self.dialect.name(),
            reason,
        });
        Ok(())
    }

    /// Leaves one clause of a node out of the output and records why.
    pub fn drop_clause(&mut self, id: NodeId, clause: &'static str, reason: DropReason) -> RenderResult {
        let kind = self.ast.get(id)?.name();
        debug!(node = %id, kind, clause, dialect = self.dialect.name(), ?reason, "dropped clause");
        self.diagnostics.push(Diagnostic {
            node: id,
            kind,
            clause: Some(clause),
            dialect: self.dialect.name(),
            reason,
        });
        Ok(())
    }

    fn print_comment(&mut self, comment: &str) {
        self.buf.push_str(comment);
        if comment.starts_with("--") {
            self.hard_newline();
        }
    }

    fn wraps_itself(&self, id: NodeId, node: &Node) -> bool {
        if !node.is_parenthesized() {
            return false;
        }
        match node.kind() {
            // These decide on their own brackets.
            NodeKind::QueryBlock(_) | NodeKind::CharLiteral(_) => false,
            NodeKind::Select(_) => !self.implies_parens(self.ancestor_kind(id, 1)),
            NodeKind::Union(_) => !self.wrapped_by_select(id),
            kind => kind.is_expression(),
        }
    }
}

impl Visitor for Renderer<'_> {
    type Error = RenderError;

    fn visit(&mut self, _ast: &Ast, id: NodeId, node: &Node) -> Result<bool, RenderError> {
        self.depth += 1;
        if self.depth > self.config.max_depth {
            return Err(RenderError::DepthExceeded {
                limit: self.config.max_depth,
            });
        }

        if !self.config.parameterized {
            for comment in node.before_comments() {
                self.print_comment(comment);
                if !comment.starts_with("--") {
                    self.newline();
                }
            }
        }

        let wrap = self.wraps_itself(id, node);
        if wrap {
            self.print("(");
        }
        dispatch(self, id, node)?;
        if wrap {
            self.print(")");
        }
        Ok(false)
    }

    fn end_visit(&mut self, _ast: &Ast, _id: NodeId, node: &Node) -> Result<(), RenderError> {
        if !self.config.parameterized {
            for comment in node.after_comments() {
                self.ensure_space();
                self.print_comment(comment);
            }
        }

        self.depth -= 1;
        if let Some(limit) = self.config.max_output
            && self.buf.len() > limit
        {
            return Err(RenderError::OutputTooLarge { limit });
        }
        Ok(())
    }
}

/// Routes a node to its dialect hook or its base rule.
fn dispatch(r: &mut Renderer<'_>, id: NodeId, node: &Node) -> RenderResult {
    let d = r.dialect;
    match node.kind() {
        NodeKind::Identifier(x) => x.render(r, id),
        NodeKind::PropertyExpr(x) => x.render(r, id),
        NodeKind::AllColumn(x) => x.render(r, id),
        NodeKind::CharLiteral(x) => d.char_literal(r, id, x),
        NodeKind::IntegerLiteral(x) => x.render(r, id),
        NodeKind::NumberLiteral(x) => x.render(r, id),
        NodeKind::BooleanLiteral(x) => x.render(r, id),
        NodeKind::NullLiteral(x) => x.render(r, id),
        NodeKind::DateLiteral(x) => x.render(r, id),
        NodeKind::TimestampLiteral(x) => x.render(r, id),
        NodeKind::BinaryLiteral(x) => x.render(r, id),
        NodeKind::VariantRef(x) => x.render(r, id),
        NodeKind::BinaryOp(x) => x.render(r, id),
        NodeKind::UnaryOp(x) => x.render(r, id),
        NodeKind::FunctionCall(x) => x.render(r, id),
        NodeKind::Cast(x) => x.render(r, id),
        NodeKind::InList(x) => x.render(r, id),
        NodeKind::Between(x) => x.render(r, id),
        NodeKind::IsNull(x) => x.render(r, id),
        NodeKind::Exists(x) => x.render(r, id),
        NodeKind::SubqueryExpr(x) => x.render(r, id),
        NodeKind::Case(x) => x.render(r, id),
        NodeKind::CaseWhen(x) => x.render(r, id),
        NodeKind::ListExpr(x) => x.render(r, id),
        NodeKind::IntervalExpr(x) => d.interval(r, id, x),
        NodeKind::DataType(x) => x.render(r, id),
        NodeKind::ArrayDataType(x) => d.array_data_type(r, id, x),
        NodeKind::Select(x) => x.render(r, id),
        NodeKind::QueryBlock(x) => d.query_block(r, id, x),
        NodeKind::SelectItem(x) => x.render(r, id),
        NodeKind::Union(x) => x.render(r, id),
        NodeKind::With(x) => x.render(r, id),
        NodeKind::WithEntry(x) => x.render(r, id),
        NodeKind::OrderBy(x) => x.render(r, id),
        NodeKind::OrderByItem(x) => x.render(r, id),
        NodeKind::GroupBy(x) => x.render(r, id),
        NodeKind::Limit(x) => d.limit(r, id, x),
        NodeKind::Fetch(x) => x.render(r, id),
        NodeKind::ForClause(x) => x.render(r, id),
        NodeKind::TableRef(x) => x.render(r, id),
        NodeKind::SubqueryTableSource(x) => x.render(r, id),
        NodeKind::Join(x) => x.render(r, id),
        NodeKind::Insert(x) => d.insert(r, id, x),
        NodeKind::ValuesRow(x) => x.render(r, id),
        NodeKind::Update(x) => d.update(r, id, x),
        NodeKind::UpdateSetItem(x) => x.render(r, id),
        NodeKind::Delete(x) => d.delete(r, id, x),
        NodeKind::Truncate(x) => d.truncate(r, id, x),
        NodeKind::Merge(x) => x.render(r, id),
        NodeKind::MergeWhenUpdate(x) => x.render(r, id),
        NodeKind::MergeWhenInsert(x) => x.render(r, id),
        NodeKind::MergeWhenDelete(x) => x.render(r, id),
        NodeKind::AssignItem(x) => d.assign_item(r, id, x),
        NodeKind::SetStatement(x) => x.render(r, id),
        NodeKind::CreateTable(x) => d.create_table(r, id, x),
        NodeKind::ColumnDef(x) => x.render(r, id),
        NodeKind::PrimaryKey(x) => x.render(r, id),
        NodeKind::UniqueKey(x) => x.render(r, id),
        NodeKind::ForeignKey(x) => x.render(r, id),
        NodeKind::RowFormat(x) => x.render(r, id),
        NodeKind::CreateIndex(x) => d.create_index(r, id, x),
        NodeKind::CreateView(x) => x.render(r, id),
        NodeKind::DropTable(x) => x.render(r, id),
        NodeKind::AlterTable(x) => x.render(r, id),
        NodeKind::AlterTableAddColumn(x) => d.add_column(r, id, x),
        NodeKind::AlterTableDropColumn(x) => x.render(r, id),
        NodeKind::AlterTableAlterColumn(x) => d.alter_column(r, id, x),
        NodeKind::AlterTableRename(x) => x.render(r, id),
        NodeKind::AlterTableChangeOwner(x) => x.render(r, id),
        NodeKind::Grant(x) => d.grant(r, id, x),
        NodeKind::CreateUser(x) => x.render(r, id),
        NodeKind::Hive(x) => d.hive(r, id, x),
        NodeKind::Pg(x) => d.postgres(r, id, x),
        NodeKind::Oracle(x) => d.oracle(r, id, x),
    }
}

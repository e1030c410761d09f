use crate::{
    error::RenderResult,
    renderer::{Render, Renderer, escape::escape},
};
use sql_ast::{
    NodeId, NodeKind, Value,
    bigdecimal::BigDecimal,
    kinds::{
        AllColumn, ArrayDataType, Between, BinaryLiteral, BinaryOp, BinaryOperator, BooleanLiteral,
        Case, CaseWhen, Cast, CharLiteral, DataType, DateLiteral, Exists, FunctionCall,
        Identifier, InList, IntegerLiteral, IntervalExpr, IsNull, ListExpr, NullLiteral,
        NumberLiteral, PropertyExpr, SubqueryExpr, TimestampLiteral, UnaryOp, UnaryOperator,
        VariantRef,
    },
};

impl Render for Identifier {
    fn render(&self, r: &mut Renderer<'_>, _id: NodeId) -> RenderResult {
        if self.quoted {
            let quoted = r.dialect().quote_identifier(&self.name);
            r.print(&quoted);
        } else {
            r.print(&self.name);
        }
        Ok(())
    }
}

impl Render for PropertyExpr {
    fn render(&self, r: &mut Renderer<'_>, id: NodeId) -> RenderResult {
        let owner = r.required(id, "owner", self.owner)?;
        r.accept(owner)?;
        r.print(".");
        r.print(&self.name);
        Ok(())
    }
}

impl Render for AllColumn {
    fn render(&self, r: &mut Renderer<'_>, _id: NodeId) -> RenderResult {
        r.print("*");
        Ok(())
    }
}

impl Render for CharLiteral {
    fn render(&self, r: &mut Renderer<'_>, id: NodeId) -> RenderResult {
        char_literal(r, id, self, "", escape)
    }
}

/// `prefix'text' COLLATE x`, wrapped as a whole when the literal is
/// parenthesized. The prefix is skipped for placeholders and `NULL`.
pub fn char_literal(
    r: &mut Renderer<'_>,
    id: NodeId,
    x: &CharLiteral,
    prefix: &str,
    escape: impl Fn(&str) -> String,
) -> RenderResult {
    let parenthesized = r.is_parenthesized(id);
    if parenthesized {
        r.print("(");
    }
    if x.text.is_some() && !r.is_parameterized() {
        r.print(prefix);
    }
    print_chars(r, x.text.as_deref(), escape);
    if let Some(collate) = &x.collate {
        r.keyword(" COLLATE ");
        let collation = r.dialect().quote_identifier(collate);
        r.print(&collation);
    }
    if parenthesized {
        r.print(")");
    }
    Ok(())
}

/// Prints a quoted string literal using `escape` for its body, or the
/// placeholder when parameterized. `None` is the NULL string.
pub fn print_chars(r: &mut Renderer<'_>, text: Option<&str>, escape: impl Fn(&str) -> String) {
    let Some(text) = text else {
        r.keyword("NULL");
        return;
    };
    if r.capture(|| Value::String(text.to_string())) {
        return;
    }
    r.print("'");
    r.print(&escape(text));
    r.print("'");
}

impl Render for IntegerLiteral {
    fn render(&self, r: &mut Renderer<'_>, _id: NodeId) -> RenderResult {
        if !r.capture(|| Value::Int(self.value)) {
            r.print(&self.value.to_string());
        }
        Ok(())
    }
}

impl Render for NumberLiteral {
    fn render(&self, r: &mut Renderer<'_>, _id: NodeId) -> RenderResult {
        if !r.capture(|| Value::Decimal(self.value.clone())) {
            r.print(&self.value.to_string());
        }
        Ok(())
    }
}

impl Render for BooleanLiteral {
    fn render(&self, r: &mut Renderer<'_>, _id: NodeId) -> RenderResult {
        r.keyword(if self.value { "TRUE" } else { "FALSE" });
        Ok(())
    }
}

impl Render for NullLiteral {
    fn render(&self, r: &mut Renderer<'_>, _id: NodeId) -> RenderResult {
        r.keyword("NULL");
        Ok(())
    }
}

impl Render for DateLiteral {
    fn render(&self, r: &mut Renderer<'_>, _id: NodeId) -> RenderResult {
        r.keyword("DATE ");
        if !r.capture(|| Value::Date(self.value)) {
            r.print(&format!("'{}'", self.value.format("%Y-%m-%d")));
        }
        Ok(())
    }
}

impl Render for TimestampLiteral {
    fn render(&self, r: &mut Renderer<'_>, _id: NodeId) -> RenderResult {
        r.keyword("TIMESTAMP ");
        if !r.capture(|| Value::Timestamp(self.value)) {
            r.print(&format!("'{}'", self.value.format("%Y-%m-%d %H:%M:%S%.f")));
        }
        Ok(())
    }
}

impl Render for BinaryLiteral {
    fn render(&self, r: &mut Renderer<'_>, _id: NodeId) -> RenderResult {
        r.print("B'");
        r.print(&self.bits);
        r.print("'");
        Ok(())
    }
}

impl Render for VariantRef {
    fn render(&self, r: &mut Renderer<'_>, _id: NodeId) -> RenderResult {
        r.print(&self.name);
        Ok(())
    }
}

impl Render for BinaryOp {
    fn render(&self, r: &mut Renderer<'_>, id: NodeId) -> RenderResult {
        let left = r.required(id, "left", self.left)?;
        let right = r.required(id, "right", self.right)?;

        operand(r, self.op, left, false)?;
        r.print(" ");
        if self.op.is_keyword() {
            r.keyword(self.op.symbol());
        } else {
            r.print(self.op.symbol());
        }
        r.print(" ");
        operand(r, self.op, right, true)
    }
}

/// Renders one side of a binary operator, adding parentheses when the
/// child binds looser than the operator.
fn operand(r: &mut Renderer<'_>, op: BinaryOperator, child: NodeId, right_side: bool) -> RenderResult {
    let needs_parens = !r.is_parenthesized(child)
        && match r.kind_of(child) {
            Some(NodeKind::BinaryOp(inner)) => {
                inner.op.precedence() < op.precedence()
                    || (right_side
                        && inner.op.precedence() == op.precedence()
                        && !(inner.op == op && op.is_associative()))
            }
            _ => false,
        };

    if needs_parens {
        r.print("(");
    }
    r.accept(child)?;
    if needs_parens {
        r.print(")");
    }
    Ok(())
}

impl Render for UnaryOp {
    fn render(&self, r: &mut Renderer<'_>, id: NodeId) -> RenderResult {
        let expr = r.required(id, "expr", self.expr)?;
        match self.op {
            UnaryOperator::Not => r.keyword("NOT "),
            // `--` would open a line comment
            UnaryOperator::Neg if starts_with_minus(r, expr) => r.print("- "),
            UnaryOperator::Neg => r.print("-"),
            UnaryOperator::Plus => r.print("+"),
            UnaryOperator::BitNot => r.print("~"),
        }
        let needs_parens =
            !r.is_parenthesized(expr) && matches!(r.kind_of(expr), Some(NodeKind::BinaryOp(_)));
        if needs_parens {
            r.print("(");
        }
        r.accept(expr)?;
        if needs_parens {
            r.print(")");
        }
        Ok(())
    }
}

fn starts_with_minus(r: &Renderer<'_>, id: NodeId) -> bool {
    if r.is_parenthesized(id) {
        return false;
    }
    match r.kind_of(id) {
        Some(NodeKind::IntegerLiteral(x)) => x.value < 0,
        Some(NodeKind::NumberLiteral(x)) => x.value < BigDecimal::from(0),
        Some(NodeKind::UnaryOp(x)) => x.op == UnaryOperator::Neg,
        _ => false,
    }
}

impl Render for FunctionCall {
    fn render(&self, r: &mut Renderer<'_>, _id: NodeId) -> RenderResult {
        r.print(&self.name);
        r.print("(");
        if self.distinct {
            r.keyword("DISTINCT ");
        }
        r.join(&self.args, ", ")?;
        r.print(")");
        Ok(())
    }
}

impl Render for Cast {
    fn render(&self, r: &mut Renderer<'_>, id: NodeId) -> RenderResult {
        let expr = r.required(id, "expr", self.expr)?;
        let data_type = r.required(id, "data_type", self.data_type)?;
        r.keyword("CAST(");
        r.accept(expr)?;
        r.keyword(" AS ");
        r.accept(data_type)?;
        r.print(")");
        Ok(())
    }
}

impl Render for InList {
    fn render(&self, r: &mut Renderer<'_>, id: NodeId) -> RenderResult {
        let expr = r.required(id, "expr", self.expr)?;
        r.accept(expr)?;
        r.keyword(if self.not { " NOT IN " } else { " IN " });

        // A lone subquery prints its own parentheses.
        if let [item] = self.items.as_slice()
            && matches!(r.kind_of(*item), Some(NodeKind::SubqueryExpr(_)))
        {
            return r.accept(*item);
        }
        r.parenthesized_list(&self.items)
    }
}

impl Render for Between {
    fn render(&self, r: &mut Renderer<'_>, id: NodeId) -> RenderResult {
        let expr = r.required(id, "expr", self.expr)?;
        let low = r.required(id, "low", self.low)?;
        let high = r.required(id, "high", self.high)?;
        r.accept(expr)?;
        r.keyword(if self.not { " NOT BETWEEN " } else { " BETWEEN " });
        r.accept(low)?;
        r.keyword(" AND ");
        r.accept(high)
    }
}

impl Render for IsNull {
    fn render(&self, r: &mut Renderer<'_>, id: NodeId) -> RenderResult {
        let expr = r.required(id, "expr", self.expr)?;
        r.accept(expr)?;
        r.keyword(if self.not { " IS NOT NULL" } else { " IS NULL" });
        Ok(())
    }
}

impl Render for Exists {
    fn render(&self, r: &mut Renderer<'_>, id: NodeId) -> RenderResult {
        let query = r.required(id, "query", self.query)?;
        r.keyword(if self.not { "NOT EXISTS " } else { "EXISTS " });
        subquery(r, query)
    }
}

impl Render for SubqueryExpr {
    fn render(&self, r: &mut Renderer<'_>, id: NodeId) -> RenderResult {
        let query = r.required(id, "query", self.query)?;
        subquery(r, query)
    }
}

/// `(query)`, with the body on its own indented lines in pretty mode.
pub fn subquery(r: &mut Renderer<'_>, query: NodeId) -> RenderResult {
    r.print("(");
    r.indented(|r| {
        r.break_or("");
        r.accept(query)
    })?;
    r.break_or("");
    r.print(")");
    Ok(())
}

impl Render for Case {
    fn render(&self, r: &mut Renderer<'_>, _id: NodeId) -> RenderResult {
        r.keyword("CASE");
        if let Some(value) = self.value {
            r.print(" ");
            r.accept(value)?;
        }
        for when in &self.whens {
            r.print(" ");
            r.accept(*when)?;
        }
        if let Some(else_expr) = self.else_expr {
            r.keyword(" ELSE ");
            r.accept(else_expr)?;
        }
        r.keyword(" END");
        Ok(())
    }
}

impl Render for CaseWhen {
    fn render(&self, r: &mut Renderer<'_>, id: NodeId) -> RenderResult {
        let condition = r.required(id, "condition", self.condition)?;
        let result = r.required(id, "result", self.result)?;
        r.keyword("WHEN ");
        r.accept(condition)?;
        r.keyword(" THEN ");
        r.accept(result)
    }
}

impl Render for ListExpr {
    fn render(&self, r: &mut Renderer<'_>, _id: NodeId) -> RenderResult {
        r.parenthesized_list(&self.items)
    }
}

impl Render for IntervalExpr {
    fn render(&self, r: &mut Renderer<'_>, id: NodeId) -> RenderResult {
        let value = r.required(id, "value", self.value)?;
        r.keyword("INTERVAL ");
        r.accept(value)?;
        if let Some(unit) = self.unit {
            r.print(" ");
            r.keyword(unit.keyword());
        }
        Ok(())
    }
}

impl Render for DataType {
    fn render(&self, r: &mut Renderer<'_>, _id: NodeId) -> RenderResult {
        r.print(&self.name);
        if !self.args.is_empty() {
            r.parenthesized_list(&self.args)?;
        }
        Ok(())
    }
}

/// Generic form `ARRAY<component>`.
impl Render for ArrayDataType {
    fn render(&self, r: &mut Renderer<'_>, id: NodeId) -> RenderResult {
        let component = r.required(id, "component", self.component)?;
        r.keyword("ARRAY");
        r.print("<");
        r.accept(component)?;
        r.print(">");
        Ok(())
    }
}

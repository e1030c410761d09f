use crate::{
    error::RenderResult,
    renderer::{Render, Renderer},
};
use sql_ast::{
    NodeId,
    kinds::{Merge, MergeWhenDelete, MergeWhenInsert, MergeWhenUpdate},
};

impl Render for Merge {
    fn render(&self, r: &mut Renderer<'_>, id: NodeId) -> RenderResult {
        let into = r.required(id, "into", self.into)?;
        let using = r.required(id, "using", self.using)?;
        let on = r.required(id, "on", self.on)?;

        r.keyword("MERGE INTO ");
        r.accept(into)?;
        r.newline();
        r.keyword("USING ");
        r.accept(using)?;
        r.newline();
        r.keyword("ON ");
        r.accept(on)?;
        for when in &self.whens {
            r.newline();
            r.accept(*when)?;
        }
        Ok(())
    }
}

fn when_header(r: &mut Renderer<'_>, matched: bool, condition: Option<NodeId>) -> RenderResult {
    r.keyword(if matched { "WHEN MATCHED" } else { "WHEN NOT MATCHED" });
    if let Some(condition) = condition {
        r.keyword(" AND ");
        r.accept(condition)?;
    }
    r.keyword(" THEN ");
    Ok(())
}

impl Render for MergeWhenUpdate {
    fn render(&self, r: &mut Renderer<'_>, _id: NodeId) -> RenderResult {
        when_header(r, true, self.condition)?;
        r.keyword("UPDATE SET ");
        r.join(&self.items, ", ")
    }
}

impl Render for MergeWhenInsert {
    fn render(&self, r: &mut Renderer<'_>, _id: NodeId) -> RenderResult {
        when_header(r, false, self.condition)?;
        r.keyword("INSERT");
        if !self.columns.is_empty() {
            r.print(" ");
            r.parenthesized_list(&self.columns)?;
        }
        r.keyword(" VALUES ");
        r.parenthesized_list(&self.values)
    }
}

impl Render for MergeWhenDelete {
    fn render(&self, r: &mut Renderer<'_>, _id: NodeId) -> RenderResult {
        when_header(r, true, self.condition)?;
        r.keyword("DELETE");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::RenderConfig, dialect::Standard, error::RenderError};
    use sql_ast::{
        Ast,
        kinds::{BinaryOp, BinaryOperator, Identifier, PropertyExpr, TableRef, UpdateSetItem},
    };

    fn table(ast: &mut Ast, name: &str, alias: &str) -> NodeId {
        let name = ast.push(Identifier::new(name)).unwrap();
        ast.push(TableRef {
            name: Some(name),
            alias: Some(alias.into()),
        })
        .unwrap()
    }

    fn column(ast: &mut Ast, owner: &str, name: &str) -> NodeId {
        let owner = ast.push(Identifier::new(owner)).unwrap();
        ast.push(PropertyExpr {
            owner: Some(owner),
            name: name.into(),
        })
        .unwrap()
    }

    #[test]
    fn test_merge_branches() {
        let mut ast = Ast::new();
        let into = table(&mut ast, "stock", "s");
        let using = table(&mut ast, "delivery", "d");
        let left = column(&mut ast, "s", "item");
        let right = column(&mut ast, "d", "item");
        let on = ast.push(BinaryOp::new(left, BinaryOperator::Eq, right)).unwrap();

        let qty = ast.push(Identifier::new("qty")).unwrap();
        let delivered = column(&mut ast, "d", "qty");
        let set = ast
            .push(UpdateSetItem {
                column: Some(qty),
                value: Some(delivered),
            })
            .unwrap();
        let update = ast
            .push(MergeWhenUpdate {
                condition: None,
                items: vec![set],
            })
            .unwrap();

        let item = ast.push(Identifier::new("item")).unwrap();
        let value = column(&mut ast, "d", "item");
        let insert = ast
            .push(MergeWhenInsert {
                condition: None,
                columns: vec![item],
                values: vec![value],
            })
            .unwrap();

        let merge = ast
            .push(Merge {
                into: Some(into),
                using: Some(using),
                on: Some(on),
                whens: vec![update, insert],
            })
            .unwrap();

        let config = RenderConfig::default();
        let mut r = Renderer::new(&ast, &Standard, &config);
        r.render(merge).unwrap();
        let expected = r#"MERGE INTO stock s
USING delivery d
ON s.item = d.item
WHEN MATCHED THEN UPDATE SET qty = d.qty
WHEN NOT MATCHED THEN INSERT (item) VALUES (d.item)"#;
        assert_eq!(r.finish().sql, expected);
    }

    #[test]
    fn test_merge_requires_condition() {
        let mut ast = Ast::new();
        let into = table(&mut ast, "stock", "s");
        let using = table(&mut ast, "delivery", "d");
        let merge = ast
            .push(Merge {
                into: Some(into),
                using: Some(using),
                ..Default::default()
            })
            .unwrap();
        let config = RenderConfig::default();
        let mut r = Renderer::new(&ast, &Standard, &config);
        assert!(matches!(
            r.render(merge),
            Err(RenderError::MissingChild { kind: "Merge", slot: "on", .. })
        ));
    }
}

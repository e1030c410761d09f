use crate::{
    error::{DropReason, RenderResult},
    renderer::{Render, Renderer},
};
use sql_ast::{
    NodeId,
    kinds::{CreateIndex, CreateUser, CreateView, DropTable, Grant},
};

/// `CREATE [UNIQUE] INDEX .. ON table [USING method] (items)`. The Hive
/// index clauses have no base spelling and are dropped.
impl Render for CreateIndex {
    fn render(&self, r: &mut Renderer<'_>, id: NodeId) -> RenderResult {
        let name = r.required(id, "name", self.name)?;
        let table = r.required(id, "table", self.table)?;

        r.keyword(if self.unique { "CREATE UNIQUE INDEX " } else { "CREATE INDEX " });
        if self.concurrently {
            r.keyword("CONCURRENTLY ");
        }
        if self.if_not_exists {
            r.keyword("IF NOT EXISTS ");
        }
        r.accept(name)?;
        r.keyword(" ON ");
        r.accept(table)?;
        if let Some(method) = &self.using {
            r.keyword(" USING ");
            r.print(method);
        }
        r.print(" ");
        r.parenthesized_list(&self.items)?;
        if let Some(tablespace) = self.tablespace {
            r.keyword(" TABLESPACE ");
            r.accept(tablespace)?;
        }
        if let Some(where_clause) = self.where_clause {
            r.newline();
            r.keyword("WHERE ");
            r.accept(where_clause)?;
        }

        let hive_only = [
            ("handler", self.handler.is_some()),
            ("deferred_rebuild", self.deferred_rebuild),
            ("properties", !self.properties.is_empty()),
            ("in_table", self.in_table.is_some()),
            ("row_format", self.row_format.is_some()),
            ("stored_as", self.stored_as.is_some()),
            ("location", self.location.is_some()),
            ("table_properties", !self.table_properties.is_empty()),
            ("comment", self.comment.is_some()),
        ];
        for (clause, present) in hive_only {
            if present {
                r.drop_clause(id, clause, DropReason::NoEquivalent)?;
            }
        }
        Ok(())
    }
}

impl Render for CreateView {
    fn render(&self, r: &mut Renderer<'_>, id: NodeId) -> RenderResult {
        let name = r.required(id, "name", self.name)?;
        let query = r.required(id, "query", self.query)?;

        r.keyword(if self.or_replace { "CREATE OR REPLACE VIEW " } else { "CREATE VIEW " });
        r.accept(name)?;
        if !self.columns.is_empty() {
            r.print(" ");
            r.parenthesized_list(&self.columns)?;
        }
        if let Some(comment) = self.comment {
            r.newline();
            r.keyword("COMMENT ");
            r.accept(comment)?;
        }
        r.newline();
        r.keyword("AS");
        r.newline();
        r.accept(query)
    }
}

impl Render for DropTable {
    fn render(&self, r: &mut Renderer<'_>, id: NodeId) -> RenderResult {
        r.required(id, "tables", self.tables.first().copied())?;
        r.keyword("DROP TABLE ");
        if self.if_exists {
            r.keyword("IF EXISTS ");
        }
        r.join(&self.tables, ", ")?;
        if self.cascade {
            r.keyword(" CASCADE");
        }
        if self.purge {
            r.keyword(" PURGE");
        }
        Ok(())
    }
}

/// `GRANT privileges [ON resource] TO users`.
impl Render for Grant {
    fn render(&self, r: &mut Renderer<'_>, id: NodeId) -> RenderResult {
        r.required(id, "users", self.users.first().copied())?;
        r.keyword("GRANT ");
        let privileges = self.privileges.join(", ");
        r.keyword(&privileges);
        if let Some(resource) = self.resource {
            r.keyword(" ON ");
            r.accept(resource)?;
        }
        r.keyword(" TO ");
        r.join(&self.users, ", ")?;
        if self.with_grant_option {
            r.keyword(" WITH GRANT OPTION");
        }
        Ok(())
    }
}

impl Render for CreateUser {
    fn render(&self, r: &mut Renderer<'_>, id: NodeId) -> RenderResult {
        let user = r.required(id, "user", self.user)?;
        r.keyword("CREATE USER ");
        r.accept(user)?;
        if let Some(password) = self.password {
            r.keyword(if self.encrypted { " WITH ENCRYPTED PASSWORD " } else { " WITH PASSWORD " });
            r.accept(password)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::RenderConfig, dialect::Standard, renderer::Rendered};
    use sql_ast::{
        Ast,
        kinds::{AllColumn, CharLiteral, Identifier, QueryBlock, SelectItem, TableRef},
    };

    fn render(ast: &Ast, root: NodeId) -> Rendered {
        let config = RenderConfig::default().with_pretty(false);
        let mut r = Renderer::new(ast, &Standard, &config);
        r.render(root).unwrap();
        r.finish()
    }

    fn ident(ast: &mut Ast, name: &str) -> NodeId {
        ast.push(Identifier::new(name)).unwrap()
    }

    #[test]
    fn test_create_index_drops_hive_clauses() {
        let mut ast = Ast::new();
        let name = ident(&mut ast, "idx_email");
        let table = ident(&mut ast, "users");
        let column = ident(&mut ast, "email");
        let handler = ast.push(CharLiteral::new("COMPACT")).unwrap();
        let id = ast
            .push(CreateIndex {
                unique: true,
                concurrently: true,
                name: Some(name),
                table: Some(table),
                using: Some("btree".into()),
                items: vec![column],
                handler: Some(handler),
                deferred_rebuild: true,
                ..Default::default()
            })
            .unwrap();

        let rendered = render(&ast, id);
        assert_eq!(
            rendered.sql,
            "CREATE UNIQUE INDEX CONCURRENTLY idx_email ON users USING btree (email)"
        );
        let dropped: Vec<_> = rendered.diagnostics.iter().filter_map(|d| d.clause).collect();
        assert_eq!(dropped, vec!["handler", "deferred_rebuild"]);
    }

    #[test]
    fn test_create_view() {
        let mut ast = Ast::new();
        let name = ident(&mut ast, "active_users");
        let star = ast.push(AllColumn).unwrap();
        let item = ast.push(SelectItem { expr: Some(star), alias: None }).unwrap();
        let source = ident(&mut ast, "users");
        let from = ast.push(TableRef { name: Some(source), alias: None }).unwrap();
        let query = ast
            .push(QueryBlock {
                items: vec![item],
                from: Some(from),
                ..Default::default()
            })
            .unwrap();
        let id = ast
            .push(CreateView {
                or_replace: true,
                name: Some(name),
                query: Some(query),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(
            render(&ast, id).sql,
            "CREATE OR REPLACE VIEW active_users AS SELECT * FROM users"
        );
    }

    #[test]
    fn test_drop_table() {
        let mut ast = Ast::new();
        let a = ident(&mut ast, "a");
        let b = ident(&mut ast, "b");
        let id = ast
            .push(DropTable {
                if_exists: true,
                tables: vec![a, b],
                cascade: true,
                purge: false,
            })
            .unwrap();
        assert_eq!(render(&ast, id).sql, "DROP TABLE IF EXISTS a, b CASCADE");
    }

    #[test]
    fn test_grant_on_resource() {
        let mut ast = Ast::new();
        let resource = ident(&mut ast, "orders");
        let user = ident(&mut ast, "analyst");
        let id = ast
            .push(Grant {
                privileges: vec!["SELECT".into(), "INSERT".into()],
                resource: Some(resource),
                users: vec![user],
                with_grant_option: true,
            })
            .unwrap();
        assert_eq!(
            render(&ast, id).sql,
            "GRANT SELECT, INSERT ON orders TO analyst WITH GRANT OPTION"
        );
    }

    #[test]
    fn test_create_user() {
        let mut ast = Ast::new();
        let user = ident(&mut ast, "bob");
        let password = ast.push(CharLiteral::new("secret")).unwrap();
        let id = ast
            .push(CreateUser {
                user: Some(user),
                password: Some(password),
                encrypted: true,
            })
            .unwrap();
        assert_eq!(render(&ast, id).sql, "CREATE USER bob WITH ENCRYPTED PASSWORD 'secret'");
    }
}

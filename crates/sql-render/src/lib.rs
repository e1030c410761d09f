//! Dialect-aware rendering of [`sql_ast`] trees back into SQL text.
//!
//! A render walks one statement with a [`Renderer`], asking the configured
//! [`Dialect`] how to spell each node. Output can be pretty or compact,
//! upper- or lower-case, and parameterized, in which case literals become
//! placeholders and their values are returned alongside the text.

pub mod buffer;
pub mod config;
pub mod dialect;
pub mod error;
pub mod renderer;

pub use config::{DialectKind, RenderConfig};
pub use dialect::Dialect;
pub use error::{Diagnostic, DropReason, RenderError, RenderResult};
pub use renderer::{Render, Rendered, Renderer};

use sql_ast::{Ast, NodeId};
use tracing::debug;

/// Renders the statement rooted at `root`.
pub fn render(ast: &Ast, root: NodeId, config: &RenderConfig) -> Result<Rendered, RenderError> {
    let mut renderer = Renderer::new(ast, config.dialect.dialect(), config);
    renderer.render(root)?;
    Ok(renderer.finish())
}

/// Renders every root of `ast` in order, one statement per `;`-terminated
/// block. Parameters and diagnostics are concatenated in the same order.
/// Statements the dialect dropped entirely only contribute diagnostics.
pub fn render_all(ast: &Ast, config: &RenderConfig) -> Result<Rendered, RenderError> {
    let roots = ast.roots();
    debug!(statements = roots.len(), dialect = %config.dialect, "rendering script");

    let mut script = Rendered {
        sql: String::new(),
        params: Vec::new(),
        replaced: 0,
        diagnostics: Vec::new(),
    };
    for root in roots {
        let rendered = render(ast, root, config)?;
        script.diagnostics.extend(rendered.diagnostics);
        // A statement dropped as a whole leaves no empty `;` behind.
        if rendered.sql.is_empty() {
            continue;
        }
        if !script.sql.is_empty() {
            script.sql.push_str(if config.pretty { ";\n\n" } else { "; " });
        }
        script.sql.push_str(&rendered.sql);
        script.params.extend(rendered.params);
        script.replaced += rendered.replaced;
    }
    if !script.sql.is_empty() {
        script.sql.push(';');
    }
    Ok(script)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sql_ast::kinds::{Identifier, IntegerLiteral, LoadData, Show};
    use tracing_test::traced_test;

    #[traced_test]
    #[test]
    fn test_dropped_node_is_logged() {
        let mut ast = Ast::new();
        let expr = ast.push(Identifier::new("search_path")).unwrap();
        let root = ast.push(Show { expr: Some(expr) }).unwrap();

        let rendered = render(&ast, root, &RenderConfig::new(DialectKind::Oracle)).unwrap();
        assert_eq!(rendered.sql, "");
        assert_eq!(rendered.diagnostics.len(), 1);
        assert!(logs_contain("dropped node"));
        assert!(logs_contain("Show"));
    }

    #[traced_test]
    #[test]
    fn test_render_all_keeps_going_after_drops() {
        let mut ast = Ast::new();
        let path = ast.push(Identifier::new("/tmp/in")).unwrap();
        let table = ast.push(Identifier::new("t")).unwrap();
        ast.push(LoadData {
            inpath: Some(path),
            into: Some(table),
            ..Default::default()
        })
        .unwrap();
        ast.push(IntegerLiteral { value: 1 }).unwrap();

        let config = RenderConfig::new(DialectKind::Postgres);
        let script = render_all(&ast, &config).unwrap();
        assert_eq!(script.sql, "1;");
        assert_eq!(script.diagnostics[0].kind, "LoadData");
        assert!(logs_contain("rendering script"));
    }
}

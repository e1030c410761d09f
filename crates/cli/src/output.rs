use crate::error::CliError;
use sql_ast::{Ast, collect_tables};
use sql_render::{RenderConfig, Rendered, render_all};
use tracing::{info, warn};

pub async fn load_tree(path: &str) -> Result<Ast, CliError> {
    let source = tokio::fs::read_to_string(path).await?;
    let ast: Ast = serde_json::from_str(&source)?;
    if ast.is_empty() {
        return Err(CliError::EmptyTree);
    }
    info!(path, nodes = ast.len(), "loaded tree");
    Ok(ast)
}

fn render_script(ast: &Ast, config: &RenderConfig) -> Result<Rendered, CliError> {
    let script = render_all(ast, config)?;
    for diagnostic in &script.diagnostics {
        warn!("{diagnostic}");
    }
    Ok(script)
}

/// The rendered script, followed by the captured parameters as a JSON
/// array when the render was parameterized.
pub fn render_report(ast: &Ast, config: &RenderConfig) -> Result<String, CliError> {
    let script = render_script(ast, config)?;
    if !config.parameterized {
        return Ok(script.sql);
    }
    let params = serde_json::to_string(&script.params).map_err(CliError::JsonSerialize)?;
    Ok(format!("{}\n{params}", script.sql))
}

pub fn fingerprint(ast: &Ast, config: &RenderConfig) -> Result<String, CliError> {
    let config = config.clone().with_parameterized(true);
    Ok(render_script(ast, &config)?.fingerprint())
}

/// Distinct table names across every statement, one per line.
pub fn tables(ast: &Ast) -> Result<String, CliError> {
    let mut names: Vec<String> = Vec::new();
    for root in ast.roots() {
        for name in collect_tables(ast, root)? {
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }
    Ok(names.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sql_ast::AstError;
    use sql_render::DialectKind;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// `SELECT o.id FROM shop.orders o WHERE total > 10` and `SELECT 'x'`
    const TREE: &str = r#"{
        "nodes": [
            { "kind": { "Identifier": { "name": "o" } } },
            { "kind": { "PropertyExpr": { "owner": 0, "name": "id" } } },
            { "kind": { "SelectItem": { "expr": 1 } } },
            { "kind": { "Identifier": { "name": "shop" } } },
            { "kind": { "PropertyExpr": { "owner": 3, "name": "orders" } } },
            { "kind": { "TableRef": { "name": 4, "alias": "o" } } },
            { "kind": { "Identifier": { "name": "total" } } },
            { "kind": { "IntegerLiteral": { "value": 10 } } },
            { "kind": { "BinaryOp": { "left": 6, "op": "Gt", "right": 7 } } },
            { "kind": { "QueryBlock": { "items": [2], "from": 5, "where_clause": 8 } } },
            { "kind": { "CharLiteral": { "text": "x" } } },
            { "kind": { "SelectItem": { "expr": 10 } } },
            { "kind": { "QueryBlock": { "items": [11] } } }
        ]
    }"#;

    fn write_tree(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    async fn tree() -> Ast {
        let file = write_tree(TREE);
        load_tree(&file.path().to_string_lossy()).await.unwrap()
    }

    #[tokio::test]
    async fn test_render_script() {
        let ast = tree().await;
        let config = RenderConfig::new(DialectKind::Postgres).with_pretty(false);
        assert_eq!(
            render_report(&ast, &config).unwrap(),
            "SELECT o.id FROM shop.orders o WHERE total > 10; SELECT 'x';"
        );
    }

    #[tokio::test]
    async fn test_render_parameterized_prints_params() {
        let ast = tree().await;
        let config = RenderConfig::default()
            .with_pretty(false)
            .with_parameterized(true);
        assert_eq!(
            render_report(&ast, &config).unwrap(),
            "SELECT o.id FROM shop.orders o WHERE total > ?; SELECT ?;\n[{\"Int\":10},{\"String\":\"x\"}]"
        );
    }

    #[tokio::test]
    async fn test_fingerprint_ignores_parameterized_flag() {
        let ast = tree().await;
        let plain = fingerprint(&ast, &RenderConfig::default()).unwrap();
        let flagged = fingerprint(&ast, &RenderConfig::default().with_parameterized(true)).unwrap();
        assert_eq!(plain, flagged);
        assert_eq!(plain.len(), 32);
    }

    #[tokio::test]
    async fn test_tables() {
        let ast = tree().await;
        assert_eq!(tables(&ast).unwrap(), "shop.orders");
    }

    #[tokio::test]
    async fn test_deep_tree_reports_an_error() {
        let mut nodes = vec![serde_json::json!({ "kind": { "Identifier": { "name": "t" } } })];
        for index in 0..5_000 {
            nodes.push(serde_json::json!({ "kind": { "ListExpr": { "items": [index] } } }));
        }
        let file = write_tree(&serde_json::json!({ "nodes": nodes }).to_string());
        let ast = load_tree(&file.path().to_string_lossy()).await.unwrap();

        assert!(matches!(
            tables(&ast),
            Err(CliError::Tree(AstError::DepthExceeded { .. }))
        ));
    }

    #[tokio::test]
    async fn test_empty_tree_is_rejected() {
        let file = write_tree(r#"{"nodes": []}"#);
        let result = load_tree(&file.path().to_string_lossy()).await;
        assert!(matches!(result, Err(CliError::EmptyTree)));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let result = load_tree("/nonexistent/tree.json").await;
        assert!(matches!(result, Err(CliError::FileRead(_))));
    }
}

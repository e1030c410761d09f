use sql_ast::AstError;
use sql_render::RenderError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read input file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to deserialize JSON input: {0}")]
    Deserialize(#[from] serde_json::Error),

    #[error("Failed to serialize data to JSON: {0}")]
    JsonSerialize(serde_json::Error),

    #[error("Malformed tree: {0}")]
    Tree(#[from] AstError),

    #[error("Failed to render the tree: {0}")]
    Render(#[from] RenderError),

    #[error("The tree contains no statements")]
    EmptyTree,
}

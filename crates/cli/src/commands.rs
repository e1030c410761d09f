use clap::{Args, Subcommand};
use sql_render::DialectKind;

#[derive(Subcommand)]
pub enum Commands {
    /// Render every statement of a JSON-serialized tree
    Render {
        #[arg(help = "Path to the JSON tree")]
        tree: String,

        #[command(flatten)]
        options: RenderOptions,
    },
    /// Print the md5 fingerprint of the parameterized rendering
    Fingerprint {
        #[arg(help = "Path to the JSON tree")]
        tree: String,

        #[command(flatten)]
        options: RenderOptions,
    },
    /// List the tables referenced by the tree
    Tables {
        #[arg(help = "Path to the JSON tree")]
        tree: String,
    },
}

#[derive(Args, Debug, Default, Clone)]
pub struct RenderOptions {
    #[arg(long, help = "JSON render config file; flags override its fields")]
    pub config: Option<String>,

    /// Target dialect: "standard", "hive", "postgres", "oracle", "mysql"
    #[arg(short, long)]
    pub dialect: Option<DialectKind>,

    #[arg(long, help = "Print keywords in lower case")]
    pub lower: bool,

    #[arg(long, help = "Render each statement on a single line")]
    pub compact: bool,

    #[arg(
        long,
        help = "Replace literals with `?` and print the captured values as JSON"
    )]
    pub parameterized: bool,

    #[arg(long, help = "Indent unit, e.g. \"  \" for two spaces")]
    pub indent: Option<String>,
}

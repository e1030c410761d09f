use crate::error::CliError;
use clap::Parser;
use commands::Commands;
use tracing_subscriber::EnvFilter;

mod commands;
mod error;
mod output;
mod settings;

#[derive(Parser)]
#[command(
    name = "sqlprint",
    version = "0.1.0",
    about = "Render JSON-serialized SQL trees in a target dialect"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    // Logs go to stderr so stdout carries only the rendered output
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render { tree, options } => {
            let config = settings::load(&options).await?;
            let ast = output::load_tree(&tree).await?;
            println!("{}", output::render_report(&ast, &config)?);
        }
        Commands::Fingerprint { tree, options } => {
            let config = settings::load(&options).await?;
            let ast = output::load_tree(&tree).await?;
            println!("{}", output::fingerprint(&ast, &config)?);
        }
        Commands::Tables { tree } => {
            let ast = output::load_tree(&tree).await?;
            let tables = output::tables(&ast)?;
            if !tables.is_empty() {
                println!("{tables}");
            }
        }
    }

    Ok(())
}

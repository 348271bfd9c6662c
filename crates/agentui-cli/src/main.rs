//! CLI entry point - the composition root.
//!
//! Infrastructure is wired together only via [`bootstrap`]; command
//! dispatch routes to handlers which delegate to the MCP service.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use agentui_cli::{Cli, CliConfig, CliError, Commands, bootstrap, handlers};

#[tokio::main]
async fn main() {
    // Load .env from the working directory; the data root's .env is
    // loaded during bootstrap.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        let err = CliError::from_anyhow(err);
        eprintln!("Error: {err}");
        std::process::exit(err.exit_code());
    }
}

/// Log to stderr; `RUST_LOG` takes precedence over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = CliConfig {
        data_dir: cli.data_dir,
    };

    // Diagnostics must work even when the database cannot be opened
    if matches!(cli.command, Commands::Paths) {
        return handlers::paths::execute(&config.data_root()?);
    }

    let ctx = bootstrap(config).await?;

    match cli.command {
        Commands::Server { command } => handlers::server::execute(&ctx, command).await,
        Commands::Tool { command } => handlers::tool::execute(&ctx, command).await,
        Commands::Entity { command } => handlers::entity::execute(&ctx, command).await,
        Commands::Resolve { kind, name, json } => {
            handlers::resolve::execute(&ctx, kind, &name, json).await
        }
        Commands::Export { kind, name, out } => {
            handlers::export::execute(&ctx, kind, &name, out).await
        }
        Commands::Import { kind, files } => handlers::import::execute(&ctx, kind, files).await,
        Commands::Paths => handlers::paths::execute(&ctx.data_root),
    }
}

//! zed - Main entry point

use clap::Parser;
use log::{debug, info};

use zed::{run_config_command, run_describe_command, Cli, Command, ContextStore, ZedError};

async fn run(cli: &Cli) -> Result<(), ZedError> {
    let store = match &cli.config {
        Some(path) => ContextStore::with_path(path.clone()),
        None => ContextStore::new(),
    };
    debug!("Using config store {}", store.path().display());

    match &cli.command {
        Command::Config { action } => run_config_command(action, &store),
        Command::Describe(args) => run_describe_command(cli, args, &store).await,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    info!("Starting zed v{}", env!("CARGO_PKG_VERSION"));
    debug!(
        "CLI args: endpoint={}, context={:?}, tenant={:?}, config={:?}, timeout={:?}",
        cli.endpoint, cli.context, cli.tenant, cli.config, cli.timeout
    );

    if let Err(e) = run(&cli).await {
        debug!("Command failed ({:?})", e.kind());
        eprintln!("Error: {}", e);
        std::process::exit(e.kind().exit_code());
    }
}

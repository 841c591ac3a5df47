use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use dex_router::app;
use dex_router::application::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // Reports go to stdout, logs to stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let app_cfg = app::AppCfg::from_cli(&cli).await?;
    app::run(app_cfg, cli.command).await
}

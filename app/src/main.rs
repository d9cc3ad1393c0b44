use clap::Parser;
use log::debug;

mod cli;

use cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Quiet by default; RUST_LOG=info shows what the services do
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    debug!("Starting still-here {}", env!("CARGO_PKG_VERSION"));

    cli::run(Cli::parse()).await
}

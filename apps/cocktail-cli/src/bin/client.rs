use std::io;

use tracing_subscriber::EnvFilter;

use cocktail_client::{run_loop, HttpSender};
use cocktail_core::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let config = Config::load().map_err(|e| { eprintln!("Error loading config: {}", e); e })?;
    let settings = config.settings()?;
    let sender = HttpSender::new(&settings.client)?;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    run_loop(&mut input, &mut output, &sender).await?;
    Ok(())
}

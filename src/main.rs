use anyhow::Context;
use clap::Parser;
use tracing::info;

use httpd::config::Config;
use httpd::server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();
    info!("starting server.");

    let server = Server::bind(&config)
        .await
        .with_context(|| format!("failed to bind to port {}", config.port))?;
    info!(
        addr = %server.local_addr()?,
        directory = %config.directory.display(),
        "bound tcp server."
    );
    server.run().await;
    Ok(())
}

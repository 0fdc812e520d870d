use std::{io, process::exit, sync::Arc};

use gmail::{Client, Config};
use gmail_mcp::{handler::Handler, server::Server};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // stdout carries the transport, logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    if let Err(err) = run().await {
        error!("{err}");
        exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_config_dir().await?;
    let client = Client::build(&config).await?;

    let handler = Handler::new(Arc::new(client));

    Server::new(handler).listen().await?;

    Ok(())
}

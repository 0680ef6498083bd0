use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shipmentd::config::Config;
use shipmentd::server::Server;
use shipmentd::store::PgStore;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shipmentd=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::parse();

    let store = PgStore::connect(&config.database_url, config.pool_size)?;
    info!("connected to PostgreSQL");

    let server = Server::bind(&config, Arc::new(store))?;
    info!("server started on port {}", config.bind.port());

    server.serve()?;

    Ok(())
}

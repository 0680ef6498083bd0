use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

const DEFAULT_INDEX_CANDIDATES: [&str; 3] = [
    "../frontend/index.html",
    "frontend/index.html",
    "/app/frontend/index.html",
];

/// Runtime configuration, from CLI flags with environment fallbacks.
#[derive(Debug, Parser)]
#[command(name = "shipmentd", about = "HTTP/1.1 CRUD server for shipments")]
pub struct Config {
    /// Address to listen on.
    #[arg(long, env = "SHIPMENTD_BIND", default_value = "0.0.0.0:8080")]
    pub bind: SocketAddr,

    /// PostgreSQL connection string (URL or key=value conninfo).
    #[arg(
        long,
        env = "SHIPMENTD_DATABASE_URL",
        default_value = "host=postgres port=5432 dbname=logistics_db user=logistics_user password=logistics_pass"
    )]
    pub database_url: String,

    /// Candidate location for the index page; may be given multiple
    /// times, tried in order. Empty means the built-in candidates.
    #[arg(long = "index-file", env = "SHIPMENTD_INDEX_FILE", value_name = "PATH")]
    pub index_files: Vec<PathBuf>,

    /// Largest accepted request body, in bytes.
    #[arg(long, env = "SHIPMENTD_MAX_BODY_BYTES", default_value_t = 1024 * 1024)]
    pub max_body_bytes: usize,

    /// Socket read timeout in seconds; 0 disables the timeout.
    #[arg(long, env = "SHIPMENTD_READ_TIMEOUT_SECS", default_value_t = 30)]
    pub read_timeout_secs: u64,

    /// Number of connection worker threads.
    #[arg(long, env = "SHIPMENTD_WORKERS", default_value_t = 16)]
    pub workers: usize,

    /// Database connection pool size.
    #[arg(long, env = "SHIPMENTD_POOL_SIZE", default_value_t = 8)]
    pub pool_size: u32,
}

impl Config {
    pub fn index_candidates(&self) -> Vec<PathBuf> {
        if self.index_files.is_empty() {
            DEFAULT_INDEX_CANDIDATES.iter().map(PathBuf::from).collect()
        } else {
            self.index_files.clone()
        }
    }
}

use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;
use faitness::db::PoolSettings;

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Faitness API - workout and meal tracking server", long_about = None)]
pub struct ServerConfig {
    /// SQLite database file
    #[arg(long, env = "DATABASE_URL", default_value = "faitness.db")]
    pub database_url: String,

    #[arg(long, env = "FAITNESS_BIND", default_value = "127.0.0.1:8000")]
    pub bind: SocketAddr,

    #[arg(long, env = "FAITNESS_POOL_SIZE", default_value_t = 8)]
    pub pool_size: u32,

    /// Seconds to wait for a free pooled connection
    #[arg(long, env = "FAITNESS_POOL_TIMEOUT", default_value_t = 5)]
    pub pool_timeout: u64,

    /// off, error, warn, info, debug or trace
    #[arg(long, env = "FAITNESS_LOG", default_value = "info")]
    pub log_level: String,
}

impl ServerConfig {
    pub fn pool_settings(&self) -> PoolSettings {
        PoolSettings {
            max_size: self.pool_size,
            connection_timeout: Duration::from_secs(self.pool_timeout),
            ..PoolSettings::default()
        }
    }
}

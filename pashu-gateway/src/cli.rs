//! Command-line arguments
//!
//! Every flag falls back to an environment variable (clap `env`), then to
//! the optional TOML file, then to compiled defaults.

use std::path::PathBuf;

use clap::Parser;
use pashu_common::config::{ConfigOverrides, GatewayConfig, TomlConfig};

/// Command-line arguments for pashu-gateway
#[derive(Parser, Debug)]
#[command(name = "pashu-gateway")]
#[command(about = "Multi-module inference gateway for Pashu Mitra")]
#[command(version)]
pub struct Args {
    /// Address to bind
    #[arg(long = "bind", env = "BIND_ADDRESS")]
    pub bind_address: Option<String>,

    /// Port to listen on [default: 8000]
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,

    /// Backing store URL (sqlite://...); auditing is disabled when unset
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Logical store name
    #[arg(long, env = "DATABASE_NAME")]
    pub database_name: Option<String>,

    /// Maximum accepted request body in bytes
    #[arg(long, env = "MAX_UPLOAD_BYTES")]
    pub max_upload_bytes: Option<usize>,

    /// Seconds a store operation may wait for a connection
    #[arg(long, env = "STORE_TIMEOUT_SECS")]
    pub store_timeout_secs: Option<u64>,

    /// Optional TOML configuration file
    #[arg(short, long, env = "PASHU_CONFIG")]
    pub config: Option<PathBuf>,
}

impl Args {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            bind_address: self.bind_address.clone(),
            port: self.port,
            database_url: self.database_url.clone(),
            database_name: self.database_name.clone(),
            max_upload_bytes: self.max_upload_bytes,
            store_timeout_secs: self.store_timeout_secs,
        }
    }

    /// Resolve the full configuration (reads the TOML file if given)
    pub fn resolve(&self) -> pashu_common::Result<GatewayConfig> {
        let file = match &self.config {
            Some(path) => TomlConfig::load(path)?,
            None => TomlConfig::default(),
        };
        Ok(GatewayConfig::resolve(self.overrides(), file))
    }
}

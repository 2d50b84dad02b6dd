//! Shopfront server binary.

use anyhow::Result;
use clap::Parser;
use shopfront_server::{init_tracing, LogFormat, ServerConfig};

/// Shopfront - cart, checkout and discount API
#[derive(Parser)]
#[command(name = "shopfront")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file path (.toml or .json)
    #[arg(short, long, env = "SHOPFRONT_CONFIG")]
    config: Option<String>,

    /// Interface to bind
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// Completed orders between discount codes
    #[arg(short = 'n', long)]
    discount_every: Option<i64>,

    /// Log format (human or json)
    #[arg(long)]
    log_format: Option<LogFormat>,

    /// Log filter directive, overridden by SHOPFRONT_LOG
    #[arg(long)]
    log_filter: Option<String>,

    /// Disable permissive CORS
    #[arg(long)]
    no_cors: bool,
}

impl Cli {
    /// Resolve the effective config: file first, then flags.
    fn into_config(self) -> Result<ServerConfig> {
        let mut config = match self.config.as_deref() {
            Some(path) => ServerConfig::load(path)?,
            None => ServerConfig::default(),
        };

        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(n) = self.discount_every {
            config.discount_every = n;
        }
        if let Some(format) = self.log_format {
            config.log_format = format;
        }
        if let Some(filter) = self.log_filter {
            config.log_filter = filter;
        }
        if self.no_cors {
            config.cors = false;
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Cli::parse().into_config()?;
    init_tracing(config.log_format, &config.log_filter)?;

    shopfront_server::serve(&config).await
}

use anyhow::Context;
use std::net::SocketAddr;

use crate::build_sqlite_url;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Startup settings, read once from the environment.
///
/// * `DATABASE_URL` - sqlite file path or url, `sqlite::memory:` is passed through
/// * `BIND_ADDR` - listen address, defaults to `127.0.0.1:3000`
///
/// Log verbosity comes from `RUST_LOG` (see [`crate::logging::init_tracing`]).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = build_sqlite_url().context("build sqlite DATABASE_URL")?;
        let bind = std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = parse_bind_addr(&bind)?;
        Ok(Self { database_url, bind_addr })
    }
}

fn parse_bind_addr(raw: &str) -> anyhow::Result<SocketAddr> {
    raw.parse()
        .with_context(|| format!("parse BIND_ADDR {:?}", raw))
}

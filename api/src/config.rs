use std::env;

use anyhow::Context;

pub const DEFAULT_PAGE_SIZE: u64 = 12;
pub const MAX_PAGE_SIZE: u64 = 100;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Page size used when a listing request doesn't specify one
    pub default_page_size: u64,
    /// Upper bound for client-requested page sizes
    pub max_page_size: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let port = parse_or("PORT", 8080)?;
        let max_page_size = parse_or("MAX_PAGE_SIZE", MAX_PAGE_SIZE)?.max(1);
        let default_page_size = parse_or("DEFAULT_PAGE_SIZE", DEFAULT_PAGE_SIZE)?
            .clamp(1, max_page_size);

        Ok(Self {
            database_url,
            port,
            default_page_size,
            max_page_size,
        })
    }

    /// Resolve a requested page size against the configured default and limit
    pub fn page_size(&self, requested: Option<u64>) -> u64 {
        requested
            .unwrap_or(self.default_page_size)
            .clamp(1, self.max_page_size)
    }
}

fn parse_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("{} has an invalid value: {}", key, raw)),
        Err(_) => Ok(default),
    }
}

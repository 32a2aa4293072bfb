use anyhow::Context;
use serde::Deserialize;

/// Production bcrypt cost.
pub const BCRYPT_COST: u32 = 10;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub host: String,
    pub port: u16,
    pub bcrypt_cost: u32,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key/value source. `from_env` passes the
    /// process environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = match lookup("DATABASE_URL") {
            Some(url) => url,
            None => {
                let host = lookup("DB_HOST").unwrap_or_else(|| "localhost".into());
                let port = lookup("DB_PORT").unwrap_or_else(|| "5432".into());
                let user = lookup("DB_USER").unwrap_or_else(|| "postgres".into());
                let password = lookup("DB_PASSWORD").unwrap_or_default();
                let name = lookup("DB_NAME").context("DATABASE_URL or DB_NAME must be set")?;
                format!("postgres://{user}:{password}@{host}:{port}/{name}")
            }
        };

        let secret = lookup("JWT_SECRET")
            .or_else(|| lookup("ACCESS_TOKEN_SECRET"))
            .filter(|s| !s.is_empty())
            .context("JWT_SECRET must be set")?;

        let jwt = JwtConfig {
            secret,
            ttl_minutes: lookup("JWT_TTL_MINUTES")
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60),
        };

        let port = match lookup("APP_PORT").or_else(|| lookup("PORT")) {
            Some(v) => v.parse::<u16>().with_context(|| format!("invalid port {v:?}"))?,
            None => 8080,
        };

        let bcrypt_cost = match lookup("BCRYPT_COST") {
            Some(v) => v
                .parse::<u32>()
                .with_context(|| format!("invalid BCRYPT_COST {v:?}"))?,
            None => BCRYPT_COST,
        };

        Ok(Self {
            database_url,
            jwt,
            host: lookup("APP_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port,
            bcrypt_cost,
        })
    }
}

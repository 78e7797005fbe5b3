use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub db_max_connections: u32,
    pub host: String,
    pub port: u16,
    pub jwt: JwtConfig,
}

const DEFAULT_TTL_MINUTES: i64 = 60 * 24 * 7;
/// Upper bound for `JWT_TTL_MINUTES` (one year).
pub const MAX_TTL_MINUTES: i64 = 60 * 24 * 365;

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup; `from_env` passes the process env.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &str| lookup(key).with_context(|| format!("{key} must be set"));
        let parsed = |key: &str| lookup(key).and_then(|v| v.trim().parse::<i64>().ok());

        let jwt = JwtConfig {
            secret: require("JWT_SECRET")?,
            issuer: lookup("JWT_ISSUER").unwrap_or_else(|| "freelancer-platform".into()),
            audience: lookup("JWT_AUDIENCE")
                .unwrap_or_else(|| "freelancer-platform-users".into()),
            ttl_minutes: parsed("JWT_TTL_MINUTES")
                .filter(|m| *m > 0)
                .map(|m| m.min(MAX_TTL_MINUTES))
                .unwrap_or(DEFAULT_TTL_MINUTES),
        };

        let port = lookup("APP_PORT")
            .or_else(|| lookup("PORT"))
            .and_then(|v| v.trim().parse::<u16>().ok())
            .unwrap_or(5000);

        Ok(Self {
            database_url: require("DATABASE_URL")?,
            db_max_connections: parsed("DB_MAX_CONNECTIONS")
                .and_then(|n| u32::try_from(n).ok())
                .filter(|n| *n > 0)
                .unwrap_or(10),
            host: lookup("APP_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port,
            jwt,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

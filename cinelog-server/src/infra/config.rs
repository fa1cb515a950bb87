use anyhow::Context;

/// Listener settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Runtime configuration, resolved from the environment at startup.
///
/// Missing required values are fatal here, before any resource is
/// opened, so operators get one actionable message instead of a failed
/// request later.
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database_url: String,
    pub jwt_secret: String,
    /// CORS allow-list; empty means permissive (development posture).
    pub cors_allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")
            .context("DATABASE_URL must be set (postgres://...)")?;

        let jwt_secret =
            std::env::var("JWT_SECRET").context("JWT_SECRET must be set")?;
        anyhow::ensure!(
            jwt_secret.len() >= 32,
            "JWT_SECRET must be at least 32 bytes"
        );

        let mut server = ServerConfig::default();
        if let Ok(host) = std::env::var("SERVER_HOST") {
            server.host = host;
        }
        if let Ok(port) = std::env::var("SERVER_PORT") {
            server.port = port
                .parse()
                .with_context(|| format!("SERVER_PORT is not a valid port: {port}"))?;
        }

        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(|origin| origin.trim().to_string())
                    .filter(|origin| !origin.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            server,
            database_url,
            jwt_secret,
            cors_allowed_origins,
        })
    }
}

use std::env;
use std::time::Duration;

/// Settings shared by every command. `serve` additionally reads [`AppConfig`].
#[derive(Debug, Clone)]
pub struct Config {
    pub index: IndexConfig,
    pub swagger: SwaggerConfig,
}

/// Settings for the `serve` command
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
}

/// Where and how the region index is fetched
#[derive(Debug, Clone)]
pub struct IndexConfig {
    pub url: String,
    pub request_timeout: Duration,
    pub user_agent: String,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub title: String,
    pub version: String,
    pub description: String,
}

/// Load `.env` if it exists. Call once, before anything reads the environment.
pub fn load_dotenv() {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Warning: Error loading .env file: {}", e);
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Ok(Config {
            index: IndexConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
        })
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = parse_port(env::var("PORT").ok().as_deref())?;

        let cors_allowed_origins = parse_origins(
            &env::var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|_| "*".to_string()),
        );

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl IndexConfig {
    pub const DEFAULT_URL: &'static str = "https://download.geofabrik.de/index-v1-nogeom.json";
    const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

    pub fn from_env() -> Result<Self, String> {
        let url = env::var("GEOFABRIK_INDEX_URL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| Self::DEFAULT_URL.to_string());

        let request_timeout_secs = env::var("INDEX_REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_REQUEST_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "INDEX_REQUEST_TIMEOUT_SECS must be a valid number".to_string())?;

        let user_agent =
            env::var("INDEX_USER_AGENT").unwrap_or_else(|_| Self::default_user_agent());

        Ok(Self {
            url,
            request_timeout: Duration::from_secs(request_timeout_secs),
            user_agent,
        })
    }

    fn default_user_agent() -> String {
        format!("geofabrik-regions/{}", env!("CARGO_PKG_VERSION"))
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            url: Self::DEFAULT_URL.to_string(),
            request_timeout: Duration::from_secs(Self::DEFAULT_REQUEST_TIMEOUT_SECS),
            user_agent: Self::default_user_agent(),
        }
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "Geofabrik Regions API".to_string());
        let version =
            env::var("SWAGGER_VERSION").unwrap_or_else(|_| env!("CARGO_PKG_VERSION").to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "Flattened listing of the Geofabrik region catalog".to_string());

        Ok(Self {
            title,
            version,
            description,
        })
    }
}

fn parse_port(raw: Option<&str>) -> Result<u16, String> {
    raw.unwrap_or("3000")
        .parse::<u16>()
        .map_err(|e| format!("Invalid PORT: {}", e))
}

/// Parse a comma-separated origin list, dropping blanks
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins() {
        assert_eq!(parse_origins("*"), vec!["*".to_string()]);
        assert_eq!(
            parse_origins(" http://a.test , ,http://b.test"),
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
        assert!(parse_origins("").is_empty());
    }

    #[test]
    fn test_index_config_default() {
        let config = IndexConfig::default();
        assert_eq!(config.url, IndexConfig::DEFAULT_URL);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert!(config.user_agent.starts_with("geofabrik-regions/"));
    }

    #[test]
    fn test_parse_port() {
        assert_eq!(parse_port(None), Ok(3000));
        assert_eq!(parse_port(Some("8080")), Ok(8080));
        assert!(parse_port(Some("not-a-port")).is_err());
    }

    #[test]
    fn test_shared_config_ignores_port() {
        // PORT belongs to `serve` only; the shared config must not read it
        std::env::set_var("PORT", "not-a-port");
        let config = Config::from_env();
        std::env::remove_var("PORT");

        assert!(config.is_ok());
    }

    #[test]
    fn test_server_address() {
        let app = AppConfig {
            host: "0.0.0.0".to_string(),
            port: 8080,
            cors_allowed_origins: vec![],
        };
        assert_eq!(app.server_address(), "0.0.0.0:8080");
    }
}

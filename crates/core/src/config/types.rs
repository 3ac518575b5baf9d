use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    pub ratings: RatingsConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    8080
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("movies.db")
}

/// Ratings service configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RatingsConfig {
    /// Endpoint that accepts a JSON array of movie ids (e.g., "http://localhost:8081/ratings")
    pub url: String,
    /// Request timeout in seconds (default: 5)
    #[serde(default = "default_ratings_timeout")]
    pub timeout_secs: u64,
}

fn default_ratings_timeout() -> u64 {
    5
}

/// Sanitized config for API responses
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub ratings: SanitizedRatingsConfig,
}

/// Ratings config without the endpoint's query string, which may carry credentials.
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedRatingsConfig {
    pub url: String,
    pub timeout_secs: u64,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        let url = config
            .ratings
            .url
            .split('?')
            .next()
            .unwrap_or_default()
            .to_string();

        Self {
            server: config.server.clone(),
            database: config.database.clone(),
            ratings: SanitizedRatingsConfig {
                url,
                timeout_secs: config.ratings.timeout_secs,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 9000

[database]
path = "/data/movies.db"

[ratings]
url = "http://ratings.local/api/ratings"
timeout_secs = 2
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host.to_string(), "127.0.0.1");
        assert_eq!(config.database.path.to_str().unwrap(), "/data/movies.db");
        assert_eq!(config.ratings.url, "http://ratings.local/api/ratings");
        assert_eq!(config.ratings.timeout_secs, 2);
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let toml = r#"
[ratings]
url = "http://localhost:8081/ratings"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host.to_string(), "0.0.0.0");
        assert_eq!(config.database.path.to_str().unwrap(), "movies.db");
        assert_eq!(config.ratings.timeout_secs, 5);
    }

    #[test]
    fn test_deserialize_missing_ratings_fails() {
        let toml = r#"
[server]
port = 8080
"#;
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_sanitized_config_strips_query_string() {
        let config = Config {
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            ratings: RatingsConfig {
                url: "http://ratings.local/ratings?token=secret".to_string(),
                timeout_secs: 5,
            },
        };
        let sanitized = SanitizedConfig::from(&config);
        assert_eq!(sanitized.ratings.url, "http://ratings.local/ratings");
        assert_eq!(sanitized.server.port, 8080);

        let json = serde_json::to_string(&sanitized).unwrap();
        assert!(!json.contains("secret"));
    }
}

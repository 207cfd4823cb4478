use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use crate::cache::keys::MASTERY_TTL;
use crate::planning::graph::DEFAULT_GRAPH_PATH;

const DEFAULT_LOG_DIR: &str = "./logs";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub log_level: String,
    pub graph_path: PathBuf,
    pub redis_url: Option<String>,
    pub mastery_ttl: Duration,
    pub file_logs: bool,
    pub log_dir: PathBuf,
    pub app_version: String,
}

impl Config {
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(8000);

        let host = std::env::var("HOST")
            .ok()
            .and_then(|value| value.parse::<IpAddr>().ok())
            .unwrap_or(IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)));

        let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let graph_path = std::env::var("KNOWLEDGE_GRAPH_PATH")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_GRAPH_PATH));

        let redis_url = std::env::var("REDIS_URL")
            .ok()
            .filter(|value| !value.trim().is_empty());

        let mastery_ttl = std::env::var("MASTERY_TTL_SECS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(MASTERY_TTL);

        let file_logs = std::env::var("ENABLE_FILE_LOGS")
            .map(|value| parse_flag(&value))
            .unwrap_or(false);

        let log_dir = std::env::var("LOG_DIR")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR));

        let app_version = std::env::var("APP_VERSION")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());

        Self {
            host,
            port,
            log_level,
            graph_path,
            redis_url,
            mastery_ttl,
            file_logs,
            log_dir,
            app_version,
        }
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)),
            port: 8000,
            log_level: "info".to_string(),
            graph_path: PathBuf::from(DEFAULT_GRAPH_PATH),
            redis_url: None,
            mastery_ttl: MASTERY_TTL,
            file_logs: false,
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes")
}

//! Server configuration from command-line flags and environment.
//!
//! Every flag has a `TASKBOARD_*` environment fallback so the binary can be
//! configured without arguments in containers.

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use taskboard_core::default_log_level;

/// Runtime configuration for the HTTP server.
#[derive(Debug, Clone, Parser)]
#[command(name = "taskboard_server", version, about = "Task board HTTP backend")]
pub struct ServerConfig {
    /// Socket address to listen on.
    #[arg(long, env = "TASKBOARD_BIND", default_value = "127.0.0.1:8081")]
    pub bind: SocketAddr,

    /// SQLite database file. Created and migrated on startup.
    #[arg(long, env = "TASKBOARD_DB_PATH", default_value = "taskboard.sqlite3")]
    pub db_path: PathBuf,

    /// The single front-end origin allowed by CORS.
    #[arg(
        long,
        env = "TASKBOARD_ALLOWED_ORIGIN",
        default_value = "http://localhost:5173"
    )]
    pub allowed_origin: String,

    /// trace|debug|info|warn|error. Defaults by build mode.
    #[arg(long, env = "TASKBOARD_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Absolute directory for rolling log files. Logs go to stderr when unset.
    #[arg(long, env = "TASKBOARD_LOG_DIR")]
    pub log_dir: Option<String>,
}

impl ServerConfig {
    /// Effective log level.
    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(default_log_level())
    }
}

#[cfg(test)]
mod tests {
    use super::ServerConfig;
    use clap::Parser;
    use taskboard_core::default_log_level;

    #[test]
    fn flags_override_defaults() {
        let config = ServerConfig::try_parse_from([
            "taskboard_server",
            "--bind",
            "0.0.0.0:9000",
            "--db-path",
            "/tmp/board.db",
            "--allowed-origin",
            "https://boards.example.com",
            "--log-level",
            "warn",
        ])
        .unwrap();

        assert_eq!(config.bind.port(), 9000);
        assert_eq!(config.db_path.to_str(), Some("/tmp/board.db"));
        assert_eq!(config.allowed_origin, "https://boards.example.com");
        assert_eq!(config.log_level(), "warn");
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn log_level_falls_back_to_build_default() {
        let config = ServerConfig::try_parse_from(["taskboard_server"]).unwrap();

        assert_eq!(config.log_level(), default_log_level());
        assert_eq!(config.bind.port(), 8081);
        assert_eq!(config.allowed_origin, "http://localhost:5173");
    }

    #[test]
    fn rejects_malformed_bind_address() {
        let result = ServerConfig::try_parse_from(["taskboard_server", "--bind", "not-an-addr"]);
        assert!(result.is_err());
    }
}

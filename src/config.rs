use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "httpd")]
#[command(about = "Minimal HTTP/1.1 server with echo, user-agent and file routes")]
#[command(version)]
pub struct Config {
    /// Directory served and written by the /files/ route
    #[arg(long, default_value = ".", env = "HTTPD_DIRECTORY")]
    pub directory: PathBuf,

    /// Address to listen on
    #[arg(long, default_value = "0.0.0.0", env = "HTTPD_HOST")]
    pub host: String,

    #[arg(short, long, default_value_t = 4221, env = "HTTPD_PORT")]
    pub port: u16,

    /// Maximum level of log events (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "HTTPD_LOG_LEVEL")]
    pub log_level: tracing::Level,
}

impl Config {
    pub fn address(&self) -> (&str, u16) {
        (&self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::parse_from(["httpd"]);
        assert_eq!(config.directory, PathBuf::from("."));
        assert_eq!(config.address(), ("0.0.0.0", 4221));
        assert_eq!(config.log_level, tracing::Level::INFO);
    }

    #[test]
    fn test_flags() {
        let config = Config::parse_from([
            "httpd",
            "--directory",
            "/tmp/data/",
            "--port",
            "8080",
            "--log-level",
            "debug",
        ]);
        assert_eq!(config.directory, PathBuf::from("/tmp/data/"));
        assert_eq!(config.port, 8080);
        assert_eq!(config.log_level, tracing::Level::DEBUG);
    }
}

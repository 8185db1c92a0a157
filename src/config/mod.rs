// Configuration module entry point
// Loads server, logging and content settings from file, environment and defaults

mod types;

use std::net::SocketAddr;

// Re-export public types
pub use types::{Config, ContentConfig, LoggingConfig, ServerConfig};

impl Config {
    /// Load configuration from specified file path (extension optional)
    ///
    /// A missing file is not an error; defaults and `YARHS_` environment
    /// variables (e.g. `YARHS_CONTENT__MAX_BUFFER_SIZE`) fill the rest.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("YARHS")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("server.root", "static")?
            .set_default("server.index_files", vec!["index.html", "index.htm"])?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("content.max_buffer_size", 1_048_576)?
            .set_default("content.etags", true)?
            .set_default("content.default_content_type", "application/octet-stream")?
            .set_default("content.stream_chunk_size", 16_384)?
            .build()?;

        settings.try_deserialize()
    }

    /// Load from `config.toml` in the working directory
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_defaults_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent");
        let cfg = Config::load_from(path.to_str().unwrap()).unwrap();

        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.server.index_files, vec!["index.html", "index.htm"]);
        assert_eq!(cfg.content.max_buffer_size, 1_048_576);
        assert!(cfg.content.etags);
        assert_eq!(cfg.content.stream_chunk_size, 16_384);
        assert_eq!(cfg.logging.access_log_file, None);
        assert!(cfg.get_socket_addr().is_ok());
    }

    #[test]
    fn test_file_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("server.toml");
        fs::write(
            &path,
            r#"
[server]
port = 9090
root = "public"

[content]
max_buffer_size = -1
etags = false
"#,
        )
        .unwrap();

        let cfg = Config::load_from(path.to_str().unwrap()).unwrap();
        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.server.root, "public");
        assert!(!cfg.content.etags);
        assert!(!cfg.content.buffer_policy().permits(1));
    }

    #[test]
    fn test_default_content_config() {
        let content = ContentConfig::default();
        assert!(content.buffer_policy().permits(1_048_576));
        assert!(!content.buffer_policy().permits(1_048_577));
    }

    #[test]
    fn test_load_reads_working_directory_config() {
        // tests run from the package root, next to the shipped config.toml
        let cfg = Config::load().unwrap();
        assert_eq!(cfg.server.root, "static");
        assert_eq!(cfg.content.default_content_type, "application/octet-stream");
    }

    #[test]
    fn test_invalid_addr() {
        let mut cfg = Config::load_from("definitely/not/here").unwrap();
        cfg.server.host = "not an ip".to_string();
        assert!(cfg.get_socket_addr().is_err());
    }
}

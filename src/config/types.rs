// Configuration types module
// Defines all configuration-related data structures

use crate::content::BufferPolicy;
use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub content: ContentConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
    /// Directory served as the document root
    pub root: String,
    pub index_files: Vec<String>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

/// Content descriptor configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ContentConfig {
    /// Largest resource served from memory, in bytes; -1 always streams
    pub max_buffer_size: i64,
    /// Emit weak `ETag` headers
    pub etags: bool,
    /// Content-Type for files with no known extension
    pub default_content_type: String,
    /// Read size for streamed transfers
    #[serde(default = "default_stream_chunk_size")]
    pub stream_chunk_size: usize,
}

#[allow(clippy::missing_const_for_fn)]
fn default_stream_chunk_size() -> usize {
    16 * 1024
}

impl ContentConfig {
    pub const fn buffer_policy(&self) -> BufferPolicy {
        BufferPolicy::new(self.max_buffer_size)
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            max_buffer_size: 1_048_576,
            etags: true,
            default_content_type: "application/octet-stream".to_string(),
            stream_chunk_size: default_stream_chunk_size(),
        }
    }
}

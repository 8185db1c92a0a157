// Server module entry point
// Accept loop with graceful stop on Ctrl-C

pub mod connection;
pub mod listener;

use std::sync::Arc;

use crate::config::Config;
use crate::logger;

pub use listener::bind_listener;

/// Bind the configured address and serve until Ctrl-C
pub async fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = config.get_socket_addr()?;
    let listener = bind_listener(addr)?;
    logger::log_server_start(&addr, &config);

    let config = Arc::new(config);
    loop {
        tokio::select! {
            accepted = listener.accept() => match accepted {
                Ok((stream, peer_addr)) => {
                    connection::spawn_connection(stream, peer_addr, &config);
                }
                Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
            },
            _ = tokio::signal::ctrl_c() => {
                logger::log_info("Shutdown signal received, no longer accepting connections");
                return Ok(());
            }
        }
    }
}

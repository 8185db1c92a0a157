//! Logger module
//!
//! Server lifecycle, access, transfer and error logging. Before [`init`] is
//! called, messages go to stdout/stderr.

pub mod writer;

use crate::config::Config;
use crate::http::TransferStrategy;
use std::net::SocketAddr;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

fn write_info(message: &str) {
    match writer::get() {
        Some(w) => w.write_info(message),
        None => println!("{message}"),
    }
}

fn write_error(message: &str) {
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    write_info("======================================");
    write_info(&format!("Serving {} on http://{addr}", config.server.root));
    write_info(&format!("Log level: {}", config.logging.level));
    if let Some(workers) = config.server.workers {
        write_info(&format!("Worker threads: {workers}"));
    }
    match config.content.max_buffer_size {
        max if max < 0 => write_info("In-memory buffering: disabled"),
        max => write_info(&format!("In-memory buffering: up to {max} bytes")),
    }
    write_info(&format!("ETags: {}", config.content.etags));
    write_info("======================================");
}

pub fn log_info(message: &str) {
    write_info(&format!("[INFO] {message}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_access(method: &str, path: &str, status: u16, strategy: Option<TransferStrategy>) {
    let strategy = strategy.map_or("-", |s| match s {
        TransferStrategy::DirectBuffer => "direct",
        TransferStrategy::IndirectBuffer => "indirect",
        TransferStrategy::Streamed => "stream",
    });
    write_info(&format!("[Access] {method} {path} {status} {strategy}"));
}

/// Log the end of a streamed transfer
pub fn log_transfer(path: &str, result: &std::io::Result<u64>) {
    match result {
        Ok(bytes) => write_info(&format!("[Transfer] {path}: {bytes} bytes streamed")),
        Err(e) => log_warning(&format!("[Transfer] {path}: aborted: {e}")),
    }
}

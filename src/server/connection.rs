// Connection handling module
// Serves one accepted TCP connection with hyper's HTTP/1 implementation

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::sync::Arc;

use crate::config::Config;
use crate::handler;
use crate::logger;

/// Serve a connection in a spawned task.
///
/// Keep-alive is enabled; each request is dispatched to
/// [`handler::handle_request`].
pub fn spawn_connection(stream: tokio::net::TcpStream, peer_addr: SocketAddr, config: &Arc<Config>) {
    let config = Arc::clone(config);
    tokio::spawn(async move {
        let io = TokioIo::new(stream);
        let service = service_fn(move |req| handler::handle_request(req, Arc::clone(&config)));

        if let Err(err) = http1::Builder::new()
            .keep_alive(true)
            .serve_connection(io, service)
            .await
        {
            logger::log_connection_error(&err);
            logger::log_info(&format!("Connection from {peer_addr} closed with error"));
        }
    });
}

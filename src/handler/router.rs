//! Request dispatch module
//!
//! Entry point for HTTP request processing: method validation, path
//! resolution and static file serving.

use crate::config::Config;
use crate::handler::static_files;
use crate::http::{self, ResponseBody};
use crate::logger;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::sync::Arc;

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    config: Arc<Config>,
) -> Result<Response<ResponseBody>, Infallible> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let (response, strategy) = match method {
        Method::GET | Method::HEAD => {
            match static_files::resolve_path(
                &config.server.root,
                &path,
                &config.server.index_files,
            ) {
                Some(file_path) => {
                    static_files::serve_file(file_path, &config.content, method == Method::HEAD)
                        .await
                }
                None => (http::build_404_response(), None),
            }
        }
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            (http::build_405_response(), None)
        }
    };

    if config.logging.access_log {
        logger::log_access(method.as_str(), &path, response.status().as_u16(), strategy);
    }
    Ok(response)
}

//! Static file serving module
//!
//! Resolves request paths under the document root and serves them through
//! content descriptors: a shared buffer when the buffering policy permits,
//! a streamed copy otherwise.

use crate::config::ContentConfig;
use crate::content::{HttpContent, ResourceContent};
use crate::error::Result;
use crate::http::response::{self, empty_body, full_body, Transfer};
use crate::http::{ContentBody, ResponseBody, TransferStrategy};
use crate::logger;
use crate::resource::{FileResource, Stream};
use hyper::body::Bytes;
use hyper::header::CONTENT_LENGTH;
use hyper::http::response::Builder;
use hyper::Response;
use http_body_util::BodyExt;
use std::io;
use std::path::{Path, PathBuf};

/// Resolve a request path to a file under `root`, trying index files for directories
///
/// Returns `None` for missing files and for paths escaping the root.
pub fn resolve_path(root: &str, request_path: &str, index_files: &[String]) -> Option<PathBuf> {
    let root_canonical = match Path::new(root).canonicalize() {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Document root not found or inaccessible '{root}': {e}"
            ));
            return None;
        }
    };

    let mut file_path = root_canonical.join(request_path.trim_start_matches('/'));
    if file_path.is_dir() {
        file_path = index_files
            .iter()
            .map(|index| file_path.join(index))
            .find(|candidate| candidate.is_file())?;
    }

    // File not found is common (404), no need to log
    let canonical = file_path.canonicalize().ok()?;
    if !canonical.starts_with(&root_canonical) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {} -> {}",
            request_path,
            canonical.display()
        ));
        return None;
    }

    canonical.is_file().then_some(canonical)
}

/// Build the descriptor for a resolved file
pub fn open_content(file_path: &Path, config: &ContentConfig) -> ResourceContent {
    let extension = file_path.extension().and_then(|e| e.to_str());
    let content_type = crate::http::mime::lookup_content_type(extension)
        .unwrap_or(config.default_content_type.as_str());
    ResourceContent::with_options(
        FileResource::new(file_path),
        Some(content_type),
        config.buffer_policy(),
        config.etags,
    )
}

/// Response parts decided on a blocking thread
enum Prepared {
    Head(Builder),
    Buffered(Builder, Bytes),
    Streamed {
        builder: Builder,
        content: ResourceContent,
        stream: Stream,
        /// Advertised `Content-Length`, if any
        length: Option<u64>,
    },
}

/// Serve a resolved file
///
/// Returns the response and the transfer strategy used for its body.
pub async fn serve_file(
    file_path: PathBuf,
    config: &ContentConfig,
    is_head: bool,
) -> (Response<ResponseBody>, Option<TransferStrategy>) {
    let task_config = config.clone();
    let task_path = file_path.clone();
    let prepared =
        tokio::task::spawn_blocking(move || prepare(&task_path, &task_config, is_head)).await;

    let prepared = match prepared {
        Ok(Ok(p)) => p,
        Ok(Err(e)) => {
            logger::log_error(&format!("Failed to serve '{}': {e}", file_path.display()));
            return (error_response(&e), None);
        }
        Err(e) => {
            logger::log_error(&format!("Serving task for '{}' failed: {e}", file_path.display()));
            return (response::build_500_response(), None);
        }
    };

    match prepared {
        Prepared::Head(builder) => (response::finish(builder, empty_body(), "200"), None),
        Prepared::Buffered(builder, data) => (
            response::finish(builder, full_body(data), "200"),
            Some(TransferStrategy::DirectBuffer),
        ),
        Prepared::Streamed {
            builder,
            content,
            stream,
            length,
        } => {
            let (sender, body) = ContentBody::channel();
            let chunk_size = config.stream_chunk_size;
            let label = file_path.display().to_string();
            tokio::task::spawn_blocking(move || {
                let result = sender.pump(stream, chunk_size, length);
                if let Err(e) = &result {
                    sender.fail(io::Error::new(e.kind(), e.to_string()));
                }
                content.release();
                logger::log_transfer(&label, &result);
            });
            (
                response::finish(builder, body.boxed_unsync(), "200"),
                Some(TransferStrategy::Streamed),
            )
        }
    }
}

fn prepare(file_path: &Path, config: &ContentConfig, is_head: bool) -> Result<Prepared> {
    let content = open_content(file_path, config);

    let builder = match response::content_response_builder(&content) {
        Ok(b) => b,
        Err(e) => {
            content.release();
            return Err(e);
        }
    };
    if is_head {
        content.release();
        return Ok(Prepared::Head(builder));
    }

    match response::plan_transfer(&content, TransferStrategy::DirectBuffer) {
        Ok(Transfer::Buffered(data)) => {
            content.release();
            return Ok(Prepared::Buffered(builder, data));
        }
        Ok(Transfer::Streamed) => {}
        Err(e) => logger::log_warning(&format!(
            "Buffering '{}' failed, streaming instead: {e}",
            file_path.display()
        )),
    }

    let length = builder
        .headers_ref()
        .and_then(|headers| headers.get(CONTENT_LENGTH))
        .and_then(|value| value.to_str().ok()?.parse().ok());
    match content.open_stream() {
        Ok(stream) => Ok(Prepared::Streamed {
            builder,
            content,
            stream,
            length,
        }),
        Err(e) => {
            content.release();
            Err(e)
        }
    }
}

fn error_response(err: &crate::error::ContentError) -> Response<ResponseBody> {
    match err {
        crate::error::ContentError::Io(e) if e.kind() == io::ErrorKind::NotFound => {
            response::build_404_response()
        }
        _ => response::build_500_response(),
    }
}

//! HTTP response building module
//!
//! Maps a content descriptor onto a response: headers from its metadata and
//! a body from one of the transfer strategies.

use crate::content::HttpContent;
use crate::error::Result;
use crate::http::header;
use crate::resource::BufferMode;
use http_body_util::combinators::UnsyncBoxBody;
use http_body_util::{BodyExt, Empty, Full};
use hyper::body::Bytes;
use hyper::http::response::Builder;
use hyper::Response;
use std::io;

/// Body type shared by buffered and streamed responses
pub type ResponseBody = UnsyncBoxBody<Bytes, io::Error>;

/// How the response body is transferred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferStrategy {
    /// Write a shared, read-only buffer (cacheable, zero-copy where the resource allows)
    DirectBuffer,
    /// Write a privately owned buffer
    IndirectBuffer,
    /// Copy the resource stream chunk by chunk
    Streamed,
}

impl TransferStrategy {
    pub const fn buffer_mode(self) -> Option<BufferMode> {
        match self {
            Self::DirectBuffer => Some(BufferMode::Shared),
            Self::IndirectBuffer => Some(BufferMode::Private),
            Self::Streamed => None,
        }
    }
}

/// Outcome of [`plan_transfer`]
#[derive(Debug)]
pub enum Transfer {
    Buffered(Bytes),
    Streamed,
}

/// Resolve a preferred strategy against the descriptor's buffering policy
///
/// A buffer strategy becomes [`Transfer::Streamed`] when the policy declines
/// to buffer. Read failures are returned, not downgraded.
pub fn plan_transfer<C: HttpContent + ?Sized>(
    content: &C,
    preferred: TransferStrategy,
) -> Result<Transfer> {
    let Some(mode) = preferred.buffer_mode() else {
        return Ok(Transfer::Streamed);
    };
    Ok(match content.in_memory_buffer(mode)? {
        Some(buffer) => Transfer::Buffered(buffer),
        None => Transfer::Streamed,
    })
}

/// 200 response builder carrying the descriptor's content headers
pub fn content_response_builder<C: HttpContent + ?Sized>(content: &C) -> Result<Builder> {
    let headers = header::content_headers(content)?;
    let mut builder = Response::builder().status(200);
    if let Some(map) = builder.headers_mut() {
        map.extend(headers);
    }
    Ok(builder)
}

pub fn full_body(data: impl Into<Bytes>) -> ResponseBody {
    Full::new(data.into()).map_err(|never| match never {}).boxed_unsync()
}

pub fn empty_body() -> ResponseBody {
    Empty::<Bytes>::new().map_err(|never| match never {}).boxed_unsync()
}

/// Finish a builder, logging and falling back to an empty 500 on failure
pub fn finish(builder: Builder, body: ResponseBody, status: &str) -> Response<ResponseBody> {
    builder.body(body).unwrap_or_else(|e| {
        log_build_error(status, &e);
        build_500_response()
    })
}

/// Build 404 Not Found response
pub fn build_404_response() -> Response<ResponseBody> {
    text_response(404, "404 Not Found")
}

/// Build 405 Method Not Allowed response
pub fn build_405_response() -> Response<ResponseBody> {
    Response::builder()
        .status(405)
        .header("Content-Type", "text/plain")
        .header("Allow", "GET, HEAD")
        .body(full_body("405 Method Not Allowed"))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            build_500_response()
        })
}

/// Build 500 Internal Server Error response
pub fn build_500_response() -> Response<ResponseBody> {
    let mut response = Response::new(full_body("500 Internal Server Error"));
    *response.status_mut() = hyper::StatusCode::INTERNAL_SERVER_ERROR;
    response
}

fn text_response(status: u16, text: &'static str) -> Response<ResponseBody> {
    Response::builder()
        .status(status)
        .header("Content-Type", "text/plain")
        .body(full_body(text))
        .unwrap_or_else(|e| {
            log_build_error(&status.to_string(), &e);
            build_500_response()
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

//! Resource-backed content descriptor

use super::{BufferPolicy, HttpContent};
use crate::error::Result;
use crate::http::{date, mime};
use crate::logger;
use crate::resource::{BufferMode, Channel, Resource, Stream};
use chrono::{DateTime, Utc};
use hyper::body::Bytes;
use std::fmt;
use std::io;

/// Descriptor over an exclusively owned [`Resource`]
///
/// Length and modification time are asked of the resource on every query.
/// The etag is computed once at construction and never changes afterwards.
///
/// [`release`](Self::release) consumes the descriptor, so it cannot be
/// queried after its resource is closed. A descriptor dropped without
/// release still closes its resource, and logs a warning.
#[derive(Debug)]
pub struct ResourceContent {
    resource: Box<dyn Resource>,
    content_type: Option<String>,
    policy: BufferPolicy,
    etag: Option<String>,
    released: bool,
}

impl ResourceContent {
    /// Descriptor that never buffers and carries no etag
    pub fn new(resource: impl Resource + 'static, content_type: Option<&str>) -> Self {
        Self::with_options(resource, content_type, BufferPolicy::NEVER, false)
    }

    pub fn with_max_buffer(
        resource: impl Resource + 'static,
        content_type: Option<&str>,
        max_buffer_size: i64,
    ) -> Self {
        Self::with_options(
            resource,
            content_type,
            BufferPolicy::new(max_buffer_size),
            false,
        )
    }

    pub fn with_etag(
        resource: impl Resource + 'static,
        content_type: Option<&str>,
        etag: bool,
    ) -> Self {
        Self::with_options(resource, content_type, BufferPolicy::NEVER, etag)
    }

    pub fn with_options(
        resource: impl Resource + 'static,
        content_type: Option<&str>,
        policy: BufferPolicy,
        etag: bool,
    ) -> Self {
        Self::from_boxed(Box::new(resource), content_type, policy, etag)
    }

    /// Build over a resource whose concrete type was chosen at runtime
    pub fn from_boxed(
        resource: Box<dyn Resource>,
        content_type: Option<&str>,
        policy: BufferPolicy,
        etag: bool,
    ) -> Self {
        let etag = if etag { resource.weak_etag() } else { None };
        Self {
            resource,
            content_type: content_type.map(ToString::to_string),
            policy,
            etag,
            released: false,
        }
    }

    /// Close the underlying resource
    pub fn release(mut self) {
        self.resource.close();
        self.released = true;
    }
}

impl HttpContent for ResourceContent {
    fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    fn charset(&self) -> Option<&str> {
        self.content_type
            .as_deref()
            .and_then(mime::charset_from_content_type)
    }

    fn mime_type(&self) -> Option<mime::MimeType> {
        self.content_type
            .as_deref()
            .map(mime::content_type_without_charset)
            .and_then(mime::MimeType::lookup)
    }

    fn content_length(&self) -> Option<u64> {
        u64::try_from(self.resource.length()).ok()
    }

    fn last_modified(&self) -> Option<DateTime<Utc>> {
        date::from_epoch_millis(self.resource.last_modified())
    }

    fn etag(&self) -> Option<&str> {
        self.etag.as_deref()
    }

    fn in_memory_buffer(&self, mode: BufferMode) -> Result<Option<Bytes>> {
        // the length the policy checked is the length that gets read
        let length = self.resource.length();
        if !self.policy.permits(length) {
            return Ok(None);
        }
        #[allow(clippy::cast_sign_loss)]
        let expected = length as u64;
        let buffer = self.resource.read_fully(mode, expected)?;
        if buffer.len() as u64 != expected {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("{self}: read {} bytes, expected {expected}", buffer.len()),
            )
            .into());
        }
        Ok(Some(buffer))
    }

    fn open_stream(&self) -> Result<Stream> {
        Ok(self.resource.open_stream()?)
    }

    fn open_channel(&self) -> Result<Channel> {
        Ok(self.resource.open_channel()?)
    }
}

impl Drop for ResourceContent {
    fn drop(&mut self) {
        if !self.released {
            logger::log_warning(&format!("Content dropped without release: {self}"));
            self.resource.close();
        }
    }
}

impl fmt::Display for ResourceContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ResourceContent{{r={:?}}}", self.resource)
    }
}

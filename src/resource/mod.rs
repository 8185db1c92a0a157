//! Resource capability module
//!
//! The narrow surface a content descriptor reads through. Backing stores
//! (files, in-memory blobs) implement [`Resource`]; descriptors never look
//! at the concrete type.

mod file;
mod memory;

pub use file::FileResource;
pub use memory::MemoryResource;

use hyper::body::Bytes;
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::io::{self, Read, Seek};

/// Sentinel for an unknown length or modification time
pub const UNKNOWN: i64 = -1;

/// Sequential byte stream over a resource
pub type Stream = Box<dyn Read + Send>;

/// Seekable byte channel over a resource
pub trait SeekableChannel: Read + Seek + Send {}

impl<T: Read + Seek + Send> SeekableChannel for T {}

/// Seekable byte channel over a resource
pub type Channel = Box<dyn SeekableChannel>;

/// Physical memory hint for [`Resource::read_fully`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferMode {
    /// Memory that may be shared with other holders and must stay read-only
    /// (zero-copy transfer, cacheable across requests)
    Shared,
    /// A uniquely owned copy the caller may keep or mutate
    Private,
}

/// Storage backend capability
pub trait Resource: Send + fmt::Debug {
    /// Byte length, negative when unknown
    fn length(&self) -> i64;

    /// Last modification time in milliseconds since the Unix epoch, negative when unknown
    fn last_modified(&self) -> i64;

    /// Weak entity tag, computed on every call
    fn weak_etag(&self) -> Option<String>;

    fn open_stream(&self) -> io::Result<Stream>;

    fn open_channel(&self) -> io::Result<Channel>;

    /// Read exactly `length` bytes from the start of the resource into memory
    ///
    /// Never allocates or returns more than `length` bytes; a resource that
    /// holds fewer fails with `UnexpectedEof`.
    fn read_fully(&self, mode: BufferMode, length: u64) -> io::Result<Bytes>;

    /// Release the backing handle; opening or reading afterwards fails
    fn close(&mut self);
}

/// Build a weak `ETag` from a resource name, modification time and length
///
/// The name hash is folded into both numbers so resources with equal
/// metadata but different names still get distinct tags. `DefaultHasher`
/// may change between Rust releases, so tags are only stable within one
/// build of the server.
///
/// # Returns
/// `ETag` string, e.g., `W/"1f3a9c0b2e4d5f6a7b8c9d0e1f2a3b4c"`
pub fn weak_etag(name: &str, last_modified: i64, length: i64) -> String {
    let mut hasher = DefaultHasher::new();
    name.hash(&mut hasher);
    let h = hasher.finish();
    #[allow(clippy::cast_sign_loss)]
    let (lm, len) = (last_modified as u64, length as u64);
    format!("W/\"{:x}{:x}\"", lm ^ h, len ^ h)
}

/// Error for a resource holding fewer bytes than were asked for
pub(crate) fn short_read_error(name: &str, expected: u64, actual: u64) -> io::Error {
    io::Error::new(
        io::ErrorKind::UnexpectedEof,
        format!("{name}: expected {expected} bytes, found {actual}"),
    )
}

/// Error returned by a resource after [`Resource::close`]
pub(crate) fn closed_error(name: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotConnected,
        format!("resource closed: {name}"),
    )
}

//! In-memory resource
//!
//! Clones share one blob, so the store that owns a `MemoryResource` can
//! replace its content while descriptors built from a clone are alive.

use super::{
    closed_error, short_read_error, weak_etag, BufferMode, Channel, Resource, Stream, UNKNOWN,
};
use hyper::body::Bytes;
use std::io::{self, Cursor};
use std::sync::{Arc, PoisonError, RwLock};

#[derive(Debug)]
struct Blob {
    data: Bytes,
    last_modified: i64,
}

/// Resource backed by a shared in-memory blob
#[derive(Debug, Clone)]
pub struct MemoryResource {
    name: String,
    blob: Arc<RwLock<Blob>>,
    closed: bool,
}

impl MemoryResource {
    /// Create a blob with an unknown modification time
    pub fn new(name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self::with_last_modified(name, data, UNKNOWN)
    }

    pub fn with_last_modified(
        name: impl Into<String>,
        data: impl Into<Bytes>,
        last_modified: i64,
    ) -> Self {
        Self {
            name: name.into(),
            blob: Arc::new(RwLock::new(Blob {
                data: data.into(),
                last_modified,
            })),
            closed: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Replace the content seen by every clone of this resource
    pub fn replace(&self, data: impl Into<Bytes>, last_modified: i64) {
        let mut blob = self.blob.write().unwrap_or_else(PoisonError::into_inner);
        blob.data = data.into();
        blob.last_modified = last_modified;
    }

    fn snapshot(&self) -> io::Result<Bytes> {
        if self.closed {
            return Err(closed_error(&self.name));
        }
        Ok(self.data())
    }

    fn data(&self) -> Bytes {
        self.blob
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .data
            .clone()
    }
}

impl Resource for MemoryResource {
    fn length(&self) -> i64 {
        i64::try_from(self.data().len()).unwrap_or(UNKNOWN)
    }

    fn last_modified(&self) -> i64 {
        self.blob
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .last_modified
    }

    fn weak_etag(&self) -> Option<String> {
        Some(weak_etag(&self.name, self.last_modified(), self.length()))
    }

    fn open_stream(&self) -> io::Result<Stream> {
        Ok(Box::new(Cursor::new(self.snapshot()?)))
    }

    fn open_channel(&self) -> io::Result<Channel> {
        Ok(Box::new(Cursor::new(self.snapshot()?)))
    }

    fn read_fully(&self, mode: BufferMode, length: u64) -> io::Result<Bytes> {
        // one snapshot: a concurrent replace cannot change the data mid-read
        let data = self.snapshot()?;
        let available = data.len() as u64;
        if available < length {
            return Err(short_read_error(&self.name, length, available));
        }
        #[allow(clippy::cast_possible_truncation)]
        let data = data.slice(..length as usize);
        Ok(match mode {
            BufferMode::Shared => data,
            BufferMode::Private => Bytes::copy_from_slice(&data),
        })
    }

    fn close(&mut self) {
        self.closed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn test_length_and_modified() {
        let resource = MemoryResource::with_last_modified("a", &b"12345"[..], 42);
        assert_eq!(resource.length(), 5);
        assert_eq!(resource.last_modified(), 42);
        assert_eq!(MemoryResource::new("b", "x").last_modified(), UNKNOWN);
    }

    #[test]
    fn test_shared_buffer_is_zero_copy() {
        let resource = MemoryResource::new("shared", "payload");
        let a = resource.read_fully(BufferMode::Shared, 7).unwrap();
        let b = resource.read_fully(BufferMode::Shared, 7).unwrap();
        assert_eq!(a.as_ptr(), b.as_ptr());

        let private = resource.read_fully(BufferMode::Private, 7).unwrap();
        assert_eq!(private, a);
        assert_ne!(private.as_ptr(), a.as_ptr());
    }

    #[test]
    fn test_read_fully_bounded_by_length() {
        let store = MemoryResource::new("bounded", "0123456789");
        assert_eq!(&store.read_fully(BufferMode::Shared, 4).unwrap()[..], b"0123");
        assert_eq!(&store.read_fully(BufferMode::Private, 4).unwrap()[..], b"0123");

        store.replace("01", 1);
        let err = store.read_fully(BufferMode::Shared, 4).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_replace_visible_through_clones() {
        let store = MemoryResource::with_last_modified("doc", "old", 1);
        let handle = store.clone();
        let etag_before = handle.weak_etag();
        store.replace("newer", 2);
        assert_eq!(handle.length(), 5);
        assert_eq!(handle.last_modified(), 2);
        assert_ne!(handle.weak_etag(), etag_before);
    }

    #[test]
    fn test_stream_reads_all() {
        let resource = MemoryResource::new("s", "streamed bytes");
        let mut out = Vec::new();
        resource.open_stream().unwrap().read_to_end(&mut out).unwrap();
        assert_eq!(out, b"streamed bytes");
    }

    #[test]
    fn test_close_only_affects_this_handle() {
        let store = MemoryResource::new("c", "data");
        let mut handle = store.clone();
        handle.close();
        assert!(handle.open_stream().is_err());
        assert!(handle.read_fully(BufferMode::Shared, 4).is_err());
        assert!(store.open_stream().is_ok());
    }
}

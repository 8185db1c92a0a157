//! File system resource

use super::{
    closed_error, short_read_error, weak_etag, BufferMode, Channel, Resource, Stream, UNKNOWN,
};
use hyper::body::Bytes;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

/// Resource backed by a file on disk
///
/// Metadata is read from the file system on every query, so it tracks the
/// file as it changes.
#[derive(Debug)]
pub struct FileResource {
    path: PathBuf,
    closed: bool,
}

impl FileResource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            closed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn check_open(&self) -> io::Result<()> {
        if self.closed {
            return Err(closed_error(&self.path.display().to_string()));
        }
        Ok(())
    }
}

impl Resource for FileResource {
    fn length(&self) -> i64 {
        fs::metadata(&self.path)
            .ok()
            .filter(fs::Metadata::is_file)
            .and_then(|m| i64::try_from(m.len()).ok())
            .unwrap_or(UNKNOWN)
    }

    fn last_modified(&self) -> i64 {
        fs::metadata(&self.path)
            .and_then(|m| m.modified())
            .ok()
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .and_then(|d| i64::try_from(d.as_millis()).ok())
            .unwrap_or(UNKNOWN)
    }

    fn weak_etag(&self) -> Option<String> {
        let (lm, len) = (self.last_modified(), self.length());
        if lm < 0 && len < 0 {
            return None;
        }
        Some(weak_etag(&self.path.to_string_lossy(), lm, len))
    }

    fn open_stream(&self) -> io::Result<Stream> {
        self.check_open()?;
        Ok(Box::new(File::open(&self.path)?))
    }

    fn open_channel(&self) -> io::Result<Channel> {
        self.check_open()?;
        Ok(Box::new(File::open(&self.path)?))
    }

    // Both modes read a fresh copy; nothing on disk is shared between readers.
    fn read_fully(&self, _mode: BufferMode, length: u64) -> io::Result<Bytes> {
        self.check_open()?;
        let capacity = usize::try_from(length)
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "length exceeds memory"))?;
        let mut data = Vec::with_capacity(capacity);
        // bytes appended after the length check are not read
        let read = File::open(&self.path)?.take(length).read_to_end(&mut data)? as u64;
        if read < length {
            return Err(short_read_error(&self.path.display().to_string(), length, read));
        }
        Ok(Bytes::from(data))
    }

    fn close(&mut self) {
        self.closed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Seek, SeekFrom};

    #[test]
    fn test_metadata_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        fs::write(&path, b"hello file").unwrap();

        let resource = FileResource::new(&path);
        assert_eq!(resource.length(), 10);
        assert!(resource.last_modified() > 0);
        assert!(resource.weak_etag().unwrap().starts_with("W/\""));
    }

    #[test]
    fn test_missing_file_is_unknown() {
        let dir = tempfile::tempdir().unwrap();
        let resource = FileResource::new(dir.path().join("missing.bin"));
        assert_eq!(resource.length(), UNKNOWN);
        assert_eq!(resource.last_modified(), UNKNOWN);
        assert!(resource.weak_etag().is_none());
        assert!(resource.open_stream().is_err());
        assert!(resource.read_fully(BufferMode::Private, 1).is_err());
    }

    #[test]
    fn test_directory_has_unknown_length() {
        let dir = tempfile::tempdir().unwrap();
        let resource = FileResource::new(dir.path());
        assert_eq!(resource.length(), UNKNOWN);
    }

    #[test]
    fn test_length_tracks_file_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grow.txt");
        fs::write(&path, b"abc").unwrap();
        let resource = FileResource::new(&path);
        assert_eq!(resource.length(), 3);
        fs::write(&path, b"abcdef").unwrap();
        assert_eq!(resource.length(), 6);
    }

    #[test]
    fn test_read_fully_stops_at_length() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grown.bin");
        fs::write(&path, vec![7u8; 4096]).unwrap();

        let resource = FileResource::new(&path);
        let buffer = resource.read_fully(BufferMode::Private, 500).unwrap();
        assert_eq!(buffer.len(), 500);
    }

    #[test]
    fn test_read_fully_short_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shrunk.bin");
        fs::write(&path, b"tiny").unwrap();

        let resource = FileResource::new(&path);
        let err = resource.read_fully(BufferMode::Shared, 100).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_read_fully_while_file_grows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("appending.log");
        fs::write(&path, vec![b'a'; 500]).unwrap();

        let writer_path = path.clone();
        let writer = std::thread::spawn(move || {
            let mut file = fs::OpenOptions::new().append(true).open(writer_path).unwrap();
            for _ in 0..50 {
                io::Write::write_all(&mut file, &[b'b'; 64 * 1024]).unwrap();
            }
        });

        let resource = FileResource::new(&path);
        for _ in 0..50 {
            let length = u64::try_from(resource.length()).unwrap();
            let buffer = resource.read_fully(BufferMode::Private, length).unwrap();
            assert_eq!(buffer.len() as u64, length);
        }
        writer.join().unwrap();
    }

    #[test]
    fn test_channel_seek() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seek.txt");
        fs::write(&path, b"0123456789").unwrap();

        let resource = FileResource::new(&path);
        let mut channel = resource.open_channel().unwrap();
        let mut rest = String::new();
        channel.seek(SeekFrom::Start(6)).unwrap();
        channel.read_to_string(&mut rest).unwrap();
        assert_eq!(rest, "6789");
    }

    #[test]
    fn test_closed_rejects_reads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("c.txt");
        fs::write(&path, b"data").unwrap();

        let mut resource = FileResource::new(&path);
        resource.close();
        resource.close();
        let err = resource.open_stream().err().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::NotConnected);
        assert!(resource.open_channel().is_err());
        assert!(resource.read_fully(BufferMode::Shared, 4).is_err());
        // metadata still answers
        assert_eq!(resource.length(), 4);
    }
}

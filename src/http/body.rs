//! Streamed response body
//!
//! A channel-fed [`Body`]: a blocking task copies a resource stream into the
//! sender chunk by chunk while hyper drains the receiver, so only a bounded
//! number of chunks is ever held in memory.

use hyper::body::{Body, Bytes, Frame};
use std::io::{self, Read};
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::mpsc;

/// Chunks in flight between the copying task and the connection
const CHANNEL_CAPACITY: usize = 4;

/// Receiving half, handed to hyper as the response body
#[derive(Debug)]
pub struct ContentBody {
    rx: mpsc::Receiver<io::Result<Bytes>>,
}

/// Sending half, driven from a blocking thread
#[derive(Debug)]
pub struct BodySender {
    tx: mpsc::Sender<io::Result<Bytes>>,
}

impl ContentBody {
    pub fn channel() -> (BodySender, Self) {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        (BodySender { tx }, Self { rx })
    }
}

impl BodySender {
    /// Copy `stream` into the body until end of stream
    ///
    /// With a `limit`, exactly that many bytes are sent: bytes past it are
    /// never read, and a stream ending early fails with `UnexpectedEof`.
    /// Must run off the async runtime (e.g. inside `spawn_blocking`).
    /// Returns the number of bytes sent.
    pub fn pump(
        &self,
        stream: impl Read,
        chunk_size: usize,
        limit: Option<u64>,
    ) -> io::Result<u64> {
        let Some(len) = limit else {
            return self.copy(stream, chunk_size);
        };
        let total = self.copy(stream.take(len), chunk_size)?;
        if total < len {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("stream ended after {total} of {len} bytes"),
            ));
        }
        Ok(total)
    }

    fn copy(&self, mut stream: impl Read, chunk_size: usize) -> io::Result<u64> {
        let chunk_size = chunk_size.max(1);
        let mut total = 0u64;
        loop {
            let mut chunk = vec![0u8; chunk_size];
            let n = match stream.read(&mut chunk) {
                Ok(0) => return Ok(total),
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            chunk.truncate(n);
            total += n as u64;
            if self.tx.blocking_send(Ok(Bytes::from(chunk))).is_err() {
                return Err(io::Error::new(
                    io::ErrorKind::BrokenPipe,
                    "response body receiver dropped",
                ));
            }
        }
    }

    /// Abort the body with an error frame
    pub fn fail(&self, err: io::Error) {
        // receiver may already be gone
        let _ = self.tx.blocking_send(Err(err));
    }
}

impl Body for ContentBody {
    type Data = Bytes;
    type Error = io::Error;

    fn poll_frame(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        self.rx
            .poll_recv(cx)
            .map(|chunk| chunk.map(|result| result.map(Frame::data)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use std::io::Cursor;

    #[tokio::test]
    async fn test_pump_delivers_all_bytes() {
        let data: Vec<u8> = (0..10_000u32).map(|i| (i % 256) as u8).collect();
        let expected = data.clone();
        let (sender, body) = ContentBody::channel();

        let pump = tokio::task::spawn_blocking(move || sender.pump(Cursor::new(data), 1024, None));
        let collected = body.collect().await.unwrap().to_bytes();
        assert_eq!(pump.await.unwrap().unwrap(), 10_000);
        assert_eq!(&collected[..], &expected[..]);
    }

    #[tokio::test]
    async fn test_fail_surfaces_error() {
        let (sender, body) = ContentBody::channel();
        tokio::task::spawn_blocking(move || {
            sender.fail(io::Error::new(io::ErrorKind::UnexpectedEof, "truncated"));
        });
        match body.collect().await {
            Err(err) => assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof),
            Ok(_) => panic!("Expected body error"),
        }
    }

    #[tokio::test]
    async fn test_dropped_receiver_stops_pump() {
        let (sender, body) = ContentBody::channel();
        drop(body);
        let result = tokio::task::spawn_blocking(move || {
            sender.pump(Cursor::new(vec![1u8; 64]), 8, None)
        })
        .await
        .unwrap();
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::BrokenPipe);
    }

    #[tokio::test]
    async fn test_limit_truncates_longer_stream() {
        let (sender, body) = ContentBody::channel();
        let pump = tokio::task::spawn_blocking(move || {
            sender.pump(Cursor::new(vec![9u8; 5000]), 1024, Some(2000))
        });
        let collected = body.collect().await.unwrap().to_bytes();
        assert_eq!(pump.await.unwrap().unwrap(), 2000);
        assert_eq!(collected.len(), 2000);
    }

    #[tokio::test]
    async fn test_limit_rejects_shorter_stream() {
        let (sender, body) = ContentBody::channel();
        let pump = tokio::task::spawn_blocking(move || {
            sender.pump(Cursor::new(vec![9u8; 300]), 128, Some(2000))
        });
        let collected = body.collect().await.unwrap().to_bytes();
        assert_eq!(collected.len(), 300);
        let err = pump.await.unwrap().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}

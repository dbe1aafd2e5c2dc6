use async_compression::tokio::bufread::{GzipDecoder, ZstdDecoder};
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::io::{AsyncBufRead, AsyncRead, ReadBuf};

/// A wrapper for the formats that access logs are usually distributed in.
pub enum Decompressor<T> {
    Gzip(GzipDecoder<T>),
    Zstd(ZstdDecoder<T>),
    /// Uncompressed plain text.
    Identity(T),
}

impl<T: AsyncBufRead> Decompressor<T> {
    /// Picks the decompression algorithm based on a file extension.
    ///
    /// Files without an extension, and `.log` or `.txt` files, are read as
    /// plain text.
    pub fn from_extension(inner: T, extension: Option<&str>) -> anyhow::Result<Self> {
        match extension {
            Some("gz") => Ok(Decompressor::gzip(inner)),
            Some("zst") => Ok(Decompressor::zstd(inner)),
            Some("log" | "txt") | None => Ok(Decompressor::identity(inner)),
            Some(ext) => anyhow::bail!("Unexpected file extension: {}", ext),
        }
    }

    pub fn gzip(inner: T) -> Self {
        Decompressor::Gzip(GzipDecoder::new(inner))
    }

    pub fn zstd(inner: T) -> Self {
        Decompressor::Zstd(ZstdDecoder::new(inner))
    }

    pub fn identity(inner: T) -> Self {
        Decompressor::Identity(inner)
    }
}

impl<T: AsyncBufRead + Unpin> AsyncRead for Decompressor<T> {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<std::io::Result<()>> {
        match &mut *self {
            Decompressor::Gzip(inner) => Pin::new(inner).poll_read(cx, buf),
            Decompressor::Zstd(inner) => Pin::new(inner).poll_read(cx, buf),
            Decompressor::Identity(inner) => Pin::new(inner).poll_read(cx, buf),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::{assert_err, assert_ok, assert_some};
    use insta::assert_snapshot;
    use std::io::Cursor;
    use tokio::io::AsyncReadExt;

    const PLAIN: &[u8] = include_bytes!("../crates/access_log_engine/test_data/basic.log");
    const GZIP: &[u8] = include_bytes!("../crates/access_log_engine/test_data/basic.log.gz");
    const ZSTD: &[u8] = include_bytes!("../crates/access_log_engine/test_data/basic.log.zst");

    async fn decompress(bytes: &'static [u8], extension: Option<&str>) -> Vec<u8> {
        let mut decompressor = assert_ok!(Decompressor::from_extension(bytes, extension));

        let mut output = Vec::new();
        assert_ok!(decompressor.read_to_end(&mut output).await);
        output
    }

    #[tokio::test]
    async fn test_gzip() {
        assert_eq!(decompress(GZIP, Some("gz")).await, PLAIN);
    }

    #[tokio::test]
    async fn test_zstd() {
        assert_eq!(decompress(ZSTD, Some("zst")).await, PLAIN);
    }

    #[tokio::test]
    async fn test_identity() {
        assert_eq!(decompress(PLAIN, Some("log")).await, PLAIN);
        assert_eq!(decompress(PLAIN, Some("txt")).await, PLAIN);
        assert_eq!(decompress(PLAIN, None).await, PLAIN);
    }

    #[tokio::test]
    async fn test_corrupt_gzip() {
        let mut decompressor = assert_ok!(Decompressor::from_extension(PLAIN, Some("gz")));

        let mut output = Vec::new();
        assert_err!(decompressor.read_to_end(&mut output).await);
    }

    #[test]
    fn test_unexpected_extension() {
        let result = Decompressor::from_extension(Cursor::new(PLAIN), Some("bz2"));
        let error = assert_some!(result.err());
        assert_snapshot!(error, @"Unexpected file extension: bz2");
    }
}

//! Routines to download the source data.

use std::io::Read;
use std::path::Path;

use flate2::read::GzDecoder;
use hyper::body::HttpBody;
use hyper::client::HttpConnector;
use hyper::header::{CONTENT_ENCODING, CONTENT_LENGTH};
use hyper::{Body, Client, Method, Request, Uri};
use hyper_tls::HttpsConnector;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::error::{Error, Result};

/// Default size in bytes of each downloaded data part.
pub const DEFAULT_CHUNK_SIZE: usize = 1024 * 1024;

type HttpsClient = Client<HttpsConnector<HttpConnector>, Body>;

/// Information about one written data chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataChunkInfo {
    /// Chunk size in bytes.
    pub chunk_size: usize,

    /// Total size in bytes of the object we split in several chunks,
    /// 0 when the server does not announce it.
    pub file_size: u64,
}

/// Download a remote file over HTTPS.
pub struct DataDownloader {
    client: HttpsClient,
    data_url: Uri,
}

impl DataDownloader {
    pub fn new(url: &str) -> Result<Self> {
        let data_url: Uri = url.parse()?;
        let client = Client::builder().build::<_, Body>(HttpsConnector::new());
        Ok(Self { client, data_url })
    }

    /// Announced size of the remote file, from a HEAD request.
    pub async fn remote_size(&self) -> Result<u64> {
        let request = Request::builder()
            .method(Method::HEAD)
            .uri(self.data_url.clone())
            .body(Body::empty())?;
        let response = self.client.request(request).await?;
        if !response.status().is_success() {
            return Err(Error::Status(response.status()));
        }
        Ok(response
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse().ok())
            .unwrap_or(0))
    }

    /// Download the remote file to `path` in parts.
    ///
    /// The response body is re-chunked to `chunk_size` boundaries and
    /// `on_chunk` runs once per written part (the final part may be
    /// shorter). Returns the total number of bytes written.
    pub async fn download<F>(&self, path: &Path, chunk_size: usize, mut on_chunk: F) -> Result<u64>
    where
        F: FnMut(DataChunkInfo),
    {
        let chunk_size = chunk_size.max(1);
        let file_size = self.remote_size().await?;
        debug!(url = %self.data_url, file_size, "starting chunked download");

        let response = self.get().await?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let mut file = fs::File::create(path).await?;
        let mut body = response.into_body();
        let mut buffer: Vec<u8> = Vec::with_capacity(chunk_size);
        let mut written = 0u64;

        while let Some(frame) = body.data().await {
            buffer.extend_from_slice(&frame?);
            while buffer.len() >= chunk_size {
                let chunk: Vec<u8> = buffer.drain(..chunk_size).collect();
                file.write_all(&chunk).await?;
                written += chunk.len() as u64;
                on_chunk(DataChunkInfo {
                    chunk_size: chunk.len(),
                    file_size,
                });
            }
        }
        if !buffer.is_empty() {
            file.write_all(&buffer).await?;
            written += buffer.len() as u64;
            on_chunk(DataChunkInfo {
                chunk_size: buffer.len(),
                file_size,
            });
        }
        file.flush().await?;
        debug!(written, "download finished");
        Ok(written)
    }

    /// Download a small remote file in one read, inflating a gzip-encoded
    /// body when the server sends one.
    pub async fn download_buffered(&self, path: &Path) -> Result<u64> {
        let response = self.get().await?;
        let gzipped = response
            .headers()
            .get(CONTENT_ENCODING)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.contains("gzip"))
            .unwrap_or(false);

        let bytes = hyper::body::to_bytes(response.into_body()).await?;
        let contents = if gzipped {
            let mut decoder = GzDecoder::new(bytes.as_ref());
            let mut decoded = Vec::new();
            decoder.read_to_end(&mut decoded)?;
            decoded
        } else {
            bytes.to_vec()
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(path, &contents).await?;
        Ok(contents.len() as u64)
    }

    async fn get(&self) -> Result<hyper::Response<Body>> {
        let request = Request::builder()
            .method(Method::GET)
            .uri(self.data_url.clone())
            .body(Body::empty())?;
        let response = self.client.request(request).await?;
        if !response.status().is_success() {
            return Err(Error::Status(response.status()));
        }
        Ok(response)
    }
}

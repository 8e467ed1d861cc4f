//! Download tests against a mocked data server.

use std::io::Write;

use flate2::write::GzEncoder;
use flate2::Compression;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use covid19mx::download::DataDownloader;
use covid19mx::Error;

const ARCHIVE_PATH: &str = "/datos_abiertos_covid19.zip";

async fn serve(body: Vec<u8>) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path(ARCHIVE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body.clone()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(ARCHIVE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body))
        .mount(&server)
        .await;
    server
}

fn mock_body(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}

#[tokio::test]
async fn reports_the_remote_size() {
    let body = mock_body(2500);
    let server = serve(body).await;

    let downloader = DataDownloader::new(&format!("{}{ARCHIVE_PATH}", server.uri())).unwrap();
    assert_eq!(downloader.remote_size().await.unwrap(), 2500);
}

#[tokio::test]
async fn downloads_the_archive_in_chunks() {
    let body = mock_body(2500);
    let server = serve(body.clone()).await;
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("downloads").join("covid.zip");

    let downloader = DataDownloader::new(&format!("{}{ARCHIVE_PATH}", server.uri())).unwrap();
    let mut chunks = Vec::new();
    let written = downloader
        .download(&dest, 1024, |chunk| chunks.push(chunk))
        .await
        .unwrap();

    assert_eq!(written, body.len() as u64);
    assert_eq!(std::fs::read(&dest).unwrap(), body);

    // Chunk accounting must add up, every chunk carries the announced
    // total, and only the final chunk may be short.
    let downloaded: usize = chunks.iter().map(|chunk| chunk.chunk_size).sum();
    assert_eq!(downloaded, body.len());
    assert!(chunks.iter().all(|chunk| chunk.file_size == 2500));
    assert_eq!(chunks.len(), 3);
    assert!(chunks[..2].iter().all(|chunk| chunk.chunk_size == 1024));
    assert_eq!(chunks[2].chunk_size, 452);
}

#[tokio::test]
async fn proceeds_when_the_server_announces_no_size() {
    let body = mock_body(2500);
    let server = MockServer::start().await;
    // HEAD with an empty body: no usable Content-Length for the client.
    Mock::given(method("HEAD"))
        .and(path(ARCHIVE_PATH))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(ARCHIVE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body.clone()))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("covid.zip");
    let downloader = DataDownloader::new(&format!("{}{ARCHIVE_PATH}", server.uri())).unwrap();
    let mut chunks = Vec::new();
    let written = downloader
        .download(&dest, 1024, |chunk| chunks.push(chunk))
        .await
        .unwrap();

    assert_eq!(written, body.len() as u64);
    assert_eq!(std::fs::read(&dest).unwrap(), body);
    assert!(!chunks.is_empty());
    assert!(chunks.iter().all(|chunk| chunk.file_size == 0));
}

#[tokio::test]
async fn empty_bodies_write_an_empty_file_without_chunks() {
    let server = serve(Vec::new()).await;
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("covid.zip");

    let downloader = DataDownloader::new(&format!("{}{ARCHIVE_PATH}", server.uri())).unwrap();
    let mut chunks = Vec::new();
    let written = downloader
        .download(&dest, 1024, |chunk| chunks.push(chunk))
        .await
        .unwrap();

    assert_eq!(written, 0);
    assert_eq!(std::fs::metadata(&dest).unwrap().len(), 0);
    assert!(chunks.is_empty());
}

#[tokio::test]
async fn server_errors_surface_as_status_errors() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path(ARCHIVE_PATH))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let downloader = DataDownloader::new(&format!("{}{ARCHIVE_PATH}", server.uri())).unwrap();
    let result = downloader
        .download(&dir.path().join("covid.zip"), 1024, |_| {})
        .await;
    assert!(matches!(result, Err(Error::Status(status)) if status.as_u16() == 404));
}

#[tokio::test]
async fn buffered_download_writes_the_body() {
    let body = mock_body(512);
    let server = serve(body.clone()).await;
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("dict.zip");

    let downloader = DataDownloader::new(&format!("{}{ARCHIVE_PATH}", server.uri())).unwrap();
    let written = downloader.download_buffered(&dest).await.unwrap();

    assert_eq!(written, body.len() as u64);
    assert_eq!(std::fs::read(&dest).unwrap(), body);
}

#[tokio::test]
async fn buffered_download_inflates_gzip_bodies() {
    let contents = b"FECHA_ACTUALIZACION,ID_REGISTRO\n".repeat(8);
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&contents).unwrap();
    let compressed = encoder.finish().unwrap();

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ARCHIVE_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(compressed)
                .insert_header("Content-Encoding", "gzip"),
        )
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("dict.zip");
    let downloader = DataDownloader::new(&format!("{}{ARCHIVE_PATH}", server.uri())).unwrap();
    let written = downloader.download_buffered(&dest).await.unwrap();

    assert_eq!(written, contents.len() as u64);
    assert_eq!(std::fs::read(&dest).unwrap(), contents);
}

// src/core/net.rs
// Where pages come from: the live site over HTTPS, or a directory of pages
// saved by an earlier `fetch` run.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use reqwest::blocking::{Client, ClientBuilder};
use tracing::debug;

use crate::config::consts::{PAGE_EXT, REQUEST_TIMEOUT_SECS, USER_AGENT};
use crate::core::sanitize::sanitize_filename;
use crate::error::{Error, Result};

/// Anything that can hand back the HTML for a journal page.
pub trait PageSource {
    fn fetch(&mut self, journal_id: &str, url: &str) -> Result<String>;

    /// Whether to pause between requests.
    fn is_remote(&self) -> bool { true }
}

/// One reusable HTTP session for the whole run.
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    pub fn new() -> Result<Self> {
        Self::build(client_builder())
    }

    fn build(builder: ClientBuilder) -> Result<Self> {
        let client = builder
            .build()
            .map_err(|source| Error::Http { url: s!("<client>"), source })?;
        Ok(Self { client })
    }
}

fn client_builder() -> ClientBuilder {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
}

impl PageSource for HttpSource {
    fn fetch(&mut self, _journal_id: &str, url: &str) -> Result<String> {
        debug!(url, "GET");
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|source| Error::Http { url: s!(url), source })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Status { url: s!(url), status: status.as_u16() });
        }
        resp.text().map_err(|source| Error::Http { url: s!(url), source })
    }
}

/// Reads `<dir>/<id>.html` instead of the network.
pub struct ArchiveSource {
    dir: PathBuf,
}

impl ArchiveSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl PageSource for ArchiveSource {
    fn fetch(&mut self, journal_id: &str, _url: &str) -> Result<String> {
        let path = page_path(&self.dir, journal_id);
        fs::read_to_string(&path).map_err(|e| Error::file(path, e))
    }

    fn is_remote(&self) -> bool { false }
}

pub fn page_path(dir: &Path, journal_id: &str) -> PathBuf {
    dir.join(format!("{}.{}", sanitize_filename(journal_id), PAGE_EXT))
}

/// Store a fetched page in the archive directory; returns the file written.
pub fn save_page(dir: &Path, journal_id: &str, html: &str) -> Result<PathBuf> {
    crate::file::ensure_directory(dir)?;
    let path = page_path(dir, journal_id);
    fs::write(&path, html).map_err(|e| Error::file(&path, e))?;
    Ok(path)
}

/// Every file in `dir` whose name contains `.html`, sorted by file name.
pub fn archived_pages(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut pages = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| Error::file(dir, e))? {
        let path = entry?.path();
        if !path.is_file() { continue; }
        let is_page = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.contains(".html"));
        if is_page { pages.push(path); }
    }
    pages.sort();
    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    /// Answer one request with `response`; the handle yields the raw request.
    fn serve_once(response: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/journal/12186/editors", listener.local_addr().unwrap());
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut req = Vec::new();
            let mut buf = [0u8; 1024];
            while !req.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 { break; }
                req.extend_from_slice(&buf[..n]);
            }
            stream.write_all(response.as_bytes()).unwrap();
            String::from_utf8_lossy(&req).into_owned()
        });
        (url, handle)
    }

    fn local_source() -> HttpSource {
        HttpSource::build(client_builder().no_proxy()).unwrap()
    }

    #[test]
    fn http_ok_returns_body() {
        let (url, server) = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: 12\r\nConnection: close\r\n\r\n<p>board</p>",
        );
        let mut src = local_source();
        assert!(src.is_remote());
        assert_eq!(src.fetch("12186", &url).unwrap(), "<p>board</p>");

        let request = server.join().unwrap().to_ascii_lowercase();
        assert!(request.starts_with("get /journal/12186/editors "));
        assert!(request.contains("user-agent: eb_scrape/"));
    }

    #[test]
    fn http_error_status_is_an_error() {
        let (url, server) = serve_once(
            "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        );
        let err = local_source().fetch("12186", &url).unwrap_err();
        server.join().unwrap();
        match err {
            Error::Status { url: failed, status } => {
                assert_eq!(status, 404);
                assert_eq!(failed, url);
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[test]
    fn archive_round_trip_through_source() {
        let dir = tempfile::tempdir().unwrap();
        let saved = save_page(dir.path(), "12186", "<html></html>").unwrap();
        assert!(saved.ends_with("12186.html"));

        let mut src = ArchiveSource::new(dir.path());
        assert_eq!(src.fetch("12186", "ignored").unwrap(), "<html></html>");
        assert!(!src.is_remote());
        assert!(matches!(src.fetch("missing", ""), Err(Error::File { .. })));
    }

    #[test]
    fn archived_pages_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.html"), "").unwrap();
        fs::write(dir.path().join("a.html"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        fs::create_dir(dir.path().join("sub.html")).unwrap();

        let names: Vec<String> = archived_pages(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.html", "b.html"]);
    }
}

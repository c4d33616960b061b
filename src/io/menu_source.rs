//! Menu sources
//!
//! The menu CSV is fetched once at startup, either from a local file or
//! over HTTP. Both paths sit behind the `MenuSource` trait so the pipeline
//! (and its tests) never care where the text came from.
//!
//! Any failure to obtain the text (missing file, connection refused,
//! non-2xx status, timeout) surfaces as `GeneratorError::SourceUnavailable`.

use crate::types::GeneratorError;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

/// Default HTTP fetch timeout
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Source of raw menu CSV text
pub trait MenuSource {
    /// Fetch the complete menu text
    fn fetch(&self) -> Result<String, GeneratorError>;

    /// Human-readable location, used in logs and errors
    fn describe(&self) -> String;
}

/// Menu read from a local file
#[derive(Debug, Clone)]
pub struct FileMenuSource {
    path: PathBuf,
}

impl FileMenuSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl MenuSource for FileMenuSource {
    fn fetch(&self) -> Result<String, GeneratorError> {
        debug!(path = %self.path.display(), "Reading menu file");
        std::fs::read_to_string(&self.path)
            .map_err(|e| GeneratorError::source_unavailable(&self.describe(), e))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Menu downloaded over HTTP(S)
///
/// The download runs on a single-threaded tokio runtime created for the
/// call; the rest of the program stays synchronous.
#[derive(Debug, Clone)]
pub struct HttpMenuSource {
    url: String,
    timeout: Duration,
}

impl HttpMenuSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
        }
    }

    async fn download(&self) -> Result<String, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(self.timeout).build()?;
        let response = client.get(&self.url).send().await?.error_for_status()?;
        response.text().await
    }

    fn describe_error(&self, error: reqwest::Error) -> String {
        if error.is_timeout() {
            format!("request timed out after {}s", self.timeout.as_secs_f64())
        } else if let Some(status) = error.status() {
            format!("server responded with status {}", status)
        } else {
            error.to_string()
        }
    }
}

impl MenuSource for HttpMenuSource {
    fn fetch(&self) -> Result<String, GeneratorError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| {
                GeneratorError::source_unavailable(
                    &self.url,
                    format!("Failed to create tokio runtime: {}", e),
                )
            })?;

        debug!(url = %self.url, timeout = ?self.timeout, "Downloading menu");
        runtime
            .block_on(self.download())
            .map_err(|e| GeneratorError::source_unavailable(&self.url, self.describe_error(e)))
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Create a menu source for a location
///
/// `http://` and `https://` locations are downloaded; anything else is
/// treated as a file path.
pub fn create_menu_source(location: &str, timeout: Duration) -> Box<dyn MenuSource> {
    let lower = location.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        Box::new(HttpMenuSource::new(location, timeout))
    } else {
        Box::new(FileMenuSource::new(location))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;
    use tempfile::NamedTempFile;

    const MENU: &str = "Category,Item,Price (INR)\nCoffee,Espresso,100\n";

    /// Serve a single HTTP response on a local port and return its URL
    fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind listener");
        let addr = listener.local_addr().unwrap();

        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0u8; 4096];
                let mut request = Vec::new();
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match stream.read(&mut buf) {
                        Ok(0) | Err(_) => break,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: text/csv\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status_line,
                    body.len(),
                    body
                );
                let _ = stream.write_all(response.as_bytes());
            }
        });

        format!("http://{}/menu.csv", addr)
    }

    #[test]
    fn test_file_source_reads_file() {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(MENU.as_bytes()).unwrap();
        file.flush().unwrap();

        let source = FileMenuSource::new(file.path());
        assert_eq!(source.fetch().unwrap(), MENU);
    }

    #[test]
    fn test_file_source_missing_file() {
        let source = FileMenuSource::new("definitely/not/here/menu.csv");
        match source.fetch() {
            Err(GeneratorError::SourceUnavailable { location, .. }) => {
                assert_eq!(location, "definitely/not/here/menu.csv")
            }
            other => panic!("Expected SourceUnavailable, got {:?}", other),
        }
    }

    #[test]
    fn test_http_source_downloads_body() {
        let url = serve_once("200 OK", MENU);
        let source = HttpMenuSource::new(url, Duration::from_secs(5));
        assert_eq!(source.fetch().unwrap(), MENU);
    }

    #[test]
    fn test_http_source_error_status() {
        let url = serve_once("404 Not Found", "missing");
        let source = HttpMenuSource::new(url.clone(), Duration::from_secs(5));

        match source.fetch() {
            Err(GeneratorError::SourceUnavailable { location, message }) => {
                assert_eq!(location, url);
                assert!(message.contains("404"), "unexpected message: {}", message);
            }
            other => panic!("Expected SourceUnavailable, got {:?}", other),
        }
    }

    #[test]
    fn test_http_source_connection_refused() {
        // Bind then drop to get a port nothing listens on
        let port = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let source = HttpMenuSource::new(
            format!("http://127.0.0.1:{}/menu.csv", port),
            Duration::from_secs(5),
        );

        assert!(matches!(
            source.fetch(),
            Err(GeneratorError::SourceUnavailable { .. })
        ));
    }

    #[test]
    fn test_http_source_timeout() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            // Accept and hold the connection without answering
            if let Ok((stream, _)) = listener.accept() {
                thread::sleep(Duration::from_secs(3));
                drop(stream);
            }
        });

        let source = HttpMenuSource::new(
            format!("http://{}/menu.csv", addr),
            Duration::from_millis(200),
        );

        match source.fetch() {
            Err(GeneratorError::SourceUnavailable { message, .. }) => {
                assert!(message.contains("timed out"), "unexpected message: {}", message)
            }
            other => panic!("Expected SourceUnavailable, got {:?}", other),
        }
    }

    #[test]
    fn test_create_menu_source_picks_by_scheme() {
        let timeout = Duration::from_secs(1);
        assert_eq!(
            create_menu_source("https://example.com/menu.csv", timeout).describe(),
            "https://example.com/menu.csv"
        );
        assert_eq!(
            create_menu_source("HTTP://example.com/menu.csv", timeout).describe(),
            "HTTP://example.com/menu.csv"
        );
        assert_eq!(
            create_menu_source("data/menu.csv", timeout).describe(),
            "data/menu.csv"
        );
    }
}

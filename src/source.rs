//! Data documents with built-in fallbacks.
//!
//! A location is either an `http(s)://` URL or a path relative to the site
//! root. Loading never fails: any fetch, status or decode error substitutes
//! the fallback document for that one document, and the failure is logged.
//!
//! The two documents load concurrently and independently; one falling back
//! has no effect on the other.

use crate::{
    log,
    model::{Project, SiteConfig, defaults},
};
use serde::de::DeserializeOwned;
use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
    time::Duration,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("cannot read `{0}`")]
    Io(PathBuf, #[source] io::Error),

    #[error("request failed")]
    Http(#[from] reqwest::Error),

    #[error("`{0}` answered with status {1}")]
    Status(String, u16),

    #[error("malformed JSON")]
    Decode(#[from] serde_json::Error),
}

/// Raw document retrieval.
pub trait Fetch: Sync {
    fn fetch(&self, location: &str) -> Result<Vec<u8>, SourceError>;
}

/// Fetches URLs over HTTP and everything else from the site root.
#[derive(Debug, Clone)]
pub struct Fetcher {
    root: PathBuf,
    timeout: Duration,
}

impl Fetcher {
    pub fn new(root: &Path, timeout: Duration) -> Self {
        Self {
            root: root.to_path_buf(),
            timeout,
        }
    }

    fn fetch_remote(&self, url: &str) -> Result<Vec<u8>, SourceError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()?;

        let resp = client
            .get(url)
            .header(reqwest::header::CACHE_CONTROL, "no-store")
            .send()?;

        if !resp.status().is_success() {
            return Err(SourceError::Status(url.to_owned(), resp.status().as_u16()));
        }

        Ok(resp.bytes()?.to_vec())
    }

    fn fetch_file(&self, location: &str) -> Result<Vec<u8>, SourceError> {
        let path = self.root.join(location);
        fs::read(&path).map_err(|err| SourceError::Io(path, err))
    }
}

impl Fetch for Fetcher {
    fn fetch(&self, location: &str) -> Result<Vec<u8>, SourceError> {
        if is_remote(location) {
            self.fetch_remote(location)
        } else {
            self.fetch_file(location)
        }
    }
}

pub fn is_remote(location: &str) -> bool {
    let lower = location.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Where a loaded document came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Fetched,
    Fallback,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Fetched => "fetched",
            Self::Fallback => "built-in defaults",
        })
    }
}

/// Load a JSON document, or `fallback` on any failure.
pub fn load<T: DeserializeOwned>(fetcher: &dyn Fetch, location: &str, fallback: T) -> T {
    load_with_origin(fetcher, location, || fallback).0
}

/// Like [`load`], reporting whether the fallback was used.
///
/// `fallback` is only built when needed.
pub fn load_with_origin<T, F>(fetcher: &dyn Fetch, location: &str, fallback: F) -> (T, Origin)
where
    T: DeserializeOwned,
    F: FnOnce() -> T,
{
    let decoded = fetcher
        .fetch(location)
        .and_then(|bytes| serde_json::from_slice(&bytes).map_err(SourceError::from));

    match decoded {
        Ok(value) => (value, Origin::Fetched),
        Err(err) => {
            log!("data"; "{location}: {}, using built-in defaults", error_chain(&err));
            (fallback(), Origin::Fallback)
        }
    }
}

/// `error: cause: cause` on one line.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Both documents, as rendered.
#[derive(Debug, Clone)]
pub struct SiteData {
    pub config: SiteConfig,
    pub projects: Vec<Project>,
    pub config_origin: Origin,
    pub projects_origin: Origin,
}

impl SiteData {
    /// Built-in documents only.
    pub fn fallback() -> Self {
        Self {
            config: defaults::site_config(),
            projects: defaults::projects(),
            config_origin: Origin::Fallback,
            projects_origin: Origin::Fallback,
        }
    }
}

/// Load the profile and the project list concurrently.
pub fn load_site_data(fetcher: &dyn Fetch, config: &str, projects: &str) -> SiteData {
    let ((config, config_origin), (projects, projects_origin)) = rayon::join(
        || load_with_origin(fetcher, config, defaults::site_config),
        || load_with_origin(fetcher, projects, defaults::projects),
    );

    SiteData {
        config,
        projects,
        config_origin,
        projects_origin,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Answers every location with a fixed outcome.
    struct Canned(fn(&str) -> Result<Vec<u8>, SourceError>);

    impl Fetch for Canned {
        fn fetch(&self, location: &str) -> Result<Vec<u8>, SourceError> {
            (self.0)(location)
        }
    }

    fn fallback_config() -> SiteConfig {
        SiteConfig {
            name: "Fallback".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_file_uses_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = Fetcher::new(dir.path(), Duration::from_secs(1));

        let (config, origin) = load_with_origin(&fetcher, "data/config.json", fallback_config);
        assert_eq!(config, fallback_config());
        assert_eq!(origin, Origin::Fallback);
    }

    #[test]
    fn test_error_status_uses_fallback() {
        let fetcher = Canned(|location| Err(SourceError::Status(location.to_owned(), 404)));
        let projects: Vec<Project> = load(&fetcher, "https://example.com/p.json", Vec::new());
        assert!(projects.is_empty());
    }

    #[test]
    fn test_malformed_json_uses_fallback() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("config.json"), "{ not json").unwrap();
        let fetcher = Fetcher::new(dir.path(), Duration::from_secs(1));

        let config = load(&fetcher, "config.json", fallback_config());
        assert_eq!(config, fallback_config());
    }

    #[test]
    fn test_wrong_document_shape_uses_fallback() {
        let fetcher = Canned(|_| Ok(br#"{"title": "not a list"}"#.to_vec()));
        let (projects, origin) = load_with_origin(&fetcher, "projects.json", defaults::projects);
        assert_eq!(projects, defaults::projects());
        assert_eq!(origin, Origin::Fallback);
    }

    #[test]
    fn test_partial_document_used_as_is() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("config.json"), r#"{"name": "Ada"}"#).unwrap();
        let fetcher = Fetcher::new(dir.path(), Duration::from_secs(1));

        let (config, origin) = load_with_origin(&fetcher, "config.json", defaults::site_config);
        assert_eq!(origin, Origin::Fetched);
        assert_eq!(config.name, "Ada");
        assert!(config.education.is_empty());
    }

    #[test]
    fn test_documents_fall_back_independently() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("data")).unwrap();
        fs::write(
            dir.path().join("data/projects.json"),
            r#"[{"title": "Only", "tags": ["RAG"]}]"#,
        )
        .unwrap();
        let fetcher = Fetcher::new(dir.path(), Duration::from_secs(1));

        let data = load_site_data(&fetcher, "data/config.json", "data/projects.json");
        assert_eq!(data.config_origin, Origin::Fallback);
        assert_eq!(data.config, defaults::site_config());
        assert_eq!(data.projects_origin, Origin::Fetched);
        assert_eq!(data.projects.len(), 1);
        assert_eq!(data.projects[0].title, "Only");
    }

    #[test]
    fn test_is_remote() {
        assert!(is_remote("https://example.com/config.json"));
        assert!(is_remote("HTTP://example.com"));
        assert!(!is_remote("data/config.json"));
        assert!(!is_remote("/abs/config.json"));
    }

    #[test]
    fn test_error_chain_includes_cause() {
        let err = SourceError::Io(
            PathBuf::from("x.json"),
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        assert_eq!(error_chain(&err), "cannot read `x.json`: gone");
    }
}

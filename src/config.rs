// src/config.rs
use url::Url;

use crate::error::ConsoleError;

pub const DEFAULT_CONSOLE_URL: &str = "http://localhost:8000";
pub const DEFAULT_REPOSITORIES_PATH: &str = "/repositories";

#[derive(Clone, Debug)]
pub struct Config {
    pub console_url: Url,
    pub repositories_path: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConsoleError> {
        Self::new(
            &std::env::var("OPHELIA_CI_CONSOLE_URL")
                .unwrap_or_else(|_| DEFAULT_CONSOLE_URL.to_string()),
            &std::env::var("OPHELIA_CI_REPOSITORIES_PATH")
                .unwrap_or_else(|_| DEFAULT_REPOSITORIES_PATH.to_string()),
        )
    }

    pub fn new(console_url: &str, repositories_path: &str) -> Result<Self, ConsoleError> {
        let mut console_url = Url::parse(console_url)
            .map_err(|e| ConsoleError::Config(format!("invalid console url {}: {}", console_url, e)))?;

        if console_url.cannot_be_a_base() {
            return Err(ConsoleError::Config(format!(
                "console url {} cannot be used as a base",
                console_url
            )));
        }

        // A path prefix on the console url is a directory the endpoints live under.
        if !console_url.path().ends_with('/') {
            let path = format!("{}/", console_url.path());
            console_url.set_path(&path);
        }

        let trimmed = repositories_path.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(ConsoleError::Config("repositories path is empty".to_string()));
        }

        let repositories_path = if trimmed.starts_with('/') {
            trimmed.to_string()
        } else {
            format!("/{}", trimmed)
        };

        Ok(Self {
            console_url,
            repositories_path,
        })
    }

    /// Collection endpoint used for creation.
    pub fn collection_path(&self) -> String {
        self.repositories_path.clone()
    }

    /// Absolute url of an endpoint path, kept under the console url's prefix.
    pub fn endpoint(&self, path: &str) -> Result<Url, url::ParseError> {
        join_endpoint(&self.console_url, path)
    }

    /// Member endpoint addressed by repository name; the name is percent-encoded.
    pub fn member_path(&self, name: &str) -> String {
        format!("{}/{}", self.repositories_path, urlencoding::encode(name))
    }
}

/// Joins `path` below `base`. Endpoint paths are written from the console
/// root, so a leading `/` must not discard the base url's own path.
pub fn join_endpoint(base: &Url, path: &str) -> Result<Url, url::ParseError> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let prefix = format!("{}/", base.path());
        base.set_path(&prefix);
    }
    base.join(path.trim_start_matches('/'))
}

impl Default for Config {
    fn default() -> Self {
        Self {
            console_url: Url::parse(DEFAULT_CONSOLE_URL).expect("default console url is valid"),
            repositories_path: DEFAULT_REPOSITORIES_PATH.to_string(),
        }
    }
}

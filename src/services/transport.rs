// src/services/transport.rs
use async_trait::async_trait;
use reqwest::{header, redirect, Client, Method};
use url::Url;

use crate::config::{join_endpoint, Config};
use crate::error::{ConsoleError, SubmitError};

/// JSON request addressed to a path on the console server.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub location: Option<String>,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Redirect responses carrying a Location are how the server confirms a deletion.
    pub fn is_redirect(&self) -> bool {
        (300..400).contains(&self.status) && self.location.is_some()
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `request` and resolves once a response arrives. Only failures to
    /// obtain a response are errors; any HTTP status is a response.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, SubmitError>;
}

pub struct HttpTransport {
    client: Client,
    base: Url,
}

impl HttpTransport {
    pub fn new(base: Url) -> Result<Self, ConsoleError> {
        // Redirects stay visible so the Location header reaches the caller.
        let client = Client::builder()
            .redirect(redirect::Policy::none())
            .build()
            .map_err(|e| ConsoleError::Config(format!("failed to build http client: {}", e)))?;

        Ok(Self { client, base })
    }

    pub fn from_config(config: &Config) -> Result<Self, ConsoleError> {
        Self::new(config.console_url.clone())
    }

    fn url(&self, path: &str) -> Result<Url, SubmitError> {
        join_endpoint(&self.base, path)
            .map_err(|e| SubmitError::Network(format!("invalid request path {}: {}", path, e)))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, SubmitError> {
        let url = self.url(&request.path)?;
        tracing::debug!("{} {}", request.method, url);

        let response = self
            .client
            .request(request.method, url)
            .header(header::CONTENT_TYPE, "application/json")
            .json(&request.body)
            .send()
            .await
            .map_err(|e| SubmitError::Network(e.to_string()))?;

        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        Ok(ApiResponse {
            status: response.status().as_u16(),
            location,
        })
    }
}

//! REST API client.
//!
//! One method per endpoint. Authenticated calls take the session token and
//! send it as `X-Authorization`. Any non-success status becomes
//! [`ClientError::Rejected`] carrying the server's status text.

mod images;
mod petitions;
mod supporters;
mod tiers;
mod users;

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::errors::ClientError;

/// Header name for the session token.
pub const AUTH_HEADER: &str = "X-Authorization";

/// Typed client for the petition API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self::with_client(http, &config.api_url))
    }

    pub fn with_client(http: Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Absolute URL for an API path such as `/petitions/3`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.http.get(self.url(path))
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.http.post(self.url(path))
    }

    fn put(&self, path: &str) -> RequestBuilder {
        self.http.put(self.url(path))
    }

    fn patch(&self, path: &str) -> RequestBuilder {
        self.http.patch(self.url(path))
    }

    fn delete(&self, path: &str) -> RequestBuilder {
        self.http.delete(self.url(path))
    }
}

trait Authorized {
    fn authorized(self, token: &str) -> Self;
}

impl Authorized for RequestBuilder {
    fn authorized(self, token: &str) -> Self {
        self.header(AUTH_HEADER, token)
    }
}

/// Send a request and fail on any non-success status.
async fn send(request: RequestBuilder) -> Result<Response, ClientError> {
    let response = request.send().await?;
    let status = response.status();
    tracing::debug!("{} {}", status.as_u16(), response.url().path());

    if status.is_success() {
        return Ok(response);
    }

    // The server puts its validation message in the status line; reqwest only
    // exposes the canonical reason, so the body text is preferred when present.
    let body = response.text().await.unwrap_or_default();
    let status_text = if body.trim().is_empty() {
        status.canonical_reason().unwrap_or("").to_string()
    } else {
        body.trim().to_string()
    };
    Err(ClientError::Rejected {
        status: status.as_u16(),
        status_text,
    })
}

/// Send a request and decode its JSON body.
async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ClientError> {
    let response = send(request).await?;
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Send a request and discard any body.
async fn send_empty(request: RequestBuilder) -> Result<(), ClientError> {
    send(request).await.map(|_| ())
}

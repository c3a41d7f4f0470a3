//! REST client for the agency API.
//!
//! Every call goes through [`ApiClient::execute`], which stamps an
//! `x-request-id`, attaches the bearer token, logs the exchange and maps
//! non-2xx responses onto [`AdminError`]. Nothing is retried.

pub mod fetch;
pub mod resources;
pub mod upload;

use reqwest::{Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::config::AdminConfig;
use crate::error::{AdminError, Result};
use crate::logging::middleware::{RequestLog, REQUEST_ID_HEADER};

pub use fetch::{FetchState, LoadTicket};
pub use resources::{CatalogEntity, ProductListQuery, Resource};

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(config: &AdminConfig) -> Result<Self> {
        config.validate()?;

        let base_url = Url::parse(config.api_base_url.trim())
            .map_err(|e| AdminError::Config(format!("invalid API_BASE_URL: {}", e)))?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.http_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        tracing::debug!(base_url = %base_url, auth = config.admin_token.is_some(), "api client ready");

        Ok(Self {
            http,
            base_url,
            token: config.admin_token.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute URL for `segments` under the base URL; each segment is percent-encoded.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| AdminError::Config("API_BASE_URL cannot be a base URL".to_string()))?;
            path.pop_if_empty();
            for segment in segments {
                path.push(segment);
            }
        }
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> (RequestLog, RequestBuilder) {
        let log = RequestLog::start(&method, url.as_str());
        let mut builder = self
            .http
            .request(method, url)
            .header(REQUEST_ID_HEADER, log.request_id.as_str());
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        (log, builder)
    }

    async fn execute(&self, log: RequestLog, builder: RequestBuilder, resource: &str) -> Result<Response> {
        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                log.failed(&e);
                return Err(AdminError::Network(e));
            }
        };

        let status = response.status();
        log.finish(status);

        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::NOT_FOUND {
            return Err(AdminError::not_found(resource));
        }

        let body = response.text().await.unwrap_or_default();
        Err(AdminError::Http {
            status,
            message: error_message(status, &body),
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, segments: &[&str], resource: &str) -> Result<T> {
        let (log, builder) = self.request(Method::GET, self.endpoint(segments)?);
        let response = self.execute(log, builder, resource).await?;
        Self::decode(response).await
    }

    pub async fn get_json_with_query<T, Q>(&self, segments: &[&str], query: &Q, resource: &str) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let (log, builder) = self.request(Method::GET, self.endpoint(segments)?);
        let response = self.execute(log, builder.query(query), resource).await?;
        Self::decode(response).await
    }

    pub async fn send_json<B, T>(&self, method: Method, segments: &[&str], body: &B, resource: &str) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let (log, builder) = self.request(method, self.endpoint(segments)?);
        let response = self.execute(log, builder.json(body), resource).await?;
        Self::decode(response).await
    }

    pub async fn delete(&self, segments: &[&str], resource: &str) -> Result<()> {
        let (log, builder) = self.request(Method::DELETE, self.endpoint(segments)?);
        self.execute(log, builder, resource).await?;
        Ok(())
    }
}

/// Pull a readable message out of an error body (`{"error": ...}` or `{"message": ...}`).
fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            ["error", "message"]
                .iter()
                .find_map(|key| v.get(*key).and_then(Value::as_str).map(str::to_string))
        })
        .filter(|msg| !msg.trim().is_empty())
        .unwrap_or_else(|| match status.canonical_reason() {
            Some(reason) => format!("Request failed: {}", reason),
            None => format!("Request failed with status {}", status.as_u16()),
        })
}

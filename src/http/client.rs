//! Request client with per-attempt timeout and linear retry backoff.

use std::time::Duration;

use reqwest::header::{
    CONTENT_TYPE,
    HeaderValue,
};
use reqwest::{
    Method,
    StatusCode,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use super::{
    HttpRequest,
    Outcome,
    ReqwestTransport,
    RequestOptions,
    RetryPolicy,
    Transport,
    TransportError,
};
use crate::config::HttpSettings;

/// Why an attempt (or the whole request) failed. Never shown to callers.
#[derive(Error, Debug)]
pub enum RequestError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("Timed out after {}ms", .0.as_millis())]
    Timeout(Duration),
    #[error("HTTP {}", .0)]
    Status(StatusCode),
    #[error("Failed to decode response body: {0}")]
    Decode(serde_json::Error),
    #[error("Failed to encode request body: {0}")]
    Encode(serde_json::Error),
}

impl RequestError {
    /// Label for structured logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::Timeout(_) => "timeout",
            Self::Status(_) => "status",
            Self::Decode(_) => "decode",
            Self::Encode(_) => "encode",
        }
    }
}

/// HTTP client whose operations always return an [`Outcome`].
#[derive(Debug, Clone)]
pub struct RequestClient<T = ReqwestTransport> {
    transport: T,
    policy: RetryPolicy,
}

impl RequestClient<ReqwestTransport> {
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_settings(settings: &HttpSettings) -> Result<Self, TransportError> {
        Ok(Self::with_transport(ReqwestTransport::new()?, RetryPolicy::from(settings)))
    }
}

impl<T: Transport> RequestClient<T> {
    #[must_use]
    pub const fn with_transport(transport: T, policy: RetryPolicy) -> Self {
        Self { transport, policy }
    }

    #[must_use]
    pub const fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Send `options` to `url`, retrying failed attempts, and decode the JSON body.
    pub async fn request<D: DeserializeOwned>(
        &self,
        url: &str,
        options: RequestOptions,
    ) -> Outcome<D> {
        let result = self
            .execute(url, options)
            .await
            .and_then(|body| serde_json::from_slice::<D>(&body).map_err(RequestError::Decode));

        match result {
            Ok(data) => Outcome::ok(data),
            Err(error) => {
                tracing::error!(url, kind = error.kind(), %error, "Request failed");
                Outcome::failure()
            }
        }
    }

    pub async fn get<D: DeserializeOwned>(&self, url: &str, options: RequestOptions) -> Outcome<D> {
        self.request(url, options.method(Method::GET)).await
    }

    pub async fn post<B, D>(&self, url: &str, body: &B, options: RequestOptions) -> Outcome<D>
    where
        B: Serialize + ?Sized,
        D: DeserializeOwned,
    {
        self.send_json(Method::POST, url, body, options).await
    }

    pub async fn put<B, D>(&self, url: &str, body: &B, options: RequestOptions) -> Outcome<D>
    where
        B: Serialize + ?Sized,
        D: DeserializeOwned,
    {
        self.send_json(Method::PUT, url, body, options).await
    }

    async fn send_json<B, D>(
        &self,
        method: Method,
        url: &str,
        body: &B,
        options: RequestOptions,
    ) -> Outcome<D>
    where
        B: Serialize + ?Sized,
        D: DeserializeOwned,
    {
        match serde_json::to_string(body) {
            Ok(json) => self.request(url, with_json_body(options.method(method), json)).await,
            Err(e) => {
                let error = RequestError::Encode(e);
                tracing::error!(url, kind = error.kind(), %error, "Request failed");
                Outcome::failure()
            }
        }
    }

    /// Bounded attempt loop; returns the body of the first 2xx response.
    async fn execute(&self, url: &str, options: RequestOptions) -> Result<Vec<u8>, RequestError> {
        let policy = self.policy.apply(&options);
        let request = HttpRequest {
            method: options.method,
            url: url.to_string(),
            headers: options.headers,
            body: options.body,
        };

        let mut attempt: u32 = 0;
        loop {
            match self.attempt(request.clone(), policy.timeout).await {
                Ok(body) => return Ok(body),
                Err(error) if attempt >= policy.retries => return Err(error),
                Err(error) => {
                    let delay = policy.backoff(attempt);
                    tracing::warn!(
                        url,
                        attempt = attempt + 1,
                        max_attempts = policy.max_attempts(),
                        kind = error.kind(),
                        %error,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        "Request attempt failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }

    async fn attempt(
        &self,
        request: HttpRequest,
        timeout: Duration,
    ) -> Result<Vec<u8>, RequestError> {
        let response = tokio::time::timeout(timeout, self.transport.send(request))
            .await
            .map_err(|_| RequestError::Timeout(timeout))??;

        if response.status.is_success() {
            Ok(response.body)
        } else {
            Err(RequestError::Status(response.status))
        }
    }
}

/// Body plus `Content-Type: application/json` unless the caller set a content type.
fn with_json_body(mut options: RequestOptions, json: String) -> RequestOptions {
    if !options.headers.contains_key(CONTENT_TYPE) {
        options.headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    }
    options.body = Some(json);
    options
}

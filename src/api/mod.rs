//! HTTP client wrapper for the platform backend
//!
//! Requests run through an explicit pipeline: `prepare` attaches the
//! bearer token when a session holds one, `dispatch` sends and applies the
//! response hook. A 401 clears the session store and forces the navigator
//! to `/login`; a 403 surfaces a permission error; other failures carry a
//! best-effort message extracted from the response body.

mod types;

pub use types::*;

use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::nav::{Navigator, Route};
use crate::session::{Session, SessionStore};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Fallback message when the response body carries none
const DEFAULT_FAILURE_MESSAGE: &str = "Request failed, please retry";

/// Client for the platform's REST API
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client with the configured base URL and fixed request timeout
    pub fn new(config: &ApiConfig) -> Result<Self> {
        if !config.base_url.starts_with("http://") && !config.base_url.starts_with("https://") {
            return Err(Error::Config(format!(
                "base_url must start with http:// or https://, got '{}'",
                config.base_url
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Pipeline pre-hook: start a request, attaching the Authorization
    /// header when the session holds a token.
    pub fn prepare(&self, method: Method, path: &str, session: &Session) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        if session.is_logged_in() {
            builder.bearer_auth(&session.token)
        } else {
            builder
        }
    }

    /// Send a prepared request and apply the response hook.
    pub async fn dispatch(
        &self,
        builder: RequestBuilder,
        store: &mut SessionStore,
        nav: &mut Navigator,
    ) -> Result<Response> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(interpret_failure(status, &body, store, nav))
    }

    /// GET `path` with query parameters, decoding the JSON payload
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        store: &mut SessionStore,
        nav: &mut Navigator,
    ) -> Result<T> {
        let builder = self
            .prepare(Method::GET, path, store.session())
            .query(query);
        let response = self.dispatch(builder, store, nav).await?;
        let body: ApiBody<T> = response.json().await?;
        Ok(body.into_data())
    }

    /// POST a JSON body to `path`, decoding the JSON payload
    pub async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        store: &mut SessionStore,
        nav: &mut Navigator,
    ) -> Result<T> {
        let builder = self.prepare(Method::POST, path, store.session()).json(body);
        let response = self.dispatch(builder, store, nav).await?;
        let parsed: ApiBody<T> = response.json().await?;
        Ok(parsed.into_data())
    }

    /// POST a multipart form to `path`, decoding the JSON payload
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
        store: &mut SessionStore,
        nav: &mut Navigator,
    ) -> Result<T> {
        let builder = self
            .prepare(Method::POST, path, store.session())
            .multipart(form);
        let response = self.dispatch(builder, store, nav).await?;
        let parsed: ApiBody<T> = response.json().await?;
        Ok(parsed.into_data())
    }
}

/// Pipeline post-hook for non-success responses.
///
/// 401 clears the session (one logout) and forces the navigator to
/// `/login` (one redirect); the original error is discarded in favor of
/// the session-expired message. 403 maps to a permission error. Everything
/// else surfaces the message extracted from the body.
pub fn interpret_failure(
    status: StatusCode,
    body: &str,
    store: &mut SessionStore,
    nav: &mut Navigator,
) -> Error {
    match status {
        StatusCode::UNAUTHORIZED => {
            if let Err(e) = store.clear() {
                tracing::warn!("Failed to clear session after 401: {}", e);
            }
            nav.force(Route::Login);
            Error::SessionExpired
        }
        StatusCode::FORBIDDEN => Error::PermissionDenied,
        _ => Error::Api {
            status: status.as_u16(),
            message: extract_message(body),
        },
    }
}

/// Best-effort human message from a JSON error body: the `msg`, `message`,
/// or `error` key, falling back to a default.
pub fn extract_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            ["msg", "message", "error"]
                .iter()
                .find_map(|key| value.get(key).and_then(|m| m.as_str()).map(str::to_string))
        })
        .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string())
}

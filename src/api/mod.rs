//! Thin client for the optional ContextIQ backend.
//!
//! The backend is optional by design: when no base URL is configured the
//! client runs in a disabled mode where every network operation fails fast
//! with instructive text instead of attempting I/O.

use std::env;
use std::error::Error as StdError;
use std::fmt;

use reqwest::Method;
use serde_json::Value;

use crate::utils::url::{construct_api_url, normalize_base_url};

pub mod models;

use self::models::{ChatQuery, ChatReply, ConnectedAccounts, HealthStatus};

/// Environment variable supplying the backend base URL.
pub const BASE_URL_ENV: &str = "CONTEXTIQ_BASE_URL";

/// Message shown wherever a network feature needs the missing configuration.
pub const DISABLED_MESSAGE: &str = "CONTEXTIQ_BASE_URL is not set";

/// Backend configuration resolved once at startup.
///
/// A sum type rather than an optional URL so the disabled mode is a checked
/// branch at every call site instead of a scattered null check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    Configured { base_url: String },
    Disabled,
}

impl Backend {
    /// Resolve from `CONTEXTIQ_BASE_URL`. Absence is a valid configuration,
    /// not an error.
    pub fn from_env() -> Self {
        match env::var(BASE_URL_ENV) {
            Ok(raw) if !raw.trim().is_empty() => Self::from_base_url(raw.trim()),
            _ => Backend::Disabled,
        }
    }

    pub fn from_base_url(base_url: impl AsRef<str>) -> Self {
        Backend::Configured {
            base_url: normalize_base_url(base_url.as_ref()),
        }
    }

    pub fn base_url(&self) -> Option<&str> {
        match self {
            Backend::Configured { base_url } => Some(base_url),
            Backend::Disabled => None,
        }
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self, Backend::Disabled)
    }
}

/// Errors produced by backend calls.
#[derive(Debug)]
pub enum ApiError {
    /// No base URL is configured; raised before any I/O is attempted.
    Disabled,

    /// The HTTP request itself failed (connect, timeout, body read).
    Transport(reqwest::Error),

    /// The backend answered with a non-2xx status.
    Http {
        status: u16,
        /// Best-effort message: the JSON body's `error` field, else the raw
        /// body text, else a generic fallback.
        message: String,
    },

    /// The backend answered 2xx with a payload we could not use.
    UnexpectedPayload(String),
}

impl ApiError {
    /// The user-visible message for this failure, with the generic fallback
    /// applied when nothing better is available.
    pub fn message(&self) -> String {
        let text = self.to_string();
        if text.trim().is_empty() {
            "Request failed".to_string()
        } else {
            text
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Disabled => write!(f, "{}", DISABLED_MESSAGE),
            ApiError::Transport(source) => write!(f, "{}", source),
            ApiError::Http { message, .. } => write!(f, "{}", message),
            ApiError::UnexpectedPayload(detail) => {
                write!(f, "Unexpected response payload: {}", detail)
            }
        }
    }
}

impl StdError for ApiError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            ApiError::Transport(source) => Some(source),
            _ => None,
        }
    }
}

/// A response body, split on the declared content type.
#[derive(Debug)]
pub enum Payload {
    Json(Value),
    Text(String),
}

pub struct ApiClient {
    http: reqwest::Client,
    backend: Backend,
}

impl ApiClient {
    pub fn new(backend: Backend) -> Self {
        Self {
            http: reqwest::Client::new(),
            backend,
        }
    }

    pub fn from_env() -> Self {
        Self::new(Backend::from_env())
    }

    pub fn backend(&self) -> &Backend {
        &self.backend
    }

    pub fn is_disabled(&self) -> bool {
        self.backend.is_disabled()
    }

    fn configured_base(&self) -> Result<&str, ApiError> {
        self.backend.base_url().ok_or(ApiError::Disabled)
    }

    /// Perform one backend call and marshal the response.
    ///
    /// JSON bodies parse into structured values, anything else comes back as
    /// raw text. Non-2xx responses become [`ApiError::Http`] with the body's
    /// `error` field as the message when one is present.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Payload, ApiError> {
        let base = self.configured_base()?;
        let url = construct_api_url(base, path);

        let mut request = self
            .http
            .request(method, url)
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(ApiError::Transport)?;
        let status = response.status();
        let is_json = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|content_type| content_type.contains("json"));
        let text = response.text().await.map_err(ApiError::Transport)?;

        let parsed = if is_json {
            serde_json::from_str::<Value>(&text).ok()
        } else {
            None
        };

        if !status.is_success() {
            let message = parsed
                .as_ref()
                .and_then(|value| value.get("error"))
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| {
                    if text.trim().is_empty() {
                        "Request failed".to_string()
                    } else {
                        text.clone()
                    }
                });
            return Err(ApiError::Http {
                status: status.as_u16(),
                message,
            });
        }

        match parsed {
            Some(value) => Ok(Payload::Json(value)),
            None if is_json => Err(ApiError::UnexpectedPayload(
                "declared JSON body did not parse".to_string(),
            )),
            None => Ok(Payload::Text(text)),
        }
    }

    /// Probe `/health`, folding every failure into the status value.
    pub async fn health(&self) -> HealthStatus {
        match self.request(Method::GET, "/health", None).await {
            Ok(Payload::Json(value)) => {
                let ok = value.get("ok").and_then(Value::as_bool).unwrap_or(false);
                if ok {
                    HealthStatus::ok()
                } else {
                    HealthStatus::down("backend reported not ok")
                }
            }
            Ok(Payload::Text(_)) => HealthStatus::down("unexpected health payload"),
            Err(err) => HealthStatus::down(err.message()),
        }
    }

    /// POST a question to `/chat` and return the reply text.
    ///
    /// Failures propagate; the session controller turns them into the
    /// message-bubble error text.
    pub async fn chat(&self, text: &str) -> Result<String, ApiError> {
        let body = serde_json::to_value(ChatQuery { text })
            .map_err(|err| ApiError::UnexpectedPayload(err.to_string()))?;
        match self.request(Method::POST, "/chat", Some(&body)).await? {
            Payload::Json(value) => {
                let reply: ChatReply = serde_json::from_value(value)
                    .map_err(|err| ApiError::UnexpectedPayload(err.to_string()))?;
                Ok(reply.response)
            }
            Payload::Text(text) => Err(ApiError::UnexpectedPayload(format!(
                "expected JSON chat reply, got: {text}"
            ))),
        }
    }

    /// The URL the Discord connect flow starts at.
    pub fn discord_login_url(&self) -> Result<String, ApiError> {
        let base = self.configured_base()?;
        Ok(construct_api_url(base, "/discord/login"))
    }

    /// Open the Discord connect flow in the system browser.
    ///
    /// A navigation side effect, not a data fetch: the backend drives the
    /// rest of the OAuth flow in the browser.
    pub fn connect_discord(&self) -> Result<(), Box<dyn StdError>> {
        let url = self.discord_login_url()?;
        crate::utils::browser::open_in_browser(&url)
    }

    /// GET `/discord/connected` and return the `connected` rows, or an empty
    /// list when the field is absent.
    pub async fn connected_guilds(&self) -> Result<Vec<Value>, ApiError> {
        match self.request(Method::GET, "/discord/connected", None).await? {
            Payload::Json(value) => {
                let accounts: ConnectedAccounts = serde_json::from_value(value)
                    .map_err(|err| ApiError::UnexpectedPayload(err.to_string()))?;
                Ok(accounts.connected)
            }
            Payload::Text(text) => Err(ApiError::UnexpectedPayload(format!(
                "expected JSON guild list, got: {text}"
            ))),
        }
    }
}

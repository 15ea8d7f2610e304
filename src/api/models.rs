use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Serialize)]
pub struct ChatQuery<'a> {
    pub text: &'a str,
}

#[derive(Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub response: String,
}

/// Backend health as shown in a status display.
///
/// Health probes are expected to fail; this is folded from either a live
/// `{ok: bool}` payload or a local error, never raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthStatus {
    pub ok: bool,
    pub error: Option<String>,
}

impl HealthStatus {
    pub fn ok() -> Self {
        Self {
            ok: true,
            error: None,
        }
    }

    pub fn down(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: Some(error.into()),
        }
    }
}

/// Rows from `/discord/connected`. The backend returns loosely shaped guild
/// records, so entries stay as raw JSON values for display.
#[derive(Deserialize)]
pub struct ConnectedAccounts {
    #[serde(default)]
    pub connected: Vec<Value>,
}

use chrono::Local;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Role {
    User,
    Assistant,
    System,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
        }
    }

    pub fn is_user(self) -> bool {
        self == Role::User
    }

    pub fn is_assistant(self) -> bool {
        self == Role::Assistant
    }
}

impl AsRef<str> for Role {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl TryFrom<&str> for Role {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "user" => Ok(Role::User),
            "assistant" => Ok(Role::Assistant),
            "system" => Ok(Role::System),
            _ => Err(format!("invalid message role: {value}")),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl From<Role> for String {
    fn from(value: Role) -> Self {
        value.as_str().to_string()
    }
}

/// One entry in a chat transcript.
///
/// Messages are append-only; the only mutation the session controller
/// performs after append is replacing the text of the assistant placeholder
/// when its request settles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: u64,
    pub role: Role,
    pub text: String,
    /// Display-formatted wall-clock time captured at append.
    pub timestamp: String,
}

impl ChatMessage {
    pub fn new(id: u64, role: Role, text: impl Into<String>) -> Self {
        Self {
            id,
            role,
            text: text.into(),
            timestamp: display_time(),
        }
    }

    pub fn is_user(&self) -> bool {
        self.role.is_user()
    }

    pub fn is_assistant(&self) -> bool {
        self.role.is_assistant()
    }
}

/// HH:MM local time, matching what a message bubble shows.
pub fn display_time() -> String {
    Local::now().format("%H:%M").to_string()
}

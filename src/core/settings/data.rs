use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Platforms a workspace can be connected to.
///
/// A fixed enum instead of a stringly-keyed map so a typo'd platform id is a
/// compile error rather than a silently ignored key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Slack,
    Teams,
    Discord,
    Gmail,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::Slack,
        Platform::Teams,
        Platform::Discord,
        Platform::Gmail,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Slack => "slack",
            Platform::Teams => "teams",
            Platform::Discord => "discord",
            Platform::Gmail => "gmail",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Platform::Slack => "Slack",
            Platform::Teams => "Teams",
            Platform::Discord => "Discord",
            Platform::Gmail => "Gmail",
        }
    }
}

impl TryFrom<&str> for Platform {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "slack" => Ok(Platform::Slack),
            "teams" => Ok(Platform::Teams),
            "discord" => Ok(Platform::Discord),
            "gmail" => Ok(Platform::Gmail),
            _ => Err(format!("unknown platform: {value}")),
        }
    }
}

/// Per-platform connection flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectedPlatforms {
    pub slack: bool,
    pub teams: bool,
    pub discord: bool,
    pub gmail: bool,
}

impl ConnectedPlatforms {
    pub fn get(&self, platform: Platform) -> bool {
        match platform {
            Platform::Slack => self.slack,
            Platform::Teams => self.teams,
            Platform::Discord => self.discord,
            Platform::Gmail => self.gmail,
        }
    }

    pub fn set(&mut self, platform: Platform, value: bool) {
        match platform {
            Platform::Slack => self.slack = value,
            Platform::Teams => self.teams = value,
            Platform::Discord => self.discord = value,
            Platform::Gmail => self.gmail = value,
        }
    }

    pub fn none() -> Self {
        Self {
            slack: false,
            teams: false,
            discord: false,
            gmail: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Language {
    English,
    Spanish,
    French,
    German,
    Japanese,
}

impl Language {
    pub const ALL: [Language; 5] = [
        Language::English,
        Language::Spanish,
        Language::French,
        Language::German,
        Language::Japanese,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Spanish => "Spanish",
            Language::French => "French",
            Language::German => "German",
            Language::Japanese => "Japanese",
        }
    }

    /// The next language in the fixed cycle, wrapping around at the end.
    pub fn next(self) -> Language {
        let index = Self::ALL
            .iter()
            .position(|candidate| *candidate == self)
            .unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

impl TryFrom<&str> for Language {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|language| language.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| format!("unknown language: {value}"))
    }
}

impl TryFrom<String> for Language {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl From<Language> for String {
    fn from(value: Language) -> Self {
        value.as_str().to_string()
    }
}

/// Color scheme persisted by the mobile client as a bare string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorScheme {
    #[default]
    Dark,
    Light,
}

impl ColorScheme {
    pub fn as_str(self) -> &'static str {
        match self {
            ColorScheme::Dark => "dark",
            ColorScheme::Light => "light",
        }
    }

    /// Parse a stored scheme string; anything unrecognized maps to `None` so
    /// callers fall back to the default.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "dark" => Some(ColorScheme::Dark),
            "light" => Some(ColorScheme::Light),
            _ => None,
        }
    }
}

/// Profile identity the mobile client keeps under its own storage key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub name: String,
    pub email: String,
}

impl Default for ProfileRecord {
    fn default() -> Self {
        Self {
            name: "John Doe".to_string(),
            email: "john.doe@gmail.com".to_string(),
        }
    }
}

/// The singleton user-preference record.
///
/// Always fully populated: loading merges whatever was stored over this
/// default shape, so partial or malformed blobs never produce holes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsRecord {
    pub name: String,
    pub email: String,
    pub notifications: bool,
    pub dark_mode: bool,
    pub language: Language,
    pub connected: ConnectedPlatforms,
}

impl Default for SettingsRecord {
    fn default() -> Self {
        Self {
            name: "John Doe".to_string(),
            email: "john.doe@gmail.com".to_string(),
            notifications: true,
            dark_mode: true,
            language: Language::English,
            connected: ConnectedPlatforms {
                slack: true,
                teams: true,
                discord: false,
                gmail: false,
            },
        }
    }
}

impl SettingsRecord {
    /// Merge a parsed settings blob over the defaults, field by field.
    ///
    /// Top-level fields are taken from the blob when present and well typed;
    /// the nested `connected` map merges one platform key at a time rather
    /// than being replaced wholesale. Unknown fields are ignored, and a field
    /// of the wrong type keeps its default.
    pub fn merged_with(value: &Value) -> Self {
        let mut record = Self::default();

        if let Some(name) = value.get("name").and_then(Value::as_str) {
            record.name = name.to_string();
        }
        if let Some(email) = value.get("email").and_then(Value::as_str) {
            record.email = email.to_string();
        }
        if let Some(notifications) = value.get("notifications").and_then(Value::as_bool) {
            record.notifications = notifications;
        }
        if let Some(dark_mode) = value.get("dark_mode").and_then(Value::as_bool) {
            record.dark_mode = dark_mode;
        }
        if let Some(language) = value
            .get("language")
            .and_then(Value::as_str)
            .and_then(|raw| Language::try_from(raw).ok())
        {
            record.language = language;
        }
        if let Some(connected) = value.get("connected").and_then(Value::as_object) {
            for platform in Platform::ALL {
                if let Some(flag) = connected.get(platform.as_str()).and_then(Value::as_bool) {
                    record.connected.set(platform, flag);
                }
            }
        }

        record
    }
}

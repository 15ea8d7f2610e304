use tracing::debug;

use super::data::{ColorScheme, Language, Platform, ProfileRecord, SettingsRecord};
use super::io::{KvStore, StoreError, Variant, PROFILE_KEY, THEME_KEY};

/// Owner of the in-memory settings record and its persistence.
///
/// All mutation happens on one logical UI thread, so there is no locking;
/// each setter copies the record, overwrites the targeted fields, and kicks
/// off a best-effort write of the full record. The in-memory record stays
/// authoritative for the session even when a write fails.
pub struct SettingsStore {
    kv: KvStore,
    variant: Variant,
    record: SettingsRecord,
}

impl SettingsStore {
    /// Open the store for a variant, restoring the persisted record.
    pub fn open(kv: KvStore, variant: Variant) -> Self {
        let record = Self::load(&kv, variant);
        Self {
            kv,
            variant,
            record,
        }
    }

    /// Read the persisted record for `variant`.
    ///
    /// Absent or unparsable blobs fall back to the default record; otherwise
    /// the stored fields are merged over the defaults (nested platform flags
    /// merge per key). Read failures are swallowed the same way.
    pub fn load(kv: &KvStore, variant: Variant) -> SettingsRecord {
        let raw = match kv.read(variant.settings_key()) {
            Ok(Some(raw)) => raw,
            Ok(None) => return SettingsRecord::default(),
            Err(err) => {
                debug!("settings read failed, using defaults: {err}");
                return SettingsRecord::default();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => SettingsRecord::merged_with(&value),
            Err(err) => {
                debug!("settings blob unparsable, using defaults: {err}");
                SettingsRecord::default()
            }
        }
    }

    pub fn record(&self) -> &SettingsRecord {
        &self.record
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Serialize and write the full current record under the variant's key.
    pub fn save(&self) -> Result<(), StoreError> {
        let contents = serde_json::to_string_pretty(&self.record).map_err(StoreError::Serialize)?;
        self.kv.write(self.variant.settings_key(), &contents)
    }

    /// Fire-and-forget persistence.
    ///
    /// Failure to persist is intentional to swallow here: the caller never
    /// waits on the write and never sees the error, matching the product's
    /// "settings writes are never user-visible failures" contract.
    fn persist_best_effort(&self) {
        if let Err(err) = self.save() {
            debug!("settings write failed: {err}");
        }
    }

    pub fn set_profile(&mut self, name: impl Into<String>, email: impl Into<String>) {
        self.record.name = name.into();
        self.record.email = email.into();
        self.persist_best_effort();
    }

    pub fn set_notifications(&mut self, enabled: bool) {
        self.record.notifications = enabled;
        self.persist_best_effort();
    }

    pub fn set_dark_mode(&mut self, enabled: bool) {
        self.record.dark_mode = enabled;
        self.persist_best_effort();
    }

    pub fn set_language(&mut self, language: Language) {
        self.record.language = language;
        self.persist_best_effort();
    }

    /// Advance to the next language in the cycle and return it.
    pub fn cycle_language(&mut self) -> Language {
        let next = self.record.language.next();
        self.record.language = next;
        self.persist_best_effort();
        next
    }

    pub fn set_connected(&mut self, platform: Platform, connected: bool) {
        self.record.connected.set(platform, connected);
        self.persist_best_effort();
    }

    /// Clear every platform flag in one record update and a single write.
    pub fn disconnect_all(&mut self) {
        self.record.connected = super::data::ConnectedPlatforms::none();
        self.persist_best_effort();
    }

    /// Mobile-variant profile record kept under its own key.
    pub fn load_profile(&self) -> ProfileRecord {
        let raw = match self.kv.read(PROFILE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return ProfileRecord::default(),
            Err(err) => {
                debug!("profile read failed, using defaults: {err}");
                return ProfileRecord::default();
            }
        };
        match serde_json::from_str::<serde_json::Value>(&raw) {
            Ok(value) => {
                let mut profile = ProfileRecord::default();
                if let Some(name) = value.get("name").and_then(serde_json::Value::as_str) {
                    profile.name = name.to_string();
                }
                if let Some(email) = value.get("email").and_then(serde_json::Value::as_str) {
                    profile.email = email.to_string();
                }
                profile
            }
            Err(err) => {
                debug!("profile blob unparsable, using defaults: {err}");
                ProfileRecord::default()
            }
        }
    }

    pub fn save_profile(&self, profile: &ProfileRecord) -> Result<(), StoreError> {
        let contents = serde_json::to_string(profile).map_err(StoreError::Serialize)?;
        self.kv.write(PROFILE_KEY, &contents)
    }

    /// Mobile-variant color scheme, stored as the bare scheme string.
    pub fn load_theme(&self) -> ColorScheme {
        match self.kv.read(THEME_KEY) {
            Ok(Some(raw)) => ColorScheme::parse(&raw).unwrap_or_default(),
            Ok(None) => ColorScheme::default(),
            Err(err) => {
                debug!("theme read failed, using default scheme: {err}");
                ColorScheme::default()
            }
        }
    }

    pub fn save_theme(&self, scheme: ColorScheme) {
        if let Err(err) = self.kv.write(THEME_KEY, scheme.as_str()) {
            debug!("theme write failed: {err}");
        }
    }
}

//! Settings inspection and mutation commands

use std::error::Error;

use clap::Subcommand;

use crate::core::settings::{
    KvStore, Language, Platform, ProfileRecord, SettingsStore, Variant,
};

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Print the current settings record
    Show,
    /// Set one settings field (notifications, dark-mode, language, or a
    /// platform id: slack, teams, discord, gmail)
    Set {
        /// Field to set
        key: String,
        /// Value: true/false for toggles, a language name for language
        value: String,
    },
    /// Advance the display language to the next one in the cycle
    CycleLanguage,
    /// Disconnect every platform in one update
    DisconnectAll,
    /// Update the profile name and email
    Profile { name: String, email: String },
}

fn parse_toggle(value: &str) -> Result<bool, Box<dyn Error>> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" => Ok(true),
        "false" | "off" | "no" => Ok(false),
        _ => Err(format!("expected true/false, got: {value}").into()),
    }
}

pub fn run_settings(action: SettingsAction, variant: Variant) -> Result<(), Box<dyn Error>> {
    let kv = KvStore::open_default();
    let store_location = crate::core::settings::io::path_display(kv.location());
    let mut store = SettingsStore::open(kv, variant);

    match action {
        SettingsAction::Show => {
            let record = store.record();
            println!("Store:         {store_location}");
            println!("Profile:       {} <{}>", record.name, record.email);
            println!("Notifications: {}", record.notifications);
            println!("Dark mode:     {}", record.dark_mode);
            println!("Language:      {}", record.language.as_str());
            println!("Connected platforms:");
            for platform in Platform::ALL {
                let state = if record.connected.get(platform) {
                    "connected"
                } else {
                    "not connected"
                };
                println!("  {:<8} {}", platform.label(), state);
            }
        }
        SettingsAction::Set { key, value } => match key.as_str() {
            "notifications" => store.set_notifications(parse_toggle(&value)?),
            "dark-mode" => store.set_dark_mode(parse_toggle(&value)?),
            "language" => {
                let language = Language::try_from(value.as_str())?;
                store.set_language(language);
            }
            other => match Platform::try_from(other) {
                Ok(platform) => store.set_connected(platform, parse_toggle(&value)?),
                Err(_) => {
                    return Err(format!(
                        "unknown settings key: {other} (expected notifications, dark-mode, \
                         language, or a platform id)"
                    )
                    .into())
                }
            },
        },
        SettingsAction::CycleLanguage => {
            let next = store.cycle_language();
            println!("Language set to {}", next.as_str());
        }
        SettingsAction::DisconnectAll => {
            store.disconnect_all();
            println!("All platforms disconnected.");
        }
        SettingsAction::Profile { name, email } => {
            store.set_profile(name.clone(), email.clone());
            if variant == Variant::Mobile {
                // The mobile client keeps a standalone profile record; its
                // save path is the one place with an explicit acknowledgment.
                store.save_profile(&ProfileRecord { name, email })?;
            }
            println!("Saved. Your profile has been updated.");
        }
    }

    Ok(())
}

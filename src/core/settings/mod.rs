pub mod data;
pub mod io;
pub mod store;

pub use self::data::{
    ColorScheme, ConnectedPlatforms, Language, Platform, ProfileRecord, SettingsRecord,
};
pub use self::io::{KvStore, StoreError, Variant};
pub use self::store::SettingsStore;

#[cfg(test)]
mod tests;

use super::data::{ColorScheme, Language, Platform, ProfileRecord, SettingsRecord};
use super::io::{KvStore, Variant};
use super::store::SettingsStore;
use tempfile::TempDir;

fn temp_store(variant: Variant) -> (TempDir, SettingsStore) {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let store = SettingsStore::open(KvStore::at(temp_dir.path()), variant);
    (temp_dir, store)
}

#[test]
fn load_on_empty_storage_returns_exact_defaults() {
    let (_dir, store) = temp_store(Variant::Web);
    assert_eq!(*store.record(), SettingsRecord::default());
}

#[test]
fn settings_round_trip_through_disk() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let kv = KvStore::at(temp_dir.path());

    let mut store = SettingsStore::open(kv.clone(), Variant::Web);
    store.set_profile("Ada Lovelace", "ada@example.com");
    store.set_notifications(false);
    store.set_language(Language::French);
    store.set_connected(Platform::Discord, true);
    let written = store.record().clone();

    let reloaded = SettingsStore::load(&kv, Variant::Web);
    assert_eq!(reloaded, written);
}

#[test]
fn single_field_blob_overrides_only_that_field() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let kv = KvStore::at(temp_dir.path());
    kv.write(Variant::Web.settings_key(), r#"{"notifications": false}"#)
        .expect("write failed");

    let record = SettingsStore::load(&kv, Variant::Web);
    let mut expected = SettingsRecord::default();
    expected.notifications = false;
    assert_eq!(record, expected);
}

#[test]
fn unparsable_blob_falls_back_to_defaults() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let kv = KvStore::at(temp_dir.path());
    kv.write(Variant::Web.settings_key(), "{not json")
        .expect("write failed");

    assert_eq!(
        SettingsStore::load(&kv, Variant::Web),
        SettingsRecord::default()
    );
}

#[test]
fn disconnect_all_is_idempotent() {
    let (_dir, mut store) = temp_store(Variant::Web);
    store.set_connected(Platform::Gmail, true);

    store.disconnect_all();
    let once = store.record().clone();
    store.disconnect_all();
    assert_eq!(*store.record(), once);
    for platform in Platform::ALL {
        assert!(!store.record().connected.get(platform));
    }
}

#[test]
fn cycling_language_full_circle_restores_start() {
    let (_dir, mut store) = temp_store(Variant::Web);
    let start = store.record().language;
    for _ in 0..Language::ALL.len() {
        store.cycle_language();
    }
    assert_eq!(store.record().language, start);
}

#[test]
fn variants_persist_under_distinct_keys() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let kv = KvStore::at(temp_dir.path());

    let mut web = SettingsStore::open(kv.clone(), Variant::Web);
    web.set_dark_mode(false);

    // The mobile key was never written, so the mobile view keeps defaults.
    let mobile = SettingsStore::load(&kv, Variant::Mobile);
    assert!(mobile.dark_mode);
    assert!(!SettingsStore::load(&kv, Variant::Web).dark_mode);
}

#[test]
fn mobile_profile_record_round_trips() {
    let (_dir, store) = temp_store(Variant::Mobile);
    assert_eq!(store.load_profile(), ProfileRecord::default());

    let profile = ProfileRecord {
        name: "Grace Hopper".to_string(),
        email: "grace@example.com".to_string(),
    };
    store.save_profile(&profile).expect("profile save failed");
    assert_eq!(store.load_profile(), profile);
}

#[test]
fn theme_scheme_round_trips_as_bare_string() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let kv = KvStore::at(temp_dir.path());
    let store = SettingsStore::open(kv.clone(), Variant::Mobile);

    assert_eq!(store.load_theme(), ColorScheme::Dark);
    store.save_theme(ColorScheme::Light);
    assert_eq!(store.load_theme(), ColorScheme::Light);

    // The stored blob is the raw scheme word, not JSON.
    let raw = kv.read(super::io::THEME_KEY).expect("read failed");
    assert_eq!(raw.as_deref(), Some("light"));

    // Garbage on disk falls back to the default scheme.
    kv.write(super::io::THEME_KEY, "solarized").expect("write failed");
    assert_eq!(store.load_theme(), ColorScheme::Dark);
}

#[test]
fn write_failures_never_surface_from_setters() {
    // Root the store below a regular file so every write fails.
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let blocker = temp_dir.path().join("occupied");
    std::fs::write(&blocker, b"not a directory").expect("setup failed");

    let mut store = SettingsStore::open(KvStore::at(blocker.join("store")), Variant::Web);
    store.set_notifications(false);
    store.disconnect_all();
    store.save_theme(ColorScheme::Light);

    // In-memory state remains authoritative despite the failed writes.
    assert!(!store.record().notifications);
}

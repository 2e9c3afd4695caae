use contact_book::config::Config;
use contact_book::ContactStore;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_save_and_load_round_trip_through_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("config.toml");

    let mut config = Config::default();
    config.store.seed_defaults = false;
    config.store.max_history_depth = Some(3);
    config.server.port = 7100;
    config.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_loaded_store_settings_drive_the_store() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    fs::write(
        &path,
        "[store]\nseed_defaults = false\nmax_history_depth = 2\n",
    )
    .unwrap();

    let config = Config::load_from(&path).unwrap();
    let mut store = ContactStore::from_config(&config.store);
    assert!(store.is_empty());

    for name in ["A", "B", "C"] {
        store.add(name, "x@example.com");
    }
    assert_eq!(store.undo_depth(), 2);
}

#[test]
fn test_missing_file_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let result = Config::load_from(&temp_dir.path().join("absent.toml"));

    let message = format!("{:#}", result.unwrap_err());
    assert!(message.contains("Failed to read config file"));
}

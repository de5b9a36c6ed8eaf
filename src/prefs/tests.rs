use tempfile::tempdir;

use super::*;

#[test]
fn theme_defaults_to_dark_when_absent() {
    let store = MemoryStore::default();
    assert_eq!(load_theme(&store), Theme::Dark);
}

#[test]
fn theme_defaults_to_dark_when_store_fails() {
    let mut store = MemoryStore {
        failing: true,
        ..MemoryStore::default()
    };
    save_theme(&mut store, Theme::Light);
    assert_eq!(load_theme(&store), Theme::Dark);
}

#[test]
fn theme_defaults_to_dark_on_unknown_value() {
    let mut store = MemoryStore::default();
    store.set(THEME_KEY, "sepia").unwrap();
    assert_eq!(load_theme(&store), Theme::Dark);
}

#[test]
fn theme_toggle_survives_a_reload_through_the_file_store() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("state.toml");

    let mut store = FileStore::new(Some(path.clone()));
    let theme = load_theme(&store).toggled();
    save_theme(&mut store, theme);

    let reopened = FileStore::new(Some(path));
    assert_eq!(load_theme(&reopened), Theme::Light);
}

#[test]
fn file_store_keeps_other_keys() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("state.toml");
    let mut store = FileStore::new(Some(path));

    store.set("other", "value").unwrap();
    store.set(THEME_KEY, "light").unwrap();

    assert_eq!(store.get("other").unwrap().as_deref(), Some("value"));
    assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("light"));
}

#[test]
fn file_store_without_path_is_unavailable_and_corrupt_file_falls_back() {
    let store = FileStore::new(None);
    assert!(matches!(store.get(THEME_KEY), Err(StoreError::Unavailable)));
    assert_eq!(load_theme(&store), Theme::Dark);

    let dir = tempdir().unwrap();
    let path = dir.path().join("state.toml");
    std::fs::write(&path, "this is = = not toml").unwrap();
    let store = FileStore::new(Some(path));
    assert!(matches!(store.get(THEME_KEY), Err(StoreError::Parse(_))));
    assert_eq!(load_theme(&store), Theme::Dark);
}

#[test]
fn saving_over_a_corrupt_file_replaces_it() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("state.toml");
    std::fs::write(&path, "this is = = not toml").unwrap();

    let mut store = FileStore::new(Some(path.clone()));
    save_theme(&mut store, Theme::Light);

    let reopened = FileStore::new(Some(path));
    assert_eq!(load_theme(&reopened), Theme::Light);
}

#[test]
fn toggled_flips_between_dark_and_light() {
    assert_eq!(Theme::Dark.toggled(), Theme::Light);
    assert_eq!(Theme::Light.toggled().toggled(), Theme::Light);
    assert_eq!(Theme::parse(" light "), Some(Theme::Light));
}

use super::*;
use crate::catalog::{Track, surahs};

fn track(n: usize) -> Track {
    surahs()[n].clone()
}

#[test]
fn toggle_appends_then_removes() {
    let mut set = FavoritesSet::new();
    assert!(set.toggle(&track(0)));
    assert!(set.toggle(&track(2)));
    assert!(set.contains(&track(0).stream_url));
    assert_eq!(set.len(), 2);

    assert!(!set.toggle(&track(0)));
    assert!(!set.contains(&track(0).stream_url));
    assert_eq!(set.tracks()[0].stream_url, track(2).stream_url);
}

#[test]
fn toggling_twice_restores_set_and_order() {
    let mut set = FavoritesSet::new();
    set.toggle(&track(1));
    set.toggle(&track(3));
    set.toggle(&track(4));
    let before: Vec<String> = set.tracks().iter().map(|t| t.stream_url.clone()).collect();

    set.toggle(&track(5));
    set.toggle(&track(5));
    let after: Vec<String> = set.tracks().iter().map(|t| t.stream_url.clone()).collect();
    assert_eq!(before, after);
}

#[test]
fn toggle_matches_by_url_not_id() {
    let mut set = FavoritesSet::new();
    set.toggle(&track(0));

    let mut same_stream = track(0);
    same_stream.id = 4242;
    assert!(!set.toggle(&same_stream));
    assert!(set.is_empty());
}

#[test]
fn serialize_then_deserialize_preserves_order() {
    let mut set = FavoritesSet::new();
    set.toggle(&track(4));
    set.toggle(&track(1));

    let restored = FavoritesSet::deserialize(&set.serialize());
    let urls: Vec<&str> = restored.tracks().iter().map(|t| t.stream_url.as_str()).collect();
    assert_eq!(urls, vec![track(4).stream_url.as_str(), track(1).stream_url.as_str()]);
}

#[test]
fn malformed_input_yields_empty_set() {
    for raw in ["", "not json", "{\"a\":1}", "[{\"id\":\"x\"}]", "null"] {
        assert!(FavoritesSet::deserialize(raw).is_empty(), "input: {raw:?}");
    }
}

#[test]
fn deserialize_drops_repeated_urls() {
    let raw = format!(
        "[{a},{b},{a}]",
        a = serde_json::to_string(&track(0)).unwrap(),
        b = serde_json::to_string(&track(1)).unwrap()
    );
    let set = FavoritesSet::deserialize(&raw);
    assert_eq!(set.len(), 2);
    assert_eq!(set.tracks()[0].stream_url, track(0).stream_url);
}

#[test]
fn favorites_persist_every_toggle() {
    let store = MemoryStore::new();
    let mut favorites = Favorites::load(Box::new(store.clone()), "favorites_v1");
    assert!(favorites.tracks().is_empty());

    favorites.toggle(&track(2));
    let stored = store.get("favorites_v1").unwrap().unwrap();
    assert_eq!(FavoritesSet::deserialize(&stored).len(), 1);

    favorites.toggle(&track(2));
    let stored = store.get("favorites_v1").unwrap().unwrap();
    assert!(FavoritesSet::deserialize(&stored).is_empty());
}

#[test]
fn favorites_load_existing_value() {
    let mut seed = FavoritesSet::new();
    seed.toggle(&track(3));
    let store = MemoryStore::with_value("favs", &seed.serialize());

    let favorites = Favorites::load(Box::new(store), "favs");
    assert!(favorites.contains(&track(3).stream_url));
    assert_eq!(favorites.tracks().len(), 1);
}

#[test]
fn favorites_load_corrupt_value_as_empty() {
    let store = MemoryStore::with_value("favorites_v1", "[{broken");
    let favorites = Favorites::load(Box::new(store), "favorites_v1");
    assert!(favorites.tracks().is_empty());
}

#[test]
fn file_store_round_trips_and_reports_missing_keys() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::new(dir.path().join("nested"));

    assert_eq!(store.get("favorites_v1").unwrap(), None);
    store.set("favorites_v1", "[]").unwrap();
    assert_eq!(store.get("favorites_v1").unwrap().as_deref(), Some("[]"));
    assert!(store.dir().join("favorites_v1.json").exists());
    assert!(!store.dir().join("favorites_v1.json.tmp").exists());

    store.set("favorites_v1", "[1]").unwrap();
    assert_eq!(store.get("favorites_v1").unwrap().as_deref(), Some("[1]"));
}

#[test]
fn file_store_sanitizes_keys() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::new(dir.path());
    store.set("../escape/me", "x").unwrap();
    assert!(dir.path().join("___escape_me.json").exists());
}

#[test]
fn favorites_survive_a_restart_with_file_store() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut favorites = Favorites::load(Box::new(FileStore::new(dir.path())), "favorites_v1");
        favorites.toggle(&track(5));
        favorites.toggle(&track(0));
    }
    let favorites = Favorites::load(Box::new(FileStore::new(dir.path())), "favorites_v1");
    let urls: Vec<&str> = favorites.tracks().iter().map(|t| t.stream_url.as_str()).collect();
    assert_eq!(urls, vec![track(5).stream_url.as_str(), track(0).stream_url.as_str()]);
}

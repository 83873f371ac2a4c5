use formbook::model::Entry;
use formbook::store::fs::FileStore;
use formbook::store::{EntryStore, ENTRIES_KEY};
use tempfile::TempDir;

fn sample(name: &str) -> Entry {
    Entry::new(
        name.to_string(),
        format!("{}@example.com", name.to_lowercase()),
        "9812345678".to_string(),
    )
}

#[test]
fn entries_survive_reopening_the_store() {
    let dir = TempDir::new().unwrap();
    let entries = vec![sample("Ram"), sample("Sita")];

    let mut store = EntryStore::new(FileStore::new(dir.path()));
    store.save_all(&entries).unwrap();
    drop(store);

    let mut store = EntryStore::new(FileStore::new(dir.path()));
    let loaded = store.load_all().unwrap();
    assert_eq!(loaded, entries);
}

#[test]
fn the_data_lives_in_one_json_file_under_the_well_known_key() {
    let dir = TempDir::new().unwrap();
    let mut store = EntryStore::new(FileStore::new(dir.path()));
    store.save_all(&[sample("Ram")]).unwrap();

    let path = dir.path().join(format!("{ENTRIES_KEY}.json"));
    let raw = std::fs::read_to_string(&path).unwrap();

    // Wire format is camelCase and human-readable.
    assert!(raw.contains("\"phoneNumber\""));
    assert!(raw.contains("\n  "));
    let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 1);
}

#[test]
fn writes_leave_no_temp_files_behind() {
    let dir = TempDir::new().unwrap();
    let mut store = EntryStore::new(FileStore::new(dir.path()));
    store.save_all(&[sample("Ram")]).unwrap();
    store.save_all(&[sample("Ram"), sample("Sita")]).unwrap();

    let names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec![format!("{ENTRIES_KEY}.json")]);
}

#[test]
fn a_missing_file_reads_as_no_entries() {
    let dir = TempDir::new().unwrap();
    let mut store = EntryStore::new(FileStore::new(dir.path()));
    assert!(store.load_all().unwrap().is_empty());
}

#[test]
fn corrupt_data_resets_to_an_empty_list() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(format!("{ENTRIES_KEY}.json"));
    std::fs::write(&path, "{ not json").unwrap();

    let mut store = EntryStore::new(FileStore::new(dir.path()));
    assert!(store.load_all().unwrap().is_empty());
}

#[test]
fn the_first_write_creates_missing_directories() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("nested").join("data");

    let mut store = EntryStore::new(FileStore::new(&root));
    store.save_all(&[sample("Ram")]).unwrap();

    assert!(root.join(format!("{ENTRIES_KEY}.json")).exists());
}

use oeuvre::api::{OeuvreApi, SearchOptions};
use oeuvre::format::Verbosity;
use oeuvre::store::fs_backend::FsBackend;
use oeuvre::store::{FileStore, LoadMode, RecordStore};
use std::fs;

fn store_in(dir: &tempfile::TempDir) -> FileStore {
    FileStore::with_backend(FsBackend::new(dir.path()))
}

#[test]
fn records_in_subdirectories_are_found() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("stories")).unwrap();
    fs::write(
        dir.path().join("stories/lottery.txt"),
        "title: The Lottery\ncreator: Shirley Jackson\ntype: story\n",
    )
    .unwrap();
    fs::write(dir.path().join("notes.md"), "not a record").unwrap();

    let report = store_in(&dir).load(LoadMode::Strict).unwrap();
    assert_eq!(report.records.len(), 1);
    assert_eq!(report.records[0].filename, "stories/lottery.txt");
}

#[test]
fn staged_copies_are_not_records() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    store.stage("half-done.txt", "title:\n").unwrap();

    let report = store.load(LoadMode::Strict).unwrap();
    assert!(report.records.is_empty());
    assert!(dir.path().join("editing/half-done.txt").exists());
}

#[test]
fn missing_collection_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::with_backend(FsBackend::new(dir.path().join("absent")));
    let api = OeuvreApi::open(store, "locations.json", LoadMode::Strict).unwrap();
    let result = api
        .search(&Vec::<String>::new(), SearchOptions::default())
        .unwrap();
    assert!(result.listed_records.is_empty());
}

#[test]
fn new_film_lands_in_films_directory() {
    let dir = tempfile::tempdir().unwrap();
    let api = OeuvreApi::open(store_in(&dir), "locations.json", LoadMode::Strict).unwrap();

    api.check_new_name("stalker.txt").unwrap();
    let staged = api.stage_new("stalker.txt").unwrap().path;
    fs::write(
        &staged,
        "title: Stalker\ncreator: Andrei Tarkovsky\ntype: film\nyear: 1979\n",
    )
    .unwrap();

    let record = api.apply_new("stalker.txt", "Sun 24 May 2020 08:55 AM -07:00").unwrap();
    api.commit_new("stalker.txt", record).unwrap();

    let saved = fs::read_to_string(dir.path().join("films/stalker.txt")).unwrap();
    assert_eq!(
        saved,
        "title: Stalker\ncreator: Andrei Tarkovsky\ntype: film\nyear: 1979\n\
         last-updated: Sun 24 May 2020 08:55 AM -07:00\n\
         created-at: Sun 24 May 2020 08:55 AM -07:00\n"
    );
    assert!(!staged.exists());

    let shown = api.show(&["stalker"], Verbosity::Full).unwrap();
    assert!(shown.rendered.unwrap().starts_with("title: Stalker\n"));
}

use tempfile::TempDir;

use glasstock_sheet::{CachedStore, CsvDirStore, Sheet, SheetError, SheetStore};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn setup_store() -> (TempDir, CsvDirStore) {
    let dir = TempDir::new().unwrap();
    let store = CsvDirStore::new(dir.path().join("data"));
    (dir, store)
}

fn inventory_sheet() -> Sheet {
    Sheet::from_strs(
        &["id", "Location", "Quantity", "Description"],
        &[
            &["a1", "Rek 1", "5", "Float, 4mm"],
            &["b2", "Rek 2", "", "line\nbreak"],
        ],
    )
}

// ===========================================================================
// Read / write
// ===========================================================================

#[test]
fn missing_directory_reads_none() {
    let (_dir, store) = setup_store();
    assert!(store.read("Blad1").unwrap().is_none());
}

#[test]
fn write_creates_directory_and_round_trips() {
    let (_dir, store) = setup_store();
    let sheet = inventory_sheet();
    store.write("Blad1", &sheet).unwrap();

    assert!(store.root().join("Blad1.csv").exists());
    assert_eq!(store.read("Blad1").unwrap(), Some(sheet));
}

#[test]
fn write_fully_replaces_previous_contents() {
    let (_dir, store) = setup_store();
    store.write("Blad1", &inventory_sheet()).unwrap();

    let smaller = Sheet::from_strs(&["id", "Location"], &[&["c3", "Rek 9"]]);
    store.write("Blad1", &smaller).unwrap();

    assert_eq!(store.read("Blad1").unwrap(), Some(smaller));
}

#[test]
fn header_only_sheet_round_trips() {
    let (_dir, store) = setup_store();
    let sheet = Sheet::from_strs(&["id", "Location"], &[]);
    store.write("Blad1", &sheet).unwrap();
    assert_eq!(store.read("Blad1").unwrap(), Some(sheet));
}

#[test]
fn empty_file_reads_none() {
    let (_dir, store) = setup_store();
    std::fs::create_dir_all(store.root()).unwrap();
    std::fs::write(store.root().join("Blad1.csv"), "").unwrap();
    assert!(store.read("Blad1").unwrap().is_none());
}

#[test]
fn no_temp_files_left_behind() {
    let (_dir, store) = setup_store();
    store.write("Blad1", &inventory_sheet()).unwrap();
    store.write("Blad1", &inventory_sheet()).unwrap();

    let names: Vec<String> = std::fs::read_dir(store.root())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["Blad1.csv".to_owned()]);
}

#[test]
fn worksheets_are_separate_files() {
    let (_dir, store) = setup_store();
    let other = Sheet::from_strs(&["id"], &[&["z"]]);
    store.write("Blad1", &inventory_sheet()).unwrap();
    store.write("Archief", &other).unwrap();

    assert_eq!(store.read("Blad1").unwrap(), Some(inventory_sheet()));
    assert_eq!(store.read("Archief").unwrap(), Some(other));
}

#[test]
fn invalid_name_is_rejected_on_write() {
    let (_dir, store) = setup_store();
    let err = store.write("../escape", &inventory_sheet()).unwrap_err();
    assert!(matches!(err, SheetError::InvalidName { .. }));
}

// ===========================================================================
// Cache over CSV
// ===========================================================================

#[test]
fn cached_csv_store_reads_its_own_writes() {
    let (_dir, store) = setup_store();
    let cached = CachedStore::new(store, None);

    assert!(cached.read("Blad1").unwrap().is_none());
    cached.write("Blad1", &inventory_sheet()).unwrap();
    assert_eq!(cached.read("Blad1").unwrap(), Some(inventory_sheet()));
}

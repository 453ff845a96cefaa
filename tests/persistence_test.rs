//! Shape files on disk: layout, round trips and recovery from bad files.

use std::path::{Path, PathBuf};

use polydesigner::defaults::{SHAPE_FILE_SIZE, STORE_CAPACITY};
use polydesigner::{EditError, Editor, EditorConfig, LoadOutcome, SlotStorage, Zoom, pt};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "polydesigner-persist-{}-{}",
        std::process::id(),
        name
    ));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn add(editor: &mut Editor, x: f64, y: f64) {
    editor.set_cursor(pt(x, y), Zoom::ONE).unwrap();
    editor.add_vertex_at_cursor();
}

fn editor_in(dir: &Path) -> Editor {
    Editor::new(EditorConfig::default().with_storage_dir(dir).with_autoload(false))
}

#[test]
fn save_all_writes_one_fixed_size_file_per_slot() {
    let dir = scratch_dir("save-all");
    let editor = editor_in(&dir);
    editor.save_all().unwrap();

    for slot in 0..STORE_CAPACITY {
        let path = dir.join(format!("shape_{:02}.bin", slot));
        let len = std::fs::metadata(&path).unwrap().len();
        assert_eq!(len as usize, SHAPE_FILE_SIZE, "{}", path.display());
    }
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn open_restores_every_saved_slot() {
    let dir = scratch_dir("reopen");
    {
        let mut editor = editor_in(&dir);
        add(&mut editor, 0.0, 0.0);
        add(&mut editor, 3.0, 0.0);
        add(&mut editor, 0.0, 3.0);
        editor.select_shape(7);
        add(&mut editor, -1.5, 2.25);
        editor.set_cursor(pt(-1.5, 2.25), Zoom::ONE).unwrap();
        editor.delete_selected().unwrap();
        add(&mut editor, 4.0, 4.0);
        editor.save(0).unwrap();
        editor.save(7).unwrap();
    }

    let editor = Editor::open(EditorConfig::default().with_storage_dir(&dir));
    let first = editor.store().shape(0).unwrap();
    assert_eq!(first.valid_count(), 3);
    assert_eq!(first.area(), 4.5);

    let seventh = editor.store().shape(7).unwrap();
    let v0 = seventh.vertex(0).unwrap();
    assert!(!v0.valid);
    assert_eq!(v0.point, pt(-1.5, 2.25));
    assert_eq!(seventh.vertex(1).unwrap().point, pt(4.0, 4.0));
    assert_eq!(seventh.insertion_cursor(), 2);

    assert!(editor.store().shape(3).unwrap().is_empty());
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn corrupt_file_is_reported_and_skipped_on_open() {
    let dir = scratch_dir("corrupt");
    {
        let mut editor = editor_in(&dir);
        add(&mut editor, 1.0, 1.0);
        editor.save(0).unwrap();
    }
    std::fs::write(dir.join("shape_01.bin"), [0u8; 100]).unwrap();

    let storage = SlotStorage::new(&dir);
    match storage.load(1) {
        Err(EditError::CorruptShapeFile { path, reason }) => {
            assert_eq!(path, dir.join("shape_01.bin"));
            assert_eq!(reason, "expected 384 bytes, found 100");
        }
        other => panic!("expected a corrupt file error, got {:?}", other),
    }

    let mut editor = Editor::open(EditorConfig::default().with_storage_dir(&dir));
    assert_eq!(editor.store().shape(0).unwrap().valid_count(), 1);
    assert!(editor.store().shape(1).unwrap().is_empty());
    assert!(matches!(editor.load(1), Err(EditError::CorruptShapeFile { .. })));
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn missing_file_leaves_slot_untouched() {
    let dir = scratch_dir("missing");
    let mut editor = editor_in(&dir);
    add(&mut editor, 2.0, 2.0);
    match editor.load(0).unwrap() {
        LoadOutcome::Missing(path) => assert_eq!(path, dir.join("shape_00.bin")),
        other => panic!("expected Missing, got {:?}", other),
    }
    assert_eq!(editor.current_shape().valid_count(), 1);
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn unwritable_directory_is_persistence_unavailable() {
    let root = scratch_dir("unavailable");
    let editor = editor_in(&root.join("does-not-exist"));
    let err = editor.save(0).unwrap_err();
    assert!(matches!(err, EditError::PersistenceUnavailable { .. }));
    assert!(matches!(editor.save_all(), Err(EditError::PersistenceUnavailable { .. })));
    std::fs::remove_dir_all(&root).unwrap();
}

#[test]
fn out_of_range_slot_is_invalid_index() {
    let dir = scratch_dir("range");
    let mut editor = editor_in(&dir);
    assert!(matches!(
        editor.save(STORE_CAPACITY),
        Err(EditError::InvalidIndex { index: 16, capacity: 16 })
    ));
    assert!(matches!(editor.load(99), Err(EditError::InvalidIndex { .. })));
    std::fs::remove_dir_all(&dir).unwrap();
}

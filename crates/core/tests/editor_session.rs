use raycaster_core::{EditorAction, EditorDocument, FLOOR, load_map_file, save_map_file};

#[test]
fn painted_and_generated_maps_survive_a_save_and_reload() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("maps").join("custom.map");

    let mut doc = EditorDocument::blank(20, 16, 2024).expect("document");
    doc.apply(EditorAction::Generate).expect("generate");
    doc.apply(EditorAction::SelectPaint(2)).expect("paint");
    doc.apply(EditorAction::AdjustBrush(1)).expect("brush");
    doc.apply(EditorAction::BeginStroke { x: 3, y: 3, erase: false }).expect("begin");
    doc.apply(EditorAction::ContinueStroke { x: 9, y: 7 }).expect("drag");
    doc.apply(EditorAction::EndStroke).expect("end");
    doc.apply(EditorAction::ResizeGrid { cols: 22, rows: 16 }).expect("resize");

    save_map_file(&path, doc.map()).expect("save");
    let reloaded = load_map_file(&path).expect("load");
    assert_eq!(&reloaded, doc.map());
    assert_eq!(reloaded.fingerprint(), doc.map().fingerprint());
    assert_eq!(reloaded.cell(21, 0), FLOOR);
}

#[test]
fn undo_walks_back_through_every_kind_of_edit() {
    let mut doc = EditorDocument::blank(16, 16, 5).expect("document");
    let blank = doc.map().clone();
    doc.apply(EditorAction::Generate).expect("generate");
    let generated = doc.map().clone();
    doc.apply(EditorAction::BeginStroke { x: 8, y: 8, erase: true }).expect("begin");
    doc.apply(EditorAction::EndStroke).expect("end");
    doc.apply(EditorAction::ResizeGrid { cols: 10, rows: 10 }).expect("resize");
    assert_eq!(doc.history().undo_len(), 3);

    for _ in 0..2 {
        doc.apply(EditorAction::Undo).expect("undo");
    }
    assert_eq!(doc.map(), &generated);
    doc.apply(EditorAction::Undo).expect("undo");
    assert_eq!(doc.map(), &blank);
    doc.apply(EditorAction::Undo).expect("undo on empty history");
    assert_eq!(doc.map(), &blank);
    assert_eq!(doc.history().redo_len(), 3);
}

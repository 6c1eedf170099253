use raycaster::settings_file::AppSettings;
use raycaster::viewer::{MapSource, ViewerInput, ViewerSession};
use raycaster_core::map::{FLOOR, WALL};
use raycaster_core::{MapStore, save_map_file};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn walled_room(width: usize, height: usize) -> MapStore {
    let mut map = MapStore::new(width, height, WALL).expect("map");
    for y in 1..height - 1 {
        for x in 1..width - 1 {
            map.set(x, y, FLOOR);
        }
    }
    map
}

fn start_with(path: &Path) -> ViewerSession {
    ViewerSession::start(AppSettings::default(), 80.0, Some(path), 1).expect("session")
}

#[test]
fn missing_map_file_falls_back_to_generation() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("absent.map");
    let session = ViewerSession::start(AppSettings::default(), 80.0, Some(path.as_path()), 77)
        .expect("session");
    assert_eq!(session.source(), MapSource::Generated { seed: 77 });
    assert_eq!((session.map().width(), session.map().height()), (24, 24));
    let camera = session.camera();
    assert!(session.map().is_floor_at(camera.position.x as i64, camera.position.y as i64));
}

#[test]
fn loaded_maps_clamp_the_default_start_inside() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("small.map");
    save_map_file(&path, &walled_room(10, 8)).expect("save");

    let session = start_with(&path);
    assert_eq!(session.source(), MapSource::Loaded);
    let position = session.camera().position;
    assert_eq!((position.x, position.y), (8.5, 6.5));
}

#[test]
fn solid_start_cell_moves_to_first_floor_cell() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("pillar.map");
    let mut map = walled_room(10, 10);
    map.set(8, 8, WALL);
    save_map_file(&path, &map).expect("save");

    let session = start_with(&path);
    let position = session.camera().position;
    assert_eq!((position.x, position.y), (1.5, 1.5));
}

#[test]
fn movement_respects_walls_and_regeneration_replaces_the_map() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("room.map");
    save_map_file(&path, &walled_room(6, 6)).expect("save");
    let mut session = start_with(&path);

    let forward = ViewerInput { forward: 1.0, ..ViewerInput::default() };
    for _ in 0..100 {
        session.tick(&forward, 0.05, || 0);
    }
    let position = session.camera().position;
    assert!(session.map().is_floor_at(position.x as i64, position.y as i64));

    let regenerate = ViewerInput { regenerate: true, ..ViewerInput::default() };
    session.tick(&regenerate, 0.0, || 4242);
    assert_eq!(session.source(), MapSource::Generated { seed: 4242 });
    assert_eq!((session.map().width(), session.map().height()), (6, 6));
    assert!(session.map().border_is_solid());
}

#[test]
fn frames_follow_the_window_up_to_the_cap() {
    let mut session =
        ViewerSession::start(AppSettings::default(), 80.0, None, 5).expect("session");
    session.fit_frame(640, 480);
    assert_eq!((session.frame().width(), session.frame().height()), (640, 480));
    session.fit_frame(2560, 1440);
    assert_eq!((session.frame().width(), session.frame().height()), (1024, 768));

    let stats = session.render();
    assert_eq!(stats.missed_columns, 0);
    assert!(session.status_line().contains("seed=5"));
}

#[test]
fn undersized_default_map_settings_still_start() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("settings.json");
    fs::write(&path, r#"{ "default_map_width": 2, "default_map_height": 2 }"#).expect("write");

    let settings = AppSettings::load_or_default(Some(path.as_path()));
    let session = ViewerSession::start(settings, 80.0, None, 1).expect("session");
    assert_eq!((session.map().width(), session.map().height()), (3, 3));
    assert!(session.map().border_is_solid());
}

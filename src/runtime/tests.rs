use std::sync::Arc;

use serde_json::json;
use tempfile::tempdir;

use super::{
    AppContext, AppError, JsonPreferences, MemoryPreferences, PREF_SAVE, PREF_SAVE_DIR, PREF_SHOW,
    Preferences,
};
use crate::duplicate::{AxisRange, DuplicationRecipe, DuplicationState};
use crate::formats::PageWriter;
use crate::model::{Coords, Image, ImageMetadata, PixelBuffer, PixelFormat, SummaryMetadata};
use crate::store::{Datastore, FileDatastore, FileStoreOptions};

fn gray16(coords: Coords, values: Vec<u16>) -> Image {
    Image::new(coords, 2, 2, PixelBuffer::Gray16(values), ImageMetadata::new()).expect("image")
}

fn write_stack(path: &std::path::Path, pages: usize) {
    let mut writer = PageWriter::create(path).expect("writer");
    for page in 0..pages {
        let base = (page * 10) as u16;
        writer
            .append(&gray16(
                Coords::default(),
                vec![base, base + 1, base + 2, base + 3],
            ))
            .expect("page");
    }
}

#[test]
fn tiff_stack_opens_as_frozen_store() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("movie.tif");
    write_stack(&path, 3);

    let app = AppContext::new();
    let store = app.store_service().open(&path, "t").expect("open");
    assert!(store.is_frozen());
    assert_eq!(store.num_images(), 3);
    assert_eq!(store.axis_length("time"), 3);
    assert_eq!(store.summary_metadata().name.as_deref(), Some("movie"));

    let info = app.store_service().describe(store.as_ref()).expect("describe");
    assert_eq!(info.num_images, 3);
    assert_eq!(info.axes.len(), 1);
    assert_eq!(info.axes[0].axis, "time");
    assert_eq!(info.axes[0].length, 3);
    assert_eq!(info.pixel_formats, vec![PixelFormat::Gray16]);
    assert_eq!(info.min, Some(0.0));
    assert_eq!(info.max, Some(23.0));
    assert_eq!(info.path, None);
}

#[test]
fn store_directory_opens_through_service() {
    let dir = tempdir().expect("tempdir");
    let root = dir.path().join("acq");
    let mut store = FileDatastore::create(&root, FileStoreOptions::default()).expect("create");
    store
        .set_summary_metadata(SummaryMetadata::with_channel_names(["DAPI"]))
        .expect("summary");
    store
        .put_image(gray16(Coords::builder().z(0).build(), vec![1, 2, 3, 4]))
        .expect("put");
    store
        .put_image(gray16(Coords::builder().z(1).build(), vec![5, 6, 7, 8]))
        .expect("put");
    store.freeze().expect("freeze");

    let app = AppContext::new();
    let reopened = app.store_service().open(&root, "time").expect("open");
    let info = app.store_service().describe(reopened.as_ref()).expect("describe");
    assert_eq!(info.path.as_deref(), Some(root.as_path()));
    assert_eq!(info.channel_names, vec!["DAPI"]);
    assert!(info.frozen);
    assert_eq!(info.max, Some(8.0));
}

#[test]
fn service_runs_planned_recipe_on_worker() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("movie.tif");
    write_stack(&path, 4);

    let app = AppContext::new();
    let source = app.store_service().open(&path, "time").expect("open");
    let recipe = DuplicationRecipe {
        ranges: [("time".to_string(), AxisRange::new(2, 3))].into_iter().collect(),
        ..DuplicationRecipe::default()
    };
    let config = app
        .duplicate_service()
        .plan(source.as_ref(), recipe, "movie-copy")
        .expect("plan");
    let outcome = app
        .duplicate_service()
        .run(Arc::clone(&source), config)
        .expect("run");
    assert_eq!(outcome.state, DuplicationState::Done);
    assert_eq!(outcome.name, "movie-copy");
    let copy = outcome
        .destination
        .image(&Coords::builder().time(0).build())
        .expect("first copy");
    assert_eq!(copy.pixels(), &PixelBuffer::Gray16(vec![20, 21, 22, 23]));

    let report_path = dir.path().join("report.yaml");
    app.duplicate_service()
        .save_report(&report_path, &outcome.report())
        .expect("save report");
    let raw = std::fs::read_to_string(report_path).expect("read report");
    assert!(raw.contains("state: done"));
}

#[test]
fn memory_preferences_fall_back_to_defaults() {
    let mut prefs = MemoryPreferences::new();
    assert!(!prefs.get_bool(PREF_SAVE, false));
    assert!(prefs.get_bool(PREF_SHOW, true));
    prefs.set_bool(PREF_SHOW, false).expect("set");
    prefs.set_string(PREF_SAVE_DIR, "/data").expect("set");
    assert!(!prefs.get_bool(PREF_SHOW, true));
    assert_eq!(prefs.get_string(PREF_SAVE_DIR).as_deref(), Some("/data"));
    assert_eq!(prefs.get_string(PREF_SHOW), None);
}

#[test]
fn json_preferences_persist_every_change() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("nested").join("prefs.json");
    let mut prefs = JsonPreferences::load(&path).expect("load missing");
    assert!(prefs.entries().is_empty());
    prefs.set_bool(PREF_SAVE, true).expect("set save");
    prefs.set_bool(PREF_SHOW, false).expect("set show");

    let reloaded = JsonPreferences::load(&path).expect("reload");
    assert!(reloaded.get_bool(PREF_SAVE, false));
    assert!(!reloaded.get_bool(PREF_SHOW, true));
    assert_eq!(reloaded.entries().get(PREF_SAVE), Some(&json!(true)));
}

#[test]
fn malformed_preferences_file_is_reported() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("prefs.json");
    std::fs::write(&path, "not json").expect("write");
    assert!(matches!(
        JsonPreferences::load(&path),
        Err(AppError::PreferencesFormat { .. })
    ));
}

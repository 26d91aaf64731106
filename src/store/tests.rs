use tempfile::tempdir;

use super::{
    Datastore, FileDatastore, FileStoreOptions, RamDatastore, StoreError, unique_save_directory,
};
use crate::model::{Coords, Image, ImageMetadata, PixelBuffer, SummaryMetadata};

fn plane(coords: Coords, seed: u8) -> Image {
    let mut metadata = ImageMetadata::new();
    metadata.insert("exposure_ms".into(), serde_json::json!(10 + u32::from(seed)));
    Image::new(
        coords,
        3,
        2,
        PixelBuffer::Gray8((0..6).map(|value| value + seed).collect()),
        metadata,
    )
    .expect("image")
}

#[test]
fn ram_store_rejects_duplicate_and_frozen_writes() {
    let mut store = RamDatastore::new();
    let coords = Coords::builder().time(1).channel(0).build();
    store.put_image(plane(coords.clone(), 0)).expect("first write");
    let duplicate = store.put_image(plane(coords.clone(), 1));
    assert!(matches!(duplicate, Err(StoreError::DuplicateCoordinate(c)) if c == coords));

    store.freeze().expect("freeze");
    store.freeze().expect("freeze twice");
    assert!(store.is_frozen());
    let frozen = store.put_image(plane(Coords::builder().time(2).build(), 0));
    assert!(matches!(frozen, Err(StoreError::Frozen)));
    assert!(matches!(
        store.set_summary_metadata(SummaryMetadata::default()),
        Err(StoreError::Frozen)
    ));
    assert_eq!(store.num_images(), 1);
}

#[test]
fn ram_store_reports_axis_lengths() {
    let store = RamDatastore::from_images(
        SummaryMetadata::default(),
        (0..4).flat_map(|time| {
            (0..2).map(move |channel| {
                plane(Coords::builder().time(time).channel(channel).build(), 0)
            })
        }),
    )
    .expect("store");
    assert_eq!(store.axes(), vec!["channel".to_string(), "time".to_string()]);
    assert_eq!(store.axis_length("time"), 4);
    assert_eq!(store.axis_length("channel"), 2);
    assert_eq!(store.axis_length("z"), 0);
    assert_eq!(store.unordered_image_coords().len(), 8);
}

#[test]
fn file_store_roundtrips_through_open() {
    for multi_page in [true, false] {
        let dir = tempdir().expect("tempdir");
        let root = dir.path().join("copy");
        let options = FileStoreOptions {
            multi_page,
            appendable: false,
        };
        let mut store = FileDatastore::create(&root, options).expect("create");
        store
            .set_summary_metadata(SummaryMetadata::with_channel_names(["DAPI"]))
            .expect("summary");
        for time in 0..3 {
            store
                .put_image(plane(Coords::builder().time(time).build(), time as u8))
                .expect("write");
        }
        let reread = store
            .image(&Coords::builder().time(1).build())
            .expect("read while open");
        assert_eq!(reread.pixels(), plane(Coords::default(), 1).pixels());
        store.freeze().expect("freeze");

        let reopened = FileDatastore::open(&root).expect("open");
        assert!(reopened.is_frozen());
        assert_eq!(reopened.num_images(), 3);
        assert_eq!(reopened.summary_metadata().channel_names, vec!["DAPI"]);
        let image = reopened
            .image(&Coords::builder().time(2).build())
            .expect("read");
        assert_eq!(image.pixels(), plane(Coords::default(), 2).pixels());
        assert_eq!(
            image.metadata().get("exposure_ms"),
            Some(&serde_json::json!(12))
        );
    }
}

#[test]
fn file_store_metadata_is_fixed_after_first_write() {
    let dir = tempdir().expect("tempdir");
    let mut store =
        FileDatastore::create(dir.path().join("store"), FileStoreOptions::default())
            .expect("create");
    store
        .put_image(plane(Coords::builder().time(0).build(), 0))
        .expect("write");
    assert!(matches!(
        store.set_summary_metadata(SummaryMetadata::default()),
        Err(StoreError::MetadataFrozen)
    ));
}

#[test]
fn appendable_store_is_readable_before_freeze() {
    let dir = tempdir().expect("tempdir");
    let root = dir.path().join("partial");
    let options = FileStoreOptions {
        multi_page: true,
        appendable: true,
    };
    let mut store = FileDatastore::create(&root, options).expect("create");
    store
        .put_image(plane(Coords::builder().z(0).build(), 0))
        .expect("write");
    store
        .put_image(plane(Coords::builder().z(1).build(), 4))
        .expect("write");

    let reopened = FileDatastore::open(&root).expect("open partial");
    assert_eq!(reopened.num_images(), 2);
    assert_eq!(reopened.axis_length("z"), 2);
}

#[test]
fn open_rejects_plain_directory() {
    let dir = tempdir().expect("tempdir");
    assert!(matches!(
        FileDatastore::open(dir.path()),
        Err(StoreError::NotAStore(_))
    ));
}

#[test]
fn unique_directory_appends_suffix() {
    let dir = tempdir().expect("tempdir");
    let base = dir.path().join("run");
    assert_eq!(unique_save_directory(&base), base);
    std::fs::create_dir(&base).expect("mkdir");
    std::fs::create_dir(dir.path().join("run_1")).expect("mkdir");
    assert_eq!(unique_save_directory(&base), dir.path().join("run_2"));
}

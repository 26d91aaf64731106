use std::path::PathBuf;

use clap::Parser;

use super::runner::{apply_arguments, parse_polygon, parse_range, parse_rect};
use super::types::{Cli, Commands, DuplicateArgs};
use crate::duplicate::{AxisRange, DestinationKind, DuplicationRecipe, Roi};
use crate::runtime::{MemoryPreferences, PREF_SAVE, PREF_SAVE_DIR, PREF_SHOW, Preferences};
use crate::store::FileStoreOptions;

fn duplicate_args(extra: &[&str]) -> DuplicateArgs {
    let argv = ["image-dup", "duplicate", "movie.tif"]
        .into_iter()
        .chain(extra.iter().copied());
    match Cli::try_parse_from(argv).expect("parse").command {
        Commands::Duplicate(args) => args,
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn ranges_are_one_based_on_the_command_line() {
    assert_eq!(
        parse_range("t=2:4").expect("range"),
        ("time".to_string(), AxisRange::new(1, 3))
    );
    assert_eq!(
        parse_range("channel=1:1").expect("range"),
        ("channel".to_string(), AxisRange::new(0, 0))
    );
    assert!(parse_range("time=0:3").is_err());
    assert!(parse_range("time=4:2").is_err());
    assert!(parse_range("time:1-2").is_err());
}

#[test]
fn rect_and_polygon_parse_into_rois() {
    assert_eq!(
        parse_rect("-2, 3, 10, 5").expect("rect"),
        Roi::Rect {
            x: -2,
            y: 3,
            width: 10,
            height: 5
        }
    );
    assert!(parse_rect("1,2,3").is_err());
    assert!(parse_rect("1,2,0,4").is_err());
    assert_eq!(
        parse_polygon("0,0;8,0;4,6").expect("polygon"),
        Roi::Polygon {
            points: vec![(0, 0), (8, 0), (4, 6)]
        }
    );
    assert!(parse_polygon("0,0;1,1").is_err());
}

#[test]
fn rect_and_polygon_flags_conflict() {
    let parsed = Cli::try_parse_from([
        "image-dup",
        "duplicate",
        "movie.tif",
        "--rect",
        "0,0,2,2",
        "--polygon",
        "0,0;2,0;1,1",
    ]);
    assert!(parsed.is_err());
}

#[test]
fn arguments_override_recipe() {
    let recipe = DuplicationRecipe {
        name: Some("from-recipe".into()),
        ranges: [("t".to_string(), AxisRange::new(0, 1))].into_iter().collect(),
        ..DuplicationRecipe::default()
    };
    let args = duplicate_args(&[
        "--range",
        "time=3:5",
        "--rect",
        "1,1,4,4",
        "--name",
        "cli",
        "--save",
        "/data/out",
        "--multi-page",
        "false",
        "--appendable",
        "--show",
    ]);
    let merged = apply_arguments(recipe, &args, &MemoryPreferences::new()).expect("merge");
    assert_eq!(merged.name.as_deref(), Some("cli"));
    assert_eq!(merged.ranges.len(), 1);
    assert_eq!(merged.ranges.get("time"), Some(&AxisRange::new(2, 4)));
    assert!(matches!(merged.roi, Some(Roi::Rect { width: 4, .. })));
    assert_eq!(
        merged.destination,
        DestinationKind::File {
            directory: PathBuf::from("/data/out"),
            options: FileStoreOptions {
                multi_page: false,
                appendable: true,
            },
        }
    );
    assert_eq!(merged.show_while_copying, Some(true));
}

#[test]
fn remembered_choices_fill_missing_arguments() {
    let mut prefs = MemoryPreferences::new();
    prefs.set_bool(PREF_SAVE, true).expect("set");
    prefs.set_string(PREF_SAVE_DIR, "/data/remembered").expect("set");
    prefs.set_bool(PREF_SHOW, true).expect("set");

    let merged = apply_arguments(DuplicationRecipe::default(), &duplicate_args(&[]), &prefs)
        .expect("merge");
    assert_eq!(
        merged.destination,
        DestinationKind::File {
            directory: PathBuf::from("/data/remembered"),
            options: FileStoreOptions::default(),
        }
    );
    assert_eq!(merged.show_while_copying, Some(true));

    let merged = apply_arguments(
        DuplicationRecipe::default(),
        &duplicate_args(&["--in-memory", "--show=false"]),
        &prefs,
    )
    .expect("merge");
    assert_eq!(merged.destination, DestinationKind::Memory);
    assert_eq!(merged.show_while_copying, Some(false));
}

#[test]
fn recipe_display_choice_beats_remembered_one() {
    let mut prefs = MemoryPreferences::new();
    prefs.set_bool(PREF_SHOW, true).expect("set");
    let recipe = DuplicationRecipe {
        show_while_copying: Some(false),
        ..DuplicationRecipe::default()
    };
    let merged = apply_arguments(recipe, &duplicate_args(&[]), &prefs).expect("merge");
    assert_eq!(merged.show_while_copying, Some(false));

    let merged = apply_arguments(DuplicationRecipe::default(), &duplicate_args(&[]), &prefs)
        .expect("merge");
    assert_eq!(merged.show_while_copying, Some(true));
}

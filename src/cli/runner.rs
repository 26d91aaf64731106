use std::path::Path;
use std::sync::Arc;

use clap::Parser;

use crate::duplicate::{AxisRange, DestinationKind, DuplicationConfig, DuplicationRecipe, Roi};
use crate::model::canonical_axis;
use crate::runtime::{
    AppContext, JsonPreferences, MemoryPreferences, PREF_SAVE, PREF_SAVE_DIR, PREF_SHOW,
    Preferences,
};
use crate::store::{Datastore, FileStoreOptions};

use super::types::{Cli, Commands, DuplicateArgs};

pub fn run_cli() -> Result<(), String> {
    let cli = Cli::parse();
    let app = AppContext::new();

    match cli.command {
        Commands::Info { input, stack_axis } => {
            let store = app
                .store_service()
                .open(&input, &stack_axis)
                .map_err(|error| error.to_string())?;
            let info = app
                .store_service()
                .describe(store.as_ref())
                .map_err(|error| error.to_string())?;
            println!(
                "{}",
                serde_json::to_string_pretty(&info).map_err(|error| error.to_string())?
            );
        }
        Commands::Duplicate(args) => duplicate(&app, args)?,
        Commands::Prefs { file } => {
            let prefs = JsonPreferences::load(&file).map_err(|error| error.to_string())?;
            println!(
                "{}",
                serde_json::to_string_pretty(prefs.entries()).map_err(|error| error.to_string())?
            );
        }
    }

    Ok(())
}

fn duplicate(app: &AppContext, args: DuplicateArgs) -> Result<(), String> {
    let source = app
        .store_service()
        .open(&args.input, &args.stack_axis)
        .map_err(|error| error.to_string())?;
    let mut prefs: Box<dyn Preferences> = match &args.prefs {
        Some(path) => Box::new(JsonPreferences::load(path).map_err(|error| error.to_string())?),
        None => Box::new(MemoryPreferences::new()),
    };
    let recipe = match &args.recipe {
        Some(path) => app
            .duplicate_service()
            .load_recipe(path)
            .map_err(|error| error.to_string())?,
        None => DuplicationRecipe::default(),
    };
    let recipe = apply_arguments(recipe, &args, prefs.as_ref())?;
    let default_name = default_name(source.as_ref(), &args.input);
    let config = app
        .duplicate_service()
        .plan(source.as_ref(), recipe, &default_name)
        .map_err(|error| error.to_string())?;
    remember_choices(prefs.as_mut(), &config).map_err(|error| error.to_string())?;

    let outcome = app
        .duplicate_service()
        .run(Arc::clone(&source), config)
        .map_err(|error| error.to_string())?;
    let report = outcome.report();
    if let Some(path) = &args.report {
        app.duplicate_service()
            .save_report(path, &report)
            .map_err(|error| error.to_string())?;
    }
    println!(
        "{}",
        serde_json::to_string_pretty(&report).map_err(|error| error.to_string())?
    );
    match &outcome.failure {
        Some(failure) => Err(failure.user_message()),
        None => Ok(()),
    }
}

/// Layers command-line choices over the recipe, falling back to remembered
/// preferences for the destination and display.
pub(super) fn apply_arguments(
    mut recipe: DuplicationRecipe,
    args: &DuplicateArgs,
    prefs: &dyn Preferences,
) -> Result<DuplicationRecipe, String> {
    recipe.ranges = recipe
        .ranges
        .into_iter()
        .map(|(axis, range)| (canonical_axis(&axis), range))
        .collect();
    for raw in &args.ranges {
        let (axis, range) = parse_range(raw)?;
        recipe.ranges.insert(axis, range);
    }
    if let Some(rect) = &args.rect {
        recipe.roi = Some(parse_rect(rect)?);
    }
    if let Some(polygon) = &args.polygon {
        recipe.roi = Some(parse_polygon(polygon)?);
    }
    if args.name.is_some() {
        recipe.name = args.name.clone();
    }

    let remembered_dir = prefs
        .get_bool(PREF_SAVE, false)
        .then(|| prefs.get_string(PREF_SAVE_DIR))
        .flatten();
    let (directory, mut options) = match (&args.save, recipe.destination) {
        _ if args.in_memory => (None, FileStoreOptions::default()),
        (Some(directory), DestinationKind::File { options, .. }) => {
            (Some(directory.clone()), options)
        }
        (Some(directory), DestinationKind::Memory) => {
            (Some(directory.clone()), FileStoreOptions::default())
        }
        (None, DestinationKind::File { directory, options }) => (Some(directory), options),
        (None, DestinationKind::Memory) => {
            (remembered_dir.map(Into::into), FileStoreOptions::default())
        }
    };
    if let Some(multi_page) = args.multi_page {
        options.multi_page = multi_page;
    }
    options.appendable |= args.appendable;
    recipe.destination = match directory {
        Some(directory) => DestinationKind::File { directory, options },
        None => DestinationKind::Memory,
    };

    recipe.show_while_copying = Some(
        args.show
            .or(recipe.show_while_copying)
            .unwrap_or_else(|| prefs.get_bool(PREF_SHOW, false)),
    );
    Ok(recipe)
}

fn remember_choices(
    prefs: &mut dyn Preferences,
    config: &DuplicationConfig,
) -> crate::runtime::Result<()> {
    prefs.set_bool(PREF_SHOW, config.show_while_copying)?;
    match &config.destination {
        DestinationKind::File { directory, .. } => {
            prefs.set_bool(PREF_SAVE, true)?;
            prefs.set_string(PREF_SAVE_DIR, &directory.to_string_lossy())
        }
        DestinationKind::Memory => prefs.set_bool(PREF_SAVE, false),
    }
}

fn default_name(source: &dyn Datastore, input: &Path) -> String {
    source
        .summary_metadata()
        .name
        .clone()
        .or_else(|| {
            input
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
        })
        .unwrap_or_else(|| "duplicate".to_string())
}

/// Parses `axis=min:max` with 1-based inclusive bounds into a 0-based range.
pub(super) fn parse_range(raw: &str) -> Result<(String, AxisRange), String> {
    let (axis, bounds) = raw
        .split_once('=')
        .ok_or_else(|| format!("range `{raw}` must look like AXIS=MIN:MAX"))?;
    let (min, max) = bounds
        .split_once(':')
        .ok_or_else(|| format!("range `{raw}` must look like AXIS=MIN:MAX"))?;
    let parse = |value: &str| {
        value
            .trim()
            .parse::<usize>()
            .ok()
            .filter(|index| *index >= 1)
            .ok_or_else(|| format!("range `{raw}` needs positive 1-based bounds"))
    };
    let (min, max) = (parse(min)?, parse(max)?);
    if min > max {
        return Err(format!("range `{raw}` has min above max"));
    }
    Ok((canonical_axis(axis), AxisRange::new(min - 1, max - 1)))
}

pub(super) fn parse_rect(raw: &str) -> Result<Roi, String> {
    let values = raw
        .split(',')
        .map(|value| value.trim().parse::<i64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|error| format!("rect `{raw}`: {error}"))?;
    let &[x, y, width, height] = values.as_slice() else {
        return Err(format!("rect `{raw}` must look like X,Y,W,H"));
    };
    let size = |value: i64| {
        usize::try_from(value)
            .ok()
            .filter(|size| *size > 0)
            .ok_or_else(|| format!("rect `{raw}` needs a positive width and height"))
    };
    Ok(Roi::Rect {
        x,
        y,
        width: size(width)?,
        height: size(height)?,
    })
}

pub(super) fn parse_polygon(raw: &str) -> Result<Roi, String> {
    let points = raw
        .split(';')
        .filter(|point| !point.trim().is_empty())
        .map(|point| -> Result<(i64, i64), String> {
            let (x, y) = point
                .split_once(',')
                .ok_or_else(|| format!("polygon point `{point}` must look like X,Y"))?;
            let coordinate = |value: &str| {
                value
                    .trim()
                    .parse::<i64>()
                    .map_err(|error| format!("polygon point `{point}`: {error}"))
            };
            Ok((coordinate(x)?, coordinate(y)?))
        })
        .collect::<Result<Vec<_>, _>>()?;
    let roi = Roi::Polygon { points };
    roi.validate().map_err(|error| error.to_string())?;
    Ok(roi)
}

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::debug;

use crate::{
    cli::ListArgs,
    config::AppConfig,
    error::Result,
    feed,
    fetch::{FeedSource, HttpFeedSource},
    io_utils,
    projection::{self, Projection},
    ui::Ui,
};

pub fn execute(
    args: &ListArgs,
    projection: Projection,
    config: &AppConfig,
    ui: &dyn Ui,
) -> Result<PathBuf> {
    let source = HttpFeedSource::new(config.feed_url.clone())?;
    generate(ui, &source, projection, args, Utc::now())
}

/// Runs fetch → parse → project for one command invocation.
///
/// The output directory is checked before `source` is touched.
pub fn generate(
    ui: &dyn Ui,
    source: &dyn FeedSource,
    projection: Projection,
    args: &ListArgs,
    now: DateTime<Utc>,
) -> Result<PathBuf> {
    let directory = match args.path.as_deref() {
        Some(path) => {
            let cleaned = io_utils::clean_path(path);
            io_utils::verify_directory(&cleaned)?;
            Some(cleaned)
        }
        None => None,
    };
    let target = output_path(directory.as_deref(), args.filename.as_deref(), projection, now);
    debug!("Resolved output file {target:?}");

    ui.info(match projection {
        Projection::Descriptive => "Running generate list command...",
        Projection::Images => "Running generate list-images command...",
    });
    ui.info("Calling iTunes API...");
    let body = source.fetch()?;

    ui.info("Parsing response...");
    let chart = feed::parse_feed(&body)?;

    ui.info("Generating csv...");
    let rows = projection::write_csv(&target, &chart, projection)?;
    ui.warn(&format!("Generated file: {}", target.display()));
    debug!("{rows} entr(ies) projected");

    ui.info("Done.");
    Ok(target)
}

pub fn output_path(
    directory: Option<&Path>,
    file_name: Option<&str>,
    projection: Projection,
    now: DateTime<Utc>,
) -> PathBuf {
    let stem = match file_name.map(str::trim).filter(|name| !name.is_empty()) {
        Some(name) => name.to_string(),
        None => projection.default_file_stem(now),
    };
    let file = format!("{stem}.csv");
    match directory {
        Some(dir) => dir.join(file),
        None => PathBuf::from(file),
    }
}

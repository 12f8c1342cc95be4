//! Flattening of chart entries into CSV rows.
//!
//! Two fixed layouts exist. [`Projection::Descriptive`] emits the textual
//! album fields, [`Projection::Images`] emits the three artwork URLs.

use std::{io::Write, path::Path};

use chrono::{DateTime, Utc};
use log::debug;

use crate::{
    error::{ChartError, Result},
    feed::{ChartEntry, ChartFeed},
    io_utils,
};

pub const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";
pub const IMAGES_SUFFIX: &str = "_list_images";

const DESCRIPTIVE_HEADERS: [&str; 7] = [
    "iTunesID",
    "Category",
    "Name",
    "Artist",
    "Link",
    "Price",
    "ReleaseDate",
];

const IMAGE_HEADERS: [&str; 4] = [
    "iTunesID",
    "smallImageLocation",
    "mediumImageLocation",
    "largeImageLocation",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    Descriptive,
    Images,
}

impl Projection {
    pub fn headers(self) -> &'static [&'static str] {
        match self {
            Projection::Descriptive => &DESCRIPTIVE_HEADERS,
            Projection::Images => &IMAGE_HEADERS,
        }
    }

    pub fn row(self, entry: &ChartEntry) -> Vec<String> {
        match self {
            Projection::Descriptive => vec![
                entry.id.clone(),
                entry.category.clone(),
                entry.name.clone(),
                entry.artist.clone(),
                entry.link.clone(),
                entry.price.clone(),
                entry.release_date.clone(),
            ],
            Projection::Images => {
                // Small, medium and large are taken by position; the feed has
                // always listed them in that order.
                let image = |idx: usize| {
                    entry
                        .images
                        .get(idx)
                        .map(|image| image.url.clone())
                        .unwrap_or_default()
                };
                vec![entry.id.clone(), image(0), image(1), image(2)]
            }
        }
    }

    /// File stem used when the caller does not supply one.
    pub fn default_file_stem(self, now: DateTime<Utc>) -> String {
        let stamp = now.format(TIMESTAMP_FORMAT).to_string();
        match self {
            Projection::Descriptive => stamp,
            Projection::Images => format!("{stamp}{IMAGES_SUFFIX}"),
        }
    }
}

/// Writes the header and one row per entry, returning the number of data rows.
pub fn write_rows<W: Write>(
    writer: &mut csv::Writer<W>,
    feed: &ChartFeed,
    projection: Projection,
) -> std::result::Result<usize, csv::Error> {
    writer.write_record(projection.headers())?;
    for entry in &feed.entries {
        writer.write_record(projection.row(entry))?;
    }
    writer.flush()?;
    Ok(feed.entries.len())
}

/// Creates (or truncates) `path` and fills it with the projected feed.
///
/// A failure part way through leaves whatever was already written.
pub fn write_csv(path: &Path, feed: &ChartFeed, projection: Projection) -> Result<usize> {
    let mut writer = io_utils::open_csv_writer(path)?;
    let rows = write_rows(&mut writer, feed, projection).map_err(|err| {
        ChartError::file_system(path, format!("Could not complete writing dataset to file: {err}"))
    })?;
    debug!("Wrote {rows} row(s) to {path:?}");
    Ok(rows)
}

//! Typed chart feed and its decoder.
//!
//! The iTunes RSS document nests almost every value one or two objects deep
//! (`{"im:name": {"label": "…"}}`). The `wire` module mirrors that layout with
//! `#[serde(default)]` at every level so absent or `null` fields decode to
//! empty values, and [`parse_feed`] flattens it into [`ChartFeed`].

use log::debug;
use serde::de::IgnoredAny;

use crate::error::{ChartError, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChartImage {
    pub url: String,
    /// Pixel height reported by the feed. Not used to order images.
    pub size_hint: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChartEntry {
    pub id: String,
    pub category: String,
    pub name: String,
    pub artist: String,
    pub link: String,
    pub price: String,
    pub release_date: String,
    pub images: Vec<ChartImage>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChartFeed {
    pub title: Option<String>,
    pub updated: Option<String>,
    pub entries: Vec<ChartEntry>,
}

impl ChartFeed {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Decodes raw response bytes into a [`ChartFeed`].
///
/// Syntax is checked first so malformed JSON reports [`ChartError::Parse`],
/// while well-formed JSON of the wrong shape reports [`ChartError::Decode`].
pub fn parse_feed(bytes: &[u8]) -> Result<ChartFeed> {
    serde_json::from_slice::<IgnoredAny>(bytes).map_err(ChartError::Parse)?;
    let document: Option<wire::Document> =
        serde_json::from_slice(bytes).map_err(ChartError::Decode)?;
    let feed = feed_from_wire(document.unwrap_or_default());
    debug!(
        "Decoded {} entr(ies) from feed {:?} (updated {:?})",
        feed.len(),
        feed.title,
        feed.updated
    );
    Ok(feed)
}

fn feed_from_wire(document: wire::Document) -> ChartFeed {
    let feed = document.feed;
    let non_empty = |label: wire::Label| Some(label.label).filter(|value| !value.is_empty());
    ChartFeed {
        title: feed.title.and_then(non_empty),
        updated: feed.updated.and_then(non_empty),
        entries: feed
            .entries
            .into_iter()
            .map(|entry| entry_from_wire(entry.unwrap_or_default()))
            .collect(),
    }
}

fn entry_from_wire(entry: wire::Entry) -> ChartEntry {
    ChartEntry {
        id: entry.id.attributes.id,
        category: entry.category.attributes.label,
        name: entry.name.label,
        artist: entry.artist.label,
        link: entry.link.attributes.href,
        price: entry.price.attributes.amount,
        release_date: entry.release_date.label,
        images: entry
            .images
            .into_iter()
            .map(Option::unwrap_or_default)
            .map(|image| ChartImage {
                url: image.label,
                size_hint: image.attributes.height,
            })
            .collect(),
    }
}

mod wire {
    use serde::{Deserialize, Deserializer};

    /// Reads `null` the same way as an absent key.
    fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de> + Default,
    {
        Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
    }

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    pub struct Document {
        #[serde(deserialize_with = "null_as_default")]
        pub feed: Feed,
    }

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    pub struct Feed {
        pub title: Option<Label>,
        pub updated: Option<Label>,
        #[serde(rename = "entry", deserialize_with = "null_as_default")]
        pub entries: Vec<Option<Entry>>,
    }

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    pub struct Label {
        #[serde(deserialize_with = "null_as_default")]
        pub label: String,
    }

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    pub struct Entry {
        #[serde(deserialize_with = "null_as_default")]
        pub id: Attributed<IdAttributes>,
        #[serde(rename = "im:name", deserialize_with = "null_as_default")]
        pub name: Label,
        #[serde(rename = "im:image", deserialize_with = "null_as_default")]
        pub images: Vec<Option<Image>>,
        #[serde(rename = "im:artist", deserialize_with = "null_as_default")]
        pub artist: Label,
        #[serde(deserialize_with = "null_as_default")]
        pub category: Attributed<LabelAttributes>,
        #[serde(deserialize_with = "null_as_default")]
        pub link: Attributed<LinkAttributes>,
        #[serde(rename = "im:price", deserialize_with = "null_as_default")]
        pub price: Attributed<PriceAttributes>,
        #[serde(rename = "im:releaseDate", deserialize_with = "null_as_default")]
        pub release_date: Label,
    }

    #[derive(Debug, Default, Deserialize)]
    #[serde(default, bound(deserialize = "T: Deserialize<'de> + Default"))]
    pub struct Attributed<T: Default> {
        #[serde(deserialize_with = "null_as_default")]
        pub attributes: T,
    }

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    pub struct IdAttributes {
        #[serde(rename = "im:id", deserialize_with = "null_as_default")]
        pub id: String,
    }

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    pub struct LabelAttributes {
        #[serde(deserialize_with = "null_as_default")]
        pub label: String,
    }

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    pub struct LinkAttributes {
        #[serde(deserialize_with = "null_as_default")]
        pub href: String,
    }

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    pub struct PriceAttributes {
        #[serde(deserialize_with = "null_as_default")]
        pub amount: String,
    }

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    pub struct Image {
        #[serde(deserialize_with = "null_as_default")]
        pub label: String,
        #[serde(deserialize_with = "null_as_default")]
        pub attributes: ImageAttributes,
    }

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    pub struct ImageAttributes {
        #[serde(deserialize_with = "null_as_default")]
        pub height: String,
    }
}

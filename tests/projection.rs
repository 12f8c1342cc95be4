mod common;

use chartfeed::{
    feed::{ChartEntry, ChartFeed, ChartImage, parse_feed},
    projection::{Projection, write_csv},
};
use proptest::prelude::*;

use common::{TestWorkspace, fixture_bytes};

fn read_back(path: &std::path::Path) -> Vec<csv::StringRecord> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .expect("open csv")
        .records()
        .map(|record| record.expect("record"))
        .collect()
}

fn entry(idx: usize, name: String, image_count: usize) -> ChartEntry {
    ChartEntry {
        id: idx.to_string(),
        category: "Rock".into(),
        name,
        artist: "Various, Artists".into(),
        link: format!("https://music.example/{idx}"),
        price: "9.99".into(),
        release_date: "2020-01-01".into(),
        images: (0..image_count)
            .map(|tier| ChartImage {
                url: format!("https://img.example/{idx}/{tier}.png"),
                size_hint: String::new(),
            })
            .collect(),
    }
}

#[test]
fn write_csv_overwrites_existing_file() {
    let workspace = TestWorkspace::new();
    let path = workspace.write("chart.csv", "stale\nstale\nstale\nstale\nstale\nstale\n");
    let feed = parse_feed(&fixture_bytes("topalbums.json")).expect("fixture");

    let rows = write_csv(&path, &feed, Projection::Descriptive).expect("write csv");

    assert_eq!(rows, 3);
    let records = read_back(&path);
    assert_eq!(records.len(), 4);
    assert!(records.iter().all(|record| !record.iter().any(|field| field == "stale")));
}

#[test]
fn write_csv_into_missing_directory_is_a_file_system_error() {
    let workspace = TestWorkspace::new();
    let path = workspace.path().join("missing").join("chart.csv");

    let err = write_csv(&path, &ChartFeed::default(), Projection::Images).unwrap_err();

    assert!(err.to_string().contains("Could not create csv file"));
}

#[test]
fn empty_feed_writes_header_only() {
    let workspace = TestWorkspace::new();
    let path = workspace.path().join("empty.csv");

    write_csv(&path, &ChartFeed::default(), Projection::Images).expect("write csv");

    let records = read_back(&path);
    assert_eq!(records.len(), 1);
    assert_eq!(&records[0][1], "smallImageLocation");
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn descriptive_rows_have_seven_columns(
        names in proptest::collection::vec("[A-Za-z0-9 ,\"']{0,12}", 0..40)
    ) {
        let workspace = TestWorkspace::new();
        let path = workspace.path().join("list.csv");
        let feed = ChartFeed {
            entries: names
                .iter()
                .cloned()
                .enumerate()
                .map(|(idx, name)| entry(idx, name, 3))
                .collect(),
            ..ChartFeed::default()
        };

        write_csv(&path, &feed, Projection::Descriptive).expect("write csv");

        let records = read_back(&path);
        prop_assert_eq!(records.len(), names.len() + 1);
        for (record, name) in records.iter().skip(1).zip(&names) {
            prop_assert_eq!(record.len(), 7);
            prop_assert_eq!(&record[2], name.as_str());
        }
    }

    #[test]
    fn image_rows_pad_missing_tiers(
        counts in proptest::collection::vec(0usize..6, 1..20)
    ) {
        let workspace = TestWorkspace::new();
        let path = workspace.path().join("images.csv");
        let feed = ChartFeed {
            entries: counts
                .iter()
                .enumerate()
                .map(|(idx, count)| entry(idx, String::new(), *count))
                .collect(),
            ..ChartFeed::default()
        };

        write_csv(&path, &feed, Projection::Images).expect("write csv");

        let records = read_back(&path);
        prop_assert_eq!(records.len(), counts.len() + 1);
        for (idx, (record, count)) in records.iter().skip(1).zip(&counts).enumerate() {
            prop_assert_eq!(record.len(), 4);
            for tier in 0..3 {
                let expected = if tier < *count {
                    format!("https://img.example/{idx}/{tier}.png")
                } else {
                    String::new()
                };
                prop_assert_eq!(&record[tier + 1], expected.as_str());
            }
        }
    }
}

mod common;

use std::fs;

use common::hex_grid;
use hexreach_lib::{
    calculate_distances_from, load_hex_map, BorderAnomaly, Direction, DistanceOptions, Error,
    HexMap, HexRecord, HyperlaneMatrix,
};
use tempfile::tempdir;

#[test]
fn saved_map_reloads_with_identical_distances() {
    let mut map = hex_grid(3);
    map.insert(
        HexRecord::new("0,1", 0, 1)
            .with_matrix(HyperlaneMatrix::empty().with_link(Direction::North, Direction::South)),
    );
    map.get_mut("1,-1")
        .unwrap()
        .border_anomalies
        .insert(Direction::South.index() as u8, BorderAnomaly::GravityWave);

    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("map.json");
    fs::write(&path, map.to_json_string().expect("serializes")).expect("write snapshot");

    let mut reloaded = load_hex_map(&path).expect("reloads");
    assert_eq!(reloaded.len(), map.len());

    let options = DistanceOptions::default();
    assert_eq!(
        calculate_distances_from(&mut map, "0,0", 3, &options),
        calculate_distances_from(&mut reloaded, "0,0", 3, &options)
    );
}

#[test]
fn missing_file_is_reported_with_its_path() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("nope.json");

    let err = load_hex_map(&path).expect_err("missing");
    assert!(matches!(&err, Error::SnapshotNotFound { path: p } if *p == path));
    assert!(err.to_string().contains("nope.json"));
}

#[test]
fn invalid_json_is_a_json_error() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("broken.json");
    fs::write(&path, "{\"hexes\": [").expect("write snapshot");

    assert!(matches!(load_hex_map(&path), Err(Error::Json(_))));
}

#[test]
fn override_sides_are_validated() {
    let err = HexMap::from_json_str(
        r#"{"hexes": [{"label": "a", "q": 0, "r": 0, "adjacencyOverrides": {"9": "b"}}]}"#,
    )
    .expect_err("bad side");
    assert!(err.to_string().contains("adjacencyOverrides"));
}

#[test]
fn optional_fields_default() {
    let map = HexMap::from_json_str(r#"{"hexes": [{"label": "x", "q": 2, "r": -1}]}"#)
        .expect("minimal record");
    let hex = map.get("x").expect("present");
    assert_eq!(hex.coord(), (2, -1));
    assert!(hex.effects.is_empty());
    assert!(hex.matrix.is_none());
    assert!(hex.custom_adjacents.is_empty());
}

//! Fuzz target for single-row validation with structured cells.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use plantlabel::input::DataTable;
use plantlabel::params::{extract_nickname, ParamValue};
use plantlabel::render::slugify;
use plantlabel::validation::DatasetValidator;

#[derive(Arbitrary, Debug)]
struct Row {
    common_name: String,
    scientific_name: String,
    nickname: String,
    water: String,
    light: String,
    dry: String,
    spike: String,
    holes: String,
    width: String,
    height: String,
}

const HEADERS: [&str; 10] = [
    "Common Name",
    "Scientific Name",
    "Nickname",
    "Water",
    "Light",
    "Dry between Waterings",
    "Spike",
    "Holes",
    "Width",
    "Height",
];

fuzz_target!(|row: Row| {
    let _ = extract_nickname(&row.common_name);
    let _ = slugify(&row.common_name);
    let _ = ParamValue::Text(row.nickname.clone()).to_literal();

    let cells = vec![
        row.common_name,
        row.scientific_name,
        row.nickname,
        row.water,
        row.light,
        row.dry,
        row.spike,
        row.holes,
        row.width,
        row.height,
    ];
    let table = DataTable::new(
        HEADERS.iter().map(|h| h.to_string()).collect(),
        vec![cells],
        b',',
    );

    match DatasetValidator::default().validate(&table) {
        Ok(dataset) => assert!(dataset.records.len() <= 1),
        Err(e) => assert!(!e.findings().is_empty()),
    }
});

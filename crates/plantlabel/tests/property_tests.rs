//! Property-based tests for plantlabel.
//!
//! These tests use proptest to generate random inputs and check that
//! validation and derivation keep their invariants.
//!
//! # Running Property Tests
//!
//! ```bash
//! cargo test -p plantlabel --test property_tests
//!
//! # More cases
//! PROPTEST_CASES=10000 cargo test -p plantlabel --test property_tests
//! ```

use std::collections::HashSet;

use proptest::prelude::*;

use plantlabel::input::DataTable;
use plantlabel::params::{derive, extract_nickname};
use plantlabel::render::slugify;
use plantlabel::validation::{DatasetValidator, parse_flag};
use plantlabel::{PlantRecord, RenderConfig};

// =============================================================================
// Test Strategies
// =============================================================================

/// Common names, sometimes carrying a quoted cultivar.
fn common_name() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Z][a-z]{2,12}( [a-z]{3,10})?",
        "[A-Z][a-z]{2,12} '[A-Z][a-z]{2,8}( [A-Z][a-z]{2,8})?'",
        "[A-Z][a-z]{2,12} \"[A-Z][a-z]{2,8}\"",
    ]
}

fn plant_record() -> impl Strategy<Value = PlantRecord> {
    (
        common_name(),
        "[A-Z][a-z]{3,10} [a-z]{3,10}",
        1u8..=4,
        1u8..=4,
        any::<(bool, bool, bool)>(),
        20.0f64..150.0,
    )
        .prop_map(|(common, scientific, water, light, flags, width)| PlantRecord {
            row: 1,
            common_name: common,
            scientific_name: scientific,
            nickname: String::new(),
            water_level: water,
            light_level: light,
            dry_between_waterings: flags.0,
            has_spike: flags.1,
            has_holes: flags.2,
            width_mm: width,
            height_mm: 30.0,
        })
}

fn table_row(common: &str, scientific: &str) -> Vec<String> {
    vec![
        common.to_string(),
        scientific.to_string(),
        "2".to_string(),
        "3".to_string(),
        "no".to_string(),
        "yes".to_string(),
        "no".to_string(),
    ]
}

fn headers() -> Vec<String> {
    [
        "Common Name",
        "Scientific Name",
        "Water",
        "Light",
        "Dry between Waterings",
        "Spike",
        "Holes",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

// =============================================================================
// Flags
// =============================================================================

proptest! {
    #[test]
    fn flag_parsing_never_panics(s in "\\PC{0,20}") {
        let _ = parse_flag(&s);
    }

    #[test]
    fn flag_words_ignore_case(word in prop_oneof!["true", "false", "yes", "no"], upper in any::<bool>()) {
        let input = if upper { word.to_uppercase() } else { word.clone() };
        let expected = word == "true" || word == "yes";
        prop_assert_eq!(parse_flag(&input), Some(expected));
    }

    #[test]
    fn nonzero_numbers_are_true(n in -1000i32..1000) {
        prop_assert_eq!(parse_flag(&n.to_string()), Some(n != 0));
    }
}

// =============================================================================
// Names
// =============================================================================

proptest! {
    #[test]
    fn slug_is_filesystem_safe(name in "\\PC{0,40}") {
        let slug = slugify(&name);
        prop_assert!(!slug.starts_with('_'));
        prop_assert!(!slug.ends_with('_'));
        prop_assert!(!slug.contains(char::is_whitespace));
        prop_assert!(!slug.contains('/'));
        prop_assert!(!slug.contains('\''));
    }

    #[test]
    fn slug_is_idempotent(name in common_name()) {
        let once = slugify(&name);
        prop_assert_eq!(slugify(&once), once);
    }

    #[test]
    fn nickname_extraction_removes_quotes(name in common_name()) {
        let (base, nickname) = extract_nickname(&name);
        prop_assert!(!base.contains('\''));
        prop_assert!(!base.contains('"'));
        prop_assert_eq!(base.trim(), base.as_str());
        if !name.contains('\'') && !name.contains('"') {
            prop_assert_eq!(base, name);
            prop_assert!(nickname.is_empty());
        } else {
            prop_assert!(!nickname.is_empty());
        }
    }
}

// =============================================================================
// Derivation and deduplication
// =============================================================================

proptest! {
    #[test]
    fn derivation_is_deterministic(record in plant_record()) {
        let config = RenderConfig::new();
        prop_assert_eq!(derive(&record, &config), derive(&record, &config));
    }

    #[test]
    fn derivation_carries_record_values(record in plant_record()) {
        let params = derive(&record, &RenderConfig::new());
        prop_assert_eq!(
            params.get("water_drops").map(|v| v.to_literal()),
            Some(record.water_level.to_string())
        );
        prop_assert_eq!(
            params.get("spike_enabled").map(|v| v.to_literal()),
            Some(record.has_spike.to_string())
        );
    }

    #[test]
    fn dedup_keeps_one_record_per_identity(
        picks in proptest::collection::vec((0usize..4, 0usize..3), 1..30)
    ) {
        let commons = ["Fern", "Ivy", "Pothos", "Monstera"];
        let scientifics = ["Alpha beta", "Gamma delta", "Epsilon zeta"];

        let rows: Vec<Vec<String>> = picks
            .iter()
            .map(|&(c, s)| table_row(commons[c], scientifics[s]))
            .collect();
        let distinct: HashSet<(usize, usize)> = picks.iter().copied().collect();

        let table = DataTable::new(headers(), rows, b',');
        let dataset = DatasetValidator::default().validate(&table).unwrap();

        prop_assert_eq!(dataset.records.len(), distinct.len());
        prop_assert_eq!(dataset.duplicates_removed, picks.len() - distinct.len());
    }
}

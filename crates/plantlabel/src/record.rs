//! Plant list columns and the normalized record produced by validation.

use serde::{Deserialize, Serialize};

/// Default label width when the row does not specify one.
pub const DEFAULT_WIDTH_MM: f64 = 80.0;

/// Default label height when the row does not specify one.
pub const DEFAULT_HEIGHT_MM: f64 = 30.0;

/// A column of the plant list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    CommonName,
    ScientificName,
    Nickname,
    Water,
    Light,
    DryBetweenWaterings,
    Spike,
    Holes,
    Width,
    Height,
}

impl Column {
    /// Columns that must appear in the header.
    pub const REQUIRED: [Column; 7] = [
        Column::CommonName,
        Column::ScientificName,
        Column::Water,
        Column::Light,
        Column::DryBetweenWaterings,
        Column::Spike,
        Column::Holes,
    ];

    /// Columns that may be left out of the header entirely.
    pub const OPTIONAL: [Column; 3] = [Column::Nickname, Column::Width, Column::Height];

    /// Header text as it appears in the plant list.
    pub fn header(&self) -> &'static str {
        match self {
            Column::CommonName => "Common Name",
            Column::ScientificName => "Scientific Name",
            Column::Nickname => "Nickname",
            Column::Water => "Water",
            Column::Light => "Light",
            Column::DryBetweenWaterings => "Dry between Waterings",
            Column::Spike => "Spike",
            Column::Holes => "Holes",
            Column::Width => "Width",
            Column::Height => "Height",
        }
    }

    pub fn is_required(&self) -> bool {
        Self::REQUIRED.contains(self)
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.header())
    }
}

/// One validated plant entry, every field resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantRecord {
    /// 1-based data row this record came from.
    pub row: usize,
    /// Common name as written, possibly with a quoted cultivar.
    pub common_name: String,
    pub scientific_name: String,
    /// Explicit nickname column value (empty when absent).
    pub nickname: String,
    /// Watering need, 1 (low) to 4 (high).
    pub water_level: u8,
    /// Light need, 1 (low light) to 4 (full sun).
    pub light_level: u8,
    pub dry_between_waterings: bool,
    pub has_spike: bool,
    pub has_holes: bool,
    pub width_mm: f64,
    pub height_mm: f64,
}

impl PlantRecord {
    /// The (common name, scientific name) pair used for duplicate detection.
    pub fn identity(&self) -> (&str, &str) {
        (&self.common_name, &self.scientific_name)
    }
}

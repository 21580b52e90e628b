//! Row validation and duplicate resolution for plant lists.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::fields::{is_blank, parse_flag, parse_integer, parse_positive};
use super::finding::{Finding, FindingKind};
use crate::error::{PlantLabelError, Result};
use crate::input::DataTable;
use crate::record::{Column, DEFAULT_HEIGHT_MM, DEFAULT_WIDTH_MM, PlantRecord};

/// Accepted range for the Water and Light levels.
const LEVEL_RANGE: std::ops::RangeInclusive<i64> = 1..=4;

/// Tunables for row validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Width used when the Width column or cell is empty.
    pub default_width_mm: f64,
    /// Height used when the Height column or cell is empty.
    pub default_height_mm: f64,
    /// Dimensions above this raise a warning.
    pub max_dimension_mm: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            default_width_mm: DEFAULT_WIDTH_MM,
            default_height_mm: DEFAULT_HEIGHT_MM,
            max_dimension_mm: 200.0,
        }
    }
}

/// Records that survived validation, plus non-fatal findings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatedDataset {
    /// Valid, de-duplicated records in input order.
    pub records: Vec<PlantRecord>,
    /// Warnings and notes collected along the way.
    pub warnings: Vec<Finding>,
    /// Data rows read from the table.
    pub rows_read: usize,
    /// Rows dropped as duplicates of an earlier identity pair.
    pub duplicates_removed: usize,
}

/// Header positions of the known columns in one table.
#[derive(Debug, Clone)]
pub struct ColumnLayout {
    positions: HashMap<Column, usize>,
}

impl ColumnLayout {
    /// Locate every known column, failing if a required one is missing.
    pub fn resolve(table: &DataTable) -> Result<Self> {
        let missing: Vec<String> = Column::REQUIRED
            .iter()
            .filter(|c| !table.has_column(c.header()))
            .map(|c| c.header().to_string())
            .collect();

        if !missing.is_empty() {
            return Err(PlantLabelError::Schema {
                missing,
                available: table.headers.clone(),
            });
        }

        let positions = Column::REQUIRED
            .iter()
            .chain(Column::OPTIONAL.iter())
            .filter_map(|&c| table.column_index(c.header()).map(|i| (c, i)))
            .collect();

        Ok(Self { positions })
    }

    pub fn contains(&self, column: Column) -> bool {
        self.positions.contains_key(&column)
    }

    /// View one row through this layout.
    pub fn row<'a>(&'a self, row: usize, cells: &'a [String]) -> RowView<'a> {
        RowView {
            layout: self,
            cells,
            row,
        }
    }
}

/// A single data row addressed by column.
pub struct RowView<'a> {
    layout: &'a ColumnLayout,
    cells: &'a [String],
    /// 1-based data row number.
    row: usize,
}

impl<'a> RowView<'a> {
    /// Cell for a column; `None` when the column is absent from the header.
    pub fn get(&self, column: Column) -> Option<&'a str> {
        let idx = *self.layout.positions.get(&column)?;
        self.cells.get(idx).map(|s| s.as_str())
    }

    pub fn row(&self) -> usize {
        self.row
    }

    fn is_empty(&self) -> bool {
        self.cells.iter().all(|c| DataTable::is_null_value(c))
    }
}

/// Result of checking one row.
#[derive(Debug, Clone)]
pub struct RowOutcome {
    /// The normalized record, present only when the row has no errors.
    pub record: Option<PlantRecord>,
    /// Every error and warning raised for the row.
    pub findings: Vec<Finding>,
}

/// Checks each field of a row independently and normalizes it.
pub struct RowValidator {
    config: ValidationConfig,
}

impl RowValidator {
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Validate one row, collecting every violation before rejecting it.
    pub fn validate_row(&self, row: &RowView<'_>) -> RowOutcome {
        let mut findings = Vec::new();

        let common_name = self.required_text(row, Column::CommonName, &mut findings);
        let scientific_name = self.required_text(row, Column::ScientificName, &mut findings);
        let water_level = self.level(row, Column::Water, &mut findings);
        let light_level = self.level(row, Column::Light, &mut findings);
        let dry_between_waterings = self.flag(row, Column::DryBetweenWaterings, &mut findings);
        let has_spike = self.flag(row, Column::Spike, &mut findings);
        let has_holes = self.flag(row, Column::Holes, &mut findings);
        let width_mm = self.dimension(row, Column::Width, self.config.default_width_mm, &mut findings);
        let height_mm =
            self.dimension(row, Column::Height, self.config.default_height_mm, &mut findings);

        let nickname = row
            .get(Column::Nickname)
            .filter(|v| !DataTable::is_null_value(v))
            .map(|v| v.trim().to_string())
            .unwrap_or_default();

        let record = match (
            common_name,
            scientific_name,
            water_level,
            light_level,
            dry_between_waterings,
            has_spike,
            has_holes,
            width_mm,
            height_mm,
        ) {
            (
                Some(common_name),
                Some(scientific_name),
                Some(water_level),
                Some(light_level),
                Some(dry_between_waterings),
                Some(has_spike),
                Some(has_holes),
                Some(width_mm),
                Some(height_mm),
            ) => Some(PlantRecord {
                row: row.row(),
                common_name,
                scientific_name,
                nickname,
                water_level,
                light_level,
                dry_between_waterings,
                has_spike,
                has_holes,
                width_mm,
                height_mm,
            }),
            _ => None,
        };

        RowOutcome { record, findings }
    }

    fn required_text(
        &self,
        row: &RowView<'_>,
        column: Column,
        findings: &mut Vec<Finding>,
    ) -> Option<String> {
        let raw = row.get(column);
        if is_blank(raw) {
            findings.push(
                Finding::error(FindingKind::MissingValue, format!("{} is required", column))
                    .at_row(row.row())
                    .in_column(column.header()),
            );
            return None;
        }
        raw.map(|v| v.trim().to_string())
    }

    fn level(&self, row: &RowView<'_>, column: Column, findings: &mut Vec<Finding>) -> Option<u8> {
        let raw = row.get(column).unwrap_or("");
        let located = |f: Finding| f.at_row(row.row()).in_column(column.header());

        if is_blank(Some(raw)) {
            findings.push(located(Finding::error(
                FindingKind::MissingValue,
                format!("{} is required (1-4)", column),
            )));
            return None;
        }

        match parse_integer(raw) {
            None => {
                findings.push(located(
                    Finding::error(
                        FindingKind::InvalidNumber,
                        format!("{} must be a whole number from 1 to 4, got '{}'", column, raw.trim()),
                    )
                    .with_value(raw.trim()),
                ));
                None
            }
            Some(n) if !LEVEL_RANGE.contains(&n) => {
                findings.push(located(
                    Finding::error(
                        FindingKind::OutOfRange,
                        format!("{} must be between 1 and 4, got {}", column, n),
                    )
                    .with_value(raw.trim()),
                ));
                None
            }
            Some(n) => u8::try_from(n).ok(),
        }
    }

    fn flag(&self, row: &RowView<'_>, column: Column, findings: &mut Vec<Finding>) -> Option<bool> {
        let raw = row.get(column);
        if is_blank(raw) {
            return Some(false);
        }

        let raw = raw.unwrap_or("").trim();
        let parsed = parse_flag(raw);
        if parsed.is_none() {
            findings.push(
                Finding::error(
                    FindingKind::InvalidBoolean,
                    format!("{} must be TRUE/FALSE, YES/NO or 1/0, got '{}'", column, raw),
                )
                .at_row(row.row())
                .in_column(column.header())
                .with_value(raw),
            );
        }
        parsed
    }

    fn dimension(
        &self,
        row: &RowView<'_>,
        column: Column,
        default: f64,
        findings: &mut Vec<Finding>,
    ) -> Option<f64> {
        let raw = row.get(column);
        if is_blank(raw) {
            return Some(default);
        }

        let raw = raw.unwrap_or("").trim();
        let Some(value) = parse_positive(raw) else {
            findings.push(
                Finding::error(
                    FindingKind::InvalidDimension,
                    format!("{} must be a positive number of millimetres, got '{}'", column, raw),
                )
                .at_row(row.row())
                .in_column(column.header())
                .with_value(raw),
            );
            return None;
        };

        if value > self.config.max_dimension_mm {
            findings.push(
                Finding::warning(
                    FindingKind::OversizedDimension,
                    format!(
                        "{} of {}mm is larger than {}mm; using it anyway",
                        column, value, self.config.max_dimension_mm
                    ),
                )
                .at_row(row.row())
                .in_column(column.header())
                .with_value(raw),
            );
        }

        Some(value)
    }
}

impl Default for RowValidator {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}

/// Drops records whose identity pair was already seen, keeping the first.
pub struct DuplicateResolver;

impl DuplicateResolver {
    /// Returns the surviving records and a warning when anything was dropped.
    pub fn resolve(&self, records: Vec<PlantRecord>) -> (Vec<PlantRecord>, Option<Finding>) {
        let mut groups: IndexMap<(String, String), Vec<usize>> = IndexMap::new();
        let mut kept = Vec::with_capacity(records.len());

        for record in records {
            let key = (record.common_name.clone(), record.scientific_name.clone());
            let rows = groups.entry(key).or_default();
            rows.push(record.row);
            if rows.len() == 1 {
                kept.push(record);
            }
        }

        groups.retain(|_, rows| rows.len() > 1);
        if groups.is_empty() {
            return (kept, None);
        }

        let removed: usize = groups.values().map(|rows| rows.len() - 1).sum();
        let dropped: Vec<String> = groups
            .iter()
            .map(|((common, scientific), rows)| {
                let rows: Vec<String> = rows[1..].iter().map(|r| r.to_string()).collect();
                format!("{} ({}) at row(s) {}", common, scientific, rows.join(", "))
            })
            .collect();

        let finding = Finding::warning(
            FindingKind::Duplicate,
            format!(
                "Removed {} duplicate row(s), keeping the first occurrence: {}",
                removed,
                dropped.join("; ")
            ),
        )
        .with_value(removed.to_string());

        (kept, Some(finding))
    }
}

/// Runs schema, row and duplicate checks over a whole table.
///
/// Validation is all-or-nothing: if any row has an error, the whole dataset
/// is rejected with every row-level finding.
pub struct DatasetValidator {
    rows: RowValidator,
    duplicates: DuplicateResolver,
}

impl DatasetValidator {
    pub fn new(config: ValidationConfig) -> Self {
        Self {
            rows: RowValidator::new(config),
            duplicates: DuplicateResolver,
        }
    }

    /// Validate every row of the table.
    pub fn validate(&self, table: &DataTable) -> Result<ValidatedDataset> {
        let layout = ColumnLayout::resolve(table)?;

        let mut warnings = optional_column_notes(&layout);
        let mut errors = Vec::new();
        let mut records = Vec::with_capacity(table.row_count());

        for (idx, cells) in table.rows.iter().enumerate() {
            let row = layout.row(idx + 1, cells);
            if row.is_empty() {
                debug!(row = row.row(), "skipping blank row");
                continue;
            }

            let outcome = self.rows.validate_row(&row);
            for finding in outcome.findings {
                if finding.is_error() {
                    errors.push(finding);
                } else {
                    warnings.push(finding);
                }
            }
            if let Some(record) = outcome.record {
                records.push(record);
            }
        }

        if !errors.is_empty() {
            warn!(errors = errors.len(), "plant list failed validation");
            return Err(PlantLabelError::DatasetValidation { findings: errors });
        }

        let before = records.len();
        let (records, duplicate_warning) = self.duplicates.resolve(records);
        let duplicates_removed = before - records.len();
        if let Some(finding) = duplicate_warning {
            warn!(removed = duplicates_removed, "{}", finding.message);
            warnings.push(finding);
        }

        debug!(
            rows = table.row_count(),
            records = records.len(),
            warnings = warnings.len(),
            "validation complete"
        );

        Ok(ValidatedDataset {
            records,
            warnings,
            rows_read: table.row_count(),
            duplicates_removed,
        })
    }
}

impl Default for DatasetValidator {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}

fn optional_column_notes(layout: &ColumnLayout) -> Vec<Finding> {
    Column::OPTIONAL
        .iter()
        .filter(|c| !layout.contains(**c))
        .map(|&c| {
            let fallback = match c {
                Column::Nickname => "nicknames will be taken from quotes in the common name",
                Column::Width => "the default width applies",
                _ => "the default height applies",
            };
            Finding::info(
                FindingKind::OptionalColumnAbsent,
                format!("'{}' column not found; {}", c, fallback),
            )
            .in_column(c.header())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Severity;

    const HEADER: &[&str] = &[
        "Common Name",
        "Scientific Name",
        "Water",
        "Light",
        "Dry between Waterings",
        "Spike",
        "Holes",
    ];

    fn make_table(headers: &[&str], rows: Vec<Vec<&str>>) -> DataTable {
        DataTable::new(
            headers.iter().map(|s| s.to_string()).collect(),
            rows.into_iter()
                .map(|r| r.into_iter().map(String::from).collect())
                .collect(),
            b',',
        )
    }

    fn validate(table: &DataTable) -> Result<ValidatedDataset> {
        DatasetValidator::default().validate(table)
    }

    #[test]
    fn test_valid_row_is_normalized() {
        let table = make_table(
            HEADER,
            vec![vec![" Maranta 'Lemon Lime' ", "Maranta leuconeura", "3", "2", "yes", "FALSE", "1"]],
        );
        let dataset = validate(&table).unwrap();

        let record = &dataset.records[0];
        assert_eq!(record.row, 1);
        assert_eq!(record.common_name, "Maranta 'Lemon Lime'");
        assert_eq!(record.water_level, 3);
        assert_eq!(record.light_level, 2);
        assert!(record.dry_between_waterings);
        assert!(!record.has_spike);
        assert!(record.has_holes);
        assert_eq!(record.nickname, "");
    }

    #[test]
    fn test_missing_required_column_is_schema_error() {
        let table = make_table(
            &["Common Name", "Scientific Name", "Water", "Light"],
            vec![vec!["Fern", "Nephrolepis", "3", "2"]],
        );

        match validate(&table).unwrap_err() {
            PlantLabelError::Schema { missing, available } => {
                assert_eq!(missing, vec!["Dry between Waterings", "Spike", "Holes"]);
                assert_eq!(available.len(), 4);
            }
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_optional_columns_use_defaults() {
        let table = make_table(HEADER, vec![vec!["Fern", "Nephrolepis", "3", "2", "", "", ""]]);
        let dataset = validate(&table).unwrap();

        assert_eq!(dataset.records[0].width_mm, 80.0);
        assert_eq!(dataset.records[0].height_mm, 30.0);
        let notes: Vec<_> = dataset
            .warnings
            .iter()
            .filter(|f| f.kind == FindingKind::OptionalColumnAbsent)
            .collect();
        assert_eq!(notes.len(), 3);
        assert!(notes.iter().all(|f| f.severity == Severity::Info));
    }

    #[test]
    fn test_empty_dimension_cell_uses_configured_default() {
        let mut headers = HEADER.to_vec();
        headers.extend(["Width", "Height"]);
        let table = make_table(
            &headers,
            vec![vec!["Fern", "Nephrolepis", "3", "2", "", "", "", "", "45.5"]],
        );
        let validator = DatasetValidator::new(ValidationConfig {
            default_width_mm: 100.0,
            ..ValidationConfig::default()
        });
        let dataset = validator.validate(&table).unwrap();

        assert_eq!(dataset.records[0].width_mm, 100.0);
        assert_eq!(dataset.records[0].height_mm, 45.5);
    }

    #[test]
    fn test_level_errors_abort_dataset() {
        let table = make_table(
            HEADER,
            vec![
                vec!["Fern", "Nephrolepis", "5", "2", "", "", ""],
                vec!["Cactus", "Cactaceae", "1", "lots", "", "", ""],
                vec!["Pothos", "Epipremnum", "2", "0", "", "", ""],
                vec!["Ivy", "Hedera", "", "3", "", "", ""],
            ],
        );

        let err = validate(&table).unwrap_err();
        let findings = err.findings();
        assert_eq!(findings.len(), 4);
        assert_eq!(findings[0].kind, FindingKind::OutOfRange);
        assert_eq!(findings[0].row, Some(1));
        assert_eq!(findings[1].kind, FindingKind::InvalidNumber);
        assert_eq!(findings[1].column.as_deref(), Some("Light"));
        assert_eq!(findings[2].kind, FindingKind::OutOfRange);
        assert_eq!(findings[3].kind, FindingKind::MissingValue);
    }

    #[test]
    fn test_all_row_violations_are_collected() {
        let table = make_table(HEADER, vec![vec!["", "  ", "9", "x", "maybe", "2", "no"]]);

        let err = validate(&table).unwrap_err();
        let kinds: Vec<FindingKind> = err.findings().iter().map(|f| f.kind).collect();
        assert_eq!(
            kinds,
            vec![
                FindingKind::MissingValue,
                FindingKind::MissingValue,
                FindingKind::OutOfRange,
                FindingKind::InvalidNumber,
                FindingKind::InvalidBoolean,
            ]
        );
    }

    #[test]
    fn test_invalid_dimension_is_error_and_oversized_is_warning() {
        let mut headers = HEADER.to_vec();
        headers.extend(["Width", "Height"]);

        let bad = make_table(
            &headers,
            vec![vec!["Fern", "Nephrolepis", "3", "2", "", "", "", "-4", "30"]],
        );
        let err = validate(&bad).unwrap_err();
        assert_eq!(err.findings()[0].kind, FindingKind::InvalidDimension);

        let big = make_table(
            &headers,
            vec![vec!["Fern", "Nephrolepis", "3", "2", "", "", "", "250", "30"]],
        );
        let dataset = validate(&big).unwrap();
        assert_eq!(dataset.records[0].width_mm, 250.0);
        assert!(dataset
            .warnings
            .iter()
            .any(|f| f.kind == FindingKind::OversizedDimension && f.severity == Severity::Warning));
    }

    #[test]
    fn test_explicit_nickname_is_kept() {
        let mut headers = vec!["Nickname"];
        headers.extend_from_slice(HEADER);
        let table = make_table(
            &headers,
            vec![vec!["Goldie", "Pothos", "Epipremnum aureum", "2", "2", "", "", ""]],
        );
        let dataset = validate(&table).unwrap();
        assert_eq!(dataset.records[0].nickname, "Goldie");
    }

    #[test]
    fn test_duplicates_keep_first_occurrence() {
        let table = make_table(
            HEADER,
            vec![
                vec!["Pothos", "Epipremnum aureum", "2", "2", "", "", ""],
                vec!["Fern", "Nephrolepis", "3", "2", "", "", ""],
                vec!["Pothos", "Epipremnum aureum", "4", "4", "", "", ""],
                vec!["Pothos", "Epipremnum pinnatum", "1", "1", "", "", ""],
                vec!["Fern", "Nephrolepis", "1", "1", "", "", ""],
            ],
        );
        let dataset = validate(&table).unwrap();

        assert_eq!(dataset.records.len(), 3);
        assert_eq!(dataset.duplicates_removed, 2);
        let rows: Vec<usize> = dataset.records.iter().map(|r| r.row).collect();
        assert_eq!(rows, vec![1, 2, 4]);
        assert_eq!(dataset.records[0].water_level, 2);

        let dup = dataset
            .warnings
            .iter()
            .find(|f| f.kind == FindingKind::Duplicate)
            .unwrap();
        assert!(dup.message.contains("Removed 2 duplicate row(s)"));
        assert!(dup.message.contains("Pothos (Epipremnum aureum) at row(s) 3"));
    }

    #[test]
    fn test_duplicates_not_checked_when_rows_invalid() {
        let table = make_table(
            HEADER,
            vec![
                vec!["Pothos", "Epipremnum aureum", "2", "2", "", "", ""],
                vec!["Pothos", "Epipremnum aureum", "7", "2", "", "", ""],
            ],
        );
        let err = validate(&table).unwrap_err();
        assert!(err.findings().iter().all(|f| f.kind != FindingKind::Duplicate));
    }

    #[test]
    fn test_placeholder_flags_are_invalid_booleans() {
        let table = make_table(
            HEADER,
            vec![vec!["Fern", "Nephrolepis", "3", "2", "-", "nil", "."]],
        );

        let err = validate(&table).unwrap_err();
        let findings = err.findings();
        assert_eq!(findings.len(), 3);
        assert!(findings.iter().all(|f| f.kind == FindingKind::InvalidBoolean));
        assert_eq!(findings[0].column.as_deref(), Some("Dry between Waterings"));
        assert_eq!(findings[2].column.as_deref(), Some("Holes"));
    }

    #[test]
    fn test_null_tokens_in_flag_columns_are_blank() {
        let table = make_table(
            HEADER,
            vec![vec!["Fern", "Nephrolepis", "3", "2", "NA", "null", "NaN"]],
        );

        let dataset = validate(&table).unwrap();
        let record = &dataset.records[0];
        assert!(!record.dry_between_waterings);
        assert!(!record.has_spike);
        assert!(!record.has_holes);
    }

    #[test]
    fn test_blank_rows_are_skipped() {
        let table = make_table(
            HEADER,
            vec![
                vec!["Fern", "Nephrolepis", "3", "2", "", "", ""],
                vec!["", "", "", "", "", "", ""],
            ],
        );
        let dataset = validate(&table).unwrap();
        assert_eq!(dataset.records.len(), 1);
        assert_eq!(dataset.rows_read, 2);
    }
}

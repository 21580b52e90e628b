//! Validation of plant lists: schema, per-row field checks, duplicates.

mod fields;
mod finding;
mod validators;

pub use fields::{is_blank, parse_flag, parse_integer, parse_positive};
pub use finding::{Finding, FindingKind, Severity};
pub use validators::{
    ColumnLayout, DatasetValidator, DuplicateResolver, RowOutcome, RowValidator, RowView,
    ValidatedDataset, ValidationConfig,
};

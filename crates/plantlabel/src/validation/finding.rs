//! Findings reported while validating a plant list.

use serde::{Deserialize, Serialize};

/// Kind of problem (or note) detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    /// Required value is empty.
    MissingValue,
    /// Value is not a number.
    InvalidNumber,
    /// Number outside the accepted range.
    OutOfRange,
    /// Value is not a recognized boolean form.
    InvalidBoolean,
    /// Dimension is not a positive number.
    InvalidDimension,
    /// Dimension is unusually large; used anyway.
    OversizedDimension,
    /// Rows sharing an identity pair were dropped.
    Duplicate,
    /// Optional column absent; a fallback applies.
    OptionalColumnAbsent,
}

impl FindingKind {
    /// Get a human-readable label for the finding kind.
    pub fn label(&self) -> &'static str {
        match self {
            FindingKind::MissingValue => "Missing Value",
            FindingKind::InvalidNumber => "Invalid Number",
            FindingKind::OutOfRange => "Out of Range",
            FindingKind::InvalidBoolean => "Invalid Boolean",
            FindingKind::InvalidDimension => "Invalid Dimension",
            FindingKind::OversizedDimension => "Oversized Dimension",
            FindingKind::Duplicate => "Duplicate",
            FindingKind::OptionalColumnAbsent => "Optional Column Absent",
        }
    }
}

/// Severity level of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational only.
    Info,
    /// Non-fatal; the run continues.
    Warning,
    /// The row is rejected and the dataset fails.
    Error,
}

impl Severity {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Info => "Info",
            Severity::Warning => "Warning",
            Severity::Error => "Error",
        }
    }
}

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    #[serde(rename = "type")]
    pub kind: FindingKind,
    pub severity: Severity,
    /// 1-based data row, when the finding concerns one row.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<usize>,
    /// Affected column header.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    /// Offending cell value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Human-readable description.
    pub message: String,
}

impl Finding {
    /// Create a new finding.
    pub fn new(kind: FindingKind, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity,
            row: None,
            column: None,
            value: None,
            message: message.into(),
        }
    }

    pub fn error(kind: FindingKind, message: impl Into<String>) -> Self {
        Self::new(kind, Severity::Error, message)
    }

    pub fn warning(kind: FindingKind, message: impl Into<String>) -> Self {
        Self::new(kind, Severity::Warning, message)
    }

    pub fn info(kind: FindingKind, message: impl Into<String>) -> Self {
        Self::new(kind, Severity::Info, message)
    }

    /// Set the row.
    pub fn at_row(mut self, row: usize) -> Self {
        self.row = Some(row);
        self
    }

    /// Set the column.
    pub fn in_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    /// Set the offending value.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.row, &self.column) {
            (Some(row), Some(col)) => write!(f, "Row {} [{}]: {}", row, col, self.message),
            (Some(row), None) => write!(f, "Row {}: {}", row, self.message),
            (None, Some(col)) => write!(f, "[{}]: {}", col, self.message),
            (None, None) => f.write_str(&self.message),
        }
    }
}

//! Dataset rows - one labeled category with up to two values.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RowId(Uuid);

impl RowId {
    /// Create a new unique row ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RowId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single dataset row.
///
/// `None` is the "empty" sentinel for a value and is distinct from `Some(0.0)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataRow {
    /// Stable identifier.
    pub id: RowId,
    /// Category label shown below the axis.
    pub label: String,
    /// First series value.
    pub value1: Option<f64>,
    /// Second series value, only consulted in dual-series charts.
    pub value2: Option<f64>,
}

impl DataRow {
    /// Create a row with a fresh ID and empty label/values.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            id: RowId::new(),
            label: String::new(),
            value1: None,
            value2: None,
        }
    }

    /// Create a row with a fresh ID and the given content.
    #[must_use]
    pub fn new(label: impl Into<String>, value1: Option<f64>, value2: Option<f64>) -> Self {
        Self {
            id: RowId::new(),
            label: label.into(),
            value1,
            value2,
        }
    }

    /// Whether the row takes part in the chart.
    ///
    /// A row is charted when its label is non-blank or its first value is
    /// strictly positive. `value2` is never consulted.
    #[must_use]
    pub fn is_charted(&self) -> bool {
        !self.label.trim().is_empty() || self.value1.is_some_and(|v| v > 0.0)
    }

    /// Apply a single-field edit.
    pub fn apply(&mut self, edit: RowEdit) {
        match edit {
            RowEdit::Label(label) => self.label = label,
            RowEdit::Value1(value) => self.value1 = value,
            RowEdit::Value2(value) => self.value2 = value,
        }
    }
}

/// A replacement for one field of a row.
#[derive(Debug, Clone, PartialEq)]
pub enum RowEdit {
    /// New label text (any string, including empty).
    Label(String),
    /// New first value, `None` to unset.
    Value1(Option<f64>),
    /// New second value, `None` to unset.
    Value2(Option<f64>),
}

/// Parse form text into a row value.
///
/// Blank, unparsable and non-finite input all yield `None`, the unset sentinel.
#[must_use]
pub fn parse_value(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

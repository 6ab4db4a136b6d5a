//! Editing session state.
//!
//! [`ChartSession`] is the single owner of the dataset and the chart settings.
//! Hosts hold it, pass it by reference to the renderer, and mutate it only through
//! the operations below. Each effective mutation bumps [`ChartSession::revision`].

use serde::{Deserialize, Serialize};

use crate::{ChartError, ChartResult, ChartSettings, DataRow, RowEdit, RowId, SettingsPatch};

/// Maximum number of rows in a session.
pub const MAX_ROWS: usize = 5;

/// Minimum number of rows in a session.
pub const MIN_ROWS: usize = 1;

/// The dataset and settings being edited.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartSession {
    rows: Vec<DataRow>,
    settings: ChartSettings,
    #[serde(skip)]
    revision: u64,
}

impl ChartSession {
    /// Create a session with the built-in sample dataset and default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rows: vec![
                DataRow::new("Lớp 6", Some(45.0), Some(40.0)),
                DataRow::new("Lớp 7", Some(38.0), Some(42.0)),
                DataRow::new("Lớp 8", Some(50.0), Some(48.0)),
            ],
            settings: ChartSettings::default(),
            revision: 0,
        }
    }

    /// The rows in chart order.
    #[must_use]
    pub fn rows(&self) -> &[DataRow] {
        &self.rows
    }

    /// The current settings.
    #[must_use]
    pub fn settings(&self) -> &ChartSettings {
        &self.settings
    }

    /// Number of rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Change counter, bumped by every mutation that modified the session.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Whether [`Self::add_row`] would succeed.
    #[must_use]
    pub fn can_add_row(&self) -> bool {
        self.rows.len() < MAX_ROWS
    }

    /// Whether [`Self::remove_row`] would remove anything.
    #[must_use]
    pub fn can_remove_row(&self) -> bool {
        self.rows.len() > MIN_ROWS
    }

    /// Append an empty row.
    ///
    /// Returns the new row's ID, or `None` if the session is already full.
    pub fn add_row(&mut self) -> Option<RowId> {
        if !self.can_add_row() {
            tracing::debug!("add_row ignored: already {MAX_ROWS} rows");
            return None;
        }
        let row = DataRow::empty();
        let id = row.id;
        self.rows.push(row);
        self.touch();
        tracing::debug!("Added row {id} ({} rows)", self.rows.len());
        Some(id)
    }

    /// Remove the row at `index`.
    ///
    /// Returns `Ok(false)` without changes when only one row remains.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::RowOutOfRange`] if `index` does not address a row.
    pub fn remove_row(&mut self, index: usize) -> ChartResult<bool> {
        self.check_index(index)?;
        if !self.can_remove_row() {
            tracing::debug!("remove_row ignored: last remaining row");
            return Ok(false);
        }
        let removed = self.rows.remove(index);
        self.touch();
        tracing::debug!("Removed row {} at index {index}", removed.id);
        Ok(true)
    }

    /// Replace one field of the row at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::RowOutOfRange`] if `index` does not address a row.
    pub fn update_row(&mut self, index: usize, edit: RowEdit) -> ChartResult<()> {
        self.check_index(index)?;
        let row = &mut self.rows[index];
        let before = row.clone();
        row.apply(edit);
        if *row != before {
            tracing::debug!("Updated row {} at index {index}", row.id);
            self.touch();
        }
        Ok(())
    }

    /// Merge a partial settings change.
    pub fn update_settings(&mut self, patch: SettingsPatch) {
        if self.settings.apply(patch) {
            tracing::debug!("Settings updated: {:?}", self.settings);
            self.touch();
        }
    }

    fn check_index(&self, index: usize) -> ChartResult<()> {
        if index < self.rows.len() {
            Ok(())
        } else {
            Err(ChartError::RowOutOfRange {
                index,
                len: self.rows.len(),
            })
        }
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

impl Default for ChartSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ChartType, Swatch};

    #[test]
    fn test_default_session_has_sample_rows() {
        let session = ChartSession::new();
        let labels: Vec<_> = session.rows().iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, ["Lớp 6", "Lớp 7", "Lớp 8"]);
        assert_eq!(session.rows()[2].value1, Some(50.0));
        assert_eq!(session.rows()[2].value2, Some(48.0));
        assert_eq!(session.revision(), 0);
    }

    #[test]
    fn test_add_row_caps_at_five() {
        let mut session = ChartSession::new();
        assert!(session.add_row().is_some());
        assert!(session.add_row().is_some());
        assert_eq!(session.row_count(), MAX_ROWS);
        let revision = session.revision();

        assert!(session.add_row().is_none());
        assert_eq!(session.row_count(), MAX_ROWS);
        assert_eq!(session.revision(), revision);
    }

    #[test]
    fn test_added_row_is_empty() {
        let mut session = ChartSession::new();
        let id = session.add_row().expect("room for a row");
        let row = session.rows().last().expect("row");
        assert_eq!(row.id, id);
        assert_eq!(row.label, "");
        assert_eq!(row.value1, None);
        assert_eq!(row.value2, None);
    }

    #[test]
    fn test_remove_row_keeps_last() {
        let mut session = ChartSession::new();
        assert_eq!(session.remove_row(0), Ok(true));
        assert_eq!(session.remove_row(0), Ok(true));
        assert_eq!(session.rows()[0].label, "Lớp 8");
        assert_eq!(session.remove_row(0), Ok(false));
        assert_eq!(session.row_count(), MIN_ROWS);
    }

    #[test]
    fn test_remove_row_out_of_range() {
        let mut session = ChartSession::new();
        assert_eq!(
            session.remove_row(3),
            Err(ChartError::RowOutOfRange { index: 3, len: 3 })
        );
    }

    #[test]
    fn test_update_row_fields() {
        let mut session = ChartSession::new();
        session
            .update_row(1, RowEdit::Value1(None))
            .expect("valid index");
        session
            .update_row(1, RowEdit::Label("Lớp 9".to_string()))
            .expect("valid index");
        let row = &session.rows()[1];
        assert_eq!(row.label, "Lớp 9");
        assert_eq!(row.value1, None);
        assert_eq!(row.value2, Some(42.0));
        assert_eq!(session.revision(), 2);
    }

    #[test]
    fn test_update_row_same_value_keeps_revision() {
        let mut session = ChartSession::new();
        session
            .update_row(0, RowEdit::Value1(Some(45.0)))
            .expect("valid index");
        assert_eq!(session.revision(), 0);
    }

    #[test]
    fn test_update_row_out_of_range() {
        let mut session = ChartSession::new();
        let err = session
            .update_row(7, RowEdit::Label("x".to_string()))
            .expect_err("out of range");
        assert_eq!(err.to_string(), "Row index 7 out of range (session has 3 rows)");
    }

    #[test]
    fn test_update_settings_bumps_revision() {
        let mut session = ChartSession::new();
        session.update_settings(SettingsPatch::chart_type(ChartType::Single));
        session.update_settings(SettingsPatch::color(1, Swatch::White));
        assert_eq!(session.settings().chart_type, ChartType::Single);
        assert_eq!(session.settings().color2, Swatch::White);
        assert_eq!(session.revision(), 2);

        session.update_settings(SettingsPatch::chart_type(ChartType::Single));
        assert_eq!(session.revision(), 2);
    }
}

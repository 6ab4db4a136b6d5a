//! Editing form for the chart session.
//!
//! The form never mutates the session itself: it reads a snapshot and
//! reports what the user did as a list of [`FormAction`]s for the app to
//! apply.

use std::collections::HashMap;

use educhart_core::{
    parse_value, ChartSession, ChartType, DataRow, Pattern, RowEdit, RowId, SettingsPatch, Swatch,
};
use educhart_renderer::chart::format_value;
use egui::{Color32, RichText, Stroke};

const SECTION_COLOR: Color32 = Color32::from_rgb(100, 116, 139);
const ACCENT: Color32 = Color32::from_rgb(37, 99, 235);
const SWATCH_SIZE: f32 = 24.0;

/// Something the user asked for through the form.
#[derive(Debug, Clone, PartialEq)]
pub enum FormAction {
    /// Merge a settings change.
    Settings(SettingsPatch),
    /// Append an empty row.
    AddRow,
    /// Remove the row at an index.
    RemoveRow(usize),
    /// Replace one field of the row at an index.
    EditRow {
        /// Row position.
        index: usize,
        /// Field change.
        edit: RowEdit,
    },
    /// Export the current chart as PNG.
    Export,
}

/// Text being typed into a row's value fields.
#[derive(Debug, Clone, Default, PartialEq)]
struct ValueText {
    value1: String,
    value2: String,
}

impl ValueText {
    fn for_row(row: &DataRow) -> Self {
        Self {
            value1: value_text(row.value1),
            value2: value_text(row.value2),
        }
    }
}

fn value_text(value: Option<f64>) -> String {
    value.map(format_value).unwrap_or_default()
}

/// Keep `text` while it still means `value`, so partial input like `4.` survives a redraw.
fn reconcile(text: &mut String, value: Option<f64>) {
    if parse_value(text) != value {
        *text = value_text(value);
    }
}

/// Left side editing form.
#[derive(Debug, Default)]
pub struct ChartForm {
    values: HashMap<RowId, ValueText>,
}

impl ChartForm {
    /// Create an empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Align the value text buffers with the session rows.
    ///
    /// Buffers of removed rows are dropped, new rows get fresh buffers and
    /// buffers that no longer match their row are reset.
    pub fn sync(&mut self, rows: &[DataRow]) {
        self.values.retain(|id, _| rows.iter().any(|row| row.id == *id));
        for row in rows {
            let text = self
                .values
                .entry(row.id)
                .or_insert_with(|| ValueText::for_row(row));
            reconcile(&mut text.value1, row.value1);
            reconcile(&mut text.value2, row.value2);
        }
    }

    /// Draw the form and collect the user's actions for this frame.
    pub fn show(&mut self, ui: &mut egui::Ui, session: &ChartSession) -> Vec<FormAction> {
        self.sync(session.rows());
        let mut actions = Vec::new();

        ui.add_space(8.0);
        ui.label(
            RichText::new(format!("📊 {}", crate::APP_TITLE))
                .size(22.0)
                .strong(),
        );
        ui.add_space(8.0);
        ui.separator();

        basic_section(ui, session, &mut actions);
        ui.add_space(12.0);
        ui.separator();

        self.data_section(ui, session, &mut actions);
        ui.add_space(12.0);
        ui.separator();

        style_section(ui, session, &mut actions);
        ui.add_space(16.0);

        let export = egui::Button::new(RichText::new("📥 Tải biểu đồ (PNG)").strong().color(Color32::WHITE))
            .fill(ACCENT)
            .min_size(egui::vec2(ui.available_width(), 40.0));
        if ui.add(export).clicked() {
            actions.push(FormAction::Export);
        }

        actions
    }

    fn data_section(
        &mut self,
        ui: &mut egui::Ui,
        session: &ChartSession,
        actions: &mut Vec<FormAction>,
    ) {
        let double = session.settings().chart_type == ChartType::Double;

        ui.horizontal(|ui| {
            section_heading(ui, "Dữ liệu (Tối đa 5)");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .add_enabled(session.can_add_row(), egui::Button::new("+ Thêm dòng"))
                    .clicked()
                {
                    actions.push(FormAction::AddRow);
                }
            });
        });
        ui.add_space(6.0);

        for (index, row) in session.rows().iter().enumerate() {
            let Some(text) = self.values.get_mut(&row.id) else {
                continue;
            };
            ui.push_id(row.id.to_string(), |ui| {
                egui::Frame::none()
                    .fill(ui.visuals().widgets.noninteractive.bg_fill)
                    .rounding(6.0)
                    .inner_margin(8.0)
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            let mut label = row.label.clone();
                            let edit = egui::TextEdit::singleline(&mut label)
                                .hint_text("Tên cột...")
                                .desired_width(ui.available_width() - 32.0);
                            if ui.add(edit).changed() {
                                actions.push(FormAction::EditRow {
                                    index,
                                    edit: RowEdit::Label(label),
                                });
                            }
                            if ui
                                .add_enabled(session.can_remove_row(), egui::Button::new("✕"))
                                .on_hover_text("Xóa dòng")
                                .clicked()
                            {
                                actions.push(FormAction::RemoveRow(index));
                            }
                        });
                        ui.horizontal(|ui| {
                            let width = if double {
                                (ui.available_width() - 8.0) / 2.0
                            } else {
                                ui.available_width()
                            };
                            if value_field(ui, &mut text.value1, "Giá trị 1", width) {
                                actions.push(FormAction::EditRow {
                                    index,
                                    edit: RowEdit::Value1(parse_value(&text.value1)),
                                });
                            }
                            if double && value_field(ui, &mut text.value2, "Giá trị 2", width) {
                                actions.push(FormAction::EditRow {
                                    index,
                                    edit: RowEdit::Value2(parse_value(&text.value2)),
                                });
                            }
                        });
                    });
            });
            ui.add_space(4.0);
        }
    }
}

fn section_heading(ui: &mut egui::Ui, text: &str) {
    ui.label(RichText::new(text).size(13.0).strong().color(SECTION_COLOR));
}

fn value_field(ui: &mut egui::Ui, text: &mut String, hint: &str, width: f32) -> bool {
    let edit = egui::TextEdit::singleline(text)
        .hint_text(hint)
        .desired_width(width);
    ui.add(edit).changed()
}

fn text_setting(
    ui: &mut egui::Ui,
    caption: &str,
    hint: &str,
    current: &str,
) -> Option<String> {
    ui.label(caption);
    let mut value = current.to_string();
    let edit = egui::TextEdit::singleline(&mut value)
        .hint_text(hint)
        .desired_width(f32::INFINITY);
    ui.add(edit).changed().then_some(value)
}

fn basic_section(ui: &mut egui::Ui, session: &ChartSession, actions: &mut Vec<FormAction>) {
    let settings = session.settings();
    section_heading(ui, "Thiết lập cơ bản");
    ui.add_space(6.0);

    if let Some(title) = text_setting(ui, "Tiêu đề biểu đồ", "Nhập tiêu đề...", &settings.title) {
        actions.push(FormAction::Settings(SettingsPatch {
            title: Some(title),
            ..SettingsPatch::default()
        }));
    }
    ui.columns(2, |columns| {
        if let Some(name) = text_setting(
            &mut columns[0],
            "Tên trục X",
            "Trục hoành...",
            &settings.x_axis_name,
        ) {
            actions.push(FormAction::Settings(SettingsPatch {
                x_axis_name: Some(name),
                ..SettingsPatch::default()
            }));
        }
        if let Some(name) = text_setting(
            &mut columns[1],
            "Tên trục Y",
            "Trục tung...",
            &settings.y_axis_name,
        ) {
            actions.push(FormAction::Settings(SettingsPatch {
                y_axis_name: Some(name),
                ..SettingsPatch::default()
            }));
        }
    });
}

fn style_section(ui: &mut egui::Ui, session: &ChartSession, actions: &mut Vec<FormAction>) {
    let settings = session.settings();
    section_heading(ui, "Tùy chọn hiển thị");
    ui.add_space(6.0);

    ui.horizontal(|ui| {
        ui.label("Kiểu biểu đồ:");
        for (chart_type, caption) in [(ChartType::Single, "Cột đơn"), (ChartType::Double, "Cột kép")] {
            if ui.radio(settings.chart_type == chart_type, caption).clicked()
                && settings.chart_type != chart_type
            {
                actions.push(FormAction::Settings(SettingsPatch::chart_type(chart_type)));
            }
        }
    });
    ui.add_space(6.0);

    for series in 0..settings.chart_type.series_count() {
        series_style(ui, series, settings.color(series), settings.pattern(series), actions);
        ui.add_space(6.0);
    }

    let mut show_labels = settings.show_labels;
    if ui
        .checkbox(&mut show_labels, "Hiển thị nhãn giá trị trên cột")
        .changed()
    {
        actions.push(FormAction::Settings(SettingsPatch {
            show_labels: Some(show_labels),
            ..SettingsPatch::default()
        }));
    }
}

fn series_style(
    ui: &mut egui::Ui,
    series: usize,
    color: Swatch,
    pattern: Pattern,
    actions: &mut Vec<FormAction>,
) {
    egui::Frame::none()
        .fill(ui.visuals().widgets.noninteractive.bg_fill)
        .rounding(8.0)
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.label(
                RichText::new(format!("Dãy cột {}", series + 1))
                    .size(11.0)
                    .strong()
                    .color(SECTION_COLOR),
            );
            ui.horizontal_wrapped(|ui| {
                for swatch in Swatch::ALL {
                    let [r, g, b] = swatch.rgb();
                    let border = if swatch == color {
                        Color32::from_rgb(30, 41, 59)
                    } else {
                        Color32::from_rgb(226, 232, 240)
                    };
                    let button = egui::Button::new("")
                        .fill(Color32::from_rgb(r, g, b))
                        .stroke(Stroke::new(2.0, border))
                        .rounding(SWATCH_SIZE / 2.0)
                        .min_size(egui::vec2(SWATCH_SIZE, SWATCH_SIZE));
                    if ui.add(button).on_hover_text(swatch.hex()).clicked() && swatch != color {
                        actions.push(FormAction::Settings(SettingsPatch::color(series, swatch)));
                    }
                }
            });
            ui.horizontal_wrapped(|ui| {
                for option in Pattern::ALL {
                    if ui
                        .selectable_label(option == pattern, option.glyph())
                        .on_hover_text(option.caption())
                        .clicked()
                        && option != pattern
                    {
                        actions.push(FormAction::Settings(SettingsPatch::pattern(series, option)));
                    }
                }
            });
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_creates_buffers_from_rows() {
        let session = ChartSession::new();
        let mut form = ChartForm::new();
        form.sync(session.rows());

        let first = &form.values[&session.rows()[0].id];
        assert_eq!(first.value1, "45");
        assert_eq!(first.value2, "40");
        assert_eq!(form.values.len(), 3);
    }

    #[test]
    fn test_sync_keeps_partial_input() {
        let mut session = ChartSession::new();
        let mut form = ChartForm::new();
        form.sync(session.rows());

        let id = session.rows()[0].id;
        if let Some(text) = form.values.get_mut(&id) {
            text.value1 = "4.".to_string();
        }
        session
            .update_row(0, RowEdit::Value1(parse_value("4.")))
            .expect("update");
        form.sync(session.rows());
        assert_eq!(form.values[&id].value1, "4.");
    }

    #[test]
    fn test_sync_resets_stale_buffers() {
        let mut session = ChartSession::new();
        let mut form = ChartForm::new();
        form.sync(session.rows());

        session.update_row(1, RowEdit::Value2(None)).expect("update");
        form.sync(session.rows());
        assert_eq!(form.values[&session.rows()[1].id].value2, "");
    }

    #[test]
    fn test_sync_drops_removed_rows() {
        let mut session = ChartSession::new();
        let mut form = ChartForm::new();
        form.sync(session.rows());

        let removed = session.rows()[2].id;
        session.remove_row(2).expect("remove");
        session.add_row();
        form.sync(session.rows());

        assert_eq!(form.values.len(), 3);
        assert!(!form.values.contains_key(&removed));
        let added = session.rows()[2].id;
        assert_eq!(form.values[&added], ValueText::default());
    }

    #[test]
    fn test_unparsable_text_is_unset() {
        let mut text = "abc".to_string();
        reconcile(&mut text, None);
        assert_eq!(text, "abc");
        reconcile(&mut text, Some(12.5));
        assert_eq!(text, "12.5");
    }
}

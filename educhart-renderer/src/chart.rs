//! Bar chart emission.
//!
//! [`render_chart`] is a pure function from rows and settings to a complete
//! [`Drawing`]: title, gridlines with tick labels, both axes, bars with their
//! overlays and labels, and the legend.

use educhart_core::{ChartSettings, ChartType, DataRow, Swatch};

use crate::drawing::{Color, Drawing, Line, Paint, Rect, Role, ShapeKind, Stroke, Text, TextAnchor};
use crate::layout::{ChartLayout, CANVAS_HEIGHT, CANVAS_WIDTH, MARGINS, PLOT_HEIGHT, PLOT_WIDTH};

// Slate scale
const SLATE_100: Color = Color::rgb(0xf1, 0xf5, 0xf9);
const SLATE_500: Color = Color::rgb(0x64, 0x74, 0x8b);
const SLATE_600: Color = Color::rgb(0x47, 0x55, 0x69);
const SLATE_700: Color = Color::rgb(0x33, 0x41, 0x55);
const SLATE_800: Color = Color::rgb(0x1e, 0x29, 0x3b);

const BAR_BORDER: Stroke = Stroke {
    color: SLATE_600,
    width: 4.0,
};
const AXIS_STROKE: Stroke = Stroke {
    color: SLATE_600,
    width: 6.0,
};
const GRID_STROKE: Stroke = Stroke {
    color: SLATE_100,
    width: 3.0,
};

/// Horizontal gap between the two bars of a pair, and around the center line.
pub const PAIR_GAP: f64 = 6.0;

const SINGLE_RADIUS: f64 = 12.0;
const DOUBLE_RADIUS: f64 = 6.0;
const VALUE_LABEL_OFFSET: f64 = 24.0;
const CATEGORY_LABEL_OFFSET: f64 = 75.0;

const LEGEND_TOP: f64 = 1370.0;
const LEGEND_SLOT: f64 = 440.0;
const LEGEND_INSET: f64 = 68.0;
const LEGEND_SWATCH: f64 = 60.0;

/// Legend captions per series.
pub const SERIES_CAPTIONS: [&str; 2] = ["Giá trị 1", "Giá trị 2"];

/// Render rows and settings into a complete drawing.
#[must_use]
pub fn render_chart(rows: &[DataRow], settings: &ChartSettings) -> Drawing {
    let layout = ChartLayout::compute(rows, settings.chart_type);
    let mut drawing = Drawing::new(CANVAS_WIDTH, CANVAS_HEIGHT);

    tracing::debug!(
        "Rendering {:?} chart: {} of {} rows charted, scale 0..{}",
        settings.chart_type,
        layout.rows.len(),
        rows.len(),
        layout.max_value
    );

    drawing.push(
        Role::Title,
        None,
        ShapeKind::Text(text(
            CANVAS_WIDTH / 2.0,
            96.0,
            &settings.title,
            72.0,
            TextAnchor::Middle,
            700,
            SLATE_800,
        )),
    );

    emit_grid(&mut drawing, &layout);
    emit_axes(&mut drawing, settings);

    for (index, row) in layout.rows.iter().enumerate() {
        match settings.chart_type {
            ChartType::Single => emit_single(&mut drawing, &layout, settings, index, row),
            ChartType::Double => emit_double(&mut drawing, &layout, settings, index, row),
        }
        let category = text(
            px(layout.center_x(index)),
            py(PLOT_HEIGHT + CATEGORY_LABEL_OFFSET),
            &row.label,
            36.0,
            TextAnchor::Middle,
            600,
            SLATE_600,
        );
        drawing.push(Role::CategoryLabel, None, ShapeKind::Text(category));
    }

    emit_legend(&mut drawing, settings);
    drawing
}

fn emit_grid(drawing: &mut Drawing, layout: &ChartLayout<'_>) {
    for tick in layout.ticks {
        let y = py(layout.value_y(tick));
        drawing.push(
            Role::Gridline,
            None,
            ShapeKind::Line(Line {
                x1: px(0.0),
                y1: y,
                x2: px(PLOT_WIDTH),
                y2: y,
                stroke: GRID_STROKE,
                arrow: false,
            }),
        );
        drawing.push(
            Role::TickLabel,
            None,
            ShapeKind::Text(text(
                px(-30.0),
                y + 15.0,
                &format_value(tick),
                36.0,
                TextAnchor::End,
                500,
                SLATE_500,
            )),
        );
    }
}

fn emit_axes(drawing: &mut Drawing, settings: &ChartSettings) {
    drawing.push(
        Role::Axis,
        None,
        ShapeKind::Line(Line {
            x1: px(0.0),
            y1: py(PLOT_HEIGHT),
            x2: px(0.0),
            y2: py(-60.0),
            stroke: AXIS_STROKE,
            arrow: true,
        }),
    );
    let mut y_name = text(
        px(-45.0),
        py(-100.0),
        &settings.y_axis_name,
        42.0,
        TextAnchor::Middle,
        600,
        SLATE_700,
    );
    y_name.italic = true;
    drawing.push(Role::AxisName, None, ShapeKind::Text(y_name));

    drawing.push(
        Role::Axis,
        None,
        ShapeKind::Line(Line {
            x1: px(0.0),
            y1: py(PLOT_HEIGHT),
            x2: px(PLOT_WIDTH + 90.0),
            y2: py(PLOT_HEIGHT),
            stroke: AXIS_STROKE,
            arrow: true,
        }),
    );
    let mut x_name = text(
        px(PLOT_WIDTH + 120.0),
        py(PLOT_HEIGHT + 15.0),
        &settings.x_axis_name,
        42.0,
        TextAnchor::Start,
        600,
        SLATE_700,
    );
    x_name.italic = true;
    drawing.push(Role::AxisName, None, ShapeKind::Text(x_name));
}

fn emit_single(
    drawing: &mut Drawing,
    layout: &ChartLayout<'_>,
    settings: &ChartSettings,
    index: usize,
    row: &DataRow,
) {
    let center = layout.center_x(index);
    let bar = BarSpec {
        series: 0,
        left: center - layout.bar_width / 2.0,
        width: layout.bar_width,
        height: layout.bar_height(row.value1),
        radius: SINGLE_RADIUS,
        color: settings.color1,
    };
    emit_bar(drawing, &bar, settings);

    if let Some(value) = row.value1.filter(|_| settings.show_labels) {
        emit_value_label(drawing, &bar, center, value, 36.0, SLATE_600);
    }
}

fn emit_double(
    drawing: &mut Drawing,
    layout: &ChartLayout<'_>,
    settings: &ChartSettings,
    index: usize,
    row: &DataRow,
) {
    let center = layout.center_x(index);
    let half = layout.bar_width / 2.0;

    let pair = [
        (row.value1, center - half - PAIR_GAP, center - half / 2.0 - PAIR_GAP),
        (row.value2, center + PAIR_GAP, center + half / 2.0 + PAIR_GAP),
    ];
    for (series, (value, left, label_x)) in pair.into_iter().enumerate() {
        let bar = BarSpec {
            series,
            left,
            width: half,
            height: layout.bar_height(value),
            radius: DOUBLE_RADIUS,
            color: settings.color(series),
        };
        emit_bar(drawing, &bar, settings);

        if let Some(value) = value.filter(|_| settings.show_labels) {
            emit_value_label(drawing, &bar, label_x, value, 30.0, SLATE_500);
        }
    }
}

struct BarSpec {
    series: usize,
    left: f64,
    width: f64,
    height: f64,
    radius: f64,
    color: Swatch,
}

impl BarSpec {
    fn top(&self) -> f64 {
        PLOT_HEIGHT - self.height
    }

    fn rect(&self, fill: Paint, stroke: Option<Stroke>) -> Rect {
        Rect {
            x: px(self.left),
            y: py(self.top()),
            width: self.width,
            height: self.height,
            corner_radius: self.radius,
            fill,
            stroke,
        }
    }
}

fn emit_bar(drawing: &mut Drawing, bar: &BarSpec, settings: &ChartSettings) {
    let body = bar.rect(Paint::Solid(bar.color.into()), Some(BAR_BORDER));
    drawing.push(Role::Bar, Some(bar.series), ShapeKind::Rect(body));

    if let Some(overlay) = Paint::overlay(settings.pattern(bar.series), bar.color) {
        drawing.push(
            Role::BarPattern,
            Some(bar.series),
            ShapeKind::Rect(bar.rect(overlay, None)),
        );
    }
}

fn emit_value_label(
    drawing: &mut Drawing,
    bar: &BarSpec,
    x: f64,
    value: f64,
    font_size: f64,
    color: Color,
) {
    let label = text(
        px(x),
        py(bar.top() - VALUE_LABEL_OFFSET),
        &format_value(value),
        font_size,
        TextAnchor::Middle,
        700,
        color,
    );
    drawing.push(Role::ValueLabel, Some(bar.series), ShapeKind::Text(label));
}

#[allow(clippy::cast_precision_loss)]
fn emit_legend(drawing: &mut Drawing, settings: &ChartSettings) {
    let count = settings.chart_type.series_count();
    let start = (CANVAS_WIDTH - LEGEND_SLOT * count as f64) / 2.0;

    for (series, caption) in SERIES_CAPTIONS.iter().enumerate().take(count) {
        let x = start + LEGEND_SLOT * series as f64 + LEGEND_INSET;
        let color = settings.color(series);
        let swatch = |fill, stroke| Rect {
            x,
            y: LEGEND_TOP,
            width: LEGEND_SWATCH,
            height: LEGEND_SWATCH,
            corner_radius: 8.0,
            fill,
            stroke,
        };

        drawing.push(
            Role::LegendSwatch,
            Some(series),
            ShapeKind::Rect(swatch(
                Paint::Solid(color.into()),
                Some(Stroke {
                    color: SLATE_500,
                    width: 2.0,
                }),
            )),
        );
        if let Some(overlay) = Paint::overlay(settings.pattern(series), color) {
            drawing.push(
                Role::LegendPattern,
                Some(series),
                ShapeKind::Rect(swatch(overlay, None)),
            );
        }
        drawing.push(
            Role::LegendCaption,
            Some(series),
            ShapeKind::Text(text(
                x + LEGEND_SWATCH + 24.0,
                LEGEND_TOP + 44.0,
                caption,
                40.0,
                TextAnchor::Start,
                500,
                SLATE_700,
            )),
        );
    }
}

fn text(
    x: f64,
    y: f64,
    content: &str,
    font_size: f64,
    anchor: TextAnchor,
    weight: u16,
    fill: Color,
) -> Text {
    Text {
        x,
        y,
        content: content.to_string(),
        font_size,
        anchor,
        weight,
        italic: false,
        fill,
    }
}

/// Plot-local x to canvas x.
fn px(x: f64) -> f64 {
    MARGINS.left + x
}

/// Plot-local y to canvas y.
fn py(y: f64) -> f64 {
    MARGINS.top + y
}

/// Format a value the way it was entered: integers without a fraction.
#[must_use]
pub fn format_value(value: f64) -> String {
    format!("{value}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use educhart_core::{Pattern, PatternVariant};

    fn single_settings() -> ChartSettings {
        ChartSettings {
            chart_type: ChartType::Single,
            ..ChartSettings::default()
        }
    }

    #[test]
    fn test_single_bar_heights() {
        let rows = [
            DataRow::new("A", Some(5.0), None),
            DataRow::new("B", Some(0.0), None),
        ];
        let drawing = render_chart(&rows, &single_settings());

        let bars: Vec<_> = drawing.bars(0).collect();
        assert_eq!(bars.len(), 2);
        assert!((bars[0].height - 5.0 / 11.0 * PLOT_HEIGHT).abs() < 1e-9);
        assert!(bars[1].height.abs() < f64::EPSILON);
        assert!((bars[0].y + bars[0].height - (MARGINS.top + PLOT_HEIGHT)).abs() < 1e-9);
        assert!((bars[0].width - PLOT_WIDTH / 2.0 * 0.6).abs() < 1e-9);
        assert!((bars[0].corner_radius - SINGLE_RADIUS).abs() < f64::EPSILON);
        assert_eq!(drawing.bars(1).count(), 0);
    }

    #[test]
    fn test_tick_labels() {
        let rows = [DataRow::new("A", Some(5.0), None)];
        let drawing = render_chart(&rows, &single_settings());
        assert_eq!(
            drawing.texts(Role::TickLabel),
            ["0", "2", "4", "7", "9", "11"]
        );
        assert_eq!(drawing.with_role(Role::Gridline).count(), 6);
    }

    #[test]
    fn test_value_labels_follow_toggle() {
        let rows = [
            DataRow::new("A", Some(12.5), None),
            DataRow::new("B", None, None),
        ];
        let mut settings = single_settings();
        let drawing = render_chart(&rows, &settings);
        assert_eq!(drawing.texts(Role::ValueLabel), ["12.5"]);

        settings.show_labels = false;
        let drawing = render_chart(&rows, &settings);
        assert!(drawing.texts(Role::ValueLabel).is_empty());
    }

    #[test]
    fn test_double_mode_pairs() {
        let rows = [DataRow::new("Lớp 6", Some(45.0), Some(40.0))];
        let drawing = render_chart(&rows, &ChartSettings::default());

        let first: Vec<_> = drawing.bars(0).collect();
        let second: Vec<_> = drawing.bars(1).collect();
        assert_eq!((first.len(), second.len()), (1, 1));

        let bar_width = PLOT_WIDTH * 0.6;
        assert!((first[0].width - bar_width / 2.0).abs() < 1e-9);
        assert!((second[0].x - first[0].x - bar_width / 2.0 - 2.0 * PAIR_GAP).abs() < 1e-9);
        assert!(first[0].height > second[0].height);
        assert_eq!(drawing.texts(Role::ValueLabel), ["45", "40"]);
        assert_eq!(drawing.texts(Role::CategoryLabel), ["Lớp 6"]);
    }

    #[test]
    fn test_double_mode_missing_value2() {
        let rows = [DataRow::new("A", Some(8.0), None)];
        let drawing = render_chart(&rows, &ChartSettings::default());
        let second: Vec<_> = drawing.bars(1).collect();
        assert!(second[0].height.abs() < f64::EPSILON);
        assert_eq!(drawing.texts(Role::ValueLabel), ["8"]);
    }

    #[test]
    fn test_single_mode_ignores_value2() {
        let rows = [DataRow::new("A", Some(8.0), Some(900.0))];
        let drawing = render_chart(&rows, &single_settings());
        assert_eq!(drawing.bars(1).count(), 0);
        assert_eq!(drawing.texts(Role::ValueLabel), ["8"]);
        assert_eq!(drawing.texts(Role::TickLabel).last(), Some(&"11"));
    }

    #[test]
    fn test_white_bar_uses_dark_pattern() {
        let rows = [DataRow::new("A", Some(3.0), Some(4.0))];
        let settings = ChartSettings {
            color1: Swatch::White,
            pattern1: Pattern::Dots,
            color2: Swatch::Amber,
            pattern2: Pattern::Grid,
            ..ChartSettings::default()
        };
        let drawing = render_chart(&rows, &settings);
        let overlays: Vec<_> = drawing
            .with_role(Role::BarPattern)
            .filter_map(|s| s.as_rect().map(|r| (s.series, r.fill)))
            .collect();
        assert_eq!(
            overlays,
            [
                (
                    Some(0),
                    Paint::Pattern {
                        pattern: Pattern::Dots,
                        variant: PatternVariant::Dark
                    }
                ),
                (
                    Some(1),
                    Paint::Pattern {
                        pattern: Pattern::Grid,
                        variant: PatternVariant::Light
                    }
                ),
            ]
        );
    }

    #[test]
    fn test_no_overlay_for_plain_pattern() {
        let rows = [DataRow::new("A", Some(3.0), None)];
        let settings = ChartSettings {
            pattern1: Pattern::None,
            ..single_settings()
        };
        let drawing = render_chart(&rows, &settings);
        assert_eq!(drawing.with_role(Role::BarPattern).count(), 0);
        assert_eq!(drawing.with_role(Role::LegendPattern).count(), 0);
    }

    #[test]
    fn test_empty_dataset_still_draws_frame() {
        let rows = [DataRow::empty()];
        let drawing = render_chart(&rows, &ChartSettings::default());
        assert_eq!(drawing.with_role(Role::Bar).count(), 0);
        assert_eq!(drawing.with_role(Role::Axis).count(), 2);
        assert_eq!(drawing.with_role(Role::LegendSwatch).count(), 2);
        assert_eq!(
            drawing.texts(Role::AxisName),
            ["Số học sinh", "Khối lớp"]
        );
    }

    #[test]
    fn test_legend_entries_per_series() {
        let rows = [DataRow::new("A", Some(3.0), None)];
        let drawing = render_chart(&rows, &single_settings());
        assert_eq!(drawing.texts(Role::LegendCaption), ["Giá trị 1"]);

        let drawing = render_chart(&rows, &ChartSettings::default());
        assert_eq!(drawing.texts(Role::LegendCaption), ["Giá trị 1", "Giá trị 2"]);
        // Default pattern2 is a stripe, so series 2 gets a preview.
        assert_eq!(drawing.with_role(Role::LegendPattern).count(), 1);
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(45.0), "45");
        assert_eq!(format_value(4.5), "4.5");
        assert_eq!(format_value(-2.0), "-2");
    }
}

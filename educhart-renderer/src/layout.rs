//! Chart scaling and layout math.
//!
//! All coordinates here are relative to the plot area's top-left corner; the
//! emitter adds the canvas margins.

use educhart_core::{ChartType, DataRow};

/// Logical canvas width.
pub const CANVAS_WIDTH: f64 = 2400.0;

/// Logical canvas height.
pub const CANVAS_HEIGHT: f64 = 1500.0;

/// Fixed space around the plot area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    /// Space above the plot (title and value-axis name).
    pub top: f64,
    /// Space right of the plot (category-axis name).
    pub right: f64,
    /// Space below the plot (category labels and legend).
    pub bottom: f64,
    /// Space left of the plot (tick labels).
    pub left: f64,
}

/// Canvas margins.
pub const MARGINS: Margins = Margins {
    top: 180.0,
    right: 400.0,
    bottom: 300.0,
    left: 240.0,
};

/// Plot area width.
pub const PLOT_WIDTH: f64 = CANVAS_WIDTH - MARGINS.left - MARGINS.right;

/// Plot area height.
pub const PLOT_HEIGHT: f64 = CANVAS_HEIGHT - MARGINS.top - MARGINS.bottom;

/// Number of tick intervals on the value axis (6 ticks).
pub const TICK_INTERVALS: usize = 5;

/// Smallest observed maximum the scale is built from.
pub const SCALE_FLOOR: f64 = 10.0;

/// Bar width used when no row is charted.
pub const EMPTY_BAR_WIDTH: f64 = 120.0;

const BAR_SECTION_RATIO: f64 = 0.6;

/// Scaling and horizontal placement for one render.
#[derive(Debug, Clone)]
pub struct ChartLayout<'a> {
    /// Charted rows in display order.
    pub rows: Vec<&'a DataRow>,
    /// Top of the value scale.
    pub max_value: f64,
    /// Tick values from 0 to `max_value`.
    pub ticks: [f64; TICK_INTERVALS + 1],
    /// Width of one row's horizontal section.
    pub section_width: f64,
    /// Width of a row's bar (or bar pair in dual mode).
    pub bar_width: f64,
}

impl<'a> ChartLayout<'a> {
    /// Compute the layout for the given rows and chart type.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn compute(rows: &'a [DataRow], chart_type: ChartType) -> Self {
        let rows = charted_rows(rows);
        let max_value = scale_max(&rows, chart_type);
        let section_width = PLOT_WIDTH / rows.len().max(1) as f64;
        let bar_width = if rows.is_empty() {
            EMPTY_BAR_WIDTH
        } else {
            section_width * BAR_SECTION_RATIO
        };

        Self {
            ticks: ticks(max_value),
            rows,
            max_value,
            section_width,
            bar_width,
        }
    }

    /// Horizontal center of the row at `index`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn center_x(&self, index: usize) -> f64 {
        index as f64 * self.section_width + self.section_width / 2.0
    }

    /// Bar height for a value. Empty, negative and non-finite values map to 0.
    #[must_use]
    pub fn bar_height(&self, value: Option<f64>) -> f64 {
        match value {
            Some(v) if v.is_finite() && v > 0.0 => v / self.max_value * PLOT_HEIGHT,
            _ => 0.0,
        }
    }

    /// Vertical position of a value on the axis.
    #[must_use]
    pub fn value_y(&self, value: f64) -> f64 {
        PLOT_HEIGHT - value / self.max_value * PLOT_HEIGHT
    }
}

/// Rows that take part in the chart, in order.
#[must_use]
pub fn charted_rows(rows: &[DataRow]) -> Vec<&DataRow> {
    rows.iter().filter(|row| row.is_charted()).collect()
}

/// Top of the value scale: the largest value in use (at least
/// [`SCALE_FLOOR`]) plus 10% headroom, rounded up.
#[must_use]
pub fn scale_max(rows: &[&DataRow], chart_type: ChartType) -> f64 {
    let observed = rows
        .iter()
        .flat_map(|row| {
            let second = match chart_type {
                ChartType::Single => None,
                ChartType::Double => row.value2,
            };
            [row.value1, second]
        })
        .flatten()
        .filter(|v| v.is_finite())
        .fold(SCALE_FLOOR, f64::max);

    // x + x / 10 keeps exact results exact where x * 1.1 would round up by an ulp,
    // and only overflows where x * 1.1 would. Clamp so the scale stays finite.
    (observed + observed / 10.0).ceil().min(f64::MAX)
}

/// Evenly spaced, rounded tick values from 0 to `max_value`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn ticks(max_value: f64) -> [f64; TICK_INTERVALS + 1] {
    let intervals = TICK_INTERVALS as f64;
    std::array::from_fn(|i| (max_value * (i as f64 / intervals)).round())
}

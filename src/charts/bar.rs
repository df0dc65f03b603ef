use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::charts::SeriesRenderer;
use crate::charts::legend::{LegendEntry, draw_legend};
use crate::core::fit::pad_axis_rect;
use crate::error::{PlotError, PlotResult};
use crate::geometry::{Point, Rectangle};
use crate::plot::{Canvas, PlotConfig, PlotSurface, TickLabels};
use crate::render::{CanvasLayerKind, Color, TextHAlign, TextVAlign};

/// How segment heights are derived from row values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarMode {
    /// Raw values; bands span `[0, largest row sum]`.
    #[default]
    Absolute,
    /// Values divided by their row sum; bands span `[0, 1]`.
    Relative,
}

/// Bar layout options, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarPlotConfig {
    #[serde(default = "default_bar_width")]
    pub bar_width: f64,
    #[serde(default = "default_bar_padding")]
    pub padding: f64,
    #[serde(default)]
    pub mode: BarMode,
}

impl Default for BarPlotConfig {
    fn default() -> Self {
        Self {
            bar_width: default_bar_width(),
            padding: default_bar_padding(),
            mode: BarMode::default(),
        }
    }
}

impl BarPlotConfig {
    #[must_use]
    pub fn with_bar_width(mut self, bar_width: f64) -> Self {
        self.bar_width = bar_width;
        self
    }

    #[must_use]
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    #[must_use]
    pub fn with_mode(mut self, mode: BarMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn validate(&self) -> PlotResult<()> {
        if !self.bar_width.is_finite() || self.bar_width <= 0.0 {
            return Err(PlotError::InvalidData(
                "bar width must be finite and > 0".to_owned(),
            ));
        }
        if !self.padding.is_finite() || self.padding < 0.0 {
            return Err(PlotError::InvalidData(
                "bar padding must be finite and >= 0".to_owned(),
            ));
        }
        Ok(())
    }

    pub fn from_json_str(input: &str) -> PlotResult<Self> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }
}

fn default_bar_width() -> f64 {
    16.0
}

fn default_bar_padding() -> f64 {
    4.0
}

/// One stacked bar: a category and one value per segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarRow {
    pub category: String,
    pub values: Vec<f64>,
}

impl BarRow {
    #[must_use]
    pub fn new(category: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            category: category.into(),
            values,
        }
    }

    /// Sum of the drawable (finite, non-negative) values.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.values.iter().copied().map(drawable).sum()
    }
}

fn drawable(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Vertical stacked bars wrapping into bands stacked top to bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct BarPlot {
    rows: Vec<BarRow>,
    segments: IndexMap<String, Color>,
    config: BarPlotConfig,
}

impl BarPlot {
    /// `segments` names and colors the stacked values, bottom first.
    #[must_use]
    pub fn new(rows: Vec<BarRow>, segments: IndexMap<String, Color>) -> Self {
        Self {
            rows,
            segments,
            config: BarPlotConfig::default(),
        }
    }

    pub fn with_config(mut self, config: BarPlotConfig) -> PlotResult<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    #[must_use]
    pub fn rows(&self) -> &[BarRow] {
        &self.rows
    }

    #[must_use]
    pub fn config(&self) -> &BarPlotConfig {
        &self.config
    }

    pub fn set_rows(&mut self, rows: Vec<BarRow>) {
        debug!(count = rows.len(), "replace bar rows");
        self.rows = rows;
    }

    /// Bars that fit side by side on one line, between the horizontal fit
    /// reservations; never less than one.
    #[must_use]
    pub fn bars_per_line(&self, surface: &PlotSurface, config: &PlotConfig) -> usize {
        let slot = surface.px(self.config.bar_width + self.config.padding);
        let usable = surface.device().w - 2.0 * surface.fit_padding(config).horizontal_px;
        let count = (usable / slot).floor();
        if count.is_finite() && count >= 1.0 {
            count as usize
        } else {
            1
        }
    }

    #[must_use]
    pub fn line_count(&self, per_line: usize) -> usize {
        self.rows.len().div_ceil(per_line.max(1)).max(1)
    }

    /// Band geometry for the current rows on `surface`.
    #[must_use]
    pub fn layout(&self, surface: &PlotSurface, config: &PlotConfig) -> BarLayout {
        let per_line = self.bars_per_line(surface, config);
        let lines = self.line_count(per_line);
        let band = self.band_height();
        let fit = surface.fit_padding(config);
        let label_px = surface.px(config.text_size + 2.0 * config.text_padding);
        let usable = surface.device().h - 2.0 * fit.vertical_px - label_px * lines as f64;
        // Category labels need `label_px` under every band base.
        let gap = if usable > 0.0 {
            label_px * lines as f64 * band / usable
        } else {
            0.0
        };
        BarLayout {
            per_line,
            lines,
            band,
            gap,
        }
    }

    /// Value span of one band.
    #[must_use]
    pub fn band_height(&self) -> f64 {
        match self.config.mode {
            BarMode::Relative => 1.0,
            BarMode::Absolute => {
                let max = self.rows.iter().map(BarRow::total).fold(0.0, f64::max);
                if max > 0.0 { max } else { 1.0 }
            }
        }
    }

    /// Heights of the stacked segments of `row` under the current mode.
    ///
    /// Non-finite and negative values contribute zero; a relative row whose
    /// sum is zero yields all-zero heights.
    #[must_use]
    pub fn segment_heights(&self, row: &BarRow) -> Vec<f64> {
        let values = row.values.iter().copied().map(drawable);
        match self.config.mode {
            BarMode::Absolute => values.collect(),
            BarMode::Relative => {
                let total = row.total();
                if total > 0.0 {
                    values.map(|value| value / total).collect()
                } else {
                    vec![0.0; row.values.len()]
                }
            }
        }
    }

    fn segment_color(&self, index: usize) -> Color {
        self.segments
            .get_index(index)
            .map(|(_, color)| *color)
            .unwrap_or(FALLBACK_SEGMENT_COLORS[index % FALLBACK_SEGMENT_COLORS.len()])
    }
}

/// Wrapped band geometry in axis units. Bands are stacked top to bottom,
/// each `gap` above the band below so its category labels fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarLayout {
    pub per_line: usize,
    pub lines: usize,
    /// Value span of one band.
    pub band: f64,
    /// Label room under each band base.
    pub gap: f64,
}

impl BarLayout {
    /// Vertical distance between consecutive band bases.
    #[must_use]
    pub fn pitch(&self) -> f64 {
        self.band + self.gap
    }

    /// Base of the band holding line `line`; line 0 is the top band.
    #[must_use]
    pub fn band_base(&self, line: usize) -> f64 {
        let from_bottom = self.lines.saturating_sub(1).saturating_sub(line);
        from_bottom as f64 * self.pitch() + self.gap
    }
}

const FALLBACK_SEGMENT_COLORS: [Color; 4] = [
    Color::rgb(0.26, 0.52, 0.96),
    Color::rgb(0.92, 0.26, 0.21),
    Color::rgb(0.98, 0.74, 0.02),
    Color::rgb(0.20, 0.66, 0.33),
];

impl SeriesRenderer for BarPlot {
    fn fit_viewport(&self, surface: &PlotSurface, config: &PlotConfig) -> PlotResult<Rectangle> {
        let layout = self.layout(surface, config);
        let fit = surface.fit_padding(config);
        let device = surface.device();
        let content = Rectangle::new(
            0.0,
            0.0,
            layout.per_line as f64,
            layout.lines as f64 * layout.pitch(),
        );
        debug!(
            per_line = layout.per_line,
            lines = layout.lines,
            rows = self.rows.len(),
            "fit bar plot"
        );

        // One axis unit is exactly one bar slot wide.
        let slot = surface.px(self.config.bar_width + self.config.padding);
        let mut viewport = pad_axis_rect(content, fit)?;
        viewport.x = -fit.horizontal_px / slot;
        viewport.w = device.w / slot;

        let usable = device.h - 2.0 * fit.vertical_px;
        if usable > 0.0 {
            let per_unit = usable / content.h;
            viewport.y = -fit.vertical_px / per_unit;
            viewport.h = device.h / per_unit;
        }
        Ok(viewport)
    }

    fn draw_series(&self, canvas: &mut Canvas<'_>) -> PlotResult<()> {
        let layout = self.layout(canvas.surface(), canvas.config());
        let slot = self.config.bar_width + self.config.padding;
        let inset = self.config.padding / slot / 2.0;
        let label_offset = canvas.px(canvas.config().text_padding);
        let label_color = canvas.palette().tick_text;

        for (index, row) in self.rows.iter().enumerate() {
            let column = (index % layout.per_line) as f64;
            let mut base = layout.band_base(index / layout.per_line);
            if row.values.iter().any(|value| !value.is_finite() || *value < 0.0) {
                warn!(category = %row.category, "bar values must be finite and >= 0");
            }

            let anchor = canvas.to_device(Point::new(column + 0.5, base))?;
            canvas.draw_device_text(
                CanvasLayerKind::Axis,
                anchor,
                &row.category,
                0.0,
                label_offset,
                TextHAlign::Center,
                TextVAlign::Top,
                label_color,
            );

            for (segment, height) in self.segment_heights(row).into_iter().enumerate() {
                if height <= 0.0 {
                    continue;
                }
                let low = canvas.to_device(Point::new(column + inset, base))?;
                let high = canvas.to_device(Point::new(column + 1.0 - inset, base + height))?;
                let rect = Rectangle::new(
                    low.x.min(high.x),
                    low.y.min(high.y),
                    (high.x - low.x).abs(),
                    (high.y - low.y).abs(),
                );
                canvas.fill_rect(CanvasLayerKind::Series, rect, self.segment_color(segment));
                base += height;
            }
        }
        Ok(())
    }

    fn tick_labels(&self) -> TickLabels {
        TickLabels::NONE
    }

    fn draw_annotations(&self, canvas: &mut Canvas<'_>) -> PlotResult<()> {
        if self.segments.is_empty() {
            return Ok(());
        }
        let entries: Vec<LegendEntry> = self
            .segments
            .iter()
            .map(|(name, color)| LegendEntry {
                full: name.clone(),
                short: name.clone(),
                color: *color,
            })
            .collect();
        draw_legend(canvas, &entries);
        Ok(())
    }
}

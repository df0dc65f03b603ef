use serde::{Deserialize, Serialize};

use crate::error::{PlotError, PlotResult};
use crate::plot::Theme;

/// Crosshair visibility policy for pointer events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrosshairMode {
    /// Crosshair follows the raw pointer position.
    #[default]
    Normal,
    /// Pointer events still repaint, but no crosshair is drawn.
    Hidden,
}

/// Rendering parameters shared by every plot kind.
///
/// Pixel values are CSS pixels; the pipeline multiplies them by the device
/// pixel ratio at draw time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotConfig {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default = "default_tick_bar_width")]
    pub tick_bar_width: f64,
    #[serde(default = "default_tick_bar_height")]
    pub tick_bar_height: f64,
    /// Extra space reserved beyond the tick bars when fitting series.
    #[serde(default = "default_fit_margin")]
    pub fit_margin: f64,
    #[serde(default = "default_tick_count")]
    pub tick_count: usize,
    #[serde(default = "default_text_size")]
    pub text_size: f64,
    #[serde(default = "default_text_padding")]
    pub text_padding: f64,
    #[serde(default = "default_dot_radius")]
    pub dot_radius: f64,
    #[serde(default = "default_line_width")]
    pub line_width: f64,
    #[serde(default = "default_gridline_width")]
    pub gridline_width: f64,
    #[serde(default = "default_legend_padding")]
    pub legend_padding: f64,
    #[serde(default)]
    pub crosshair_mode: CrosshairMode,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            tick_bar_width: default_tick_bar_width(),
            tick_bar_height: default_tick_bar_height(),
            fit_margin: default_fit_margin(),
            tick_count: default_tick_count(),
            text_size: default_text_size(),
            text_padding: default_text_padding(),
            dot_radius: default_dot_radius(),
            line_width: default_line_width(),
            gridline_width: default_gridline_width(),
            legend_padding: default_legend_padding(),
            crosshair_mode: CrosshairMode::default(),
        }
    }
}

impl PlotConfig {
    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    #[must_use]
    pub fn with_tick_bars(mut self, width: f64, height: f64) -> Self {
        self.tick_bar_width = width;
        self.tick_bar_height = height;
        self
    }

    #[must_use]
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = tick_count;
        self
    }

    #[must_use]
    pub fn with_text(mut self, size: f64, padding: f64) -> Self {
        self.text_size = size;
        self.text_padding = padding;
        self
    }

    #[must_use]
    pub fn with_dot_radius(mut self, dot_radius: f64) -> Self {
        self.dot_radius = dot_radius;
        self
    }

    #[must_use]
    pub fn with_line_width(mut self, line_width: f64) -> Self {
        self.line_width = line_width;
        self
    }

    #[must_use]
    pub fn with_legend_padding(mut self, legend_padding: f64) -> Self {
        self.legend_padding = legend_padding;
        self
    }

    #[must_use]
    pub fn with_crosshair_mode(mut self, crosshair_mode: CrosshairMode) -> Self {
        self.crosshair_mode = crosshair_mode;
        self
    }

    pub fn validate(&self) -> PlotResult<()> {
        for (name, value) in [
            ("tick_bar_width", self.tick_bar_width),
            ("tick_bar_height", self.tick_bar_height),
            ("fit_margin", self.fit_margin),
            ("text_padding", self.text_padding),
            ("legend_padding", self.legend_padding),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(PlotError::InvalidData(format!(
                    "`{name}` must be finite and >= 0"
                )));
            }
        }
        for (name, value) in [
            ("text_size", self.text_size),
            ("dot_radius", self.dot_radius),
            ("line_width", self.line_width),
            ("gridline_width", self.gridline_width),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(PlotError::InvalidData(format!(
                    "`{name}` must be finite and > 0"
                )));
            }
        }
        if self.tick_count == 0 {
            return Err(PlotError::InvalidData(
                "`tick_count` must be > 0".to_owned(),
            ));
        }
        Ok(())
    }

    /// Serializes config to pretty JSON.
    pub fn to_json_string(&self) -> PlotResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserializes and validates config from JSON; missing fields take defaults.
    pub fn from_json_str(input: &str) -> PlotResult<Self> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }
}

fn default_tick_bar_width() -> f64 {
    32.0
}

fn default_tick_bar_height() -> f64 {
    16.0
}

fn default_fit_margin() -> f64 {
    10.0
}

fn default_tick_count() -> usize {
    10
}

fn default_text_size() -> f64 {
    // 6pt
    8.0
}

fn default_text_padding() -> f64 {
    4.0
}

fn default_dot_radius() -> f64 {
    2.0
}

fn default_line_width() -> f64 {
    1.0
}

fn default_gridline_width() -> f64 {
    2.0
}

fn default_legend_padding() -> f64 {
    10.0
}

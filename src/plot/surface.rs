use crate::core::FitPadding;
use crate::error::{PlotError, PlotResult};
use crate::geometry::{Point, Rectangle};
use crate::plot::PlotConfig;

/// Device surface acquired on mount.
///
/// The device rectangle is the requested CSS size times the pixel ratio,
/// anchored at the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotSurface {
    css_width: f64,
    css_height: f64,
    ratio: f64,
    device: Rectangle,
}

impl PlotSurface {
    pub fn new(css_width: f64, css_height: f64, ratio: f64) -> PlotResult<Self> {
        if !css_width.is_finite()
            || !css_height.is_finite()
            || css_width <= 0.0
            || css_height <= 0.0
        {
            return Err(PlotError::InvalidViewport {
                width: css_width,
                height: css_height,
            });
        }
        if !ratio.is_finite() || ratio <= 0.0 {
            return Err(PlotError::InvalidPixelRatio(ratio));
        }
        Ok(Self {
            css_width,
            css_height,
            ratio,
            device: Rectangle::new(0.0, 0.0, css_width * ratio, css_height * ratio),
        })
    }

    #[must_use]
    pub fn css_size(&self) -> (f64, f64) {
        (self.css_width, self.css_height)
    }

    #[must_use]
    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    #[must_use]
    pub fn device(&self) -> Rectangle {
        self.device
    }

    /// Converts a CSS-pixel position (top-left origin) into device pixels.
    #[must_use]
    pub fn css_to_device(&self, x: f64, y: f64) -> Point {
        Point::new(x * self.ratio, y * self.ratio)
    }

    /// Scales a CSS length into device pixels.
    #[must_use]
    pub fn px(&self, css: f64) -> f64 {
        css * self.ratio
    }

    /// Pixel reservations used when fitting series: tick bar plus fit margin
    /// on each side.
    #[must_use]
    pub fn fit_padding(&self, config: &PlotConfig) -> FitPadding {
        FitPadding {
            device_width: self.device.w,
            device_height: self.device.h,
            horizontal_px: self.px(config.tick_bar_width + config.fit_margin),
            vertical_px: self.px(config.tick_bar_height + config.fit_margin),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PlotSurface;
    use crate::error::PlotError;
    use crate::geometry::Rectangle;
    use crate::plot::PlotConfig;

    #[test]
    fn device_rectangle_scales_with_ratio() {
        let surface = PlotSurface::new(300.0, 200.0, 2.0).expect("surface");
        assert_eq!(surface.device(), Rectangle::new(0.0, 0.0, 600.0, 400.0));
        let padding = surface.fit_padding(&PlotConfig::default());
        assert_eq!(padding.horizontal_px, 84.0);
        assert_eq!(padding.vertical_px, 52.0);
    }

    #[test]
    fn invalid_sizes_and_ratios_are_rejected() {
        assert!(matches!(
            PlotSurface::new(0.0, 10.0, 1.0),
            Err(PlotError::InvalidViewport { .. })
        ));
        assert!(matches!(
            PlotSurface::new(10.0, 10.0, f64::NAN),
            Err(PlotError::InvalidPixelRatio(_))
        ));
    }
}

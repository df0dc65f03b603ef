//! Base render pipeline shared by every chart kind.
//!
//! A [`Plot`] owns the device surface, the fitted [`PlotTransform`] and the
//! pointer state. Each [`Plot::draw`] builds a fresh [`RenderFrame`] in a
//! fixed layer order and hands it to the caller's [`Renderer`].

mod axes;
mod canvas;
mod config;
mod interaction;
mod surface;
mod theme;
mod transform;

pub use axes::{TickLabels, draw_gridlines, draw_tick_bars};
pub use canvas::{Canvas, format_tick};
pub use config::{CrosshairMode, PlotConfig};
pub use interaction::{CrosshairState, InteractionState};
pub use surface::PlotSurface;
pub use theme::{Palette, Theme};
pub use transform::PlotTransform;

use tracing::{debug, trace};

use crate::charts::SeriesRenderer;
use crate::error::{PlotError, PlotResult};
use crate::geometry::{Point, Rectangle};
use crate::render::{RenderFrame, Renderer};

/// Lifecycle of a plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotState {
    Unmounted,
    Mounted,
}

/// A chart bound to a renderer.
///
/// `C` decides what to fit and what to draw; the plot decides when, and in
/// which order: background, gridlines, series, tick bars, annotations,
/// crosshair.
#[derive(Debug)]
pub struct Plot<C: SeriesRenderer, R: Renderer> {
    chart: C,
    renderer: R,
    config: PlotConfig,
    surface: Option<PlotSurface>,
    transform: Option<PlotTransform>,
    interaction: InteractionState,
}

impl<C: SeriesRenderer, R: Renderer> Plot<C, R> {
    #[must_use]
    pub fn new(chart: C, renderer: R) -> Self {
        Self {
            chart,
            renderer,
            config: PlotConfig::default(),
            surface: None,
            transform: None,
            interaction: InteractionState::default(),
        }
    }

    pub fn with_config(mut self, config: PlotConfig) -> PlotResult<Self> {
        self.set_config(config)?;
        Ok(self)
    }

    #[must_use]
    pub fn state(&self) -> PlotState {
        if self.surface.is_some() {
            PlotState::Mounted
        } else {
            PlotState::Unmounted
        }
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.surface.is_some()
    }

    /// Acquires a device surface of `width × ratio` by `height × ratio`
    /// pixels and fits the chart to it.
    pub fn mount(&mut self, width: f64, height: f64, ratio: f64) -> PlotResult<()> {
        let surface = PlotSurface::new(width, height, ratio)?;
        debug!(width, height, ratio, "mount plot");
        self.surface = Some(surface);
        self.transform = None;
        self.interaction.on_pointer_leave();
        self.refit()
    }

    /// Replaces the surface after a size or pixel-ratio change and refits.
    pub fn resize(&mut self, width: f64, height: f64, ratio: f64) -> PlotResult<()> {
        if self.surface.is_none() {
            return Err(PlotError::NotMounted);
        }
        let surface = PlotSurface::new(width, height, ratio)?;
        debug!(width, height, ratio, "resize plot");
        self.surface = Some(surface);
        self.transform = None;
        self.refit()
    }

    /// Drops the surface; drawing afterwards fails with `NotMounted`.
    pub fn unmount(&mut self) {
        if self.surface.take().is_some() {
            debug!("unmount plot");
        }
        self.transform = None;
        self.interaction.on_pointer_leave();
    }

    #[must_use]
    pub fn chart(&self) -> &C {
        &self.chart
    }

    /// Mutates the chart (e.g. new series) and refits when mounted.
    pub fn update_chart<F>(&mut self, update: F) -> PlotResult<()>
    where
        F: FnOnce(&mut C),
    {
        update(&mut self.chart);
        self.transform = None;
        if self.surface.is_some() {
            self.refit()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn config(&self) -> &PlotConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: PlotConfig) -> PlotResult<()> {
        config.validate()?;
        self.config = config;
        self.transform = None;
        if self.surface.is_some() {
            self.refit()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    #[must_use]
    pub fn surface(&self) -> Option<&PlotSurface> {
        self.surface.as_ref()
    }

    /// Device rectangle while mounted.
    #[must_use]
    pub fn device(&self) -> Option<Rectangle> {
        self.surface.as_ref().map(PlotSurface::device)
    }

    /// Fitted viewport in axis space (`log10` units on log axes).
    #[must_use]
    pub fn viewport(&self) -> Option<Rectangle> {
        self.transform.as_ref().map(PlotTransform::viewport)
    }

    #[must_use]
    pub fn plot_transform(&self) -> Option<&PlotTransform> {
        self.transform.as_ref()
    }

    #[must_use]
    pub fn interaction(&self) -> InteractionState {
        self.interaction
    }

    /// Domain → device pixel through the fitted transform.
    pub fn transform_point(&self, domain: Point) -> PlotResult<Point> {
        self.fitted()?.to_device(domain)
    }

    /// Device pixel → domain through the fitted transform.
    pub fn inverse_transform_point(&self, device: Point) -> PlotResult<Point> {
        Ok(self.fitted()?.to_domain(device))
    }

    /// Recomputes the viewport from the chart data and the current surface.
    pub fn refit(&mut self) -> PlotResult<()> {
        let surface = self.surface.ok_or(PlotError::NotMounted)?;
        let kinds = self.chart.axis_kinds();
        let viewport = self.chart.fit_viewport(&surface, &self.config)?;
        let transform = PlotTransform::new(viewport, kinds, surface.device())?;
        debug!(viewport = %viewport, x_kind = ?kinds.0, y_kind = ?kinds.1, "fit plot");
        self.transform = Some(transform);
        Ok(())
    }

    /// Repaints everything into a fresh frame and renders it.
    pub fn draw(&mut self) -> PlotResult<()> {
        let surface = self.surface.ok_or(PlotError::NotMounted)?;
        if self.transform.is_none() {
            self.refit()?;
        }
        let transform = *self.fitted()?;
        let device = surface.device();
        let mut frame = RenderFrame::new(device.w, device.h);

        {
            let mut canvas = Canvas::new(&mut frame, &transform, &surface, &self.config);
            canvas.fill_background();
            draw_gridlines(&mut canvas)?;
            self.chart.draw_series(&mut canvas)?;
            draw_tick_bars(&mut canvas, self.chart.tick_labels())?;
            self.chart.draw_annotations(&mut canvas)?;

            let crosshair = self.interaction.crosshair();
            if crosshair.visible && self.config.crosshair_mode == CrosshairMode::Normal {
                self.chart
                    .draw_pointer_overlay(&mut canvas, Point::new(crosshair.x, crosshair.y))?;
            }
        }

        trace!(
            lines = frame.lines().count(),
            circles = frame.circles().count(),
            texts = frame.texts().count(),
            "draw plot"
        );
        self.renderer.render(&frame)
    }

    /// Tracks the pointer (CSS pixels, top-left origin) and repaints with the
    /// crosshair overlay.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> PlotResult<()> {
        let surface = self.surface.ok_or(PlotError::NotMounted)?;
        let device = surface.css_to_device(x, y);
        trace!(x, y, device_x = device.x, device_y = device.y, "pointer move");
        self.interaction.on_pointer_move(x, y, device.x, device.y);
        self.draw()
    }

    /// Hides the crosshair and repaints.
    pub fn pointer_leave(&mut self) -> PlotResult<()> {
        if self.surface.is_none() {
            return Err(PlotError::NotMounted);
        }
        trace!("pointer leave");
        self.interaction.on_pointer_leave();
        self.draw()
    }

    fn fitted(&self) -> PlotResult<&PlotTransform> {
        self.transform.as_ref().ok_or(PlotError::NotMounted)
    }
}

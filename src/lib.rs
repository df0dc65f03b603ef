//! codec-charts: affine geometry kernel and chart renderers for codec
//! rate-distortion dashboards.
//!
//! The crate turns in-memory numeric series into device-pixel draw
//! primitives. Layers, leaves first:
//!
//! - [`geometry`]: points, rectangles, affine matrices, segment intersection
//!   and thread-local object pools.
//! - [`core`]: linear/log scales, tick generation, series and fitting.
//! - [`plot`]: the base pipeline (surface, transform, gridlines, tick bars,
//!   crosshair).
//! - [`charts`]: scatter, rate-distortion and stacked bar plots.
//! - [`render`]: backend-agnostic frames and renderers.

pub mod charts;
pub mod core;
pub mod error;
pub mod geometry;
pub mod plot;
pub mod render;
pub mod telemetry;

pub use charts::{BarPlot, RateDistortionPlot, ScatterPlot, SeriesRenderer};
pub use error::{PlotError, PlotResult};
pub use plot::{Plot, PlotConfig, Theme};

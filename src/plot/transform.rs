use crate::core::{Scale, ScaleKind};
use crate::error::{PlotError, PlotResult};
use crate::geometry::{Matrix, Point, Rectangle};

/// Fitted mapping between domain values and device pixels.
///
/// Domain values first go through the axis kinds (`log10` on log axes) into
/// axis space, where `viewport` lives; the affine `matrix` then maps axis
/// space onto the device with Y pointing down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotTransform {
    kinds: (ScaleKind, ScaleKind),
    viewport: Rectangle,
    x_scale: Scale,
    y_scale: Scale,
    matrix: Matrix,
    inverse: Matrix,
}

impl PlotTransform {
    pub fn new(
        viewport: Rectangle,
        kinds: (ScaleKind, ScaleKind),
        device: Rectangle,
    ) -> PlotResult<Self> {
        let finite = viewport.x.is_finite()
            && viewport.y.is_finite()
            && viewport.w.is_finite()
            && viewport.h.is_finite();
        if !finite || viewport.is_empty() {
            return Err(PlotError::InvalidData(format!(
                "viewport must be finite and non-empty, got {viewport}"
            )));
        }
        if device.is_empty() {
            return Err(PlotError::InvalidViewport {
                width: device.w,
                height: device.h,
            });
        }

        // Padding can push log bounds past the largest finite power of ten.
        let x_scale = Scale::new(
            kinds.0,
            (
                kinds.0.from_axis_clamped(viewport.x),
                kinds.0.from_axis_clamped(viewport.right()),
            ),
            (device.x, device.right()),
        )?;
        let y_scale = Scale::new(
            kinds.1,
            (
                kinds.1.from_axis_clamped(viewport.y),
                kinds.1.from_axis_clamped(viewport.bottom()),
            ),
            (device.bottom(), device.y),
        )?;

        let (sx, tx) = axis_coefficients(viewport.x, viewport.w, device.x, device.w);
        let (sy, ty) = axis_coefficients(viewport.y, viewport.h, device.y, device.h);
        let mut matrix = Matrix::new(sx, 0.0, 0.0, sy, tx, ty);
        // Device rows grow downwards.
        matrix.pre_multiply(&Matrix::new(1.0, 0.0, 0.0, -1.0, 0.0, device.y + device.bottom()));
        let inverse = matrix.inverted();

        Ok(Self {
            kinds,
            viewport,
            x_scale,
            y_scale,
            matrix,
            inverse,
        })
    }

    #[must_use]
    pub fn kinds(&self) -> (ScaleKind, ScaleKind) {
        self.kinds
    }

    /// Visible region in axis space.
    #[must_use]
    pub fn viewport(&self) -> Rectangle {
        self.viewport
    }

    /// Scale for the horizontal axis, ranging over the device width.
    #[must_use]
    pub fn x_scale(&self) -> Scale {
        self.x_scale
    }

    /// Scale for the vertical axis, ranging over the device height bottom-up.
    #[must_use]
    pub fn y_scale(&self) -> Scale {
        self.y_scale
    }

    #[must_use]
    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    /// Domain → device pixel. Fails for values a log axis cannot show.
    pub fn to_device(&self, domain: Point) -> PlotResult<Point> {
        let axis = Point::new(self.kinds.0.to_axis(domain.x)?, self.kinds.1.to_axis(domain.y)?);
        Ok(self.matrix.transform_point(axis))
    }

    /// Device pixel → domain.
    #[must_use]
    pub fn to_domain(&self, device: Point) -> Point {
        let axis = self.inverse.transform_point(device);
        Point::new(self.kinds.0.from_axis(axis.x), self.kinds.1.from_axis(axis.y))
    }

    #[must_use]
    pub fn axis_to_device(&self, axis: Point) -> Point {
        self.matrix.transform_point(axis)
    }

    #[must_use]
    pub fn device_to_axis(&self, device: Point) -> Point {
        self.inverse.transform_point(device)
    }

    /// Device column of a domain x value.
    pub fn x_to_device(&self, x: f64) -> PlotResult<f64> {
        let axis = self.kinds.0.to_axis(x)?;
        Ok(self.axis_to_device(Point::new(axis, self.viewport.y)).x)
    }

    /// Device row of a domain y value.
    pub fn y_to_device(&self, y: f64) -> PlotResult<f64> {
        let axis = self.kinds.1.to_axis(y)?;
        Ok(self.axis_to_device(Point::new(self.viewport.x, axis)).y)
    }
}

fn axis_coefficients(start: f64, span: f64, device_start: f64, device_span: f64) -> (f64, f64) {
    let scale = device_span / span;
    (scale, device_start - start * scale)
}

use crate::error::{PlotError, PlotResult};
use crate::render::{
    CanvasLayerKind, CirclePrimitive, LinePrimitive, RectPrimitive, TextPrimitive,
};

/// Primitives of one canvas layer.
///
/// Backends paint a layer as rects, then lines, then circles, then texts.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerPrimitives {
    pub kind: CanvasLayerKind,
    pub rects: Vec<RectPrimitive>,
    pub lines: Vec<LinePrimitive>,
    pub circles: Vec<CirclePrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl LayerPrimitives {
    #[must_use]
    pub fn new(kind: CanvasLayerKind) -> Self {
        Self {
            kind,
            rects: Vec::new(),
            lines: Vec::new(),
            circles: Vec::new(),
            texts: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
            && self.lines.is_empty()
            && self.circles.is_empty()
            && self.texts.is_empty()
    }
}

/// Backend-agnostic scene for one plot draw pass, in device pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub width: f64,
    pub height: f64,
    pub layers: Vec<LayerPrimitives>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            layers: CanvasLayerKind::CANONICAL
                .into_iter()
                .map(LayerPrimitives::new)
                .collect(),
        }
    }

    #[must_use]
    pub fn layer(&self, kind: CanvasLayerKind) -> &LayerPrimitives {
        &self.layers[kind.index()]
    }

    pub fn layer_mut(&mut self, kind: CanvasLayerKind) -> &mut LayerPrimitives {
        &mut self.layers[kind.index()]
    }

    pub fn push_line(&mut self, kind: CanvasLayerKind, line: LinePrimitive) {
        self.layer_mut(kind).lines.push(line);
    }

    pub fn push_rect(&mut self, kind: CanvasLayerKind, rect: RectPrimitive) {
        self.layer_mut(kind).rects.push(rect);
    }

    pub fn push_circle(&mut self, kind: CanvasLayerKind, circle: CirclePrimitive) {
        self.layer_mut(kind).circles.push(circle);
    }

    pub fn push_text(&mut self, kind: CanvasLayerKind, text: TextPrimitive) {
        self.layer_mut(kind).texts.push(text);
    }

    #[must_use]
    pub fn with_line(mut self, kind: CanvasLayerKind, line: LinePrimitive) -> Self {
        self.push_line(kind, line);
        self
    }

    #[must_use]
    pub fn with_rect(mut self, kind: CanvasLayerKind, rect: RectPrimitive) -> Self {
        self.push_rect(kind, rect);
        self
    }

    #[must_use]
    pub fn with_text(mut self, kind: CanvasLayerKind, text: TextPrimitive) -> Self {
        self.push_text(kind, text);
        self
    }

    pub fn lines(&self) -> impl Iterator<Item = &LinePrimitive> {
        self.layers.iter().flat_map(|layer| layer.lines.iter())
    }

    pub fn rects(&self) -> impl Iterator<Item = &RectPrimitive> {
        self.layers.iter().flat_map(|layer| layer.rects.iter())
    }

    pub fn circles(&self) -> impl Iterator<Item = &CirclePrimitive> {
        self.layers.iter().flat_map(|layer| layer.circles.iter())
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextPrimitive> {
        self.layers.iter().flat_map(|layer| layer.texts.iter())
    }

    pub fn validate(&self) -> PlotResult<()> {
        if !self.width.is_finite()
            || !self.height.is_finite()
            || self.width <= 0.0
            || self.height <= 0.0
        {
            return Err(PlotError::InvalidViewport {
                width: self.width,
                height: self.height,
            });
        }

        for layer in &self.layers {
            for rect in &layer.rects {
                rect.validate()?;
            }
            for line in &layer.lines {
                line.validate()?;
            }
            for circle in &layer.circles {
                circle.validate()?;
            }
            for text in &layer.texts {
                text.validate()?;
            }
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.iter().all(LayerPrimitives::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::RenderFrame;
    use crate::render::{CanvasLayerKind, Color, LinePrimitive, TextHAlign, TextPrimitive};

    #[test]
    fn iteration_follows_layer_order() {
        let frame = RenderFrame::new(100.0, 50.0)
            .with_line(
                CanvasLayerKind::Series,
                LinePrimitive::new(0.0, 2.0, 5.0, 3.0, 1.0, Color::rgb(0.8, 0.2, 0.2)),
            )
            .with_line(
                CanvasLayerKind::Grid,
                LinePrimitive::new(0.0, 1.0, 5.0, 1.0, 1.0, Color::WHITE),
            )
            .with_text(
                CanvasLayerKind::Axis,
                TextPrimitive::new("x", 2.0, 4.0, 10.0, Color::BLACK, TextHAlign::Right),
            );

        let ys: Vec<f64> = frame.lines().map(|line| line.y1).collect();
        assert_eq!(ys, vec![1.0, 2.0]);
        assert_eq!(frame.texts().count(), 1);
        assert!(frame.validate().is_ok());
    }

    #[test]
    fn zero_sized_frame_is_invalid() {
        assert!(RenderFrame::new(0.0, 10.0).validate().is_err());
        assert!(RenderFrame::new(10.0, 10.0).is_empty());
    }
}

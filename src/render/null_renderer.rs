use crate::error::PlotResult;
use crate::render::{RenderFrame, Renderer};

/// Headless renderer used by tests and by callers that only need the scene.
///
/// It validates frame content and keeps the last frame for inspection.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub render_count: usize,
    pub last_line_count: usize,
    pub last_rect_count: usize,
    pub last_circle_count: usize,
    pub last_text_count: usize,
    pub last_frame: Option<RenderFrame>,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> PlotResult<()> {
        frame.validate()?;
        self.render_count += 1;
        self.last_line_count = frame.lines().count();
        self.last_rect_count = frame.rects().count();
        self.last_circle_count = frame.circles().count();
        self.last_text_count = frame.texts().count();
        self.last_frame = Some(frame.clone());
        Ok(())
    }
}

use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer};

/// No-op renderer used by tests and headless widget usage.
///
/// It still validates frame content so tests can catch invalid geometry before
/// it reaches a real backend.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub passes: usize,
    pub last_canvas_ids: Vec<String>,
    pub last_rect_count: usize,
    pub last_path_count: usize,
    pub last_text_count: usize,
}

impl Renderer for NullRenderer {
    fn begin_pass(&mut self) {
        self.passes += 1;
        self.last_canvas_ids.clear();
        self.last_rect_count = 0;
        self.last_path_count = 0;
        self.last_text_count = 0;
    }

    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.last_canvas_ids.push(frame.canvas_id.clone());
        self.last_rect_count += frame.rects.len();
        self.last_path_count += frame.paths.len();
        self.last_text_count += frame.texts.len();
        Ok(())
    }
}

use winit::window::Window;

use crate::coords::Viewport;
use crate::input::{InputFrame, InputState, PointerSamples};
use crate::time::FrameTime;

/// Window handle and metadata for the current frame.
pub struct WindowCtx<'a> {
    pub window: &'a Window,
}

impl WindowCtx<'_> {
    /// Logical window size.
    pub fn viewport(&self) -> Viewport {
        let size = self.window.inner_size().to_logical::<f64>(self.window.scale_factor());
        Viewport::new(size.width as f32, size.height as f32)
    }

    pub fn set_title(&self, title: &str) {
        self.window.set_title(title);
    }
}

/// Per-frame context passed to `core::App::on_frame`.
pub struct FrameCtx<'a> {
    pub window: WindowCtx<'a>,
    pub input: &'a InputState,
    pub input_frame: &'a InputFrame,
    pub time: FrameTime,
}

impl FrameCtx<'_> {
    /// Pointer snapshot for this frame.
    pub fn pointer_samples(&self) -> PointerSamples {
        PointerSamples::capture(self.input, self.input_frame)
    }
}

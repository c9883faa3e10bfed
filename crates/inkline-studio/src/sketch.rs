use inkline_engine::core::{App, AppControl, FrameCtx};
use inkline_engine::draw::{ConfigError, DrawConfig, StrokeInputController};
use inkline_engine::input::Key;
use inkline_engine::projection::PerspectiveCamera;
use inkline_engine::render::SceneLineRenderer;
use inkline_engine::scene::DrawList;

/// Hosts a stroke controller in a window and binds palette/clear keys.
pub struct SketchApp {
    controller: StrokeInputController<SceneLineRenderer, PerspectiveCamera>,
    draw_list: DrawList,
    /// Renderer revision `draw_list` was recorded at.
    recorded: Option<u64>,
    title: String,
}

impl SketchApp {
    pub fn new(config: DrawConfig) -> Result<Self, ConfigError> {
        let camera = PerspectiveCamera::with_viewport(Default::default());
        let controller = StrokeInputController::new(config, SceneLineRenderer::new(), camera)?;
        Ok(Self {
            controller,
            draw_list: DrawList::new(),
            recorded: None,
            title: String::new(),
        })
    }

    /// Applies key bindings. Returns `Exit` for the quit key.
    fn handle_keys(&mut self, ctx: &FrameCtx<'_>) -> AppControl {
        for key in &ctx.input_frame.keys_pressed {
            match key {
                Key::Q => return AppControl::Exit,
                Key::Escape | Key::Delete | Key::C => self.controller.reset_all(),
                other => {
                    if let Some(id) = other.digit() {
                        self.controller.set_color(id);
                    }
                }
            }
        }
        AppControl::Continue
    }

    fn update_title(&mut self, ctx: &FrameCtx<'_>) {
        let color = self.controller.draw_color();
        let title = format!(
            "inkline sketch: {} strokes, color #{:02x}{:02x}{:02x}",
            self.controller.strokes().len(),
            color.r,
            color.g,
            color.b
        );
        if title != self.title {
            ctx.window.set_title(&title);
            self.title = title;
        }
    }
}

impl App for SketchApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl {
        if self.handle_keys(ctx) == AppControl::Exit {
            return AppControl::Exit;
        }

        self.controller.projector_mut().set_viewport(ctx.window.viewport());

        let (mouse, touch) = {
            let cfg = self.controller.config();
            (cfg.mouse_input_enabled, cfg.touch_input_enabled)
        };
        self.controller.poll_frame(mouse, touch, &ctx.pointer_samples());

        let renderer = self.controller.renderer();
        if self.recorded != Some(renderer.revision()) {
            self.draw_list.clear();
            renderer.record(self.controller.config().container, &mut self.draw_list);
            self.recorded = Some(renderer.revision());
            log::trace!("frame {}: {} polylines", ctx.time.frame_index, self.draw_list.len());
        }

        self.update_title(ctx);
        AppControl::Continue
    }
}

use crate::coords::{Vec2, Vec3};
use crate::input::PointerSamples;
use crate::paint::{Color32, Palette};
use crate::projection::ProjectPointer;
use crate::render::{EndCapMode, EndCapStyle, Joins, LineDesc, LineRenderer};

use super::config::DrawConfig;
use super::error::ConfigError;
use super::gesture::{Gesture, GestureSource, MouseGestures, TouchGestures};
use super::stroke::{Stroke, StrokeId};

/// Turns per-frame pointer samples into variable-width strokes.
///
/// Single-threaded and frame-driven: call [`poll_frame`](Self::poll_frame) once
/// per display frame from the thread that owns the renderer. Mouse and touch
/// drive the same stroke state; at most one stroke accepts points at a time.
pub struct StrokeInputController<R, P> {
    config: DrawConfig,
    renderer: R,
    projector: P,

    strokes: Vec<Stroke>,
    last_id: Option<StrokeId>,
    draw_color: Color32,
    /// Draw gate: the last stroke may still receive points.
    can_draw: bool,

    last_screen: Vec2,
    last_world: Vec3,

    mouse: MouseGestures,
    touch: TouchGestures,
}

impl<R, P> StrokeInputController<R, P>
where
    R: LineRenderer,
    P: ProjectPointer,
{
    /// Validates `config` and initializes the controller.
    pub fn new(config: DrawConfig, renderer: R, projector: P) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut controller = Self {
            config,
            renderer,
            projector,
            strokes: Vec::new(),
            last_id: None,
            draw_color: Color32::default(),
            can_draw: false,
            last_screen: Vec2::zero(),
            last_world: Vec3::zero(),
            mouse: MouseGestures,
            touch: TouchGestures::default(),
        };
        controller.initialize();
        Ok(controller)
    }

    /// Restores the initial drawing state and registers the end-cap style.
    ///
    /// Strokes that already exist are released first.
    pub fn initialize(&mut self) {
        self.reset_all();

        self.draw_color = Color32::default();
        self.last_screen = Vec2::zero();
        self.last_world = Vec3::zero();
        self.touch = TouchGestures::default();

        self.renderer.register_end_cap(EndCapStyle {
            name: self.config.end_cap_name.clone(),
            mode: EndCapMode::Mirror,
            base_texture: self.config.line_texture,
            cap_texture: self.config.end_cap_texture,
        });

        log::debug!("stroke controller initialized (max {} points per stroke)", self.config.max_points);
    }

    /// Samples enabled channels for this frame: mouse first, then touch.
    ///
    /// A frame without pointer data is a no-op.
    pub fn poll_frame(&mut self, mouse_enabled: bool, touch_enabled: bool, samples: &PointerSamples) {
        if mouse_enabled {
            let gesture = self.mouse.read(samples);
            self.dispatch(self.mouse.name(), gesture);
        }
        if touch_enabled {
            let gesture = self.touch.read(samples);
            self.dispatch(self.touch.name(), gesture);
        }
    }

    /// Releases every stroke's render line and empties the collection.
    ///
    /// The next stroke started gets [`StrokeId::FIRST`].
    pub fn reset_all(&mut self) {
        let count = self.strokes.len();

        for stroke in self.strokes.drain(..) {
            let handle = stroke.handle();
            self.renderer.clear_points(handle);
            self.renderer.commit_geometry(handle);
            self.renderer.release(handle);
        }

        self.last_id = None;
        self.can_draw = false;

        if count > 0 {
            log::info!("cleared {count} strokes");
        }
    }

    /// Selects the palette color for the next stroke. Unknown ids are ignored.
    pub fn set_color(&mut self, color_id: i32) {
        match Palette::color(color_id) {
            Some(color) => {
                self.draw_color = color;
                log::debug!("draw color set to {color:?}");
            }
            None => log::debug!("ignoring unknown color id {color_id}"),
        }
    }

    fn dispatch(&mut self, source: &str, gesture: Gesture) {
        match gesture {
            Gesture::Begin(screen) => {
                log::trace!("{source} gesture began at ({}, {})", screen.x, screen.y);
                self.begin_stroke(screen);
            }
            Gesture::Continue(screen) if self.can_draw => {
                if (screen - self.last_screen).length_squared() > self.config.min_move_squared() {
                    self.extend_stroke(screen);
                }
            }
            Gesture::Continue(_) | Gesture::Idle => {}
        }
    }

    fn begin_stroke(&mut self, screen: Vec2) {
        let id = self.last_id.map_or(StrokeId::FIRST, StrokeId::next);
        self.last_id = Some(id);

        let world = self.projector.project(screen, self.config.distance_from_camera);

        let handle = self.renderer.create_line(&LineDesc {
            name: id.line_name(),
            initial_width: self.config.min_width,
            texture: self.config.line_texture,
            end_cap: Some(self.config.end_cap_name.clone()),
            joins: Joins::Fill,
            smooth_width: true,
        });
        self.renderer.set_color(handle, self.draw_color);

        let mut stroke = Stroke::new(id, handle, self.draw_color, self.config.min_width);
        stroke.push_point(world);
        self.renderer.append_point(handle, world);

        self.renderer.commit_geometry(handle);
        self.renderer.reparent(handle, self.config.container);
        self.renderer.set_draw_order(handle, id.draw_order());

        self.strokes.push(stroke);
        self.last_screen = screen;
        self.last_world = world;
        self.can_draw = true;

        log::debug!("stroke {id} started with color {:?}", self.draw_color);
        self.close_gate_at_cap();
    }

    fn extend_stroke(&mut self, screen: Vec2) {
        let world = self.projector.project(screen, self.config.distance_from_camera);
        let speed = world.distance(self.last_world) * self.config.speed_scale;
        let width = self.config.width_for_speed(speed);

        let Some(stroke) = self.strokes.last_mut() else {
            self.can_draw = false;
            return;
        };
        let handle = stroke.handle();

        self.renderer.append_point(handle, world);
        if let Some(segment) = stroke.push_point(world) {
            stroke.set_segment_width(segment, width);
            self.renderer.set_segment_width(handle, width, segment);
        }

        self.renderer.commit_geometry(handle);
        self.renderer.reparent(handle, self.config.container);

        log::trace!("stroke {} point {} width {width}", stroke.id(), stroke.len());

        self.last_screen = screen;
        self.last_world = world;
        self.close_gate_at_cap();
    }

    fn close_gate_at_cap(&mut self) {
        let Some(stroke) = self.strokes.last() else {
            return;
        };
        if self.can_draw && stroke.len() >= self.config.max_points {
            self.can_draw = false;
            log::debug!("stroke {} reached {} points; gate closed", stroke.id(), stroke.len());
        }
    }

    /// All strokes in drawing order.
    #[inline]
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    /// The stroke currently accepting points, if the gate is open.
    #[inline]
    pub fn active_stroke(&self) -> Option<&Stroke> {
        if self.can_draw { self.strokes.last() } else { None }
    }

    #[inline]
    pub fn can_draw(&self) -> bool {
        self.can_draw
    }

    /// Color the next stroke will snapshot.
    #[inline]
    pub fn draw_color(&self) -> Color32 {
        self.draw_color
    }

    /// Id the next started stroke will receive.
    #[inline]
    pub fn next_stroke_id(&self) -> StrokeId {
        self.last_id.map_or(StrokeId::FIRST, StrokeId::next)
    }

    #[inline]
    pub fn config(&self) -> &DrawConfig {
        &self.config
    }

    #[inline]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Hosts update the projector when the window or camera changes.
    #[inline]
    pub fn projector_mut(&mut self) -> &mut P {
        &mut self.projector
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::testing::{Call, RecordingRenderer};
    use crate::input::{
        InputEvent, InputFrame, InputState, MouseSample, TouchEvent, TouchPhase, TouchSample,
    };
    use crate::projection::ScreenSpace;
    use crate::render::{ContainerId, LineHandle};
    use proptest::prelude::*;

    type Controller = StrokeInputController<RecordingRenderer, ScreenSpace>;

    fn controller() -> Controller {
        controller_with(DrawConfig::default())
    }

    fn controller_with(config: DrawConfig) -> Controller {
        StrokeInputController::new(config, RecordingRenderer::default(), ScreenSpace).unwrap()
    }

    fn down(c: &mut Controller, x: f32, y: f32) {
        c.poll_frame(true, true, &PointerSamples::mouse_down(Vec2::new(x, y)));
    }

    fn drag(c: &mut Controller, x: f32, y: f32) {
        c.poll_frame(true, true, &PointerSamples::mouse_drag(Vec2::new(x, y)));
    }

    // ── initialize ────────────────────────────────────────────────────────

    #[test]
    fn new_registers_round_cap_and_starts_empty() {
        let c = controller();
        assert_eq!(
            c.renderer().calls,
            vec![Call::RegisterEndCap(EndCapStyle {
                name: "RoundCap".to_string(),
                mode: EndCapMode::Mirror,
                base_texture: None,
                cap_texture: None,
            })]
        );
        assert!(c.strokes().is_empty());
        assert!(!c.can_draw());
        assert_eq!(c.draw_color(), Color32::WHITE);
        assert_eq!(c.next_stroke_id(), StrokeId::FIRST);
    }

    #[test]
    fn new_rejects_invalid_config() {
        let cfg = DrawConfig { max_points: 0, ..DrawConfig::default() };
        let result = StrokeInputController::new(cfg, RecordingRenderer::default(), ScreenSpace);
        assert!(matches!(result, Err(ConfigError::ZeroPointCap)));
    }

    #[test]
    fn reinitialize_releases_strokes_and_restores_color() {
        let mut c = controller();
        c.set_color(2);
        down(&mut c, 0.0, 0.0);
        c.initialize();

        assert!(c.strokes().is_empty());
        assert_eq!(c.draw_color(), Color32::WHITE);
        assert_eq!(c.renderer().count(|call| matches!(call, Call::Release(_))), 1);
        assert_eq!(c.renderer().count(|call| matches!(call, Call::RegisterEndCap(_))), 2);
    }

    // ── polling ───────────────────────────────────────────────────────────

    #[test]
    fn empty_frame_is_noop() {
        let mut c = controller();
        let mark = c.renderer().calls.len();
        c.poll_frame(true, true, &PointerSamples::default());
        assert!(c.renderer().since(mark).is_empty());
        assert!(c.strokes().is_empty());
    }

    #[test]
    fn disabled_channels_are_not_sampled() {
        let mut c = controller();
        c.poll_frame(false, true, &PointerSamples::mouse_down(Vec2::zero()));
        c.poll_frame(true, false, &PointerSamples::touch(1, TouchPhase::Began, Vec2::zero()));
        assert!(c.strokes().is_empty());
    }

    #[test]
    fn drag_without_begin_is_ignored() {
        let mut c = controller();
        drag(&mut c, 10.0, 10.0);
        assert!(c.strokes().is_empty());
    }

    #[test]
    fn begin_drives_renderer_in_order() {
        let mut c = controller();
        let mark = c.renderer().calls.len();
        down(&mut c, 4.0, 5.0);

        let h = LineHandle(0);
        let first = Vec3::new(4.0, 5.0, 100.0);
        match c.renderer().since(mark) {
            [Call::Create(desc, created), rest @ ..] => {
                assert_eq!(*created, h);
                assert_eq!(desc.name, "DrawnLine3D 0");
                assert_eq!(desc.initial_width, 5.0);
                assert_eq!(desc.end_cap.as_deref(), Some("RoundCap"));
                assert!(desc.smooth_width);
                assert_eq!(
                    rest,
                    &[
                        Call::SetColor(h, Color32::WHITE),
                        Call::Append(h, first),
                        Call::Commit(h),
                        Call::Reparent(h, ContainerId::default()),
                        Call::SetDrawOrder(h, 0),
                    ]
                );
            }
            other => panic!("unexpected calls: {other:?}"),
        }

        let stroke = c.active_stroke().unwrap();
        assert_eq!(stroke.points(), &[first]);
        assert!(c.can_draw());
    }

    #[test]
    fn speed_sets_width_of_new_segment() {
        let mut c = controller();
        down(&mut c, 0.0, 0.0);
        drag(&mut c, 0.0, 3.0);
        drag(&mut c, 0.0, 3.0);

        let stroke = &c.strokes()[0];
        assert_eq!(stroke.id(), StrokeId(0));
        assert_eq!(stroke.len(), 2);
        assert_eq!(stroke.widths(), &[9.0]);
        assert_eq!(c.renderer().count(|call| matches!(call, Call::SetWidth(_, w, 0) if *w == 9.0)), 1);
    }

    #[test]
    fn continue_commits_before_reparenting() {
        let mut c = controller();
        down(&mut c, 0.0, 0.0);
        let mark = c.renderer().calls.len();
        drag(&mut c, 0.0, 3.0);

        let h = LineHandle(0);
        assert_eq!(
            c.renderer().since(mark),
            &[
                Call::Append(h, Vec3::new(0.0, 3.0, 100.0)),
                Call::SetWidth(h, 9.0, 0),
                Call::Commit(h),
                Call::Reparent(h, ContainerId::default()),
            ]
        );
    }

    #[test]
    fn width_clamps_to_range() {
        let mut c = controller();
        down(&mut c, 0.0, 0.0);
        drag(&mut c, 1.1, 0.0);
        drag(&mut c, 500.0, 0.0);

        assert_eq!(c.strokes()[0].widths(), &[5.0, 40.0]);
    }

    #[test]
    fn movement_at_threshold_is_ignored() {
        let mut c = controller();
        down(&mut c, 0.0, 0.0);
        let mark = c.renderer().calls.len();
        drag(&mut c, 1.0, 0.0);
        drag(&mut c, 0.6, 0.6);

        assert!(c.renderer().since(mark).is_empty());
        assert_eq!(c.strokes()[0].len(), 1);
    }

    #[test]
    fn threshold_is_measured_in_screen_space() {
        // World units 1000x larger than pixels: half a pixel is still jitter.
        let zoomed = |s: Vec2, d: f32| Vec3::new(s.x * 1000.0, s.y * 1000.0, d);
        let mut c = StrokeInputController::new(DrawConfig::default(), RecordingRenderer::default(), zoomed).unwrap();

        c.poll_frame(true, false, &PointerSamples::mouse_down(Vec2::zero()));
        c.poll_frame(true, false, &PointerSamples::mouse_drag(Vec2::new(0.5, 0.0)));
        assert_eq!(c.strokes()[0].len(), 1);

        c.poll_frame(true, false, &PointerSamples::mouse_drag(Vec2::new(2.0, 0.0)));
        assert_eq!(c.strokes()[0].len(), 2);
        assert_eq!(c.strokes()[0].widths(), &[40.0]);
    }

    #[test]
    fn point_cap_closes_gate_until_next_begin() {
        let mut c = controller();
        down(&mut c, 0.0, 0.0);
        for i in 1..=5000 {
            drag(&mut c, i as f32 * 2.0, 0.0);
        }

        assert_eq!(c.strokes()[0].len(), 5000);
        assert!(!c.can_draw());
        assert!(c.active_stroke().is_none());

        let mark = c.renderer().calls.len();
        drag(&mut c, 20_000.0, 0.0);
        assert!(c.renderer().since(mark).is_empty());

        down(&mut c, 0.0, 0.0);
        assert!(c.can_draw());
        assert_eq!(c.strokes()[1].id(), StrokeId(1));
        assert_eq!(c.strokes()[0].len(), 5000);
    }

    #[test]
    fn single_point_cap_closes_on_begin() {
        let mut c = controller_with(DrawConfig { max_points: 1, ..DrawConfig::default() });
        down(&mut c, 0.0, 0.0);
        assert!(!c.can_draw());
        drag(&mut c, 50.0, 0.0);
        assert_eq!(c.strokes()[0].len(), 1);
    }

    #[test]
    fn each_begin_starts_a_new_stroke() {
        let mut c = controller();
        for i in 0..3 {
            down(&mut c, i as f32, 0.0);
        }

        let ids: Vec<StrokeId> = c.strokes().iter().map(Stroke::id).collect();
        assert_eq!(ids, vec![StrokeId(0), StrokeId(1), StrokeId(2)]);
        assert_eq!(c.renderer().count(|call| matches!(call, Call::SetDrawOrder(_, 2))), 1);

        // Only the newest stroke receives further points.
        drag(&mut c, 40.0, 0.0);
        assert_eq!(c.strokes()[1].len(), 1);
        assert_eq!(c.strokes()[2].len(), 2);
    }

    // ── touch ─────────────────────────────────────────────────────────────

    #[test]
    fn touch_draws_like_mouse() {
        let mut c = controller();
        c.poll_frame(false, true, &PointerSamples::touch(9, TouchPhase::Began, Vec2::zero()));
        c.poll_frame(false, true, &PointerSamples::touch(9, TouchPhase::Moved, Vec2::new(0.0, 3.0)));
        c.poll_frame(false, true, &PointerSamples::touch(9, TouchPhase::Stationary, Vec2::new(0.0, 30.0)));

        let stroke = &c.strokes()[0];
        assert_eq!(stroke.len(), 2);
        assert_eq!(stroke.widths(), &[9.0]);
    }

    #[test]
    fn second_finger_does_not_draw() {
        let mut c = controller();
        c.poll_frame(false, true, &PointerSamples::touch(1, TouchPhase::Began, Vec2::zero()));

        let two = PointerSamples {
            mouse: None,
            touches: vec![
                TouchSample { id: 1, phase: TouchPhase::Moved, position: Vec2::new(10.0, 0.0) },
                TouchSample { id: 2, phase: TouchPhase::Began, position: Vec2::new(90.0, 0.0) },
            ],
        };
        c.poll_frame(false, true, &two);

        assert_eq!(c.strokes().len(), 1);
        assert_eq!(c.strokes()[0].len(), 1);
    }

    /// Feeds one frame of touch events through `InputState` the way the runtime does.
    fn touch_frame(c: &mut Controller, state: &mut InputState, events: &[(u64, TouchPhase, f32)]) {
        let mut frame = InputFrame::default();
        for &(id, phase, x) in events {
            state.apply_event(&mut frame, InputEvent::Touch(TouchEvent { id, phase, x, y: 0.0 }));
        }
        c.poll_frame(false, true, &PointerSamples::capture(state, &frame));
        state.end_frame();
    }

    #[test]
    fn lifting_first_finger_does_not_hand_stroke_to_second() {
        let mut c = controller();
        let mut state = InputState::default();

        touch_frame(&mut c, &mut state, &[(1, TouchPhase::Began, 0.0)]);
        touch_frame(&mut c, &mut state, &[(2, TouchPhase::Began, 500.0)]);
        touch_frame(&mut c, &mut state, &[(1, TouchPhase::Ended, 0.0)]);
        touch_frame(&mut c, &mut state, &[(2, TouchPhase::Moved, 510.0)]);
        touch_frame(&mut c, &mut state, &[(2, TouchPhase::Moved, 540.0)]);

        assert_eq!(c.strokes().len(), 1);
        assert_eq!(c.strokes()[0].points(), &[Vec3::new(0.0, 0.0, 100.0)]);
    }

    #[test]
    fn tracked_finger_keeps_drawing_through_input_state() {
        let mut c = controller();
        let mut state = InputState::default();

        touch_frame(&mut c, &mut state, &[(3, TouchPhase::Began, 0.0)]);
        touch_frame(&mut c, &mut state, &[(3, TouchPhase::Moved, 20.0)]);
        touch_frame(&mut c, &mut state, &[(3, TouchPhase::Moved, 40.0)]);
        touch_frame(&mut c, &mut state, &[(3, TouchPhase::Ended, 40.0)]);

        assert_eq!(c.strokes()[0].len(), 3);
    }

    #[test]
    fn mouse_then_touch_share_one_gate() {
        let mut c = controller();
        let both = PointerSamples {
            mouse: Some(MouseSample { position: Vec2::zero(), pressed: true, held: true }),
            touches: vec![TouchSample { id: 1, phase: TouchPhase::Began, position: Vec2::new(50.0, 0.0) }],
        };
        c.poll_frame(true, true, &both);

        // Touch begins after mouse in the same frame and supersedes it.
        assert_eq!(c.strokes().len(), 2);
        assert_eq!(c.active_stroke().map(Stroke::id), Some(StrokeId(1)));
    }

    // ── color ─────────────────────────────────────────────────────────────

    #[test]
    fn color_applies_to_next_stroke_only() {
        let mut c = controller();
        down(&mut c, 0.0, 0.0);
        c.set_color(2);
        drag(&mut c, 0.0, 5.0);
        down(&mut c, 10.0, 0.0);

        assert_eq!(c.strokes()[0].color(), Color32::WHITE);
        assert_eq!(c.strokes()[1].color(), Color32::RED);
        assert_eq!(c.renderer().count(|call| matches!(call, Call::SetColor(_, col) if *col == Color32::RED)), 1);
    }

    #[test]
    fn unknown_color_id_keeps_current_color() {
        let mut c = controller();
        c.set_color(4);
        c.set_color(5);
        c.set_color(-1);
        assert_eq!(c.draw_color(), Color32::YELLOW);
    }

    // ── reset ─────────────────────────────────────────────────────────────

    #[test]
    fn reset_clears_commits_and_releases_each_line() {
        let mut c = controller();
        down(&mut c, 0.0, 0.0);
        drag(&mut c, 0.0, 5.0);
        down(&mut c, 20.0, 0.0);

        let mark = c.renderer().calls.len();
        c.reset_all();

        let (a, b) = (LineHandle(0), LineHandle(1));
        assert_eq!(
            c.renderer().since(mark),
            &[
                Call::Clear(a),
                Call::Commit(a),
                Call::Release(a),
                Call::Clear(b),
                Call::Commit(b),
                Call::Release(b),
            ]
        );
        assert!(c.strokes().is_empty());
        assert_eq!(c.next_stroke_id(), StrokeId::FIRST);
    }

    #[test]
    fn reset_is_idempotent_and_closes_gate() {
        let mut c = controller();
        down(&mut c, 0.0, 0.0);
        c.reset_all();
        let mark = c.renderer().calls.len();
        c.reset_all();
        assert!(c.renderer().since(mark).is_empty());

        drag(&mut c, 30.0, 30.0);
        assert!(c.strokes().is_empty());

        down(&mut c, 0.0, 0.0);
        assert_eq!(c.strokes()[0].id(), StrokeId::FIRST);
    }

    #[test]
    fn reset_keeps_draw_color() {
        let mut c = controller();
        c.set_color(1);
        c.reset_all();
        assert_eq!(c.draw_color(), Color32::BLACK);
    }

    // ── properties ────────────────────────────────────────────────────────

    proptest! {
        #[test]
        fn widths_stay_in_range_and_cap_holds(
            moves in prop::collection::vec((-80f32..80.0, -80f32..80.0), 0..120),
            cap in 1usize..40,
        ) {
            let mut c = controller_with(DrawConfig { max_points: cap, ..DrawConfig::default() });
            let mut pos = Vec2::zero();
            down(&mut c, pos.x, pos.y);
            for (dx, dy) in moves {
                pos = pos + Vec2::new(dx, dy);
                drag(&mut c, pos.x, pos.y);
            }

            let stroke = &c.strokes()[0];
            prop_assert!(stroke.len() <= cap);
            prop_assert!(stroke.widths().iter().all(|w| (5.0..=40.0).contains(w)));
            prop_assert_eq!(c.can_draw(), stroke.len() < cap);
        }

        #[test]
        fn jitter_never_adds_points(
            jitter in prop::collection::vec((-0.7f32..0.7, -0.7f32..0.7), 1..50),
        ) {
            let mut c = controller();
            down(&mut c, 100.0, 100.0);
            for (dx, dy) in jitter {
                drag(&mut c, 100.0 + dx, 100.0 + dy);
            }
            prop_assert_eq!(c.strokes()[0].len(), 1);
            prop_assert!(c.strokes()[0].widths().is_empty());
        }

        #[test]
        fn stroke_ids_strictly_increase(begins in 1usize..30) {
            let mut c = controller();
            for i in 0..begins {
                down(&mut c, i as f32, 0.0);
            }
            let ids: Vec<u32> = c.strokes().iter().map(|s| s.id().0).collect();
            prop_assert!(ids.windows(2).all(|w| w[0] < w[1]));
            prop_assert_eq!(ids.len(), begins);
        }
    }
}

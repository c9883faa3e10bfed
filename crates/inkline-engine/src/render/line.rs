use serde::Deserialize;

use crate::coords::Vec3;
use crate::paint::Color32;

/// Opaque handle to a polyline resource owned by a renderer.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct LineHandle(pub u64);

/// Texture identifier resolved by the renderer's asset layer.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Deserialize)]
#[serde(transparent)]
pub struct TextureId(pub u32);

/// Visual container (canvas) that lines are attached under.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Deserialize)]
#[serde(transparent)]
pub struct ContainerId(pub u32);

/// How an end-cap texture is applied to the two ends of a line.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum EndCapMode {
    /// Same cap at both ends, mirrored at the back.
    #[default]
    Mirror,
    Front,
    Back,
    Both,
    None,
}

/// How consecutive segments are joined.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum Joins {
    /// Fill the gap between segments.
    #[default]
    Fill,
    Weld,
    None,
}

/// Named end-cap style, registered once before lines reference it by name.
#[derive(Debug, Clone, PartialEq)]
pub struct EndCapStyle {
    pub name: String,
    pub mode: EndCapMode,
    pub base_texture: Option<TextureId>,
    pub cap_texture: Option<TextureId>,
}

/// Parameters for allocating a polyline.
#[derive(Debug, Clone, PartialEq)]
pub struct LineDesc {
    pub name: String,
    /// Width used for segments that never had one set explicitly.
    pub initial_width: f32,
    pub texture: Option<TextureId>,
    /// Name of a registered [`EndCapStyle`].
    pub end_cap: Option<String>,
    pub joins: Joins,
    /// Interpolate width across each segment instead of stepping it.
    pub smooth_width: bool,
}

/// Polyline rendering backend.
///
/// Mutations stay pending until [`commit_geometry`](Self::commit_geometry).
/// Committing may rebuild the line's visual object, so callers re-apply
/// [`reparent`](Self::reparent) after every commit.
///
/// A handle returned by `create_line` is owned by the caller until it is passed
/// to [`release`](Self::release).
pub trait LineRenderer {
    /// One-time global registration of an end-cap style.
    fn register_end_cap(&mut self, style: EndCapStyle);

    fn create_line(&mut self, desc: &LineDesc) -> LineHandle;

    fn set_color(&mut self, line: LineHandle, color: Color32);

    fn append_point(&mut self, line: LineHandle, point: Vec3);

    /// Sets the width of segment `segment` (between points `segment` and `segment + 1`).
    fn set_segment_width(&mut self, line: LineHandle, width: f32, segment: usize);

    fn clear_points(&mut self, line: LineHandle);

    /// Pushes pending points and widths to the visible representation.
    fn commit_geometry(&mut self, line: LineHandle);

    fn reparent(&mut self, line: LineHandle, container: ContainerId);

    /// Stacking order between lines; higher draws on top.
    fn set_draw_order(&mut self, line: LineHandle, order: i32);

    fn release(&mut self, line: LineHandle);
}

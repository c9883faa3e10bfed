use std::fmt;

use crate::coords::Vec3;
use crate::paint::Color32;
use crate::render::LineHandle;

/// Monotonic stroke identifier.
///
/// Used for the renderer-side line name and as the stroke's draw order, so a
/// later stroke always stacks above an earlier one.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct StrokeId(pub u32);

impl StrokeId {
    pub const FIRST: StrokeId = StrokeId(0);

    #[inline]
    pub fn next(self) -> StrokeId {
        StrokeId(self.0.saturating_add(1))
    }

    #[inline]
    pub fn draw_order(self) -> i32 {
        i32::try_from(self.0).unwrap_or(i32::MAX)
    }

    /// Name given to the stroke's render line.
    pub fn line_name(self) -> String {
        format!("DrawnLine3D {}", self.0)
    }
}

impl fmt::Display for StrokeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One continuous drawn polyline.
///
/// Points are append-only; `widths[i]` belongs to the segment ending at
/// `points[i + 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    id: StrokeId,
    handle: LineHandle,
    color: Color32,
    initial_width: f32,
    points: Vec<Vec3>,
    widths: Vec<f32>,
}

impl Stroke {
    pub(crate) fn new(id: StrokeId, handle: LineHandle, color: Color32, initial_width: f32) -> Self {
        Self {
            id,
            handle,
            color,
            initial_width,
            points: Vec::new(),
            widths: Vec::new(),
        }
    }

    #[inline]
    pub fn id(&self) -> StrokeId {
        self.id
    }

    #[inline]
    pub fn handle(&self) -> LineHandle {
        self.handle
    }

    /// Color snapshot taken when the stroke started.
    #[inline]
    pub fn color(&self) -> Color32 {
        self.color
    }

    #[inline]
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    #[inline]
    pub fn widths(&self) -> &[f32] {
        &self.widths
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Appends `point` and returns the index of the segment it closes, if any.
    pub(crate) fn push_point(&mut self, point: Vec3) -> Option<usize> {
        self.points.push(point);
        self.points.len().checked_sub(2)
    }

    pub(crate) fn set_segment_width(&mut self, segment: usize, width: f32) {
        if self.widths.len() <= segment {
            self.widths.resize(segment + 1, self.initial_width);
        }
        self.widths[segment] = width;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_count_up_from_zero() {
        assert_eq!(StrokeId::FIRST.next(), StrokeId(1));
        assert_eq!(StrokeId(7).draw_order(), 7);
        assert_eq!(StrokeId(u32::MAX).draw_order(), i32::MAX);
        assert_eq!(StrokeId(3).line_name(), "DrawnLine3D 3");
    }

    #[test]
    fn first_point_closes_no_segment() {
        let mut s = Stroke::new(StrokeId(0), LineHandle(0), Color32::RED, 5.0);
        assert_eq!(s.push_point(Vec3::zero()), None);
        assert_eq!(s.push_point(Vec3::new(1.0, 0.0, 0.0)), Some(0));
        assert_eq!(s.push_point(Vec3::new(2.0, 0.0, 0.0)), Some(1));
    }

    #[test]
    fn skipped_segments_fill_with_initial_width() {
        let mut s = Stroke::new(StrokeId(0), LineHandle(0), Color32::RED, 5.0);
        s.set_segment_width(2, 11.0);
        assert_eq!(s.widths(), &[5.0, 5.0, 11.0]);
    }
}

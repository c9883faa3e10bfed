use crate::coords::Vec3;
use crate::paint::Color32;
use crate::scene::{DrawCmd, DrawList, ZIndex};

/// Variable-width polyline payload.
///
/// `widths[i]` is the width of the segment from `points[i]` to `points[i + 1]`,
/// so `widths.len() == points.len().saturating_sub(1)`.
#[derive(Debug, Clone, PartialEq)]
pub struct PolylineCmd {
    pub points: Vec<Vec3>,
    pub widths: Vec<f32>,
    pub color: Color32,
    /// Registered end-cap style name, if any.
    pub end_cap: Option<String>,
}

impl DrawList {
    /// Records a polyline draw command.
    #[inline]
    pub fn push_polyline(&mut self, z: ZIndex, cmd: PolylineCmd) {
        self.push(z, DrawCmd::Polyline(cmd));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(x: f32) -> PolylineCmd {
        PolylineCmd {
            points: vec![Vec3::new(x, 0.0, 0.0)],
            widths: Vec::new(),
            color: Color32::WHITE,
            end_cap: None,
        }
    }

    fn first_x(item: &crate::scene::DrawItem) -> f32 {
        match &item.cmd {
            DrawCmd::Polyline(p) => p.points[0].x,
        }
    }

    #[test]
    fn paint_order_sorts_by_z_then_insertion() {
        let mut list = DrawList::new();
        list.push_polyline(ZIndex(2), line(0.0));
        list.push_polyline(ZIndex(1), line(1.0));
        list.push_polyline(ZIndex(1), line(2.0));

        let xs: Vec<f32> = list.iter_in_paint_order().map(first_x).collect();
        assert_eq!(xs, vec![1.0, 2.0, 0.0]);
    }

    #[test]
    fn clear_resets_items() {
        let mut list = DrawList::new();
        list.push_polyline(ZIndex(0), line(0.0));
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.iter_in_paint_order().count(), 0);
    }
}

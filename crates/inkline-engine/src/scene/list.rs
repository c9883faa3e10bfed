use super::{DrawCmd, SortKey, ZIndex};

/// Recorded command with its paint-order key.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub key: SortKey,
    pub cmd: DrawCmd,
}

/// Per-frame command stream.
///
/// Items are sorted lazily the first time paint order is requested after a push.
/// Strokes usually arrive already ordered, which keeps that sort cheap.
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
    seq: u32,
    sorted: bool,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops every item but keeps the allocation.
    pub fn clear(&mut self) {
        self.items.clear();
        self.seq = 0;
        self.sorted = true;
    }

    /// Recorded items. Insertion order until paint order has been requested.
    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Records `cmd` on layer `z`. Ties within a layer keep push order.
    pub fn push(&mut self, z: ZIndex, cmd: DrawCmd) {
        let key = SortKey::new(z, self.seq);
        self.seq = self.seq.wrapping_add(1);

        if self.items.last().is_some_and(|last| last.key > key) {
            self.sorted = false;
        }
        self.items.push(DrawItem { key, cmd });
    }

    /// Back-to-front iteration.
    pub fn iter_in_paint_order(&mut self) -> std::slice::Iter<'_, DrawItem> {
        if !self.sorted {
            self.items.sort_by_key(|item| item.key);
            self.sorted = true;
        }
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec3;
    use crate::paint::Color32;
    use crate::scene::PolylineCmd;

    fn cmd(tag: f32) -> DrawCmd {
        DrawCmd::Polyline(PolylineCmd {
            points: vec![Vec3::new(tag, 0.0, 0.0)],
            widths: Vec::new(),
            color: Color32::WHITE,
            end_cap: None,
        })
    }

    fn tags(list: &mut DrawList) -> Vec<f32> {
        list.iter_in_paint_order()
            .map(|item| match &item.cmd {
                DrawCmd::Polyline(p) => p.points[0].x,
            })
            .collect()
    }

    #[test]
    fn out_of_order_layers_are_sorted_back_to_front() {
        let mut list = DrawList::new();
        list.push(ZIndex(2), cmd(2.0));
        list.push(ZIndex(0), cmd(0.0));
        list.push(ZIndex(1), cmd(1.0));
        assert_eq!(tags(&mut list), vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn same_layer_keeps_push_order() {
        let mut list = DrawList::new();
        list.push(ZIndex(5), cmd(1.0));
        list.push(ZIndex(5), cmd(2.0));
        assert_eq!(tags(&mut list), vec![1.0, 2.0]);
    }

    #[test]
    fn clear_resets_sequence() {
        let mut list = DrawList::new();
        list.push(ZIndex(3), cmd(1.0));
        list.clear();
        assert!(list.is_empty());

        list.push(ZIndex(0), cmd(4.0));
        assert_eq!(list.items()[0].key, SortKey::new(ZIndex(0), 0));
    }
}

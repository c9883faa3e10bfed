//! Recording `LineRenderer` for controller tests.

use crate::coords::Vec3;
use crate::paint::Color32;
use crate::render::{ContainerId, EndCapStyle, LineDesc, LineHandle, LineRenderer};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    RegisterEndCap(EndCapStyle),
    Create(LineDesc, LineHandle),
    SetColor(LineHandle, Color32),
    Append(LineHandle, Vec3),
    SetWidth(LineHandle, f32, usize),
    Clear(LineHandle),
    Commit(LineHandle),
    Reparent(LineHandle, ContainerId),
    SetDrawOrder(LineHandle, i32),
    Release(LineHandle),
}

#[derive(Debug, Default)]
pub(crate) struct RecordingRenderer {
    pub calls: Vec<Call>,
    next: u64,
}

impl RecordingRenderer {
    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }

    /// Calls made since `mark`, for asserting on one operation at a time.
    pub fn since(&self, mark: usize) -> &[Call] {
        &self.calls[mark..]
    }
}

impl LineRenderer for RecordingRenderer {
    fn register_end_cap(&mut self, style: EndCapStyle) {
        self.calls.push(Call::RegisterEndCap(style));
    }

    fn create_line(&mut self, desc: &LineDesc) -> LineHandle {
        let handle = LineHandle(self.next);
        self.next += 1;
        self.calls.push(Call::Create(desc.clone(), handle));
        handle
    }

    fn set_color(&mut self, line: LineHandle, color: Color32) {
        self.calls.push(Call::SetColor(line, color));
    }

    fn append_point(&mut self, line: LineHandle, point: Vec3) {
        self.calls.push(Call::Append(line, point));
    }

    fn set_segment_width(&mut self, line: LineHandle, width: f32, segment: usize) {
        self.calls.push(Call::SetWidth(line, width, segment));
    }

    fn clear_points(&mut self, line: LineHandle) {
        self.calls.push(Call::Clear(line));
    }

    fn commit_geometry(&mut self, line: LineHandle) {
        self.calls.push(Call::Commit(line));
    }

    fn reparent(&mut self, line: LineHandle, container: ContainerId) {
        self.calls.push(Call::Reparent(line, container));
    }

    fn set_draw_order(&mut self, line: LineHandle, order: i32) {
        self.calls.push(Call::SetDrawOrder(line, order));
    }

    fn release(&mut self, line: LineHandle) {
        self.calls.push(Call::Release(line));
    }
}

use std::collections::{BTreeMap, HashMap};

use crate::coords::Vec3;
use crate::paint::Color32;
use crate::scene::{DrawList, PolylineCmd, ZIndex};

use super::line::{ContainerId, EndCapStyle, LineDesc, LineHandle, LineRenderer};

/// A line tracked by [`SceneLineRenderer`].
#[derive(Debug, Clone)]
pub struct SceneLine {
    pub desc: LineDesc,
    pub color: Color32,
    pub draw_order: i32,
    /// `None` until reparented; cleared again by every commit.
    pub parent: Option<ContainerId>,

    points: Vec<Vec3>,
    widths: Vec<f32>,
    committed: PolylineCmd,
    commits: u32,
    /// First point and segment that differ from `committed`.
    stale_points: usize,
    stale_widths: usize,
}

impl SceneLine {
    fn new(desc: LineDesc) -> Self {
        let committed = PolylineCmd {
            points: Vec::new(),
            widths: Vec::new(),
            color: Color32::default(),
            end_cap: desc.end_cap.clone(),
        };
        Self {
            desc,
            color: Color32::default(),
            draw_order: 0,
            parent: None,
            points: Vec::new(),
            widths: Vec::new(),
            committed,
            commits: 0,
            stale_points: 0,
            stale_widths: 0,
        }
    }

    /// Pending points, including ones not committed yet.
    #[inline]
    pub fn pending_points(&self) -> &[Vec3] {
        &self.points
    }

    /// Geometry as of the last commit.
    #[inline]
    pub fn committed(&self) -> &PolylineCmd {
        &self.committed
    }

    /// Number of `commit_geometry` calls seen.
    #[inline]
    pub fn commit_count(&self) -> u32 {
        self.commits
    }

    /// Copies only what changed since the previous commit.
    fn commit(&mut self) {
        let segments = self.points.len().saturating_sub(1);
        let committed = &mut self.committed;

        committed.points.truncate(self.stale_points);
        committed.points.extend_from_slice(&self.points[self.stale_points..]);

        committed.widths.truncate(self.stale_widths.min(segments));
        for segment in committed.widths.len()..segments {
            let width = self.widths.get(segment).copied().unwrap_or(self.desc.initial_width);
            committed.widths.push(width);
        }
        committed.color = self.color;

        self.stale_points = self.points.len();
        self.stale_widths = segments;
        self.commits += 1;
        self.parent = None;
    }
}

/// In-memory [`LineRenderer`].
///
/// Lines become visible in [`record`](Self::record) once they have committed
/// geometry and are parented under the recorded container.
#[derive(Debug, Default)]
pub struct SceneLineRenderer {
    lines: BTreeMap<LineHandle, SceneLine>,
    end_caps: HashMap<String, EndCapStyle>,
    next_handle: u64,
    revision: u64,
}

impl SceneLineRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Live (unreleased) line count.
    #[inline]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    #[inline]
    pub fn line(&self, handle: LineHandle) -> Option<&SceneLine> {
        self.lines.get(&handle)
    }

    #[inline]
    pub fn end_cap(&self, name: &str) -> Option<&EndCapStyle> {
        self.end_caps.get(name)
    }

    /// Bumped whenever recorded output could change. Hosts re-record only when
    /// it differs from the revision they last recorded.
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Pushes every visible line under `container` into `list`, z-ordered by draw order.
    pub fn record(&self, container: ContainerId, list: &mut DrawList) {
        for line in self.lines.values() {
            if line.parent != Some(container) || line.committed.points.is_empty() {
                continue;
            }
            list.push_polyline(ZIndex::new(line.draw_order), line.committed.clone());
        }
    }

    fn line_mut(&mut self, handle: LineHandle, op: &str) -> Option<&mut SceneLine> {
        let line = self.lines.get_mut(&handle);
        if line.is_none() {
            log::warn!("{op}: unknown line handle {}", handle.0);
        }
        line
    }
}

impl LineRenderer for SceneLineRenderer {
    fn register_end_cap(&mut self, style: EndCapStyle) {
        log::debug!("registering end cap {:?} ({:?})", style.name, style.mode);
        self.end_caps.insert(style.name.clone(), style);
    }

    fn create_line(&mut self, desc: &LineDesc) -> LineHandle {
        if let Some(cap) = &desc.end_cap {
            if !self.end_caps.contains_key(cap) {
                log::warn!("line {:?} references unregistered end cap {cap:?}", desc.name);
            }
        }

        let handle = LineHandle(self.next_handle);
        self.next_handle += 1;
        self.lines.insert(handle, SceneLine::new(desc.clone()));
        handle
    }

    fn set_color(&mut self, line: LineHandle, color: Color32) {
        if let Some(l) = self.line_mut(line, "set_color") {
            l.color = color;
        }
    }

    fn append_point(&mut self, line: LineHandle, point: Vec3) {
        if let Some(l) = self.line_mut(line, "append_point") {
            l.points.push(point);
        }
    }

    fn set_segment_width(&mut self, line: LineHandle, width: f32, segment: usize) {
        if let Some(l) = self.line_mut(line, "set_segment_width") {
            if l.widths.len() <= segment {
                l.widths.resize(segment + 1, l.desc.initial_width);
            }
            l.widths[segment] = width;
            l.stale_widths = l.stale_widths.min(segment);
        }
    }

    fn clear_points(&mut self, line: LineHandle) {
        if let Some(l) = self.line_mut(line, "clear_points") {
            l.points.clear();
            l.widths.clear();
            l.stale_points = 0;
            l.stale_widths = 0;
        }
    }

    fn commit_geometry(&mut self, line: LineHandle) {
        if let Some(l) = self.line_mut(line, "commit_geometry") {
            l.commit();
            self.revision += 1;
        }
    }

    fn reparent(&mut self, line: LineHandle, container: ContainerId) {
        if let Some(l) = self.line_mut(line, "reparent") {
            l.parent = Some(container);
            self.revision += 1;
        }
    }

    fn set_draw_order(&mut self, line: LineHandle, order: i32) {
        if let Some(l) = self.line_mut(line, "set_draw_order") {
            l.draw_order = order;
            self.revision += 1;
        }
    }

    fn release(&mut self, line: LineHandle) {
        if self.lines.remove(&line).is_none() {
            log::warn!("release: unknown line handle {}", line.0);
            return;
        }
        self.revision += 1;
    }
}

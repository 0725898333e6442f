//! In-memory rendering backend.

use spots_ui_graphics::{Point, Rect, Size};

use crate::completion::Completion;
use crate::interface::{Animation, BackendKind, InterfaceFactory, InterfaceId, UserInterface};
use crate::runtime::RuntimeHandle;
use crate::view::RowView;

/// Keeps rows in a vector and stacks them vertically for visibility checks.
///
/// With a runtime attached, batch completions are deferred to the next tick
/// the way an animating backend reports them; without one they fire inline.
pub struct HeadlessInterface {
    id: InterfaceId,
    backend: BackendKind,
    frame: Rect,
    attached: bool,
    rows: Vec<RowView>,
    pending_batch: usize,
    runtime: Option<RuntimeHandle>,
}

impl HeadlessInterface {
    pub fn new(backend: BackendKind) -> Self {
        Self {
            id: InterfaceId::next(),
            backend,
            frame: Rect::ZERO,
            attached: false,
            rows: Vec::new(),
            pending_batch: 0,
            runtime: None,
        }
    }

    pub fn with_runtime(backend: BackendKind, runtime: RuntimeHandle) -> Self {
        Self {
            runtime: Some(runtime),
            ..Self::new(backend)
        }
    }

    /// Row mutations recorded since the last committed batch.
    pub fn pending_batch(&self) -> usize {
        self.pending_batch
    }

    fn row_frames(&self) -> impl Iterator<Item = (Rect, &RowView)> + '_ {
        let width = self.frame.width();
        let mut offset = 0.0f32;
        self.rows.iter().map(move |row| {
            let height = row.preferred_view_size().height;
            let frame = Rect {
                origin: Point::new(0.0, offset),
                size: Size::new(width, height),
            };
            offset += height;
            (frame, row)
        })
    }
}

impl UserInterface for HeadlessInterface {
    fn id(&self) -> InterfaceId {
        self.id
    }

    fn backend(&self) -> BackendKind {
        self.backend
    }

    fn frame(&self) -> Rect {
        self.frame
    }

    fn set_frame(&mut self, frame: Rect) {
        self.frame = frame;
    }

    fn is_attached(&self) -> bool {
        self.attached
    }

    fn set_attached(&mut self, attached: bool) {
        self.attached = attached;
    }

    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn reload_data(&mut self, rows: Vec<RowView>) {
        self.rows = rows;
        self.pending_batch += 1;
    }

    fn insert_rows(&mut self, rows: Vec<(usize, RowView)>, animation: Animation) {
        let mut rows = rows;
        rows.sort_by_key(|(index, _)| *index);
        for (index, row) in rows {
            let index = index.min(self.rows.len());
            log::trace!("{} insert row {index} ({animation:?})", self.id);
            self.rows.insert(index, row);
            self.pending_batch += 1;
        }
    }

    fn delete_rows(&mut self, indices: &[usize], animation: Animation) {
        let mut indices = indices.to_vec();
        indices.sort_unstable_by(|a, b| b.cmp(a));
        indices.dedup();
        for index in indices {
            if index < self.rows.len() {
                log::trace!("{} delete row {index} ({animation:?})", self.id);
                self.rows.remove(index);
                self.pending_batch += 1;
            }
        }
    }

    fn reload_rows(&mut self, indices: &[usize], animation: Animation) {
        for index in indices.iter().filter(|index| **index < self.rows.len()) {
            log::trace!("{} reload row {index} ({animation:?})", self.id);
            self.pending_batch += 1;
        }
    }

    fn view(&self, index: usize) -> Option<&RowView> {
        self.rows.get(index)
    }

    fn view_mut(&mut self, index: usize) -> Option<&mut RowView> {
        self.rows.get_mut(index)
    }

    fn visible_views(&self) -> Vec<&RowView> {
        let bounds = Rect::from_size(self.frame.size);
        self.row_frames()
            .filter(|(frame, _)| frame.size.height <= 0.0 || bounds.intersects(frame))
            .map(|(_, row)| row)
            .collect()
    }

    fn perform_batch_updates(&mut self, completion: Completion) {
        self.pending_batch = 0;
        match &self.runtime {
            Some(runtime) => runtime.enqueue_task(completion),
            None => completion(),
        }
    }
}

/// Builds [`HeadlessInterface`]s, optionally bound to a runtime.
#[derive(Clone, Default)]
pub struct HeadlessInterfaceFactory {
    runtime: Option<RuntimeHandle>,
}

impl HeadlessInterfaceFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_runtime(runtime: RuntimeHandle) -> Self {
        Self {
            runtime: Some(runtime),
        }
    }
}

impl InterfaceFactory for HeadlessInterfaceFactory {
    fn make_interface(&self, backend: BackendKind) -> Box<dyn UserInterface> {
        match &self.runtime {
            Some(runtime) => Box::new(HeadlessInterface::with_runtime(backend, runtime.clone())),
            None => Box::new(HeadlessInterface::new(backend)),
        }
    }
}

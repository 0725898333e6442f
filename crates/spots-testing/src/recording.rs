use std::cell::RefCell;
use std::rc::Rc;

use spots_core::{
    Animation, BackendKind, Completion, HeadlessInterface, InterfaceFactory, InterfaceId, RowView,
    RuntimeHandle, UserInterface,
};
use spots_ui_graphics::Rect;

/// One mutation observed on a [`RecordingInterface`].
#[derive(Clone, Debug, PartialEq)]
pub enum Mutation {
    ReloadData { interface: InterfaceId, rows: usize },
    Insert { interface: InterfaceId, index: usize },
    Delete { interface: InterfaceId, index: usize },
    Reload { interface: InterfaceId, index: usize },
    Attached { interface: InterfaceId, attached: bool },
    Batch { interface: InterfaceId },
}

pub type MutationLog = Rc<RefCell<Vec<Mutation>>>;

/// Batch completions parked until a test releases them per interface.
pub type HeldBatches = Rc<RefCell<Vec<(InterfaceId, Completion)>>>;

/// Headless interface that appends every mutation to a shared log.
pub struct RecordingInterface {
    inner: HeadlessInterface,
    log: MutationLog,
    held: Option<HeldBatches>,
}

impl RecordingInterface {
    pub fn new(inner: HeadlessInterface, log: MutationLog) -> Self {
        Self {
            inner,
            log,
            held: None,
        }
    }

    /// Parks every batch completion in `held` instead of reporting it.
    pub fn holding(mut self, held: HeldBatches) -> Self {
        self.held = Some(held);
        self
    }

    fn record(&self, mutation: Mutation) {
        self.log.borrow_mut().push(mutation);
    }
}

impl UserInterface for RecordingInterface {
    fn id(&self) -> InterfaceId {
        self.inner.id()
    }

    fn backend(&self) -> BackendKind {
        self.inner.backend()
    }

    fn frame(&self) -> Rect {
        self.inner.frame()
    }

    fn set_frame(&mut self, frame: Rect) {
        self.inner.set_frame(frame);
    }

    fn is_attached(&self) -> bool {
        self.inner.is_attached()
    }

    fn set_attached(&mut self, attached: bool) {
        self.record(Mutation::Attached {
            interface: self.id(),
            attached,
        });
        self.inner.set_attached(attached);
    }

    fn row_count(&self) -> usize {
        self.inner.row_count()
    }

    fn reload_data(&mut self, rows: Vec<RowView>) {
        self.record(Mutation::ReloadData {
            interface: self.id(),
            rows: rows.len(),
        });
        self.inner.reload_data(rows);
    }

    fn insert_rows(&mut self, rows: Vec<(usize, RowView)>, animation: Animation) {
        let interface = self.id();
        for (index, _) in &rows {
            self.record(Mutation::Insert {
                interface,
                index: *index,
            });
        }
        self.inner.insert_rows(rows, animation);
    }

    fn delete_rows(&mut self, indices: &[usize], animation: Animation) {
        let interface = self.id();
        for &index in indices {
            self.record(Mutation::Delete { interface, index });
        }
        self.inner.delete_rows(indices, animation);
    }

    fn reload_rows(&mut self, indices: &[usize], animation: Animation) {
        let interface = self.id();
        for &index in indices {
            self.record(Mutation::Reload { interface, index });
        }
        self.inner.reload_rows(indices, animation);
    }

    fn view(&self, index: usize) -> Option<&RowView> {
        self.inner.view(index)
    }

    fn view_mut(&mut self, index: usize) -> Option<&mut RowView> {
        self.inner.view_mut(index)
    }

    fn visible_views(&self) -> Vec<&RowView> {
        self.inner.visible_views()
    }

    fn perform_batch_updates(&mut self, completion: Completion) {
        self.record(Mutation::Batch {
            interface: self.id(),
        });
        match &self.held {
            Some(held) => {
                held.borrow_mut().push((self.id(), completion));
                self.inner.perform_batch_updates(Box::new(|| {}));
            }
            None => self.inner.perform_batch_updates(completion),
        }
    }
}

/// Builds [`RecordingInterface`]s sharing one log.
#[derive(Clone, Default)]
pub struct RecordingInterfaceFactory {
    log: MutationLog,
    runtime: Option<RuntimeHandle>,
    held: Option<HeldBatches>,
}

impl RecordingInterfaceFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_runtime(runtime: RuntimeHandle) -> Self {
        Self {
            runtime: Some(runtime),
            ..Self::default()
        }
    }

    /// Interfaces built by this factory never report a batch finished on
    /// their own; see [`release`](Self::release).
    pub fn holding_batches() -> Self {
        Self {
            held: Some(HeldBatches::default()),
            ..Self::default()
        }
    }

    /// Batch completions still parked for `interface`.
    pub fn held(&self, interface: InterfaceId) -> usize {
        self.held.as_ref().map_or(0, |held| {
            held.borrow()
                .iter()
                .filter(|(owner, _)| *owner == interface)
                .count()
        })
    }

    /// Reports every parked batch of `interface` finished, oldest first.
    pub fn release(&self, interface: InterfaceId) -> usize {
        let Some(held) = &self.held else {
            return 0;
        };
        let released: Vec<Completion> = {
            let mut held = held.borrow_mut();
            let (released, kept) = std::mem::take(&mut *held)
                .into_iter()
                .partition::<Vec<_>, _>(|(owner, _)| *owner == interface);
            *held = kept;
            released.into_iter().map(|(_, completion)| completion).collect()
        };
        let count = released.len();
        for completion in released {
            completion();
        }
        count
    }

    pub fn log(&self) -> MutationLog {
        Rc::clone(&self.log)
    }

    pub fn take(&self) -> Vec<Mutation> {
        std::mem::take(&mut *self.log.borrow_mut())
    }
}

impl InterfaceFactory for RecordingInterfaceFactory {
    fn make_interface(&self, backend: BackendKind) -> Box<dyn UserInterface> {
        let inner = match &self.runtime {
            Some(runtime) => HeadlessInterface::with_runtime(backend, runtime.clone()),
            None => HeadlessInterface::new(backend),
        };
        let interface = RecordingInterface::new(inner, self.log());
        match &self.held {
            Some(held) => Box::new(interface.holding(Rc::clone(held))),
            None => Box::new(interface),
        }
    }
}

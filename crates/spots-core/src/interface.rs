//! The "user interface" capability a [`Component`](crate::Component) renders into.
//!
//! Concrete backends live outside this crate; [`HeadlessInterface`](crate::HeadlessInterface)
//! is the in-memory implementation used by tests and demos.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use spots_ui_graphics::{Rect, Size};

use crate::completion::Completion;
use crate::model::ComponentKind;
use crate::view::RowView;

static NEXT_INTERFACE_ID: AtomicUsize = AtomicUsize::new(1);

/// Stable identity of one interface instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InterfaceId(usize);

impl InterfaceId {
    pub fn next() -> Self {
        Self(NEXT_INTERFACE_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(self) -> usize {
        self.0
    }
}

impl fmt::Display for InterfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ui#{}", self.0)
    }
}

/// Rendering backend an interface was built with. Set at construction and
/// queried instead of inspecting concrete types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// Vertical rows, one per item. Row height carries the platform height offset.
    Table,
    /// Flowing cells laid out by span.
    Collection,
}

impl BackendKind {
    /// Backend used to render a resolved component kind.
    pub fn for_kind(kind: ComponentKind) -> Self {
        match kind {
            ComponentKind::List | ComponentKind::Component => BackendKind::Table,
            ComponentKind::Grid | ComponentKind::Carousel => BackendKind::Collection,
        }
    }
}

/// Row animation requested for a batch mutation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Animation {
    None,
    #[default]
    Automatic,
    Fade,
    Top,
    Bottom,
    Left,
    Right,
    Middle,
}

/// Something rows can be inserted into, removed from and reloaded in.
///
/// Mutations are collected into a batch that is committed by
/// [`perform_batch_updates`](UserInterface::perform_batch_updates). The
/// completion passed there must be invoked exactly once, either immediately
/// or after the backend's own layout pass has finished.
pub trait UserInterface {
    fn id(&self) -> InterfaceId;

    fn backend(&self) -> BackendKind;

    fn frame(&self) -> Rect;

    fn set_frame(&mut self, frame: Rect);

    fn resize(&mut self, size: Size) {
        let mut frame = self.frame();
        frame.size = size;
        self.set_frame(frame);
    }

    /// True once the interface has been placed in a visual hierarchy.
    fn is_attached(&self) -> bool;

    fn set_attached(&mut self, attached: bool);

    fn row_count(&self) -> usize;

    /// Replaces every row without animation.
    fn reload_data(&mut self, rows: Vec<RowView>);

    /// Inserts rows; indices refer to positions after the insertion and are
    /// applied lowest first.
    fn insert_rows(&mut self, rows: Vec<(usize, RowView)>, animation: Animation);

    /// Removes rows; indices are applied highest first.
    fn delete_rows(&mut self, indices: &[usize], animation: Animation);

    /// Marks rows whose views were reconfigured in place.
    fn reload_rows(&mut self, indices: &[usize], animation: Animation);

    fn view(&self, index: usize) -> Option<&RowView>;

    fn view_mut(&mut self, index: usize) -> Option<&mut RowView>;

    /// Row views currently intersecting the visible bounds.
    fn visible_views(&self) -> Vec<&RowView>;

    /// Commits the pending batch and reports completion.
    fn perform_batch_updates(&mut self, completion: Completion);
}

impl fmt::Debug for dyn UserInterface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserInterface")
            .field("id", &self.id())
            .field("backend", &self.backend())
            .field("frame", &self.frame())
            .field("rows", &self.row_count())
            .finish()
    }
}

/// Creates user-interface instances for a backend kind.
pub trait InterfaceFactory {
    fn make_interface(&self, backend: BackendKind) -> Box<dyn UserInterface>;
}

//! Row views: the "item-configurable cell" capability and the composite row.

use std::fmt;

use spots_ui_graphics::{Point, Rect, Size};

use crate::component::CompositeComponent;
use crate::interface::{BackendKind, InterfaceId};
use crate::item::Item;

/// A cell that can render an [`Item`].
///
/// `configure` returns the item as rendered, usually with its `size` filled
/// in. A zero height means "use [`preferred_view_size`](Self::preferred_view_size)".
pub trait ItemConfigurable {
    fn configure(&mut self, item: &Item) -> Item;

    fn preferred_view_size(&self) -> Size;

    fn prepare_for_reuse(&mut self) {}
}

/// Cell used when no view is registered for an item kind.
#[derive(Clone, Debug)]
pub struct DefaultItemView {
    preferred_size: Size,
    title: String,
    subtitle: String,
}

impl DefaultItemView {
    pub const DEFAULT_HEIGHT: f32 = 44.0;

    pub fn new() -> Self {
        Self::with_preferred_size(Size::new(0.0, Self::DEFAULT_HEIGHT))
    }

    pub fn with_preferred_size(preferred_size: Size) -> Self {
        Self {
            preferred_size,
            title: String::new(),
            subtitle: String::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn subtitle(&self) -> &str {
        &self.subtitle
    }
}

impl Default for DefaultItemView {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemConfigurable for DefaultItemView {
    fn configure(&mut self, item: &Item) -> Item {
        self.title = item.title.clone();
        self.subtitle = item.subtitle.clone();
        item.clone()
    }

    fn preferred_view_size(&self) -> Size {
        self.preferred_size
    }

    fn prepare_for_reuse(&mut self) {
        self.title.clear();
        self.subtitle.clear();
    }
}

/// A child placed inside a composite row.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Subview {
    pub interface: InterfaceId,
    pub backend: BackendKind,
    pub frame: Rect,
    mounted: bool,
}

impl Subview {
    /// A subview the row does not manage; it survives reuse.
    pub fn foreign(interface: InterfaceId, backend: BackendKind, frame: Rect) -> Self {
        Self {
            interface,
            backend,
            frame,
            mounted: false,
        }
    }

    pub fn is_mounted_component(&self) -> bool {
        self.mounted
    }
}

/// Row view hosting the interfaces of the composite components mounted in it.
///
/// Children are stacked vertically in mount order. The row holds only
/// identities of the child interfaces; the owning [`Component`](crate::Component)
/// keeps the children alive.
#[derive(Clone, Debug, Default)]
pub struct CompositeView {
    subviews: Vec<Subview>,
    size: Size,
}

impl CompositeView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subviews(&self) -> &[Subview] {
        &self.subviews
    }

    pub fn add_subview(&mut self, subview: Subview) {
        self.subviews.push(subview);
    }

    /// Drops every mounted component subview, keeping foreign ones.
    pub fn prepare_for_reuse(&mut self) {
        self.subviews.retain(|subview| !subview.mounted);
        self.size = Size::ZERO;
    }

    /// Mounts `composites` as subviews, tearing down stale mounts first, and
    /// returns `item` sized to the stacked height of its children.
    pub fn configure(&mut self, item: &Item, composites: Option<&[CompositeComponent]>) -> Item {
        self.prepare_for_reuse();
        let mut offset = 0.0f32;
        let mut width = item.size.width;
        for composite in composites.unwrap_or_default() {
            let frame = composite.component.view_frame();
            let placed = Rect {
                origin: Point::new(0.0, offset),
                size: frame.size,
            };
            self.subviews.push(Subview {
                interface: composite.component.interface_id(),
                backend: composite.component.backend(),
                frame: placed,
                mounted: true,
            });
            offset += frame.height();
            width = width.max(frame.width());
        }
        self.size = Size::new(width, offset);
        let mut configured = item.clone();
        configured.size = self.size;
        configured
    }

    pub fn preferred_view_size(&self) -> Size {
        self.size
    }
}

/// The live view of one row.
pub enum RowView {
    Item(Box<dyn ItemConfigurable>),
    Composite(CompositeView),
}

impl RowView {
    pub fn preferred_view_size(&self) -> Size {
        match self {
            RowView::Item(view) => view.preferred_view_size(),
            RowView::Composite(view) => view.preferred_view_size(),
        }
    }

    pub fn is_composite(&self) -> bool {
        matches!(self, RowView::Composite(_))
    }

    pub fn as_composite(&self) -> Option<&CompositeView> {
        match self {
            RowView::Composite(view) => Some(view),
            RowView::Item(_) => None,
        }
    }

    pub fn as_composite_mut(&mut self) -> Option<&mut CompositeView> {
        match self {
            RowView::Composite(view) => Some(view),
            RowView::Item(_) => None,
        }
    }

    pub fn as_item_configurable(&self) -> Option<&dyn ItemConfigurable> {
        match self {
            RowView::Item(view) => Some(view.as_ref()),
            RowView::Composite(_) => None,
        }
    }
}

impl fmt::Debug for RowView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowView::Item(view) => f
                .debug_struct("RowView::Item")
                .field("preferred_view_size", &view.preferred_view_size())
                .finish(),
            RowView::Composite(view) => f.debug_tuple("RowView::Composite").field(view).finish(),
        }
    }
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;

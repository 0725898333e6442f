//! Live components: a model, the interface it renders into, and the
//! components mounted inside its composite rows.

use std::cell::{Ref, RefCell};
use std::fmt;
use std::ops::Range;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicUsize, Ordering};

use spots_ui_graphics::{Point, Rect, Size};

use crate::completion::CompletionGroup;
use crate::configuration::Configuration;
use crate::diff::{diff, ChangeSet, ComponentChange};
use crate::error::{report, SpotsError};
use crate::interface::{BackendKind, InterfaceId, UserInterface};
use crate::item::Item;
use crate::model::{ComponentKind, ComponentModel, Layout};
use crate::sizing::{content_size, item_width};
use crate::view::RowView;

static NEXT_COMPONENT_ID: AtomicUsize = AtomicUsize::new(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(usize);

impl ComponentId {
    fn next() -> Self {
        Self(NEXT_COMPONENT_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(self) -> usize {
        self.0
    }
}

struct ComponentInner {
    id: ComponentId,
    model: ComponentModel,
    user_interface: Box<dyn UserInterface>,
    /// Sorted by `(item_index, child_index)`.
    composite_components: Vec<CompositeComponent>,
    configuration: Rc<Configuration>,
    parent: Option<WeakComponent>,
    /// Called instead of a parent when a top-level component changes size.
    resize_hook: Option<ResizeHook>,
    container_width: f32,
    content_size: Size,
    is_setup: bool,
}

/// Callback a top-level component uses to tell its owner its frame changed.
pub(crate) type ResizeHook = Rc<dyn Fn()>;

/// Handle to a live component. Cloning the handle does not clone the component.
#[derive(Clone)]
pub struct Component {
    inner: Rc<RefCell<ComponentInner>>,
}

/// Non-owning reference to a [`Component`].
#[derive(Clone)]
pub struct WeakComponent(Weak<RefCell<ComponentInner>>);

impl WeakComponent {
    pub fn upgrade(&self) -> Option<Component> {
        self.0.upgrade().map(|inner| Component { inner })
    }
}

impl fmt::Debug for WeakComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = self
            .0
            .upgrade()
            .and_then(|inner| inner.try_borrow().ok().map(|inner| inner.id));
        f.debug_tuple("WeakComponent").field(&id).finish()
    }
}

/// A component mounted inside one row of its parent.
#[derive(Clone, Debug)]
pub struct CompositeComponent {
    pub component: Component,
    /// Never keeps the parent alive.
    pub parent_component: WeakComponent,
    pub item_index: usize,
    pub child_index: usize,
}

impl CompositeComponent {
    pub fn parent(&self) -> Option<Component> {
        self.parent_component.upgrade()
    }
}

impl Component {
    pub fn new(model: ComponentModel, configuration: Rc<Configuration>) -> Self {
        let user_interface = configuration.make_interface(model.kind);
        Self {
            inner: Rc::new(RefCell::new(ComponentInner {
                id: ComponentId::next(),
                model,
                user_interface,
                composite_components: Vec::new(),
                configuration,
                parent: None,
                resize_hook: None,
                container_width: 0.0,
                content_size: Size::ZERO,
                is_setup: false,
            })),
        }
    }

    pub fn downgrade(&self) -> WeakComponent {
        WeakComponent(Rc::downgrade(&self.inner))
    }

    pub fn id(&self) -> ComponentId {
        self.inner.borrow().id
    }

    pub fn model(&self) -> ComponentModel {
        self.inner.borrow().model.clone()
    }

    pub fn with_model<R>(&self, f: impl FnOnce(&ComponentModel) -> R) -> R {
        f(&self.inner.borrow().model)
    }

    pub fn kind(&self) -> ComponentKind {
        self.inner.borrow().model.kind
    }

    pub fn item_count(&self) -> usize {
        self.inner.borrow().model.items.len()
    }

    pub fn is_setup(&self) -> bool {
        self.inner.borrow().is_setup
    }

    pub fn user_interface(&self) -> Ref<'_, dyn UserInterface + 'static> {
        Ref::map(self.inner.borrow(), |inner| &*inner.user_interface)
    }

    pub fn interface_id(&self) -> InterfaceId {
        self.inner.borrow().user_interface.id()
    }

    pub fn backend(&self) -> BackendKind {
        self.inner.borrow().user_interface.backend()
    }

    pub fn view_frame(&self) -> Rect {
        self.inner.borrow().user_interface.frame()
    }

    pub fn content_size(&self) -> Size {
        self.inner.borrow().content_size
    }

    pub fn is_attached(&self) -> bool {
        self.inner.borrow().user_interface.is_attached()
    }

    pub fn attach(&self) {
        self.inner.borrow_mut().user_interface.set_attached(true);
    }

    /// Skipped while the component is borrowed elsewhere.
    pub(crate) fn set_origin(&self, origin: Point) {
        let Ok(mut inner) = self.inner.try_borrow_mut() else {
            return;
        };
        let mut frame = inner.user_interface.frame();
        frame.origin = origin;
        inner.user_interface.set_frame(frame);
    }

    pub fn composite_components(&self) -> Ref<'_, [CompositeComponent]> {
        Ref::map(self.inner.borrow(), |inner| inner.composite_components.as_slice())
    }

    /// Components mounted in the row at `item_index`, in child order.
    pub fn composites_at(&self, item_index: usize) -> Vec<CompositeComponent> {
        let inner = self.inner.borrow();
        inner.composite_components[inner.composite_range(item_index)].to_vec()
    }

    /// The component this one is mounted in, if it is a composite child and
    /// the parent is still alive.
    pub fn parent(&self) -> Option<Component> {
        self.inner.borrow().parent.as_ref().and_then(WeakComponent::upgrade)
    }

    /// Live view of row `index`; `None` when out of range or not realized.
    pub fn ui(&self, index: usize) -> Option<Ref<'_, RowView>> {
        Ref::filter_map(self.inner.borrow(), |inner| inner.user_interface.view(index)).ok()
    }

    /// Binds the interface to `size` and realizes every row.
    ///
    /// Calling it again re-lays out at the new width; composite children are
    /// reused, never duplicated.
    pub fn setup(&self, size: Size) {
        let group = CompletionGroup::new();
        self.setup_with(size, &group);
        group.notify(|| {});
    }

    pub(crate) fn setup_with(&self, size: Size, group: &CompletionGroup) {
        let weak = self.downgrade();
        {
            let mut inner = self.inner.borrow_mut();
            inner.container_width = size.width;
            if inner.is_setup {
                inner.relayout(group);
            } else {
                inner.is_setup = true;
                for index in 0..inner.model.items.len() {
                    inner.mount_composites(index, &weak, group);
                }
                let rows = inner.build_rows();
                inner.user_interface.reload_data(rows);
            }
            inner.update_frame();
            inner.user_interface.perform_batch_updates(group.enter());
        }
        self.notify_parent(group);
    }

    /// Diffs the current model against `model`, applies the differences to
    /// the interface and composite children, and calls `completion` once the
    /// interface reports its batch finished.
    pub fn reload_if_needed(&self, model: ComponentModel, completion: impl FnOnce() + 'static) {
        let changes = {
            let inner = self.inner.borrow();
            (inner.model != model).then(|| diff(&inner.model, &model))
        };
        match changes {
            Some(changes) if !changes.is_empty() => {
                let group = CompletionGroup::new();
                self.apply(model, &changes, &group);
                group.notify(completion);
            }
            _ => completion(),
        }
    }

    /// Re-diffs the children of the composite row at `item_index` against
    /// `children`.
    pub fn reload_composite(
        &self,
        item_index: usize,
        children: Vec<ComponentModel>,
        completion: impl FnOnce() + 'static,
    ) {
        let mut model = self.model();
        match model.items.get_mut(item_index) {
            Some(item) if item.is_composite() => item.children = children,
            Some(item) => *item = Item::composite(children),
            None => {
                log::warn!(
                    "{}",
                    SpotsError::IndexOutOfRange {
                        index: item_index,
                        len: model.items.len()
                    }
                );
                completion();
                return;
            }
        }
        self.reload_if_needed(model, completion);
    }

    /// Pairs `children` with the composite rows in order: each composite row
    /// mounts the next model, surplus composite rows are dropped and extra
    /// models are appended as new composite rows. Plain rows stay in place.
    pub fn reload(&self, children: Vec<ComponentModel>, completion: impl FnOnce() + 'static) {
        let mut model = self.model();
        let mut children = children.into_iter();
        let items = std::mem::take(&mut model.items);
        for mut item in items {
            if !item.is_composite() {
                model.items.push(item);
            } else if let Some(child) = children.next() {
                item.children = vec![child];
                model.items.push(item);
            }
        }
        model.add_children(children);
        self.reload_if_needed(model, completion);
    }

    pub fn append(&self, items: Vec<Item>, completion: impl FnOnce() + 'static) {
        let mut model = self.model();
        model.items.extend(items);
        self.reload_if_needed(model, completion);
    }

    pub fn insert(&self, item: Item, index: usize, completion: impl FnOnce() + 'static) {
        let mut model = self.model();
        if index > model.items.len() {
            log::warn!(
                "insert skipped: {}",
                SpotsError::IndexOutOfRange {
                    index,
                    len: model.items.len()
                }
            );
            completion();
            return;
        }
        model.items.insert(index, item);
        self.reload_if_needed(model, completion);
    }

    pub fn update(&self, item: Item, index: usize, completion: impl FnOnce() + 'static) {
        let mut model = self.model();
        let len = model.items.len();
        match model.items.get_mut(index) {
            Some(slot) => *slot = item,
            None => {
                log::warn!("update skipped: {}", SpotsError::IndexOutOfRange { index, len });
                completion();
                return;
            }
        }
        self.reload_if_needed(model, completion);
    }

    pub fn delete(&self, index: usize, completion: impl FnOnce() + 'static) {
        let mut model = self.model();
        if index >= model.items.len() {
            log::warn!(
                "delete skipped: {}",
                SpotsError::IndexOutOfRange {
                    index,
                    len: model.items.len()
                }
            );
            completion();
            return;
        }
        model.items.remove(index);
        self.reload_if_needed(model, completion);
    }

    /// Applies a precomputed change-set. `model` becomes the component's model.
    pub(crate) fn apply(&self, model: ComponentModel, changes: &ChangeSet, group: &CompletionGroup) {
        let weak = self.downgrade();
        {
            let mut inner = self.inner.borrow_mut();
            if !inner.is_setup {
                inner.model = model;
                return;
            }
            if changes.kind_changed {
                log::warn!(
                    "{:?} changed kind from {} to {}; rebuilding rows in place",
                    inner.id,
                    inner.model.kind,
                    model.kind
                );
                inner.rebuild(model, &weak, group);
            } else {
                inner.apply_changes(model, changes, &weak, group);
            }
            inner.update_frame();
            inner.user_interface.perform_batch_updates(group.enter());
        }
        self.notify_parent(group);
    }

    /// Brings a reused composite child up to date with `model` at `width`.
    fn update_with(&self, model: ComponentModel, width: f32, group: &CompletionGroup) {
        let needs_layout = {
            let inner = self.inner.borrow();
            inner.container_width != width
        };
        if needs_layout {
            self.setup_with(Size::new(width, 0.0), group);
        }
        let changes = {
            let inner = self.inner.borrow();
            (inner.model != model).then(|| diff(&inner.model, &model))
        };
        if let Some(changes) = changes {
            self.apply(model, &changes, group);
        }
    }

    /// Releases the interface and every composite child, transitively.
    pub(crate) fn teardown(&self) {
        let composites = {
            let mut inner = self.inner.borrow_mut();
            inner.parent = None;
            inner.resize_hook = None;
            inner.user_interface.set_attached(false);
            inner.user_interface.reload_data(Vec::new());
            std::mem::take(&mut inner.composite_components)
        };
        for composite in composites {
            composite.component.teardown();
        }
    }

    pub(crate) fn set_resize_hook(&self, hook: Option<ResizeHook>) {
        self.inner.borrow_mut().resize_hook = hook;
    }

    fn notify_parent(&self, group: &CompletionGroup) {
        let (parent, hook, id) = {
            let inner = self.inner.borrow();
            (
                inner.parent.as_ref().and_then(WeakComponent::upgrade),
                inner.resize_hook.clone(),
                inner.id,
            )
        };
        match (parent, hook) {
            (Some(parent), _) => parent.child_did_resize(id, group),
            (None, Some(hook)) => hook(),
            (None, None) => {}
        }
    }

    /// Syncs the child's model into the hosting row and recomputes its height.
    /// Skipped while this component is itself applying changes; it recomputes
    /// afterwards.
    fn child_did_resize(&self, child: ComponentId, group: &CompletionGroup) {
        {
            let Ok(mut inner) = self.inner.try_borrow_mut() else {
                return;
            };
            let Some((item_index, child_index, model)) = inner
                .composite_components
                .iter()
                .find(|composite| composite.component.id() == child)
                .map(|composite| {
                    (
                        composite.item_index,
                        composite.child_index,
                        composite.component.model(),
                    )
                })
            else {
                return;
            };
            if let Some(slot) = inner
                .model
                .items
                .get_mut(item_index)
                .and_then(|item| item.children.get_mut(child_index))
            {
                *slot = model;
            }
            inner.rerender_row(item_index);
            inner.update_frame();
            let animation = inner.configuration.animation;
            inner.user_interface.reload_rows(&[item_index], animation);
            inner.user_interface.perform_batch_updates(group.enter());
        }
        self.notify_parent(group);
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_borrow() {
            Ok(inner) => f
                .debug_struct("Component")
                .field("id", &inner.id)
                .field("kind", &inner.model.kind)
                .field("items", &inner.model.items.len())
                .field("composites", &inner.composite_components.len())
                .field("frame", &inner.user_interface.frame())
                .finish(),
            Err(_) => f.debug_struct("Component").finish_non_exhaustive(),
        }
    }
}

impl ComponentInner {
    fn resolved_kind(&self) -> ComponentKind {
        self.configuration.resolve_kind(self.model.kind)
    }

    fn composite_range(&self, item_index: usize) -> Range<usize> {
        let start = self
            .composite_components
            .partition_point(|composite| composite.item_index < item_index);
        let end = self
            .composite_components
            .partition_point(|composite| composite.item_index <= item_index);
        start..end
    }

    fn row_width(&self) -> f32 {
        item_width(
            self.resolved_kind(),
            &self.model.layout,
            self.container_width,
            Size::ZERO,
        )
    }

    fn make_composite(
        &self,
        item_index: usize,
        child_index: usize,
        model: ComponentModel,
        width: f32,
        parent: &WeakComponent,
        group: &CompletionGroup,
    ) -> CompositeComponent {
        let component = Component::new(model, Rc::clone(&self.configuration));
        component.inner.borrow_mut().parent = Some(parent.clone());
        component.setup_with(Size::new(width, 0.0), group);
        component.attach();
        log::trace!(
            "{:?} mounted {:?} at item {item_index}, child {child_index}",
            self.id,
            component.id()
        );
        CompositeComponent {
            component,
            parent_component: parent.clone(),
            item_index,
            child_index,
        }
    }

    fn mount_composites(&mut self, item_index: usize, parent: &WeakComponent, group: &CompletionGroup) {
        let children = match self.model.items.get(item_index) {
            Some(item) if item.is_composite() => item.children.clone(),
            _ => return,
        };
        let width = self.row_width();
        let start = self.composite_range(item_index).start;
        let mounted: Vec<CompositeComponent> = children
            .into_iter()
            .enumerate()
            .map(|(child_index, child)| {
                self.make_composite(item_index, child_index, child, width, parent, group)
            })
            .collect();
        self.composite_components.splice(start..start, mounted);
    }

    fn unmount_composites(&mut self, item_index: usize) {
        let range = self.composite_range(item_index);
        for composite in self.composite_components.drain(range).collect::<Vec<_>>() {
            composite.component.teardown();
        }
    }

    /// Moves every composite at or after `from` by `delta` rows.
    fn shift_composites(&mut self, from: usize, delta: isize) {
        for composite in self
            .composite_components
            .iter_mut()
            .filter(|composite| composite.item_index >= from)
        {
            composite.item_index = composite.item_index.saturating_add_signed(delta);
        }
    }

    /// Matches the mounts of row `item_index` to its current children slot
    /// by slot, reusing a mount when the kinds agree.
    fn reconcile_composites(&mut self, item_index: usize, parent: &WeakComponent, group: &CompletionGroup) {
        let range = self.composite_range(item_index);
        let start = range.start;
        let existing: Vec<CompositeComponent> = self.composite_components.drain(range).collect();
        let children = match self.model.items.get(item_index) {
            Some(item) if item.is_composite() => item.children.clone(),
            _ => Vec::new(),
        };
        let width = self.row_width();
        let mut existing = existing.into_iter();
        let mut mounted = Vec::with_capacity(children.len());
        for (child_index, child) in children.into_iter().enumerate() {
            match existing.next() {
                Some(slot) if slot.component.kind() == child.kind => {
                    slot.component.update_with(child, width, group);
                    mounted.push(CompositeComponent {
                        item_index,
                        child_index,
                        ..slot
                    });
                }
                stale => {
                    if let Some(stale) = stale {
                        stale.component.teardown();
                    }
                    mounted.push(self.make_composite(item_index, child_index, child, width, parent, group));
                }
            }
        }
        for stale in existing {
            stale.component.teardown();
        }
        self.composite_components.splice(start..start, mounted);
    }

    fn apply_composite_changes(
        &mut self,
        item_index: usize,
        changes: &[ComponentChange],
        parent: &WeakComponent,
        group: &CompletionGroup,
    ) -> Result<(), SpotsError> {
        let children = match self.model.items.get(item_index) {
            Some(item) => item.children.clone(),
            None => {
                return Err(SpotsError::IndexOutOfRange {
                    index: item_index,
                    len: self.model.items.len(),
                })
            }
        };
        let width = self.row_width();
        let range = self.composite_range(item_index);
        let start = range.start;
        let mut slots: Vec<CompositeComponent> = self.composite_components.drain(range).collect();
        let mut failure = None;
        let missing = |child_index| SpotsError::MissingComposite {
            item_index,
            child_index,
        };

        let mut removals: Vec<usize> = changes
            .iter()
            .filter_map(|change| match change {
                ComponentChange::Removed { index } => Some(*index),
                _ => None,
            })
            .collect();
        removals.sort_unstable_by(|a, b| b.cmp(a));
        for child_index in removals {
            if child_index < slots.len() {
                slots.remove(child_index).component.teardown();
            } else {
                failure.get_or_insert(missing(child_index));
            }
        }

        for change in changes {
            match change {
                ComponentChange::Replace { index } => {
                    match (slots.get(*index).cloned(), children.get(*index)) {
                        (Some(stale), Some(child)) => {
                            stale.component.teardown();
                            slots[*index] = self.make_composite(
                                item_index,
                                *index,
                                child.clone(),
                                width,
                                parent,
                                group,
                            );
                        }
                        _ => {
                            failure.get_or_insert(missing(*index));
                        }
                    }
                }
                // The child may have been edited on its own since the parent's
                // model was last synced, so diff against its live model.
                ComponentChange::Reload { index, .. } => match (slots.get(*index), children.get(*index)) {
                    (Some(slot), Some(child)) => {
                        slot.component.update_with(child.clone(), width, group);
                    }
                    _ => {
                        failure.get_or_insert(missing(*index));
                    }
                },
                ComponentChange::New { .. } | ComponentChange::Removed { .. } => {}
            }
        }

        let mut insertions: Vec<usize> = changes
            .iter()
            .filter_map(|change| match change {
                ComponentChange::New { index } => Some(*index),
                _ => None,
            })
            .collect();
        insertions.sort_unstable();
        for child_index in insertions {
            match children.get(child_index) {
                Some(child) => {
                    let mounted = self.make_composite(
                        item_index,
                        child_index,
                        child.clone(),
                        width,
                        parent,
                        group,
                    );
                    slots.insert(child_index.min(slots.len()), mounted);
                }
                None => {
                    failure.get_or_insert(missing(child_index));
                }
            }
        }

        for (child_index, slot) in slots.iter_mut().enumerate() {
            slot.item_index = item_index;
            slot.child_index = child_index;
        }
        let found = slots.len();
        self.composite_components.splice(start..start, slots);

        if let Some(failure) = failure {
            return Err(failure);
        }
        if found != children.len() {
            return Err(SpotsError::CompositeMismatch {
                item_index,
                expected: children.len(),
                found,
            });
        }
        Ok(())
    }

    fn apply_changes(
        &mut self,
        model: ComponentModel,
        changes: &ChangeSet,
        parent: &WeakComponent,
        group: &CompletionGroup,
    ) {
        let animation = self.configuration.animation;
        let mut model = model;
        for (item, previous) in model.items.iter_mut().zip(self.model.items.iter()) {
            if item == previous {
                item.size = previous.size;
            }
        }
        self.model = model;

        let deletions = changes.deletions();
        for &index in &deletions {
            self.unmount_composites(index);
            self.shift_composites(index + 1, -1);
        }
        if !deletions.is_empty() {
            self.user_interface.delete_rows(&deletions, animation);
        }

        let insertions = changes.insertions();
        let mut inserted = Vec::with_capacity(insertions.len());
        for &index in &insertions {
            self.shift_composites(index, 1);
            self.mount_composites(index, parent, group);
            if let Some(view) = self.render_new_row(index) {
                inserted.push((index, view));
            }
        }
        if !inserted.is_empty() {
            self.user_interface.insert_rows(inserted, animation);
        }

        let mut reloaded = changes.reloads();
        for &index in &reloaded {
            self.reconcile_composites(index, parent, group);
            self.replace_row(index);
        }

        for (index, child_changes) in changes.composites() {
            if let Err(err) = self.apply_composite_changes(index, child_changes, parent, group) {
                report("composite apply", &err);
                self.reconcile_composites(index, parent, group);
            }
            self.rerender_row(index);
            reloaded.push(index);
        }

        if changes.layout_changed {
            self.relayout(group);
        } else if !reloaded.is_empty() {
            reloaded.sort_unstable();
            self.user_interface.reload_rows(&reloaded, animation);
        }

        log::trace!(
            "{:?} applied -{} +{} ~{}",
            self.id,
            deletions.len(),
            insertions.len(),
            reloaded.len()
        );
    }

    fn rebuild(&mut self, model: ComponentModel, parent: &WeakComponent, group: &CompletionGroup) {
        for composite in std::mem::take(&mut self.composite_components) {
            composite.component.teardown();
        }
        self.model = model;
        for index in 0..self.model.items.len() {
            self.mount_composites(index, parent, group);
        }
        let rows = self.build_rows();
        self.user_interface.reload_data(rows);
    }

    /// Re-lays out every row and composite child at the current width.
    fn relayout(&mut self, group: &CompletionGroup) {
        let width = self.row_width();
        for composite in &self.composite_components {
            composite.component.setup_with(Size::new(width, 0.0), group);
        }
        let count = self.model.items.len();
        for index in 0..count {
            self.rerender_row(index);
        }
        let animation = self.configuration.animation;
        let indices: Vec<usize> = (0..count).collect();
        self.user_interface.reload_rows(&indices, animation);
    }

    fn build_rows(&mut self) -> Vec<RowView> {
        (0..self.model.items.len())
            .filter_map(|index| self.render_new_row(index))
            .collect()
    }

    fn render_new_row(&mut self, index: usize) -> Option<RowView> {
        let kind = self.resolved_kind();
        let range = self.composite_range(index);
        let ComponentInner {
            model,
            composite_components,
            configuration,
            container_width,
            ..
        } = self;
        let item = model.items.get_mut(index)?;
        let mut view = configuration.make_view(&item.kind);
        render_row(
            kind,
            &model.layout,
            *container_width,
            item,
            &composite_components[range],
            &mut view,
        );
        Some(view)
    }

    /// Swaps in a freshly built view for a row whose item changed.
    fn replace_row(&mut self, index: usize) {
        let Some(view) = self.render_new_row(index) else {
            report(
                "row replace",
                &SpotsError::IndexOutOfRange {
                    index,
                    len: self.model.items.len(),
                },
            );
            return;
        };
        match self.user_interface.view_mut(index) {
            Some(slot) => *slot = view,
            None => report(
                "row replace",
                &SpotsError::IndexOutOfRange {
                    index,
                    len: self.user_interface.row_count(),
                },
            ),
        }
    }

    /// Reconfigures the existing view of a row in place.
    fn rerender_row(&mut self, index: usize) {
        let kind = self.resolved_kind();
        let range = self.composite_range(index);
        let ComponentInner {
            model,
            user_interface,
            composite_components,
            container_width,
            ..
        } = self;
        let (Some(item), Some(view)) = (model.items.get_mut(index), user_interface.view_mut(index)) else {
            return;
        };
        render_row(
            kind,
            &model.layout,
            *container_width,
            item,
            &composite_components[range],
            view,
        );
    }

    /// Recomputes the content size and resizes the interface to it.
    fn update_frame(&mut self) {
        self.content_size = content_size(
            self.resolved_kind(),
            &self.model.layout,
            &self.model.items,
            self.container_width,
            self.configuration.height_offset,
        );
        let size = Size::new(self.container_width, self.content_size.height);
        self.user_interface.resize(size);
    }
}

/// Configures `view` with `item` and stores the rendered size back on `item`.
fn render_row(
    kind: ComponentKind,
    layout: &Layout,
    container_width: f32,
    item: &mut Item,
    composites: &[CompositeComponent],
    view: &mut RowView,
) {
    match view {
        RowView::Composite(composite_view) => {
            let width = item_width(kind, layout, container_width, Size::ZERO);
            let mut sized = item.clone();
            sized.size.width = width;
            let configured = composite_view.configure(&sized, Some(composites));
            item.size = Size::new(width, configured.size.height);
        }
        RowView::Item(cell) => {
            let preferred = cell.preferred_view_size();
            let width = item_width(kind, layout, container_width, preferred);
            let mut sized = item.clone();
            sized.size.width = width;
            let configured = cell.configure(&sized);
            let height = if configured.size.height > 0.0 {
                configured.size.height
            } else {
                preferred.height
            };
            item.size = Size::new(width, height);
        }
    }
}

/// Shared by [`Controller`](crate::Controller) when it builds components.
pub(crate) fn mount_top_level(component: &Component, size: Size, group: &CompletionGroup) {
    component.setup_with(size, group);
    component.attach();
}

#[cfg(test)]
#[path = "tests/component_tests.rs"]
mod tests;

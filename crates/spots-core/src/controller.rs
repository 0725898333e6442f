use std::cell::{Cell, RefCell};
use std::rc::Rc;

use spots_ui_graphics::{Point, Size};

use crate::completion::CompletionGroup;
use crate::component::{mount_top_level, Component, ResizeHook, WeakComponent};
use crate::configuration::Configuration;
use crate::diff::{diff_components, ComponentChange};
use crate::model::ComponentModel;

/// Owns the ordered top-level components and reconciles them against new
/// model lists.
///
/// Components are stacked vertically in order; [`content_size`](Self::content_size)
/// is the sum of their heights.
pub struct Controller {
    configuration: Rc<Configuration>,
    components: Vec<Component>,
    size: Size,
    stack: Rc<Stack>,
    prepared: bool,
    /// Reloads whose completion has not fired yet.
    reloading: Rc<Cell<usize>>,
}

/// Vertical placement of the top-level components. Shared with the
/// components through their resize hooks so a direct edit restacks.
#[derive(Default)]
struct Stack {
    order: RefCell<Vec<WeakComponent>>,
    width: Cell<f32>,
    content_size: Cell<Size>,
}

impl Stack {
    fn layout(&self) {
        let Ok(order) = self.order.try_borrow() else {
            return;
        };
        let mut offset = 0.0f32;
        for component in order.iter().filter_map(WeakComponent::upgrade) {
            component.set_origin(Point::new(0.0, offset));
            offset += component.view_frame().height();
        }
        self.content_size.set(Size::new(self.width.get(), offset));
    }
}

impl Controller {
    /// Builds one component per model. Nothing is rendered until
    /// [`prepare`](Self::prepare).
    pub fn new(models: Vec<ComponentModel>, configuration: Rc<Configuration>) -> Self {
        let mut controller = Self {
            configuration,
            components: Vec::with_capacity(models.len()),
            size: Size::ZERO,
            stack: Rc::new(Stack::default()),
            prepared: false,
            reloading: Rc::new(Cell::new(0)),
        };
        for model in models {
            let component = Component::new(model, Rc::clone(&controller.configuration));
            component.set_resize_hook(Some(controller.resize_hook()));
            controller.components.push(component);
        }
        controller.layout_components();
        controller
    }

    /// Sets up and attaches every component at `size`.
    pub fn prepare(&mut self, size: Size) {
        self.size = size;
        self.prepared = true;
        let group = CompletionGroup::new();
        for component in &self.components {
            mount_top_level(component, size, &group);
        }
        self.layout_components();
        group.notify(|| {});
        log::debug!(
            "controller prepared {} components at {:?}",
            self.components.len(),
            size
        );
    }

    /// Re-lays out every component at a new width.
    pub fn resize(&mut self, size: Size) {
        if !self.prepared {
            self.prepare(size);
            return;
        }
        self.size = size;
        let group = CompletionGroup::new();
        for component in &self.components {
            component.setup_with(size, &group);
        }
        self.layout_components();
        group.notify(|| {});
    }

    pub fn configuration(&self) -> &Rc<Configuration> {
        &self.configuration
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn component(&self, index: usize) -> Option<&Component> {
        self.components.get(index)
    }

    pub fn models(&self) -> Vec<ComponentModel> {
        self.components.iter().map(Component::model).collect()
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn content_size(&self) -> Size {
        self.stack.content_size.get()
    }

    /// True while any reload that changed something is waiting for its
    /// completion.
    pub fn is_reloading(&self) -> bool {
        self.reloading.get() > 0
    }

    /// Diffs the current models against `models` and applies the result.
    ///
    /// `completion` runs exactly once: immediately when nothing differs,
    /// otherwise after every interface touched by the reload has finished its
    /// batch. Afterwards the component list mirrors `models` one to one.
    pub fn reload_if_needed(&mut self, models: Vec<ComponentModel>, completion: impl FnOnce() + 'static) {
        if self.is_reloading() {
            log::warn!("reload requested while a previous reload is still completing");
        }
        let changes = diff_components(&self.models(), &models);
        if changes.is_empty() {
            log::debug!("reload skipped: models unchanged");
            completion();
            return;
        }
        log::debug!(
            "reloading {} -> {} components, {} changes",
            self.components.len(),
            models.len(),
            changes.len()
        );

        self.reloading.set(self.reloading.get() + 1);
        let group = CompletionGroup::new();

        let mut removals: Vec<usize> = changes
            .iter()
            .filter_map(|change| match change {
                ComponentChange::Removed { index } => Some(*index),
                _ => None,
            })
            .collect();
        removals.sort_unstable_by(|a, b| b.cmp(a));
        for index in removals {
            if index < self.components.len() {
                self.components.remove(index).teardown();
            }
        }

        for change in &changes {
            match change {
                ComponentChange::Replace { index } => {
                    let Some(model) = models.get(*index) else { continue };
                    let component = self.make_component(model.clone(), &group);
                    if let Some(slot) = self.components.get_mut(*index) {
                        let stale = std::mem::replace(slot, component);
                        log::trace!("replaced {:?} at {index}", stale.id());
                        stale.teardown();
                    }
                }
                ComponentChange::Reload { index, changes } => {
                    if let (Some(component), Some(model)) =
                        (self.components.get(*index), models.get(*index))
                    {
                        log::debug!(
                            "reload {:?} at {index}: {:016x} -> {:016x}",
                            component.id(),
                            component.with_model(ComponentModel::fingerprint),
                            model.fingerprint()
                        );
                        component.apply(model.clone(), changes, &group);
                    }
                }
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
        for index in insertions {
            let Some(model) = models.get(index) else { continue };
            let component = self.make_component(model.clone(), &group);
            let at = index.min(self.components.len());
            self.components.insert(at, component);
        }

        debug_assert_eq!(self.components.len(), models.len());
        self.layout_components();

        let reloading = Rc::clone(&self.reloading);
        group.notify(move || {
            reloading.set(reloading.get().saturating_sub(1));
            completion();
        });
    }

    fn make_component(&self, model: ComponentModel, group: &CompletionGroup) -> Component {
        let component = Component::new(model, Rc::clone(&self.configuration));
        component.set_resize_hook(Some(self.resize_hook()));
        if self.prepared {
            mount_top_level(&component, self.size, group);
        }
        component
    }

    fn resize_hook(&self) -> ResizeHook {
        let stack = Rc::downgrade(&self.stack);
        Rc::new(move || {
            if let Some(stack) = stack.upgrade() {
                stack.layout();
            }
        })
    }

    /// Stacks components vertically and recomputes the content size.
    fn layout_components(&mut self) {
        *self.stack.order.borrow_mut() = self.components.iter().map(Component::downgrade).collect();
        self.stack.width.set(self.size.width);
        self.stack.layout();
    }
}

impl std::fmt::Debug for Controller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controller")
            .field("components", &self.components)
            .field("size", &self.size)
            .field("content_size", &self.content_size())
            .field("reloading", &self.reloading.get())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;

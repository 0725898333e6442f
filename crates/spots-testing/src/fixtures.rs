use std::cell::Cell;
use std::rc::Rc;

use spots_core::{ComponentKind, ComponentModel, Configuration, Controller, Item, Platform};
use spots_ui_graphics::Size;

/// Viewport most fixtures are prepared at.
pub const VIEWPORT: Size = Size {
    width: 640.0,
    height: 480.0,
};

/// Items titled `Item 1` through `Item {count}`.
pub fn numbered_items(count: usize) -> Vec<Item> {
    (1..=count).map(|n| Item::new(format!("Item {n}"))).collect()
}

pub fn list_model(count: usize) -> ComponentModel {
    ComponentModel::new(ComponentKind::List, 0.0).with_items(numbered_items(count))
}

/// A grid with one composite row per entry of `child_counts`, each row
/// mounting a list of that many numbered items.
pub fn composite_grid(span: f32, child_counts: &[usize]) -> ComponentModel {
    let mut model = ComponentModel::new(ComponentKind::Grid, span);
    model.add_children(child_counts.iter().map(|&count| list_model(count)));
    model
}

pub fn desktop_configuration() -> Configuration {
    Configuration::new(Platform::Desktop)
}

/// A desktop controller prepared at [`VIEWPORT`].
pub fn prepared_controller(models: Vec<ComponentModel>) -> Controller {
    let mut controller = Controller::new(models, desktop_configuration().into_shared());
    controller.prepare(VIEWPORT);
    controller
}

/// Counts how many times the completion it hands out has fired.
#[derive(Clone, Default)]
pub struct CompletionCounter {
    fired: Rc<Cell<usize>>,
}

impl CompletionCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn completion(&self) -> impl FnOnce() + 'static {
        let fired = Rc::clone(&self.fired);
        move || fired.set(fired.get() + 1)
    }

    pub fn count(&self) -> usize {
        self.fired.get()
    }
}

/// Item counts of every composite child, grouped per top-level component.
pub fn composite_item_counts(controller: &Controller) -> Vec<Vec<usize>> {
    controller
        .components()
        .iter()
        .map(|component| {
            component
                .composite_components()
                .iter()
                .map(|composite| composite.component.item_count())
                .collect()
        })
        .collect()
}

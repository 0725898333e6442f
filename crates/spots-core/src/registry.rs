use std::fmt;
use std::rc::Rc;

use crate::collections::map::HashMap;
use crate::item::COMPOSITE_KIND;
use crate::view::{CompositeView, DefaultItemView, ItemConfigurable, RowView};

pub type ViewFactory = Rc<dyn Fn() -> Box<dyn ItemConfigurable>>;

/// Maps item kind identifiers to cell factories.
///
/// The reserved composite kind always produces a [`CompositeView`]; every
/// other kind falls back to the default factory when nothing is registered.
#[derive(Clone)]
pub struct ViewRegistry {
    factories: HashMap<String, ViewFactory>,
    default_factory: ViewFactory,
}

impl ViewRegistry {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
            default_factory: Rc::new(|| Box::new(DefaultItemView::new())),
        }
    }

    pub fn register<V, F>(&mut self, kind: impl Into<String>, factory: F)
    where
        V: ItemConfigurable + 'static,
        F: Fn() -> V + 'static,
    {
        let kind = kind.into();
        if kind == COMPOSITE_KIND {
            log::warn!("ignoring view registration for reserved kind `{COMPOSITE_KIND}`");
            return;
        }
        self.factories
            .insert(kind, Rc::new(move || Box::new(factory())));
    }

    pub fn register_default<V, F>(&mut self, factory: F)
    where
        V: ItemConfigurable + 'static,
        F: Fn() -> V + 'static,
    {
        self.default_factory = Rc::new(move || Box::new(factory()));
    }

    pub fn contains(&self, kind: &str) -> bool {
        kind == COMPOSITE_KIND || self.factories.contains_key(kind)
    }

    /// Builds a fresh row view for an item kind.
    pub fn make(&self, kind: &str) -> RowView {
        if kind == COMPOSITE_KIND {
            return RowView::Composite(CompositeView::new());
        }
        let factory = self.factories.get(kind).unwrap_or(&self.default_factory);
        RowView::Item(factory())
    }
}

impl Default for ViewRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ViewRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<&String> = self.factories.keys().collect();
        kinds.sort();
        f.debug_struct("ViewRegistry").field("kinds", &kinds).finish()
    }
}

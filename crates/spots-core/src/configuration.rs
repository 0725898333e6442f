use std::fmt;
use std::rc::Rc;

use crate::headless::HeadlessInterfaceFactory;
use crate::interface::{Animation, BackendKind, InterfaceFactory, UserInterface};
use crate::model::ComponentKind;
use crate::platform::Platform;
use crate::registry::ViewRegistry;
use crate::view::{ItemConfigurable, RowView};

/// Settings shared by a [`Controller`](crate::Controller) and every
/// [`Component`](crate::Component) it builds.
///
/// Per-platform values are injected here instead of being compiled in, so a
/// desktop configuration can be exercised from any host.
pub struct Configuration {
    pub platform: Platform,
    /// Chrome added to every table row height.
    pub height_offset: f32,
    /// Kind used to render models whose kind is [`ComponentKind::Component`].
    pub default_kind: ComponentKind,
    pub animation: Animation,
    pub views: ViewRegistry,
    pub interfaces: Box<dyn InterfaceFactory>,
}

impl Configuration {
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            height_offset: platform.height_offset(),
            default_kind: ComponentKind::List,
            animation: Animation::Automatic,
            views: ViewRegistry::new(),
            interfaces: Box::new(HeadlessInterfaceFactory::new()),
        }
    }

    pub fn with_height_offset(mut self, height_offset: f32) -> Self {
        self.height_offset = height_offset;
        self
    }

    pub fn with_default_kind(mut self, kind: ComponentKind) -> Self {
        self.default_kind = kind;
        self
    }

    pub fn with_animation(mut self, animation: Animation) -> Self {
        self.animation = animation;
        self
    }

    pub fn with_interfaces(mut self, interfaces: impl InterfaceFactory + 'static) -> Self {
        self.interfaces = Box::new(interfaces);
        self
    }

    pub fn with_views(mut self, views: ViewRegistry) -> Self {
        self.views = views;
        self
    }

    pub fn register_view<V, F>(mut self, kind: impl Into<String>, factory: F) -> Self
    where
        V: ItemConfigurable + 'static,
        F: Fn() -> V + 'static,
    {
        self.views.register(kind, factory);
        self
    }

    pub fn into_shared(self) -> Rc<Configuration> {
        Rc::new(self)
    }

    /// Concrete kind a model renders as.
    pub fn resolve_kind(&self, kind: ComponentKind) -> ComponentKind {
        kind.resolve(self.default_kind)
    }

    pub fn backend_for(&self, kind: ComponentKind) -> BackendKind {
        BackendKind::for_kind(self.resolve_kind(kind))
    }

    pub(crate) fn make_interface(&self, kind: ComponentKind) -> Box<dyn UserInterface> {
        self.interfaces.make_interface(self.backend_for(kind))
    }

    pub(crate) fn make_view(&self, item_kind: &str) -> RowView {
        self.views.make(item_kind)
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new(Platform::default())
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("platform", &self.platform)
            .field("height_offset", &self.height_offset)
            .field("default_kind", &self.default_kind)
            .field("animation", &self.animation)
            .field("views", &self.views)
            .finish_non_exhaustive()
    }
}

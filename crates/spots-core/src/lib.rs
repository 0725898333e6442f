#![doc = r"Model-driven reconciliation of nested lists, grids and carousels."]

extern crate self as spots_core;

pub mod collections;
pub mod completion;
pub mod component;
pub mod configuration;
pub mod controller;
pub mod diff;
pub mod error;
pub mod hash;
pub mod headless;
pub mod interface;
pub mod item;
pub mod model;
pub mod platform;
pub mod registry;
pub mod runtime;
pub mod sizing;
pub mod view;

pub use completion::{Completion, CompletionGroup};
pub use component::{Component, ComponentId, CompositeComponent, WeakComponent};
pub use configuration::Configuration;
pub use controller::Controller;
pub use diff::{diff, diff_components, diff_items, ChangeSet, ComponentChange, ItemChange};
pub use error::SpotsError;
pub use headless::{HeadlessInterface, HeadlessInterfaceFactory};
pub use interface::{Animation, BackendKind, InterfaceFactory, InterfaceId, UserInterface};
pub use item::{Item, Meta, MetaValue, COMPOSITE_KIND};
pub use model::{ComponentKind, ComponentModel, Layout};
pub use platform::{Platform, RuntimeScheduler};
pub use registry::{ViewFactory, ViewRegistry};
pub use runtime::{DefaultScheduler, Runtime, RuntimeHandle};
pub use view::{CompositeView, DefaultItemView, ItemConfigurable, RowView, Subview};

pub use spots_ui_graphics::{EdgeInsets, Point, Rect, Size};

#[cfg(test)]
pub use runtime::{TestRuntime, TestScheduler};

pub mod prelude {
    pub use crate::{
        Component, ComponentKind, ComponentModel, Configuration, Controller, Item,
        ItemConfigurable, Layout, Platform,
    };
    pub use spots_ui_graphics::Size;
}

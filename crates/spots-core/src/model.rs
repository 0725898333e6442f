//! Declarative description of one scrollable region.

use std::fmt;
use std::hash::{Hash, Hasher};

use spots_ui_graphics::EdgeInsets;

use crate::hash::{f32_bits, hash_one};
use crate::item::{Item, Meta};

/// Which kind of scrollable region a model describes.
///
/// `Component` is the unspecified kind: it renders with the configured
/// default kind. Identifiers that are not recognised parse to `Component`
/// rather than failing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    List,
    Grid,
    Carousel,
    #[default]
    Component,
}

impl ComponentKind {
    pub fn from_identifier(identifier: &str) -> Self {
        match identifier.to_ascii_lowercase().as_str() {
            "list" => ComponentKind::List,
            "grid" => ComponentKind::Grid,
            "carousel" => ComponentKind::Carousel,
            _ => ComponentKind::Component,
        }
    }

    pub fn identifier(self) -> &'static str {
        match self {
            ComponentKind::List => "list",
            ComponentKind::Grid => "grid",
            ComponentKind::Carousel => "carousel",
            ComponentKind::Component => "component",
        }
    }

    /// Resolves `Component` to `fallback`; concrete kinds resolve to themselves.
    pub fn resolve(self, fallback: ComponentKind) -> ComponentKind {
        match self {
            ComponentKind::Component => match fallback {
                ComponentKind::Component => ComponentKind::List,
                other => other,
            },
            other => other,
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

/// Sizing descriptor for a component.
///
/// Compared by bit pattern so a layout always equals itself, NaN included.
#[derive(Clone, Copy, Debug)]
pub struct Layout {
    /// Items per row for grids, items per screen width for carousels.
    pub span: f32,
    pub item_spacing: f32,
    pub line_spacing: f32,
    pub inset: EdgeInsets,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            span: 0.0,
            item_spacing: 0.0,
            line_spacing: 0.0,
            inset: EdgeInsets::ZERO,
        }
    }
}

impl Layout {
    pub fn with_span(span: f32) -> Self {
        Self {
            span,
            ..Self::default()
        }
    }

    pub fn mutate(mut self, f: impl FnOnce(&mut Layout)) -> Self {
        f(&mut self);
        self
    }

    /// Span as a whole number of columns, at least one.
    pub fn columns(&self) -> usize {
        if self.span.is_finite() && self.span >= 1.0 {
            self.span.floor() as usize
        } else {
            1
        }
    }
}

impl Layout {
    fn bits(&self) -> [u32; 7] {
        [
            f32_bits(self.span),
            f32_bits(self.item_spacing),
            f32_bits(self.line_spacing),
            f32_bits(self.inset.top),
            f32_bits(self.inset.left),
            f32_bits(self.inset.bottom),
            f32_bits(self.inset.right),
        ]
    }
}

impl PartialEq for Layout {
    fn eq(&self, other: &Self) -> bool {
        self.bits() == other.bits()
    }
}

impl Hash for Layout {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for bits in self.bits() {
            state.write_u32(bits);
        }
    }
}

/// One scrollable region and its ordered rows.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ComponentModel {
    pub identifier: Option<String>,
    pub kind: ComponentKind,
    pub layout: Layout,
    pub items: Vec<Item>,
    pub meta: Meta,
}

impl ComponentModel {
    pub fn new(kind: ComponentKind, span: f32) -> Self {
        Self::with_layout(kind, Layout::with_span(span))
    }

    pub fn with_layout(kind: ComponentKind, layout: Layout) -> Self {
        Self {
            kind,
            layout,
            ..Self::default()
        }
    }

    pub fn with_items(mut self, items: Vec<Item>) -> Self {
        self.items = items;
        self
    }

    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// Appends a composite row that mounts `child`.
    pub fn add(&mut self, child: ComponentModel) {
        self.items.push(Item::composite(vec![child]));
    }

    /// Appends one composite row per child.
    pub fn add_children(&mut self, children: impl IntoIterator<Item = ComponentModel>) {
        for child in children {
            self.add(child);
        }
    }

    /// Hash consistent with `==`; computed item sizes do not contribute.
    pub fn fingerprint(&self) -> u64 {
        hash_one(self)
    }
}

impl Hash for ComponentModel {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identifier.hash(state);
        self.kind.hash(state);
        self.layout.hash(state);
        self.items.hash(state);
        let mut entries: Vec<_> = self.meta.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        state.write_usize(entries.len());
        for (key, value) in entries {
            key.hash(state);
            value.hash(state);
        }
    }
}

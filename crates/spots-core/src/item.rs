//! Declarative description of a single row or cell.

use std::hash::{Hash, Hasher};

use indexmap::IndexMap;
use spots_ui_graphics::Size;

use crate::hash::{f64_bits, hash_f64, hash_one};
use crate::model::ComponentModel;

/// Kind identifier reserved for rows that host nested components.
pub const COMPOSITE_KIND: &str = "composite";

/// Value stored in an item's metadata bag.
#[derive(Clone, Debug)]
pub enum MetaValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl PartialEq for MetaValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (MetaValue::Bool(a), MetaValue::Bool(b)) => a == b,
            (MetaValue::Int(a), MetaValue::Int(b)) => a == b,
            (MetaValue::Float(a), MetaValue::Float(b)) => f64_bits(*a) == f64_bits(*b),
            (MetaValue::Text(a), MetaValue::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl Hash for MetaValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            MetaValue::Bool(value) => value.hash(state),
            MetaValue::Int(value) => value.hash(state),
            MetaValue::Float(value) => hash_f64(*value, state),
            MetaValue::Text(value) => value.hash(state),
        }
    }
}

impl From<bool> for MetaValue {
    fn from(value: bool) -> Self {
        MetaValue::Bool(value)
    }
}

impl From<i64> for MetaValue {
    fn from(value: i64) -> Self {
        MetaValue::Int(value)
    }
}

impl From<f64> for MetaValue {
    fn from(value: f64) -> Self {
        MetaValue::Float(value)
    }
}

impl From<&str> for MetaValue {
    fn from(value: &str) -> Self {
        MetaValue::Text(value.to_owned())
    }
}

impl From<String> for MetaValue {
    fn from(value: String) -> Self {
        MetaValue::Text(value)
    }
}

pub type Meta = IndexMap<String, MetaValue>;

/// One renderable row or cell.
///
/// Equality is semantic: `size` is filled in while the row is configured and
/// never takes part in comparisons, hashing or diffing.
#[derive(Clone, Debug, Default)]
pub struct Item {
    pub kind: String,
    pub title: String,
    pub subtitle: String,
    pub image: String,
    pub meta: Meta,
    pub size: Size,
    pub children: Vec<ComponentModel>,
}

impl Item {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Creates a row that mounts one nested component per entry in `children`.
    pub fn composite(children: Vec<ComponentModel>) -> Self {
        Self {
            kind: COMPOSITE_KIND.to_owned(),
            children,
            ..Self::default()
        }
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = subtitle.into();
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<MetaValue>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    pub fn is_composite(&self) -> bool {
        self.kind == COMPOSITE_KIND
    }

    pub fn meta_text(&self, key: &str) -> Option<&str> {
        match self.meta.get(key) {
            Some(MetaValue::Text(text)) => Some(text.as_str()),
            _ => None,
        }
    }

    /// Compares every semantic field except `children`.
    pub(crate) fn same_row(&self, other: &Item) -> bool {
        self.kind == other.kind
            && self.title == other.title
            && self.subtitle == other.subtitle
            && self.image == other.image
            && self.meta == other.meta
    }

    pub fn fingerprint(&self) -> u64 {
        hash_one(self)
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.same_row(other) && self.children == other.children
    }
}

impl Hash for Item {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.title.hash(state);
        self.subtitle.hash(state);
        self.image.hash(state);
        // Meta equality ignores insertion order, so hash in key order.
        let mut entries: Vec<_> = self.meta.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        state.write_usize(entries.len());
        for (key, value) in entries {
            key.hash(state);
            value.hash(state);
        }
        self.children.hash(state);
    }
}


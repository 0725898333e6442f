//! Size rules for rows and whole components.
//!
//! Everything here is pure; [`Component`](crate::Component) calls it after
//! every structural change and stores the results in item sizes and the
//! interface frame.

use spots_ui_graphics::Size;

use crate::item::Item;
use crate::model::{ComponentKind, Layout};

/// Width given to one item of a component `container_width` wide.
/// `kind` must already be resolved.
pub fn item_width(kind: ComponentKind, layout: &Layout, container_width: f32, preferred: Size) -> f32 {
    let available = (container_width - layout.inset.horizontal()).max(0.0);
    match kind {
        ComponentKind::List | ComponentKind::Component => available,
        ComponentKind::Grid => spanned_width(layout, available, layout.columns()),
        ComponentKind::Carousel => {
            if layout.span > 0.0 {
                spanned_width(layout, available, layout.columns())
            } else if preferred.width > 0.0 {
                preferred.width
            } else {
                available
            }
        }
    }
}

fn spanned_width(layout: &Layout, available: f32, columns: usize) -> f32 {
    let spacing = layout.item_spacing * columns.saturating_sub(1) as f32;
    ((available - spacing) / columns as f32).max(0.0)
}

/// Height of one table row: the measured height plus platform chrome.
pub fn table_row_height(item_height: f32, height_offset: f32) -> f32 {
    item_height + height_offset
}

/// Size of the whole component given its configured items.
pub fn content_size(
    kind: ComponentKind,
    layout: &Layout,
    items: &[Item],
    container_width: f32,
    height_offset: f32,
) -> Size {
    if items.is_empty() {
        return Size::new(container_width, 0.0);
    }
    let insets = layout.inset.vertical();
    match kind {
        ComponentKind::List | ComponentKind::Component => {
            let rows: f32 = items
                .iter()
                .map(|item| table_row_height(item.size.height, height_offset))
                .sum();
            Size::new(container_width, rows + insets)
        }
        ComponentKind::Grid => {
            let columns = layout.columns();
            let lines = items.chunks(columns);
            let line_count = lines.len();
            let heights: f32 = lines
                .map(|line| line.iter().map(|item| item.size.height).fold(0.0, f32::max))
                .sum();
            let spacing = layout.line_spacing * line_count.saturating_sub(1) as f32;
            Size::new(container_width, heights + spacing + insets)
        }
        ComponentKind::Carousel => {
            let height = items.iter().map(|item| item.size.height).fold(0.0, f32::max);
            let widths: f32 = items.iter().map(|item| item.size.width).sum();
            let spacing = layout.item_spacing * items.len().saturating_sub(1) as f32;
            let width = (widths + spacing + layout.inset.horizontal()).max(container_width);
            Size::new(width, height + insets)
        }
    }
}

#[cfg(test)]
#[path = "tests/sizing_tests.rs"]
mod tests;

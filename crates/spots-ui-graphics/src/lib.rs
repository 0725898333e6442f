//! Pure geometry values for Spots
//!
//! Points, sizes, rectangles and insets used by the component model and the
//! rendering capabilities. Nothing here knows how anything is drawn.

mod geometry;

pub use geometry::*;

pub mod prelude {
    pub use crate::geometry::{EdgeInsets, Point, Rect, Size};
}

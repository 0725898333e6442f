//! Fixtures and a recording backend for testing Spots components

pub mod fixtures;
pub mod recording;

pub use fixtures::*;
pub use recording::*;

pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::recording::*;
}

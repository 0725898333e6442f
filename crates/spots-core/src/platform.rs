//! Host services the runtime delegates to.
//!
//! The runtime never spins its own event loop. A host scheduler is told when
//! work is waiting and is expected to call back into
//! [`Runtime::drain_tasks`](crate::Runtime::drain_tasks) on the owning thread.

/// Schedules ticks of the main execution context.
pub trait RuntimeScheduler {
    /// Request that the host run the runtime's pending tasks soon.
    fn schedule_tick(&self);
}

/// Kind of host platform, which decides the default row chrome.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Platform {
    /// Phones, tablets and TVs: rows have no separator chrome.
    #[default]
    Touch,
    /// Desktop-style tables draw a divider that adds to every row.
    Desktop,
}

impl Platform {
    /// Chrome padding added to every measured table row height.
    pub fn height_offset(self) -> f32 {
        match self {
            Platform::Touch => 0.0,
            Platform::Desktop => 2.0,
        }
    }
}

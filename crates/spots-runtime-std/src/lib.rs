//! Standard runtime services backed by Rust's `std` library.
//!
//! [`StdRuntime`] bundles a [`spots_core::Runtime`] with a scheduler that
//! records tick requests and optionally wakes a host event loop. Hosts call
//! [`StdRuntime::pump`] from their loop to run deferred batch completions.

use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Instant;

use spots_core::{HeadlessInterfaceFactory, Runtime, RuntimeHandle, RuntimeScheduler};

type Waker = Arc<dyn Fn() + Send + Sync + 'static>;

/// Scheduler that delegates wake-ups to Rust's threading primitives.
pub struct StdScheduler {
    tick_requested: AtomicBool,
    tick_waker: RwLock<Option<Waker>>,
}

impl StdScheduler {
    pub fn new() -> Self {
        Self {
            tick_requested: AtomicBool::new(false),
            tick_waker: RwLock::new(None),
        }
    }

    /// Returns whether a tick has been requested since the last call.
    pub fn take_tick_request(&self) -> bool {
        self.tick_requested.swap(false, Ordering::SeqCst)
    }

    /// Registers a waker invoked whenever a tick is scheduled. The waker may
    /// be called from the owning thread only, but is allowed to forward to
    /// another thread's event loop.
    pub fn set_tick_waker(&self, waker: impl Fn() + Send + Sync + 'static) {
        *self
            .tick_waker
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(waker));
    }

    pub fn clear_tick_waker(&self) {
        *self
            .tick_waker
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }

    fn wake(&self) {
        let waker = self
            .tick_waker
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        if let Some(waker) = waker {
            waker();
        }
    }
}

impl Default for StdScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StdScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StdScheduler")
            .field("tick_requested", &self.tick_requested.load(Ordering::SeqCst))
            .finish()
    }
}

impl RuntimeScheduler for StdScheduler {
    fn schedule_tick(&self) {
        self.tick_requested.store(true, Ordering::SeqCst);
        self.wake();
    }
}

/// Convenience container bundling the standard scheduler with a runtime.
#[derive(Clone)]
pub struct StdRuntime {
    scheduler: Rc<StdScheduler>,
    runtime: Runtime,
}

impl StdRuntime {
    pub fn new() -> Self {
        let scheduler = Rc::new(StdScheduler::default());
        let runtime = Runtime::new(scheduler.clone());
        Self { scheduler, runtime }
    }

    pub fn runtime(&self) -> Runtime {
        self.runtime.clone()
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    pub fn scheduler(&self) -> Rc<StdScheduler> {
        Rc::clone(&self.scheduler)
    }

    /// Interface factory whose batch completions are deferred to this runtime.
    pub fn interface_factory(&self) -> HeadlessInterfaceFactory {
        HeadlessInterfaceFactory::with_runtime(self.runtime.handle())
    }

    pub fn take_tick_request(&self) -> bool {
        self.scheduler.take_tick_request()
    }

    pub fn set_tick_waker(&self, waker: impl Fn() + Send + Sync + 'static) {
        self.scheduler.set_tick_waker(waker);
    }

    pub fn clear_tick_waker(&self) {
        self.scheduler.clear_tick_waker();
    }

    /// Runs pending tasks if a tick was requested. Returns how many ran.
    pub fn pump(&self) -> usize {
        if !self.take_tick_request() && !self.runtime.has_pending_tasks() {
            return 0;
        }
        let started = Instant::now();
        let ran = self.runtime.drain_tasks();
        log::trace!("runtime tick ran {ran} tasks in {:?}", started.elapsed());
        ran
    }
}

impl fmt::Debug for StdRuntime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StdRuntime")
            .field("scheduler", &self.scheduler)
            .field("pending_tasks", &self.runtime.has_pending_tasks())
            .finish()
    }
}

impl Default for StdRuntime {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use spots_core::{
        ComponentKind, ComponentModel, Configuration, Controller, Item, Platform, Size,
    };

    use super::StdRuntime;

    #[test]
    fn enqueue_requests_tick_and_wakes_host() {
        let runtime = StdRuntime::new();
        let wakes = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&wakes);
        runtime.set_tick_waker(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        runtime.runtime().enqueue_task(|| {});
        assert_eq!(wakes.load(Ordering::SeqCst), 1);
        assert_eq!(runtime.pump(), 1);
        assert!(!runtime.take_tick_request());
        assert_eq!(runtime.pump(), 0);
    }

    #[test]
    fn controller_reload_completes_on_pump() {
        let runtime = StdRuntime::new();
        let configuration = Configuration::new(Platform::Desktop)
            .with_interfaces(runtime.interface_factory())
            .into_shared();
        let list = |count: usize| {
            ComponentModel::new(ComponentKind::List, 0.0)
                .with_items((0..count).map(|n| Item::new(format!("Item {n}"))).collect())
        };
        let mut controller = Controller::new(vec![list(2)], configuration);
        controller.prepare(Size::new(320.0, 480.0));
        runtime.pump();

        let done = Rc::new(Cell::new(false));
        let flag = Rc::clone(&done);
        controller.reload_if_needed(vec![list(3), list(1)], move || flag.set(true));
        assert!(!done.get());
        assert!(runtime.take_tick_request());
        assert!(runtime.pump() > 0);
        assert!(done.get());
    }
}

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use crate::platform::RuntimeScheduler;

type Task = Box<dyn FnOnce() + 'static>;

struct RuntimeInner {
    scheduler: Rc<dyn RuntimeScheduler>,
    needs_tick: Cell<bool>,
    pending_tasks: RefCell<VecDeque<Task>>,
}

impl RuntimeInner {
    fn new(scheduler: Rc<dyn RuntimeScheduler>) -> Self {
        Self {
            scheduler,
            needs_tick: Cell::new(false),
            pending_tasks: RefCell::new(VecDeque::new()),
        }
    }

    fn schedule(&self) {
        if !self.needs_tick.replace(true) {
            self.scheduler.schedule_tick();
        }
    }

    fn enqueue_task(&self, task: Task) {
        self.pending_tasks.borrow_mut().push_back(task);
        self.schedule();
    }

    fn drain_tasks(&self) -> usize {
        let mut ran = 0;
        loop {
            // Tasks may enqueue more tasks; never hold the borrow while running one.
            let next = self.pending_tasks.borrow_mut().pop_front();
            match next {
                Some(task) => {
                    task();
                    ran += 1;
                }
                None => break,
            }
        }
        self.needs_tick.set(false);
        ran
    }

    fn has_tasks(&self) -> bool {
        !self.pending_tasks.borrow().is_empty()
    }
}

/// The single owning execution context.
///
/// Model mutation and change application happen synchronously on the thread
/// that owns the runtime. Rendering backends that finish their batch updates
/// later enqueue the completion here; it runs on the next
/// [`drain_tasks`](Runtime::drain_tasks).
#[derive(Clone)]
pub struct Runtime {
    inner: Rc<RuntimeInner>,
}

impl Runtime {
    pub fn new(scheduler: Rc<dyn RuntimeScheduler>) -> Self {
        Self {
            inner: Rc::new(RuntimeInner::new(scheduler)),
        }
    }

    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle(Rc::downgrade(&self.inner))
    }

    pub fn enqueue_task(&self, task: impl FnOnce() + 'static) {
        self.inner.enqueue_task(Box::new(task));
    }

    /// Runs pending tasks, including ones enqueued while draining. Returns
    /// how many ran.
    pub fn drain_tasks(&self) -> usize {
        self.inner.drain_tasks()
    }

    pub fn has_pending_tasks(&self) -> bool {
        self.inner.has_tasks()
    }

    pub fn needs_tick(&self) -> bool {
        self.inner.needs_tick.get()
    }
}

/// Non-owning reference to a [`Runtime`].
#[derive(Clone)]
pub struct RuntimeHandle(Weak<RuntimeInner>);

impl RuntimeHandle {
    /// Runs `task` on the next tick. When the runtime is gone the task runs
    /// immediately so completions still fire exactly once.
    pub fn enqueue_task(&self, task: impl FnOnce() + 'static) {
        match self.0.upgrade() {
            Some(inner) => inner.enqueue_task(Box::new(task)),
            None => {
                log::warn!("runtime dropped; running deferred task inline");
                task();
            }
        }
    }

    pub fn is_alive(&self) -> bool {
        self.0.strong_count() > 0
    }
}

/// Scheduler that does nothing; the host drains the runtime on its own cadence.
#[derive(Default)]
pub struct DefaultScheduler;

impl RuntimeScheduler for DefaultScheduler {
    fn schedule_tick(&self) {}
}

#[cfg(test)]
#[derive(Default)]
pub struct TestScheduler {
    pub(crate) ticks: Cell<usize>,
}

#[cfg(test)]
impl RuntimeScheduler for TestScheduler {
    fn schedule_tick(&self) {
        self.ticks.set(self.ticks.get() + 1);
    }
}

#[cfg(test)]
pub struct TestRuntime {
    runtime: Runtime,
}

#[cfg(test)]
impl TestRuntime {
    pub fn new() -> Self {
        Self {
            runtime: Runtime::new(Rc::new(TestScheduler::default())),
        }
    }

    pub fn runtime(&self) -> Runtime {
        self.runtime.clone()
    }

    pub fn handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    pub fn drain(&self) -> usize {
        self.runtime.drain_tasks()
    }
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;

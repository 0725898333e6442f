//! Joining many batch completions into one callback.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Callback invoked once when a batch of work has settled.
pub type Completion = Box<dyn FnOnce() + 'static>;

struct GroupInner {
    pending: Cell<usize>,
    sealed: Cell<bool>,
    notify: RefCell<Option<Completion>>,
}

impl GroupInner {
    fn leave(&self) {
        let pending = self.pending.get();
        debug_assert!(pending > 0, "completion group left more often than entered");
        self.pending.set(pending.saturating_sub(1));
        self.fire_if_settled();
    }

    fn fire_if_settled(&self) {
        if !self.sealed.get() || self.pending.get() > 0 {
            return;
        }
        let notify = self.notify.borrow_mut().take();
        if let Some(notify) = notify {
            notify();
        }
    }
}

/// Counts outstanding completions and fires a single callback once every
/// entered token has completed and the group has been sealed.
///
/// Tokens may complete synchronously while work is still being scheduled;
/// the callback is held back until [`notify`](CompletionGroup::notify) seals
/// the group.
#[derive(Clone)]
pub struct CompletionGroup {
    inner: Rc<GroupInner>,
}

impl CompletionGroup {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(GroupInner {
                pending: Cell::new(0),
                sealed: Cell::new(false),
                notify: RefCell::new(None),
            }),
        }
    }

    /// Registers one outstanding piece of work. The returned completion must be
    /// called exactly once; dropping it uncalled leaves the group pending.
    pub fn enter(&self) -> Completion {
        self.inner.pending.set(self.inner.pending.get() + 1);
        let inner = Rc::clone(&self.inner);
        Box::new(move || inner.leave())
    }

    pub fn pending(&self) -> usize {
        self.inner.pending.get()
    }

    pub fn is_settled(&self) -> bool {
        self.inner.sealed.get() && self.inner.pending.get() == 0
    }

    /// Seals the group. `completion` runs now if nothing is outstanding,
    /// otherwise when the last token completes.
    pub fn notify(self, completion: impl FnOnce() + 'static) {
        debug_assert!(!self.inner.sealed.get(), "completion group sealed twice");
        *self.inner.notify.borrow_mut() = Some(Box::new(completion));
        self.inner.sealed.set(true);
        self.inner.fire_if_settled();
    }
}

impl Default for CompletionGroup {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CompletionGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionGroup")
            .field("pending", &self.inner.pending.get())
            .field("sealed", &self.inner.sealed.get())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/completion_tests.rs"]
mod tests;

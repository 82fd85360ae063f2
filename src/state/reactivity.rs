// ============================================================================
// REACTIVITY - change subscribers shared by every store
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

type Callback = Rc<dyn Fn()>;

/// Fan-out of "state changed" to whoever renders.
/// Clones share the same subscriber list.
#[derive(Clone, Default)]
pub struct ChangeNotifier {
    subscribers: Rc<RefCell<Vec<Callback>>>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.subscribers.borrow_mut().push(Rc::new(callback));
    }

    pub fn notify(&self) {
        // Snapshot first: a callback may subscribe while we iterate
        let callbacks: Vec<Callback> = self.subscribers.borrow().clone();
        for callback in callbacks {
            callback();
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }
}

/// Coalesces a burst of notifications into a single pending render
#[derive(Clone, Default)]
pub struct RenderGate {
    pending: Rc<Cell<bool>>,
}

impl RenderGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// True only for the first request since the last `rendered()`
    pub fn request(&self) -> bool {
        !self.pending.replace(true)
    }

    pub fn rendered(&self) {
        self.pending.set(false);
    }
}

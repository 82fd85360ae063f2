// ============================================================================
// VIEW SCOPE - cancellation tied to the lifetime of one routed view
// ============================================================================

use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;
use std::rc::Rc;

use futures::future::{AbortHandle, Abortable};

use crate::services::ApiError;

#[derive(Default)]
struct ScopeInner {
    cancelled: bool,
    next_id: u64,
    // In-flight requests only; finished ones remove themselves
    handles: HashMap<u64, AbortHandle>,
}

/// Requests started through a scope are aborted when the scope is cancelled,
/// so their results never reach the stores.
#[derive(Clone, Default)]
pub struct ViewScope {
    inner: Rc<RefCell<ScopeInner>>,
}

impl ViewScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `future` unless the scope is (or becomes) cancelled first
    pub async fn run<F: Future>(&self, future: F) -> Result<F::Output, ApiError> {
        let (handle, registration) = AbortHandle::new_pair();
        let id = {
            let mut inner = self.inner.borrow_mut();
            if inner.cancelled {
                handle.abort();
            }
            let id = inner.next_id;
            inner.next_id += 1;
            inner.handles.insert(id, handle);
            id
        };
        let outcome = Abortable::new(future, registration).await;
        self.inner.borrow_mut().handles.remove(&id);
        outcome.map_err(|_| ApiError::Cancelled)
    }

    /// Requests started through this scope that have not finished yet
    pub fn in_flight(&self) -> usize {
        self.inner.borrow().handles.len()
    }

    pub fn cancel(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.cancelled = true;
        for (_, handle) in inner.handles.drain() {
            handle.abort();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.borrow().cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::channel::oneshot;
    use futures::executor::block_on;

    #[test]
    fn live_scope_passes_output_through() {
        let scope = ViewScope::new();
        assert_eq!(block_on(scope.run(async { 7 })), Ok(7));
    }

    #[test]
    fn cancelled_scope_never_runs_the_future() {
        let scope = ViewScope::new();
        scope.cancel();
        let ran = RefCell::new(false);

        let result = block_on(scope.run(async { *ran.borrow_mut() = true }));

        assert_eq!(result, Err(ApiError::Cancelled));
        assert!(!*ran.borrow());
    }

    #[test]
    fn cancel_aborts_in_flight_future() {
        let scope = ViewScope::new();
        let (release, gate) = oneshot::channel::<()>();

        let pending = scope.run(async move {
            let _ = gate.await;
            "late"
        });
        let cancel = async {
            scope.cancel();
            let _ = release.send(());
        };

        let (result, ()) = block_on(futures::future::join(pending, cancel));
        assert_eq!(result, Err(ApiError::Cancelled));
        assert!(scope.is_cancelled());
    }

    #[test]
    fn finished_requests_leave_the_scope() {
        let scope = ViewScope::new();
        for n in 0..3 {
            assert_eq!(block_on(scope.run(async move { n })), Ok(n));
        }
        assert_eq!(scope.in_flight(), 0);
    }

    #[test]
    fn pending_request_is_tracked_until_it_resolves() {
        let scope = ViewScope::new();
        let (release, gate) = oneshot::channel::<()>();

        let pending = scope.run(async move {
            let _ = gate.await;
        });
        let observe = async {
            let during = scope.in_flight();
            let _ = release.send(());
            during
        };

        let (result, during) = block_on(futures::future::join(pending, observe));
        assert_eq!(result, Ok(()));
        assert_eq!(during, 1);
        assert_eq!(scope.in_flight(), 0);
    }

    #[test]
    fn clones_cancel_together() {
        let scope = ViewScope::new();
        let clone = scope.clone();
        clone.cancel();
        assert!(scope.is_cancelled());
    }
}

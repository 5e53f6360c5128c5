#![forbid(unsafe_code)]

//! Selection requests that arrived while the bar was busy.
//!
//! A collaborator may call back into the bar from inside one of its own
//! handlers, typically `updateSelection()` from within `goToPage`. Those
//! calls are parked here and replayed, in arrival order, once the running
//! operation is done with the controller.

use std::cell::RefCell;
use std::collections::VecDeque;

#[derive(Debug, Default)]
pub struct DeferredSelections {
    queue: RefCell<VecDeque<Option<String>>>,
}

impl DeferredSelections {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Park a selection request.
    pub fn defer(&self, override_article: Option<String>) {
        self.queue.borrow_mut().push_back(override_article);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }

    /// Replay parked requests in order. `apply` may defer more; those are
    /// replayed in the same call. Returns how many were applied.
    pub fn drain(&self, mut apply: impl FnMut(Option<&str>)) -> usize {
        let mut applied = 0;
        loop {
            let Some(next) = self.queue.borrow_mut().pop_front() else {
                return applied;
            };
            apply(next.as_deref());
            applied += 1;
        }
    }
}

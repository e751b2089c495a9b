//! Global auth error handler
//!
//! The HTTP client reports a rejected session from inside request futures.
//! This callback lets the router react without every component checking for
//! `401` itself.

use std::cell::RefCell;
use std::rc::Rc;

thread_local! {
    /// Global auth error callback
    static AUTH_ERROR_CALLBACK: RefCell<Option<Rc<dyn Fn()>>> = RefCell::new(None);
}

/// Set the global auth error callback
pub fn set_auth_error_callback(callback: Rc<dyn Fn()>) {
    AUTH_ERROR_CALLBACK.with(|cb| {
        *cb.borrow_mut() = Some(callback);
    });
}

/// Clear the auth error callback
pub fn clear_auth_error_callback() {
    AUTH_ERROR_CALLBACK.with(|cb| {
        *cb.borrow_mut() = None;
    });
}

/// Trigger the auth error callback
pub fn trigger_auth_error() {
    // Clone out of the cell so the callback may replace itself
    let callback = AUTH_ERROR_CALLBACK.with(|cb| cb.borrow().clone());
    if let Some(callback) = callback {
        callback();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn trigger_runs_registered_callback() {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        set_auth_error_callback(Rc::new(move || counter.set(counter.get() + 1)));

        trigger_auth_error();
        trigger_auth_error();
        assert_eq!(calls.get(), 2);

        clear_auth_error_callback();
        trigger_auth_error();
        assert_eq!(calls.get(), 2);
    }
}

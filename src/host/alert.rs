//! Alert - Blocking user notifications.
//!
//! The widget's one user-facing error path. `alert` records the message and
//! hands it to the installed handler; the host decides how to show it (the
//! terminal host puts it on the status line until the next key press).
//!
//! # API
//!
//! - `alert(message)` - Raise a notification
//! - `on_alert(fn)` - Install a handler, returns cleanup function
//! - `take_alerts()` - Drain the recorded messages

use std::cell::RefCell;
use std::rc::Rc;

use tracing::warn;

/// Handler for notifications.
pub type AlertHandler = Rc<dyn Fn(&str)>;

#[derive(Default)]
struct AlertState {
    handler: Option<AlertHandler>,
    log: Vec<String>,
}

thread_local! {
    static ALERTS: RefCell<AlertState> = RefCell::new(AlertState::default());
}

/// Raise a notification. Runs the handler (if any) before returning.
pub fn alert(message: &str) {
    warn!(message, "alert");
    let handler = ALERTS.with(|state| {
        let mut state = state.borrow_mut();
        state.log.push(message.to_string());
        state.handler.clone()
    });
    if let Some(handler) = handler {
        handler(message);
    }
}

/// Install the notification handler, replacing any previous one.
/// Returns cleanup function that removes it.
pub fn on_alert<F>(handler: F) -> impl FnOnce()
where
    F: Fn(&str) + 'static,
{
    ALERTS.with(|state| state.borrow_mut().handler = Some(Rc::new(handler)));
    || ALERTS.with(|state| state.borrow_mut().handler = None)
}

/// Drain every message raised so far.
pub fn take_alerts() -> Vec<String> {
    ALERTS.with(|state| std::mem::take(&mut state.borrow_mut().log))
}

/// Number of messages raised and not yet taken.
pub fn alert_count() -> usize {
    ALERTS.with(|state| state.borrow().log.len())
}

/// Reset alert state (for testing).
pub fn reset_alerts() {
    ALERTS.with(|state| *state.borrow_mut() = AlertState::default());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_recorded() {
        reset_alerts();

        alert("Task name cannot be empty");
        assert_eq!(alert_count(), 1);
        assert_eq!(take_alerts(), vec!["Task name cannot be empty".to_string()]);
        assert_eq!(alert_count(), 0);
    }

    #[test]
    fn test_alert_handler() {
        reset_alerts();

        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_clone = seen.clone();
        let cleanup = on_alert(move |message| seen_clone.borrow_mut().push(message.to_string()));

        alert("first");
        cleanup();
        alert("second");

        assert_eq!(*seen.borrow(), vec!["first".to_string()]);
        assert_eq!(alert_count(), 2);
    }
}

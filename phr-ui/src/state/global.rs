//! Global Application State
//!
//! Reactive state management using Leptos signals.

use leptos::*;
use phr_onchain::submission::{Notifier, SubmissionForm};

/// Global application state provided to all components
#[derive(Clone, Copy)]
pub struct GlobalState {
    /// Form fields, in-flight flag, latest result and history
    pub form: RwSignal<SubmissionForm>,
    /// Error message to display
    pub error: RwSignal<Option<String>>,
    /// Success message (for toasts)
    pub success: RwSignal<Option<String>>,
}

/// Provide global state to the component tree
pub fn provide_global_state() -> GlobalState {
    let state = GlobalState {
        form: create_rw_signal(SubmissionForm::new()),
        error: create_rw_signal(None),
        success: create_rw_signal(None),
    };

    provide_context(state);
    state
}

impl GlobalState {
    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        self.success.set(Some(message.to_string()));

        let success_signal = self.success;
        gloo_timers::callback::Timeout::new(3000, move || {
            success_signal.set(None);
        })
        .forget();
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(5000, move || {
            error_signal.set(None);
        })
        .forget();
    }
}

/// Blocking `window.alert` dialog
pub struct BrowserAlert;

impl Notifier for BrowserAlert {
    fn alert(&self, message: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }
}

/// Local calendar day, used to date history entries
pub fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

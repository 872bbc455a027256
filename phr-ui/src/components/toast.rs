//! Toast Notification Component
//!
//! Transient success and error messages. Clicking a toast dismisses it.

use leptos::*;

use crate::state::global::GlobalState;

/// Toast notification container
#[component]
pub fn Toast() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <div class="fixed top-20 right-4 z-50 space-y-2">
            {move || state.success.get().map(|msg| view! {
                <ToastMessage message=msg success=true target=state.success />
            })}
            {move || state.error.get().map(|msg| view! {
                <ToastMessage message=msg success=false target=state.error />
            })}
        </div>
    }
}

#[component]
fn ToastMessage(message: String, success: bool, target: RwSignal<Option<String>>) -> impl IntoView {
    let (icon, bg_class) = if success {
        ("✓", "bg-green-600")
    } else {
        ("✕", "bg-red-600")
    };

    view! {
        <button
            on:click=move |_| target.set(None)
            class=format!(
                "flex items-center space-x-3 {} text-white px-4 py-3 rounded-lg shadow-lg text-left",
                bg_class
            )
        >
            <span class="text-lg">{icon}</span>
            <span class="text-sm font-medium">{message}</span>
        </button>
    }
}

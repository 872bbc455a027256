//! Result Panel Component
//!
//! LLM summary and a link to the anchoring transaction. Hidden until the
//! first successful submission and while a new one is in flight.

use leptos::*;
use phr_onchain::display::ResultView;

use crate::state::global::GlobalState;

#[component]
pub fn ResultPanel() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    move || {
        state
            .form
            .with(|f| f.result().map(ResultView::from))
            .map(|view| {
                view! {
                    <section class="bg-gray-800 rounded-lg p-6 space-y-3">
                        <h2 class="text-lg font-semibold text-green-400">"✅ Success!"</h2>
                        <h3 class="font-medium">"LLM Summary:"</h3>
                        <p class="text-gray-200 whitespace-pre-line">{view.summary}</p>
                        <p class="text-sm text-gray-400">
                            "Transaction Hash: "
                            <a
                                href=view.href
                                target="_blank"
                                rel="noopener noreferrer"
                                class="font-mono text-primary-400 hover:underline break-all"
                            >
                                {view.link_text}
                            </a>
                        </p>
                    </section>
                }
            })
    }
}

//! Connect Button Component
//!
//! Wallet connect/disconnect control shown in the header.

use leptos::*;

use crate::state::global::GlobalState;
use crate::state::wallet::WalletContext;

/// Wallet connection button
#[component]
pub fn ConnectButton() -> impl IntoView {
    let wallet = use_context::<WalletContext>().expect("WalletContext not found");
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let on_connect = move |_| wallet.connect(move |e| state.show_error(&e.user_message()));
    let on_disconnect = move |_| wallet.disconnect();

    view! {
        {move || {
            match wallet.state.with(|s| s.short_address()) {
                Some(short) => view! {
                    <div class="flex items-center space-x-3">
                        <span class="px-3 py-2 rounded-lg bg-gray-700 text-sm font-mono text-gray-200">
                            {short}
                        </span>
                        <button
                            on:click=on_disconnect
                            class="px-3 py-2 rounded-lg text-sm text-gray-300 hover:text-white hover:bg-gray-700 transition-colors"
                        >
                            "Disconnect"
                        </button>
                    </div>
                }.into_view(),
                None => view! {
                    <button
                        on:click=on_connect
                        disabled=move || wallet.connecting.get()
                        class="px-4 py-2 rounded-lg bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600
                               font-semibold transition-colors"
                    >
                        {move || if wallet.connecting.get() { "Connecting..." } else { "Connect Wallet" }}
                    </button>
                }.into_view(),
            }
        }}
    }
}

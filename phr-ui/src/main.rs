//! PHR On-Chain Web App
//!
//! Health data form for wallet holders, built with Leptos (WASM).
//!
//! # Features
//!
//! - Wallet connection through the injected EIP-1193 provider
//! - Submission of weight, blood pressure and steps for an LLM summary
//! - Link to the anchoring transaction on BaseScan
//! - Bar and line charts of the last seven submissions
//!
//! # Architecture
//!
//! Client-side rendered Leptos app compiled to WebAssembly. Form state,
//! validation and history live in the `phr-onchain` crate; this crate only
//! renders them and talks to the browser.

use leptos::*;
use phr_onchain::platform::{Capabilities, RenderMode};

mod api;
mod app;
mod components;
mod state;

use state::wallet::InjectedProvider;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    match RenderMode::detect(browser_capabilities()) {
        RenderMode::Interactive => mount_to_body(|| view! { <app::App /> }),
        RenderMode::Static => mount_to_body(|| view! { <app::StaticShell /> }),
    }
}

fn browser_capabilities() -> Capabilities {
    let has_document = web_sys::window().and_then(|w| w.document()).is_some();
    Capabilities {
        has_display: has_document,
        has_input: has_document,
        has_wallet_provider: InjectedProvider::detect().is_some(),
    }
}

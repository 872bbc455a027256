//! App Root Component
//!
//! Main application component and global providers. The wallet context and
//! the submission client are built here once and handed down explicitly.

use leptos::*;

use crate::api::{self, BrowserSubmissionClient};
use crate::components::{ConnectButton, HealthForm, HistoryCharts, ResultPanel, Toast};
use crate::state::global::provide_global_state;
use crate::state::wallet::{browser_wallet_config, provide_wallet_context, WalletContext};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_global_state();
    let wallet = provide_wallet_context(browser_wallet_config());
    provide_context(BrowserSubmissionClient::new(&api::get_api_base()));

    // Reconnect silently if the site is already authorized
    wallet.restore();

    view! {
        <Shell>
            <div class="grid grid-cols-1 lg:grid-cols-2 gap-6">
                <section class="bg-gray-800 rounded-lg p-6">
                    <h2 class="text-lg font-semibold mb-4">"Submit Health Data"</h2>
                    <HealthForm />
                </section>
                <ResultPanel />
            </div>
            <HistoryCharts />
        </Shell>
    }
}

/// Read-only page for browsers without an injected wallet
#[component]
pub fn StaticShell() -> impl IntoView {
    provide_global_state();

    view! {
        <Shell>
            <section class="bg-gray-800 rounded-lg p-6 text-center space-y-2">
                <div class="text-4xl">"🦊"</div>
                <h2 class="text-lg font-semibold">"No browser wallet detected"</h2>
                <p class="text-gray-400">
                    "Install a wallet extension such as MetaMask and reload to submit health data."
                </p>
            </section>
            <HistoryCharts />
        </Shell>
    }
}

/// Page chrome shared by both render modes
#[component]
fn Shell(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-gray-900 text-white flex flex-col">
            <Header />

            <main class="flex-1 container mx-auto px-4 py-8 pb-24 space-y-6">
                {children()}
            </main>

            <Footer />

            // Toast notifications
            <Toast />
        </div>
    }
}

/// Header with brand and wallet button
#[component]
fn Header() -> impl IntoView {
    let wallet = use_context::<WalletContext>();

    view! {
        <nav class="bg-gray-800 border-b border-gray-700">
            <div class="container mx-auto px-4">
                <div class="flex items-center justify-between h-16">
                    <div class="flex items-center space-x-3">
                        <span class="text-2xl">"🩺"</span>
                        <span class="text-xl font-bold text-white">"PHR On-Chain"</span>
                    </div>
                    {wallet.map(|_| view! { <ConnectButton /> })}
                </div>
            </div>
        </nav>
    }
}

/// Footer naming the anchoring network
#[component]
fn Footer() -> impl IntoView {
    let network = use_context::<WalletContext>()
        .map(|wallet| wallet.chain().name)
        .unwrap_or_else(|| phr_onchain::chain::Chain::base_sepolia().name);

    view! {
        <footer class="fixed bottom-0 left-0 right-0 bg-gray-800 border-t border-gray-700 py-3 px-4">
            <div class="container mx-auto text-center text-sm text-gray-400">
                "Powered by SpoonOS × " {network}
            </div>
        </footer>
    }
}

//! Health Form Component
//!
//! Weight, blood pressure and steps inputs plus the submit button.
//! Inputs are disabled until a wallet is connected.

use leptos::*;

use phr_onchain::submission::{Notifier, SubmissionClient};

use crate::api::BrowserSubmissionClient;
use crate::state::global::{today, BrowserAlert, GlobalState};
use crate::state::wallet::WalletContext;

/// Weight is entered to a tenth of a kilogram
const WEIGHT_STEP: &str = "0.1";
/// Steps are whole numbers; fractional input fails validation
const STEPS_STEP: &str = "1";

/// Health data entry form
#[component]
pub fn HealthForm() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let wallet = use_context::<WalletContext>().expect("WalletContext not found");
    let client = use_context::<BrowserSubmissionClient>().expect("Submission client not found");

    let form = state.form;
    let inputs_enabled = move || wallet.state.with(|w| form.with(|f| f.inputs_enabled(w)));
    let can_submit = move || wallet.state.with(|w| form.with(|f| f.can_submit(w)));

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let wallet_state = wallet.state.get_untracked();
        let request = match form.try_update(|f| f.begin_submit(&wallet_state)) {
            Some(Ok(request)) => request,
            Some(Err(e)) => {
                web_sys::console::warn_1(&format!("Submission not sent: {}", e).into());
                BrowserAlert.alert(&e.user_message());
                return;
            }
            None => return,
        };

        let client = client.clone();
        spawn_local(async move {
            let outcome = client.submit(&request).await;
            match form.try_update(|f| f.complete_submit(outcome, today())) {
                Some(Ok(())) => state.show_success("Health data anchored on-chain"),
                Some(Err(e)) => {
                    web_sys::console::error_1(
                        &format!("Error submitting health data: {}", e).into(),
                    );
                    BrowserAlert.alert(&e.user_message());
                }
                None => {}
            }
        });
    };

    view! {
        <form on:submit=on_submit class="space-y-4">
            <FieldInput
                label="Weight (kg)"
                placeholder="e.g., 65.5"
                input_type="number"
                step=WEIGHT_STEP
                value=Signal::derive(move || form.with(|f| f.fields().weight.clone()))
                on_input=move |v| form.update(|f| f.set_weight(v))
                enabled=Signal::derive(inputs_enabled)
            />
            <FieldInput
                label="Blood Pressure (e.g., 120/80)"
                placeholder="e.g., 120/80"
                input_type="text"
                value=Signal::derive(move || form.with(|f| f.fields().blood_pressure.clone()))
                on_input=move |v| form.update(|f| f.set_blood_pressure(v))
                enabled=Signal::derive(inputs_enabled)
            />
            <FieldInput
                label="Steps (today)"
                placeholder="e.g., 8200"
                input_type="number"
                step=STEPS_STEP
                value=Signal::derive(move || form.with(|f| f.fields().steps.clone()))
                on_input=move |v| form.update(|f| f.set_steps(v))
                enabled=Signal::derive(inputs_enabled)
            />

            <button
                type="submit"
                disabled=move || !can_submit()
                class="w-full bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600
                       disabled:cursor-not-allowed rounded-lg py-3 font-semibold
                       transition-colors flex items-center justify-center space-x-2"
            >
                {move || {
                    form.with(|f| f.is_submitting())
                        .then(|| view! { <span class="inline-block loading-spinner w-4 h-4" /> })
                }}
                <span>{move || form.with(|f| f.submit_label())}</span>
            </button>

            {move || {
                (!wallet.state.with(|w| w.is_connected())).then(|| view! {
                    <p class="text-sm text-gray-400 text-center">
                        "Connect your wallet to submit health data."
                    </p>
                })
            }}
        </form>
    }
}

#[component]
fn FieldInput<F>(
    label: &'static str,
    placeholder: &'static str,
    input_type: &'static str,
    /// Number granularity; text inputs leave it unset
    #[prop(optional)]
    step: Option<&'static str>,
    value: Signal<String>,
    on_input: F,
    enabled: Signal<bool>,
) -> impl IntoView
where
    F: Fn(String) + 'static,
{
    view! {
        <label class="block">
            <span class="block text-sm text-gray-400 mb-1">{label}</span>
            <input
                type=input_type
                step=step
                min=step.map(|_| "0")
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| on_input(event_target_value(&ev))
                disabled=move || !enabled.get()
                class="w-full bg-gray-700 border border-gray-600 rounded-lg px-4 py-2
                       focus:outline-none focus:border-primary-500 disabled:opacity-50"
            />
        </label>
    }
}

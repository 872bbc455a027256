//! Wallet Connection
//!
//! Bridge to the injected EIP-1193 provider (`window.ethereum`) and the
//! reactive wallet context shared with the form.

use js_sys::{Array, Function, Promise, Reflect, JSON};
use leptos::*;
use thiserror::Error;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use phr_onchain::chain::Chain;
use phr_onchain::wallet::{WalletConfig, WalletState, DEFAULT_APP_NAME};

/// Provider error code for a chain the wallet does not know yet
const UNRECOGNIZED_CHAIN: i64 = 4902;
/// Provider error code for a request the user turned down
const USER_REJECTED: i64 = 4001;

/// Errors from the injected provider
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WalletError {
    #[error("No browser wallet found")]
    NoProvider,

    #[error("Wallet request failed ({code}): {message}")]
    Rpc { code: i64, message: String },

    #[error("Wallet error: {0}")]
    Js(String),
}

impl WalletError {
    /// Text for the error toast
    pub fn user_message(&self) -> String {
        match self {
            WalletError::NoProvider => {
                "No browser wallet found. Install one such as MetaMask.".to_string()
            }
            WalletError::Rpc { code, .. } if *code == USER_REJECTED => {
                "Wallet connection was rejected".to_string()
            }
            other => format!("Could not connect wallet: {}", other),
        }
    }

    fn from_js(value: JsValue) -> Self {
        let code = Reflect::get(&value, &"code".into())
            .ok()
            .and_then(|c| c.as_f64());
        let message = Reflect::get(&value, &"message".into())
            .ok()
            .and_then(|m| m.as_string())
            .unwrap_or_else(|| format!("{:?}", value));

        match code {
            Some(code) => WalletError::Rpc {
                code: code as i64,
                message,
            },
            None => WalletError::Js(message),
        }
    }
}

/// Handle on `window.ethereum`
#[derive(Clone)]
pub struct InjectedProvider {
    ethereum: JsValue,
}

impl InjectedProvider {
    /// The injected provider, if the browser has one
    pub fn detect() -> Option<Self> {
        let window = web_sys::window()?;
        let ethereum = Reflect::get(&window, &"ethereum".into()).ok()?;
        if ethereum.is_undefined() || ethereum.is_null() {
            return None;
        }
        Some(Self { ethereum })
    }

    async fn request(&self, method: &str, params: Option<Array>) -> Result<JsValue, WalletError> {
        let args = js_sys::Object::new();
        Reflect::set(&args, &"method".into(), &method.into()).map_err(WalletError::from_js)?;
        if let Some(params) = params {
            Reflect::set(&args, &"params".into(), &params).map_err(WalletError::from_js)?;
        }

        let request: Function = Reflect::get(&self.ethereum, &"request".into())
            .map_err(WalletError::from_js)?
            .dyn_into()
            .map_err(|_| WalletError::Js("Provider has no request method".to_string()))?;

        let promise: Promise = request
            .call1(&self.ethereum, &args)
            .map_err(WalletError::from_js)?
            .dyn_into()
            .map_err(|_| WalletError::Js("Provider request did not return a promise".to_string()))?;

        JsFuture::from(promise).await.map_err(WalletError::from_js)
    }

    /// Accounts already authorized for this site, without prompting
    pub async fn accounts(&self) -> Result<Vec<String>, WalletError> {
        let value = self.request("eth_accounts", None).await?;
        Ok(accounts_from_js(&value))
    }

    /// Prompt the user to connect
    pub async fn request_accounts(&self) -> Result<Vec<String>, WalletError> {
        let value = self.request("eth_requestAccounts", None).await?;
        Ok(accounts_from_js(&value))
    }

    /// Switch to `chain`, adding it to the wallet first if it is unknown
    pub async fn switch_chain(&self, chain: &Chain) -> Result<(), WalletError> {
        let params = json_params(&serde_json::json!({ "chainId": chain.hex_id() }))?;
        match self
            .request("wallet_switchEthereumChain", Some(params))
            .await
        {
            Ok(_) => Ok(()),
            Err(WalletError::Rpc { code, .. }) if code == UNRECOGNIZED_CHAIN => {
                self.add_chain(chain).await
            }
            Err(e) => Err(e),
        }
    }

    async fn add_chain(&self, chain: &Chain) -> Result<(), WalletError> {
        let params = json_params(&add_chain_params(chain))?;
        self.request("wallet_addEthereumChain", Some(params))
            .await
            .map(|_| ())
    }

    /// Call `f` whenever the user switches or disconnects accounts
    pub fn on_accounts_changed(&self, f: impl Fn(Vec<String>) + 'static) {
        let closure = Closure::wrap(
            Box::new(move |value: JsValue| f(accounts_from_js(&value))) as Box<dyn FnMut(JsValue)>
        );

        let on = Reflect::get(&self.ethereum, &"on".into())
            .and_then(|on| on.dyn_into::<Function>());
        if let Ok(on) = on {
            let _ = on.call2(
                &self.ethereum,
                &"accountsChanged".into(),
                closure.as_ref().unchecked_ref(),
            );
        }

        // Listener lives as long as the page
        closure.forget();
    }
}

fn accounts_from_js(value: &JsValue) -> Vec<String> {
    if !Array::is_array(value) {
        return Vec::new();
    }
    Array::from(value)
        .iter()
        .filter_map(|account| account.as_string())
        .collect()
}

/// Wrap a JSON value as the single element of a params array
fn json_params(value: &serde_json::Value) -> Result<Array, WalletError> {
    let parsed = JSON::parse(&value.to_string()).map_err(WalletError::from_js)?;
    Ok(Array::of1(&parsed))
}

/// `wallet_addEthereumChain` parameter for `chain`
pub fn add_chain_params(chain: &Chain) -> serde_json::Value {
    serde_json::json!({
        "chainId": chain.hex_id(),
        "chainName": chain.name,
        "rpcUrls": [chain.rpc_url],
        "blockExplorerUrls": [chain.explorer_url],
        "nativeCurrency": {
            "name": chain.currency_symbol,
            "symbol": chain.currency_symbol,
            "decimals": chain.currency_decimals,
        },
    })
}

/// Wallet settings and connection state, provided at the app root
#[derive(Clone, Copy)]
pub struct WalletContext {
    pub config: StoredValue<WalletConfig>,
    pub state: RwSignal<WalletState>,
    pub connecting: RwSignal<bool>,
}

impl WalletContext {
    pub fn new(config: WalletConfig) -> Self {
        Self {
            config: store_value(config),
            state: create_rw_signal(WalletState::disconnected()),
            connecting: create_rw_signal(false),
        }
    }

    pub fn chain(&self) -> Chain {
        self.config.with_value(|config| config.chain.clone())
    }

    /// Pick up an existing authorization and follow account changes
    pub fn restore(self) {
        let Some(provider) = InjectedProvider::detect() else {
            return;
        };

        let state = self.state;
        provider.on_accounts_changed(move |accounts| {
            state.set(WalletState::from_accounts(&accounts));
        });

        spawn_local(async move {
            match provider.accounts().await {
                Ok(accounts) => self.state.set(WalletState::from_accounts(&accounts)),
                Err(e) => {
                    web_sys::console::warn_1(&format!("Could not read accounts: {}", e).into())
                }
            }
        });
    }

    /// Ask the wallet for an account, then move it to the configured chain.
    /// Failures to connect are passed to `on_error`.
    pub fn connect(self, on_error: impl FnOnce(WalletError) + 'static) {
        let Some(provider) = InjectedProvider::detect() else {
            on_error(WalletError::NoProvider);
            return;
        };
        let chain = self.chain();
        self.connecting.set(true);

        spawn_local(async move {
            match provider.request_accounts().await {
                Ok(accounts) => {
                    if let Err(e) = provider.switch_chain(&chain).await {
                        web_sys::console::warn_1(
                            &format!("Could not switch to {}: {}", chain.name, e).into(),
                        );
                    }
                    self.state.set(WalletState::from_accounts(&accounts));
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("Wallet connection failed: {}", e).into());
                    on_error(e);
                }
            }
            self.connecting.set(false);
        });
    }

    /// Forget the account locally. Injected wallets keep the site authorized.
    pub fn disconnect(self) {
        self.state.set(WalletState::disconnected());
    }
}

/// Wallet settings for the browser build
pub fn browser_wallet_config() -> WalletConfig {
    let chain = match option_env!("BASE_SEPOLIA_RPC_URL") {
        Some(rpc_url) if !rpc_url.is_empty() => Chain::base_sepolia().with_rpc_url(rpc_url),
        _ => Chain::base_sepolia(),
    };
    WalletConfig::new(
        DEFAULT_APP_NAME,
        option_env!("PHR_WALLET_CONNECT_PROJECT_ID"),
        chain,
    )
}

/// Provide the wallet context to the component tree
pub fn provide_wallet_context(config: WalletConfig) -> WalletContext {
    let wallet = WalletContext::new(config);
    provide_context(wallet);
    wallet
}

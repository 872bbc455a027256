//! Render Mode Detection
//!
//! Decides once, at startup, whether the full interactive front end can run
//! or whether a static shell must be shown instead.

/// What the host environment can do
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    /// A UI surface exists (browser window or terminal)
    pub has_display: bool,
    /// Input can be collected from the user
    pub has_input: bool,
    /// A wallet provider is reachable
    pub has_wallet_provider: bool,
}

/// How the front end should be rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Form, wallet connection and submission
    Interactive,
    /// Read-only shell: no wallet calls, no submission
    Static,
}

impl RenderMode {
    pub fn detect(caps: Capabilities) -> Self {
        if caps.has_display && caps.has_input && caps.has_wallet_provider {
            RenderMode::Interactive
        } else {
            RenderMode::Static
        }
    }

    pub fn is_interactive(self) -> bool {
        self == RenderMode::Interactive
    }
}

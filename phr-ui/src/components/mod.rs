//! UI Components
//!
//! Leptos components for the health data page.

pub mod connect_button;
pub mod health_form;
pub mod history_chart;
pub mod result_panel;
pub mod toast;

pub use connect_button::ConnectButton;
pub use health_form::HealthForm;
pub use history_chart::HistoryCharts;
pub use result_panel::ResultPanel;
pub use toast::Toast;

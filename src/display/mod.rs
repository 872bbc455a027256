//! Result & History Display
//!
//! View models for the result panel and the steps/weight charts, plus a
//! plain-text renderer for terminals. Browser rendering lives in `phr-ui`.

mod history;
mod series;
pub mod text;

pub use history::{History, HistoryEntry, HISTORY_CAPACITY};
pub use series::{steps_series, weight_series, ChartKind, ChartSeries, ResultView, SeriesPoint};

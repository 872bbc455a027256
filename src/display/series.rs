//! Chart Series and Result View
//!
//! Pure view models for the result panel and the two history charts.

use serde::Serialize;

use super::history::History;
use crate::submission::SubmissionResult;

/// Placeholder day labels shown before the first submission
const PLACEHOLDER_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
const PLACEHOLDER_STEPS: [f64; 7] = [6500.0, 7200.0, 8100.0, 5400.0, 9000.0, 7600.0, 8200.0];
const PLACEHOLDER_WEIGHT: [f64; 7] = [66.2, 66.0, 65.9, 65.8, 65.7, 65.6, 65.5];

/// How a series should be drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChartKind {
    Bar,
    Line,
}

/// One labelled point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub label: String,
    pub value: f64,
}

/// A named series ready to render
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub name: &'static str,
    pub unit: &'static str,
    pub kind: ChartKind,
    pub points: Vec<SeriesPoint>,
    /// True when the points are the fixed sample data
    pub placeholder: bool,
}

impl ChartSeries {
    pub fn min(&self) -> Option<f64> {
        self.points.iter().map(|p| p.value).reduce(f64::min)
    }

    pub fn max(&self) -> Option<f64> {
        self.points.iter().map(|p| p.value).reduce(f64::max)
    }
}

/// Daily steps as bars
pub fn steps_series(history: &History) -> ChartSeries {
    build_series(history, "Steps", "steps", ChartKind::Bar, &PLACEHOLDER_STEPS, |e| {
        e.steps as f64
    })
}

/// Weight as a line
pub fn weight_series(history: &History) -> ChartSeries {
    build_series(history, "Weight", "kg", ChartKind::Line, &PLACEHOLDER_WEIGHT, |e| {
        e.weight
    })
}

fn build_series(
    history: &History,
    name: &'static str,
    unit: &'static str,
    kind: ChartKind,
    placeholder: &[f64; 7],
    value: impl Fn(&super::history::HistoryEntry) -> f64,
) -> ChartSeries {
    if history.is_empty() {
        let points = PLACEHOLDER_LABELS
            .iter()
            .zip(placeholder.iter())
            .map(|(label, v)| SeriesPoint {
                label: label.to_string(),
                value: *v,
            })
            .collect();

        return ChartSeries {
            name,
            unit,
            kind,
            points,
            placeholder: true,
        };
    }

    ChartSeries {
        name,
        unit,
        kind,
        points: history
            .iter()
            .map(|e| SeriesPoint {
                label: e.label(),
                value: value(e),
            })
            .collect(),
        placeholder: false,
    }
}

/// What the result panel shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultView {
    pub summary: String,
    /// Link text: the transaction hash
    pub link_text: String,
    /// Link target: the explorer page
    pub href: String,
}

impl From<&SubmissionResult> for ResultView {
    fn from(result: &SubmissionResult) -> Self {
        Self {
            summary: result.summary.clone(),
            link_text: result.tx_hash.clone(),
            href: result.explorer_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::history::HistoryEntry;
    use chrono::NaiveDate;

    #[test]
    fn test_placeholder_when_empty() {
        let history = History::new();

        let steps = steps_series(&history);
        assert!(steps.placeholder);
        assert_eq!(steps.points.len(), 7);
        assert_eq!(steps.kind, ChartKind::Bar);

        let weight = weight_series(&history);
        assert!(weight.placeholder);
        assert_eq!(weight.points[0].label, "Mon");
        assert_eq!(weight.kind, ChartKind::Line);
    }

    #[test]
    fn test_series_from_history() {
        let mut history = History::new();
        history.push(HistoryEntry::new(
            70.5,
            9000,
            NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
        ));
        history.push(HistoryEntry::new(
            70.1,
            4000,
            NaiveDate::from_ymd_opt(2024, 5, 3).unwrap(),
        ));

        let steps = steps_series(&history);
        assert!(!steps.placeholder);
        assert_eq!(steps.points.len(), 2);
        assert_eq!(steps.points[0].label, "5/2");
        assert_eq!(steps.points[1].value, 4000.0);
        assert_eq!(steps.min(), Some(4000.0));
        assert_eq!(steps.max(), Some(9000.0));

        let weight = weight_series(&history);
        assert_eq!(weight.points[0].value, 70.5);
    }

    #[test]
    fn test_result_view() {
        let result = SubmissionResult {
            summary: "ok".to_string(),
            tx_hash: "0xabc".to_string(),
            explorer_url: "https://sepolia.basescan.org/tx/0xabc".to_string(),
        };

        let view = ResultView::from(&result);
        assert_eq!(view.summary, "ok");
        assert_eq!(view.link_text, "0xabc");
        assert_eq!(view.href, "https://sepolia.basescan.org/tx/0xabc");
    }
}

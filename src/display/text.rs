//! Terminal rendering of results and history charts

use std::fmt::Write;

use super::series::{ChartKind, ChartSeries, ResultView};

const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Render a series as text, picking bars or a sparkline from its kind
pub fn render_series(series: &ChartSeries, width: usize) -> String {
    match series.kind {
        ChartKind::Bar => render_bars(series, width),
        ChartKind::Line => render_sparkline(series),
    }
}

/// Horizontal bar chart, one row per point
pub fn render_bars(series: &ChartSeries, width: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}{}", series.name, placeholder_suffix(series));

    let max = series.max().unwrap_or(0.0);
    let label_width = series.points.iter().map(|p| p.label.len()).max().unwrap_or(0);

    for point in &series.points {
        let len = if max > 0.0 {
            ((point.value / max) * width as f64).round() as usize
        } else {
            0
        };
        let _ = writeln!(
            out,
            "  {:>lw$} │{} {:.0}",
            point.label,
            "█".repeat(len),
            point.value,
            lw = label_width
        );
    }

    out
}

/// One-line sparkline with first and last values
pub fn render_sparkline(series: &ChartSeries) -> String {
    let (min, max) = match (series.min(), series.max()) {
        (Some(min), Some(max)) => (min, max),
        _ => return format!("{}: (no data)\n", series.name),
    };
    let span = max - min;

    let line: String = series
        .points
        .iter()
        .map(|p| {
            let idx = if span > 0.0 {
                (((p.value - min) / span) * (SPARK_LEVELS.len() - 1) as f64).round() as usize
            } else {
                SPARK_LEVELS.len() / 2
            };
            SPARK_LEVELS[idx.min(SPARK_LEVELS.len() - 1)]
        })
        .collect();

    let first = series.points.first().map(|p| p.value).unwrap_or_default();
    let last = series.points.last().map(|p| p.value).unwrap_or_default();

    format!(
        "{}{}\n  {:.1} {} {:.1} {}\n",
        series.name,
        placeholder_suffix(series),
        first,
        line,
        last,
        series.unit
    )
}

/// Result panel as text
pub fn render_result(view: &ResultView) -> String {
    format!(
        "✅ Success!\n\nLLM Summary:\n{}\n\nTransaction Hash:\n{}\n{}\n",
        view.summary, view.link_text, view.href
    )
}

fn placeholder_suffix(series: &ChartSeries) -> &'static str {
    if series.placeholder {
        " (sample data)"
    } else {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::history::History;
    use crate::display::series::{steps_series, weight_series, SeriesPoint};

    #[test]
    fn test_render_bars_scales_to_width() {
        let series = ChartSeries {
            name: "Steps",
            unit: "steps",
            kind: ChartKind::Bar,
            points: vec![
                SeriesPoint { label: "1/1".into(), value: 5000.0 },
                SeriesPoint { label: "1/2".into(), value: 10000.0 },
            ],
            placeholder: false,
        };

        let text = render_bars(&series, 10);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Steps");
        assert_eq!(lines[1].matches('█').count(), 5);
        assert_eq!(lines[2].matches('█').count(), 10);
        assert!(lines[2].ends_with("10000"));
    }

    #[test]
    fn test_placeholder_marked() {
        let history = History::new();
        assert!(render_series(&steps_series(&history), 20).starts_with("Steps (sample data)"));
        assert!(render_series(&weight_series(&history), 20).starts_with("Weight (sample data)"));
    }

    #[test]
    fn test_sparkline_flat_series() {
        let series = ChartSeries {
            name: "Weight",
            unit: "kg",
            kind: ChartKind::Line,
            points: vec![
                SeriesPoint { label: "a".into(), value: 70.0 },
                SeriesPoint { label: "b".into(), value: 70.0 },
            ],
            placeholder: false,
        };
        let text = render_sparkline(&series);
        assert!(text.contains("70.0 ▅▅ 70.0 kg"));
    }

    #[test]
    fn test_render_result() {
        let view = ResultView {
            summary: "ok".into(),
            link_text: "0xabc".into(),
            href: "https://sepolia.basescan.org/tx/0xabc".into(),
        };
        let text = render_result(&view);
        assert!(text.contains("LLM Summary:\nok"));
        assert!(text.contains("0xabc\nhttps://sepolia.basescan.org/tx/0xabc"));
    }
}

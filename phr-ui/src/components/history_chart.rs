//! History Chart Component
//!
//! Steps as bars and weight as a line, drawn on HTML5 Canvas from the last
//! seven successful submissions.

use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use phr_onchain::display::{steps_series, weight_series, ChartKind, ChartSeries};

use crate::state::global::GlobalState;

const STEPS_COLOR: &str = "#8884d8";
const WEIGHT_COLOR: &str = "#82ca9d";

const MARGIN_LEFT: f64 = 60.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 20.0;
const MARGIN_BOTTOM: f64 = 40.0;

/// Both history charts side by side
#[component]
pub fn HistoryCharts() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let steps = Signal::derive(move || state.form.with(|f| steps_series(f.history())));
    let weight = Signal::derive(move || state.form.with(|f| weight_series(f.history())));

    view! {
        <div class="grid grid-cols-1 md:grid-cols-2 gap-6">
            <SeriesChart title="Steps (last 7)" series=steps color=STEPS_COLOR />
            <SeriesChart title="Weight (kg)" series=weight color=WEIGHT_COLOR />
        </div>
    }
}

/// One series on its own canvas
#[component]
fn SeriesChart(title: &'static str, series: Signal<ChartSeries>, color: &'static str) -> impl IntoView {
    let canvas_ref = create_node_ref::<html::Canvas>();

    // Redraw whenever the history changes
    create_effect(move |_| {
        let series = series.get();
        if let Some(canvas) = canvas_ref.get() {
            draw_series(&canvas, &series, color);
        }
    });

    view! {
        <div class="bg-gray-800 rounded-lg p-4">
            <h3 class="text-sm font-semibold text-gray-300 mb-2">
                {title}
                {move || series.with(|s| s.placeholder).then_some(" (sample data)")}
            </h3>
            <canvas
                node_ref=canvas_ref
                width="480"
                height="240"
                class="w-full h-48 rounded-lg"
            />
        </div>
    }
}

/// Padded y-axis range. Bars always start at zero.
fn y_bounds(series: &ChartSeries) -> (f64, f64) {
    let (mut min, mut max) = match (series.min(), series.max()) {
        (Some(min), Some(max)) => (min, max),
        _ => (0.0, 1.0),
    };

    if series.kind == ChartKind::Bar {
        min = 0.0;
    } else {
        let padding = if max > min { (max - min) * 0.1 } else { 1.0 };
        min -= padding;
        max += padding;
    }

    if max <= min {
        max = min + 1.0;
    }
    (min, max)
}

/// Center of slot `index` out of `count` equal slots across `width`
fn slot_center(index: usize, count: usize, width: f64) -> f64 {
    let slot = width / count.max(1) as f64;
    slot * index as f64 + slot / 2.0
}

/// Draw the series on canvas
fn draw_series(canvas: &HtmlCanvasElement, series: &ChartSeries, color: &str) {
    let ctx = match canvas.get_context("2d") {
        Ok(Some(ctx)) => match ctx.dyn_into::<CanvasRenderingContext2d>() {
            Ok(ctx) => ctx,
            Err(_) => return,
        },
        _ => return,
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;
    let chart_width = width - MARGIN_LEFT - MARGIN_RIGHT;
    let chart_height = height - MARGIN_TOP - MARGIN_BOTTOM;

    // Clear canvas
    ctx.set_fill_style(&"#1f2937".into()); // gray-800
    ctx.fill_rect(0.0, 0.0, width, height);

    let (y_min, y_max) = y_bounds(series);
    let scale_y = |value: f64| MARGIN_TOP + ((y_max - value) / (y_max - y_min)) * chart_height;

    // Horizontal grid lines with y-axis labels
    ctx.set_stroke_style(&"#374151".into()); // gray-700
    ctx.set_line_width(1.0);
    ctx.set_font("12px sans-serif");
    for i in 0..=4 {
        let y = MARGIN_TOP + (i as f64 / 4.0) * chart_height;
        ctx.begin_path();
        ctx.move_to(MARGIN_LEFT, y);
        ctx.line_to(width - MARGIN_RIGHT, y);
        ctx.stroke();

        let value = y_max - (i as f64 / 4.0) * (y_max - y_min);
        ctx.set_fill_style(&"#9ca3af".into()); // gray-400
        let _ = ctx.fill_text(&format!("{:.1}", value), 5.0, y + 4.0);
    }

    let count = series.points.len();
    if series.placeholder {
        ctx.set_global_alpha(0.5);
    }
    ctx.set_fill_style(&color.into());
    ctx.set_stroke_style(&color.into());

    match series.kind {
        ChartKind::Bar => {
            let bar_width = (chart_width / count.max(1) as f64) * 0.6;
            for (i, point) in series.points.iter().enumerate() {
                let x = MARGIN_LEFT + slot_center(i, count, chart_width) - bar_width / 2.0;
                let y = scale_y(point.value);
                ctx.fill_rect(x, y, bar_width, MARGIN_TOP + chart_height - y);
            }
        }
        ChartKind::Line => {
            ctx.set_line_width(2.0);
            ctx.begin_path();
            for (i, point) in series.points.iter().enumerate() {
                let x = MARGIN_LEFT + slot_center(i, count, chart_width);
                let y = scale_y(point.value);
                if i == 0 {
                    ctx.move_to(x, y);
                } else {
                    ctx.line_to(x, y);
                }
            }
            ctx.stroke();

            for (i, point) in series.points.iter().enumerate() {
                let x = MARGIN_LEFT + slot_center(i, count, chart_width);
                ctx.begin_path();
                let _ = ctx.arc(x, scale_y(point.value), 3.0, 0.0, std::f64::consts::PI * 2.0);
                ctx.fill();
            }
        }
    }
    ctx.set_global_alpha(1.0);

    // X-axis labels
    ctx.set_fill_style(&"#9ca3af".into());
    ctx.set_font("12px sans-serif");
    for (i, point) in series.points.iter().enumerate() {
        let x = MARGIN_LEFT + slot_center(i, count, chart_width);
        let _ = ctx.fill_text(&point.label, x - 12.0, height - 15.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use phr_onchain::display::History;

    #[test]
    fn test_bar_bounds_start_at_zero() {
        let (min, max) = y_bounds(&steps_series(&History::new()));
        assert_eq!(min, 0.0);
        assert_eq!(max, 9000.0);
    }

    #[test]
    fn test_line_bounds_padded() {
        let (min, max) = y_bounds(&weight_series(&History::new()));
        assert!(min < 65.5);
        assert!(max > 66.2);
    }

    #[test]
    fn test_flat_line_has_range() {
        let mut series = weight_series(&History::new());
        for point in &mut series.points {
            point.value = 70.0;
        }
        let (min, max) = y_bounds(&series);
        assert_eq!((min, max), (69.0, 71.0));
    }

    #[test]
    fn test_slot_center() {
        assert_eq!(slot_center(0, 7, 700.0), 50.0);
        assert_eq!(slot_center(6, 7, 700.0), 650.0);
        assert_eq!(slot_center(0, 0, 100.0), 50.0);
    }
}

//! Feature overview chart
//!
//! Horizontal bar chart rendered as inline SVG. The first entry sits at the
//! bottom, bars grow from the zero line, so negative values extend left.

use super::escape_html;
use crate::constants::{CHART_BAR_COLOR, CHART_SIZE_PX};
use crate::logic::model::verdict::ChartEntry;

const MARGIN_LEFT: f64 = 110.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 50.0;

pub fn render_bar_chart(entries: &[ChartEntry]) -> String {
    let size = CHART_SIZE_PX as f64;
    let plot_w = size - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = size - MARGIN_TOP - MARGIN_BOTTOM;

    let lo = entries.iter().map(|e| e.value).fold(0.0, f64::min);
    let mut hi = entries.iter().map(|e| e.value).fold(0.0, f64::max);
    if hi - lo <= f64::EPSILON {
        hi = lo + 1.0;
    }
    let x_of = |v: f64| MARGIN_LEFT + (v - lo) / (hi - lo) * plot_w;

    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<svg class="chart" xmlns="http://www.w3.org/2000/svg" width="{s}" height="{s}" viewBox="0 0 {s} {s}">"#,
        s = CHART_SIZE_PX
    ));
    svg.push_str(&format!(
        r#"<text x="{:.1}" y="24" text-anchor="middle" font-size="14">Top 5 Input Parameters</text>"#,
        MARGIN_LEFT + plot_w / 2.0
    ));

    let slot = if entries.is_empty() { plot_h } else { plot_h / entries.len() as f64 };
    let bar_h = slot * 0.8;
    let zero_x = x_of(0.0);

    for (i, entry) in entries.iter().enumerate() {
        // first entry at the bottom
        let y = MARGIN_TOP + plot_h - (i as f64 + 1.0) * slot + (slot - bar_h) / 2.0;
        let value_x = x_of(entry.value);
        let (x, w) = if value_x >= zero_x {
            (zero_x, value_x - zero_x)
        } else {
            (value_x, zero_x - value_x)
        };

        svg.push_str(&format!(
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}"><title>{}: {}</title></rect>"#,
            x,
            y,
            w,
            bar_h,
            CHART_BAR_COLOR,
            escape_html(&entry.feature),
            entry.value
        ));
        svg.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" text-anchor="end" dominant-baseline="middle" font-size="11">{}</text>"#,
            MARGIN_LEFT - 6.0,
            y + bar_h / 2.0,
            escape_html(&entry.feature)
        ));
    }

    // axes
    let axis_y = MARGIN_TOP + plot_h;
    svg.push_str(&format!(
        r##"<line x1="{l:.1}" y1="{a:.1}" x2="{r:.1}" y2="{a:.1}" stroke="#333"/><line x1="{z:.1}" y1="{t:.1}" x2="{z:.1}" y2="{a:.1}" stroke="#333"/>"##,
        l = MARGIN_LEFT,
        r = MARGIN_LEFT + plot_w,
        a = axis_y,
        z = zero_x,
        t = MARGIN_TOP
    ));
    for tick in [lo, hi] {
        svg.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="10">{:.2}</text>"#,
            x_of(tick),
            axis_y + 14.0,
            tick
        ));
    }
    svg.push_str(&format!(
        r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="12">Value</text></svg>"#,
        MARGIN_LEFT + plot_w / 2.0,
        size - 12.0
    ));

    svg
}

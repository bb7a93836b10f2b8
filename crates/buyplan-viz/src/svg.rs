//! Standalone SVG rendering of a [`ChartSpec`].

use std::fmt::Write;

use buyplan_core::{BuyPlanError, BuyPlanResult};

use crate::chart::{AxisRange, ChartSpec, LineStyle};

const MARGIN_LEFT: f64 = 64.0;
const MARGIN_RIGHT: f64 = 64.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 64.0;
const Y_TICKS: usize = 5;
const X_TICKS: [f64; 5] = [0.0, 0.25, 0.5, 0.75, 1.0];
const MARKER_RADIUS: f64 = 3.5;
const LEGEND_ROW: f64 = 16.0;

struct Frame {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    x_range: AxisRange,
    y_range: AxisRange,
}

impl Frame {
    fn px(&self, x: f64) -> f64 {
        self.left + self.x_range.fraction(x) * self.width
    }

    fn py(&self, y: f64) -> f64 {
        self.top + (1.0 - self.y_range.fraction(y)) * self.height
    }

    fn bottom(&self) -> f64 {
        self.top + self.height
    }

    fn right(&self) -> f64 {
        self.left + self.width
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

fn dash(style: LineStyle) -> &'static str {
    match style {
        LineStyle::Solid => "",
        LineStyle::Dashed => r#" stroke-dasharray="6 4""#,
    }
}

/// Render `chart` as an SVG document of `width` x `height` pixels.
pub fn render_svg(chart: &ChartSpec, width: u32, height: u32) -> BuyPlanResult<String> {
    let (w, h) = (f64::from(width), f64::from(height));
    if w <= MARGIN_LEFT + MARGIN_RIGHT || h <= MARGIN_TOP + MARGIN_BOTTOM {
        return Err(BuyPlanError::InvalidInput(format!(
            "svg chart {width}x{height} is too small for its margins"
        )));
    }
    let frame = Frame {
        left: MARGIN_LEFT,
        top: MARGIN_TOP,
        width: w - MARGIN_LEFT - MARGIN_RIGHT,
        height: h - MARGIN_TOP - MARGIN_BOTTOM,
        x_range: chart.x_range,
        y_range: chart.y_range,
    };

    let mut out = String::new();
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}" font-family="sans-serif">"#
    )?;
    writeln!(out, r#"<rect width="100%" height="100%" fill="white"/>"#)?;
    writeln!(
        out,
        r#"<text x="{:.1}" y="24" text-anchor="middle" font-size="14">{}</text>"#,
        w / 2.0,
        escape(&chart.title)
    )?;

    // axes
    writeln!(
        out,
        r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="none" stroke="black"/>"#,
        frame.left, frame.top, frame.width, frame.height
    )?;
    for i in 0..Y_TICKS {
        let value = chart.y_range.min + chart.y_range.span() * i as f64 / (Y_TICKS - 1) as f64;
        let y = frame.py(value);
        writeln!(
            out,
            r#"<text x="{:.1}" y="{:.1}" text-anchor="end" font-size="10">{:.2}</text>"#,
            frame.left - 6.0,
            y + 3.0,
            value
        )?;
    }
    for x in X_TICKS {
        writeln!(
            out,
            r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="10">{}</text>"#,
            frame.px(x),
            frame.bottom() + 14.0,
            x
        )?;
    }
    writeln!(
        out,
        r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="12">{}</text>"#,
        frame.left + frame.width / 2.0,
        h - 12.0,
        escape(&chart.x_label)
    )?;
    writeln!(
        out,
        r#"<text x="16" y="{:.1}" text-anchor="middle" font-size="12" transform="rotate(-90 16 {:.1})">{}</text>"#,
        frame.top + frame.height / 2.0,
        frame.top + frame.height / 2.0,
        escape(&chart.y_label)
    )?;

    if let Some(axis) = &chart.secondary_axis {
        for i in 0..Y_TICKS {
            let frac = i as f64 / (Y_TICKS - 1) as f64;
            let value = axis.range.min + axis.range.span() * frac;
            let y = frame.bottom() - frac * frame.height;
            writeln!(
                out,
                r#"<text x="{:.1}" y="{:.1}" text-anchor="start" font-size="10">{:.1}</text>"#,
                frame.right() + 6.0,
                y + 3.0,
                value
            )?;
        }
        let cx = w - 16.0;
        let cy = frame.top + frame.height / 2.0;
        writeln!(
            out,
            r#"<text x="{cx:.1}" y="{cy:.1}" text-anchor="middle" font-size="12" transform="rotate(90 {cx:.1} {cy:.1})">{}</text>"#,
            escape(axis.label.trim())
        )?;
    }

    for v in &chart.vlines {
        let x = frame.px(v.x);
        writeln!(
            out,
            r#"<line x1="{x:.1}" y1="{:.1}" x2="{x:.1}" y2="{:.1}" stroke="{}" stroke-width="{}" stroke-opacity="0.6"{}/>"#,
            frame.top,
            frame.bottom(),
            escape(&v.color),
            v.width,
            dash(v.style)
        )?;
    }
    for label in &chart.phase_labels {
        writeln!(
            out,
            r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="9" fill="gray">{}</text>"#,
            frame.px(label.x),
            frame.bottom() + 28.0,
            escape(&label.text)
        )?;
    }
    for line in &chart.hlines {
        let y = frame.py(line.y);
        writeln!(
            out,
            r#"<line x1="{:.1}" y1="{y:.1}" x2="{:.1}" y2="{y:.1}" stroke="{}" stroke-width="{}"{}/>"#,
            frame.px(line.x_min),
            frame.px(line.x_max),
            escape(&line.color),
            line.width,
            dash(line.style)
        )?;
    }
    for series in &chart.series {
        let points = series
            .points
            .iter()
            .map(|p| format!("{:.2},{:.2}", frame.px(p.x), frame.py(p.y)))
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(
            out,
            r#"<polyline points="{points}" fill="none" stroke="{}" stroke-width="{}"/>"#,
            escape(&series.color),
            series.width
        )?;
        if series.markers {
            for p in &series.points {
                writeln!(
                    out,
                    r#"<circle cx="{:.2}" cy="{:.2}" r="{MARKER_RADIUS}" fill="{}"/>"#,
                    frame.px(p.x),
                    frame.py(p.y),
                    escape(&series.color)
                )?;
            }
        }
    }

    // legend, upper right inside the plot area
    let legend = chart.legend();
    let legend_x = frame.right() - 170.0;
    for (i, (label, color)) in legend.iter().enumerate() {
        let y = frame.top + 14.0 + LEGEND_ROW * i as f64;
        writeln!(
            out,
            r#"<line x1="{:.1}" y1="{y:.1}" x2="{:.1}" y2="{y:.1}" stroke="{}" stroke-width="2"/>"#,
            legend_x,
            legend_x + 20.0,
            escape(color)
        )?;
        writeln!(
            out,
            r#"<text x="{:.1}" y="{:.1}" font-size="10">{}</text>"#,
            legend_x + 26.0,
            y + 3.0,
            escape(label)
        )?;
    }

    writeln!(out, "</svg>")?;
    Ok(out)
}

//! Terminal rendering of a [`ChartSpec`] on a character grid.
//!
//! Reference series are drawn with their product digit, marker series with
//! `*` joined by `.`, the average line with `-` and phase separators with
//! `:`. Later series overwrite earlier ones where they overlap.

use std::fmt::Write;

use buyplan_core::{BuyPlanError, BuyPlanResult};

use crate::chart::{AxisRange, ChartSpec, LineStyle, Series};

const Y_LABEL_WIDTH: usize = 7;
const MIN_WIDTH: usize = 20;
const MIN_HEIGHT: usize = 5;

struct Canvas {
    width: usize,
    height: usize,
    x_range: AxisRange,
    y_range: AxisRange,
    cells: Vec<Vec<char>>,
}

impl Canvas {
    fn new(width: usize, height: usize, x_range: AxisRange, y_range: AxisRange) -> Self {
        Self {
            width,
            height,
            x_range,
            y_range,
            cells: vec![vec![' '; width]; height],
        }
    }

    fn col(&self, x: f64) -> Option<usize> {
        let f = self.x_range.fraction(x);
        if !(0.0..=1.0).contains(&f) {
            return None;
        }
        Some((f * (self.width - 1) as f64).round() as usize)
    }

    fn row(&self, y: f64) -> Option<usize> {
        let f = self.y_range.fraction(y);
        if !(0.0..=1.0).contains(&f) {
            return None;
        }
        Some(((1.0 - f) * (self.height - 1) as f64).round() as usize)
    }

    /// x value at the center of a column
    fn x_at(&self, col: usize) -> f64 {
        self.x_range.min + self.x_range.span() * col as f64 / (self.width - 1) as f64
    }

    fn put(&mut self, x: f64, y: f64, glyph: char) {
        if let (Some(c), Some(r)) = (self.col(x), self.row(y)) {
            self.cells[r][c] = glyph;
        }
    }

    fn vline(&mut self, x: f64, glyph: char) {
        if let Some(c) = self.col(x) {
            for row in self.cells.iter_mut() {
                row[c] = glyph;
            }
        }
    }

    fn hline(&mut self, y: f64, x_min: f64, x_max: f64, glyph: char) {
        let Some(r) = self.row(y) else { return };
        let start = self.col(x_min.max(self.x_range.min)).unwrap_or(0);
        let end = self
            .col(x_max.min(self.x_range.max))
            .unwrap_or(self.width - 1);
        for c in start..=end {
            self.cells[r][c] = glyph;
        }
    }

    fn polyline(&mut self, series: &Series, glyph: char) {
        for pair in series.points.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let (Some(c0), Some(c1)) = (self.col(a.x), self.col(b.x)) else {
                continue;
            };
            for c in c0.min(c1)..=c0.max(c1) {
                let x = self.x_at(c);
                let t = if b.x == a.x { 0.0 } else { (x - a.x) / (b.x - a.x) };
                self.put(x, a.y + t * (b.y - a.y), glyph);
            }
        }
    }

    fn scatter(&mut self, series: &Series, glyph: char) {
        for p in &series.points {
            self.put(p.x, p.y, glyph);
        }
    }
}

fn series_glyph(index: usize, series: &Series) -> char {
    if series.markers {
        '*'
    } else {
        char::from_digit(((index + 1) % 36) as u32, 36).unwrap_or('+')
    }
}

/// Render `chart` into a plot area of `width` x `height` characters.
pub fn render_ascii(chart: &ChartSpec, width: usize, height: usize) -> BuyPlanResult<String> {
    if width < MIN_WIDTH || height < MIN_HEIGHT {
        return Err(BuyPlanError::InvalidInput(format!(
            "ascii chart needs at least {MIN_WIDTH}x{MIN_HEIGHT}, got {width}x{height}"
        )));
    }

    let mut canvas = Canvas::new(width, height, chart.x_range, chart.y_range);
    for v in &chart.vlines {
        let glyph = match v.style {
            LineStyle::Dashed => ':',
            LineStyle::Solid => '|',
        };
        canvas.vline(v.x, glyph);
    }
    for h in &chart.hlines {
        canvas.hline(h.y, h.x_min, h.x_max, '-');
    }
    for (i, series) in chart.series.iter().enumerate() {
        let glyph = series_glyph(i, series);
        if series.markers {
            canvas.polyline(series, '.');
            canvas.scatter(series, glyph);
        } else if series.points.len() > width {
            canvas.scatter(series, glyph);
        } else {
            canvas.polyline(series, glyph);
        }
    }

    let mut out = String::new();
    writeln!(out, "{}", chart.title.trim())?;
    if !chart.y_label.is_empty() {
        writeln!(out, "{}", chart.y_label)?;
    }

    let mid = (height - 1) / 2;
    for (r, row) in canvas.cells.iter().enumerate() {
        let tick = if r == 0 {
            Some(chart.y_range.max)
        } else if r == mid {
            Some(chart.y_range.min + chart.y_range.span() / 2.0)
        } else if r == height - 1 {
            Some(chart.y_range.min)
        } else {
            None
        };
        let label = tick.map(|v| format!("{v:.2}")).unwrap_or_default();
        let line: String = row.iter().collect();
        writeln!(
            out,
            "{label:>w$} |{}",
            line.trim_end(),
            w = Y_LABEL_WIDTH - 2
        )?;
    }
    writeln!(out, "{:>w$} +{}", "", "-".repeat(width), w = Y_LABEL_WIDTH - 2)?;

    let mut phase_row = vec![' '; width];
    for label in &chart.phase_labels {
        if let Some(c) = canvas.col(label.x) {
            let start = c.saturating_sub(label.text.len() / 2);
            for (i, ch) in label.text.chars().enumerate() {
                if let Some(cell) = phase_row.get_mut(start + i) {
                    *cell = ch;
                }
            }
        }
    }
    let phase_line: String = phase_row.iter().collect();
    writeln!(out, "{:w$}{}", "", phase_line.trim_end(), w = Y_LABEL_WIDTH)?;
    if !chart.x_label.is_empty() {
        writeln!(out, "{:w$}{}", "", chart.x_label, w = Y_LABEL_WIDTH)?;
    }

    if let Some(axis) = &chart.secondary_axis {
        writeln!(
            out,
            "{}: {:.1} .. {:.1}",
            axis.label.trim(),
            axis.range.min,
            axis.range.max
        )?;
    }

    out.push('\n');
    out.push_str("Legend:\n");
    for (i, series) in chart.series.iter().enumerate() {
        writeln!(out, "  {} = {}", series_glyph(i, series), series.label)?;
    }
    for h in chart.hlines.iter() {
        if let Some(label) = &h.label {
            writeln!(out, "  - = {label}")?;
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{comparison_chart, ros_chart};
    use buyplan_core::{BuyEstimator, PlanInputs};

    fn plan() -> buyplan_core::BuyPlan {
        BuyEstimator::builtin()
            .evaluate(PlanInputs::default())
            .unwrap()
    }

    #[test]
    fn ros_chart_renders_all_parts() {
        let text = render_ascii(&ros_chart(&plan()), 60, 12).unwrap();
        assert!(text.starts_with("ROS for Total Buy\n"));
        assert!(text.contains("1.00 |"));
        assert!(text.contains("0.00 |"));
        assert!(text.contains("Intro"));
        assert!(text.contains("Decline"));
        assert!(text.contains("Store count: 0.0 .. 11.0"));
        assert!(text.contains("  * = PLM"));
        assert!(text.contains("  - = Avg.ROS = 0.36"));
        assert!(text.contains('*'));
        assert!(text.contains(':'));
    }

    #[test]
    fn comparison_chart_numbers_reference_products() {
        let text = render_ascii(&comparison_chart(&plan()), 72, 16).unwrap();
        for n in 1..=5 {
            assert!(text.contains(&format!("  {n} = Product {n}, LS")));
        }
        assert!(text.contains("  * = PLM, LS 12"));
    }

    #[test]
    fn rejects_tiny_canvas() {
        let err = render_ascii(&ros_chart(&plan()), 5, 2).unwrap_err();
        assert!(matches!(err, BuyPlanError::InvalidInput(_)));
    }

    #[test]
    fn plot_rows_have_fixed_height() {
        let text = render_ascii(&ros_chart(&plan()), 40, 8).unwrap();
        let plot_rows = text.lines().filter(|l| l.contains(" |")).count();
        assert_eq!(plot_rows, 8);
    }
}

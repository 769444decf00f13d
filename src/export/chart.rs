//! Category pie chart
//!
//! Draws the category summary as an SVG pie. Slices start at twelve
//! o'clock and run counter-clockwise in category order. Each slice carries
//! its percentage inside and its category name just outside the rim.

use std::f64::consts::PI;
use std::path::{Path, PathBuf};

use svg::node::element::path::Data;
use svg::node::element::{Circle, Path as SvgPath, Rectangle, Text};
use svg::Document;

use crate::error::{ExpenseError, ExpenseResult};
use crate::reports::{CategorySlice, CategorySummary};
use crate::storage::write_bytes_atomic;

/// Chart title
pub const CHART_TITLE: &str = "Expense Distribution by Category";

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 520.0;
const CENTER: (f64, f64) = (320.0, 280.0);
const RADIUS: f64 = 170.0;
const LABEL_RADIUS: f64 = RADIUS * 1.12;
const PERCENT_RADIUS: f64 = RADIUS * 0.62;

/// Sweeps this close to a full turn are drawn as a circle
const FULL_TURN_TOLERANCE: f64 = 1e-9;

const COLORS: &[&str] = &[
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// Result of saving the chart
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartOutcome {
    /// The chart was written
    Written { path: PathBuf, categories: usize },
    /// There was no positive spending, so no file was created
    NothingToVisualize,
}

/// Start and end angle of one slice, in radians from twelve o'clock
/// measured counter-clockwise
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliceAngles {
    pub start: f64,
    pub end: f64,
}

impl SliceAngles {
    pub fn sweep(&self) -> f64 {
        self.end - self.start
    }

    pub fn middle(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    /// An arc whose ends meet; SVG would skip it, so it needs a circle
    pub fn is_full_turn(&self) -> bool {
        self.sweep() >= 2.0 * PI - FULL_TURN_TOLERANCE
    }

    /// Too thin to draw as a wedge
    pub fn is_empty(&self) -> bool {
        self.sweep() <= FULL_TURN_TOLERANCE
    }
}

/// Angles for every slice, in slice order
pub fn slice_angles(summary: &CategorySummary) -> Vec<SliceAngles> {
    let mut start = 0.0;
    summary
        .slices
        .iter()
        .map(|slice| {
            let end = start + slice.share * 2.0 * PI;
            let angles = SliceAngles { start, end };
            start = end;
            angles
        })
        .collect()
}

/// Screen position of `angle` on a circle around the chart center
///
/// Screen y grows downwards, so counter-clockwise from twelve o'clock moves
/// left first.
pub fn point_at(radius: f64, angle: f64) -> (f64, f64) {
    (
        CENTER.0 - radius * angle.sin(),
        CENTER.1 - radius * angle.cos(),
    )
}

/// Build the chart, or `None` when there is nothing to draw
pub fn render_pie_chart(summary: &CategorySummary) -> Option<Document> {
    if summary.is_empty() {
        return None;
    }

    let background = Rectangle::new()
        .set("x", 0)
        .set("y", 0)
        .set("width", WIDTH)
        .set("height", HEIGHT)
        .set("fill", "white");

    let title = Text::new()
        .set("x", WIDTH / 2.0)
        .set("y", 40.0)
        .set("text-anchor", "middle")
        .set("font-family", "Helvetica, Arial, sans-serif")
        .set("font-size", 20)
        .set("font-weight", "bold")
        .add(svg::node::Text::new(CHART_TITLE));

    let mut document = Document::new()
        .set("viewBox", (0.0, 0.0, WIDTH, HEIGHT))
        .set("width", WIDTH)
        .set("height", HEIGHT)
        .add(background)
        .add(title);

    let angles = slice_angles(summary);
    for (i, (slice, angles)) in summary.slices.iter().zip(&angles).enumerate() {
        let color = COLORS[i % COLORS.len()];

        document = if angles.is_full_turn() {
            document.add(
                Circle::new()
                    .set("cx", CENTER.0)
                    .set("cy", CENTER.1)
                    .set("r", RADIUS)
                    .set("fill", color)
                    .set("stroke", "white"),
            )
        } else if angles.is_empty() {
            document
        } else {
            document.add(slice_path(angles, color))
        };

        document = add_labels(document, slice, angles);
    }

    Some(document)
}

/// Render the chart to SVG text, or `None` when there is nothing to draw
pub fn pie_chart_svg(summary: &CategorySummary) -> Option<String> {
    render_pie_chart(summary).map(|document| document.to_string())
}

/// Save the chart to `destination`
pub fn save_pie_chart(summary: &CategorySummary, destination: &Path) -> ExpenseResult<ChartOutcome> {
    let Some(svg) = pie_chart_svg(summary) else {
        tracing::info!("no category totals to chart");
        return Ok(ChartOutcome::NothingToVisualize);
    };

    write_bytes_atomic(destination, svg.as_bytes()).map_err(|e| {
        ExpenseError::Chart(format!(
            "Could not write chart to {}: {}",
            destination.display(),
            e
        ))
    })?;

    tracing::info!(path = %destination.display(), categories = summary.slices.len(), "saved category chart");

    Ok(ChartOutcome::Written {
        path: destination.to_path_buf(),
        categories: summary.slices.len(),
    })
}

fn slice_path(angles: &SliceAngles, color: &str) -> SvgPath {
    let (sx, sy) = point_at(RADIUS, angles.start);
    let (ex, ey) = point_at(RADIUS, angles.end);
    let large_arc = if angles.sweep() > PI { 1.0 } else { 0.0 };

    // sweep flag 0 draws counter-clockwise on screen
    let data = Data::new()
        .move_to((CENTER.0 as f32, CENTER.1 as f32))
        .line_to((sx as f32, sy as f32))
        .elliptical_arc_to(vec![
            RADIUS as f32,
            RADIUS as f32,
            0.0,
            large_arc,
            0.0,
            ex as f32,
            ey as f32,
        ])
        .close();

    SvgPath::new()
        .set("d", data)
        .set("fill", color)
        .set("stroke", "white")
        .set("stroke-width", 1)
}

fn add_labels(document: Document, slice: &CategorySlice, angles: &SliceAngles) -> Document {
    let middle = angles.middle();

    let (px, py) = point_at(PERCENT_RADIUS, middle);
    let percent = Text::new()
        .set("x", px)
        .set("y", py)
        .set("text-anchor", "middle")
        .set("dominant-baseline", "middle")
        .set("font-family", "Helvetica, Arial, sans-serif")
        .set("font-size", 13)
        .set("fill", "white")
        .add(svg::node::Text::new(slice.percentage_label()));

    let (lx, ly) = point_at(LABEL_RADIUS, middle);
    let anchor = if lx < CENTER.0 - 1.0 {
        "end"
    } else if lx > CENTER.0 + 1.0 {
        "start"
    } else {
        "middle"
    };
    let label = Text::new()
        .set("x", lx)
        .set("y", ly)
        .set("text-anchor", anchor)
        .set("dominant-baseline", "middle")
        .set("font-family", "Helvetica, Arial, sans-serif")
        .set("font-size", 14)
        .add(svg::node::Text::new(escape_text(&slice.category)));

    document.add(percent).add(label)
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

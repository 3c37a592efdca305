//! Radar chart rendering.
//!
//! Produces a standalone SVG document with one axis per question (in
//! question order, clockwise from the top), rings for each rating
//! level and the scored polygon on top.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use crate::models::{Assessment, Rating};

const SIZE: f64 = 560.0;
const CENTER: f64 = SIZE / 2.0;
const RADIUS: f64 = 180.0;
const LABEL_OFFSET: f64 = 28.0;

const FILL: &str = "rgba(59, 130, 246, 0.2)";
const STROKE: &str = "rgba(59, 130, 246, 0.8)";
const POINT: &str = "rgba(59, 130, 246, 1)";
const GRID: &str = "#d1d5db";

/// Render the assessment as an SVG radar chart.
pub fn render_radar_svg(assessment: &Assessment, title: &str) -> String {
    let axes = assessment.scores.len().max(1);
    let mut svg = String::new();

    push_line(
        &mut svg,
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {size} {size}" font-family="sans-serif">"#,
            size = SIZE
        ),
    );
    push_line(&mut svg, format!("  <title>{}</title>", escape_xml(title)));
    svg.push_str("  <rect width=\"100%\" height=\"100%\" fill=\"#ffffff\"/>\n");

    // Rings, one per rating level.
    for level in Rating::all() {
        let ring: Vec<(f64, f64)> = (0..axes)
            .map(|i| point(i, axes, f64::from(level.value())))
            .collect();
        push_line(
            &mut svg,
            format!(
                r#"  <polygon points="{}" fill="none" stroke="{}" stroke-width="1"/>"#,
                points_attr(&ring),
                GRID
            ),
        );
        let (x, y) = point(0, axes, f64::from(level.value()));
        push_line(
            &mut svg,
            format!(
                r##"  <text x="{:.1}" y="{:.1}" font-size="12" fill="#6b7280" text-anchor="start">{}</text>"##,
                x + 4.0,
                y + 4.0,
                level
            ),
        );
    }

    // Spokes and axis labels.
    for (i, insight) in assessment.scores.iter().enumerate() {
        let (x, y) = point(i, axes, f64::from(Rating::MAX));
        push_line(
            &mut svg,
            format!(
                r#"  <line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-width="1"/>"#,
                CENTER, CENTER, x, y, GRID
            ),
        );

        let (lx, ly) = label_position(i, axes);
        push_line(
            &mut svg,
            format!(
                r##"  <text x="{:.1}" y="{:.1}" font-size="14" font-weight="500" fill="#111827" text-anchor="{}" dominant-baseline="middle">{}</text>"##,
                lx,
                ly,
                text_anchor(lx),
                escape_xml(&insight.label)
            ),
        );
    }

    // Scores.
    let data: Vec<(f64, f64)> = assessment
        .scores
        .iter()
        .enumerate()
        .map(|(i, insight)| point(i, axes, f64::from(insight.score.value())))
        .collect();
    push_line(
        &mut svg,
        format!(
            r#"  <polygon points="{}" fill="{}" stroke="{}" stroke-width="2"/>"#,
            points_attr(&data),
            FILL,
            STROKE
        ),
    );
    for (x, y) in &data {
        push_line(
            &mut svg,
            format!(
                r##"  <circle cx="{:.1}" cy="{:.1}" r="4" fill="{}" stroke="#ffffff" stroke-width="1"/>"##,
                x, y, POINT
            ),
        );
    }

    svg.push_str("</svg>\n");
    svg
}

fn push_line(svg: &mut String, line: String) {
    svg.push_str(&line);
    svg.push('\n');
}

/// Render and write the chart, replacing any previous file.
pub fn write_chart(assessment: &Assessment, title: &str, path: &Path) -> Result<()> {
    let svg = render_radar_svg(assessment, title);
    std::fs::write(path, svg)
        .with_context(|| format!("Failed to write chart to {}", path.display()))?;
    info!("Radar chart written to {}", path.display());
    Ok(())
}

/// Position of `value` on axis `index`, with the first axis pointing up.
fn point(index: usize, axes: usize, value: f64) -> (f64, f64) {
    let angle = axis_angle(index, axes);
    let r = RADIUS * value / f64::from(Rating::MAX);
    (CENTER + r * angle.cos(), CENTER + r * angle.sin())
}

fn label_position(index: usize, axes: usize) -> (f64, f64) {
    let angle = axis_angle(index, axes);
    let r = RADIUS + LABEL_OFFSET;
    (CENTER + r * angle.cos(), CENTER + r * angle.sin())
}

fn axis_angle(index: usize, axes: usize) -> f64 {
    -std::f64::consts::FRAC_PI_2 + std::f64::consts::TAU * index as f64 / axes as f64
}

fn text_anchor(x: f64) -> &'static str {
    if (x - CENTER).abs() < 1.0 {
        "middle"
    } else if x < CENTER {
        "end"
    } else {
        "start"
    }
}

fn points_attr(points: &[(f64, f64)]) -> String {
    points
        .iter()
        .map(|(x, y)| format!("{:.1},{:.1}", x, y))
        .collect::<Vec<_>>()
        .join(" ")
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

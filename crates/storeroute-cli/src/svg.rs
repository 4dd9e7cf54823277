//! SVG overlay of a planned route, meant to be laid over the store map.
//!
//! Grid columns map to x and rows to y, one unit per cell, so the overlay
//! lines up with the map image when both are drawn at the same size.

use storeroute_core::Coordinate;

const PATH_COLOR: &str = "#808080";
const MARKER_STROKE: &str = "#003278";
const MARKER_FILL: &str = "#ffe300";

pub struct RouteOverlay<'a> {
    rows: usize,
    cols: usize,
    current: Coordinate,
    path: &'a [Coordinate],
    stops: Vec<Coordinate>,
}

impl<'a> RouteOverlay<'a> {
    pub fn new(rows: usize, cols: usize, current: Coordinate, path: &'a [Coordinate]) -> Self {
        Self {
            rows,
            cols,
            current,
            path,
            stops: Vec::new(),
        }
    }

    /// Stop locations in visit order; each gets its position as a label.
    pub fn with_stops(mut self, stops: Vec<Coordinate>) -> Self {
        self.stops = stops;
        self
    }

    pub fn render(&self) -> String {
        // Markers scale with the map so they stay visible on large stores.
        let radius = (self.rows.max(self.cols) as f32 / 60.0).max(1.0);
        let stroke = radius / 4.0;

        let mut svg = String::new();
        push_line(
            &mut svg,
            format!(
                r#"<svg viewBox="0 0 {} {}" xmlns="http://www.w3.org/2000/svg">"#,
                self.cols, self.rows
            ),
        );

        if !self.path.is_empty() {
            let d = self
                .path
                .iter()
                .enumerate()
                .map(|(i, cell)| {
                    let command = if i == 0 { "M" } else { "L" };
                    format!("{command} {} {}", cell.col, cell.row)
                })
                .collect::<Vec<_>>()
                .join(" ");
            push_line(
                &mut svg,
                format!(
                    r#"  <path d="{d}" fill="none" stroke="{PATH_COLOR}" stroke-width="{:.1}" stroke-linejoin="round"/>"#,
                    radius / 2.0
                ),
            );
        }

        push_line(
            &mut svg,
            format!(
                r#"  <circle id="location" cx="{}" cy="{}" r="{radius:.1}" stroke="{MARKER_STROKE}" stroke-width="{stroke:.1}" fill="{MARKER_FILL}" fill-opacity="0.5"/>"#,
                self.current.col, self.current.row
            ),
        );

        for (i, stop) in self.stops.iter().enumerate() {
            push_line(
                &mut svg,
                format!(
                    r#"  <circle cx="{}" cy="{}" r="{radius:.1}" stroke="{MARKER_STROKE}" stroke-width="{stroke:.1}" fill="{MARKER_FILL}"/>"#,
                    stop.col, stop.row
                ),
            );
            push_line(
                &mut svg,
                format!(
                    r#"  <text x="{}" y="{}" fill="{MARKER_STROKE}" font-size="{:.1}" text-anchor="middle" dominant-baseline="central">{}</text>"#,
                    stop.col,
                    stop.row,
                    radius * 1.2,
                    i + 1
                ),
            );
        }

        push_line(&mut svg, "</svg>".to_string());
        svg
    }
}

fn push_line(svg: &mut String, line: String) {
    svg.push_str(&line);
    svg.push('\n');
}

//! Chart command for rendering event lines as an SVG line chart.
//!
//! Events are placed on a linear time axis (x) against their running index
//! (y), joined by a single path, with a dot and label per event.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use atl_core::{Event, parse_event_lines, sort_chronologically};
use chrono::NaiveDateTime;

const MARGIN_TOP: u32 = 20;
const MARGIN_RIGHT: u32 = 20;
const MARGIN_BOTTOM: u32 = 30;
const MARGIN_LEFT: u32 = 50;

/// Number of labelled ticks on the time axis.
const TICK_COUNT: u32 = 5;

const LINE_COLOR: &str = "green";

/// Chart dimensions in pixels, margins included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartOptions {
    pub width: u32,
    pub height: u32,
}

/// Linear mapping from timestamps onto the plot width.
struct TimeScale {
    start: NaiveDateTime,
    span_secs: i64,
    width: f64,
}

impl TimeScale {
    fn new(events: &[Event], width: f64) -> Option<Self> {
        let start = events.iter().map(|e| e.timestamp).min()?;
        let end = events.iter().map(|e| e.timestamp).max()?;
        Some(Self {
            start,
            span_secs: (end - start).num_seconds(),
            width,
        })
    }

    /// Degenerate extents map everything to the horizontal midpoint.
    #[allow(clippy::cast_precision_loss)]
    fn x(&self, timestamp: NaiveDateTime) -> f64 {
        if self.span_secs == 0 {
            return self.width / 2.0;
        }
        (timestamp - self.start).num_seconds() as f64 / self.span_secs as f64 * self.width
    }

    /// Evenly spaced tick timestamps across the extent.
    fn ticks(&self) -> Vec<NaiveDateTime> {
        if self.span_secs == 0 {
            return vec![self.start];
        }
        (0..TICK_COUNT)
            .map(|i| {
                let offset = self.span_secs * i64::from(i) / i64::from(TICK_COUNT - 1);
                self.start + chrono::Duration::seconds(offset)
            })
            .collect()
    }
}

/// Escapes text for use in SVG content and attribute values.
fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Renders chronologically sorted events as a standalone SVG document.
#[allow(clippy::cast_precision_loss)]
pub fn render_chart(events: &[Event], options: ChartOptions) -> String {
    let inner_width = options.width.saturating_sub(MARGIN_LEFT + MARGIN_RIGHT).max(1);
    let inner_height = options.height.saturating_sub(MARGIN_TOP + MARGIN_BOTTOM).max(1);
    let plot_width = f64::from(inner_width);
    let plot_height = f64::from(inner_height);

    let scale = TimeScale::new(events, plot_width);
    // y domain is [0, n]; the first event sits on the baseline
    let step = plot_height / events.len().max(1) as f64;
    let points: Vec<(f64, f64)> = scale
        .as_ref()
        .map(|scale| {
            events
                .iter()
                .enumerate()
                .map(|(i, event)| (scale.x(event.timestamp), plot_height - i as f64 * step))
                .collect()
        })
        .unwrap_or_default();

    let mut svg = String::new();
    writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = options.width,
        h = options.height,
    )
    .unwrap();
    writeln!(svg, r#"  <g transform="translate({MARGIN_LEFT},{MARGIN_TOP})">"#).unwrap();

    if !points.is_empty() {
        let path: String = points
            .iter()
            .enumerate()
            .map(|(i, (x, y))| format!("{}{x:.2},{y:.2}", if i == 0 { 'M' } else { 'L' }))
            .collect();
        writeln!(
            svg,
            r#"    <path class="line" d="{path}" stroke="{LINE_COLOR}" fill="none"/>"#
        )
        .unwrap();
    }

    for (x, y) in &points {
        writeln!(
            svg,
            r#"    <circle r="5" cx="{x:.2}" cy="{y:.2}" fill="{LINE_COLOR}"/>"#
        )
        .unwrap();
    }

    for ((x, y), event) in points.iter().zip(events) {
        writeln!(
            svg,
            r#"    <text x="{:.2}" y="{y:.2}" dy=".35em" text-anchor="start">{}</text>"#,
            x + 5.0,
            escape_xml(&event.description)
        )
        .unwrap();
    }

    // Time axis
    writeln!(
        svg,
        r#"    <g class="axis" transform="translate(0,{inner_height})">"#
    )
    .unwrap();
    writeln!(
        svg,
        r#"      <line x1="0" x2="{inner_width}" stroke="black"/>"#
    )
    .unwrap();
    if let Some(scale) = &scale {
        for tick in scale.ticks() {
            writeln!(
                svg,
                r#"      <g transform="translate({:.2},0)"><line y2="6" stroke="black"/><text y="9" dy=".71em" text-anchor="middle">{}</text></g>"#,
                scale.x(tick),
                tick.format("%d/%m %H:%M")
            )
            .unwrap();
        }
    }
    writeln!(svg, "    </g>").unwrap();
    writeln!(svg, "  </g>").unwrap();
    writeln!(svg, "</svg>").unwrap();

    svg
}

/// Runs the chart command over event lines in `text`.
pub fn run(text: &str, options: ChartOptions, output: Option<&Path>) -> Result<()> {
    let mut events = parse_event_lines(text);
    sort_chronologically(&mut events);
    let svg = render_chart(&events, options);

    match output {
        Some(path) => {
            std::fs::write(path, svg)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::debug!(path = %path.display(), events = events.len(), "wrote chart");
        }
        None => print!("{svg}"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::NaiveDate;
    use insta::assert_snapshot;

    fn at(h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 2, 1)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    const SMALL: ChartOptions = ChartOptions {
        width: 170,
        height: 150,
    };

    #[test]
    fn test_chart_two_events() {
        let events = vec![
            Event::new(at(10, 0), "Project created"),
            Event::new(at(11, 0), "Project Rework: <bad> & \"worse\""),
        ];

        assert_snapshot!(render_chart(&events, SMALL), @r#"
        <svg xmlns="http://www.w3.org/2000/svg" width="170" height="150" viewBox="0 0 170 150">
          <g transform="translate(50,20)">
            <path class="line" d="M0.00,100.00L100.00,50.00" stroke="green" fill="none"/>
            <circle r="5" cx="0.00" cy="100.00" fill="green"/>
            <circle r="5" cx="100.00" cy="50.00" fill="green"/>
            <text x="5.00" y="100.00" dy=".35em" text-anchor="start">Project created</text>
            <text x="105.00" y="50.00" dy=".35em" text-anchor="start">Project Rework: &lt;bad&gt; &amp; &quot;worse&quot;</text>
            <g class="axis" transform="translate(0,100)">
              <line x1="0" x2="100" stroke="black"/>
              <g transform="translate(0.00,0)"><line y2="6" stroke="black"/><text y="9" dy=".71em" text-anchor="middle">01/02 10:00</text></g>
              <g transform="translate(25.00,0)"><line y2="6" stroke="black"/><text y="9" dy=".71em" text-anchor="middle">01/02 10:15</text></g>
              <g transform="translate(50.00,0)"><line y2="6" stroke="black"/><text y="9" dy=".71em" text-anchor="middle">01/02 10:30</text></g>
              <g transform="translate(75.00,0)"><line y2="6" stroke="black"/><text y="9" dy=".71em" text-anchor="middle">01/02 10:45</text></g>
              <g transform="translate(100.00,0)"><line y2="6" stroke="black"/><text y="9" dy=".71em" text-anchor="middle">01/02 11:00</text></g>
            </g>
          </g>
        </svg>
        "#);
    }

    #[test]
    fn test_chart_empty_has_axis_only() {
        let svg = render_chart(&[], SMALL);
        assert!(svg.contains(r#"<line x1="0" x2="100" stroke="black"/>"#));
        assert!(!svg.contains("<path"));
        assert!(!svg.contains("<circle"));
    }

    #[test]
    fn test_chart_single_event_sits_mid_axis() {
        let svg = render_chart(&[Event::new(at(9, 0), "Project created")], SMALL);
        assert!(svg.contains(r#"<circle r="5" cx="50.00" cy="100.00" fill="green"/>"#));
        assert_eq!(svg.matches("<text y=\"9\"").count(), 1);
    }

    #[test]
    fn test_chart_tiny_dimensions_do_not_underflow() {
        let svg = render_chart(
            &[Event::new(at(9, 0), "a"), Event::new(at(10, 0), "b")],
            ChartOptions {
                width: 10,
                height: 10,
            },
        );
        assert!(svg.contains(r#"<line x1="0" x2="1" stroke="black"/>"#));
    }

    #[test]
    fn test_run_writes_svg_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("chart.svg");

        run(
            "2024-02-01 10:00:00 Project created\n2024-02-02 10:00:00 Delivered\n",
            ChartOptions {
                width: 640,
                height: 320,
            },
            Some(&path),
        )
        .unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="640" height="320""#));
        assert_eq!(svg.matches("<circle").count(), 2);
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a<b>&'\""), "a&lt;b&gt;&amp;&apos;&quot;");
    }
}

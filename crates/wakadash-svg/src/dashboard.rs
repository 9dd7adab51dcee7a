//! Fixed-layout bar dashboard
//!
//! A dashboard is a rounded frame holding one or more titled sections of
//! horizontal bars, separated by a thin divider, with a footer stating when
//! the image was generated. Every coordinate is derived from the number of
//! sections and rows, so identical input always yields identical markup.

use crate::node::{Element, px};
use crate::scale::Bar;
use chrono::NaiveDateTime;
use tracing::debug;

/// Overall image width
pub const WIDTH: f64 = 540.0;
/// Width of a full bar track
pub const TRACK_WIDTH: f64 = 260.0;

const FRAME_INSET: f64 = 6.0;
const FRAME_RADIUS: f64 = 18.0;
const TOP_MARGIN: f64 = 36.0;
const TITLE_GAP: f64 = 26.0;
const ROW_HEIGHT: f64 = 26.0;
const SECTION_GAP: f64 = 16.0;
const FOOTER_SPACE: f64 = 44.0;
const LABEL_X: f64 = 30.0;
const TRACK_X: f64 = 160.0;
const BAR_HEIGHT: f64 = 12.0;
const BAR_RADIUS: f64 = 6.0;
const VALUE_X: f64 = 460.0;

const STYLESHEET: &str = "\
.frame { fill:#050607; stroke:#00ff9c22; }
.title { fill:#00ff9c; font-family:monospace; font-size:13px; font-weight:bold; }
.label { fill:#00ff9c; font-family:monospace; font-size:12px; }
.value { fill:#eafff6; font-family:monospace; font-size:11px; text-anchor:end; }
.bar-bg { fill:#0f1a17; }
.bar { fill:#00ff9c; }
.divider { stroke:#00ff9c22; stroke-width:1; }
.footer { fill:#00ff9c66; font-family:monospace; font-size:10px; }";

/// A titled group of bars
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub title: String,
    pub bars: Vec<Bar>,
}

impl Section {
    pub fn new(title: impl Into<String>, bars: Vec<Bar>) -> Self {
        Self {
            title: title.into(),
            bars,
        }
    }
}

/// Format the footer timestamp, e.g. `04 Mar 2024 • 14:45 UTC+05:30`
pub fn footer_timestamp(local: NaiveDateTime, zone_name: &str) -> String {
    format!("{} \u{2022} {} {}", local.format("%d %b %Y"), local.format("%H:%M"), zone_name)
}

pub fn frame(height: f64) -> Element {
    Element::new("rect")
        .attr("class", "frame")
        .attr("x", px(FRAME_INSET))
        .attr("y", px(FRAME_INSET))
        .attr("rx", px(FRAME_RADIUS))
        .attr("width", px(WIDTH - 2.0 * FRAME_INSET))
        .attr("height", px(height - 2.0 * FRAME_INSET))
}

pub fn title(y: f64, text: &str) -> Element {
    Element::new("text")
        .attr("class", "title")
        .attr("x", px(LABEL_X))
        .attr("y", px(y))
        .text(text)
}

/// Label, background track, filled bar and value text for one bucket
pub fn bar_row(y: f64, bar: &Bar) -> Element {
    let top = y - 10.0;
    Element::new("g")
        .child(
            Element::new("text")
                .attr("class", "label")
                .attr("x", px(LABEL_X))
                .attr("y", px(y))
                .text(bar.label),
        )
        .child(
            Element::new("rect")
                .attr("class", "bar-bg")
                .attr("x", px(TRACK_X))
                .attr("y", px(top))
                .attr("width", px(TRACK_WIDTH))
                .attr("height", px(BAR_HEIGHT))
                .attr("rx", px(BAR_RADIUS)),
        )
        .child(
            Element::new("rect")
                .attr("class", "bar")
                .attr("x", px(TRACK_X))
                .attr("y", px(top))
                .attr("width", px(bar.width.clamp(0.0, TRACK_WIDTH)))
                .attr("height", px(BAR_HEIGHT))
                .attr("rx", px(BAR_RADIUS)),
        )
        .child(
            Element::new("text")
                .attr("class", "value")
                .attr("x", px(VALUE_X))
                .attr("y", px(y + 1.0))
                .text(bar.display.as_str()),
        )
}

pub fn divider(y: f64) -> Element {
    Element::new("line")
        .attr("class", "divider")
        .attr("x1", px(LABEL_X))
        .attr("y1", px(y))
        .attr("x2", px(WIDTH - LABEL_X))
        .attr("y2", px(y))
}

pub fn footer(y: f64, generated_at: &str) -> Element {
    Element::new("text")
        .attr("class", "footer")
        .attr("x", px(LABEL_X))
        .attr("y", px(y))
        .text(format!("Last updated: {generated_at}"))
}

/// Renders sections into a complete SVG document
#[derive(Debug, Clone, Copy, Default)]
pub struct Dashboard;

impl Dashboard {
    /// Total image height for the given sections
    pub fn height(sections: &[Section]) -> f64 {
        let rows: usize = sections.iter().map(|s| s.bars.len()).sum();
        let gaps = sections.len().saturating_sub(1);
        TOP_MARGIN
            + sections.len() as f64 * TITLE_GAP
            + rows as f64 * ROW_HEIGHT
            + gaps as f64 * SECTION_GAP
            + FOOTER_SPACE
    }

    /// Build the document tree
    pub fn build(&self, sections: &[Section], generated_at: &str) -> Element {
        let height = Self::height(sections);
        debug!("Laying out {} sections, height {}", sections.len(), height);
        let mut body = Vec::new();
        let mut y = TOP_MARGIN;

        for (index, section) in sections.iter().enumerate() {
            if index > 0 {
                body.push(divider(y - ROW_HEIGHT / 2.0 - 2.0));
                y += SECTION_GAP;
            }
            body.push(title(y, &section.title));
            y += TITLE_GAP;
            for bar in &section.bars {
                body.push(bar_row(y, bar));
                y += ROW_HEIGHT;
            }
        }

        Element::new("svg")
            .attr("xmlns", "http://www.w3.org/2000/svg")
            .attr("width", px(WIDTH))
            .attr("height", px(height))
            .attr("viewBox", format!("0 0 {} {}", px(WIDTH), px(height)))
            .child(Element::new("style").text(STYLESHEET))
            .child(frame(height))
            .children(body)
            .child(footer(height - 20.0, generated_at))
    }

    /// Render sections to SVG text
    pub fn render(&self, sections: &[Section], generated_at: &str) -> String {
        self.build(sections, generated_at).render()
    }
}

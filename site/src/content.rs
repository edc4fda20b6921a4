//! Page content as rows of styled spans.
//!
//! A [`Flow`] is built for one screen width. Paragraphs are wrapped when
//! they are added, so every [`Line`] is exactly one screen row.

use sitekit_core::{Cell, Grid, Point, Range, Style};
use sitekit_ui::{Route, StyledText};

use crate::colors;

/// Columns kept free on both sides of left-aligned text.
pub const MARGIN: i32 = 2;

#[derive(Clone, Debug)]
pub struct Span {
    pub text: String,
    pub style: Style,
    pub link: Option<Route>,
    /// Accessible name when it differs from the text.
    pub label: Option<String>,
}

impl Span {
    pub fn text(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
            link: None,
            label: None,
        }
    }

    pub fn link(text: impl Into<String>, href: &str, style: Style) -> Self {
        Self {
            link: Some(Route::new(href)),
            ..Self::text(text, style)
        }
    }

    pub fn labelled(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    fn width(&self) -> i32 {
        self.text.chars().count() as i32
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

#[derive(Clone, Debug)]
pub struct Line {
    pub spans: Vec<Span>,
    pub align: Align,
    /// Style of the whole row behind the spans.
    pub fill: Style,
}

impl Line {
    pub fn plain(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

/// A link span with its place in a flow.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlowLink {
    pub line: usize,
    pub x: i32,
    pub width: i32,
    pub label: String,
    pub route: Route,
}

#[derive(Clone, Debug)]
pub struct Flow {
    width: i32,
    lines: Vec<Line>,
}

impl Flow {
    pub fn new(width: i32) -> Self {
        Self {
            width,
            lines: Vec::new(),
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    // -- Building --

    pub fn line(&mut self, spans: Vec<Span>, align: Align, fill: Style) {
        self.lines.push(Line { spans, align, fill });
    }

    pub fn blank(&mut self, fill: Style) {
        self.line(Vec::new(), Align::Left, fill);
    }

    /// Wrap `text` to the usable width and add one line per row.
    pub fn paragraph(&mut self, text: &str, style: Style, align: Align, fill: Style) {
        let usable = (self.width - 2 * MARGIN).max(1) as usize;
        for row in StyledText::new(text, style).wrap(usable).lines() {
            self.line(vec![Span::text(row.content(), style)], align, fill);
        }
    }

    /// A centred section title followed by its wrapped subtitle.
    pub fn section_title(&mut self, title: &str, subtitle: &str) {
        self.blank(colors::PAGE);
        self.line(
            vec![Span::text(title, colors::PAGE_HEADING)],
            Align::Center,
            colors::PAGE,
        );
        self.paragraph(subtitle, colors::PAGE_TEXT, Align::Center, colors::PAGE);
        self.blank(colors::PAGE);
    }

    pub fn append(&mut self, other: Flow) {
        self.lines.extend(other.lines);
    }

    // -- Layout --

    /// Starting column of every span of `line`.
    fn columns(&self, line: &Line) -> Vec<i32> {
        let total: i32 = line.spans.iter().map(Span::width).sum();
        let mut x = match line.align {
            Align::Left => MARGIN,
            Align::Center => ((self.width - total) / 2).max(0),
        };
        line.spans
            .iter()
            .map(|span| {
                let start = x;
                x += span.width();
                start
            })
            .collect()
    }

    /// Every link span, in reading order.
    pub fn links(&self) -> Vec<FlowLink> {
        let mut out = Vec::new();
        for (index, line) in self.lines.iter().enumerate() {
            for (span, x) in line.spans.iter().zip(self.columns(line)) {
                if let Some(route) = &span.link {
                    out.push(FlowLink {
                        line: index,
                        x,
                        width: span.width(),
                        label: span.label.clone().unwrap_or_else(|| span.text.clone()),
                        route: route.clone(),
                    });
                }
            }
        }
        out
    }

    /// Draw line `index` on screen row `y`.
    pub fn draw_line(&self, index: usize, grid: &Grid, y: i32) {
        let Some(line) = self.lines.get(index) else {
            return;
        };
        grid.slice(Range::new(0, y, self.width, y + 1))
            .fill(Cell::new(' ', line.fill));
        for (span, x) in line.spans.iter().zip(self.columns(line)) {
            grid.print(Point::new(x, y), &span.text, span.style);
        }
    }
}

/// Add the focus attributes to every cell of `area`.
pub fn highlight(grid: &Grid, area: Range) {
    for p in area.intersect(grid.bounds()) {
        let cell = grid.at(p);
        grid.set(p, cell.with_style(cell.style.add_attrs(colors::FOCUS)));
    }
}

use std::collections::HashMap;

use sitekit_core::{Cell, Grid, Point, Range, Style};

/// Text with optional in-band style markers.
///
/// A marker character registered with [`with_markup`](Self::with_markup)
/// is not printed; it switches the style of everything after it. `'\n'`
/// starts a new row.
#[derive(Debug, Clone, Default)]
pub struct StyledText {
    text: String,
    style: Style,
    markups: HashMap<char, Style>,
}

impl StyledText {
    /// Plain text in the default style.
    pub fn text(s: impl Into<String>) -> Self {
        Self {
            text: s.into(),
            ..Self::default()
        }
    }

    pub fn new(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
            markups: HashMap::new(),
        }
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Switch to `style` whenever `marker` appears in the text.
    pub fn with_markup(mut self, marker: char, style: Style) -> Self {
        self.markups.insert(marker, style);
        self
    }

    pub fn content(&self) -> &str {
        &self.text
    }

    pub fn style(&self) -> Style {
        self.style
    }

    /// Call `f` for every visible character with its relative position.
    /// Returns the position just after the last character.
    pub fn iter(&self, mut f: impl FnMut(Point, Cell)) -> Point {
        let mut pos = Point::ZERO;
        let mut style = self.style;
        for ch in self.text.chars() {
            if let Some(&s) = self.markups.get(&ch) {
                style = s;
            } else if ch == '\n' {
                pos = Point::new(0, pos.y + 1);
            } else {
                f(pos, Cell::new(ch, style));
                pos.x += 1;
            }
        }
        pos
    }

    /// Smallest width × height that shows the whole text.
    pub fn size(&self) -> Point {
        let mut size = Point::ZERO;
        self.iter(|p, _| {
            size.x = size.x.max(p.x + 1);
            size.y = size.y.max(p.y + 1);
        });
        size
    }

    /// Word-wrap to `width` columns. Words longer than a row are kept whole
    /// and overflow.
    pub fn wrap(&self, width: usize) -> StyledText {
        if width == 0 {
            return self.clone();
        }
        let mut out = String::with_capacity(self.text.len());
        for (i, line) in self.text.split('\n').enumerate() {
            if i > 0 {
                out.push('\n');
            }
            let mut col = 0;
            for word in line.split(' ').filter(|w| !w.is_empty()) {
                let len = self.visible_len(word);
                if col > 0 && col + 1 + len > width {
                    out.push('\n');
                    col = 0;
                } else if col > 0 {
                    out.push(' ');
                    col += 1;
                }
                out.push_str(word);
                col += len;
            }
        }
        StyledText {
            text: out,
            style: self.style,
            markups: self.markups.clone(),
        }
    }

    /// One single-row text per line.
    pub fn lines(&self) -> Vec<StyledText> {
        self.text
            .split('\n')
            .map(|line| StyledText {
                text: line.to_string(),
                style: self.style,
                markups: self.markups.clone(),
            })
            .collect()
    }

    /// Draw with the top-left corner at the grid's top-left corner. Returns
    /// the absolute range actually written.
    pub fn draw(&self, grid: &Grid) -> Range {
        let origin = grid.bounds().min;
        let mut written: Option<Range> = None;
        self.iter(|p, cell| {
            let abs = origin + p;
            if grid.contains(abs) {
                grid.set(abs, cell);
                let r = written.get_or_insert(Range::sized(abs, 1, 1));
                r.min = Point::new(r.min.x.min(abs.x), r.min.y.min(abs.y));
                r.max = Point::new(r.max.x.max(abs.x + 1), r.max.y.max(abs.y + 1));
            }
        });
        written.unwrap_or_default()
    }

    fn visible_len(&self, s: &str) -> usize {
        s.chars().filter(|c| !self.markups.contains_key(c)).count()
    }
}

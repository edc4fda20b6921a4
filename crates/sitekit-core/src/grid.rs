//! The [`Grid`] type: a 2D grid of [`Cell`]s with slice semantics.
//!
//! A `Grid` is a *view* into a shared backing buffer. Cloning a `Grid` yields
//! another view of the same storage; [`slice`](Grid::slice) narrows the view
//! without copying, so a widget can be handed exactly the area it owns.

use std::cell::RefCell;
use std::rc::Rc;

use crate::geom::{Point, Range};
use crate::style::{Cell, Style};

#[derive(Debug)]
struct Buffer {
    cells: Vec<Cell>,
    width: usize,
    height: usize,
}

impl Buffer {
    fn new(width: usize, height: usize) -> Self {
        Self {
            cells: vec![Cell::default(); width * height],
            width,
            height,
        }
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        let (x, y) = (usize::try_from(p.x).ok()?, usize::try_from(p.y).ok()?);
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }
}

/// A 2D grid of [`Cell`]s backed by shared storage.
#[derive(Debug, Clone)]
pub struct Grid {
    buffer: Rc<RefCell<Buffer>>,
    bounds: Range,
}

impl Grid {
    /// A `width` × `height` grid of blank cells. Negative sizes collapse to
    /// zero.
    pub fn new(width: i32, height: i32) -> Self {
        let (w, h) = (width.max(0), height.max(0));
        Self {
            buffer: Rc::new(RefCell::new(Buffer::new(w as usize, h as usize))),
            bounds: Range::new(0, 0, w, h),
        }
    }

    /// Absolute bounds of this view.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    /// A narrower view sharing the same buffer. The requested range is in
    /// absolute coordinates and is clipped to the current bounds.
    pub fn slice(&self, r: Range) -> Grid {
        Grid {
            buffer: Rc::clone(&self.buffer),
            bounds: self.bounds.intersect(r),
        }
    }

    /// Cell at `p`, or a blank cell outside the view.
    pub fn at(&self, p: Point) -> Cell {
        if !self.bounds.contains(p) {
            return Cell::default();
        }
        let buf = self.buffer.borrow();
        buf.index(p).map(|i| buf.cells[i]).unwrap_or_default()
    }

    /// Set the cell at `p`. Writes outside the view are dropped.
    pub fn set(&self, p: Point, cell: Cell) {
        if !self.bounds.contains(p) {
            return;
        }
        let mut buf = self.buffer.borrow_mut();
        if let Some(i) = buf.index(p) {
            buf.cells[i] = cell;
        }
    }

    pub fn fill(&self, cell: Cell) {
        let mut buf = self.buffer.borrow_mut();
        for p in self.bounds {
            if let Some(i) = buf.index(p) {
                buf.cells[i] = cell;
            }
        }
    }

    /// Write `text` starting at `p`, one cell per char, clipped to the view.
    /// Returns the position just after the last char.
    pub fn print(&self, p: Point, text: &str, style: Style) -> Point {
        let mut cur = p;
        for ch in text.chars() {
            self.set(cur, Cell::new(ch, style));
            cur.x += 1;
        }
        cur
    }

    /// The characters of row `y` within the view, trailing blanks included.
    /// Mostly useful for assertions on rendered output.
    pub fn row_text(&self, y: i32) -> String {
        (self.bounds.min.x..self.bounds.max.x)
            .map(|x| self.at(Point::new(x, y)).ch)
            .collect()
    }

    /// Copy `src` into `self`, aligning their top-left corners.
    pub fn copy_from(&self, src: &Grid) {
        let w = src.width().min(self.width());
        let h = src.height().min(self.height());
        for dy in 0..h {
            for dx in 0..w {
                let cell = src.at(src.bounds.min.shift(dx, dy));
                self.set(self.bounds.min.shift(dx, dy), cell);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Frame
// ---------------------------------------------------------------------------

/// A single cell that changed between frames.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameCell {
    pub cell: Cell,
    pub pos: Point,
}

/// The set of cells a driver has to repaint.
#[derive(Clone, Debug, Default)]
pub struct Frame {
    pub cells: Vec<FrameCell>,
    pub width: i32,
    pub height: i32,
    /// The driver must clear the screen before painting (after a resize).
    pub clear: bool,
}

impl Frame {
    /// A frame repainting every cell of `grid`.
    pub fn full(grid: &Grid) -> Frame {
        let bounds = grid.bounds();
        Frame {
            cells: bounds
                .iter()
                .map(|pos| FrameCell {
                    cell: grid.at(pos),
                    pos,
                })
                .collect(),
            width: bounds.width(),
            height: bounds.height(),
            clear: true,
        }
    }
}

/// The cells that differ between two same-sized grids.
pub fn compute_frame(prev: &Grid, curr: &Grid) -> Frame {
    let bounds = curr.bounds();
    let cells = bounds
        .iter()
        .filter_map(|pos| {
            let cell = curr.at(pos);
            (prev.at(pos) != cell).then_some(FrameCell { cell, pos })
        })
        .collect();
    Frame {
        cells,
        width: bounds.width(),
        height: bounds.height(),
        clear: false,
    }
}

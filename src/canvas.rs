//! Rasterizes the wave outlines into a grid of terminal cells.

use crate::theme::{Color, WaveTheme};
use crate::wave::{Outline, OverlayFrame};

/// What covers a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Fill {
    #[default]
    Empty,
    Top,
    Bottom,
}

impl Fill {
    pub fn glyph(self) -> char {
        match self {
            Self::Empty => ' ',
            Self::Top => '▒',
            Self::Bottom => '█',
        }
    }

    pub fn color(self, theme: &WaveTheme) -> Option<Color> {
        match self {
            Self::Empty => None,
            Self::Top => Some(theme.top),
            Self::Bottom => Some(theme.bottom),
        }
    }
}

/// A fixed size grid the overlay is scaled into.
#[derive(Debug, Clone)]
pub struct Canvas {
    columns: usize,
    rows: usize,
    cells: Vec<Fill>,
}

impl Canvas {
    pub fn new(columns: usize, rows: usize) -> Self {
        Self { columns, rows, cells: vec![Fill::Empty; columns * rows] }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn clear(&mut self) {
        self.cells.fill(Fill::Empty);
    }

    pub fn cell(&self, column: usize, row: usize) -> Fill {
        if column >= self.columns || row >= self.rows {
            return Fill::Empty;
        }
        self.cells[row * self.columns + column]
    }

    /// Scales the overlay into the grid and fills every cell under each curve.
    ///
    /// The bottom wave is painted last so it covers the top one where they overlap.
    pub fn paint(&mut self, frame: &OverlayFrame, top: &Outline, bottom: &Outline) {
        self.clear();
        if frame.height <= 0.0 || frame.width <= 0.0 || self.columns == 0 || self.rows == 0 {
            return;
        }
        self.paint_outline(frame, top, Fill::Top);
        self.paint_outline(frame, bottom, Fill::Bottom);
    }

    fn paint_outline(&mut self, frame: &OverlayFrame, outline: &Outline, fill: Fill) {
        let curve = outline.curve();
        if curve.is_empty() {
            return;
        }
        let cell_width = frame.width / self.columns as f64;
        let cell_height = frame.height / self.rows as f64;
        for column in 0..self.columns {
            let x = (column as f64 + 0.5) * cell_width;
            // Samples sit on whole pixels, sample `i` is at x = i.
            let index = (x.round() as usize).min(curve.len() - 1);
            let surface = curve[index].y;
            for row in 0..self.rows {
                let y = (row as f64 + 0.5) * cell_height;
                if y >= surface {
                    self.cells[row * self.columns + column] = fill;
                }
            }
        }
    }

    /// The grid as plain text, one string per row.
    pub fn lines(&self) -> Vec<String> {
        self.cells.chunks(self.columns.max(1)).map(|row| row.iter().map(|fill| fill.glyph()).collect()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wave::{Surface, WaveShape};

    fn shape(amplitude: f64, baseline: f64, height: f64) -> (WaveShape, Surface) {
        let surface = Surface::new(40.0).unwrap();
        (WaveShape { amplitude, cycle: surface.cycle(), phase: 0.0, baseline, height }, surface)
    }

    #[test]
    fn flat_wave_fills_lower_half() {
        let (shape, surface) = shape(0.0, 5.0, 5.0);
        let mut canvas = Canvas::new(8, 4);
        let width = surface.width();
        canvas.paint(&shape.overlay_frame(width), &shape.top_outline(width), &shape.bottom_outline(width));
        assert_eq!(canvas.lines(), &["        ", "        ", "████████", "████████"]);
    }

    #[test]
    fn top_wave_visible_where_bottom_dips() {
        let (shape, surface) = shape(4.0, 8.0, 8.0);
        let mut canvas = Canvas::new(40, 16);
        let width = surface.width();
        canvas.paint(&shape.overlay_frame(width), &shape.top_outline(width), &shape.bottom_outline(width));

        let mut saw_top = false;
        for column in 0..canvas.columns() {
            for row in 0..canvas.rows() {
                saw_top |= canvas.cell(column, row) == Fill::Top;
            }
            // Deep enough under both curves.
            assert_eq!(canvas.cell(column, 15), Fill::Bottom);
        }
        assert!(saw_top);
    }

    #[test]
    fn empty_overlay_paints_nothing() {
        let mut canvas = Canvas::new(4, 2);
        let frame = OverlayFrame { x: 0.0, y: 0.0, width: 40.0, height: 0.0 };
        canvas.paint(&frame, &Outline::default(), &Outline::default());
        assert!(canvas.lines().iter().all(|line| line.trim().is_empty()));
        assert_eq!(canvas.cell(10, 10), Fill::Empty);
    }

    #[test]
    fn colors_follow_theme() {
        let theme = WaveTheme::default();
        assert_eq!(Fill::Top.color(&theme), Some(theme.top));
        assert_eq!(Fill::Bottom.color(&theme), Some(theme.bottom));
        assert_eq!(Fill::Empty.color(&theme), None);
    }
}

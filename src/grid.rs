use crate::pagesize::PageSize;
use crate::rect::Rect;
use crate::units::Pt;

/// Which side of the sheet a drawing pass targets. The text pass mirrors the
/// column order so that, once the printed sheet is flipped over and cut, each
/// card's text lands behind its code.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Pass {
    Code,
    Text,
}

/// Maps record indices onto a grid of fixed-size square cells centered
/// horizontally on a fixed page. Cells are filled row-major from the top-left
/// of the page; the grid never places a cell across a page edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub page_size: PageSize,
    pub cell_side: Pt,
    pub top_margin: Pt,
}

impl GridLayout {
    pub fn new(page_size: PageSize, cell_side: Pt, top_margin: Pt) -> GridLayout {
        GridLayout {
            page_size,
            cell_side,
            top_margin,
        }
    }

    pub fn cells_per_row(&self) -> usize {
        (self.page_size.0 .0 / self.cell_side.0).floor() as usize
    }

    pub fn cells_per_column(&self) -> usize {
        (self.page_size.1 .0 / self.cell_side.0).floor() as usize
    }

    pub fn cells_per_page(&self) -> usize {
        self.cells_per_row() * self.cells_per_column()
    }

    /// The horizontal margin that centers the grid on the page
    pub fn h_margin(&self) -> Pt {
        (self.page_size.0 - self.cell_side * self.cells_per_row() as f32) / 2.0
    }

    /// Which document-input page the record at `index` lands on
    pub fn page_of(&self, index: usize) -> usize {
        index / self.cells_per_page()
    }

    /// How many input pages `record_count` records occupy (the last page may
    /// be partial)
    pub fn page_count(&self, record_count: usize) -> usize {
        record_count.div_ceil(self.cells_per_page())
    }

    /// The grid column of the record at `index` for the given pass. The text
    /// pass flips the column so the sheet backs align after printing.
    pub fn column_of(&self, index: usize, pass: Pass) -> usize {
        let col = (index % self.cells_per_page()) % self.cells_per_row();
        match pass {
            Pass::Code => col,
            Pass::Text => self.cells_per_row() - 1 - col,
        }
    }

    /// The grid row of the record at `index` (same for both passes)
    pub fn row_of(&self, index: usize) -> usize {
        (index % self.cells_per_page()) / self.cells_per_row()
    }

    /// The bottom-left corner of the cell holding the record at `index`
    pub fn cell_origin(&self, index: usize, pass: Pass) -> (Pt, Pt) {
        let col = self.column_of(index, pass);
        let row = self.row_of(index);
        let x = self.h_margin() + self.cell_side * col as f32;
        let y = self.page_size.1 - self.top_margin - self.cell_side * (row + 1) as f32;
        (x, y)
    }

    /// The full bounding rectangle of the cell holding the record at `index`
    pub fn cell_rect(&self, index: usize, pass: Pass) -> Rect {
        let (x, y) = self.cell_origin(index, pass);
        Rect {
            x1: x,
            y1: y,
            x2: x + self.cell_side,
            y2: y + self.cell_side,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagesize;
    use crate::units::Cm;

    fn a4_grid() -> GridLayout {
        GridLayout::new(pagesize::A4, Pt::from(Cm(6.5)), Pt::from(Cm(0.8)))
    }

    #[test]
    fn a4_fits_three_by_four() {
        let grid = a4_grid();
        assert_eq!(grid.cells_per_row(), 3);
        assert_eq!(grid.cells_per_column(), 4);
        assert_eq!(grid.cells_per_page(), 12);
    }

    #[test]
    fn grid_is_centered_and_inside_the_page() {
        let grid = a4_grid();
        let per_row = grid.cells_per_row() as f32;
        let expected = (grid.page_size.0 - grid.cell_side * per_row) / 2.0;
        assert_eq!(grid.h_margin(), expected);

        // no cell's right edge may exceed h_margin + cells_per_row * side
        let limit = grid.h_margin() + grid.cell_side * per_row;
        for index in 0..grid.cells_per_page() {
            let rect = grid.cell_rect(index, Pass::Code);
            assert!(rect.x2 <= limit + Pt(1e-3));
            assert!(rect.x1 >= grid.h_margin() - Pt(1e-3));
            assert!(rect.y1 >= Pt(0.0));
            assert!(rect.y2 <= grid.page_size.1);
        }
    }

    #[test]
    fn indices_fill_rows_before_columns() {
        let grid = a4_grid();
        assert_eq!(grid.column_of(0, Pass::Code), 0);
        assert_eq!(grid.column_of(1, Pass::Code), 1);
        assert_eq!(grid.column_of(2, Pass::Code), 2);
        assert_eq!(grid.column_of(3, Pass::Code), 0);
        assert_eq!(grid.row_of(0), 0);
        assert_eq!(grid.row_of(2), 0);
        assert_eq!(grid.row_of(3), 1);
        // wraps around on the next page
        assert_eq!(grid.column_of(12, Pass::Code), 0);
        assert_eq!(grid.row_of(12), 0);
        assert_eq!(grid.page_of(11), 0);
        assert_eq!(grid.page_of(12), 1);
    }

    #[test]
    fn text_pass_mirrors_the_column_keeping_the_row() {
        let grid = a4_grid();
        for index in 0..40 {
            let code_col = grid.column_of(index, Pass::Code);
            let text_col = grid.column_of(index, Pass::Text);
            assert_eq!(text_col, grid.cells_per_row() - 1 - code_col);
            let code = grid.cell_rect(index, Pass::Code);
            let text = grid.cell_rect(index, Pass::Text);
            assert_eq!(code.y1, text.y1);
            assert_eq!(code.y2, text.y2);
        }
    }

    #[test]
    fn rows_stack_downwards_from_the_top_margin() {
        let grid = a4_grid();
        let (_, y0) = grid.cell_origin(0, Pass::Code);
        let (_, y1) = grid.cell_origin(grid.cells_per_row(), Pass::Code);
        assert_eq!(y0, grid.page_size.1 - grid.top_margin - grid.cell_side);
        assert_eq!(y1, y0 - grid.cell_side);
    }

    #[test]
    fn last_page_may_be_partial() {
        let grid = a4_grid();
        assert_eq!(grid.page_count(0), 0);
        assert_eq!(grid.page_count(1), 1);
        assert_eq!(grid.page_count(12), 1);
        assert_eq!(grid.page_count(13), 2);
    }
}

//! 2D cell buffer.
//!
//! This module defines the `Grid` struct, a fixed-size 2D buffer used to hold
//! luminance samples and [`Cell`]s between pipeline stages. Grid dimensions
//! are chosen once at session start and never change afterwards, so there is
//! deliberately no resize support.
//!
//! [`Cell`]: crate::rendering::cell::Cell

use std::fmt;
use std::fmt::{Debug, Formatter};
use std::ops::{Index, IndexMut};

/// A 2D buffer with a fixed width and height, generic over its element type.
///
/// # Example
///
/// ```rust
/// use asciicam::rendering::grid::Grid;
/// use asciicam::rendering::cell::Cell;
///
/// let mut grid: Grid<Cell> = Grid::new(10, 5, Cell::default());
/// grid[(2, 3)] = Cell::new('X');
///
/// assert_eq!(grid.width(), 10);
/// assert_eq!(grid.height(), 5);
/// assert_eq!(grid[(2, 3)].glyph, 'X');
/// assert_eq!(grid[(5, 1)], Cell::default());
/// ```
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T: Debug> Debug for Grid<T> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(
            f,
            "Grid {{ width: {}, height: {}, cells: {:?} }}",
            self.width, self.height, self.cells
        )
    }
}

impl<T: Clone> Clone for Grid<T> {
    fn clone(&self) -> Self {
        Self {
            width: self.width,
            height: self.height,
            cells: self.cells.clone(),
        }
    }
}

impl<T: PartialEq> PartialEq for Grid<T> {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height && self.cells == other.cells
    }
}

impl<T: Clone> Grid<T> {
    /// Creates a new `Grid` with the given width and height, with every cell
    /// initialized to the `default` value.
    pub fn new(width: usize, height: usize, default: T) -> Self {
        Self {
            width,
            height,
            cells: vec![default; width * height],
        }
    }
}

impl<T> Grid<T> {
    #[inline]
    fn get_index(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.width && y < self.height,
            "coordinates ({x}, {y}) out of bounds for {}x{} grid",
            self.width,
            self.height
        );
        y * self.width + x
    }

    /// Gets the height of the grid (number of rows).
    pub fn height(&self) -> usize {
        self.height
    }

    /// Gets the width of the grid (number of columns).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Gets a reference to the cell at (x, y), or `None` if out of bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get(self.get_index(x, y))
    }

    /// Returns an iterator over `(x, y, &cell)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &T)> {
        self.cells.iter().enumerate().map(|(idx, cell)| {
            let x = idx % self.width;
            let y = idx / self.width;
            (x, y, cell)
        })
    }

    /// Returns an iterator over the rows of the grid.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.cells.chunks(self.width)
    }
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    fn index(&self, (x, y): (usize, usize)) -> &Self::Output {
        &self.cells[self.get_index(x, y)]
    }
}

impl<T> IndexMut<(usize, usize)> for Grid<T> {
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut Self::Output {
        let idx = self.get_index(x, y);
        &mut self.cells[idx]
    }
}

use core::str::FromStr;
use std::fmt;
use std::ops::{Index, IndexMut};

use enum_map::Enum;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A (row, col) pair, 0-indexed from the top-left corner.
pub type Position = (usize, usize);

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Enum)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Left and right act on rows, up and down on columns.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// Right and down slide toward the high index.
    pub fn is_reverse(self) -> bool {
        matches!(self, Direction::Right | Direction::Down)
    }

    pub fn invert(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Cells of line `line` on an `size`x`size` grid, ordered so that the
    /// move points toward index 0.
    pub fn line_cells(self, size: usize, line: usize) -> Vec<Position> {
        (0..size)
            .map(|i| if self.is_reverse() { size - 1 - i } else { i })
            .map(|i| if self.is_horizontal() { (line, i) } else { (i, line) })
            .collect()
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };

        f.write_str(name)
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            _ => Err(format!("invalid direction: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

pub struct GridIter<'a, T> {
    grid: &'a Grid<T>,
    pos: usize,
}

impl<T> Grid<T> {
    pub fn new<F: FnMut(usize, usize) -> T>(rows: usize, cols: usize, initializer: &mut F) -> Self {
        let mut data = Vec::with_capacity(rows * cols);

        for row in 0..rows {
            for col in 0..cols {
                data.push(initializer(row, col));
            }
        }

        Self { data, rows, cols }
    }

    pub fn size(&self) -> usize {
        self.rows * self.cols
    }

    pub fn iter(&self) -> GridIter<'_, T> {
        GridIter { grid: self, pos: 0 }
    }

    fn index_of(&self, row: usize, col: usize) -> Option<usize> {
        if row >= self.rows || col >= self.cols {
            None
        } else {
            Some(col + row * self.cols)
        }
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        self.index_of(row, col).map(|index| &self.data[index])
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut T> {
        let index = self.index_of(row, col)?;

        self.data.get_mut(index)
    }

    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<(), &'static str> {
        let index = self.index_of(row, col).ok_or("Cell out of range")?;

        self.data[index] = value;

        Ok(())
    }

    pub fn get_neighbor(&self, row: usize, col: usize, direction: Direction) -> Option<&T> {
        let (row, col) = match direction {
            Direction::Up => (row.checked_sub(1)?, col),
            Direction::Down => (row + 1, col),
            Direction::Left => (row, col.checked_sub(1)?),
            Direction::Right => (row, col + 1),
        };

        self.get(row, col)
    }
}

impl<T> Index<Position> for Grid<T> {
    type Output = T;

    fn index(&self, (row, col): Position) -> &T {
        match self.index_of(row, col) {
            Some(index) => &self.data[index],
            None => panic!("cell ({}, {}) outside {}x{} grid", row, col, self.rows, self.cols),
        }
    }
}

impl<T> IndexMut<Position> for Grid<T> {
    fn index_mut(&mut self, (row, col): Position) -> &mut T {
        match self.index_of(row, col) {
            Some(index) => &mut self.data[index],
            None => panic!("cell ({}, {}) outside {}x{} grid", row, col, self.rows, self.cols),
        }
    }
}

impl<'a, T> IntoIterator for &'a Grid<T> {
    type Item = (usize, usize, &'a T);
    type IntoIter = GridIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> Iterator for GridIter<'a, T> {
    type Item = (usize, usize, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.grid.data.len() {
            None
        } else {
            let row = self.pos / self.grid.cols;
            let col = self.pos % self.grid.cols;
            let value = &self.grid.data[self.pos];

            self.pos += 1;

            Some((row, col, value))
        }
    }
}

//! Basin grid: the per-cell working state the resolver mutates.
//!
//! Built once from a raw elevation map. Every cell starts as its own
//! pending sink, numbered in row-major order; only `sink` and `visited`
//! change afterwards.
use serde::Serialize;

use crate::error::{Result, WatershedError};

/// Index of a finalized basin, in discovery order. `BasinId(0)` is "a".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct BasinId(pub usize);

/// Sink identifier carried by a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SinkId {
    /// Unresolved: the cell's own row-major index.
    Pending(usize),
    /// Resolved to a labelled basin.
    Basin(BasinId),
}

impl SinkId {
    pub fn basin(self) -> Option<BasinId> {
        match self {
            SinkId::Basin(id) => Some(id),
            SinkId::Pending(_) => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Cell<H> {
    pub row: usize,
    pub col: usize,
    pub height: H,
    pub sink: SinkId,
    pub visited: bool,
}

/// Rectangular grid of cells, row-major.
#[derive(Debug, Clone, Serialize)]
pub struct BasinGrid<H> {
    cells: Vec<Cell<H>>,
    pub width: usize,
    pub height: usize,
}

/// Validate that `rows` is non-empty and rectangular; returns the row width.
pub fn check_shape<H, R: AsRef<[H]>>(rows: &[R]) -> Result<usize> {
    let width = match rows.first() {
        Some(first) if !first.as_ref().is_empty() => first.as_ref().len(),
        _ => return Err(WatershedError::EmptyInput),
    };
    for (r, row) in rows.iter().enumerate() {
        let found = row.as_ref().len();
        if found != width {
            return Err(WatershedError::RaggedRow {
                row: r,
                expected: width,
                found,
            });
        }
    }
    Ok(width)
}

impl<H: Copy> BasinGrid<H> {
    /// Build a grid from rows of elevations.
    ///
    /// Rejects an empty outer sequence, an empty first row and ragged rows.
    /// Pending sink ids are assigned 0, 1, 2, … in row-major order.
    pub fn build<R: AsRef<[H]>>(rows: &[R]) -> Result<Self> {
        let width = check_shape(rows)?;

        let mut cells = Vec::with_capacity(width * rows.len());
        for (r, row) in rows.iter().enumerate() {
            for (c, &height) in row.as_ref().iter().enumerate() {
                cells.push(Cell {
                    row: r,
                    col: c,
                    height,
                    sink: SinkId::Pending(cells.len()),
                    visited: false,
                });
            }
        }

        Ok(Self {
            cells,
            width,
            height: rows.len(),
        })
    }
}

impl<H> BasinGrid<H> {
    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    /// True if `(row, col)` lies inside the grid.
    #[inline]
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> &Cell<H> {
        &self.cells[self.index(row, col)]
    }

    #[inline]
    pub(crate) fn cell_mut(&mut self, idx: usize) -> &mut Cell<H> {
        &mut self.cells[idx]
    }

    /// All cells, row-major.
    pub fn cells(&self) -> &[Cell<H>] {
        &self.cells
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell<H>]> + '_ {
        self.cells.chunks(self.width)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// True once every cell has been assigned to a basin.
    pub fn is_resolved(&self) -> bool {
        self.cells.iter().all(|c| c.visited)
    }
}

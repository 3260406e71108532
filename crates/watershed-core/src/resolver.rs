//! Drainage resolver: steepest-descent flow with path compression.
//!
//! Every cell drains to its strictly lowest 4-connected neighbour, scanned
//! north, west, east, south; ties keep the earlier candidate, and an equal
//! neighbour never replaces the cell itself. Following that pointer from any
//! cell walks a strictly descending chain that ends at a local minimum or at
//! a cell whose basin is already known. Each walk is done with an explicit
//! path stack, so chain length is limited only by memory.
//!
//! Basins are numbered the first time their minimum is reached by the
//! row-major driving scan, not by the minima's own positions.
use log::{debug, trace};

use crate::error::Result;
use crate::grid::{BasinGrid, SinkId};
use crate::label::{LabelAllocator, LabelPolicy};

/// Row-major index of the cell `idx` drains into, or `None` for a local minimum.
fn lowest_neighbour_idx<H: PartialOrd + Copy>(grid: &BasinGrid<H>, idx: usize) -> Option<usize> {
    let cells = grid.cells();
    let (row, col) = (cells[idx].row, cells[idx].col);

    let north = (row > 0).then(|| idx - grid.width);
    let west = (col > 0).then(|| idx - 1);
    let east = (col + 1 < grid.width).then(|| idx + 1);
    let south = (row + 1 < grid.height).then(|| idx + grid.width);

    let mut lowest = idx;
    for n in [north, west, east, south].into_iter().flatten() {
        if cells[n].height < cells[lowest].height {
            lowest = n;
        }
    }
    (lowest != idx).then_some(lowest)
}

/// Position of the neighbour that `(row, col)` drains into. `None` if the
/// cell is a local minimum (no strictly lower 4-connected neighbour) or lies
/// outside the grid.
pub fn lowest_neighbour<H: PartialOrd + Copy>(
    grid: &BasinGrid<H>,
    row: usize,
    col: usize,
) -> Option<(usize, usize)> {
    if !grid.contains(row, col) {
        return None;
    }
    lowest_neighbour_idx(grid, grid.index(row, col)).map(|n| {
        let cell = &grid.cells()[n];
        (cell.row, cell.col)
    })
}

/// True if `(row, col)` is in the grid and no 4-connected neighbour is
/// strictly lower.
pub fn is_local_minimum<H: PartialOrd + Copy>(grid: &BasinGrid<H>, row: usize, col: usize) -> bool {
    grid.contains(row, col) && lowest_neighbour(grid, row, col).is_none()
}

/// Resolve every unvisited cell of `grid` to its basin, in place.
///
/// Returns the number of basins discovered by this call. Cells already
/// visited are left untouched, so resolving a finished grid again is a
/// no-op that returns 0.
///
/// On `TooManyBasins` the grid is left partially resolved. A later call
/// numbers new basins after the ones already present.
pub fn resolve<H: PartialOrd + Copy>(grid: &mut BasinGrid<H>, policy: LabelPolicy) -> Result<usize> {
    let known = grid
        .cells()
        .iter()
        .filter_map(|c| c.sink.basin())
        .map(|id| id.0 + 1)
        .max()
        .unwrap_or(0);
    let mut labels = LabelAllocator::resume(policy, known);
    let mut path = Vec::new();

    for start in 0..grid.len() {
        if grid.cells()[start].visited {
            continue;
        }
        drain(grid, start, &mut labels, &mut path)?;
    }

    let discovered = labels.issued() - known;
    debug!(
        "resolved {}x{} grid into {} new basins",
        grid.height,
        grid.width,
        discovered
    );
    Ok(discovered)
}

/// Walk downhill from `start` until the basin is known, then stamp it on
/// every cell of the walk.
fn drain<H: PartialOrd + Copy>(
    grid: &mut BasinGrid<H>,
    start: usize,
    labels: &mut LabelAllocator,
    path: &mut Vec<usize>,
) -> Result<()> {
    path.clear();
    let mut current = start;

    let sink = loop {
        path.push(current);
        match lowest_neighbour_idx(grid, current) {
            None => {
                let cell = &grid.cells()[current];
                break match cell.sink {
                    SinkId::Pending(_) => {
                        let id = labels.next_basin()?;
                        debug!(
                            "basin {} ({}) at ({}, {})",
                            id.0,
                            id.label(),
                            cell.row,
                            cell.col
                        );
                        SinkId::Basin(id)
                    }
                    resolved => resolved,
                };
            }
            Some(next) => {
                let next_cell = &grid.cells()[next];
                if next_cell.visited || next_cell.sink == grid.cells()[current].sink {
                    break next_cell.sink;
                }
                current = next;
            }
        }
    };

    trace!("drained {} cells from index {} into {:?}", path.len(), start, sink);
    for &idx in path.iter() {
        let cell = grid.cell_mut(idx);
        cell.sink = sink;
        cell.visited = true;
    }
    Ok(())
}

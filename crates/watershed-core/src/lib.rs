//! Drainage basin labelling over rectangular elevation grids.
//!
//! Every cell is assigned to the local minimum water would reach by always
//! stepping to the strictly lowest 4-connected neighbour. Basins get
//! lowercase labels in the order the row-major scan discovers them.
//!
//! ```
//! let map = watershed_core::watersheds(&[vec![9, 6, 3], vec![5, 9, 6], vec![3, 5, 9]]).unwrap();
//! assert_eq!(map.labels()[0], ["a", "b", "b"]);
//! assert_eq!(map.basin_count(), 2);
//! ```
pub mod basins;
pub mod config;
pub mod error;
pub mod grid;
pub mod label;
pub mod resolver;

use serde::Serialize;

pub use basins::{summarize, BasinSummary};
pub use config::WatershedConfig;
pub use error::{Result, WatershedError};
pub use grid::{BasinGrid, BasinId, Cell, SinkId};
pub use label::{basin_label, LabelPolicy};
pub use resolver::resolve;

/// A fully resolved grid and its basins.
#[derive(Debug, Clone)]
pub struct BasinMap<H> {
    grid: BasinGrid<H>,
    basins: Vec<BasinSummary<H>>,
}

/// Serializable view of a [`BasinMap`] for display collaborators.
#[derive(Debug, Clone, Serialize)]
pub struct BasinReport<H> {
    pub width: usize,
    pub height: usize,
    pub labels: Vec<Vec<String>>,
    pub basins: Vec<BasinSummary<H>>,
}

impl<H: PartialOrd + Copy> BasinMap<H> {
    pub fn grid(&self) -> &BasinGrid<H> {
        &self.grid
    }

    pub fn basins(&self) -> &[BasinSummary<H>] {
        &self.basins
    }

    pub fn basin_count(&self) -> usize {
        self.basins.len()
    }

    /// Label of the basin `(row, col)` drains to.
    pub fn label_at(&self, row: usize, col: usize) -> Option<&str> {
        if !self.grid.contains(row, col) {
            return None;
        }
        let id = self.grid.get(row, col).sink.basin()?;
        self.basins.get(id.0).map(|b| b.label.as_str())
    }

    /// Basin labels, one inner vector per grid row.
    pub fn labels(&self) -> Vec<Vec<String>> {
        self.grid
            .rows()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.sink.basin().map(BasinId::label).unwrap_or_default())
                    .collect()
            })
            .collect()
    }

    pub fn report(&self) -> BasinReport<H> {
        BasinReport {
            width: self.grid.width,
            height: self.grid.height,
            labels: self.labels(),
            basins: self.basins.clone(),
        }
    }
}

/// Label the drainage basins of `elevation_map` with the default config.
pub fn watersheds<H, R>(elevation_map: &[R]) -> Result<BasinMap<H>>
where
    H: PartialOrd + Copy,
    R: AsRef<[H]>,
{
    watersheds_with(elevation_map, &WatershedConfig::default())
}

/// Label the drainage basins of `elevation_map`.
///
/// Fails with [`WatershedError::EmptyInput`] for an empty map or empty first
/// row and [`WatershedError::RaggedRow`] for non-rectangular input, before
/// any resolution happens. No partial grid is returned on error.
pub fn watersheds_with<H, R>(elevation_map: &[R], config: &WatershedConfig) -> Result<BasinMap<H>>
where
    H: PartialOrd + Copy,
    R: AsRef<[H]>,
{
    let mut grid = BasinGrid::build(elevation_map)?;
    resolve(&mut grid, config.label_policy)?;
    let basins = summarize(&grid);
    Ok(BasinMap { grid, basins })
}

/// Parse a JSON elevation map (array of arrays of numbers).
///
/// JSON `null` counts as absent input. Shape is validated the same way
/// [`watersheds`] does, so a parsed map is always safe to resolve.
pub fn parse_elevation_map(json: &str) -> Result<Vec<Vec<f64>>> {
    let rows: Option<Vec<Vec<f64>>> = serde_json::from_str(json)?;
    let rows = rows.ok_or(WatershedError::EmptyInput)?;
    grid::check_shape(&rows)?;
    Ok(rows)
}

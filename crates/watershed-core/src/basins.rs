/// Per-basin statistics over a resolved grid.
use serde::Serialize;

use crate::grid::{BasinGrid, BasinId};
use crate::resolver::is_local_minimum;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BasinSummary<H> {
    pub id: usize,
    pub label: String,
    /// Position and elevation of the local minimum the basin drains to.
    pub sink_row: usize,
    pub sink_col: usize,
    pub sink_height: H,
    pub area_cells: usize,
}

/// One summary per basin, ordered by basin id (discovery order).
///
/// Unresolved cells are skipped, so on a fully resolved grid the areas sum
/// to the cell count.
pub fn summarize<H: PartialOrd + Copy>(grid: &BasinGrid<H>) -> Vec<BasinSummary<H>> {
    let mut basins: Vec<Option<BasinSummary<H>>> = Vec::new();
    let mut areas: Vec<usize> = Vec::new();

    for cell in grid.cells() {
        let Some(BasinId(id)) = cell.sink.basin() else {
            continue;
        };
        if id >= areas.len() {
            areas.resize(id + 1, 0);
            basins.resize(id + 1, None);
        }
        areas[id] += 1;
        if basins[id].is_none() && is_local_minimum(grid, cell.row, cell.col) {
            basins[id] = Some(BasinSummary {
                id,
                label: BasinId(id).label(),
                sink_row: cell.row,
                sink_col: cell.col,
                sink_height: cell.height,
                area_cells: 0,
            });
        }
    }

    basins
        .into_iter()
        .zip(areas)
        .filter_map(|(basin, area)| basin.map(|b| BasinSummary { area_cells: area, ..b }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::LabelPolicy;
    use crate::resolver::resolve;

    #[test]
    fn summaries_locate_sinks_and_count_cells() {
        let mut grid = BasinGrid::build(&[vec![9, 6, 3], vec![5, 9, 6], vec![3, 5, 9]]).unwrap();
        resolve(&mut grid, LabelPolicy::Extended).unwrap();
        let basins = summarize(&grid);

        assert_eq!(basins.len(), 2);
        assert_eq!(basins[0].label, "a");
        assert_eq!((basins[0].sink_row, basins[0].sink_col, basins[0].sink_height), (2, 0, 3));
        assert_eq!(basins[0].area_cells, 6);
        assert_eq!(basins[1].label, "b");
        assert_eq!((basins[1].sink_row, basins[1].sink_col), (0, 2));
        assert_eq!(basins[1].area_cells, 3);
    }

    #[test]
    fn basin_areas_cover_all_cells() {
        let rows: Vec<Vec<i32>> = (0..12)
            .map(|r| (0..17).map(|c| (r * 7 + c * 13) % 11).collect())
            .collect();
        let mut grid = BasinGrid::build(&rows).unwrap();
        let count = resolve(&mut grid, LabelPolicy::Extended).unwrap();
        let basins = summarize(&grid);

        assert_eq!(basins.len(), count);
        let total: usize = basins.iter().map(|b| b.area_cells).sum();
        assert_eq!(total, 12 * 17, "basin areas must sum to total cells, got {total}");
    }

    #[test]
    fn unresolved_grid_has_no_basins() {
        let grid = BasinGrid::build(&[vec![1, 2]]).unwrap();
        assert!(summarize(&grid).is_empty());
    }
}

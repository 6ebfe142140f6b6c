//! Territory capture: trail thickening and enclosed-area flood fill.

use std::collections::VecDeque;

use super::state::{Cell, GridPos, TerritoryGrid, Trail};

const NEIGHBOURS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ClaimResult {
    /// Cells flipped to owned by stamping the trail
    pub trail_cells: usize,
    /// Cells flipped to owned because they were enclosed
    pub enclosed_cells: usize,
    /// Every cell that changed from free to owned, stamped cells first
    pub newly_owned: Vec<GridPos>,
}

impl ClaimResult {
    pub fn cells_claimed(&self) -> usize {
        self.trail_cells + self.enclosed_cells
    }
}

/// Stamps the trail into the grid and then fills every enclosed free region.
pub fn claim_territory(territory: &mut TerritoryGrid, trail: &Trail, stamp_radius: i32) -> ClaimResult {
    let stamped = stamp_trail(territory, trail, stamp_radius);
    let enclosed = fill_enclosed(territory);

    let mut result = ClaimResult {
        trail_cells: stamped.len(),
        enclosed_cells: enclosed.len(),
        newly_owned: stamped,
    };
    result.newly_owned.extend(enclosed);
    result
}

/// Marks a `(2r+1) x (2r+1)` block around every trail sample as owned.
///
/// A one-cell-wide trail leaves diagonal gaps the 4-way fill would leak
/// through, so `radius` should be at least 1.
pub fn stamp_trail(territory: &mut TerritoryGrid, trail: &Trail, radius: i32) -> Vec<GridPos> {
    let mut stamped = Vec::new();
    for point in trail.points() {
        for dr in -radius..=radius {
            for dc in -radius..=radius {
                let pos = point.cell.offset(dc, dr);
                if territory.in_bounds(&pos) && !territory.is_owned(&pos) {
                    territory.set(&pos, Cell::Owned);
                    stamped.push(pos);
                }
            }
        }
    }
    stamped
}

/// Converts every free cell not 4-connected to the grid border into owned
/// territory and returns the converted cells in row-major order.
pub fn fill_enclosed(territory: &mut TerritoryGrid) -> Vec<GridPos> {
    let outside = reachable_from_border(territory);
    let (width, height) = territory.get_grid_dimensions();

    let mut filled = Vec::new();
    for row in 0..height as i32 {
        for col in 0..width as i32 {
            let pos = GridPos::new(col, row);
            let idx = row as usize * width as usize + col as usize;
            if !outside[idx] && !territory.is_owned(&pos) {
                territory.set(&pos, Cell::Owned);
                filled.push(pos);
            }
        }
    }
    filled
}

/// Multi-source BFS seeded with every free border cell. The returned mask
/// is row-major and true for free cells connected to the outside.
fn reachable_from_border(territory: &TerritoryGrid) -> Vec<bool> {
    let (width, height) = territory.get_grid_dimensions();
    let (w, h) = (width as i32, height as i32);
    let idx = |pos: &GridPos| pos.row as usize * width as usize + pos.col as usize;

    let mut visited = vec![false; territory.get_total_cells()];
    let mut queue: VecDeque<GridPos> = VecDeque::new();

    let seed = |pos: GridPos, visited: &mut Vec<bool>, queue: &mut VecDeque<GridPos>| {
        if territory.in_bounds(&pos) && !territory.is_owned(&pos) && !visited[idx(&pos)] {
            visited[idx(&pos)] = true;
            queue.push_back(pos);
        }
    };

    for col in 0..w {
        seed(GridPos::new(col, 0), &mut visited, &mut queue);
        seed(GridPos::new(col, h - 1), &mut visited, &mut queue);
    }
    for row in 0..h {
        seed(GridPos::new(0, row), &mut visited, &mut queue);
        seed(GridPos::new(w - 1, row), &mut visited, &mut queue);
    }

    while let Some(pos) = queue.pop_front() {
        for (dc, dr) in NEIGHBOURS {
            seed(pos.offset(dc, dr), &mut visited, &mut queue);
        }
    }

    visited
}

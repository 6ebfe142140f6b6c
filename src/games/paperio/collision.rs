//! Death checks run every tick after the player moves.

use super::config::{CollisionMode, PaperioConfig};
use super::state::{GridPos, TerritoryGrid, Trail, TrailPoint};

/// True when `cell` lies outside `[0, width) x [0, height)`.
pub fn hits_boundary(territory: &TerritoryGrid, cell: &GridPos) -> bool {
    !territory.in_bounds(cell)
}

/// Compares the head sample against every trail sample older than the
/// guard threshold. The check is skipped until the trail holds more than
/// `guard_threshold` samples.
pub fn hits_own_trail(trail: &Trail, head: &TrailPoint, config: &PaperioConfig) -> bool {
    if trail.len() <= config.guard_threshold {
        return false;
    }

    let hit_radius = config.player_size / 2.0;
    trail
        .older_than(config.guard_threshold)
        .iter()
        .any(|point| collides(point, head, config.collision_mode, hit_radius))
}

fn collides(a: &TrailPoint, b: &TrailPoint, mode: CollisionMode, hit_radius: f64) -> bool {
    match mode {
        CollisionMode::SameCell => a.cell == b.cell,
        CollisionMode::Adjacent => a.cell.chebyshev(&b.cell) < 2,
        CollisionMode::Radius => a.world.distance(&b.world) < hit_radius,
    }
}

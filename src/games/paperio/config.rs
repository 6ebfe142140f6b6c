use std::time::Duration;

use crate::game::traits::{GameError, TickRate};

/// Largest territory grid a world may map to (4096 x 4096 cells).
pub const MAX_GRID_CELLS: usize = 4096 * 4096;

/// How the head is compared against older trail samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionMode {
    /// Grid cells must match exactly
    SameCell,
    /// Grid cells within one step of each other, diagonals included
    Adjacent,
    /// World distance below half the player size
    #[default]
    Radius,
}

#[derive(Debug, Clone)]
pub struct PaperioConfig {
    /// World width in pixels
    pub world_width: f64,
    /// World height in pixels
    pub world_height: f64,
    /// Edge length of one grid cell in pixels
    pub tile_size: f64,
    /// Distance travelled per tick in pixels
    pub speed: f64,
    /// Heading change per tick for relative turns, in radians
    pub turn_speed: f64,
    /// Fraction of the heading error corrected per tick when steering toward a target
    pub steer_smoothing: f64,
    /// Pointer targets closer than this (pixels) leave the heading alone
    pub pointer_dead_zone: f64,
    /// Visual size of the player head in pixels
    pub player_size: f64,
    /// A trail sample is recorded only when farther than this from the previous one
    pub min_trail_spacing: f64,
    /// Number of most recent trail samples ignored by the self-collision check
    pub guard_threshold: usize,
    pub collision_mode: CollisionMode,
    /// Radius in cells stamped around each trail sample on capture (1 = 3x3)
    pub trail_stamp_radius: i32,
    /// Radius in cells of the starting territory
    pub spawn_radius: i32,
    /// Simulation tick rate in Hz
    pub tick_rate_hz: u32,
}

impl PaperioConfig {
    pub fn with_world_size(width: f64, height: f64) -> Self {
        Self {
            world_width: width,
            world_height: height,
            ..Default::default()
        }
    }

    /// Grid dimensions in cells, `ceil(world / tile)` on each axis.
    pub fn grid_dimensions(&self) -> (u32, u32) {
        (
            (self.world_width / self.tile_size).ceil() as u32,
            (self.world_height / self.tile_size).ceil() as u32,
        )
    }

    pub fn validate(&self) -> Result<(), GameError> {
        let positive = [
            ("world_width", self.world_width),
            ("world_height", self.world_height),
            ("tile_size", self.tile_size),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(GameError::InvalidConfig(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }

        let non_negative = [
            ("speed", self.speed),
            ("turn_speed", self.turn_speed),
            ("pointer_dead_zone", self.pointer_dead_zone),
            ("player_size", self.player_size),
            ("min_trail_spacing", self.min_trail_spacing),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(GameError::InvalidConfig(format!(
                    "{} must be finite and non-negative, got {}",
                    name, value
                )));
            }
        }

        let cols = (self.world_width / self.tile_size).ceil();
        let rows = (self.world_height / self.tile_size).ceil();
        let cells = if cols <= u32::MAX as f64 && rows <= u32::MAX as f64 {
            (cols as usize).checked_mul(rows as usize)
        } else {
            None
        };
        if !cells.is_some_and(|n| n <= MAX_GRID_CELLS) {
            return Err(GameError::InvalidConfig(format!(
                "world {}x{} with tile {} needs more than {} cells",
                self.world_width, self.world_height, self.tile_size, MAX_GRID_CELLS
            )));
        }

        if !(self.steer_smoothing > 0.0 && self.steer_smoothing <= 1.0) {
            return Err(GameError::InvalidConfig(format!(
                "steer_smoothing must be in (0, 1], got {}",
                self.steer_smoothing
            )));
        }
        if self.trail_stamp_radius < 0 || self.spawn_radius < 0 {
            return Err(GameError::InvalidConfig(
                "trail_stamp_radius and spawn_radius must not be negative".to_string(),
            ));
        }
        if self.tick_rate_hz == 0 {
            return Err(GameError::InvalidConfig("tick_rate_hz must be at least 1".to_string()));
        }

        Ok(())
    }
}

impl TickRate for PaperioConfig {
    fn tick_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.tick_rate_hz as f64)
    }
}

impl Default for PaperioConfig {
    fn default() -> Self {
        Self {
            world_width: 800.0,
            world_height: 600.0,
            tile_size: 10.0,
            speed: 3.5,
            turn_speed: 0.09,
            steer_smoothing: 0.15,
            pointer_dead_zone: 10.0,
            player_size: 18.0,
            min_trail_spacing: 5.0,
            guard_threshold: 15,
            collision_mode: CollisionMode::Radius,
            trail_stamp_radius: 1,
            spawn_radius: 8,
            tick_rate_hz: 60,
        }
    }
}

use std::time::Duration;

pub trait TickRate {
    fn tick_duration(&self) -> Duration;

    fn ticks_per_second(&self) -> u32 {
        (1.0 / self.tick_duration().as_secs_f64()).round() as u32
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GameError {
    /// Input could not be decoded or carried unusable values
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// Configuration values that cannot produce a playable world
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathReason {
    /// Player crossed their own trail
    SelfCollision,
    /// Player left the grid
    Boundary,
}

impl std::fmt::Display for DeathReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeathReason::SelfCollision => write!(f, "self collision"),
            DeathReason::Boundary => write!(f, "left the world"),
        }
    }
}

/// What happened during a single tick.
#[derive(Debug, Default)]
pub struct TickResult {
    /// False when the tick was skipped (idle or dead session)
    pub advanced: bool,
    /// Player stepped off owned territory this tick
    pub left_territory: bool,
    /// Cells gained by a capture this tick
    pub captured: Option<CaptureSummary>,
    /// Set when the session ended this tick
    pub died: Option<DeathReason>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CaptureSummary {
    pub trail_cells: usize,
    pub enclosed_cells: usize,
}

impl CaptureSummary {
    pub fn total(&self) -> usize {
        self.trail_cells + self.enclosed_cells
    }
}

/// Host-facing control surface of a frame-driven game session.
///
/// The host calls [`Game::tick`] once per frame and reads the state back
/// between ticks. Nothing here blocks.
pub trait Game: Send + Sync {
    fn start(&mut self);
    fn reset(&mut self);
    fn tick(&mut self) -> TickResult;
    fn handle_input(&mut self, input: &[u8]) -> Result<(), GameError>;
    fn encode_state(&self) -> Vec<u8>;
    fn tick_rate(&self) -> Duration;
    fn is_game_over(&self) -> bool {
        false
    }
}

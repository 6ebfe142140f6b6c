pub mod collision;
pub mod config;
pub mod reclaim;
pub mod state;
pub mod systems;

use std::time::Duration;

use prost::Message;

use crate::game::traits::{CaptureSummary, DeathReason, Game, GameError, TickRate, TickResult};
use crate::protocol::paperio::{PaperioInput, PaperioState, PlayerView, TrailSample};

pub use config::{CollisionMode, PaperioConfig};
pub use reclaim::ClaimResult;
pub use state::{Cell, GameState, GridPos, LifeState, Player, TerritoryGrid, Trail, TrailPoint, WorldPos};
pub use systems::{SteeringInput, Turn};

/// Lifecycle of a session as seen by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Built but not started; ticks do nothing
    Idle,
    Running,
    /// Frozen after a death until `reset` or `start`
    Dead,
}

type DeathCallback = Box<dyn FnMut(DeathReason) + Send + Sync>;

/// Player pose handed to renderers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerPose {
    pub x: f64,
    pub y: f64,
    pub angle: f64,
}

/// Read-only view of the session after a completed tick.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub tick: u32,
    pub grid: &'a TerritoryGrid,
    pub trail: &'a [TrailPoint],
    pub player: PlayerPose,
    pub alive: bool,
}

pub struct PaperioGame {
    /// Current game state
    state: GameState,
    /// Game configuration
    config: PaperioConfig,
    /// Latest steering intent, sampled at the start of every tick
    input: SteeringInput,
    phase: Phase,
    /// Ticks since the session was (re)started
    tick: u32,
    /// Cells gained by the most recent capture, for incremental repaint
    last_claim: Option<ClaimResult>,
    death_callbacks: Vec<DeathCallback>,
}

impl PaperioGame {
    pub fn new() -> Self {
        Self::build(PaperioConfig::default())
    }

    pub fn with_config(config: PaperioConfig) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: PaperioConfig) -> Self {
        let (width, height) = config.grid_dimensions();
        let mut game = Self {
            state: GameState::new(width, height, spawn_point(&config), config.speed),
            config,
            input: SteeringInput::None,
            phase: Phase::Idle,
            tick: 0,
            last_claim: None,
            death_callbacks: Vec::new(),
        };
        game.reset_session();
        game
    }

    pub fn current_tick(&self) -> u32 {
        self.tick
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn config(&self) -> &PaperioConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn input(&self) -> SteeringInput {
        self.input
    }

    pub fn last_claim(&self) -> Option<&ClaimResult> {
        self.last_claim.as_ref()
    }

    /// Replaces the current steering intent. Last write wins.
    pub fn set_input(&mut self, input: SteeringInput) -> Result<(), GameError> {
        input.validate()?;
        self.input = input;
        Ok(())
    }

    /// Registers a callback fired once for every death.
    pub fn on_death<F>(&mut self, callback: F)
    where
        F: FnMut(DeathReason) + Send + Sync + 'static,
    {
        self.death_callbacks.push(Box::new(callback));
    }

    /// Rebuilds the world for a new viewport size. A running session is
    /// restarted in the new world; a dead one goes back to idle.
    pub fn resize(&mut self, world_width: f64, world_height: f64) -> Result<(), GameError> {
        let mut config = self.config.clone();
        config.world_width = world_width;
        config.world_height = world_height;
        config.validate()?;

        self.config = config;
        self.reset_session();
        if self.phase == Phase::Dead {
            self.phase = Phase::Idle;
        }

        let (width, height) = self.state.territory.get_grid_dimensions();
        tracing::info!(
            "World resized to {}x{} px ({}x{} cells), phase {:?}",
            world_width, world_height, width, height, self.phase
        );
        Ok(())
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        let player = &self.state.player;
        Snapshot {
            tick: self.tick,
            grid: &self.state.territory,
            trail: player.trail.points(),
            player: PlayerPose {
                x: player.position.x,
                y: player.position.y,
                angle: player.angle,
            },
            alive: player.alive,
        }
    }

    fn reset_session(&mut self) {
        let (width, height) = self.config.grid_dimensions();
        if self.state.territory.get_grid_dimensions() == (width, height) {
            self.state.territory.reset();
        } else {
            self.state.territory = TerritoryGrid::new(width, height);
        }

        let spawn = spawn_point(&self.config);
        self.state.player = Player::new(spawn, self.config.speed);
        let center = spawn.to_grid(self.config.tile_size);
        self.state.territory.seed_spawn_area(&center, self.config.spawn_radius);

        self.input = SteeringInput::None;
        self.tick = 0;
        self.last_claim = None;
    }

    fn capture(&mut self) -> CaptureSummary {
        let trail_len = self.state.player.trail.len();
        let claim = reclaim::claim_territory(
            &mut self.state.territory,
            &self.state.player.trail,
            self.config.trail_stamp_radius,
        );

        let player = &mut self.state.player;
        player.trail.clear();
        player.is_outside = false;

        let summary = CaptureSummary {
            trail_cells: claim.trail_cells,
            enclosed_cells: claim.enclosed_cells,
        };
        tracing::info!(
            "Captured {} cells ({} from a {}-sample trail, {} enclosed), {} owned",
            claim.cells_claimed(),
            claim.trail_cells,
            trail_len,
            claim.enclosed_cells,
            self.state.territory.count_owned()
        );
        self.last_claim = Some(claim);
        summary
    }

    fn die(&mut self, reason: DeathReason) {
        self.phase = Phase::Dead;
        self.state.player.alive = false;

        tracing::info!(
            "Player died ({}) at tick {} holding {} cells",
            reason,
            self.tick,
            self.state.territory.count_owned()
        );

        for callback in self.death_callbacks.iter_mut() {
            callback(reason);
        }
    }
}

impl Default for PaperioGame {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for PaperioGame {
    fn start(&mut self) {
        self.reset_session();
        self.phase = Phase::Running;
        tracing::info!(
            "Session started on a {:?} with {} spawn cells",
            self.state.territory,
            self.state.territory.count_owned()
        );
    }

    fn reset(&mut self) {
        let previous = self.phase;
        self.reset_session();
        self.phase = Phase::Running;
        tracing::info!("Session reset (was {:?})", previous);
    }

    fn tick(&mut self) -> TickResult {
        let mut result = TickResult::default();
        if self.phase != Phase::Running {
            return result;
        }

        self.tick += 1;
        result.advanced = true;

        // Step 1: steer, then move
        let player = &mut self.state.player;
        systems::steer(player, &self.input, &self.config);
        systems::advance(player);
        let cell = player.cell(self.config.tile_size);

        // Step 2: leaving the grid ends the session
        if collision::hits_boundary(&self.state.territory, &cell) {
            self.die(DeathReason::Boundary);
            result.died = Some(DeathReason::Boundary);
            return result;
        }

        // Step 3: extend the trail or close it
        if self.state.territory.is_owned(&cell) {
            if self.state.player.is_outside {
                result.captured = Some(self.capture());
            }
        } else {
            let player = &mut self.state.player;
            if !player.is_outside {
                player.is_outside = true;
                result.left_territory = true;
                tracing::debug!("Left territory at {:?} on tick {}", cell, self.tick);
            }

            let head = systems::record_trail(player, &self.config);
            if collision::hits_own_trail(&player.trail, &head, &self.config) {
                self.die(DeathReason::SelfCollision);
                result.died = Some(DeathReason::SelfCollision);
                return result;
            }
        }

        tracing::trace!(
            "Tick {}: pos=({:.1}, {:.1}) angle={:.3} trail={}",
            self.tick,
            self.state.player.position.x,
            self.state.player.position.y,
            self.state.player.angle,
            self.state.player.trail.len()
        );

        result
    }

    fn handle_input(&mut self, input: &[u8]) -> Result<(), GameError> {
        let paperio_input = PaperioInput::decode(input)
            .map_err(|e| GameError::InvalidInput(format!("Failed to decode input: {}", e)))?;

        let steering = systems::steering_from_proto(&paperio_input).inspect_err(|e| {
            tracing::warn!("Rejected steering input: {}", e);
        })?;

        self.set_input(steering)
    }

    fn encode_state(&self) -> Vec<u8> {
        let snapshot = self.snapshot();
        let (grid_width, grid_height) = snapshot.grid.get_grid_dimensions();

        let state = PaperioState {
            tick: snapshot.tick,
            grid_width,
            grid_height,
            cells: snapshot.grid.cells().iter().map(|c| c.is_owned() as u8).collect(),
            trail: snapshot
                .trail
                .iter()
                .map(|p| TrailSample {
                    x: p.world.x,
                    y: p.world.y,
                    col: p.cell.col,
                    row: p.cell.row,
                })
                .collect(),
            player: Some(PlayerView {
                x: snapshot.player.x,
                y: snapshot.player.y,
                angle: snapshot.player.angle,
            }),
            alive: snapshot.alive,
            tile_size: self.config.tile_size,
        };
        state.encode_to_vec()
    }

    fn tick_rate(&self) -> Duration {
        self.config.tick_duration()
    }

    fn is_game_over(&self) -> bool {
        self.phase == Phase::Dead
    }
}

/// Players spawn at the center of the world.
fn spawn_point(config: &PaperioConfig) -> WorldPos {
    WorldPos::new(config.world_width / 2.0, config.world_height / 2.0)
}

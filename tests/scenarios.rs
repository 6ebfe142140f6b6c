use std::collections::{HashSet, VecDeque};
use std::f64::consts::{FRAC_PI_2, PI};
use std::sync::{Arc, Mutex};

use paperio_core::game::traits::{DeathReason, Game};
use paperio_core::games::paperio::collision::hits_own_trail;
use paperio_core::games::paperio::reclaim::fill_enclosed;
use paperio_core::games::paperio::{
    Cell, CollisionMode, GridPos, PaperioConfig, PaperioGame, SteeringInput, Trail, TrailPoint,
    WorldPos,
};

/// 60x60 cells of 10px. Speed equals the tile size so every tick advances
/// exactly one cell, and steering snaps straight to the requested heading.
fn scenario_config() -> PaperioConfig {
    PaperioConfig {
        world_width: 600.0,
        world_height: 600.0,
        tile_size: 10.0,
        speed: 10.0,
        steer_smoothing: 1.0,
        spawn_radius: 8,
        ..Default::default()
    }
}

fn started_game() -> PaperioGame {
    let mut game = PaperioGame::with_config(scenario_config()).expect("valid config");
    game.start();
    game.state_mut().player.position = GridPos::new(30, 30).center(10.0);
    game
}

fn drive(game: &mut PaperioGame, heading: f64, ticks: usize) -> Option<DeathReason> {
    game.set_input(SteeringInput::AbsoluteHeading(heading))
        .expect("finite heading");
    (0..ticks).find_map(|_| game.tick().died)
}

fn owned_set(game: &PaperioGame) -> HashSet<GridPos> {
    game.state().territory.owned_cells().into_iter().collect()
}

/// Owned cells 4-connected to `start`.
fn owned_component(game: &PaperioGame, start: GridPos) -> HashSet<GridPos> {
    let territory = &game.state().territory;
    let mut seen = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);
    while let Some(pos) = queue.pop_front() {
        for (dc, dr) in [(1, 0), (-1, 0), (0, 1), (0, -1)] {
            let next = pos.offset(dc, dr);
            if territory.is_owned(&next) && seen.insert(next) {
                queue.push_back(next);
            }
        }
    }
    seen
}

/// Out 14 cells to the right, down 6, then left until back on the base.
fn run_loop(game: &mut PaperioGame) {
    assert_eq!(drive(game, 0.0, 14), None);
    assert_eq!(drive(game, FRAC_PI_2, 6), None);
    assert_eq!(drive(game, PI, 9), None);
}

#[test]
fn spawn_area_is_circular() {
    let game = started_game();
    let territory = &game.state().territory;
    let center = GridPos::new(30, 30);

    for row in 0..60 {
        for col in 0..60 {
            let pos = GridPos::new(col, row);
            let (dc, dr) = (col - center.col, row - center.row);
            let inside = dc * dc + dr * dr <= 64;
            assert_eq!(territory.is_owned(&pos), inside, "cell {:?}", pos);
        }
    }
    // symmetric extents on every axis
    for (dc, dr) in [(8, 0), (-8, 0), (0, 8), (0, -8)] {
        assert!(territory.is_owned(&center.offset(dc, dr)));
        assert!(!territory.is_owned(&center.offset(dc + dc.signum(), dr + dr.signum())));
    }
}

#[test]
fn straight_line_dies_at_right_edge() {
    let mut game = started_game();

    assert_eq!(drive(&mut game, 0.0, 29), None);
    assert_eq!(game.state().player.cell(10.0), GridPos::new(59, 30));

    assert_eq!(drive(&mut game, 0.0, 1), Some(DeathReason::Boundary));
    assert!(game.is_game_over());
}

#[test]
fn straight_line_dies_at_top_edge() {
    let mut game = started_game();

    assert_eq!(drive(&mut game, -FRAC_PI_2, 30), None);
    assert_eq!(game.state().player.cell(10.0), GridPos::new(30, 0));

    assert_eq!(drive(&mut game, -FRAC_PI_2, 1), Some(DeathReason::Boundary));
}

#[test]
fn loop_captures_enclosed_area_only() {
    let mut game = started_game();
    let before = owned_set(&game);

    run_loop(&mut game);

    let territory = &game.state().territory;
    // strictly inside the traced loop
    for row in 32..=34 {
        for col in 38..=42 {
            assert!(territory.is_owned(&GridPos::new(col, row)), "({}, {})", col, row);
        }
    }
    // strictly outside the loop
    for pos in [
        GridPos::new(47, 33),
        GridPos::new(41, 39),
        GridPos::new(41, 27),
        GridPos::new(50, 30),
        GridPos::new(10, 10),
    ] {
        assert!(!territory.is_owned(&pos), "{:?} should stay free", pos);
    }

    let after = owned_set(&game);
    assert!(before.is_subset(&after));
    assert!(after.len() > before.len());

    let player = &game.state().player;
    assert!(!player.is_outside);
    assert!(player.trail.is_empty());
}

#[test]
fn capture_keeps_territory_connected() {
    let mut game = started_game();

    run_loop(&mut game);

    let component = owned_component(&game, GridPos::new(30, 30));
    assert_eq!(component, owned_set(&game));
}

#[test]
fn reclaim_is_idempotent_after_capture() {
    let mut game = started_game();
    run_loop(&mut game);

    let once = game.state().territory.clone();
    let filled = fill_enclosed(&mut game.state_mut().territory);

    assert!(filled.is_empty());
    assert_eq!(game.state().territory, once);
}

#[test]
fn every_cell_is_owned_or_free() {
    let mut game = started_game();
    run_loop(&mut game);

    assert!(game
        .state()
        .territory
        .cells()
        .iter()
        .all(|c| matches!(c, Cell::Owned | Cell::Free)));
}

fn looping_trail() -> Trail {
    // 12 samples right along row 5, then 8 back left along row 6
    let mut trail = Trail::new();
    for col in 0..12 {
        trail.push(TrailPoint::at(GridPos::new(col, 5).center(10.0), 10.0));
    }
    for col in (4..12).rev() {
        trail.push(TrailPoint::at(GridPos::new(col, 6).center(10.0), 10.0));
    }
    trail
}

#[test]
fn crossing_recent_samples_is_not_fatal() {
    let trail = looping_trail();
    let config = PaperioConfig {
        collision_mode: CollisionMode::SameCell,
        guard_threshold: 19,
        ..scenario_config()
    };
    // (4, 5) is sample 4, inside the 19 most recent of 20
    let head = TrailPoint::at(GridPos::new(4, 5).center(10.0), 10.0);

    assert!(!hits_own_trail(&trail, &head, &config));
}

#[test]
fn crossing_old_samples_is_fatal() {
    let trail = looping_trail();
    let config = PaperioConfig {
        collision_mode: CollisionMode::SameCell,
        guard_threshold: 10,
        ..scenario_config()
    };
    let head = TrailPoint::at(GridPos::new(4, 5).center(10.0), 10.0);

    assert!(hits_own_trail(&trail, &head, &config));
}

#[test]
fn reset_after_death_restores_fresh_session() {
    let mut game = started_game();
    let reasons = Arc::new(Mutex::new(Vec::new()));
    let sink = reasons.clone();
    game.on_death(move |reason| sink.lock().unwrap().push(reason));

    run_loop(&mut game);
    assert_eq!(drive(&mut game, PI, 40), Some(DeathReason::Boundary));
    assert_eq!(*reasons.lock().unwrap(), vec![DeathReason::Boundary]);

    game.reset();

    let fresh = PaperioGame::with_config(scenario_config()).unwrap();
    assert_eq!(game.state().territory, fresh.state().territory);
    let player = &game.state().player;
    assert!(player.alive);
    assert!(player.trail.is_empty());
    assert!(!player.is_outside);
    assert_eq!(player.position, WorldPos::new(300.0, 300.0));
    assert!(game.tick().advanced);
}

use std::f64::consts::{PI, TAU};

use super::config::PaperioConfig;
use super::state::{Player, TrailPoint, WorldPos};
use crate::game::traits::GameError;
use crate::protocol::paperio::{PaperioInput, SteeringMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Left,
    Right,
}

/// The most recent steering intent. Persists across ticks until replaced.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SteeringInput {
    #[default]
    None,
    /// Steer toward an absolute heading in radians
    AbsoluteHeading(f64),
    /// Rotate by the configured turn speed every tick
    RelativeTurn(Turn),
    /// Steer toward a point in world coordinates
    Pointer { x: f64, y: f64 },
}

impl SteeringInput {
    pub fn validate(&self) -> Result<(), GameError> {
        let finite = match *self {
            SteeringInput::AbsoluteHeading(angle) => angle.is_finite(),
            SteeringInput::Pointer { x, y } => x.is_finite() && y.is_finite(),
            SteeringInput::None | SteeringInput::RelativeTurn(_) => true,
        };
        if finite {
            Ok(())
        } else {
            Err(GameError::InvalidInput(format!("non-finite steering value: {:?}", self)))
        }
    }
}

/// Maps an angle difference into `[-PI, PI]` in constant time, whatever its
/// magnitude.
pub fn wrap_angle_diff(diff: f64) -> f64 {
    if (-PI..=PI).contains(&diff) {
        diff
    } else {
        (diff + PI).rem_euclid(TAU) - PI
    }
}

/// Normalizes a heading into `(-PI, PI]`.
pub fn normalize_heading(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped > PI { wrapped - TAU } else { wrapped }
}

pub fn steer(player: &mut Player, input: &SteeringInput, config: &PaperioConfig) {
    let target = match *input {
        SteeringInput::None => return,
        SteeringInput::RelativeTurn(Turn::Left) => {
            player.angle = normalize_heading(player.angle - config.turn_speed);
            return;
        }
        SteeringInput::RelativeTurn(Turn::Right) => {
            player.angle = normalize_heading(player.angle + config.turn_speed);
            return;
        }
        SteeringInput::AbsoluteHeading(angle) => angle,
        SteeringInput::Pointer { x, y } => {
            let dx = x - player.position.x;
            let dy = y - player.position.y;
            if dx.hypot(dy) <= config.pointer_dead_zone {
                return;
            }
            dy.atan2(dx)
        }
    };

    let diff = wrap_angle_diff(target - player.angle);
    player.angle = normalize_heading(player.angle + diff * config.steer_smoothing);
}

/// Advances the player one tick along its heading.
pub fn advance(player: &mut Player) -> WorldPos {
    player.position.x += player.angle.cos() * player.speed;
    player.position.y += player.angle.sin() * player.speed;
    player.position
}

/// Records the current position on the trail, honouring the minimum spacing.
/// Returns the head sample used for collision checks regardless of whether
/// it was stored.
pub fn record_trail(player: &mut Player, config: &PaperioConfig) -> TrailPoint {
    let head = TrailPoint::at(player.position, config.tile_size);
    player.trail.push_spaced(head, config.min_trail_spacing);
    head
}

pub fn steering_from_proto(input: &PaperioInput) -> Result<SteeringInput, GameError> {
    let mode = SteeringMode::try_from(input.mode)
        .map_err(|_| GameError::InvalidInput(format!("unknown steering mode {}", input.mode)))?;

    let steering = match mode {
        SteeringMode::None => SteeringInput::None,
        SteeringMode::AbsoluteHeading => SteeringInput::AbsoluteHeading(input.value),
        SteeringMode::RelativeTurn if input.value < 0.0 => SteeringInput::RelativeTurn(Turn::Left),
        SteeringMode::RelativeTurn if input.value > 0.0 => SteeringInput::RelativeTurn(Turn::Right),
        SteeringMode::RelativeTurn => SteeringInput::None,
        SteeringMode::Pointer => SteeringInput::Pointer {
            x: input.target_x,
            y: input.target_y,
        },
    };

    steering.validate()?;
    Ok(steering)
}

pub fn steering_to_proto(steering: &SteeringInput) -> PaperioInput {
    let mut input = PaperioInput::default();
    match *steering {
        SteeringInput::None => input.set_mode(SteeringMode::None),
        SteeringInput::AbsoluteHeading(angle) => {
            input.set_mode(SteeringMode::AbsoluteHeading);
            input.value = angle;
        }
        SteeringInput::RelativeTurn(turn) => {
            input.set_mode(SteeringMode::RelativeTurn);
            input.value = if turn == Turn::Left { -1.0 } else { 1.0 };
        }
        SteeringInput::Pointer { x, y } => {
            input.set_mode(SteeringMode::Pointer);
            input.target_x = x;
            input.target_y = y;
        }
    }
    input
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn setup_player() -> Player {
        Player::new(WorldPos::new(100.0, 100.0), 10.0)
    }

    fn instant_steering() -> PaperioConfig {
        PaperioConfig {
            steer_smoothing: 1.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_wrap_angle_diff() {
        assert!((wrap_angle_diff(3.0 * PI / 2.0) + FRAC_PI_2).abs() < 1e-12);
        assert!((wrap_angle_diff(-3.0 * PI / 2.0) - FRAC_PI_2).abs() < 1e-12);
        assert_eq!(wrap_angle_diff(0.5), 0.5);
        assert!((wrap_angle_diff(5.0 * TAU + 0.5) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_huge_headings_stay_in_range() {
        let config = PaperioConfig::default();
        for target in [1e300, -1e18, 1e12, -f64::MAX] {
            let mut player = setup_player();
            for _ in 0..3 {
                steer(&mut player, &SteeringInput::AbsoluteHeading(target), &config);
                assert!(player.angle > -PI && player.angle <= PI, "{} -> {}", target, player.angle);
            }
        }
    }

    #[test]
    fn test_normalize_heading() {
        assert!((normalize_heading(TAU + 0.25) - 0.25).abs() < 1e-12);
        assert!((normalize_heading(-PI - 0.25) - (PI - 0.25)).abs() < 1e-12);
        assert_eq!(normalize_heading(PI), PI);
    }

    #[test]
    fn test_player_moves_along_heading() {
        let mut player = setup_player();
        advance(&mut player);
        assert_eq!(player.position, WorldPos::new(110.0, 100.0));

        player.angle = FRAC_PI_2;
        advance(&mut player);
        assert!((player.position.x - 110.0).abs() < 1e-9);
        assert!((player.position.y - 110.0).abs() < 1e-9);
    }

    #[test]
    fn test_absolute_heading_is_smoothed() {
        let mut player = setup_player();
        let config = PaperioConfig::default();

        steer(&mut player, &SteeringInput::AbsoluteHeading(1.0), &config);
        assert!((player.angle - 0.15).abs() < 1e-12);

        steer(&mut player, &SteeringInput::AbsoluteHeading(1.0), &config);
        assert!((player.angle - (0.15 + 0.85 * 0.15)).abs() < 1e-12);
    }

    #[test]
    fn test_absolute_heading_takes_short_way_round() {
        let mut player = setup_player();
        player.angle = 3.0;
        steer(&mut player, &SteeringInput::AbsoluteHeading(-3.0), &instant_steering());
        assert!((player.angle - (-3.0)).abs() < 1e-12);

        let mut player = setup_player();
        player.angle = 3.0;
        let config = PaperioConfig {
            steer_smoothing: 0.5,
            ..Default::default()
        };
        steer(&mut player, &SteeringInput::AbsoluteHeading(-3.0), &config);
        // turning through PI rather than through zero
        assert!(player.angle.abs() > 3.0);
    }

    #[test]
    fn test_relative_turns() {
        let mut player = setup_player();
        let config = PaperioConfig::default();

        steer(&mut player, &SteeringInput::RelativeTurn(Turn::Right), &config);
        assert!((player.angle - 0.09).abs() < 1e-12);

        steer(&mut player, &SteeringInput::RelativeTurn(Turn::Left), &config);
        steer(&mut player, &SteeringInput::RelativeTurn(Turn::Left), &config);
        assert!((player.angle + 0.09).abs() < 1e-12);
    }

    #[test]
    fn test_pointer_dead_zone() {
        let mut player = setup_player();
        let config = instant_steering();

        steer(&mut player, &SteeringInput::Pointer { x: 100.0, y: 105.0 }, &config);
        assert_eq!(player.angle, 0.0);

        steer(&mut player, &SteeringInput::Pointer { x: 100.0, y: 150.0 }, &config);
        assert!((player.angle - FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_no_input_keeps_heading() {
        let mut player = setup_player();
        player.angle = 1.25;
        steer(&mut player, &SteeringInput::None, &PaperioConfig::default());
        assert_eq!(player.angle, 1.25);
    }

    #[test]
    fn test_record_trail_respects_spacing() {
        let mut player = setup_player();
        let config = PaperioConfig::default();

        record_trail(&mut player, &config);
        player.position.x += 3.0;
        let head = record_trail(&mut player, &config);

        assert_eq!(player.trail.len(), 1);
        assert_eq!(head.world, WorldPos::new(103.0, 100.0));
        assert_eq!(head.cell, crate::games::paperio::state::GridPos::new(10, 10));
    }

    #[test]
    fn test_steering_from_proto() {
        let mut input = PaperioInput::default();
        input.set_mode(SteeringMode::RelativeTurn);
        input.value = -1.0;
        assert_eq!(steering_from_proto(&input), Ok(SteeringInput::RelativeTurn(Turn::Left)));

        input.value = 0.0;
        assert_eq!(steering_from_proto(&input), Ok(SteeringInput::None));

        input.set_mode(SteeringMode::Pointer);
        input.target_x = 4.0;
        input.target_y = 2.0;
        assert_eq!(steering_from_proto(&input), Ok(SteeringInput::Pointer { x: 4.0, y: 2.0 }));
    }

    #[test]
    fn test_steering_from_proto_rejects_garbage() {
        let input = PaperioInput {
            mode: 99,
            ..Default::default()
        };
        assert!(matches!(steering_from_proto(&input), Err(GameError::InvalidInput(_))));

        let mut input = PaperioInput::default();
        input.set_mode(SteeringMode::AbsoluteHeading);
        input.value = f64::NAN;
        assert!(steering_from_proto(&input).is_err());
    }
}

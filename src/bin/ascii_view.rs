use paperio_core::config::DEFAULT_LOG_DIRECTIVE;
use paperio_core::game::traits::Game;
use paperio_core::games::paperio::{PaperioConfig, PaperioGame, SteeringInput};
use paperio_core::protocol::paperio::PaperioState;
use prost::Message;
use std::collections::HashSet;
use std::f64::consts::{FRAC_PI_2, PI};

/// (heading, ticks) legs of a rectangular excursion off the spawn base.
const ROUTE: [(f64, u32); 4] = [(0.0, 14), (FRAC_PI_2, 6), (PI, 9), (-FRAC_PI_2, 3)];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(DEFAULT_LOG_DIRECTIVE.parse()?),
        )
        .init();

    let config = PaperioConfig {
        world_width: 600.0,
        world_height: 400.0,
        speed: 10.0,
        steer_smoothing: 1.0,
        ..Default::default()
    };
    let mut game = PaperioGame::with_config(config)?;
    game.start();

    for (leg, (heading, ticks)) in ROUTE.iter().enumerate() {
        game.set_input(SteeringInput::AbsoluteHeading(*heading))?;
        for _ in 0..*ticks {
            game.tick();
        }

        let state = PaperioState::decode(game.encode_state().as_slice())?;
        println!("After leg {} (tick {}):", leg + 1, state.tick);
        print!("{}", render(&state));

        if !state.alive {
            println!("Game over");
            break;
        }
    }

    Ok(())
}

/// `#` owned, `*` trail, `@` player, `.` free.
fn render(state: &PaperioState) -> String {
    let width = state.grid_width as usize;
    let trail: HashSet<(i32, i32)> = state.trail.iter().map(|s| (s.col, s.row)).collect();
    let player = state.player.map(|p| {
        ((p.x / state.tile_size).floor() as i32, (p.y / state.tile_size).floor() as i32)
    });

    let mut out = String::with_capacity(state.cells.len() + state.grid_height as usize);
    for (idx, cell) in state.cells.iter().enumerate() {
        let pos = ((idx % width) as i32, (idx / width) as i32);
        let glyph = if Some(pos) == player {
            '@'
        } else if trail.contains(&pos) {
            '*'
        } else if *cell == 1 {
            '#'
        } else {
            '.'
        };
        out.push(glyph);
        if idx % width == width - 1 {
            out.push('\n');
        }
    }
    out
}

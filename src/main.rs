use paperio_core::config::{
    DEFAULT_LOG_DIRECTIVE, DEMO_ROUNDS, INPUT_INTERVAL_MS, MAX_TICKS_PER_ROUND, RESTART_DELAY_MS,
};
use paperio_core::game::traits::{DeathReason, Game};
use paperio_core::games::paperio::systems::steering_to_proto;
use paperio_core::games::paperio::{PaperioConfig, PaperioGame, SteeringInput};
use prost::Message;
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};
use tokio::time::{Duration, MissedTickBehavior};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(DEFAULT_LOG_DIRECTIVE.parse()?),
        )
        .init();

    let config = PaperioConfig::default();
    let (world_width, world_height) = (config.world_width, config.world_height);
    let mut game = PaperioGame::with_config(config)?;

    let (death_tx, mut death_rx) = mpsc::unbounded_channel::<DeathReason>();
    game.on_death(move |reason| {
        let _ = death_tx.send(reason);
    });

    // Input events arrive out of band and overwrite the latest value.
    let latest_input = Arc::new(Mutex::new(SteeringInput::None));
    let input_writer = latest_input.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(INPUT_INTERVAL_MS));
        let mut phase: f64 = 0.0;
        loop {
            interval.tick().await;
            phase += 0.02;
            let radius = 60.0 + 120.0 * (phase * 0.3).sin().abs();
            *input_writer.lock().await = SteeringInput::Pointer {
                x: world_width / 2.0 + radius * phase.cos(),
                y: world_height / 2.0 + radius * phase.sin(),
            };
        }
    });

    let mut frames = tokio::time::interval(game.tick_rate());
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut round = 1;
    game.start();
    tracing::info!("Round {}/{} started", round, DEMO_ROUNDS);

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted, stopping host");
                break;
            }
            _ = frames.tick() => {}
        }

        let steering = *latest_input.lock().await;
        if let Err(e) = game.handle_input(&steering_to_proto(&steering).encode_to_vec()) {
            tracing::warn!("Dropping input: {}", e);
        }

        let result = game.tick();
        if let Some(summary) = result.captured {
            tracing::debug!(
                "Frame {}: +{} cells",
                game.current_tick(),
                summary.total()
            );
        }

        let round_over = match death_rx.try_recv() {
            Ok(reason) => {
                tracing::info!("Round {} over: {}", round, reason);
                true
            }
            Err(_) if game.current_tick() >= MAX_TICKS_PER_ROUND => {
                tracing::info!("Round {} hit the tick limit", round);
                true
            }
            Err(_) => false,
        };

        if round_over {
            let owned = game.state().territory.count_owned();
            let total = game.state().territory.get_total_cells();
            tracing::info!(
                "Round {} final territory: {} / {} cells ({:.1}%)",
                round,
                owned,
                total,
                owned as f64 * 100.0 / total as f64
            );

            if round >= DEMO_ROUNDS {
                break;
            }
            tokio::time::sleep(Duration::from_millis(RESTART_DELAY_MS)).await;
            round += 1;
            game.reset();
            tracing::info!("Round {}/{} started", round, DEMO_ROUNDS);
        }
    }

    Ok(())
}

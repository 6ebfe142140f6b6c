/// Log filter applied on top of `RUST_LOG` by the host binaries.
pub const DEFAULT_LOG_DIRECTIVE: &str = "paperio_core=debug";

/// Number of sessions the demo host plays before exiting.
pub const DEMO_ROUNDS: u32 = 3;

/// Pause between a death and the automatic reset.
pub const RESTART_DELAY_MS: u64 = 750;

/// Upper bound on ticks per round so a wandering demo still terminates.
pub const MAX_TICKS_PER_ROUND: u32 = 60 * 60;

/// How often the scripted input source moves its pointer.
pub const INPUT_INTERVAL_MS: u64 = 40;

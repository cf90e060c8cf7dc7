//! Sock Pair Panic - a falling-sock matching arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, physics, stacking, matching)
//! - `effects`: Confetti particle bursts for matched pairs
//! - `settings`: Audio preferences persisted in the browser
//! - `audio`: Synthesized sound cues and the background music loop
//! - `render`/`ui`: Browser shell pieces (wasm only)

pub mod audio;
pub mod effects;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod render;
#[cfg(target_arch = "wasm32")]
pub mod ui;

pub use settings::Settings;
pub use sim::{GameEvent, GamePhase, GameState};

/// Game configuration constants
pub mod consts {
    /// Sock sprite dimensions (pixels)
    pub const SOCK_WIDTH: f32 = 50.0;
    pub const SOCK_HEIGHT: f32 = 70.0;

    /// Spawn pacing - interval shrinks with difficulty, never below the floor
    pub const SPAWN_INTERVAL_INITIAL_MS: f32 = 1500.0;
    pub const SPAWN_INTERVAL_FLOOR_MS: f32 = 500.0;
    /// Interval reduction per difficulty unit
    pub const SPAWN_INTERVAL_RAMP_MS: f32 = 100.0;

    /// Difficulty starts here and climbs a step per spawn
    pub const DIFFICULTY_INITIAL: f32 = 1.0;
    pub const DIFFICULTY_STEP: f32 = 0.1;

    /// Downward acceleration per baseline frame, plus the difficulty scale
    pub const GRAVITY_BASE: f32 = 1.5;
    pub const GRAVITY_DIFFICULTY_SCALE: f32 = 0.05;
    /// Velocities are expressed per this many milliseconds
    pub const FRAME_BASELINE_MS: f32 = 16.0;

    /// Center distance below which a dragged sock matches its twin
    pub const MATCH_DISTANCE: f32 = 40.0;
    /// Stacked socks above this y lose the game
    pub const GAME_LIMIT_Y: f32 = 150.0;
    /// Gap kept between the pile and the canvas bottom
    pub const FLOOR_MARGIN: f32 = 20.0;

    /// Horizontal overlap fraction required to land on a stacked sock
    pub const STACK_WIDTH_FRAC: f32 = 0.8;
    /// Socks sink this far into the one below when stacking
    pub const STACK_SNAP_OVERLAP: f32 = 10.0;

    /// Pointer pickup radius around a sock center
    pub const GRAB_RADIUS: f32 = SOCK_WIDTH * 1.5;

    pub const SCORE_PER_MATCH: u32 = 100;
}

/// Current spawn interval for a difficulty level, clamped to the floor
#[inline]
pub fn spawn_interval_ms(difficulty: f32) -> f32 {
    (consts::SPAWN_INTERVAL_INITIAL_MS - difficulty * consts::SPAWN_INTERVAL_RAMP_MS)
        .max(consts::SPAWN_INTERVAL_FLOOR_MS)
}

/// Velocity gained by a falling sock over `dt_ms` at a difficulty level
#[inline]
pub fn gravity_step(difficulty: f32, dt_ms: f32) -> f32 {
    (consts::GRAVITY_BASE + difficulty * consts::GRAVITY_DIFFICULTY_SCALE)
        * (dt_ms / consts::FRAME_BASELINE_MS)
}

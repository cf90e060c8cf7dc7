//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (spawn order; the held sock moves to the back)
//! - No rendering or platform dependencies

pub mod collision;
pub mod drag;
pub mod state;
pub mod tick;

pub use collision::{Collision, resolve};
pub use drag::{pointer_down, pointer_move, pointer_up};
pub use state::{DragHold, GameEvent, GamePhase, GameState, Pattern, Sock, SockColor};
pub use tick::{Viewport, tick};

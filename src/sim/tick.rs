//! Per-frame simulation tick
//!
//! Advances the whole game by one frame delta: spawning, gravity, collision
//! outcomes, pair removal and loss detection. Deterministic given the seed
//! and the sequence of deltas, viewports and pointer operations.

use glam::Vec2;
use rand::Rng;

use super::collision::{self, Collision};
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;
use crate::{gravity_step, spawn_interval_ms};

/// Canvas dimensions, read fresh every frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Advance the game state by one frame delta (milliseconds)
pub fn tick(state: &mut GameState, view: Viewport, dt_ms: f32) {
    if state.phase == GamePhase::GameOver {
        return;
    }

    // Spawn timer - the interval shrinks as difficulty climbs
    state.spawn_timer_ms += dt_ms;
    if state.spawn_timer_ms > spawn_interval_ms(state.difficulty) {
        // Keep the roll non-empty even on a degenerate canvas
        let span = (view.width - SOCK_WIDTH).max(1.0);
        let x = SOCK_WIDTH / 2.0 + state.rng.random_range(0.0..span);
        state.spawn_sock(x);
        state.spawn_timer_ms = 0.0;
        state.difficulty += DIFFICULTY_STEP;
    }

    // Physics, then at most one collision outcome per sock
    let gravity = gravity_step(state.difficulty, dt_ms);
    let mut removed: Vec<u32> = Vec::new();
    let mut limit_reached = false;

    for i in 0..state.socks.len() {
        {
            let sock = &mut state.socks[i];
            if !sock.is_dragging && !sock.is_stacked {
                // Only the acceleration is delta-scaled; velocity is
                // already expressed per baseline frame
                sock.vel.y += gravity;
                sock.pos.y += sock.vel.y;
                sock.pos.x += sock.vel.x;
            }
            if sock.is_dragging {
                sock.vel = Vec2::ZERO;
                sock.is_stacked = false;
            }
            // Side clamps apply to every sock, held ones included
            if sock.pos.x < SOCK_WIDTH / 2.0 {
                sock.pos.x = SOCK_WIDTH / 2.0;
            }
            if sock.pos.x > view.width - SOCK_WIDTH / 2.0 {
                sock.pos.x = view.width - SOCK_WIDTH / 2.0;
            }
        }

        match collision::resolve(&state.socks[i], &state.socks, view.height) {
            Collision::Floor => {
                let sock = &mut state.socks[i];
                sock.pos.y = view.height - FLOOR_MARGIN - SOCK_HEIGHT / 2.0;
                sock.vel = Vec2::ZERO;
                // A held sock rests on the line but stays in hand
                if !sock.is_dragging {
                    sock.is_stacked = true;
                }
            }
            Collision::Match { other } => {
                let sock = &state.socks[i];
                let (pos, color) = (sock.pos, sock.color);
                removed.push(sock.id);
                removed.push(other);
                state.score += SCORE_PER_MATCH;
                state.events.push(GameEvent::ScoreChanged { score: state.score });
                state.events.push(GameEvent::Matched { pos, color });
            }
            Collision::Stack { rest_y } => {
                let sock = &mut state.socks[i];
                sock.pos.y = rest_y;
                sock.vel = Vec2::ZERO;
                sock.is_stacked = true;
            }
            Collision::None => {}
        }

        let sock = &state.socks[i];
        if sock.is_stacked && sock.pos.y < GAME_LIMIT_Y {
            limit_reached = true;
        }
    }

    // Matched pairs leave together; the hold always dies with them
    if !removed.is_empty() {
        state.socks.retain(|s| !removed.contains(&s.id));
        state.drag = None;
    }

    if limit_reached {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver { score: state.score });
    }
}

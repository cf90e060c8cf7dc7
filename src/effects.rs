//! Confetti bursts for matched pairs
//!
//! Pure particle math. The shell owns one `Confetti` system, feeds it a
//! burst per match and advances it once per frame; `render` draws the
//! pieces. Nothing here touches the DOM.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::sim::SockColor;

/// Pieces per burst
pub const BURST_COUNT: usize = 20;
/// Hard cap on simultaneously live pieces
pub const MAX_PIECES: usize = 256;

/// Fan half-angle around straight up (radians)
const SPREAD_HALF_ANGLE: f32 = 0.44;
/// Launch speed range (pixels per second)
const SPEED_MIN: f32 = 180.0;
const SPEED_MAX: f32 = 420.0;
/// Downward pull (pixels per second squared)
const GRAVITY: f32 = 900.0;
/// Air drag per second
const DRAG: f32 = 1.4;
/// Lifetime decay per second; life runs 1 to 0
const DECAY: f32 = 1.2;
/// Piece edge length range (pixels)
const SIZE_MIN: f32 = 4.0;
const SIZE_MAX: f32 = 8.0;

/// A single confetti piece
#[derive(Debug, Clone)]
pub struct ConfettiPiece {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: SockColor,
    /// 1 to 0; doubles as the draw alpha
    pub life: f32,
    pub size: f32,
    /// Current tilt of the drawn square (radians)
    pub angle: f32,
    spin: f32,
}

impl ConfettiPiece {
    /// Advance piece physics. Returns false when expired.
    pub fn tick(&mut self, dt_s: f32) -> bool {
        self.life -= DECAY * dt_s;
        if self.life <= 0.0 {
            return false;
        }

        self.vel.y += GRAVITY * dt_s;
        self.vel *= 1.0 - (DRAG * dt_s).min(0.9);
        self.pos += self.vel * dt_s;
        self.angle += self.spin * dt_s;

        true
    }
}

/// All live confetti, advanced by the shell once per frame
#[derive(Debug)]
pub struct Confetti {
    pieces: Vec<ConfettiPiece>,
    rng: Pcg32,
}

impl Confetti {
    pub fn new(seed: u64) -> Self {
        Self {
            pieces: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Fan a burst of pieces upward from a popped pair
    pub fn burst(&mut self, pos: Vec2, color: SockColor) {
        for _ in 0..BURST_COUNT {
            if self.pieces.len() >= MAX_PIECES {
                break;
            }
            let angle = -std::f32::consts::FRAC_PI_2
                + self.rng.random_range(-SPREAD_HALF_ANGLE..SPREAD_HALF_ANGLE);
            let speed = self.rng.random_range(SPEED_MIN..SPEED_MAX);
            self.pieces.push(ConfettiPiece {
                pos,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                color,
                life: 1.0,
                size: self.rng.random_range(SIZE_MIN..SIZE_MAX),
                angle: self.rng.random_range(0.0..std::f32::consts::TAU),
                spin: self.rng.random_range(-6.0..6.0),
            });
        }
    }

    /// Advance all pieces and drop the expired ones
    pub fn tick(&mut self, dt_ms: f32) {
        let dt_s = dt_ms / 1000.0;
        self.pieces.retain_mut(|p| p.tick(dt_s));
    }

    pub fn pieces(&self) -> &[ConfettiPiece] {
        &self.pieces
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn clear(&mut self) {
        self.pieces.clear();
    }
}

//! Game state and core simulation types

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// The pile reached the limit line
    GameOver,
}

/// Knit patterns a sock can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    Striped,
    Polka,
    Plain,
    Zigzag,
}

impl Pattern {
    pub const ALL: [Pattern; 4] = [
        Pattern::Striped,
        Pattern::Polka,
        Pattern::Plain,
        Pattern::Zigzag,
    ];
}

/// Sock color palette
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SockColor {
    Coral,
    Teal,
    Butter,
    Violet,
    Pink,
}

impl SockColor {
    pub const ALL: [SockColor; 5] = [
        SockColor::Coral,
        SockColor::Teal,
        SockColor::Butter,
        SockColor::Violet,
        SockColor::Pink,
    ];

    /// CSS color used for fills and confetti tinting
    pub fn css(self) -> &'static str {
        match self {
            SockColor::Coral => "#FF6B6B",
            SockColor::Teal => "#4ECDC4",
            SockColor::Butter => "#FFE66D",
            SockColor::Violet => "#9B5DE5",
            SockColor::Pink => "#F15BB5",
        }
    }
}

/// A sock entity
#[derive(Debug, Clone)]
pub struct Sock {
    pub id: u32,
    /// Center position (pixels, y grows downward)
    pub pos: Vec2,
    /// Velocity in pixels per baseline frame
    pub vel: Vec2,
    pub pattern: Pattern,
    pub color: SockColor,
    /// Fixed tilt assigned at spawn (radians)
    pub rotation: f32,
    pub is_dragging: bool,
    pub is_stacked: bool,
}

impl Sock {
    /// True when color and pattern both agree
    pub fn matches(&self, other: &Sock) -> bool {
        self.color == other.color && self.pattern == other.pattern
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y - SOCK_HEIGHT / 2.0
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + SOCK_HEIGHT / 2.0
    }
}

/// Events emitted by the simulation, drained by the shell once per frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Score changed after a match
    ScoreChanged { score: u32 },
    /// A pair popped at this position
    Matched { pos: Vec2, color: SockColor },
    /// A new sock entered at the top edge
    Spawned,
    /// The pile reached the limit line
    GameOver { score: u32 },
}

/// The sock currently held by the pointer
#[derive(Debug, Clone, Copy)]
pub struct DragHold {
    pub sock_id: u32,
    /// Pointer offset from the sock center at pickup
    pub offset: Vec2,
}

/// Complete game state, owned by the shell and advanced imperatively
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// All sim randomness flows through this seeded RNG
    pub rng: Pcg32,
    /// Live socks in spawn order; the held sock is moved to the back
    pub socks: Vec<Sock>,
    pub score: u32,
    /// Climbs a step per spawn, speeding up spawns and gravity
    pub difficulty: f32,
    /// Milliseconds accumulated toward the next spawn
    pub spawn_timer_ms: f32,
    /// Pointer hold, at most one
    pub drag: Option<DragHold>,
    pub phase: GamePhase,
    /// Pending events, drained by the shell each frame
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a fresh session with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            socks: Vec::new(),
            score: 0,
            difficulty: DIFFICULTY_INITIAL,
            spawn_timer_ms: 0.0,
            drag: None,
            phase: GamePhase::Playing,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn a sock above the top edge at the given x, with random
    /// pattern, color, sideways drift and tilt
    pub fn spawn_sock(&mut self, x: f32) {
        let id = self.next_entity_id();
        let pattern = Pattern::ALL[self.rng.random_range(0..Pattern::ALL.len())];
        let color = SockColor::ALL[self.rng.random_range(0..SockColor::ALL.len())];
        let sock = Sock {
            id,
            pos: Vec2::new(x, -SOCK_HEIGHT),
            vel: Vec2::new(self.rng.random_range(-1.0..1.0), 0.0),
            pattern,
            color,
            rotation: self.rng.random_range(-0.1..0.1),
            is_dragging: false,
            is_stacked: false,
        };
        self.socks.push(sock);
        self.events.push(GameEvent::Spawned);
    }

    pub fn sock(&self, id: u32) -> Option<&Sock> {
        self.socks.iter().find(|s| s.id == id)
    }

    pub fn sock_mut(&mut self, id: u32) -> Option<&mut Sock> {
        self.socks.iter_mut().find(|s| s.id == id)
    }

    /// Take the pending events, leaving the queue empty
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

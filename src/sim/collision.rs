//! Collision outcome resolution
//!
//! Each sock gets at most one outcome per tick, checked in priority order:
//! floor landing, then drag matching, then landing on a stacked sock.

use super::state::Sock;
use crate::consts::*;

/// Outcome of a sock's collision scan, applied by `tick`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Collision {
    /// Nothing to resolve this tick
    None,
    /// Reached the floor band; snap to rest on the floor line
    Floor,
    /// Dragged within reach of its twin; both pop
    Match { other: u32 },
    /// Landed on a stacked sock; snap to `rest_y`
    Stack { rest_y: f32 },
}

/// Resolve the collision outcome for one sock against the rest
///
/// Floor contact is terminal and wins even while dragging, so a sock held
/// at the very bottom cannot match that tick. Only the dragged sock scans
/// for matches. Stacking applies to free socks, against stacked supports
/// only; the first support satisfying the overlap test wins.
pub fn resolve(sock: &Sock, all: &[Sock], canvas_h: f32) -> Collision {
    if sock.bottom() >= canvas_h - FLOOR_MARGIN {
        return Collision::Floor;
    }

    if sock.is_dragging {
        for other in all {
            if other.id == sock.id {
                continue;
            }
            if sock.pos.distance(other.pos) < MATCH_DISTANCE && sock.matches(other) {
                return Collision::Match { other: other.id };
            }
        }
        return Collision::None;
    }

    for other in all {
        if other.id == sock.id || !other.is_stacked || other.is_dragging {
            continue;
        }
        let dx = (sock.pos.x - other.pos.x).abs();
        let dy = sock.pos.y - other.pos.y;
        if dx < SOCK_WIDTH * STACK_WIDTH_FRAC
            && dy < 0.0
            && dy.abs() < SOCK_HEIGHT
            && sock.bottom() >= other.top() + STACK_SNAP_OVERLAP
        {
            return Collision::Stack {
                rest_y: other.pos.y - SOCK_HEIGHT + STACK_SNAP_OVERLAP,
            };
        }
    }

    Collision::None
}

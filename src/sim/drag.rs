//! Pointer drag state machine
//!
//! One hold at a time: pointer down picks the topmost sock within reach
//! and moves it to the back of the collection (drawn on top, hit first
//! next time), pointer move carries it, pointer up or leaving the canvas
//! drops it back into the simulation.

use glam::Vec2;

use super::state::{DragHold, GamePhase, GameState};
use crate::consts::GRAB_RADIUS;

/// Try to pick up a sock under the pointer
///
/// Socks are scanned back to front so the one drawn on top wins. Ignored
/// while a hold is active or after the game has ended.
pub fn pointer_down(state: &mut GameState, p: Vec2) {
    if state.phase != GamePhase::Playing || state.drag.is_some() {
        return;
    }
    for i in (0..state.socks.len()).rev() {
        let d = p - state.socks[i].pos;
        if d.length_squared() < GRAB_RADIUS * GRAB_RADIUS {
            let mut sock = state.socks.remove(i);
            sock.is_dragging = true;
            sock.is_stacked = false;
            state.drag = Some(DragHold {
                sock_id: sock.id,
                offset: d,
            });
            state.socks.push(sock);
            break;
        }
    }
}

/// Carry the held sock, keeping the grab offset
pub fn pointer_move(state: &mut GameState, p: Vec2) {
    if state.phase != GamePhase::Playing {
        return;
    }
    let Some(hold) = state.drag else {
        return;
    };
    if let Some(sock) = state.sock_mut(hold.sock_id) {
        sock.pos = p - hold.offset;
    }
}

/// Drop the held sock; it falls again on the next tick
pub fn pointer_up(state: &mut GameState) {
    let Some(hold) = state.drag.take() else {
        return;
    };
    if let Some(sock) = state.sock_mut(hold.sock_id) {
        sock.is_dragging = false;
        sock.is_stacked = false;
    }
}

//! Canvas2D frame drawing
//!
//! One `draw_frame` call per animation frame: clear, limit line, socks
//! (body path, pattern overlay, drag highlight), confetti on top.

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::consts::*;
use crate::effects::Confetti;
use crate::sim::{GameState, Pattern, Sock, Viewport};

pub fn draw_frame(
    ctx: &CanvasRenderingContext2d,
    state: &GameState,
    confetti: &Confetti,
    view: Viewport,
) {
    ctx.clear_rect(0.0, 0.0, view.width as f64, view.height as f64);
    draw_limit_line(ctx, view);
    for sock in &state.socks {
        draw_sock(ctx, sock);
    }
    draw_confetti(ctx, confetti);
}

/// Dashed red line marking the losing height
fn draw_limit_line(ctx: &CanvasRenderingContext2d, view: Viewport) {
    ctx.begin_path();
    ctx.move_to(0.0, GAME_LIMIT_Y as f64);
    ctx.line_to(view.width as f64, GAME_LIMIT_Y as f64);
    let dash = js_sys::Array::of2(&JsValue::from_f64(10.0), &JsValue::from_f64(10.0));
    ctx.set_line_dash(&dash).ok();
    ctx.set_stroke_style_str("rgba(239, 68, 68, 0.4)");
    ctx.set_line_width(2.0);
    ctx.stroke();
    ctx.set_line_dash(&js_sys::Array::new()).ok();
}

/// Sock body outline: a tube with a flared heel on the left
fn trace_body(ctx: &CanvasRenderingContext2d) {
    let w = SOCK_WIDTH as f64;
    let h = SOCK_HEIGHT as f64;

    ctx.begin_path();
    ctx.move_to(-w / 2.0, -h / 2.0);
    ctx.line_to(w / 2.0, -h / 2.0);
    ctx.line_to(w / 2.0, h / 4.0);
    ctx.quadratic_curve_to(w / 2.0, h / 2.0, 0.0, h / 2.0);
    ctx.line_to(-w / 4.0, h / 2.0);
    ctx.quadratic_curve_to(-w, h / 2.0, -w, h / 4.0);
    ctx.line_to(-w / 2.0, -h / 2.0);
}

fn draw_sock(ctx: &CanvasRenderingContext2d, sock: &Sock) {
    ctx.save();
    ctx.translate(sock.pos.x as f64, sock.pos.y as f64).ok();
    ctx.rotate(sock.rotation as f64).ok();

    // The held sock glows
    if sock.is_dragging {
        ctx.set_shadow_blur(10.0);
        ctx.set_shadow_color("rgba(255,255,255,0.8)");
    }

    trace_body(ctx);
    ctx.set_fill_style_str(sock.color.css());
    ctx.fill();
    ctx.set_stroke_style_str("rgba(0,0,0,0.1)");
    ctx.set_line_width(2.0);
    ctx.stroke();

    draw_pattern(ctx, sock);

    if sock.is_dragging {
        trace_body(ctx);
        ctx.set_stroke_style_str("#ffffff");
        ctx.set_line_width(3.0);
        ctx.stroke();
    }

    ctx.restore();
}

/// Knit pattern overlay in translucent white
fn draw_pattern(ctx: &CanvasRenderingContext2d, sock: &Sock) {
    let w = SOCK_WIDTH as f64;
    let h = SOCK_HEIGHT as f64;

    ctx.set_fill_style_str("rgba(255,255,255,0.4)");
    match sock.pattern {
        Pattern::Striped => {
            let mut y = -h / 2.0;
            while y < h / 2.0 {
                ctx.fill_rect(-w / 2.0, y, w, 5.0);
                y += 15.0;
            }
        }
        Pattern::Polka => {
            for i in 0..3 {
                ctx.begin_path();
                ctx.arc((i as f64) * 15.0 - 10.0, 0.0, 4.0, 0.0, std::f64::consts::TAU)
                    .ok();
                ctx.fill();
            }
        }
        Pattern::Zigzag => {
            ctx.begin_path();
            ctx.move_to(-w / 2.0, 0.0);
            ctx.line_to(-10.0, 10.0);
            ctx.line_to(10.0, -10.0);
            ctx.line_to(w / 2.0, 0.0);
            ctx.set_stroke_style_str("rgba(255,255,255,0.6)");
            ctx.set_line_width(3.0);
            ctx.stroke();
        }
        Pattern::Plain => {}
    }
}

/// Spinning squares tinted like the popped pair, fading with life
fn draw_confetti(ctx: &CanvasRenderingContext2d, confetti: &Confetti) {
    for piece in confetti.pieces() {
        ctx.save();
        ctx.translate(piece.pos.x as f64, piece.pos.y as f64).ok();
        ctx.rotate(piece.angle as f64).ok();
        ctx.set_global_alpha(piece.life.clamp(0.0, 1.0) as f64);
        ctx.set_fill_style_str(piece.color.css());
        let s = piece.size as f64;
        ctx.fill_rect(-s / 2.0, -s / 2.0, s, s);
        ctx.restore();
    }
}

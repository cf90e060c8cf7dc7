//! DOM HUD and overlay helpers
//!
//! Thin wrappers over `get_element_by_id`; every call is best-effort and
//! silently skips when the page is missing a piece.

use web_sys::Document;

fn document() -> Option<Document> {
    web_sys::window().and_then(|w| w.document())
}

fn set_class(doc: &Document, id: &str, class: &str) {
    if let Some(el) = doc.get_element_by_id(id) {
        let _ = el.set_attribute("class", class);
    }
}

fn set_text(doc: &Document, id: &str, text: &str) {
    if let Some(el) = doc.get_element_by_id(id) {
        el.set_text_content(Some(text));
    }
}

/// Live score in the playing HUD
pub fn set_score(score: u32) {
    if let Some(doc) = document() {
        set_text(&doc, "hud-score", &score.to_string());
    }
}

/// Title screen: menu overlay up, everything else down
pub fn show_menu() {
    let Some(doc) = document() else { return };
    set_class(&doc, "menu-overlay", "overlay");
    set_class(&doc, "gameover-overlay", "overlay hidden");
    set_class(&doc, "hud", "hud hidden");
}

/// Active play: HUD up, overlays down, score reset to zero
pub fn show_playing() {
    let Some(doc) = document() else { return };
    set_class(&doc, "menu-overlay", "overlay hidden");
    set_class(&doc, "gameover-overlay", "overlay hidden");
    set_class(&doc, "hud", "hud");
    set_text(&doc, "hud-score", "0");
}

/// End screen with the final score filled in
pub fn show_game_over(score: u32) {
    let Some(doc) = document() else { return };
    set_class(&doc, "gameover-overlay", "overlay");
    set_class(&doc, "hud", "hud hidden");
    set_text(&doc, "final-score", &score.to_string());
}

pub fn set_mute_label(muted: bool) {
    let Some(doc) = document() else { return };
    set_text(&doc, "mute-btn", if muted { "Sound: Off" } else { "Sound: On" });
}

//! Audio system using Web Audio API
//!
//! All cues are synthesized with oscillators and gain envelopes - no
//! audio assets to load. The background music loop is built the same
//! way: a short melody pattern queued a little ahead of the context
//! clock while a round is running.

#[cfg(target_arch = "wasm32")]
use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

#[cfg(target_arch = "wasm32")]
use crate::settings::Settings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Matched pair pops
    Pop,
    /// Socks knock together as a pair meets
    Thud,
    /// A fresh sock tips in from the top
    Falling,
    /// The pile reached the limit line
    GameOver,
}

/// Melody the background loop cycles through, in Hz. Zeroes are rests.
const MUSIC_PATTERN: [f32; 8] = [523.25, 659.25, 783.99, 0.0, 880.0, 783.99, 659.25, 0.0];
/// Seconds per melody step
const MUSIC_STEP_S: f64 = 0.22;
/// Notes are queued this far ahead of the context clock
const MUSIC_LOOKAHEAD_S: f64 = 0.4;
/// Bed gain, keeps the loop under the cues
#[cfg(target_arch = "wasm32")]
const MUSIC_LEVEL: f32 = 0.12;

/// Step-sequencer clock for the background loop.
///
/// Pure bookkeeping: `notes_due` returns the (start time, frequency)
/// pairs that fall inside the lookahead window and advances past them.
/// Playback wiring lives in `AudioManager`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MusicClock {
    next: f64,
    step: usize,
}

impl MusicClock {
    /// Notes due so the loop stays filled through `now` plus the lookahead
    pub fn notes_due(&mut self, now: f64) -> Vec<(f64, f32)> {
        // After a stall the clock restarts at `now` instead of
        // burst-playing everything it missed
        if self.next < now {
            self.next = now;
        }
        let mut due = Vec::new();
        while self.next < now + MUSIC_LOOKAHEAD_S {
            let freq = MUSIC_PATTERN[self.step];
            if freq > 0.0 {
                due.push((self.next, freq));
            }
            self.step = (self.step + 1) % MUSIC_PATTERN.len();
            self.next += MUSIC_STEP_S;
        }
        due
    }
}

/// Create an oscillator with a gain envelope wired to the destination
#[cfg(target_arch = "wasm32")]
fn create_osc(
    ctx: &AudioContext,
    freq: f32,
    osc_type: OscillatorType,
) -> Option<(OscillatorNode, GainNode)> {
    let osc = ctx.create_oscillator().ok()?;
    let gain = ctx.create_gain().ok()?;

    osc.set_type(osc_type);
    osc.frequency().set_value(freq);
    osc.connect_with_audio_node(&gain).ok()?;
    gain.connect_with_audio_node(&ctx.destination()).ok()?;

    Some((osc, gain))
}

/// Queue one melody note into the music bed at a context-clock time
#[cfg(target_arch = "wasm32")]
fn queue_note(ctx: &AudioContext, master: &GainNode, when: f64, freq: f32) -> Option<()> {
    let osc = ctx.create_oscillator().ok()?;
    let env = ctx.create_gain().ok()?;

    osc.set_type(OscillatorType::Triangle);
    osc.frequency().set_value(freq);
    osc.connect_with_audio_node(&env).ok()?;
    env.connect_with_audio_node(master).ok()?;

    env.gain().set_value_at_time(0.0001, when).ok();
    env.gain().linear_ramp_to_value_at_time(1.0, when + 0.02).ok();
    env.gain()
        .exponential_ramp_to_value_at_time(0.01, when + MUSIC_STEP_S * 0.9)
        .ok();

    osc.start_with_when(when).ok()?;
    osc.stop_with_when(when + MUSIC_STEP_S).ok();
    Some(())
}

/// Audio manager for the game
#[cfg(target_arch = "wasm32")]
pub struct AudioManager {
    ctx: Option<AudioContext>,
    /// Effective gain, refreshed from settings
    volume: f32,
    /// Context-clock end of the falling cue currently sounding
    falling_until: f64,
    /// Master gain of the background loop while one is playing
    music: Option<GainNode>,
    music_clock: MusicClock,
}

#[cfg(target_arch = "wasm32")]
impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            volume: settings.effective_volume(),
            falling_until: 0.0,
            music: None,
            music_clock: MusicClock::default(),
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Refresh the cached gain after settings change
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.volume = settings.effective_volume();
        // Mute reaches the running loop immediately
        if let Some(master) = &self.music {
            master.gain().set_value(self.volume * MUSIC_LEVEL);
        }
    }

    /// Start the background loop. No-op while one is already playing.
    pub fn start_music(&mut self) {
        if self.music.is_some() {
            return;
        }
        let Some(ctx) = self.ctx.clone() else { return };
        let Some(master) = ctx.create_gain().ok() else { return };
        master.gain().set_value(self.volume * MUSIC_LEVEL);
        if master.connect_with_audio_node(&ctx.destination()).is_err() {
            return;
        }
        self.music_clock = MusicClock::default();
        self.music = Some(master);
    }

    /// Stop the background loop; already queued notes go silent with it
    pub fn stop_music(&mut self) {
        if let Some(master) = self.music.take() {
            let _ = master.disconnect();
        }
    }

    /// Top up the background loop. Runs once per frame during a round.
    pub fn music_tick(&mut self) {
        let Some(ctx) = self.ctx.clone() else { return };
        let Some(master) = self.music.clone() else { return };
        let now = ctx.current_time();
        for (when, freq) in self.music_clock.notes_due(now) {
            let _ = queue_note(&ctx, &master, when, freq);
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.volume;
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = self.ctx.clone() else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::Pop => self.play_pop(&ctx, vol),
            SoundEffect::Thud => self.play_thud(&ctx, vol),
            SoundEffect::Falling => self.play_falling(&ctx, vol),
            SoundEffect::GameOver => self.play_game_over(&ctx, vol),
        }
    }

    // === Sound generators ===

    /// Pair pop - bright rising blip
    fn play_pop(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = create_osc(ctx, 400.0, OscillatorType::Triangle) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.35, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.12)
            .ok();
        osc.frequency().set_value_at_time(400.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(1200.0, t + 0.1)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.15).ok();
    }

    /// Socks knocking together - low damped thump
    fn play_thud(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = create_osc(ctx, 150.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.5, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.1)
            .ok();
        osc.frequency().set_value_at_time(150.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(60.0, t + 0.1)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.15).ok();
    }

    /// Spawn whoosh - soft descending slide, one at a time
    fn play_falling(&mut self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();
        if t < self.falling_until {
            return;
        }
        let Some((osc, gain)) = create_osc(ctx, 700.0, OscillatorType::Sine) else {
            return;
        };

        gain.gain().set_value_at_time(0.01, t).ok();
        gain.gain()
            .linear_ramp_to_value_at_time(vol * 0.15, t + 0.1)
            .ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.8)
            .ok();
        osc.frequency().set_value_at_time(700.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(250.0, t + 0.8)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.85).ok();
        self.falling_until = t + 0.85;
    }

    /// Game over - sad descending steps
    fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [392.0, 330.0, 262.0, 196.0].iter().enumerate() {
            let delay = i as f64 * 0.2;
            if let Some((osc, gain)) = create_osc(ctx, *freq, OscillatorType::Sine) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.3, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.4).ok();
            }
        }
    }
}

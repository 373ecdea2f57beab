//! Audio and haptic feedback
//!
//! Procedurally generated pop sound via the Web Audio API - no asset files.
//! Playback is fire-and-forget; [`AudioManager::play`] reports success or
//! failure and the caller decides on the haptic fallback. Native builds
//! have no audio backend and always report failure.

#[cfg(target_arch = "wasm32")]
use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Balloon popped
    Pop,
    /// Minigame started or stopped
    Toggle,
}

/// Audio manager for the scene
pub struct AudioManager {
    #[cfg(target_arch = "wasm32")]
    ctx: Option<AudioContext>,
    volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    #[cfg(target_arch = "wasm32")]
    pub fn new() -> Self {
        // May fail outside a secure context; playback then falls back to haptics
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("failed to create AudioContext - sound disabled");
        }
        Self {
            ctx,
            volume: 0.8,
            muted: false,
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn new() -> Self {
        Self {
            volume: 0.8,
            muted: false,
        }
    }

    /// Resume the audio context (required after first user gesture)
    #[cfg(target_arch = "wasm32")]
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn resume(&self) {}

    /// Set output volume (0.0 - 1.0)
    pub fn set_volume(&mut self, vol: f32) {
        self.volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute (deliberate silence, not a playback failure)
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub(crate) fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.volume }
    }

    /// Play a sound effect, fire-and-forget
    ///
    /// Returns `false` only when playback actually failed (no context,
    /// node creation failed); muted playback counts as success so the
    /// haptic fallback stays quiet too.
    #[cfg(target_arch = "wasm32")]
    pub fn play(&self, effect: SoundEffect) -> bool {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return true;
        }
        let Some(ctx) = &self.ctx else { return false };

        // Browsers suspend the context until a user gesture
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::Pop => self.play_pop(ctx, vol),
            SoundEffect::Toggle => self.play_toggle(ctx, vol),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn play(&self, _effect: SoundEffect) -> bool {
        false
    }

    // === Sound generators ===

    /// Create an oscillator with gain envelope
    #[cfg(target_arch = "wasm32")]
    fn create_osc(
        &self,
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

    /// Pop - short bright burst dropping fast
    #[cfg(target_arch = "wasm32")]
    fn play_pop(&self, ctx: &AudioContext, vol: f32) -> bool {
        let Some((osc, gain)) = self.create_osc(ctx, 620.0, OscillatorType::Triangle) else {
            return false;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.5, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.09)
            .ok();
        osc.frequency().set_value_at_time(620.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(160.0, t + 0.09)
            .ok();

        if osc.start().is_err() {
            return false;
        }
        osc.stop_with_when(t + 0.12).ok();
        true
    }

    /// Toggle - soft click for start/stop
    #[cfg(target_arch = "wasm32")]
    fn play_toggle(&self, ctx: &AudioContext, vol: f32) -> bool {
        let Some((osc, gain)) = self.create_osc(ctx, 330.0, OscillatorType::Sine) else {
            return false;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.25, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.06)
            .ok();

        if osc.start().is_err() {
            return false;
        }
        osc.stop_with_when(t + 0.08).ok();
        true
    }
}

/// Fire a short vibration pulse, the fallback when the pop sound fails
///
/// Best-effort; returns whether the host accepted the request.
#[cfg(target_arch = "wasm32")]
pub fn haptic_pulse(ms: u32) -> bool {
    web_sys::window()
        .map(|w| w.navigator().vibrate_with_duration(ms))
        .unwrap_or(false)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn haptic_pulse(_ms: u32) -> bool {
    false
}

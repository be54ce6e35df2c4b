//! Audio cues
//!
//! The only cue is the fire sound, played from a page `<audio>` element.
//! Volume handling is platform-independent so it can be tested natively.

use serde::{Deserialize, Serialize};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Player emitted a volley
    Fire,
}

/// Anything that can play a cue
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);
}

/// Discards every cue (native runs, muted tests)
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play(&mut self, _effect: SoundEffect) {}
}

/// Master volume and mute flag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mixer {
    master_volume: f32,
    muted: bool,
}

impl Default for Mixer {
    fn default() -> Self {
        Self {
            master_volume: 1.0,
            muted: false,
        }
    }
}

impl Mixer {
    pub fn new(master_volume: f32, muted: bool) -> Self {
        let mut mixer = Self::default();
        mixer.set_master_volume(master_volume);
        mixer.set_muted(muted);
        mixer
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = if vol.is_nan() { 0.0 } else { vol.clamp(0.0, 1.0) };
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Volume to play at, zero when muted
    pub fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.master_volume }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::JsCast;
    use web_sys::HtmlAudioElement;

    use super::{AudioSink, Mixer, SoundEffect};
    use crate::settings::Settings;

    /// Plays cues through the page's `<audio>` element
    pub struct AudioManager {
        fire: Option<HtmlAudioElement>,
        mixer: Mixer,
    }

    impl AudioManager {
        pub fn new(settings: &Settings) -> Self {
            let fire = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.get_element_by_id(&settings.sound_id))
                .and_then(|el| el.dyn_into::<HtmlAudioElement>().ok());
            if fire.is_none() {
                log::warn!("No <audio id=\"{}\"> element - audio disabled", settings.sound_id);
            }
            Self {
                fire,
                mixer: Mixer::new(settings.master_volume, settings.muted),
            }
        }
    }

    impl AudioSink for AudioManager {
        fn play(&mut self, effect: SoundEffect) {
            let vol = self.mixer.effective_volume();
            if vol <= 0.0 {
                return;
            }
            let Some(element) = &self.fire else { return };
            match effect {
                SoundEffect::Fire => {
                    element.set_volume(vol as f64);
                    // Restart so rapid volleys each get a cue
                    element.set_current_time(0.0);
                    if let Err(e) = element.play() {
                        log::warn!("Fire sound failed: {:?}", e);
                    }
                }
            }
        }
    }
}

//! One running game: world, held keys, random stream and settings
//!
//! Each `Game` owns its own input state, so nothing is shared between
//! instances. The host calls [`Game::frame`] once per animation frame.

use glam::Vec2;

use crate::audio::{AudioSink, SoundEffect};
use crate::renderer::{RenderSurface, draw_world};
use crate::settings::Settings;
use crate::sim::{GameEvent, InputState, Key, RandomSource, SimRng, World, tick};

pub struct Game<R: RandomSource = SimRng> {
    world: World,
    input: InputState,
    rng: R,
    settings: Settings,
}

impl Game<SimRng> {
    /// Fresh game with the starting layout on a field of the given size
    pub fn new(field: Vec2, seed: u64, settings: Settings) -> Self {
        log::info!("New game on a {}x{} field, seed {}", field.x, field.y, seed);
        Self::with_rng(field, SimRng::new(seed), settings)
    }
}

impl<R: RandomSource> Game<R> {
    pub fn with_rng(field: Vec2, rng: R, settings: Settings) -> Self {
        Self {
            world: World::new(field),
            input: InputState::new(),
            rng,
            settings,
        }
    }

    pub fn press(&mut self, key: Key) {
        self.input.press(key);
    }

    pub fn release(&mut self, key: Key) {
        self.input.release(key);
    }

    /// Drop all held keys, e.g. when the page loses focus
    pub fn release_all(&mut self) {
        self.input.release_all();
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    /// Run one frame: simulate, redraw (dropping out-of-bounds bodies), then
    /// play the cues raised during the frame.
    pub fn frame(&mut self, surface: &mut dyn RenderSurface, audio: &mut dyn AudioSink) {
        tick(&mut self.world, &self.input, &mut self.rng);
        let culled = draw_world(&mut self.world, surface);

        for event in self.world.drain_events() {
            match event {
                GameEvent::PlayerFired { .. } => audio.play(SoundEffect::Fire),
                GameEvent::TankSpawned { tank } => log::debug!("Tank {} entered", tank),
                GameEvent::PlayerDestroyed { player } => {
                    log::info!("Player {} lost", player)
                }
            }
        }

        if self.settings.log_body_count {
            log::debug!(
                "Frame {}: {} bodies ({} culled)",
                self.world.frame(),
                self.world.bodies().len(),
                culled
            );
        }
    }
}

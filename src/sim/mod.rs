//! Frame-stepped simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering and
//! platform dependencies:
//! - One step per animation frame
//! - Injected randomness and input only
//! - Stable iteration order (append order)

pub mod body;
pub mod collision;
pub mod input;
pub mod rng;
pub mod state;
pub mod tick;

pub use body::{Body, BodyId, Bullet, Faction, FrameContext, Invader, Player, Tank};
pub use collision::{Aabb, aabb_overlap, colliding};
pub use input::{InputSource, InputState, Key};
pub use rng::{RandomSource, ScriptedRng, SimRng};
pub use state::{GameEvent, World};
pub use tick::tick;

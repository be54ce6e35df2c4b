//! Jump Invaders - an invaders/shooter hybrid with a jumping player
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (bodies, collisions, spawning)
//! - `renderer`: Draw surface abstraction and the 2D canvas backend
//! - `audio`: Sound cues triggered by the simulation
//! - `platform`: Browser key mapping
//! - `settings`: Persisted player preferences
//! - `game`: Ties the simulation to its input, randomness and output collaborators

pub mod audio;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use settings::Settings;

/// Game configuration constants
///
/// Units are canvas pixels and pixels per frame; the simulation advances one
/// step per animation frame.
pub mod consts {
    /// Player box (width and height)
    pub const PLAYER_SIZE: f32 = 15.0;
    /// Horizontal step while Left/Right is held
    pub const PLAYER_STEP_X: f32 = 2.0;
    /// Initial vertical velocity of a jump (negative is up)
    pub const JUMP_VELOCITY: f32 = -9.0;
    /// Added to vertical velocity every airborne frame
    pub const GRAVITY: f32 = 0.6;
    /// Base vertical speed of an upward player bullet
    pub const BULLET_SPEED: f32 = -6.0;
    /// Upward bullets are never slower than this
    pub const BULLET_MIN_UP_SPEED: f32 = -3.0;
    /// Bullets per sustained press of Fire
    pub const BULLET_RESET: u32 = 1;
    /// Horizontal speed of the mid-jump down bullet (sign follows last movement)
    pub const DOWN_BULLET_SPEED_X: f32 = 3.0;
    /// Vertical speed of the mid-jump down bullet
    pub const DOWN_BULLET_SPEED_Y: f32 = 2.5;

    /// Bullet box (width and height)
    pub const BULLET_SIZE: f32 = 3.0;

    /// Invader box (width and height)
    pub const INVADER_SIZE: f32 = 15.0;
    /// Patrol speed of a freshly spawned invader
    pub const INVADER_SPEED_X: f32 = 0.3;
    /// Patrol distance from the spawn point before turning around
    pub const INVADER_PATROL_WIDTH: f32 = 40.0;
    /// A roll above this fires an invader bullet (~0.5% per frame)
    pub const INVADER_FIRE_ROLL: f32 = 0.995;
    /// Vertical speed of invader bullets
    pub const INVADER_BULLET_SPEED_Y: f32 = 2.0;

    /// Initial formation
    pub const INVADER_COUNT: usize = 24;
    pub const INVADER_COLUMNS: usize = 8;
    pub const INVADER_ROWS: usize = 3;
    pub const INVADER_GRID_ORIGIN: f32 = 30.0;
    pub const INVADER_GRID_SPACING: f32 = 30.0;

    /// Tank box
    pub const TANK_WIDTH: f32 = 25.0;
    pub const TANK_HEIGHT: f32 = 12.0;
    /// Tank horizontal speed magnitude
    pub const TANK_SPEED_X: f32 = 0.3;
    /// A roll above this spawns a tank when none is active (~0.6% per frame)
    pub const TANK_SPAWN_ROLL: f32 = 0.994;
    /// A roll below this spawns the tank on the left edge
    pub const TANK_LEFT_EDGE_ROLL: f32 = 0.5;
    /// A roll above this fires a tank bullet (~0.25% per frame)
    pub const TANK_FIRE_ROLL: f32 = 0.9975;
    /// Horizontal speed magnitude of tank bullets
    pub const TANK_BULLET_SPEED_X: f32 = 0.75;
}

//! Simulated bodies and their per-frame behaviour
//!
//! Every body is a box (`center ± size / 2`) tagged with a faction. The four
//! kinds share one update entry point, [`Body::update`], which may spawn new
//! bullets through the [`FrameContext`] it is handed.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::input::{InputSource, Key};
use super::rng::RandomSource;
use super::state::GameEvent;
use crate::consts::*;

/// Stable identity of a body within one world
pub type BodyId = u32;

/// Which side a body is on; only opposing factions collide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    Good,
    Bad,
}

/// Everything a body may touch while it updates.
///
/// Spawned bodies are buffered here and only join the registry once the
/// whole update pass is over.
pub struct FrameContext<'a> {
    pub input: &'a dyn InputSource,
    pub rng: &'a mut dyn RandomSource,
    /// Play-field size in pixels
    pub field: Vec2,
    /// Another invader sits below the one being updated
    pub lane_blocked: bool,
    spawned: &'a mut Vec<Body>,
    events: &'a mut Vec<GameEvent>,
    next_id: &'a mut BodyId,
}

impl<'a> FrameContext<'a> {
    pub fn new(
        input: &'a dyn InputSource,
        rng: &'a mut dyn RandomSource,
        field: Vec2,
        spawned: &'a mut Vec<Body>,
        events: &'a mut Vec<GameEvent>,
        next_id: &'a mut BodyId,
    ) -> Self {
        Self {
            input,
            rng,
            field,
            lane_blocked: false,
            spawned,
            events,
            next_id,
        }
    }

    /// Queue a bullet for insertion after the current pass
    pub fn spawn_bullet(&mut self, center: Vec2, velocity: Vec2, faction: Faction) -> BodyId {
        let id = *self.next_id;
        *self.next_id += 1;
        self.spawned
            .push(Body::Bullet(Bullet::new(id, center, velocity, faction)));
        id
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Uniform draw in `[0, 1)`
    #[inline]
    pub fn roll(&mut self) -> f32 {
        self.rng.next_f32()
    }

    #[inline]
    pub fn is_down(&self, key: Key) -> bool {
        self.input.is_down(key)
    }
}

/// The player: walks, jumps, and fires one volley per press of Fire
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: BodyId,
    pub center: Vec2,
    pub size: Vec2,
    pub vel_y: f32,
    /// Ground level, captured at construction
    pub ground_y: f32,
    /// Bullets emitted during the current press of Fire
    pub bullet_ctr: u32,
    /// Horizontal speed given to the mid-jump down bullet (sign of last movement)
    pub last_direction: f32,
}

impl Player {
    /// Player standing on the ground, centered horizontally
    pub fn new(id: BodyId, field: Vec2) -> Self {
        let center = Vec2::new(field.x / 2.0, field.y - PLAYER_SIZE);
        Self {
            id,
            center,
            size: Vec2::splat(PLAYER_SIZE),
            vel_y: 0.0,
            ground_y: center.y,
            bullet_ctr: 0,
            last_direction: -DOWN_BULLET_SPEED_X,
        }
    }

    #[inline]
    pub fn is_grounded(&self) -> bool {
        self.center.y == self.ground_y
    }

    pub fn update(&mut self, ctx: &mut FrameContext<'_>) {
        if !self.is_grounded() {
            self.vel_y += GRAVITY;
            self.center.y += self.vel_y;
            if self.center.y > self.ground_y {
                self.center.y = self.ground_y;
            }
            if self.is_grounded() {
                self.vel_y = 0.0;
            }
        }

        // Separate checks so strafing and jumping compose
        if ctx.is_down(Key::Left) {
            self.center.x -= PLAYER_STEP_X;
            self.last_direction = -DOWN_BULLET_SPEED_X;
        }
        if ctx.is_down(Key::Right) {
            self.center.x += PLAYER_STEP_X;
            self.last_direction = DOWN_BULLET_SPEED_X;
        }

        if ctx.is_down(Key::Up) && self.is_grounded() {
            self.vel_y = JUMP_VELOCITY;
            self.center.y += self.vel_y;
        }

        if ctx.is_down(Key::Fire) {
            if self.bullet_ctr < BULLET_RESET {
                self.fire(ctx);
            }
        } else {
            self.bullet_ctr = 0;
        }
    }

    /// Emit one volley: an upward bullet, plus a down bullet while airborne
    fn fire(&mut self, ctx: &mut FrameContext<'_>) {
        // Rising makes bullets faster; falling never makes them slower than the floor
        let speed_y = (BULLET_SPEED + self.vel_y).min(BULLET_MIN_UP_SPEED);
        let half = self.size.x / 2.0;

        ctx.spawn_bullet(
            Vec2::new(self.center.x, self.center.y - half),
            Vec2::new(0.0, speed_y),
            Faction::Good,
        );
        self.bullet_ctr += 1;

        if self.center.y < self.ground_y {
            ctx.spawn_bullet(
                Vec2::new(self.center.x, self.center.y + half),
                Vec2::new(self.last_direction, DOWN_BULLET_SPEED_Y),
                Faction::Good,
            );
        }

        ctx.emit(GameEvent::PlayerFired { player: self.id });
    }
}

/// A projectile moving in a straight line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub id: BodyId,
    pub center: Vec2,
    pub size: Vec2,
    pub velocity: Vec2,
    /// Copied from the shooter when fired
    pub faction: Faction,
}

impl Bullet {
    pub fn new(id: BodyId, center: Vec2, velocity: Vec2, faction: Faction) -> Self {
        Self {
            id,
            center,
            size: Vec2::splat(BULLET_SIZE),
            velocity,
            faction,
        }
    }

    #[inline]
    pub fn update(&mut self) {
        self.center += self.velocity;
    }
}

/// An invader patrolling a short stretch around its spawn point
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invader {
    pub id: BodyId,
    pub center: Vec2,
    pub size: Vec2,
    /// Distance travelled from the spawn point
    pub patrol_x: f32,
    pub speed_x: f32,
}

impl Invader {
    pub fn new(id: BodyId, center: Vec2) -> Self {
        Self {
            id,
            center,
            size: Vec2::splat(INVADER_SIZE),
            patrol_x: 0.0,
            speed_x: INVADER_SPEED_X,
        }
    }

    pub fn update(&mut self, ctx: &mut FrameContext<'_>) {
        // Turn around on the accumulator as it stood before this step
        if self.patrol_x < 0.0 || self.patrol_x > INVADER_PATROL_WIDTH {
            self.speed_x = -self.speed_x;
        }
        self.center.x += self.speed_x;
        self.patrol_x += self.speed_x;

        if ctx.roll() > INVADER_FIRE_ROLL && !ctx.lane_blocked {
            let jitter = ctx.roll() - 0.5;
            ctx.spawn_bullet(
                Vec2::new(self.center.x, self.center.y + self.size.x / 2.0),
                Vec2::new(jitter, INVADER_BULLET_SPEED_Y),
                Faction::Bad,
            );
        }
    }
}

/// A tank rolling along the bottom edge, bouncing between the field walls
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tank {
    pub id: BodyId,
    pub center: Vec2,
    pub size: Vec2,
    /// +1 moving right, -1 moving left
    pub direction: f32,
    pub speed_x: f32,
}

impl Tank {
    /// Faces right when spawned on the right half of the field, left otherwise
    pub fn new(id: BodyId, center: Vec2, field: Vec2) -> Self {
        let direction = if center.x > field.x / 2.0 { 1.0 } else { -1.0 };
        Self {
            id,
            center,
            size: Vec2::new(TANK_WIDTH, TANK_HEIGHT),
            direction,
            speed_x: TANK_SPEED_X,
        }
    }

    pub fn update(&mut self, ctx: &mut FrameContext<'_>) {
        if self.center.x < 0.0 || self.center.x > ctx.field.x {
            self.direction = -self.direction;
        }
        self.center.x += self.speed_x * self.direction;

        if ctx.roll() > TANK_FIRE_ROLL {
            ctx.spawn_bullet(
                Vec2::new(self.center.x + self.size.y / 2.0, self.center.y),
                Vec2::new(TANK_BULLET_SPEED_X * self.direction, 0.0),
                Faction::Bad,
            );
        }
    }
}

/// Any simulated entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Body {
    Player(Player),
    Bullet(Bullet),
    Invader(Invader),
    Tank(Tank),
}

impl Body {
    pub fn id(&self) -> BodyId {
        match self {
            Body::Player(p) => p.id,
            Body::Bullet(b) => b.id,
            Body::Invader(i) => i.id,
            Body::Tank(t) => t.id,
        }
    }

    pub fn center(&self) -> Vec2 {
        match self {
            Body::Player(p) => p.center,
            Body::Bullet(b) => b.center,
            Body::Invader(i) => i.center,
            Body::Tank(t) => t.center,
        }
    }

    /// Full width and height
    pub fn size(&self) -> Vec2 {
        match self {
            Body::Player(p) => p.size,
            Body::Bullet(b) => b.size,
            Body::Invader(i) => i.size,
            Body::Tank(t) => t.size,
        }
    }

    pub fn faction(&self) -> Faction {
        match self {
            Body::Player(_) => Faction::Good,
            Body::Bullet(b) => b.faction,
            Body::Invader(_) | Body::Tank(_) => Faction::Bad,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_center_size(self.center(), self.size())
    }

    #[inline]
    pub fn is_tank(&self) -> bool {
        matches!(self, Body::Tank(_))
    }

    #[inline]
    pub fn as_invader(&self) -> Option<&Invader> {
        match self {
            Body::Invader(invader) => Some(invader),
            _ => None,
        }
    }

    #[inline]
    pub fn as_player(&self) -> Option<&Player> {
        match self {
            Body::Player(player) => Some(player),
            _ => None,
        }
    }

    /// Advance this body by one frame
    pub fn update(&mut self, ctx: &mut FrameContext<'_>) {
        match self {
            Body::Player(player) => player.update(ctx),
            Body::Bullet(bullet) => bullet.update(),
            Body::Invader(invader) => invader.update(ctx),
            Body::Tank(tank) => tank.update(ctx),
        }
    }
}

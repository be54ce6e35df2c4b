//! World state: the body registry and its spatial queries
//!
//! The world exclusively owns its bodies and is the only place membership
//! changes. Order is append order.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{Body, BodyId, Invader, Player, Tank};
use crate::consts::*;

/// Things that happened during a frame, for audio and logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The player emitted a volley
    PlayerFired { player: BodyId },
    /// A tank entered at one edge of the field
    TankSpawned { tank: BodyId },
    /// The player was hit and removed
    PlayerDestroyed { player: BodyId },
}

/// The simulated play field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    /// Play-field size in pixels
    field: Vec2,
    pub(super) bodies: Vec<Body>,
    /// True iff a tank is in the registry (refreshed every update)
    pub(super) tank_active: bool,
    /// Frames simulated so far
    pub(super) frame: u64,
    #[serde(skip)]
    pub(super) events: Vec<GameEvent>,
    pub(super) next_id: BodyId,
}

impl World {
    /// A world with no bodies
    pub fn empty(field: Vec2) -> Self {
        Self {
            field,
            bodies: Vec::new(),
            tank_active: false,
            frame: 0,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// The starting layout: the invader formation, then the player
    pub fn new(field: Vec2) -> Self {
        let mut world = Self::empty(field);
        world.spawn_formation();
        world.spawn_player();
        log::info!(
            "World {}x{} created with {} bodies",
            field.x,
            field.y,
            world.bodies.len()
        );
        world
    }

    /// Allocate a new body ID
    pub fn next_entity_id(&mut self) -> BodyId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Append a body. No duplicate check.
    pub fn add_body(&mut self, body: Body) {
        self.bodies.push(body);
    }

    /// 8×3 grid of invaders starting at the field's top-left corner
    pub fn spawn_formation(&mut self) {
        for i in 0..INVADER_COUNT {
            let x = INVADER_GRID_ORIGIN + (i % INVADER_COLUMNS) as f32 * INVADER_GRID_SPACING;
            let y = INVADER_GRID_ORIGIN + (i % INVADER_ROWS) as f32 * INVADER_GRID_SPACING;
            self.spawn_invader(Vec2::new(x, y));
        }
    }

    pub fn spawn_invader(&mut self, center: Vec2) -> BodyId {
        let id = self.next_entity_id();
        self.add_body(Body::Invader(Invader::new(id, center)));
        id
    }

    pub fn spawn_player(&mut self) -> BodyId {
        let id = self.next_entity_id();
        self.add_body(Body::Player(Player::new(id, self.field)));
        id
    }

    /// Tank on the bottom row at the left or right field edge
    pub fn spawn_tank(&mut self, left_edge: bool) -> BodyId {
        let id = self.next_entity_id();
        let x = if left_edge { 0.0 } else { self.field.x };
        let center = Vec2::new(x, self.field.y - TANK_HEIGHT);
        self.add_body(Body::Tank(Tank::new(id, center, self.field)));
        self.tank_active = true;
        id
    }

    pub fn field_size(&self) -> Vec2 {
        self.field
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id() == id)
    }

    pub fn player(&self) -> Option<&Player> {
        self.bodies.iter().find_map(Body::as_player)
    }

    pub fn invader_count(&self) -> usize {
        self.bodies.iter().filter(|b| b.as_invader().is_some()).count()
    }

    pub fn tank_count(&self) -> usize {
        self.bodies.iter().filter(|b| b.is_tank()).count()
    }

    pub fn tank_active(&self) -> bool {
        self.tank_active
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Whether another invader is lower on screen in this invader's lane.
    ///
    /// Only the front-most invader of a column gets to fire.
    pub fn invaders_below(&self, invader: &Invader) -> bool {
        let half_width = invader.size.x / 2.0;
        self.bodies.iter().filter_map(Body::as_invader).any(|other| {
            other.center.y > invader.center.y
                && (other.center.x - invader.center.x).abs() < half_width
        })
    }

    /// Remove every body that left the vertical play bounds; returns how many went
    pub fn cull_out_of_bounds(&mut self) -> usize {
        let field_y = self.field.y;
        let before = self.bodies.len();
        self.bodies
            .retain(|b| (0.0..=field_y).contains(&b.center().y));
        before - self.bodies.len()
    }

    /// Take the events raised since the last drain
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::body::{Bullet, Faction};

    const FIELD: Vec2 = Vec2::new(310.0, 410.0);

    #[test]
    fn test_new_world_layout() {
        let world = World::new(FIELD);
        assert_eq!(world.bodies().len(), INVADER_COUNT + 1);
        assert_eq!(world.invader_count(), INVADER_COUNT);
        assert!(matches!(world.bodies().last(), Some(Body::Player(_))));
        assert!(!world.tank_active());

        // Every grid cell is occupied exactly once
        let mut cells: Vec<(i32, i32)> = world
            .bodies()
            .iter()
            .filter_map(Body::as_invader)
            .map(|inv| (inv.center.x as i32, inv.center.y as i32))
            .collect();
        cells.sort();
        cells.dedup();
        assert_eq!(cells.len(), INVADER_COUNT);
        assert_eq!(cells[0], (30, 30));
        assert_eq!(cells[INVADER_COUNT - 1], (240, 90));
    }

    #[test]
    fn test_ids_are_unique() {
        let world = World::new(FIELD);
        let mut ids: Vec<BodyId> = world.bodies().iter().map(Body::id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), world.bodies().len());
    }

    #[test]
    fn test_add_body_appends() {
        let mut world = World::empty(FIELD);
        let id = world.next_entity_id();
        let bullet = Body::Bullet(Bullet::new(id, Vec2::new(5.0, 5.0), Vec2::ZERO, Faction::Good));
        world.add_body(bullet.clone());
        world.add_body(bullet);
        assert_eq!(world.bodies().len(), 2);
        assert!(world.body(id).is_some());
    }

    #[test]
    fn test_invaders_below_same_column() {
        let mut world = World::empty(FIELD);
        let top = world.spawn_invader(Vec2::new(30.0, 30.0));
        let bottom = world.spawn_invader(Vec2::new(30.0, 60.0));
        let elsewhere = world.spawn_invader(Vec2::new(60.0, 30.0));

        let invader = |id| world.body(id).and_then(Body::as_invader).cloned();
        let top = invader(top).expect("top");
        let bottom = invader(bottom).expect("bottom");
        let elsewhere = invader(elsewhere).expect("elsewhere");

        assert!(world.invaders_below(&top));
        assert!(!world.invaders_below(&bottom));
        assert!(!world.invaders_below(&elsewhere));
    }

    #[test]
    fn test_invaders_below_ignores_other_bodies() {
        let mut world = World::empty(FIELD);
        let top = world.spawn_invader(Vec2::new(30.0, 30.0));
        let id = world.next_entity_id();
        world.add_body(Body::Bullet(Bullet::new(
            id,
            Vec2::new(30.0, 80.0),
            Vec2::ZERO,
            Faction::Bad,
        )));
        let top = world.body(top).and_then(Body::as_invader).cloned().expect("top");
        assert!(!world.invaders_below(&top));
    }

    #[test]
    fn test_cull_out_of_bounds() {
        let mut world = World::empty(FIELD);
        for (i, y) in [-1.0, 0.0, 200.0, 410.0, 411.0].into_iter().enumerate() {
            world.add_body(Body::Bullet(Bullet::new(
                i as BodyId,
                Vec2::new(10.0, y),
                Vec2::ZERO,
                Faction::Good,
            )));
        }
        assert_eq!(world.cull_out_of_bounds(), 2);
        let ys: Vec<f32> = world.bodies().iter().map(|b| b.center().y).collect();
        assert_eq!(ys, vec![0.0, 200.0, 410.0]);
    }

    #[test]
    fn test_spawn_tank_edges() {
        let mut world = World::empty(FIELD);
        let left = world.spawn_tank(true);
        let right = world.spawn_tank(false);
        assert!(world.tank_active());
        assert_eq!(world.body(left).map(Body::center), Some(Vec2::new(0.0, 398.0)));
        assert_eq!(world.body(right).map(Body::center), Some(Vec2::new(310.0, 398.0)));
    }
}

//! Per-frame simulation step
//!
//! One call to [`tick`] per animation frame:
//! 1. drop every body touching an opposing-faction body (both sides at once)
//! 2. update each survivor; bullets they fire join the registry after the pass
//! 3. refresh whether a tank exists
//! 4. maybe spawn a tank at a random edge when none does

use super::body::{Body, FrameContext};
use super::collision::colliding;
use super::input::InputSource;
use super::rng::RandomSource;
use super::state::{GameEvent, World};
use crate::consts::*;

/// Advance the world by one frame
pub fn tick(world: &mut World, input: &dyn InputSource, rng: &mut dyn RandomSource) {
    world.frame += 1;

    resolve_collisions(world);

    // Spawns are deferred so every body is updated exactly once per frame
    let mut spawned = Vec::new();
    let field = world.field_size();
    for i in 0..world.bodies.len() {
        let lane_blocked = match &world.bodies[i] {
            Body::Invader(invader) => world.invaders_below(invader),
            _ => false,
        };
        let mut ctx = FrameContext::new(
            input,
            &mut *rng,
            field,
            &mut spawned,
            &mut world.events,
            &mut world.next_id,
        );
        ctx.lane_blocked = lane_blocked;
        world.bodies[i].update(&mut ctx);
    }
    world.bodies.append(&mut spawned);

    world.tank_active = world.bodies.iter().any(Body::is_tank);

    if !world.tank_active && rng.next_f32() > TANK_SPAWN_ROLL {
        let left_edge = rng.next_f32() < TANK_LEFT_EDGE_ROLL;
        let tank = world.spawn_tank(left_edge);
        log::info!(
            "Tank {} spawned on the {} edge (frame {})",
            tank,
            if left_edge { "left" } else { "right" },
            world.frame
        );
        world.events.push(GameEvent::TankSpawned { tank });
    }
}

/// Remove every body with at least one colliding partner.
///
/// Hits are decided against the registry as it stood before any removal,
/// so both parties of a collision disappear in the same frame.
fn resolve_collisions(world: &mut World) {
    let hit: Vec<bool> = world
        .bodies
        .iter()
        .map(|body| world.bodies.iter().any(|other| colliding(body, other)))
        .collect();
    if !hit.contains(&true) {
        return;
    }

    let bodies = std::mem::take(&mut world.bodies);
    for (body, hit) in bodies.into_iter().zip(hit) {
        if !hit {
            world.bodies.push(body);
            continue;
        }
        if let Body::Player(player) = &body {
            log::debug!("Player {} destroyed (frame {})", player.id, world.frame);
            world
                .events
                .push(GameEvent::PlayerDestroyed { player: player.id });
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::sim::body::{Bullet, Faction};
    use crate::sim::input::{InputState, Key};
    use crate::sim::rng::ScriptedRng;

    const FIELD: Vec2 = Vec2::new(310.0, 410.0);

    fn add_bullet(world: &mut World, center: Vec2, velocity: Vec2, faction: Faction) -> u32 {
        let id = world.next_entity_id();
        world.add_body(Body::Bullet(Bullet::new(id, center, velocity, faction)));
        id
    }

    #[test]
    fn test_opposing_overlap_removes_both() {
        let mut world = World::empty(FIELD);
        let good = add_bullet(&mut world, Vec2::new(50.0, 50.0), Vec2::ZERO, Faction::Good);
        let bad = add_bullet(&mut world, Vec2::new(50.0, 50.0), Vec2::ZERO, Faction::Bad);
        for body in world.bodies.iter_mut() {
            if let Body::Bullet(b) = body {
                b.size = Vec2::ZERO;
            }
        }
        let bystander = add_bullet(&mut world, Vec2::new(200.0, 50.0), Vec2::ZERO, Faction::Bad);

        let input = InputState::new();
        let mut rng = ScriptedRng::constant(0.0);
        tick(&mut world, &input, &mut rng);

        assert!(world.body(good).is_none());
        assert!(world.body(bad).is_none());
        assert!(world.body(bystander).is_some());
    }

    #[test]
    fn test_one_body_hit_by_two() {
        let mut world = World::empty(FIELD);
        let invader = world.spawn_invader(Vec2::new(100.0, 100.0));
        let a = add_bullet(&mut world, Vec2::new(95.0, 100.0), Vec2::ZERO, Faction::Good);
        let b = add_bullet(&mut world, Vec2::new(105.0, 100.0), Vec2::ZERO, Faction::Good);

        let input = InputState::new();
        let mut rng = ScriptedRng::constant(0.0);
        tick(&mut world, &input, &mut rng);

        assert!(world.bodies().is_empty(), "{:?}", [invader, a, b]);
    }

    #[test]
    fn test_same_faction_overlap_survives() {
        let mut world = World::empty(FIELD);
        world.spawn_invader(Vec2::new(100.0, 100.0));
        add_bullet(&mut world, Vec2::new(100.0, 100.0), Vec2::ZERO, Faction::Bad);

        let input = InputState::new();
        let mut rng = ScriptedRng::constant(0.0);
        tick(&mut world, &input, &mut rng);
        assert_eq!(world.bodies().len(), 2);
    }

    #[test]
    fn test_spawned_bullets_wait_for_next_frame() {
        let mut world = World::empty(FIELD);
        let player = world.spawn_player();
        let mut input = InputState::new();
        input.press(Key::Fire);
        let mut rng = ScriptedRng::constant(0.0);

        tick(&mut world, &input, &mut rng);
        let player_y = world.body(player).map(Body::center).expect("player").y;
        let bullet = world.bodies().last().expect("bullet");
        assert!(matches!(bullet, Body::Bullet(_)));
        // Not moved yet: still where it was fired from
        assert_eq!(bullet.center().y, player_y - PLAYER_SIZE / 2.0);

        let bullet_id = bullet.id();
        tick(&mut world, &input, &mut rng);
        let moved = world.body(bullet_id).expect("bullet").center().y;
        assert_eq!(moved, player_y - PLAYER_SIZE / 2.0 + BULLET_SPEED);
    }

    #[test]
    fn test_tank_spawns_only_when_absent() {
        let mut world = World::empty(FIELD);
        let input = InputState::new();
        // Every roll passes the spawn check and picks the right edge
        let mut rng = ScriptedRng::constant(0.999);

        tick(&mut world, &input, &mut rng);
        assert_eq!(world.tank_count(), 1);
        assert!(world.tank_active());
        let events: Vec<GameEvent> = world.drain_events().collect();
        assert!(matches!(events[..], [GameEvent::TankSpawned { .. }]));

        for _ in 0..200 {
            tick(&mut world, &input, &mut rng);
            assert!(world.tank_count() <= 1);
        }
        assert_eq!(world.tank_count(), 1);
    }

    #[test]
    fn test_no_tank_without_lucky_roll() {
        let mut world = World::empty(FIELD);
        let input = InputState::new();
        let mut rng = ScriptedRng::constant(0.5);
        for _ in 0..100 {
            tick(&mut world, &input, &mut rng);
        }
        assert!(!world.tank_active());
        assert_eq!(world.frame(), 100);
    }

    #[test]
    fn test_tank_flag_clears_after_destruction() {
        let mut world = World::empty(FIELD);
        let input = InputState::new();
        let mut rng = ScriptedRng::new(vec![0.999, 0.1]);

        tick(&mut world, &input, &mut rng);
        let tank = world.bodies().iter().find(|b| b.is_tank()).expect("tank").clone();
        assert_eq!(tank.center().x, 0.0);

        // Shoot it
        add_bullet(&mut world, tank.center(), Vec2::ZERO, Faction::Good);
        let mut rng = ScriptedRng::constant(0.5);
        tick(&mut world, &input, &mut rng);
        assert_eq!(world.tank_count(), 0);
        assert!(!world.tank_active());
    }

    #[test]
    fn test_player_destroyed_event() {
        let mut world = World::empty(FIELD);
        let player = world.spawn_player();
        let center = world.body(player).map(Body::center).expect("player");
        add_bullet(&mut world, center, Vec2::ZERO, Faction::Bad);

        let input = InputState::new();
        let mut rng = ScriptedRng::constant(0.0);
        tick(&mut world, &input, &mut rng);

        assert!(world.player().is_none());
        let events: Vec<GameEvent> = world.drain_events().collect();
        assert_eq!(events, vec![GameEvent::PlayerDestroyed { player }]);
    }

    #[test]
    fn test_front_invader_fires_back_one_holds() {
        let mut world = World::empty(FIELD);
        world.spawn_invader(Vec2::new(30.0, 30.0));
        let front = world.spawn_invader(Vec2::new(30.0, 60.0));
        let input = InputState::new();
        // Each invader rolls once; the front one rolls again for jitter.
        // The trailing 0.0 is the tank spawn roll.
        let mut rng = ScriptedRng::new(vec![0.999, 0.999, 0.5, 0.0]);

        tick(&mut world, &input, &mut rng);
        let bullets: Vec<&Body> = world
            .bodies()
            .iter()
            .filter(|b| matches!(b, Body::Bullet(_)))
            .collect();
        assert_eq!(bullets.len(), 1);
        let front_x = world.body(front).map(Body::center).expect("front").x;
        assert_eq!(bullets[0].center().x, front_x);
        assert_eq!(bullets[0].faction(), Faction::Bad);
        assert_eq!(rng.draws(), 4);
    }
}

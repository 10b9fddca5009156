//! Walking and free-flight movement with block collision.
//!
//! Collision is resolved vertically first (rooftop landing), then
//! horizontally one axis at a time: X against every vertically-overlapping
//! block, then Z using the already-resolved X. The per-axis order is what
//! produces wall sliding instead of sticking; it is a deliberate
//! simplification, not a swept solver, and fast diagonal motion into a
//! corner resolves in favor of the X face.

use cgmath::{InnerSpace, Vector3};

use crate::camera::camera_data::FirstPersonData;
use crate::city::block::Block;
use crate::constants::movement::{
    BODY_HEIGHT, FLY_SPEED, GRAVITY, GROUNDED_EPSILON, GROUND_Y, JUMP_IMPULSE, PLAYER_RADIUS,
    SPRINT_SPEED, WALK_SPEED,
};
use crate::geometry::ray::right_vector;
use crate::input::InputState;

/// Clearance used when deciding whether a block wall overlaps the body;
/// keeps the block you stand on from counting as a wall.
const STEP_EPSILON: f32 = 0.01;

/// Advance one tick of walking (or free-flight) movement.
pub fn walk_tick(fp: &mut FirstPersonData, input: &mut InputState, blocks: &[Block], dt: f32) {
    if !(dt > 0.0) || !dt.is_finite() {
        return;
    }

    let (forward_axis, strafe_axis) = input.axes();
    let forward_flat = Vector3::new(fp.yaw.cos(), 0.0, fp.yaw.sin());
    let right = right_vector(fp.yaw);

    let mut intent = forward_flat * forward_axis + right * strafe_axis;
    if intent.magnitude2() > 1.0 {
        intent = intent.normalize();
    }

    let speed = if fp.flying {
        FLY_SPEED * if input.sprint_held() { 2.0 } else { 1.0 }
    } else if input.sprint_held() {
        SPRINT_SPEED
    } else {
        WALK_SPEED
    };
    let step = intent * speed * dt;

    if fp.flying {
        // Jump consumed so a later flight-mode exit does not replay it.
        input.take_jump();
        let vertical = (input.jump_held() as i8 - input.descend_held() as i8) as f32;
        fp.vertical_velocity = 0.0;
        fp.position.y = (fp.position.y + vertical * speed * dt).max(GROUND_Y);
    } else {
        apply_vertical(fp, input, blocks, dt);
    }

    resolve_horizontal(fp, blocks, step);
}

/// Gravity, the jump gate, and rooftop landing.
fn apply_vertical(fp: &mut FirstPersonData, input: &mut InputState, blocks: &[Block], dt: f32) {
    let grounded = fp.vertical_velocity.abs() < GROUNDED_EPSILON;
    if input.take_jump() && grounded {
        fp.vertical_velocity = JUMP_IMPULSE;
        log::debug!("[Physics] jump at y {:.2}", fp.position.y);
    }

    let prev_y = fp.position.y;
    fp.vertical_velocity -= GRAVITY * dt;
    let mut new_y = prev_y + fp.vertical_velocity * dt;

    if new_y <= GROUND_Y {
        new_y = GROUND_Y;
        fp.vertical_velocity = 0.0;
    } else if fp.vertical_velocity < 0.0 {
        // Falling: land on the highest rooftop the feet crossed this tick.
        let mut landing: Option<f32> = None;
        for block in blocks {
            if !footprint_contains(block, fp.position.x, fp.position.z) {
                continue;
            }
            let top = block.top_y();
            if prev_y >= top - GROUNDED_EPSILON && new_y <= top {
                if landing.map_or(true, |l| top > l) {
                    landing = Some(top);
                }
            }
        }
        if let Some(top) = landing {
            new_y = top;
            fp.vertical_velocity = 0.0;
        }
    }

    fp.position.y = new_y;
}

/// Move horizontally, clamping each axis against block walls.
fn resolve_horizontal(fp: &mut FirstPersonData, blocks: &[Block], step: Vector3<f32>) {
    let feet = fp.position.y;

    let blocking = |block: &Block| {
        let aabb = block.aabb();
        aabb.min.y < feet + BODY_HEIGHT && aabb.max.y > feet + STEP_EPSILON
    };

    // X first.
    let mut x = fp.position.x + step.x;
    if step.x != 0.0 {
        for block in blocks.iter().filter(|b| blocking(b)) {
            let aabb = block.aabb();
            let z_overlap = fp.position.z > aabb.min.z - PLAYER_RADIUS
                && fp.position.z < aabb.max.z + PLAYER_RADIUS;
            if !z_overlap {
                continue;
            }
            if x > aabb.min.x - PLAYER_RADIUS && x < aabb.max.x + PLAYER_RADIUS {
                x = if step.x > 0.0 {
                    aabb.min.x - PLAYER_RADIUS
                } else {
                    aabb.max.x + PLAYER_RADIUS
                };
            }
        }
    }
    fp.position.x = x;

    // Then Z, against the resolved X.
    let mut z = fp.position.z + step.z;
    if step.z != 0.0 {
        for block in blocks.iter().filter(|b| blocking(b)) {
            let aabb = block.aabb();
            let x_overlap = fp.position.x > aabb.min.x - PLAYER_RADIUS
                && fp.position.x < aabb.max.x + PLAYER_RADIUS;
            if !x_overlap {
                continue;
            }
            if z > aabb.min.z - PLAYER_RADIUS && z < aabb.max.z + PLAYER_RADIUS {
                z = if step.z > 0.0 {
                    aabb.min.z - PLAYER_RADIUS
                } else {
                    aabb.max.z + PLAYER_RADIUS
                };
            }
        }
    }
    fp.position.z = z;
}

fn footprint_contains(block: &Block, x: f32, z: f32) -> bool {
    let aabb = block.aabb();
    x >= aabb.min.x - PLAYER_RADIUS
        && x <= aabb.max.x + PLAYER_RADIUS
        && z >= aabb.min.z - PLAYER_RADIUS
        && z <= aabb.max.z + PLAYER_RADIUS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city::block::{BlockId, BlockShape};
    use crate::input::{InputEvent, Key};
    use crate::tree::NodeId;
    use cgmath::Point3;

    fn standing(x: f32, y: f32, z: f32) -> FirstPersonData {
        FirstPersonData::standing_at(Point3::new(x, y, z), 0.0, 0.0)
    }

    fn wall_block() -> Block {
        Block {
            id: BlockId(1),
            node: NodeId(1),
            name: "wall".to_string(),
            position: Point3::new(5.0, 0.0, -5.0),
            width: 4,
            depth: 10,
            height: 12,
            material: 0,
            texture: 0,
            shape: BlockShape::Standard,
            pinned: false,
            is_git_repo: false,
            git_clean: true,
        }
    }

    fn tick_n(fp: &mut FirstPersonData, input: &mut InputState, blocks: &[Block], n: usize) {
        for _ in 0..n {
            walk_tick(fp, input, blocks, 1.0 / 60.0);
        }
    }

    #[test]
    fn test_gravity_settles_to_ground() {
        let mut fp = standing(0.0, 10.0, 0.0);
        let mut input = InputState::new();
        tick_n(&mut fp, &mut input, &[], 240);
        assert_eq!(fp.position.y, GROUND_Y);
        assert_eq!(fp.vertical_velocity, 0.0);
    }

    #[test]
    fn test_jump_only_when_grounded() {
        let mut fp = standing(0.0, 0.0, 0.0);
        let mut input = InputState::new();

        input.handle_event(InputEvent::KeyDown(Key::Jump));
        walk_tick(&mut fp, &mut input, &[], 1.0 / 60.0);
        // One tick of gravity has already pulled on the impulse.
        let expected = JUMP_IMPULSE - GRAVITY / 60.0;
        assert!((fp.vertical_velocity - expected).abs() < 1e-4);

        // A second press mid-air is a no-op.
        input.handle_event(InputEvent::KeyUp(Key::Jump));
        input.handle_event(InputEvent::KeyDown(Key::Jump));
        let before = fp.vertical_velocity;
        walk_tick(&mut fp, &mut input, &[], 1.0 / 60.0);
        assert!(fp.vertical_velocity < before);
    }

    #[test]
    fn test_rooftop_landing_and_jump_from_roof() {
        let block = wall_block();
        let mut fp = standing(7.0, 30.0, 0.0);
        let mut input = InputState::new();
        tick_n(&mut fp, &mut input, &[block.clone()], 240);
        assert!((fp.position.y - block.top_y()).abs() < 1e-4);
        assert_eq!(fp.vertical_velocity, 0.0);

        // Grounded on the roof, so a jump works.
        input.handle_event(InputEvent::KeyDown(Key::Jump));
        walk_tick(&mut fp, &mut input, &[block], 1.0 / 60.0);
        assert!(fp.vertical_velocity > 0.0);
    }

    #[test]
    fn test_wall_clamps_and_slides() {
        let block = wall_block();
        let mut fp = standing(3.0, 0.0, 0.0);
        let mut input = InputState::new();

        // Walk +X straight into the wall for a while.
        input.handle_event(InputEvent::KeyDown(Key::MoveForward));
        let start_z = fp.position.z;
        tick_n(&mut fp, &mut input, &[block.clone()], 120);
        assert!((fp.position.x - (5.0 - PLAYER_RADIUS)).abs() < 1e-4);
        assert!((fp.position.z - start_z).abs() < 1e-6);

        // Strafing along the wall still moves freely in Z.
        input.handle_event(InputEvent::KeyDown(Key::StrafeRight));
        tick_n(&mut fp, &mut input, &[block], 60);
        assert!((fp.position.x - (5.0 - PLAYER_RADIUS)).abs() < 1e-4);
        assert!(fp.position.z > start_z + 1.0);
    }

    #[test]
    fn test_standing_on_roof_is_not_walled_in() {
        let block = wall_block();
        let mut fp = standing(7.0, block.top_y(), 0.0);
        let mut input = InputState::new();
        input.handle_event(InputEvent::KeyDown(Key::MoveForward));
        tick_n(&mut fp, &mut input, &[block], 30);
        // The roof the player stands on must not block horizontal motion.
        assert!(fp.position.x > 7.5);
    }

    #[test]
    fn test_flying_ignores_gravity() {
        let mut fp = standing(0.0, 20.0, 0.0);
        fp.flying = true;
        let mut input = InputState::new();
        tick_n(&mut fp, &mut input, &[], 120);
        assert_eq!(fp.position.y, 20.0);

        input.handle_event(InputEvent::KeyDown(Key::Jump));
        tick_n(&mut fp, &mut input, &[], 60);
        assert!(fp.position.y > 20.0);
    }

    #[test]
    fn test_sprint_covers_more_ground() {
        let mut walk = standing(0.0, 0.0, 0.0);
        let mut sprint = standing(0.0, 0.0, 0.0);

        let mut input = InputState::new();
        input.handle_event(InputEvent::KeyDown(Key::MoveForward));
        tick_n(&mut walk, &mut input, &[], 60);

        input.handle_event(InputEvent::KeyDown(Key::Sprint));
        tick_n(&mut sprint, &mut input, &[], 60);
        assert!(sprint.position.x > walk.position.x * 1.5);
    }

    #[test]
    fn test_zero_dt_is_a_no_op() {
        let mut fp = standing(1.0, 5.0, 2.0);
        let before = fp;
        let mut input = InputState::new();
        walk_tick(&mut fp, &mut input, &[], 0.0);
        walk_tick(&mut fp, &mut input, &[], f32::NAN);
        assert_eq!(fp, before);
    }
}

//! Grapple movement: fire at something, reel toward it, optionally stay
//! attached and ride it.
//!
//! Attachment targets live in a host-owned list and may vanish between
//! ticks (a rescan, a despawned vehicle); every tick re-validates the index
//! and liveness and detaches cleanly instead of tracking stale state.

use cgmath::{InnerSpace, Point3};

use crate::camera::camera_data::{AttachState, FirstPersonData};
use crate::city::block::Block;
use crate::constants::movement::{
    ATTACH_OFFSET_AERIAL, ATTACH_OFFSET_GROUND, GRAPPLE_ARRIVE, GRAPPLE_SPEED,
};
use crate::constants::picking::TARGET_PICK_RADIUS;
use crate::geometry::aabb::ray_sphere_intersect;
use crate::geometry::ray::Ray;
use crate::picking::picker_operations::pick_block;

use super::{MovingTarget, MovingTargetKind};

/// Cast the grapple along a ray. Building geometry and moving targets
/// compete on distance; the nearest hit wins. Returns whether anything was
/// hooked.
pub fn fire_grapple(
    fp: &mut FirstPersonData,
    ray: &Ray,
    blocks: &[Block],
    targets: &[MovingTarget],
    camera_yaw: f32,
) -> bool {
    if ray.is_degenerate() {
        return false;
    }

    let block_hit = pick_block(ray, blocks, camera_yaw).map(|hit| (hit.distance, None));

    let target_hit = targets
        .iter()
        .enumerate()
        .filter(|(_, t)| t.alive)
        .filter_map(|(i, t)| {
            ray_sphere_intersect(ray, t.position, TARGET_PICK_RADIUS).map(|d| (d, Some(i)))
        })
        .min_by(|a, b| a.0.total_cmp(&b.0));

    let nearest = match (block_hit, target_hit) {
        (Some(b), Some(t)) => Some(if t.0 < b.0 { t } else { b }),
        (hit, None) | (None, hit) => hit,
    };

    match nearest {
        Some((distance, target)) => {
            let to = ray.point_at(distance);
            log::debug!(
                "[Physics] grapple hooked at {:.2} (target {:?})",
                distance,
                target
            );
            fp.attach = AttachState::Traveling { to, target };
            true
        }
        None => false,
    }
}

/// Advance the grapple state machine one tick.
///
/// `modifier_held` decides whether arrival converts into riding the target;
/// releasing it mid-ride detaches the same tick.
pub fn grapple_tick(
    fp: &mut FirstPersonData,
    targets: &[MovingTarget],
    modifier_held: bool,
    dt: f32,
) {
    if !(dt > 0.0) || !dt.is_finite() {
        return;
    }

    match fp.attach {
        AttachState::None => {}
        AttachState::Traveling { mut to, target } => {
            // A tracked target updates the reel-in point every tick.
            if let Some(index) = target {
                match live_target(targets, index) {
                    Some(t) => to = t.position,
                    None => {
                        detach(fp);
                        return;
                    }
                }
            }

            let offset = to - fp.position;
            let distance = offset.magnitude();
            if distance <= GRAPPLE_ARRIVE {
                match target {
                    Some(index) if modifier_held => {
                        fp.attach = AttachState::Attached { target: index };
                    }
                    _ => detach(fp),
                }
                return;
            }

            fp.vertical_velocity = 0.0;
            let step = (GRAPPLE_SPEED * dt).min(distance);
            fp.position += offset / distance * step;
            fp.attach = AttachState::Traveling { to, target };
        }
        AttachState::Attached { target } => {
            if !modifier_held {
                detach(fp);
                return;
            }
            match live_target(targets, target) {
                Some(t) => {
                    // Hang below what flies, stand on what drives.
                    let offset = match t.kind {
                        MovingTargetKind::Aircraft | MovingTargetKind::Satellite => {
                            -ATTACH_OFFSET_AERIAL
                        }
                        MovingTargetKind::GroundVehicle => ATTACH_OFFSET_GROUND,
                    };
                    fp.position = Point3::new(
                        t.position.x,
                        t.position.y + offset,
                        t.position.z,
                    );
                    fp.vertical_velocity = 0.0;
                }
                None => detach(fp),
            }
        }
    }
}

fn live_target(targets: &[MovingTarget], index: usize) -> Option<&MovingTarget> {
    targets.get(index).filter(|t| t.alive)
}

/// Drop the grapple; falling resumes on the next walk tick.
fn detach(fp: &mut FirstPersonData) {
    fp.attach = AttachState::None;
    fp.vertical_velocity = 0.0;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city::block::{BlockId, BlockShape};
    use crate::tree::NodeId;
    use cgmath::Vector3;

    fn player() -> FirstPersonData {
        FirstPersonData::standing_at(Point3::new(0.0, 0.0, 0.0), 0.0, 0.0)
    }

    fn tower() -> Block {
        Block {
            id: BlockId(1),
            node: NodeId(1),
            name: "tower".to_string(),
            position: Point3::new(20.0, 0.0, -2.0),
            width: 4,
            depth: 4,
            height: 30,
            material: 0,
            texture: 0,
            shape: BlockShape::Standard,
            pinned: false,
            is_git_repo: false,
            git_clean: true,
        }
    }

    fn aircraft_at(x: f32, y: f32) -> MovingTarget {
        MovingTarget {
            position: Point3::new(x, y, 0.0),
            velocity: Vector3::new(10.0, 0.0, 0.0),
            kind: MovingTargetKind::Aircraft,
            alive: true,
        }
    }

    #[test]
    fn test_fire_hooks_nearest_of_block_and_target() {
        let mut fp = player();
        let blocks = [tower()];
        // Aircraft hangs in front of the tower wall.
        let targets = [aircraft_at(10.0, 5.0)];
        let ray = Ray::new(Point3::new(0.0, 5.0, 0.0), Vector3::new(1.0, 0.0, 0.0));

        assert!(fire_grapple(&mut fp, &ray, &blocks, &targets, 0.0));
        match fp.attach {
            AttachState::Traveling { target, .. } => assert_eq!(target, Some(0)),
            other => panic!("expected traveling state, got {:?}", other),
        }
    }

    #[test]
    fn test_fire_miss_leaves_state_unchanged() {
        let mut fp = player();
        let ray = Ray::new(Point3::new(0.0, 5.0, 0.0), Vector3::new(0.0, 1.0, 0.0));
        assert!(!fire_grapple(&mut fp, &ray, &[tower()], &[], 0.0));
        assert_eq!(fp.attach, AttachState::None);
    }

    #[test]
    fn test_travel_reels_in_and_detaches_on_arrival() {
        let mut fp = player();
        let wall_point = Point3::new(19.65, 10.0, 0.0);
        fp.attach = AttachState::Traveling {
            to: wall_point,
            target: None,
        };

        for _ in 0..120 {
            grapple_tick(&mut fp, &[], false, 1.0 / 60.0);
            if fp.attach == AttachState::None {
                break;
            }
        }
        assert_eq!(fp.attach, AttachState::None);
        let remaining = (wall_point - fp.position).magnitude();
        assert!(remaining <= GRAPPLE_ARRIVE + 1e-3);
    }

    #[test]
    fn test_modifier_converts_arrival_into_attachment() {
        let mut fp = player();
        let targets = [aircraft_at(6.0, 8.0)];
        fp.attach = AttachState::Traveling {
            to: targets[0].position,
            target: Some(0),
        };

        for _ in 0..120 {
            grapple_tick(&mut fp, &targets, true, 1.0 / 60.0);
            if matches!(fp.attach, AttachState::Attached { .. }) {
                break;
            }
        }
        assert_eq!(fp.attach, AttachState::Attached { target: 0 });

        // Riding below the aircraft.
        grapple_tick(&mut fp, &targets, true, 1.0 / 60.0);
        assert!((fp.position.y - (8.0 - ATTACH_OFFSET_AERIAL)).abs() < 1e-4);

        // Release drops the ride the same tick.
        grapple_tick(&mut fp, &targets, false, 1.0 / 60.0);
        assert_eq!(fp.attach, AttachState::None);
    }

    #[test]
    fn test_ground_vehicle_rides_on_top() {
        let mut fp = player();
        let targets = [MovingTarget {
            position: Point3::new(3.0, 1.0, 4.0),
            velocity: Vector3::new(5.0, 0.0, 0.0),
            kind: MovingTargetKind::GroundVehicle,
            alive: true,
        }];
        fp.attach = AttachState::Attached { target: 0 };
        grapple_tick(&mut fp, &targets, true, 1.0 / 60.0);
        assert!((fp.position.y - (1.0 + ATTACH_OFFSET_GROUND)).abs() < 1e-4);
    }

    #[test]
    fn test_vanished_target_detaches_gracefully() {
        let mut fp = player();
        fp.attach = AttachState::Attached { target: 0 };
        let mut targets = vec![aircraft_at(5.0, 10.0)];
        targets[0].alive = false;
        grapple_tick(&mut fp, &targets, true, 1.0 / 60.0);
        assert_eq!(fp.attach, AttachState::None);

        // Out-of-range index after a list swap is just as fatal.
        fp.attach = AttachState::Attached { target: 9 };
        grapple_tick(&mut fp, &targets, true, 1.0 / 60.0);
        assert_eq!(fp.attach, AttachState::None);
    }
}

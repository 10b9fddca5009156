//! Ray picking against the block list.
//!
//! Two phases per block: a conservative bounding-box reject, then exact
//! intersection against the deformed triangle mesh from
//! [`crate::geometry::deform`]. The second phase uses the same deformation
//! constants the renderer draws with, which is what keeps clicks matched to
//! pixels.

use cgmath::{EuclideanSpace, Point3};

use crate::city::block::{Block, BlockShape};
use crate::constants::layout::{BEACON_HOVER, BEACON_SIZE};
use crate::constants::picking::{
    BOUND_MULT_RAISED, BOUND_MULT_STANDARD, BOUND_MULT_WEDGE, EPSILON,
};
use crate::geometry::aabb::{create_aabb, ray_aabb_intersect, Aabb};
use crate::geometry::deform::{deformed_triangles, wedge_yaw_offset};
use crate::geometry::ray::Ray;

use super::picker_data::{Beacon, BeaconHit, Hit};

/// Conservative height multiplier for the reject phase. Must dominate the
/// deformed mesh of every shape (checked in tests against the deformation
/// constants).
pub fn pick_bound_multiplier(shape: BlockShape) -> f32 {
    match shape {
        BlockShape::Standard
        | BlockShape::Cylinder
        | BlockShape::Marker
        | BlockShape::Platform => BOUND_MULT_STANDARD,
        BlockShape::Taper | BlockShape::Pyramid => BOUND_MULT_RAISED,
        BlockShape::WedgeX | BlockShape::WedgeZ => BOUND_MULT_WEDGE,
    }
}

/// Conservative bounds for the reject phase. Wedges may be shown rotated by
/// a quarter turn, so their horizontal bound uses the larger half extent on
/// both axes.
pub fn pick_aabb(block: &Block) -> Aabb {
    let (half_w, half_d) = block.half_extents_xz();
    let (bx, bz) = match block.shape {
        BlockShape::WedgeX | BlockShape::WedgeZ => {
            let m = half_w.max(half_d);
            (m, m)
        }
        _ => (half_w, half_d),
    };

    let center = block.center_base();
    create_aabb(
        Point3::new(center.x - bx, block.position.y, center.z - bz),
        Point3::new(
            center.x + bx,
            block.position.y + block.height as f32 * pick_bound_multiplier(block.shape),
            center.z + bz,
        ),
    )
}

/// Pick the nearest block along a ray.
///
/// `camera_yaw` feeds the wedge orientation, which tracks the viewer.
/// Returns `None` when the ray hits nothing or is degenerate.
pub fn pick_block(ray: &Ray, blocks: &[Block], camera_yaw: f32) -> Option<Hit> {
    if ray.is_degenerate() {
        return None;
    }

    let wedge_yaw = wedge_yaw_offset(camera_yaw);
    let mut best: Option<Hit> = None;

    for block in blocks {
        let bound_hit = match ray_aabb_intersect(ray, &pick_aabb(block)) {
            Some(t) => t,
            None => continue,
        };
        if let Some(ref hit) = best {
            if bound_hit >= hit.distance {
                continue;
            }
        }

        if let Some(t) = intersect_block_mesh(ray, block, wedge_yaw) {
            let closer = best.as_ref().map_or(true, |hit| t < hit.distance);
            if closer {
                best = Some(Hit {
                    block: block.id,
                    distance: t,
                });
            }
        }
    }

    if let Some(ref hit) = best {
        log::debug!("[Picker] hit {} at {:.2}", hit.block, hit.distance);
    }
    best
}

/// Exact mesh intersection for one block. Nearest triangle hit, if any.
fn intersect_block_mesh(ray: &Ray, block: &Block, wedge_yaw: f32) -> Option<f32> {
    let (half_w, half_d) = block.half_extents_xz();
    let center = block.center_base().to_vec();

    let mut nearest: Option<f32> = None;
    for tri in deformed_triangles(block.shape, half_w, half_d, block.height as f32, wedge_yaw) {
        let world = [tri[0] + center, tri[1] + center, tri[2] + center];
        if let Some(t) = ray_triangle_intersect(ray, &world) {
            if nearest.map_or(true, |n| t < n) {
                nearest = Some(t);
            }
        }
    }
    nearest
}

/// Moller-Trumbore ray/triangle intersection, both-sided.
fn ray_triangle_intersect(ray: &Ray, tri: &[Point3<f32>; 3]) -> Option<f32> {
    let edge1 = tri[1] - tri[0];
    let edge2 = tri[2] - tri[0];

    let pvec = ray.direction.cross(edge2);
    let det = cgmath::dot(edge1, pvec);
    if det.abs() < EPSILON {
        return None;
    }
    let inv_det = 1.0 / det;

    let tvec = ray.origin - tri[0];
    let u = cgmath::dot(tvec, pvec) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let qvec = tvec.cross(edge1);
    let v = cgmath::dot(ray.direction, qvec) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = cgmath::dot(edge2, qvec) * inv_det;
    if t > EPSILON {
        Some(t)
    } else {
        None
    }
}

/// Build the beacon list for a block list: one marker hovering over every
/// dirty repository block.
pub fn beacons_for_blocks(blocks: &[Block]) -> Vec<Beacon> {
    blocks
        .iter()
        .filter(|b| b.is_git_repo && !b.git_clean)
        .map(|b| {
            let center = b.center_base();
            let hover_base = b.position.y
                + b.height as f32 * pick_bound_multiplier(b.shape)
                + BEACON_HOVER;
            let half = BEACON_SIZE * 0.5;
            Beacon {
                block: b.id,
                aabb: create_aabb(
                    Point3::new(center.x - half, hover_base, center.z - half),
                    Point3::new(center.x + half, hover_base + BEACON_SIZE, center.z + half),
                ),
            }
        })
        .collect()
}

/// Box-only nearest-hit test over the beacon list.
pub fn pick_beacon(ray: &Ray, beacons: &[Beacon]) -> Option<BeaconHit> {
    if ray.is_degenerate() {
        return None;
    }

    let mut best: Option<BeaconHit> = None;
    for beacon in beacons {
        if let Some(t) = ray_aabb_intersect(ray, &beacon.aabb) {
            if best.as_ref().map_or(true, |hit| t < hit.distance) {
                best = Some(BeaconHit {
                    block: beacon.block,
                    distance: t,
                });
            }
        }
    }
    best
}

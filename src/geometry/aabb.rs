//! Axis-aligned bounding boxes.
//!
//! Pure functions over plain data; the picker's cheap reject phase, the
//! layout overlap invariant and the walking collision resolver all go
//! through these.

use cgmath::{Point3, Vector3};

use super::ray::Ray;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Point3<f32>,
    pub max: Point3<f32>,
}

/// Create an AABB from min/max corners.
pub fn create_aabb(min: Point3<f32>, max: Point3<f32>) -> Aabb {
    Aabb { min, max }
}

/// Create an AABB from a center point and half extents.
pub fn aabb_from_center_half_extents(center: Point3<f32>, half_extents: Vector3<f32>) -> Aabb {
    Aabb {
        min: Point3::new(
            center.x - half_extents.x,
            center.y - half_extents.y,
            center.z - half_extents.z,
        ),
        max: Point3::new(
            center.x + half_extents.x,
            center.y + half_extents.y,
            center.z + half_extents.z,
        ),
    }
}

/// Center point of an AABB.
pub fn aabb_center(aabb: &Aabb) -> Point3<f32> {
    Point3::new(
        (aabb.min.x + aabb.max.x) * 0.5,
        (aabb.min.y + aabb.max.y) * 0.5,
        (aabb.min.z + aabb.max.z) * 0.5,
    )
}

/// Test whether two AABBs intersect.
pub fn aabb_intersects(a: &Aabb, b: &Aabb) -> bool {
    a.min.x <= b.max.x
        && a.max.x >= b.min.x
        && a.min.y <= b.max.y
        && a.max.y >= b.min.y
        && a.min.z <= b.max.z
        && a.max.z >= b.min.z
}

/// Test whether the footprints (XZ projections) of two AABBs overlap,
/// ignoring height. Strict inequality: boxes that share an edge do not
/// overlap.
pub fn aabb_overlaps_xz(a: &Aabb, b: &Aabb) -> bool {
    a.min.x < b.max.x && a.max.x > b.min.x && a.min.z < b.max.z && a.max.z > b.min.z
}

/// Test whether an AABB contains a point.
pub fn aabb_contains_point(aabb: &Aabb, point: Point3<f32>) -> bool {
    point.x >= aabb.min.x
        && point.x <= aabb.max.x
        && point.y >= aabb.min.y
        && point.y <= aabb.max.y
        && point.z >= aabb.min.z
        && point.z <= aabb.max.z
}

/// Create a translated copy of an AABB.
pub fn aabb_translated(aabb: &Aabb, offset: Vector3<f32>) -> Aabb {
    Aabb {
        min: aabb.min + offset,
        max: aabb.max + offset,
    }
}

/// Slab-method ray/AABB intersection.
///
/// Returns the distance along the ray to the entry point, or `Some(0.0)`
/// when the origin is already inside. Degenerate rays (zero direction)
/// return `None`.
pub fn ray_aabb_intersect(ray: &Ray, aabb: &Aabb) -> Option<f32> {
    if ray.is_degenerate() {
        return None;
    }

    let mut t_min = f32::NEG_INFINITY;
    let mut t_max = f32::INFINITY;

    for axis in 0..3 {
        let (origin, dir, lo, hi) = match axis {
            0 => (ray.origin.x, ray.direction.x, aabb.min.x, aabb.max.x),
            1 => (ray.origin.y, ray.direction.y, aabb.min.y, aabb.max.y),
            _ => (ray.origin.z, ray.direction.z, aabb.min.z, aabb.max.z),
        };

        if dir.abs() < 1e-8 {
            if origin < lo || origin > hi {
                return None;
            }
        } else {
            let t1 = (lo - origin) / dir;
            let t2 = (hi - origin) / dir;
            t_min = t_min.max(t1.min(t2));
            t_max = t_max.min(t1.max(t2));
            if t_min > t_max {
                return None;
            }
        }
    }

    if t_max < 0.0 {
        // Entirely behind the origin.
        return None;
    }
    Some(t_min.max(0.0))
}

/// Ray/sphere intersection, nearest non-negative distance.
pub fn ray_sphere_intersect(ray: &Ray, center: Point3<f32>, radius: f32) -> Option<f32> {
    if ray.is_degenerate() || radius <= 0.0 {
        return None;
    }

    let oc = ray.origin - center;
    let b = cgmath::dot(oc, ray.direction);
    let c = cgmath::dot(oc, oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }

    let sqrt_disc = disc.sqrt();
    let t0 = -b - sqrt_disc;
    let t1 = -b + sqrt_disc;
    if t0 >= 0.0 {
        Some(t0)
    } else if t1 >= 0.0 {
        // Origin inside the sphere.
        Some(0.0)
    } else {
        None
    }
}

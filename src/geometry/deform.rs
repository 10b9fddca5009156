//! Per-shape vertex deformation.
//!
//! This module is the single authority for how a building's silhouette
//! deviates from a plain box. The exact-mesh picker consumes these
//! triangles, and a host renderer must build its vertex buffers from the
//! same functions; duplicating the formulas is how clicks stop matching
//! pixels.
//!
//! Template space: a canonical box with `x, z` in `[-1, 1]` and `y` in
//! `{0, 1}`. Deformation scales the template by the block half extents and
//! height, then applies the shape transform, yielding coordinates local to
//! the footprint center at base height zero.

use cgmath::Point3;
use std::f32::consts::{FRAC_PI_2, TAU};

use crate::city::block::BlockShape;
use crate::constants::deform::{
    CYLINDER_SEGMENTS, PYRAMID_APEX_FACTOR, TAPER_TOP_RAISE, TAPER_TOP_SCALE,
    WEDGE_SHEAR_FACTOR, WEDGE_SHEAR_HEIGHT_CLAMP,
};

/// Yaw the wedge shapes are rotated by for a given camera yaw: the camera
/// yaw snapped to its quarter-turn quadrant, so the slanted face always
/// presents toward the viewer.
pub fn wedge_yaw_offset(camera_yaw: f32) -> f32 {
    let wrapped = camera_yaw.rem_euclid(TAU);
    let quadrant = ((wrapped / FRAC_PI_2).floor() as i32).min(3);
    quadrant as f32 * FRAC_PI_2
}

/// Shear applied to a wedge's top edges, from the half extent along the
/// wedge axis, clamped against the height so squat footprints stay inside
/// the wedge pick bound.
pub fn wedge_shear(half_extent: f32, height: f32) -> f32 {
    (WEDGE_SHEAR_FACTOR * half_extent).min(WEDGE_SHEAR_HEIGHT_CLAMP * height)
}

/// Deform one template vertex for a shape.
///
/// `unit` is a template-space vertex; the result is local to the footprint
/// center. `wedge_yaw` is the [`wedge_yaw_offset`] of the current camera
/// yaw and only affects the wedge shapes. Non-building shapes pass through
/// as plain boxes.
pub fn deform_vertex(
    shape: BlockShape,
    unit: Point3<f32>,
    half_w: f32,
    half_d: f32,
    height: f32,
    wedge_yaw: f32,
) -> Point3<f32> {
    let mut p = Point3::new(unit.x * half_w, unit.y * height, unit.z * half_d);
    let top = unit.y > 0.5;

    match shape {
        BlockShape::Taper => {
            if top {
                p.x *= TAPER_TOP_SCALE;
                p.z *= TAPER_TOP_SCALE;
                p.y = height * (1.0 + TAPER_TOP_RAISE);
            }
        }
        BlockShape::Pyramid => {
            if top {
                p = Point3::new(0.0, height * PYRAMID_APEX_FACTOR, 0.0);
            }
        }
        BlockShape::WedgeX => {
            if top {
                let shear = wedge_shear(half_w, height);
                p.y += if unit.x > 0.0 { shear } else { -shear };
            }
            p = rotate_y(p, wedge_yaw);
        }
        BlockShape::WedgeZ => {
            if top {
                let shear = wedge_shear(half_d, height);
                p.y += if unit.z > 0.0 { shear } else { -shear };
            }
            p = rotate_y(p, wedge_yaw);
        }
        BlockShape::Cylinder => {
            // Clamp both rings onto the footprint ellipse.
            let len = (unit.x * unit.x + unit.z * unit.z).sqrt();
            if len > 1.0 {
                p.x /= len;
                p.z /= len;
            }
        }
        BlockShape::Standard | BlockShape::Marker | BlockShape::Platform => {}
    }

    p
}

fn rotate_y(p: Point3<f32>, angle: f32) -> Point3<f32> {
    let (sin, cos) = angle.sin_cos();
    Point3::new(p.x * cos - p.z * sin, p.y, p.x * sin + p.z * cos)
}

/// Template triangles for a shape, in template space.
///
/// Box-derived shapes share the 12-triangle box; the cylinder uses a
/// segmented prism whose ring vertices sit outside the unit circle so the
/// radial clamp in [`deform_vertex`] lands them exactly on the footprint
/// ellipse.
pub fn shape_template_triangles(shape: BlockShape) -> Vec<[Point3<f32>; 3]> {
    match shape {
        BlockShape::Cylinder => cylinder_template(),
        _ => box_template(),
    }
}

/// All deformed triangles for a block's shape, local to the footprint
/// center at base height zero.
pub fn deformed_triangles(
    shape: BlockShape,
    half_w: f32,
    half_d: f32,
    height: f32,
    wedge_yaw: f32,
) -> Vec<[Point3<f32>; 3]> {
    shape_template_triangles(shape)
        .into_iter()
        .map(|tri| {
            [
                deform_vertex(shape, tri[0], half_w, half_d, height, wedge_yaw),
                deform_vertex(shape, tri[1], half_w, half_d, height, wedge_yaw),
                deform_vertex(shape, tri[2], half_w, half_d, height, wedge_yaw),
            ]
        })
        .collect()
}

fn box_template() -> Vec<[Point3<f32>; 3]> {
    let corners = [
        Point3::new(-1.0, 0.0, -1.0), // 0
        Point3::new(1.0, 0.0, -1.0),  // 1
        Point3::new(1.0, 1.0, -1.0),  // 2
        Point3::new(-1.0, 1.0, -1.0), // 3
        Point3::new(-1.0, 0.0, 1.0),  // 4
        Point3::new(1.0, 0.0, 1.0),   // 5
        Point3::new(1.0, 1.0, 1.0),   // 6
        Point3::new(-1.0, 1.0, 1.0),  // 7
    ];

    // Quads per face, split into two triangles each.
    let faces: [[usize; 4]; 6] = [
        [1, 5, 6, 2], // +X
        [4, 0, 3, 7], // -X
        [3, 2, 6, 7], // +Y
        [4, 5, 1, 0], // -Y
        [5, 4, 7, 6], // +Z
        [0, 1, 2, 3], // -Z
    ];

    let mut triangles = Vec::with_capacity(12);
    for face in faces {
        triangles.push([corners[face[0]], corners[face[1]], corners[face[2]]]);
        triangles.push([corners[face[0]], corners[face[2]], corners[face[3]]]);
    }
    triangles
}

fn cylinder_template() -> Vec<[Point3<f32>; 3]> {
    // Ring radius sqrt(2) matches the box corner radius; the clamp pulls it
    // in to the ellipse.
    let ring_radius = std::f32::consts::SQRT_2;
    let segments = CYLINDER_SEGMENTS;

    let ring = |i: usize, y: f32| {
        let angle = i as f32 / segments as f32 * TAU;
        Point3::new(ring_radius * angle.cos(), y, ring_radius * angle.sin())
    };

    let top_center = Point3::new(0.0, 1.0, 0.0);
    let bottom_center = Point3::new(0.0, 0.0, 0.0);

    let mut triangles = Vec::with_capacity(segments * 4);
    for i in 0..segments {
        let j = (i + 1) % segments;
        let b0 = ring(i, 0.0);
        let b1 = ring(j, 0.0);
        let t0 = ring(i, 1.0);
        let t1 = ring(j, 1.0);

        triangles.push([b0, b1, t1]);
        triangles.push([b0, t1, t0]);
        triangles.push([top_center, t0, t1]);
        triangles.push([bottom_center, b1, b0]);
    }
    triangles
}

//! Geometry utilities shared by the layout mapper, the picker and the
//! movement physics.

pub mod aabb;
pub mod deform;
pub mod ray;
pub mod seeded;

pub use aabb::{
    aabb_center, aabb_contains_point, aabb_from_center_half_extents, aabb_intersects,
    aabb_overlaps_xz, aabb_translated, create_aabb, ray_aabb_intersect, ray_sphere_intersect,
    Aabb,
};
pub use deform::{deform_vertex, deformed_triangles, wedge_shear, wedge_yaw_offset};
pub use ray::{forward_vector, right_vector, screen_ray, up_vector, Ray};
pub use seeded::{fnv1a64, hash_to_bucket, SeededRng};

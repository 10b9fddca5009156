//! Camera state and view derivation for both viewing modes.

pub mod camera_data;
pub mod camera_operations;

pub use camera_data::{
    AircraftData, AttachState, CameraMode, CameraState, CameraUniform, FirstPersonData,
    OrbitData,
};
pub use camera_operations::{
    apply_look, build_camera_uniform, build_projection_matrix, build_view_matrix, camera_yaw,
    center_ray, eye_and_target, orbit_pan, orbit_rotate, orbit_zoom, pick_ray, toggle_mode,
};

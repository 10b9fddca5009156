//! Camera operations: view/projection derivation, mode transitions, and
//! look/pan/zoom input application. Pure functions over the camera data.

use cgmath::{Matrix4, Point3, Rad, Vector3};

use crate::constants::camera::{
    DEFAULT_ORBIT_DISTANCE, MIN_ORBIT_DISTANCE, MOUSE_SENSITIVITY, ORBIT_PITCH, PAN_SPEED,
    ZOOM_SPEED,
};
use crate::constants::flight::{CHASE_BACK, CHASE_UP};
use crate::constants::movement::{EYE_HEIGHT, GROUND_Y};
use crate::geometry::ray::{forward_vector, right_vector, screen_ray, Ray};

use super::camera_data::{
    AircraftData, CameraMode, CameraState, CameraUniform, FirstPersonData, OrbitData,
};

const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

// ============================================================================
// VIEW DERIVATION
// ============================================================================

/// World-space eye position and look target for the current mode.
pub fn eye_and_target(state: &CameraState) -> (Point3<f32>, Point3<f32>) {
    match &state.mode {
        CameraMode::Orbit(orbit) => {
            let back = forward_vector(orbit.yaw, ORBIT_PITCH);
            (orbit.target - back * orbit.distance, orbit.target)
        }
        CameraMode::FirstPerson(fp) => match &fp.aircraft {
            Some(air) => chase_eye_and_target(air),
            None => {
                let eye = fp.position + Vector3::new(0.0, EYE_HEIGHT, 0.0);
                (eye, eye + forward_vector(fp.yaw, fp.pitch))
            }
        },
    }
}

/// Third-person chase placement behind a piloted aircraft. The free-look
/// offset swings the camera without steering the aircraft.
fn chase_eye_and_target(air: &AircraftData) -> (Point3<f32>, Point3<f32>) {
    let view_yaw = air.yaw + air.look_yaw;
    let view_pitch = (air.pitch * 0.3 + air.look_pitch).clamp(-1.2, 1.2);
    let eye = air.position - forward_vector(view_yaw, view_pitch) * CHASE_BACK
        + Vector3::new(0.0, CHASE_UP, 0.0);
    (eye, air.position)
}

pub fn build_view_matrix(state: &CameraState) -> Matrix4<f32> {
    let (eye, target) = eye_and_target(state);
    Matrix4::look_at_rh(eye, target, Vector3::unit_y())
}

pub fn build_projection_matrix(state: &CameraState) -> Matrix4<f32> {
    cgmath::perspective(
        Rad(state.fov_radians),
        state.aspect_ratio,
        state.near_plane,
        state.far_plane,
    )
}

pub fn build_camera_uniform(state: &CameraState) -> CameraUniform {
    let view = build_view_matrix(state);
    let projection = build_projection_matrix(state);
    let (eye, _) = eye_and_target(state);

    CameraUniform {
        view_matrix: view.into(),
        projection_matrix: projection.into(),
        view_projection_matrix: (projection * view).into(),
        eye_position: [eye.x, eye.y, eye.z, 1.0],
    }
}

/// Yaw of the current view; drives the viewer-facing wedge rotation.
pub fn camera_yaw(state: &CameraState) -> f32 {
    match &state.mode {
        CameraMode::Orbit(orbit) => orbit.yaw,
        CameraMode::FirstPerson(fp) => match &fp.aircraft {
            Some(air) => air.yaw + air.look_yaw,
            None => fp.yaw,
        },
    }
}

/// Ray through a screen point for the current view, for click picking.
pub fn pick_ray(state: &CameraState, screen: (f32, f32), viewport: (f32, f32)) -> Ray {
    let (eye, _) = eye_and_target(state);
    let (yaw, pitch) = view_angles(state);
    screen_ray(
        screen,
        viewport,
        eye,
        yaw,
        pitch,
        state.fov_radians,
        state.aspect_ratio,
    )
}

/// Ray through the view center, for crosshair aiming and the grapple.
pub fn center_ray(state: &CameraState, viewport: (f32, f32)) -> Ray {
    pick_ray(state, (viewport.0 * 0.5, viewport.1 * 0.5), viewport)
}

fn view_angles(state: &CameraState) -> (f32, f32) {
    match &state.mode {
        CameraMode::Orbit(orbit) => (orbit.yaw, ORBIT_PITCH),
        CameraMode::FirstPerson(fp) => match &fp.aircraft {
            Some(air) => (
                air.yaw + air.look_yaw,
                (air.pitch * 0.3 + air.look_pitch).clamp(-1.2, 1.2),
            ),
            None => (fp.yaw, fp.pitch),
        },
    }
}

// ============================================================================
// ORBIT INPUT
// ============================================================================

/// Pan the orbit target along the camera-relative horizontal axes. Pan
/// distance scales with zoom so screen-space speed stays constant.
pub fn orbit_pan(orbit: &mut OrbitData, dx: f32, dy: f32) {
    let right = right_vector(orbit.yaw);
    let forward_flat = Vector3::new(orbit.yaw.cos(), 0.0, orbit.yaw.sin());
    let scale = PAN_SPEED * orbit.distance.max(MIN_ORBIT_DISTANCE) * 0.1;
    orbit.target += right * (dx * scale) + forward_flat * (-dy * scale);
}

/// Zoom toward the target, clamped to the minimum distance.
pub fn orbit_zoom(orbit: &mut OrbitData, scroll: f32) {
    orbit.distance = (orbit.distance - scroll * ZOOM_SPEED).max(MIN_ORBIT_DISTANCE);
}

pub fn orbit_rotate(orbit: &mut OrbitData, dx: f32) {
    orbit.yaw += dx * MOUSE_SENSITIVITY;
}

// ============================================================================
// FIRST-PERSON INPUT
// ============================================================================

/// Apply captured mouse motion to the first-person view. While piloting,
/// motion goes to the free-look offset instead of the aircraft.
pub fn apply_look(fp: &mut FirstPersonData, dx: f32, dy: f32) {
    match fp.aircraft.as_mut() {
        Some(air) => {
            air.look_yaw += dx * MOUSE_SENSITIVITY;
            air.look_pitch = (air.look_pitch - dy * MOUSE_SENSITIVITY).clamp(-1.2, 1.2);
        }
        None => {
            fp.yaw += dx * MOUSE_SENSITIVITY;
            fp.pitch = (fp.pitch - dy * MOUSE_SENSITIVITY).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        }
    }
}

// ============================================================================
// MODE TRANSITIONS
// ============================================================================

/// Toggle between orbiting and first-person.
///
/// Entering first person converts the orbit eye into a standing position;
/// leaving re-targets the orbit on the point the player was looking at.
pub fn toggle_mode(state: &mut CameraState) {
    let new_mode = match &state.mode {
        CameraMode::Orbit(orbit) => {
            let (eye, _) = eye_and_target(state);
            let feet = Point3::new(eye.x, (eye.y - EYE_HEIGHT).max(GROUND_Y), eye.z);
            log::info!(
                "[Camera] entering first person at ({:.1}, {:.1}, {:.1})",
                feet.x,
                feet.y,
                feet.z
            );
            CameraMode::FirstPerson(FirstPersonData::standing_at(
                feet,
                orbit.yaw,
                ORBIT_PITCH.max(-PITCH_LIMIT),
            ))
        }
        CameraMode::FirstPerson(fp) => {
            let position = match &fp.aircraft {
                Some(air) => air.position,
                None => fp.position,
            };
            let look = forward_vector(fp.yaw, fp.pitch);
            let target = position + look * (DEFAULT_ORBIT_DISTANCE * 0.5);
            log::info!("[Camera] returning to orbit view");
            CameraMode::Orbit(OrbitData {
                target: Point3::new(target.x, 0.0, target.z),
                yaw: fp.yaw,
                distance: DEFAULT_ORBIT_DISTANCE,
            })
        }
    };
    state.mode = new_mode;
}

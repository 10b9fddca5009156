//! Camera data structures. Plain data; every transformation lives in
//! `camera_operations` and the physics modules.

use bytemuck::{Pod, Zeroable};
use cgmath::{Matrix4, Point3, SquareMatrix, Vector3};
use static_assertions::const_assert_eq;

use crate::constants::camera::{
    DEFAULT_FOV_DEGREES, DEFAULT_ORBIT_DISTANCE, FAR_PLANE, NEAR_PLANE,
};

/// Orbiting ("isometric") view state. Pitch is fixed by
/// `constants::camera::ORBIT_PITCH`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitData {
    pub target: Point3<f32>,
    pub yaw: f32,
    pub distance: f32,
}

impl Default for OrbitData {
    fn default() -> Self {
        Self {
            target: Point3::new(0.0, 0.0, 0.0),
            yaw: std::f32::consts::FRAC_PI_4,
            distance: DEFAULT_ORBIT_DISTANCE,
        }
    }
}

/// Grapple sub-state of the first-person camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttachState {
    /// Free movement.
    None,
    /// Reeling toward a grapple point; `target` is set when the point is a
    /// moving object rather than building geometry.
    Traveling {
        to: Point3<f32>,
        target: Option<usize>,
    },
    /// Riding a moving object by index into the host's target list.
    Attached { target: usize },
}

/// Aircraft state while piloting. The camera follows in third person;
/// position and velocity integrate in `physics::flight`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AircraftData {
    pub position: Point3<f32>,
    pub velocity: Vector3<f32>,
    pub yaw: f32,
    pub pitch: f32,
    pub roll: f32,
    pub boost: bool,
    /// Free-look offset independent of the aircraft's own orientation;
    /// decays back to zero each tick.
    pub look_yaw: f32,
    pub look_pitch: f32,
}

impl AircraftData {
    pub fn spawn(position: Point3<f32>, velocity: Vector3<f32>, yaw: f32) -> Self {
        Self {
            position,
            velocity,
            yaw,
            pitch: 0.0,
            roll: 0.0,
            boost: false,
            look_yaw: 0.0,
            look_pitch: 0.0,
        }
    }
}

/// First-person state. `position` is the feet; the eye sits
/// `constants::movement::EYE_HEIGHT` above it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FirstPersonData {
    pub position: Point3<f32>,
    pub yaw: f32,
    pub pitch: f32,
    pub vertical_velocity: f32,
    pub flying: bool,
    pub attach: AttachState,
    /// Set while piloting; walking physics is suspended.
    pub aircraft: Option<AircraftData>,
}

impl FirstPersonData {
    pub fn standing_at(position: Point3<f32>, yaw: f32, pitch: f32) -> Self {
        Self {
            position,
            yaw,
            pitch,
            vertical_velocity: 0.0,
            flying: false,
            attach: AttachState::None,
            aircraft: None,
        }
    }

    pub fn is_piloting(&self) -> bool {
        self.aircraft.is_some()
    }
}

/// The two mutually exclusive camera modes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraMode {
    Orbit(OrbitData),
    FirstPerson(FirstPersonData),
}

/// Full camera state, advanced once per simulation tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub mode: CameraMode,
    pub fov_radians: f32,
    pub aspect_ratio: f32,
    pub near_plane: f32,
    pub far_plane: f32,
}

impl CameraState {
    pub fn new(aspect_ratio: f32) -> Self {
        Self {
            mode: CameraMode::Orbit(OrbitData::default()),
            fov_radians: DEFAULT_FOV_DEGREES.to_radians(),
            aspect_ratio,
            near_plane: NEAR_PLANE,
            far_plane: FAR_PLANE,
        }
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self::new(16.0 / 9.0)
    }
}

/// Matrices handed to the host renderer, laid out for direct upload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_matrix: [[f32; 4]; 4],
    pub projection_matrix: [[f32; 4]; 4],
    pub view_projection_matrix: [[f32; 4]; 4],
    /// Eye position, w = 1.
    pub eye_position: [f32; 4],
}

const_assert_eq!(std::mem::size_of::<CameraUniform>(), 208);
const_assert_eq!(std::mem::align_of::<CameraUniform>(), 4);

impl Default for CameraUniform {
    fn default() -> Self {
        Self {
            view_matrix: Matrix4::identity().into(),
            projection_matrix: Matrix4::identity().into(),
            view_projection_matrix: Matrix4::identity().into(),
            eye_position: [0.0, 0.0, 0.0, 1.0],
        }
    }
}

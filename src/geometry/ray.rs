//! Rays and the camera basis they are built from.
//!
//! The basis functions here are the single source for "which way is
//! forward": the camera, the screen-ray builder and the flight model all
//! share them, so a picked point and a drawn point can never disagree about
//! orientation.

use cgmath::{InnerSpace, Point3, Vector3};

/// A ray in world space. The constructor normalizes the direction; a
/// zero-length input produces a degenerate ray that every intersection
/// routine rejects instead of propagating NaN.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Point3<f32>,
    pub direction: Vector3<f32>,
}

impl Ray {
    pub fn new(origin: Point3<f32>, direction: Vector3<f32>) -> Self {
        let len2 = direction.magnitude2();
        let direction = if len2 > 1e-12 {
            direction / len2.sqrt()
        } else {
            Vector3::new(0.0, 0.0, 0.0)
        };
        Self { origin, direction }
    }

    pub fn is_degenerate(&self) -> bool {
        self.direction.magnitude2() < 1e-12
    }

    pub fn point_at(&self, t: f32) -> Point3<f32> {
        self.origin + self.direction * t
    }
}

/// Forward unit vector for a yaw/pitch pair. Yaw 0 looks down +X, yaw
/// increases toward +Z, pitch raises toward +Y.
pub fn forward_vector(yaw: f32, pitch: f32) -> Vector3<f32> {
    Vector3::new(
        yaw.cos() * pitch.cos(),
        pitch.sin(),
        yaw.sin() * pitch.cos(),
    )
    .normalize()
}

/// Horizontal right unit vector for a yaw, `forward x up` for a level view.
pub fn right_vector(yaw: f32) -> Vector3<f32> {
    Vector3::new(
        (yaw + std::f32::consts::FRAC_PI_2).cos(),
        0.0,
        (yaw + std::f32::consts::FRAC_PI_2).sin(),
    )
    .normalize()
}

/// Up unit vector completing the basis.
pub fn up_vector(yaw: f32, pitch: f32) -> Vector3<f32> {
    right_vector(yaw).cross(forward_vector(yaw, pitch)).normalize()
}

/// Build a world-space ray through a screen point.
///
/// `screen` is in pixels with the origin at the top-left; `viewport` is the
/// surface size in pixels. `fov_y` is the vertical field of view in radians.
/// A point at the exact viewport center yields the camera forward vector.
pub fn screen_ray(
    screen: (f32, f32),
    viewport: (f32, f32),
    eye: Point3<f32>,
    yaw: f32,
    pitch: f32,
    fov_y: f32,
    aspect: f32,
) -> Ray {
    if viewport.0 <= 0.0 || viewport.1 <= 0.0 {
        return Ray::new(eye, Vector3::new(0.0, 0.0, 0.0));
    }

    let ndc_x = 2.0 * screen.0 / viewport.0 - 1.0;
    let ndc_y = 1.0 - 2.0 * screen.1 / viewport.1;
    let half_tan = (fov_y * 0.5).tan();

    let forward = forward_vector(yaw, pitch);
    let right = right_vector(yaw);
    let up = up_vector(yaw, pitch);

    let direction = forward + right * (ndc_x * half_tan * aspect) + up * (ndc_y * half_tan);
    Ray::new(eye, direction)
}

//! Powered-flight physics for a piloted aircraft.
//!
//! Controls integrate pitch and roll; yaw follows bank angle, so the
//! aircraft turns by rolling. Forces: thrust along the nose, lift scaled by
//! speed and the cosine of roll, quadratic drag, constant gravity. Airborne
//! speed is clamped into a stall floor and a boost-dependent ceiling, and a
//! minimum-altitude floor forces the nose back up.

use cgmath::{InnerSpace, Vector3};

use crate::camera::camera_data::AircraftData;
use crate::constants::flight::{
    BANK_TURN_GAIN, BOOST_MAX_SPEED, BOOST_THRUST, DRAG_COEFF, LIFT_COEFF, LOOK_RETURN_RATE,
    MAX_PITCH, MAX_ROLL, MAX_SPEED, MIN_ALTITUDE, PITCH_RATE, PITCH_RECOVERY_RATE,
    RECOVERY_PITCH, ROLL_RATE, STALL_SPEED, THRUST,
};
use crate::constants::movement::GRAVITY;
use crate::geometry::ray::{forward_vector, up_vector};

/// Advance the aircraft one tick. `pitch_input` pushes the nose down when
/// positive (stick forward); `roll_input` rolls right when positive.
pub fn flight_tick(
    air: &mut AircraftData,
    pitch_input: f32,
    roll_input: f32,
    boost: bool,
    dt: f32,
) {
    if !(dt > 0.0) || !dt.is_finite() {
        return;
    }

    air.boost = boost;
    air.pitch = (air.pitch - pitch_input * PITCH_RATE * dt).clamp(-MAX_PITCH, MAX_PITCH);
    air.roll = (air.roll + roll_input * ROLL_RATE * dt).clamp(-MAX_ROLL, MAX_ROLL);
    air.yaw -= air.roll.sin() * BANK_TURN_GAIN * dt;

    let nose = forward_vector(air.yaw, air.pitch);
    let body_up = up_vector(air.yaw, air.pitch);
    let speed = air.velocity.magnitude();

    let thrust = nose * if boost { BOOST_THRUST } else { THRUST };
    let lift = body_up * (LIFT_COEFF * speed * air.roll.cos());
    let drag = -air.velocity * (DRAG_COEFF * speed);
    let weight = Vector3::new(0.0, -GRAVITY, 0.0);

    air.velocity += (thrust + lift + drag + weight) * dt;
    clamp_speed(air, nose, boost);

    air.position += air.velocity * dt;

    if air.position.y < MIN_ALTITUDE {
        air.position.y = MIN_ALTITUDE;
        air.velocity.y = air.velocity.y.max(0.0);
        // Force a recovery attitude rather than mowing the streets.
        let correction = (RECOVERY_PITCH - air.pitch).clamp(
            -PITCH_RECOVERY_RATE * dt,
            PITCH_RECOVERY_RATE * dt,
        );
        air.pitch += correction;
    }

    let decay = (1.0 - LOOK_RETURN_RATE * dt).max(0.0);
    air.look_yaw *= decay;
    air.look_pitch *= decay;
}

/// Stall floor while airborne, hard ceiling always.
fn clamp_speed(air: &mut AircraftData, nose: Vector3<f32>, boost: bool) {
    let speed = air.velocity.magnitude();
    let airborne = air.position.y > MIN_ALTITUDE + 0.1;
    let ceiling = if boost { BOOST_MAX_SPEED } else { MAX_SPEED };

    if airborne && speed < STALL_SPEED {
        air.velocity = if speed > 1e-4 {
            air.velocity / speed * STALL_SPEED
        } else {
            nose * STALL_SPEED
        };
    } else if speed > ceiling {
        air.velocity = air.velocity / speed * ceiling;
    }
}

//! Movement physics: the per-tick simulation behind the first-person
//! camera, plus the moving-target list attachments ride on.
//!
//! Everything here runs on the simulation thread once per tick. The block
//! and target lists are host-owned snapshots that may be swapped wholesale
//! between ticks; no sub-state survives a tick without re-validation.

pub mod flight;
pub mod grapple;
pub mod walk;

use cgmath::{InnerSpace, Point3, Vector3};

use crate::camera::camera_data::{AttachState, CameraMode, CameraState, FirstPersonData};
use crate::camera::camera_operations::{apply_look, camera_yaw, center_ray, orbit_pan, orbit_zoom};
use crate::city::block::Block;
use crate::input::InputState;

pub use flight::flight_tick;
pub use grapple::{fire_grapple, grapple_tick};
pub use walk::walk_tick;

/// What kind of thing a moving target is; decides attachment offsets and
/// whether it can be piloted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovingTargetKind {
    Aircraft,
    GroundVehicle,
    Satellite,
}

impl MovingTargetKind {
    pub fn flyable(&self) -> bool {
        matches!(self, MovingTargetKind::Aircraft)
    }
}

/// One entry of the host-animated moving object list. The core only ever
/// reads these; indices are only meaningful within a single tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovingTarget {
    pub position: Point3<f32>,
    pub velocity: Vector3<f32>,
    pub kind: MovingTargetKind,
    pub alive: bool,
}

/// Advance the camera one simulation tick.
///
/// Consumes the tick's accumulated input, then dispatches to whichever
/// physics applies: orbit view adjustments, aircraft flight, grapple
/// movement, or walking.
pub fn camera_tick(
    state: &mut CameraState,
    input: &mut InputState,
    blocks: &[Block],
    targets: &[MovingTarget],
    viewport: (f32, f32),
    dt: f32,
) {
    let (mouse_dx, mouse_dy) = input.take_mouse_delta();
    let scroll = input.take_scroll();

    if let CameraMode::Orbit(orbit) = &mut state.mode {
        orbit_pan(orbit, mouse_dx, mouse_dy);
        if scroll != 0.0 {
            orbit_zoom(orbit, scroll);
        }
        // The orbit view needs no physics; discard edge triggers so they
        // do not fire on a later mode switch.
        input.take_jump();
        input.take_grapple();
        input.take_board();
        input.take_fly_toggle();
        return;
    }

    // Derive the aim ray before taking the mutable borrow below.
    let aim = center_ray(state, viewport);
    let view_yaw = camera_yaw(state);

    let CameraMode::FirstPerson(fp) = &mut state.mode else {
        return;
    };

    apply_look(fp, mouse_dx, mouse_dy);

    if input.take_fly_toggle() && !fp.is_piloting() {
        fp.flying = !fp.flying;
        fp.vertical_velocity = 0.0;
        log::info!("[Physics] flying: {}", fp.flying);
    }

    if input.take_board() {
        toggle_boarding(fp, targets);
    }

    if input.take_grapple() && !fp.is_piloting() {
        fire_grapple(fp, &aim, blocks, targets, view_yaw);
    }

    let (forward_axis, strafe_axis) = input.axes();
    if let Some(air) = fp.aircraft.as_mut() {
        flight_tick(air, forward_axis, strafe_axis, input.sprint_held(), dt);
    } else if fp.attach != AttachState::None {
        grapple_tick(fp, targets, input.modifier_held(), dt);
    } else {
        walk_tick(fp, input, blocks, dt);
    }
}

/// Board the attached aircraft, or climb out of the one being piloted.
fn toggle_boarding(fp: &mut FirstPersonData, targets: &[MovingTarget]) {
    use crate::camera::camera_data::AircraftData;

    if let Some(air) = fp.aircraft.take() {
        // Dismount where the aircraft is; keep falling from its motion.
        fp.position = air.position;
        fp.vertical_velocity = air.velocity.y;
        fp.attach = AttachState::None;
        log::info!("[Physics] dismounted at y {:.1}", fp.position.y);
        return;
    }

    let AttachState::Attached { target } = fp.attach else {
        return;
    };
    let Some(t) = targets.get(target).filter(|t| t.alive) else {
        fp.attach = AttachState::None;
        return;
    };
    if !t.kind.flyable() {
        return;
    }

    let heading = if t.velocity.magnitude2() > 1e-6 {
        t.velocity.z.atan2(t.velocity.x)
    } else {
        fp.yaw
    };
    fp.aircraft = Some(AircraftData::spawn(t.position, t.velocity, heading));
    fp.attach = AttachState::None;
    log::info!("[Physics] boarded aircraft at y {:.1}", t.position.y);
}

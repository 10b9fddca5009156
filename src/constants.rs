//! Centralized constants for the city core.
//!
//! Every numeric tuning value lives here so that the mapper, the picker and
//! any renderer read the same numbers. The deformation constants in
//! [`deform`] in particular must never be re-derived elsewhere.

/// Layout mapper tuning.
pub mod layout {
    /// Number of texture variants a host atlas is expected to provide.
    pub const TEXTURE_COUNT: u32 = 12;

    /// Number of material variants.
    pub const MATERIAL_COUNT: u32 = 6;

    /// Minimum visible building height in grid units, applied even to
    /// zero-byte files.
    pub const MIN_HEIGHT: u32 = 1;

    /// Salt mixed into the path hash before texture bucketing, so texture
    /// and material choices decorrelate from shape choices.
    pub const TEXTURE_SALT: u64 = 0x9e37_79b9_7f4a_7c15;

    /// Side length of the beacon marker box, world units.
    pub const BEACON_SIZE: f32 = 0.6;

    /// Clearance between a building roof and its beacon.
    pub const BEACON_HOVER: f32 = 1.25;
}

/// Shape deformation constants, shared verbatim by the exact-mesh picker and
/// any renderer that draws the deformed buildings.
pub mod deform {
    /// Scale applied to the top face of a tapered building, toward the
    /// footprint center.
    pub const TAPER_TOP_SCALE: f32 = 0.4;

    /// The tapered top face is raised by this fraction of the height, so the
    /// spire tip sits at `height * (1 + TAPER_TOP_RAISE)`.
    pub const TAPER_TOP_RAISE: f32 = 0.5;

    /// A pyramid apex sits at `height * PYRAMID_APEX_FACTOR`.
    pub const PYRAMID_APEX_FACTOR: f32 = 1.5;

    /// Wedge shear is `WEDGE_SHEAR_FACTOR * half_extent` along the wedge
    /// axis...
    pub const WEDGE_SHEAR_FACTOR: f32 = 1.5;

    /// ...clamped to this fraction of the height, which keeps the sheared
    /// silhouette inside the wedge pick bound for squat footprints.
    pub const WEDGE_SHEAR_HEIGHT_CLAMP: f32 = 0.75;

    /// Ring resolution of the cylinder template mesh.
    pub const CYLINDER_SEGMENTS: usize = 16;
}

/// Picking tuning.
pub mod picking {
    /// Conservative bounding-box height multiplier for plain cuboids and
    /// cylinders (their mesh never exceeds the nominal height).
    pub const BOUND_MULT_STANDARD: f32 = 1.0;

    /// Taper and pyramid tops reach 1.5x height; 2.0 keeps the reject phase
    /// strictly conservative.
    pub const BOUND_MULT_RAISED: f32 = 2.0;

    /// Wedge tops reach at most `height + 0.75 * height`.
    pub const BOUND_MULT_WEDGE: f32 = 1.75;

    /// Triangle intersection tolerance.
    pub const EPSILON: f32 = 1e-6;

    /// Radius of the pick sphere wrapped around a moving grapple target.
    pub const TARGET_PICK_RADIUS: f32 = 2.0;
}

/// First-person movement tuning. Units are grid units and seconds.
pub mod movement {
    pub const WALK_SPEED: f32 = 6.0;
    pub const SPRINT_SPEED: f32 = 12.0;
    pub const FLY_SPEED: f32 = 14.0;
    pub const GRAVITY: f32 = 24.0;
    pub const JUMP_IMPULSE: f32 = 9.0;
    pub const PLAYER_RADIUS: f32 = 0.35;
    pub const BODY_HEIGHT: f32 = 1.7;
    pub const EYE_HEIGHT: f32 = 1.6;
    pub const GROUND_Y: f32 = 0.0;

    /// Vertical velocity magnitude below which the player counts as
    /// grounded for the jump gate.
    pub const GROUNDED_EPSILON: f32 = 0.05;

    pub const GRAPPLE_SPEED: f32 = 40.0;
    pub const GRAPPLE_ARRIVE: f32 = 1.5;

    /// Attachment rides below aerial targets and above ground vehicles.
    pub const ATTACH_OFFSET_AERIAL: f32 = 3.0;
    pub const ATTACH_OFFSET_GROUND: f32 = 2.0;
}

/// Aircraft flight model tuning. Angles in radians, rates per second.
pub mod flight {
    pub const PITCH_RATE: f32 = 1.2;
    pub const ROLL_RATE: f32 = 1.8;
    pub const MAX_PITCH: f32 = 1.0471976; // 60 degrees
    pub const MAX_ROLL: f32 = 1.2217305; // 70 degrees

    /// Yaw rate contributed per unit of `sin(roll)`; banking turns.
    pub const BANK_TURN_GAIN: f32 = 1.1;

    pub const THRUST: f32 = 30.0;
    pub const BOOST_THRUST: f32 = 70.0;
    pub const LIFT_COEFF: f32 = 0.55;
    pub const DRAG_COEFF: f32 = 0.012;

    /// Airborne speed is clamped to this floor to prevent stalls.
    pub const STALL_SPEED: f32 = 12.0;
    pub const MAX_SPEED: f32 = 45.0;
    pub const BOOST_MAX_SPEED: f32 = 80.0;

    pub const MIN_ALTITUDE: f32 = 2.0;
    pub const RECOVERY_PITCH: f32 = 0.35;
    pub const PITCH_RECOVERY_RATE: f32 = 2.0;

    /// Fraction of the free-look offset removed per second.
    pub const LOOK_RETURN_RATE: f32 = 4.0;

    /// Chase camera offset behind and above the aircraft.
    pub const CHASE_BACK: f32 = 10.0;
    pub const CHASE_UP: f32 = 3.5;
}

/// Camera tuning.
pub mod camera {
    /// Fixed downward pitch of the orbiting view, radians.
    pub const ORBIT_PITCH: f32 = -0.6154797; // about -35.26 degrees, classic isometric
    pub const MIN_ORBIT_DISTANCE: f32 = 4.0;
    pub const DEFAULT_ORBIT_DISTANCE: f32 = 60.0;
    pub const DEFAULT_FOV_DEGREES: f32 = 60.0;
    pub const NEAR_PLANE: f32 = 0.1;
    pub const FAR_PLANE: f32 = 2000.0;
    pub const MOUSE_SENSITIVITY: f32 = 0.002;
    pub const PAN_SPEED: f32 = 0.05;
    pub const ZOOM_SPEED: f32 = 2.5;
}

//! Ray picking: nearest block or beacon under a world-space ray.

pub mod picker_data;
pub mod picker_operations;

pub use picker_data::{Beacon, BeaconHit, Hit};
pub use picker_operations::{
    beacons_for_blocks, pick_aabb, pick_beacon, pick_block, pick_bound_multiplier,
};

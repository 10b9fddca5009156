//! dircity - the geometry core of a file-system city viewer.
//!
//! A scanned directory tree becomes a city: every file and folder is a
//! building whose footprint, height, shape and texture encode its metadata.
//! This crate owns the three parts that must agree with each other to the
//! last float: the deterministic layout mapper, the exact-mesh ray picker,
//! and the first-person movement physics. Scanning, windowing and rendering
//! live in the host application; this crate performs no I/O.
//!
//! The pieces compose in one direction: a [`tree::FileTreeNode`] snapshot
//! plus [`city::LayoutRules`] map to a [`city::Block`] list, which then
//! feeds both [`picking`] and [`physics`] every frame. All three are pure,
//! synchronous and single-threaded; a host that scans in the background
//! must hand over each new snapshot as one atomic swap.

// Constants module
pub mod constants;

// Core modules
pub mod error;
pub mod tree;

// Geometry, layout, picking
pub mod city;
pub mod geometry;
pub mod picking;

// Camera, input and movement
pub mod camera;
pub mod input;
pub mod physics;

use anyhow::Result;

pub use camera::{
    build_camera_uniform, build_projection_matrix, build_view_matrix, camera_yaw, center_ray,
    pick_ray, toggle_mode, AircraftData, AttachState, CameraMode, CameraState, CameraUniform,
    FirstPersonData, OrbitData,
};
pub use city::{map_city, map_city_with_stats, Block, BlockId, BlockShape, LayoutRules};
pub use error::{CoreError, CoreResult};
pub use geometry::{Aabb, Ray};
pub use input::{ClickKind, InputEvent, InputState, Key};
pub use physics::{camera_tick, MovingTarget, MovingTargetKind};
pub use picking::{beacons_for_blocks, pick_beacon, pick_block, Beacon, BeaconHit, Hit};
pub use tree::{FileTreeNode, NodeId, NodeKind};

/// Host-facing configuration: layout rules plus the view surface.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CityConfig {
    pub rules: LayoutRules,
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub fov_degrees: f32,
}

impl Default for CityConfig {
    fn default() -> Self {
        Self {
            rules: LayoutRules::default(),
            viewport_width: 1280,
            viewport_height: 720,
            fov_degrees: constants::camera::DEFAULT_FOV_DEGREES,
        }
    }
}

impl CityConfig {
    /// Validate configuration before the first mapping call.
    pub fn validate(&self) -> Result<()> {
        self.rules.validate()?;

        if self.viewport_width == 0 || self.viewport_height == 0 {
            return Err(anyhow::anyhow!(
                "CityConfig: viewport {}x{} has a zero dimension",
                self.viewport_width,
                self.viewport_height
            ));
        }
        if !(10.0..=170.0).contains(&self.fov_degrees) {
            return Err(anyhow::anyhow!(
                "CityConfig: fov {} degrees outside the 10..=170 range",
                self.fov_degrees
            ));
        }

        log::info!(
            "[Config] validated: viewport {}x{}, fov {}, max {} nodes",
            self.viewport_width,
            self.viewport_height,
            self.fov_degrees,
            self.rules.max_nodes
        );
        Ok(())
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.viewport_width as f32 / self.viewport_height as f32
    }

    pub fn viewport(&self) -> (f32, f32) {
        (self.viewport_width as f32, self.viewport_height as f32)
    }
}

/// Resolve a picked block back to its file-system path within the scan
/// snapshot the block list was mapped from. This is the only channel
/// through which block identities become meaningful to the host.
pub fn resolve_block_path(root: &FileTreeNode, block: BlockId) -> Option<&str> {
    root.find(NodeId(block.0)).map(|node| node.path.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{InnerSpace, Point3};
    use rustc_hash::FxHashSet;

    #[test]
    fn test_config_validation() {
        assert!(CityConfig::default().validate().is_ok());

        let mut bad = CityConfig::default();
        bad.fov_degrees = 200.0;
        assert!(bad.validate().is_err());

        let mut bad = CityConfig::default();
        bad.rules.max_footprint = 0;
        assert!(bad.validate().is_err());
    }

    /// End-to-end: scan snapshot in, block list out, crosshair ray back to
    /// the building it points at.
    #[test]
    fn test_scan_to_pick_round_trip() {
        let root = FileTreeNode::folder(
            "/scan",
            vec![
                FileTreeNode::file("/scan/a", 10),
                FileTreeNode::file("/scan/b", 10_000),
                FileTreeNode::file("/scan/c", 1_000_000),
            ],
        );
        let config = CityConfig::default();
        let blocks = map_city(&root, &config.rules, &FxHashSet::default());
        assert_eq!(blocks.len(), 3);

        let tallest = blocks
            .iter()
            .max_by_key(|b| b.height)
            .expect("blocks exist");
        assert_eq!(tallest.name, "c");

        // Stand a first-person camera off to the side, aim the crosshair
        // at the middle of the tallest wall, and ask the picker.
        let center = tallest.center_base();
        let aim_point = Point3::new(center.x, tallest.height as f32 * 0.5, center.z);
        let eye = Point3::new(center.x - 30.0, 6.0, center.z - 25.0);
        let dir = aim_point - eye;
        let yaw = dir.z.atan2(dir.x);
        let pitch = (dir.y / dir.magnitude()).asin();

        let mut state = CameraState::new(config.aspect_ratio());
        toggle_mode(&mut state);
        let CameraMode::FirstPerson(fp) = &mut state.mode else {
            panic!("expected first person");
        };
        fp.position = Point3::new(eye.x, eye.y - constants::movement::EYE_HEIGHT, eye.z);
        fp.yaw = yaw;
        fp.pitch = pitch;

        let ray = center_ray(&state, config.viewport());
        let hit = pick_block(&ray, &blocks, camera_yaw(&state)).expect("crosshair hit");
        assert_eq!(hit.block, tallest.id);
        assert_eq!(resolve_block_path(&root, hit.block), Some("/scan/c"));
    }

    #[test]
    fn test_uniform_is_upload_ready() {
        let state = CameraState::default();
        let uniform = build_camera_uniform(&state);
        let bytes: &[u8] = bytemuck::bytes_of(&uniform);
        assert_eq!(bytes.len(), 208);
    }
}

//! Block data structures.
//!
//! A [`Block`] is one placed building. The convention used everywhere in
//! this crate: `position` is the block's minimum corner at its base, so the
//! block spans `[position.x, position.x + width]` by
//! `[position.z, position.z + depth]` starting at `position.y`.

use cgmath::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::geometry::aabb::{create_aabb, Aabb};
use crate::tree::NodeId;

/// Stable identity of a placed block.
///
/// Equal to the path hash of the originating tree node, so identities
/// survive rescans of an unchanged tree and hosts may cache against them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct BlockId(pub u64);

impl From<NodeId> for BlockId {
    fn from(node: NodeId) -> Self {
        BlockId(node.0)
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Block({:016x})", self.0)
    }
}

/// Silhouette of a block.
///
/// The first six are building shapes produced by the mapper. `Marker` and
/// `Platform` are non-building volumes other parts of the host use; the
/// core carries them as plain boxes and never deforms them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockShape {
    Standard,
    Taper,
    Pyramid,
    WedgeX,
    WedgeZ,
    Cylinder,
    Marker,
    Platform,
}

impl BlockShape {
    pub fn is_building(&self) -> bool {
        !matches!(self, BlockShape::Marker | BlockShape::Platform)
    }
}

/// One placed building.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub id: BlockId,
    /// Originating tree node; the only link back to a file-system path.
    pub node: NodeId,
    pub name: String,
    /// Minimum corner at base height. See module docs.
    pub position: Point3<f32>,
    /// Footprint in integer grid units.
    pub width: u32,
    pub depth: u32,
    pub height: u32,
    pub material: u32,
    pub texture: u32,
    pub shape: BlockShape,
    pub pinned: bool,
    pub is_git_repo: bool,
    pub git_clean: bool,
}

impl Block {
    /// Footprint center at base height.
    pub fn center_base(&self) -> Point3<f32> {
        Point3::new(
            self.position.x + self.width as f32 * 0.5,
            self.position.y,
            self.position.z + self.depth as f32 * 0.5,
        )
    }

    pub fn half_extents_xz(&self) -> (f32, f32) {
        (self.width as f32 * 0.5, self.depth as f32 * 0.5)
    }

    /// Top of the undeformed box; what a player stands on.
    pub fn top_y(&self) -> f32 {
        self.position.y + self.height as f32
    }

    /// Exact bounds of the undeformed box.
    pub fn aabb(&self) -> Aabb {
        create_aabb(
            self.position,
            Point3::new(
                self.position.x + self.width as f32,
                self.top_y(),
                self.position.z + self.depth as f32,
            ),
        )
    }

    /// Footprint bounds inflated on each side, used for the road-grid
    /// overlap invariant.
    pub fn padded_aabb(&self, inflate: f32) -> Aabb {
        let pad = Vector3::new(inflate, 0.0, inflate);
        create_aabb(self.position + pad * -1.0, self.aabb().max + pad)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block_at(x: f32, z: f32) -> Block {
        Block {
            id: BlockId(1),
            node: NodeId(1),
            name: "a".to_string(),
            position: Point3::new(x, 0.0, z),
            width: 4,
            depth: 2,
            height: 10,
            material: 0,
            texture: 0,
            shape: BlockShape::Standard,
            pinned: false,
            is_git_repo: false,
            git_clean: true,
        }
    }

    #[test]
    fn test_block_bounds_convention() {
        let b = block_at(10.0, -4.0);
        assert_eq!(b.center_base(), Point3::new(12.0, 0.0, -3.0));
        assert_eq!(b.top_y(), 10.0);
        let aabb = b.aabb();
        assert_eq!(aabb.min, Point3::new(10.0, 0.0, -4.0));
        assert_eq!(aabb.max, Point3::new(14.0, 10.0, -2.0));
    }

    #[test]
    fn test_padded_aabb_inflates_footprint_only() {
        let b = block_at(0.0, 0.0);
        let padded = b.padded_aabb(1.5);
        assert_eq!(padded.min.x, -1.5);
        assert_eq!(padded.max.z, 3.5);
        assert_eq!(padded.min.y, 0.0);
    }

    #[test]
    fn test_non_building_shapes() {
        assert!(BlockShape::Cylinder.is_building());
        assert!(!BlockShape::Marker.is_building());
        assert!(!BlockShape::Platform.is_building());
    }
}

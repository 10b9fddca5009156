//! Layout mapper data structures. No methods beyond constructors and
//! validation; the mapping itself lives in `layout_operations`.

use serde::{Deserialize, Serialize};

use crate::city::block::BlockShape;
use crate::error::{CoreError, CoreResult};
use crate::tree::{NodeId, NodeKind};

/// Configuration bundle for one mapping call. Immutable while mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutRules {
    /// Clear road lanes between padded footprints, grid units.
    pub road_width: u32,
    /// Extra clearance added around every footprint.
    pub padding: u32,
    pub min_footprint: u32,
    pub max_footprint: u32,
    /// Footprint used for folders, which read as city districts.
    pub folder_footprint: u32,
    pub max_height: u32,
    /// Hard cap on placed blocks; candidates beyond it are dropped.
    pub max_nodes: usize,
    /// All placement coordinates snap to multiples of this.
    pub grid_spacing: u32,
}

impl Default for LayoutRules {
    fn default() -> Self {
        Self {
            road_width: 2,
            padding: 1,
            min_footprint: 2,
            max_footprint: 10,
            folder_footprint: 6,
            max_height: 24,
            max_nodes: 256,
            grid_spacing: 1,
        }
    }
}

impl LayoutRules {
    pub fn validate(&self) -> CoreResult<()> {
        if self.min_footprint == 0 {
            return Err(CoreError::InvalidRules {
                field: "min_footprint",
                value: self.min_footprint.to_string(),
                reason: "must be at least 1",
            });
        }
        if self.max_footprint < self.min_footprint {
            return Err(CoreError::InvalidRules {
                field: "max_footprint",
                value: self.max_footprint.to_string(),
                reason: "must be >= min_footprint",
            });
        }
        if self.max_height == 0 {
            return Err(CoreError::InvalidRules {
                field: "max_height",
                value: self.max_height.to_string(),
                reason: "must be at least 1",
            });
        }
        if self.grid_spacing == 0 {
            return Err(CoreError::InvalidRules {
                field: "grid_spacing",
                value: self.grid_spacing.to_string(),
                reason: "must be at least 1",
            });
        }
        Ok(())
    }

    /// Defense against malformed rules from an upstream contract violation:
    /// clamp and warn instead of corrupting the layout.
    pub fn clamped(&self) -> LayoutRules {
        let mut rules = *self;
        if rules.min_footprint == 0 {
            log::warn!("[Layout] clamping min_footprint 0 -> 1");
            rules.min_footprint = 1;
        }
        if rules.max_footprint < rules.min_footprint {
            log::warn!(
                "[Layout] clamping max_footprint {} -> {}",
                rules.max_footprint,
                rules.min_footprint
            );
            rules.max_footprint = rules.min_footprint;
        }
        if rules.max_height == 0 {
            log::warn!("[Layout] clamping max_height 0 -> 1");
            rules.max_height = 1;
        }
        if rules.grid_spacing == 0 {
            log::warn!("[Layout] clamping grid_spacing 0 -> 1");
            rules.grid_spacing = 1;
        }
        if rules.folder_footprint < rules.min_footprint {
            rules.folder_footprint = rules.min_footprint;
        }
        rules
    }

    /// Total clearance added around a footprint on each side.
    pub fn inflation(&self) -> u32 {
        self.road_width + self.padding
    }
}

/// One child of the mapped root, annotated with everything placement needs.
#[derive(Debug, Clone)]
pub struct PlacementCandidate {
    pub node: NodeId,
    pub name: String,
    pub path_hash: u64,
    pub kind: NodeKind,
    pub size_bytes: u64,
    pub width: u32,
    pub depth: u32,
    pub height: u32,
    pub shape: BlockShape,
    pub material: u32,
    pub texture: u32,
    pub pinned: bool,
    pub is_git_repo: bool,
    pub git_clean: bool,
    /// Position in the scanner's child order; the deterministic tie-break.
    pub tree_order: usize,
}

/// Mapping summary, logged once per call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutStats {
    pub candidates: usize,
    pub placed: usize,
    pub stacked_pins: usize,
    pub dropped: usize,
}

//! City model: blocks and the layout mapper that produces them.

pub mod block;
pub mod layout_data;
pub mod layout_operations;

pub use block::{Block, BlockId, BlockShape};
pub use layout_data::{LayoutRules, LayoutStats, PlacementCandidate};
pub use layout_operations::{map_city, map_city_with_stats};

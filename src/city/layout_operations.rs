//! City layout mapping. Pure functions: a scanned tree plus rules in, an
//! ordered block list out. Identical inputs always produce identical
//! output; the picker and the physics rely on that staying true between
//! frames.

use cgmath::Point3;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::city::block::{Block, BlockId, BlockShape};
use crate::city::layout_data::{LayoutRules, LayoutStats, PlacementCandidate};
use crate::constants::layout::{MATERIAL_COUNT, MIN_HEIGHT, TEXTURE_COUNT, TEXTURE_SALT};
use crate::geometry::seeded::{fnv1a64, hash_to_bucket, SeededRng};
use crate::tree::{FileTreeNode, NodeKind};

/// Shape bucket table for file extensions. Plain towers dominate; the rest
/// salt the skyline. Index by `hash_to_bucket(fnv(ext), len)`.
const SHAPE_TABLE: [BlockShape; 10] = [
    BlockShape::Standard,
    BlockShape::Taper,
    BlockShape::Standard,
    BlockShape::Pyramid,
    BlockShape::Standard,
    BlockShape::WedgeX,
    BlockShape::Cylinder,
    BlockShape::Standard,
    BlockShape::WedgeZ,
    BlockShape::Taper,
];

/// Map a scanned tree's direct children onto the city grid.
///
/// `pinned` holds path hashes ([`fnv1a64`] of the absolute path) of nodes
/// the user pinned; those stack vertically instead of consuming ground.
pub fn map_city(
    root: &FileTreeNode,
    rules: &LayoutRules,
    pinned: &FxHashSet<u64>,
) -> Vec<Block> {
    map_city_with_stats(root, rules, pinned).0
}

/// [`map_city`], also returning the placement summary.
pub fn map_city_with_stats(
    root: &FileTreeNode,
    rules: &LayoutRules,
    pinned: &FxHashSet<u64>,
) -> (Vec<Block>, LayoutStats) {
    let rules = rules.clamped();
    let mut stats = LayoutStats::default();

    if root.children.is_empty() {
        log::debug!("[Layout] empty root {}, empty city", root.name);
        return (Vec::new(), stats);
    }

    let candidates = collect_candidates(root, &rules, pinned);
    stats.candidates = candidates.len();

    let selected = select_candidates(candidates, rules.max_nodes);
    stats.dropped = stats.candidates - selected.len();

    let (ground, pins): (Vec<_>, Vec<_>) = selected.into_iter().partition(|c| !c.pinned);

    let mut blocks = pack_ground_blocks(&ground, &rules);
    stats.placed = blocks.len();

    let stacked = stack_pinned_blocks(&pins, &blocks);
    stats.stacked_pins = stacked.len();
    stats.placed += stacked.len();
    blocks.extend(stacked);

    log::info!(
        "[Layout] {} placed ({} stacked pins, {} dropped) from {} candidates under {}",
        stats.placed,
        stats.stacked_pins,
        stats.dropped,
        stats.candidates,
        root.name
    );

    (blocks, stats)
}

/// Derive every placement attribute for the root's direct children, in
/// tree order.
fn collect_candidates(
    root: &FileTreeNode,
    rules: &LayoutRules,
    pinned: &FxHashSet<u64>,
) -> Vec<PlacementCandidate> {
    root.children
        .iter()
        .enumerate()
        .map(|(tree_order, node)| {
            let path_hash = fnv1a64(node.path.as_bytes());
            let (width, depth) = footprint_for(node, rules);
            PlacementCandidate {
                node: node.id,
                name: node.name.clone(),
                path_hash,
                kind: node.kind,
                size_bytes: node.size_bytes,
                width,
                depth,
                height: height_for(node, rules),
                shape: shape_for(node),
                material: SeededRng::new(path_hash).next_bounded(MATERIAL_COUNT),
                texture: hash_to_bucket(path_hash ^ TEXTURE_SALT, TEXTURE_COUNT),
                pinned: pinned.contains(&path_hash),
                is_git_repo: node.is_git_repo,
                git_clean: node.git_clean,
                tree_order,
            }
        })
        .collect()
}

/// Footprint in grid units. Monotonic and saturating in byte size: a larger
/// file never gets a smaller footprint than a smaller one.
fn footprint_for(node: &FileTreeNode, rules: &LayoutRules) -> (u32, u32) {
    match node.kind {
        NodeKind::Folder => (rules.folder_footprint, rules.folder_footprint),
        NodeKind::File | NodeKind::Symlink => {
            let side = (rules.min_footprint + size_bits(node.size_bytes) / 4)
                .clamp(rules.min_footprint, rules.max_footprint);
            (side, side)
        }
    }
}

/// Height in grid units, same monotonic saturating contract. Zero-byte
/// files still get a visible building.
fn height_for(node: &FileTreeNode, rules: &LayoutRules) -> u32 {
    let raw = match node.kind {
        NodeKind::Folder => 2 + 2 * size_bits(node.children.len() as u64),
        NodeKind::File | NodeKind::Symlink => 1 + size_bits(node.size_bytes) / 2,
    };
    raw.clamp(MIN_HEIGHT, rules.max_height)
}

/// Bit length of a size; the saturating log2 curve both mappings share.
fn size_bits(size: u64) -> u32 {
    64 - size.leading_zeros()
}

/// Shape from the lowercased extension. Folders and extensionless files
/// are plain towers; the bucket is a pure function of the extension, so
/// `main.rs` looks the same in every scan of every tree.
fn shape_for(node: &FileTreeNode) -> BlockShape {
    if node.kind == NodeKind::Folder {
        return BlockShape::Standard;
    }
    match node.extension() {
        Some(ext) => {
            let bucket = hash_to_bucket(fnv1a64(ext.as_bytes()), SHAPE_TABLE.len() as u32);
            SHAPE_TABLE[bucket as usize]
        }
        None => BlockShape::Standard,
    }
}

/// Enforce the node cap. Priority: pinned, then larger byte size, then
/// tree order; survivors are restored to tree order so placement stays
/// reproducible.
fn select_candidates(
    mut candidates: Vec<PlacementCandidate>,
    max_nodes: usize,
) -> Vec<PlacementCandidate> {
    if candidates.len() > max_nodes {
        candidates.sort_by(|a, b| {
            b.pinned
                .cmp(&a.pinned)
                .then(b.size_bytes.cmp(&a.size_bytes))
                .then(a.tree_order.cmp(&b.tree_order))
        });
        for dropped in &candidates[max_nodes..] {
            log::debug!("[Layout] dropping {} over node cap", dropped.name);
        }
        candidates.truncate(max_nodes);
        candidates.sort_by_key(|c| c.tree_order);
    }
    candidates
}

/// Shelf-pack the ground blocks. Rows fill +X to a square-ish target
/// width, then advance +Z by the deepest footprint in the row. Strides
/// include the road and padding, so padded footprints never overlap.
fn pack_ground_blocks(candidates: &[PlacementCandidate], rules: &LayoutRules) -> Vec<Block> {
    let inflation = rules.inflation();
    let spacing = rules.grid_spacing;

    let total_area: u64 = candidates
        .iter()
        .map(|c| (c.width + inflation) as u64 * (c.depth + inflation) as u64)
        .sum();
    let widest = candidates
        .iter()
        .map(|c| c.width + inflation)
        .max()
        .unwrap_or(1);
    let row_limit = ((total_area as f64).sqrt().ceil() as u32).max(widest);

    let mut blocks = Vec::with_capacity(candidates.len());
    let mut cursor_x: u32 = 0;
    let mut cursor_z: u32 = 0;
    let mut row_depth: u32 = 0;

    for cand in candidates {
        let stride = cand.width + inflation;
        if cursor_x > 0 && cursor_x + stride > row_limit {
            cursor_x = 0;
            cursor_z += snap_up(row_depth, spacing);
            row_depth = 0;
        }

        let x = snap_up(cursor_x, spacing);
        blocks.push(build_block(cand, Point3::new(x as f32, 0.0, cursor_z as f32)));

        cursor_x = x + stride;
        row_depth = row_depth.max(cand.depth + inflation);
    }

    blocks
}

/// Stack pinned blocks on top of existing ground blocks.
///
/// The host cell is chosen by hashing the pin's path over the placed count,
/// so the same pin lands on the same roof in every scan. A pin with no
/// ground blocks to stand on grounds at the origin.
fn stack_pinned_blocks(pins: &[PlacementCandidate], ground: &[Block]) -> Vec<Block> {
    let mut stack_tops: FxHashMap<usize, f32> = FxHashMap::default();
    let mut stacked = Vec::with_capacity(pins.len());

    for pin in pins {
        let position = if ground.is_empty() {
            Point3::new(0.0, 0.0, 0.0)
        } else {
            let host = hash_to_bucket(pin.path_hash, ground.len() as u32) as usize;
            let base = &ground[host];
            let top = stack_tops.entry(host).or_insert_with(|| base.top_y());
            let center = base.center_base();
            let pos = Point3::new(
                center.x - pin.width as f32 * 0.5,
                *top,
                center.z - pin.depth as f32 * 0.5,
            );
            *top += pin.height as f32;
            pos
        };

        log::debug!("[Layout] stacking pinned {} at y {}", pin.name, position.y);
        stacked.push(build_block(pin, position));
    }

    stacked
}

fn build_block(cand: &PlacementCandidate, position: Point3<f32>) -> Block {
    Block {
        id: BlockId(cand.path_hash),
        node: cand.node,
        name: cand.name.clone(),
        position,
        width: cand.width,
        depth: cand.depth,
        height: cand.height,
        material: cand.material,
        texture: cand.texture,
        shape: cand.shape,
        pinned: cand.pinned,
        is_git_repo: cand.is_git_repo,
        git_clean: cand.git_clean,
    }
}

fn snap_up(value: u32, spacing: u32) -> u32 {
    value.div_ceil(spacing) * spacing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::aabb::aabb_overlaps_xz;

    fn pins(paths: &[&str]) -> FxHashSet<u64> {
        paths.iter().map(|p| fnv1a64(p.as_bytes())).collect()
    }

    fn sample_root() -> FileTreeNode {
        FileTreeNode::folder(
            "/repo",
            vec![
                FileTreeNode::file("/repo/README.md", 4_096),
                FileTreeNode::folder(
                    "/repo/src",
                    vec![
                        FileTreeNode::file("/repo/src/main.rs", 9_000),
                        FileTreeNode::file("/repo/src/lib.rs", 22_000),
                    ],
                ),
                FileTreeNode::file("/repo/Cargo.toml", 800),
                FileTreeNode::file("/repo/build.log", 1_048_576),
                FileTreeNode::file("/repo/empty.txt", 0),
            ],
        )
    }

    #[test]
    fn test_mapping_is_deterministic() {
        let root = sample_root();
        let rules = LayoutRules::default();
        let pinned = pins(&["/repo/Cargo.toml"]);

        let a = map_city(&root, &rules, &pinned);
        let b = map_city(&root, &rules, &pinned);
        assert!(!a.is_empty());
        assert_eq!(a, b);
    }

    #[test]
    fn test_no_padded_footprint_overlap() {
        let root = sample_root();
        let rules = LayoutRules::default();
        let blocks = map_city(&root, &rules, &FxHashSet::default());

        let half_road = rules.road_width as f32 * 0.5;
        for (i, a) in blocks.iter().enumerate() {
            for b in blocks.iter().skip(i + 1) {
                if a.position.y != b.position.y {
                    continue; // stacked blocks are exempt
                }
                assert!(
                    !aabb_overlaps_xz(&a.padded_aabb(half_road), &b.padded_aabb(half_road)),
                    "{} and {} overlap",
                    a.name,
                    b.name
                );
            }
        }
    }

    #[test]
    fn test_size_monotonicity_for_files() {
        let root = FileTreeNode::folder(
            "/r",
            vec![
                FileTreeNode::file("/r/small.rs", 10),
                FileTreeNode::file("/r/medium.rs", 10_000),
                FileTreeNode::file("/r/large.rs", 1_000_000),
            ],
        );
        let blocks = map_city(&root, &LayoutRules::default(), &FxHashSet::default());
        assert_eq!(blocks.len(), 3);

        let by_name = |n: &str| blocks.iter().find(|b| b.name == n).expect("block missing");
        let (s, m, l) = (by_name("small.rs"), by_name("medium.rs"), by_name("large.rs"));
        assert!(s.height <= m.height && m.height <= l.height);
        assert!(s.width <= m.width && m.width <= l.width);
    }

    #[test]
    fn test_zero_size_file_gets_visible_block() {
        let root = FileTreeNode::folder("/r", vec![FileTreeNode::file("/r/empty", 0)]);
        let blocks = map_city(&root, &LayoutRules::default(), &FxHashSet::default());
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].height >= 1);
        assert!(blocks[0].width >= 1);
    }

    #[test]
    fn test_empty_root_maps_to_empty_city() {
        let root = FileTreeNode::folder("/r", vec![]);
        let blocks = map_city(&root, &LayoutRules::default(), &FxHashSet::default());
        assert!(blocks.is_empty());
    }

    #[test]
    fn test_node_cap_prefers_pinned_then_large() {
        let children: Vec<_> = (0..8)
            .map(|i| FileTreeNode::file(format!("/r/f{}", i), (i as u64 + 1) * 1000))
            .collect();
        let root = FileTreeNode::folder("/r", children);
        let rules = LayoutRules {
            max_nodes: 3,
            ..Default::default()
        };
        // Pin the smallest file; it must survive the cap.
        let pinned = pins(&["/r/f0"]);
        let (blocks, stats) = map_city_with_stats(&root, &rules, &pinned);

        assert_eq!(blocks.len(), 3);
        assert_eq!(stats.dropped, 5);
        assert!(blocks.iter().any(|b| b.name == "f0" && b.pinned));
        // The two largest unpinned files fill the remaining slots.
        assert!(blocks.iter().any(|b| b.name == "f7"));
        assert!(blocks.iter().any(|b| b.name == "f6"));
    }

    #[test]
    fn test_pinned_block_stacks_on_a_roof() {
        let root = sample_root();
        let pinned = pins(&["/repo/Cargo.toml"]);
        let blocks = map_city(&root, &LayoutRules::default(), &pinned);

        let pin = blocks
            .iter()
            .find(|b| b.name == "Cargo.toml")
            .expect("pinned block missing");
        assert!(pin.pinned);
        assert!(pin.position.y > 0.0);

        let host = blocks
            .iter()
            .find(|b| !b.pinned && (b.top_y() - pin.position.y).abs() < 1e-5)
            .expect("pin does not rest on any roof");
        // Pin is centered over its host footprint.
        let hc = host.center_base();
        let pc = pin.center_base();
        assert!((hc.x - pc.x).abs() < 1e-5 && (hc.z - pc.z).abs() < 1e-5);
    }

    #[test]
    fn test_two_pins_on_one_roof_stack_upward() {
        // Single ground block forces both pins onto the same host.
        let root = FileTreeNode::folder(
            "/r",
            vec![
                FileTreeNode::file("/r/ground.rs", 50_000),
                FileTreeNode::file("/r/pin_a", 10),
                FileTreeNode::file("/r/pin_b", 10),
            ],
        );
        let pinned = pins(&["/r/pin_a", "/r/pin_b"]);
        let blocks = map_city(&root, &LayoutRules::default(), &pinned);

        let ground = blocks.iter().find(|b| b.name == "ground.rs").expect("ground");
        let a = blocks.iter().find(|b| b.name == "pin_a").expect("pin_a");
        let b = blocks.iter().find(|b| b.name == "pin_b").expect("pin_b");
        assert!((a.position.y - ground.top_y()).abs() < 1e-5);
        assert!((b.position.y - a.top_y()).abs() < 1e-5);
    }

    #[test]
    fn test_shape_is_stable_per_extension() {
        let a = FileTreeNode::file("/x/one.rs", 10);
        let b = FileTreeNode::file("/y/two.rs", 999_999);
        assert_eq!(shape_for(&a), shape_for(&b));
        assert_eq!(shape_for(&FileTreeNode::file("/x/Makefile", 5)), BlockShape::Standard);
    }

    #[test]
    fn test_three_file_scenario() {
        let _ = env_logger::builder().is_test(true).try_init();
        let root = FileTreeNode::folder(
            "/scan",
            vec![
                FileTreeNode::file("/scan/a", 10),
                FileTreeNode::file("/scan/b", 10_000),
                FileTreeNode::file("/scan/c", 1_000_000),
            ],
        );
        let rules = LayoutRules::default();
        let blocks = map_city(&root, &rules, &FxHashSet::default());
        assert_eq!(blocks.len(), 3);

        for pair in blocks.windows(2) {
            assert!(pair[0].height <= pair[1].height);
            assert!(pair[0].width <= pair[1].width);
            assert!(!aabb_overlaps_xz(
                &pair[0].padded_aabb(rules.road_width as f32 * 0.5),
                &pair[1].padded_aabb(rules.road_width as f32 * 0.5),
            ));
        }
    }

    #[test]
    fn test_malformed_rules_clamped_in_release() {
        // clamped() is the release-path defense; exercised directly because
        // debug builds would assert inside map_city.
        let bad = LayoutRules {
            min_footprint: 0,
            max_footprint: 0,
            max_height: 0,
            grid_spacing: 0,
            ..Default::default()
        };
        let fixed = bad.clamped();
        assert!(fixed.validate().is_ok());
    }
}

use std::{collections::HashMap, time::Duration};

use glam::IVec3;
use log::trace;

use crate::{
    blocks::{BlockFlags, BlockKind},
    config::WorldConfig,
    renderer::{BufferedSink, MeshHandle, MeshSink, RenderPass},
};

use super::{mesh_queue::MeshQueue, sectors::SectorIndex};

/// Sparse block store together with everything derived from it: the set of
/// shown blocks, their mesh handles, the sector buckets and pending mesh jobs.
///
/// Shown blocks are always a subset of stored blocks and carry the same kind.
/// Every shown block has a mesh handle once the mesh queue is drained.
pub struct VoxelWorld<S: MeshSink = BufferedSink> {
    pub(super) blocks: HashMap<IVec3, BlockKind>,
    pub(super) shown: HashMap<IVec3, BlockKind>,
    pub(super) meshes: HashMap<IVec3, (RenderPass, MeshHandle)>,
    pub(super) sectors: SectorIndex,
    pub(super) queue: MeshQueue,
    pub(super) opaque: S,
    pub(super) blended: S,
    pub(super) sector_pad: i32,
    pub(super) tick_budget: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorldStats {
    pub blocks: usize,
    pub shown: usize,
    pub meshes: usize,
    pub queued: usize,
    pub sectors: usize,
}

impl VoxelWorld<BufferedSink> {
    /// World backed by CPU side sinks
    pub fn buffered(config: &WorldConfig) -> Self {
        Self::new(config, BufferedSink::new(), BufferedSink::new())
    }
}

impl<S: MeshSink> VoxelWorld<S> {
    pub fn new(config: &WorldConfig, opaque: S, blended: S) -> Self {
        Self {
            blocks: HashMap::new(),
            shown: HashMap::new(),
            meshes: HashMap::new(),
            sectors: SectorIndex::new(config.sector_size),
            queue: MeshQueue::new(),
            opaque,
            blended,
            sector_pad: config.sector_pad,
            tick_budget: config.tick_duration(),
        }
    }

    /// Places `kind` at `position`, replacing whatever was there.
    ///
    /// Blocks that need a plantable base are silently rejected without one,
    /// in which case `false` is returned. With `immediate` the block and its
    /// neighbours are re-classified right away, otherwise the block stays
    /// hidden until its sector is shown.
    pub fn add(&mut self, position: IVec3, kind: BlockKind, immediate: bool) -> bool {
        if kind.has(BlockFlags::REQUIRES_PLANTABLE) {
            let below = position - IVec3::Y;
            let has_base = self
                .blocks
                .get(&below)
                .is_some_and(|base| base.has(BlockFlags::PLANTABLE));
            if !has_base {
                trace!("Rejected {kind} at {position}: no plantable base");
                return false;
            }
        }
        if self.blocks.contains_key(&position) {
            self.remove(position, immediate);
        }
        self.blocks.insert(position, kind);
        self.sectors.insert(position);
        if immediate {
            if self.exposed(position) {
                self.show(position, kind, true);
            }
            self.check_neighbors(position);
        }
        true
    }

    /// Removes the block at `position`. The position must be occupied.
    ///
    /// A shown block is hidden right away with `immediate`, otherwise its
    /// geometry is released on a later queue pump.
    pub fn remove(&mut self, position: IVec3, immediate: bool) -> Option<BlockKind> {
        let removed = self.blocks.remove(&position);
        debug_assert!(removed.is_some(), "Removing absent block at {position}");
        let kind = removed?;
        self.sectors.remove(position);
        if self.shown.contains_key(&position) {
            self.hide(position, immediate);
        }
        if immediate {
            self.check_neighbors(position);
        }
        Some(kind)
    }

    pub fn get(&self, position: IVec3) -> Option<BlockKind> {
        self.blocks.get(&position).copied()
    }

    pub fn contains(&self, position: IVec3) -> bool {
        self.blocks.contains_key(&position)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (IVec3, BlockKind)> + '_ {
        self.blocks.iter().map(|(p, k)| (*p, *k))
    }

    pub fn is_shown(&self, position: IVec3) -> bool {
        self.shown.contains_key(&position)
    }

    pub fn shown_positions(&self) -> impl Iterator<Item = IVec3> + '_ {
        self.shown.keys().copied()
    }

    pub fn mesh_of(&self, position: IVec3) -> Option<(RenderPass, MeshHandle)> {
        self.meshes.get(&position).copied()
    }

    pub fn sectors(&self) -> &SectorIndex {
        &self.sectors
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn sink(&self, pass: RenderPass) -> &S {
        match pass {
            RenderPass::Opaque => &self.opaque,
            RenderPass::Blended => &self.blended,
        }
    }

    pub fn set_tick_budget(&mut self, budget: Duration) {
        self.tick_budget = budget;
    }

    pub fn stats(&self) -> WorldStats {
        WorldStats {
            blocks: self.blocks.len(),
            shown: self.shown.len(),
            meshes: self.meshes.len(),
            queued: self.queue.len(),
            sectors: self.sectors.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};

    use glam::IVec3;

    use crate::{
        blocks::BlockKind,
        config::WorldConfig,
        renderer::RenderPass,
        voxels::sectorize,
    };

    use super::VoxelWorld;

    fn world() -> VoxelWorld {
        VoxelWorld::buffered(&WorldConfig::default())
    }

    fn assert_consistent(world: &VoxelWorld) {
        for (position, kind) in world.shown.iter() {
            assert_eq!(world.blocks.get(position), Some(kind), "{position} shown but not stored");
        }
        let shown: HashSet<IVec3> = world.shown.keys().copied().collect();
        let meshed: HashSet<IVec3> = world.meshes.keys().copied().collect();
        assert_eq!(shown, meshed);
        let held = world.sink(RenderPass::Opaque).len() + world.sink(RenderPass::Blended).len();
        assert_eq!(held, world.meshes.len());
        for position in world.blocks.keys() {
            let sector = sectorize(*position, 16);
            assert_eq!(
                world.sectors.bucket(sector).iter().filter(|p| *p == position).count(),
                1
            );
        }
        assert_eq!(world.sectors.total_len(), world.blocks.len());
        // Holds once every edit was immediate or the queue is drained
        for position in world.blocks.keys() {
            assert_eq!(
                world.exposed(*position),
                world.is_shown(*position),
                "Exposure of {position} disagrees with shown set"
            );
        }
    }

    #[test]
    fn test_add_single_block_is_shown() {
        let mut world = world();
        let position = IVec3::new(5, 10, 5);
        assert!(world.add(position, BlockKind::Stone, true));
        assert_eq!(world.get(position), Some(BlockKind::Stone));
        assert!(world.is_shown(position));
        assert_eq!(world.sink(RenderPass::Opaque).len(), 1);
        assert_consistent(&world);
    }

    #[test]
    fn test_stacked_blocks_stay_shown() {
        let mut world = world();
        world.add(IVec3::new(5, 10, 5), BlockKind::Stone, true);
        world.add(IVec3::new(5, 11, 5), BlockKind::Stone, true);
        // Both still have exposed side faces
        assert!(world.is_shown(IVec3::new(5, 10, 5)));
        assert!(world.is_shown(IVec3::new(5, 11, 5)));
        assert_consistent(&world);
    }

    #[test]
    fn test_enclosed_block_gets_hidden() {
        let mut world = world();
        let center = IVec3::new(0, 5, 0);
        world.add(center, BlockKind::Stone, true);
        for face in crate::voxels::FACES {
            world.add(center + face, BlockKind::Dirt, true);
        }
        assert!(!world.is_shown(center));
        assert!(world.mesh_of(center).is_none());
        assert_consistent(&world);
    }

    #[test]
    fn test_plant_requires_plantable_base() {
        let mut world = world();
        let position = IVec3::new(0, 1, 0);
        assert!(!world.add(position, BlockKind::TallGrass, true));
        assert!(!world.contains(position));

        world.add(IVec3::ZERO, BlockKind::Stone, true);
        assert!(!world.add(position, BlockKind::TallGrass, true));
        assert!(!world.contains(position));

        world.add(IVec3::ZERO, BlockKind::Grass, true);
        assert!(world.add(position, BlockKind::TallGrass, true));
        assert_eq!(world.get(position), Some(BlockKind::TallGrass));
        assert_consistent(&world);
    }

    #[test]
    fn test_add_then_remove_restores_state() {
        let mut world = world();
        for x in 0..3 {
            for z in 0..3 {
                world.add(IVec3::new(x, 0, z), BlockKind::Stone, true);
            }
        }
        let blocks_before = world.blocks.clone();
        let shown_before: HashMap<IVec3, BlockKind> = world.shown.clone();
        let sectors_before = world.sectors.clone();

        let position = IVec3::new(1, 1, 1);
        world.add(position, BlockKind::Glass, true);
        assert_eq!(world.remove(position, true), Some(BlockKind::Glass));

        assert_eq!(world.blocks, blocks_before);
        assert_eq!(world.shown, shown_before);
        assert_eq!(world.sectors, sectors_before);
        assert_consistent(&world);
    }

    #[test]
    fn test_replacing_block_keeps_single_entry() {
        let mut world = world();
        let position = IVec3::new(-3, 2, 40);
        world.add(position, BlockKind::Stone, true);
        world.add(position, BlockKind::Water, true);
        assert_eq!(world.get(position), Some(BlockKind::Water));
        assert_eq!(world.mesh_of(position).map(|m| m.0), Some(RenderPass::Blended));
        assert!(world.sink(RenderPass::Opaque).is_empty());
        assert_consistent(&world);
    }

    #[test]
    fn test_removal_reveals_neighbors() {
        let mut world = world();
        for x in -1..=1 {
            for y in -1..=1 {
                for z in -1..=1 {
                    world.add(IVec3::new(x, y, z), BlockKind::Stone, true);
                }
            }
        }
        assert!(!world.is_shown(IVec3::ZERO));
        world.remove(IVec3::new(0, 1, 0), true);
        assert!(world.is_shown(IVec3::ZERO));
        assert_consistent(&world);
    }

    #[test]
    fn test_random_immediate_edits_keep_exposure() {
        let kinds = [
            BlockKind::Stone,
            BlockKind::Dirt,
            BlockKind::Grass,
            BlockKind::Water,
            BlockKind::Glass,
            BlockKind::OakLeaves,
            BlockKind::StoneSlab,
            BlockKind::TallGrass,
        ];
        let mut rng = fastrand::Rng::with_seed(88960);
        let mut world = world();
        for step in 0..4000 {
            let position = IVec3::new(rng.i32(0..5), rng.i32(0..5), rng.i32(0..5));
            if world.contains(position) && rng.bool() {
                world.remove(position, true);
            } else {
                world.add(position, kinds[rng.usize(0..kinds.len())], true);
            }
            if step % 100 == 0 {
                assert_consistent(&world);
            }
        }
        assert_consistent(&world);
        assert_eq!(world.queue_len(), 0);
    }

    #[test]
    fn test_non_immediate_add_stays_hidden() {
        let mut world = world();
        world.add(IVec3::ZERO, BlockKind::Stone, false);
        assert!(world.contains(IVec3::ZERO));
        assert!(!world.is_shown(IVec3::ZERO));
        assert_eq!(world.queue_len(), 0);
    }

    #[test]
    fn test_non_immediate_remove_hides_after_drain() {
        let mut world = world();
        world.add(IVec3::ZERO, BlockKind::Stone, true);
        world.remove(IVec3::ZERO, false);
        assert!(!world.is_shown(IVec3::ZERO));
        assert_eq!(world.queue_len(), 1);
        world.process_entire_queue();
        assert_consistent(&world);
        assert!(world.sink(RenderPass::Opaque).is_empty());
    }

    #[test]
    #[should_panic(expected = "Removing absent block")]
    fn test_remove_absent_block_panics() {
        let mut world = world();
        world.remove(IVec3::new(1, 2, 3), true);
    }

    #[test]
    fn test_stats() {
        let mut world = world();
        world.add(IVec3::ZERO, BlockKind::Stone, true);
        world.add(IVec3::new(100, 0, 0), BlockKind::Stone, false);
        let stats = world.stats();
        assert_eq!(stats.blocks, 2);
        assert_eq!(stats.shown, 1);
        assert_eq!(stats.meshes, 1);
        assert_eq!(stats.queued, 0);
        assert_eq!(stats.sectors, 2);
    }
}

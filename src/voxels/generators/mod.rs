use std::time::Instant;

use glam::IVec3;
use log::info;

use crate::{blocks::BlockKind, renderer::MeshSink, voxels::VoxelWorld};

pub mod flat;
pub mod heightmap;

pub trait WorldGenerator: Sync + Send {
    /// Blocks in placement order. Later entries replace earlier ones at the same position.
    fn generate(&self) -> Vec<(IVec3, BlockKind)>;
}

/// Feeds every generated block into `world` without showing anything.
/// Returns the number of accepted placements.
pub fn populate<S: MeshSink>(world: &mut VoxelWorld<S>, generator: &dyn WorldGenerator) -> usize {
    let start = Instant::now();
    let blocks = generator.generate();
    let generated_ms = start.elapsed().as_secs_f64() * 1e3;
    let mut accepted = 0;
    for (position, kind) in blocks.iter() {
        if world.add(*position, *kind, false) {
            accepted += 1;
        }
    }
    info!(
        "Populated world with {} blocks ({accepted}/{} placements) in {:.2}ms, generation took {generated_ms:.2}ms",
        world.len(),
        blocks.len(),
        start.elapsed().as_secs_f64() * 1e3
    );
    accepted
}

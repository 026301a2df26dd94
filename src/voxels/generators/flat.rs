use glam::IVec3;

use crate::blocks::BlockKind;

use super::WorldGenerator;

/// Square slab of `depth` layers: stone topped with a single layer of `surface`
pub struct FlatGenerator {
    size: i32,
    depth: i32,
    surface: BlockKind,
}

impl FlatGenerator {
    pub fn new(size: i32, depth: i32, surface: BlockKind) -> FlatGenerator {
        Self {
            size,
            depth,
            surface,
        }
    }
}

impl WorldGenerator for FlatGenerator {
    fn generate(&self) -> Vec<(IVec3, BlockKind)> {
        let mut blocks = Vec::with_capacity((self.size * self.size * self.depth.max(0)) as usize);
        for x in 0..self.size {
            for z in 0..self.size {
                for y in 0..self.depth {
                    let kind = if y == self.depth - 1 {
                        self.surface
                    } else {
                        BlockKind::Stone
                    };
                    blocks.push((IVec3::new(x, y, z), kind));
                }
            }
        }
        blocks
    }
}

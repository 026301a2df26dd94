use std::collections::HashSet;

use glam::IVec3;
use log::debug;
use noise::{NoiseFn, Perlin};
use rayon::prelude::*;

use crate::{blocks::BlockKind, config::GeneratorConfig};

use super::WorldGenerator;

/// Log and leaves of every wood family
const WOOD_FAMILIES: [(BlockKind, BlockKind); 6] = [
    (BlockKind::OakLog, BlockKind::OakLeaves),
    (BlockKind::BirchLog, BlockKind::BirchLeaves),
    (BlockKind::SpruceLog, BlockKind::SpruceLeaves),
    (BlockKind::JungleLog, BlockKind::JungleLeaves),
    (BlockKind::AcaciaLog, BlockKind::AcaciaLeaves),
    (BlockKind::DarkOakLog, BlockKind::DarkOakLeaves),
];

const FLOWERS: [BlockKind; 5] = [
    BlockKind::Poppy,
    BlockKind::Azure,
    BlockKind::Orchid,
    BlockKind::Allium,
    BlockKind::Cornflower,
];

/// Trees and plants only grow on columns higher than this
const VEGETATION_MIN_HEIGHT: i32 = 20;
const PODZOL_PATCH_RADIUS: i32 = 4;

/// Island landscape of `world_size`² columns: beaches and sea below the shore
/// height, grassland with plants and trees above it, ore veins in the stone
/// and a bedrock floor.
pub struct HeightmapGenerator {
    config: GeneratorConfig,
    perlin: Perlin,
}

impl HeightmapGenerator {
    pub fn new(config: &GeneratorConfig) -> HeightmapGenerator {
        Self {
            config: config.clone(),
            perlin: Perlin::new(config.seed),
        }
    }

    pub fn height(&self, x: i32, z: i32) -> i32 {
        let scale = self.config.noise_scale;
        let noise_val = self.perlin.get([x as f64 * scale, z as f64 * scale]);
        let h = (self.config.base_height + noise_val * self.config.amplitude).floor() as i32;
        h.max(1)
    }

    /// Column heights, indexed `x * world_size + z`
    pub fn heights(&self) -> Vec<i32> {
        let n = self.config.world_size;
        (0..n * n)
            .into_par_iter()
            .map(|i| self.height(i / n, i % n))
            .collect()
    }
}

impl WorldGenerator for HeightmapGenerator {
    fn generate(&self) -> Vec<(IVec3, BlockKind)> {
        let n = self.config.world_size;
        let heights = self.heights();
        let mut rng = fastrand::Rng::with_seed(self.config.seed as u64);
        let mut blocks: Vec<(IVec3, BlockKind)> = vec![];
        let mut stone_area: HashSet<IVec3> = HashSet::new();

        let mut podzols: HashSet<(i32, i32)> = HashSet::new();
        for x in 0..n {
            for z in 0..n {
                if rng.u32(0..1000) > 998 {
                    let r = PODZOL_PATCH_RADIUS;
                    for px in -r..r {
                        for pz in -r..r {
                            podzols.insert((x + px, z + pz));
                        }
                    }
                }
            }
        }

        let mut trees = 0;
        for x in 0..n {
            for z in 0..n {
                let h = heights[(x * n + z) as usize];
                let mut put = |y: i32, kind: BlockKind| blocks.push((IVec3::new(x, y, z), kind));

                if h < self.config.shore_height {
                    for y in h..=self.config.water_level {
                        put(y, BlockKind::Water);
                    }
                    put(h, BlockKind::Sand);
                    for y in (1..h).rev() {
                        if y > h - rng.i32(2..4) {
                            put(y, BlockKind::Sand);
                        } else if y > h - rng.i32(3..7) {
                            put(y, BlockKind::Sandstone);
                        } else {
                            put(y, BlockKind::Stone);
                            stone_area.insert(IVec3::new(x, y, z));
                        }
                    }
                    continue;
                }

                if podzols.contains(&(x, z)) {
                    put(h, BlockKind::Podzol);
                } else {
                    put(h, BlockKind::Grass);
                }
                for y in (1..h).rev() {
                    if y > h - rng.i32(2..6) {
                        put(y, BlockKind::Dirt);
                    } else {
                        put(y, BlockKind::Stone);
                        stone_area.insert(IVec3::new(x, y, z));
                    }
                }

                if h <= VEGETATION_MIN_HEIGHT {
                    continue;
                }
                if rng.u32(0..1000) > 995 {
                    put(h + 1, BlockKind::Fern);
                }
                if rng.u32(0..1000) > 880 {
                    put(h + 1, BlockKind::TallGrass);
                }
                if rng.u32(0..1000) > 950 {
                    put(h + 1, BlockKind::Dandelion);
                }
                if rng.u32(0..1000) > 950 {
                    put(h + 1, FLOWERS[((x + z) as usize) % FLOWERS.len()]);
                }
                if rng.u32(0..1000) > 998 {
                    put(h + 1, BlockKind::Pumpkin);
                }
                if rng.u32(0..1000) > 990 {
                    let (log, leaves) = WOOD_FAMILIES[rng.usize(0..WOOD_FAMILIES.len())];
                    let mut tree_height = rng.i32(4..9);
                    let leaf_base = h + tree_height - 2;
                    let (mut leaf_layers, mut leaf_width) = (3, 3);
                    if log == BlockKind::AcaciaLog {
                        tree_height -= 2;
                        leaf_layers = 1;
                        leaf_width = 4;
                    }
                    for lz in z + 1 - leaf_width..z + leaf_width {
                        for lx in x + 1 - leaf_width..x + leaf_width {
                            for ly in 0..leaf_layers {
                                blocks.push((IVec3::new(lx, leaf_base + ly, lz), leaves));
                            }
                        }
                    }
                    for y in h + 1..h + tree_height {
                        blocks.push((IVec3::new(x, y, z), log));
                    }
                    trees += 1;
                }
            }
        }

        let ore_vein = |blocks: &mut Vec<(IVec3, BlockKind)>, base: IVec3, len: i32, kind| {
            for dy in 0..len {
                let position = base + IVec3::new(0, dy, 0);
                if stone_area.contains(&position) {
                    blocks.push((position, kind));
                }
            }
        };
        for x in 0..n {
            for z in 0..n {
                let column = IVec3::new(x, 0, z);
                let (y, len) = (rng.i32(1..100), rng.i32(1..8));
                ore_vein(&mut blocks, column.with_y(y), len, BlockKind::CoalOre);
                if rng.u32(0..1000) > 100 {
                    let (y, len) = (rng.i32(1..100), rng.i32(1..8));
                    ore_vein(&mut blocks, column.with_y(y), len, BlockKind::IronOre);
                }
                if rng.u32(0..1000) > 990 {
                    ore_vein(&mut blocks, column.with_y(rng.i32(1..20)), 1, BlockKind::GoldOre);
                }
                if rng.u32(0..1000) > 997 {
                    let (y, len) = (rng.i32(1..12), rng.i32(1..3));
                    ore_vein(&mut blocks, column.with_y(y), len, BlockKind::DiamondOre);
                }
                if rng.u32(0..1000) > 998 {
                    ore_vein(&mut blocks, column.with_y(rng.i32(1..80)), 1, BlockKind::EmeraldOre);
                }
            }
        }

        for x in 0..n {
            for z in 0..n {
                blocks.push((IVec3::new(x, 0, z), BlockKind::Bedrock));
                if (x * z) % 8 < (x + z) % 3 {
                    blocks.push((IVec3::new(x, 1, z), BlockKind::Bedrock));
                }
                if (x * z) % 6 < (x + z * 2) % 5 {
                    blocks.push((IVec3::new(x, 2, z), BlockKind::Bedrock));
                }
            }
        }
        debug!(
            "Generated {} placements, {} stone blocks, {trees} trees, {} podzol columns",
            blocks.len(),
            stone_area.len(),
            podzols.len()
        );
        blocks
    }
}

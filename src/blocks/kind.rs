use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::properties::{BlockDescriptor, BlockFlags, ShapeKind, descriptor_table};

macro_rules! block_kinds {
    ($($variant:ident => $name:literal),+ $(,)?) => {
        #[repr(u8)]
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum BlockKind {
            $(
                #[serde(rename = $name)]
                $variant,
            )+
        }

        impl BlockKind {
            pub const ALL: &'static [BlockKind] = &[$(BlockKind::$variant),+];

            pub fn name(self) -> &'static str {
                match self {
                    $(BlockKind::$variant => $name,)+
                }
            }

            pub fn from_name(name: &str) -> Option<BlockKind> {
                match name {
                    $($name => Some(BlockKind::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

block_kinds! {
    Stone => "stone",
    StoneSlab => "stone_slab",
    Bedrock => "bedrock",
    Cobble => "cobble",
    CobbleSlab => "cobble_slab",
    MossyCobble => "mossy_cobble",
    MossyCobbleSlab => "mossy_cobble_slab",

    CoalOre => "coal_ore",
    IronOre => "iron_ore",
    GoldOre => "gold_ore",
    DiamondOre => "diamond_ore",
    EmeraldOre => "emerald_ore",

    Sand => "sand",
    Sandstone => "sandstone",
    SandstoneSlab => "sandstone_slab",
    SmoothSandstone => "smooth_sandstone",
    SmoothSandstoneSlab => "smooth_sandstone_slab",
    Glass => "glass",
    Obsidian => "obsidian",

    Dirt => "dirt",
    Grass => "grass",
    Podzol => "podzol",

    TallGrass => "tall_grass",
    Dandelion => "dandelion",
    Poppy => "poppy",
    Azure => "azure",
    Orchid => "orchid",
    Allium => "allium",
    Cornflower => "cornflower",
    Fern => "fern",

    Pumpkin => "pumpkin",

    OakLog => "oak_log",
    OakLeaves => "oak_leaves",
    OakPlanks => "oak_planks",
    OakPlankSlab => "oak_plank_slab",

    BirchLog => "birch_log",
    BirchLeaves => "birch_leaves",
    BirchPlanks => "birch_planks",
    BirchPlankSlab => "birch_plank_slab",

    SpruceLog => "spruce_log",
    SpruceLeaves => "spruce_leaves",
    SprucePlanks => "spruce_planks",
    SprucePlankSlab => "spruce_plank_slab",

    JungleLog => "jungle_log",
    JungleLeaves => "jungle_leaves",
    JunglePlanks => "jungle_planks",
    JunglePlankSlab => "jungle_plank_slab",

    AcaciaLog => "acacia_log",
    AcaciaLeaves => "acacia_leaves",
    AcaciaPlanks => "acacia_planks",
    AcaciaPlankSlab => "acacia_plank_slab",

    DarkOakLog => "doak_log",
    DarkOakLeaves => "doak_leaves",
    DarkOakPlanks => "doak_planks",
    DarkOakPlankSlab => "doak_plank_slab",

    Bricks => "bricks",
    BrickSlab => "brick_slab",
    StoneBrick => "stone_brick",
    StoneBrickSlab => "stone_brick_slab",
    CrackedStoneBrick => "cracked_stone_brick",
    CrackedStoneBrickSlab => "cracked_stone_brick_slab",
    MossyStoneBrick => "mossy_stone_brick",
    MossyStoneBrickSlab => "mossy_stone_brick_slab",
    SmoothStone => "smooth_stone",
    SmoothStoneSlab => "smooth_stone_slab",

    Furnace => "furnace",

    Water => "water",

    Tnt => "tnt",
    Sponge => "sponge",
    WetSponge => "wet_sponge",
}

impl BlockKind {
    pub fn descriptor(self) -> &'static BlockDescriptor {
        &descriptor_table()[self as usize]
    }

    pub fn flags(self) -> BlockFlags {
        self.descriptor().flags
    }

    pub fn shape(self) -> ShapeKind {
        self.descriptor().shape
    }

    pub fn has(self, flags: BlockFlags) -> bool {
        self.flags().contains(flags)
    }

    pub fn is_solid(self) -> bool {
        !self.has(BlockFlags::NON_SOLID)
    }

    /// Whether a neighbouring block of kind `self` hides a face of `other`
    pub fn culls(self, other: BlockKind) -> bool {
        if self.has(BlockFlags::SEE_THROUGH) {
            return false;
        }
        if self.has(BlockFlags::GROUP_CULL) {
            return self == other;
        }
        true
    }
}

impl Display for BlockKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

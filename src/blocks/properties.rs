use std::sync::LazyLock;

use bitflags::bitflags;

use super::{
    BlockKind,
    textures::{FACE_UV_FLOATS, TextureLayout},
};

bitflags! {
    /// Semantic properties of a block kind.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct BlockFlags: u8 {
        /// Has gaps, never hides a neighbouring face.
        const SEE_THROUGH        = 1 << 0;
        /// Only hides faces of blocks of the same kind.
        const GROUP_CULL         = 1 << 1;
        /// Plants may be placed on top.
        const PLANTABLE          = 1 << 2;
        /// Can only exist on top of a `PLANTABLE` block.
        const REQUIRES_PLANTABLE = 1 << 3;
        /// Ignored by player collision.
        const NON_SOLID          = 1 << 4;
        /// Overwritten instead of blocking placement.
        const REPLACEABLE        = 1 << 5;
        /// Drawn in the blended pass after all opaque geometry.
        const RENDERS_LATE       = 1 << 6;
        /// Survives explosions.
        const BLAST_RESISTANT    = 1 << 7;
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ShapeKind {
    Cube,
    Slab,
    Liquid,
    Plant,
}

#[derive(Clone, Debug)]
pub struct BlockDescriptor {
    pub kind: BlockKind,
    pub flags: BlockFlags,
    pub shape: ShapeKind,
    /// 6 faces x 4 corners x (u, v), faces ordered top, bottom, left, right, front, back
    pub tex_coords: [f32; FACE_UV_FLOATS],
}

static DESCRIPTORS: LazyLock<Vec<BlockDescriptor>> = LazyLock::new(|| {
    BlockKind::ALL
        .iter()
        .map(|&kind| BlockDescriptor {
            kind,
            flags: flags_of(kind),
            shape: shape_of(kind),
            tex_coords: texture_layout_of(kind).tex_coords(),
        })
        .collect()
});

pub(super) fn descriptor_table() -> &'static [BlockDescriptor] {
    &DESCRIPTORS
}

fn is_flower(kind: BlockKind) -> bool {
    use BlockKind::*;
    matches!(
        kind,
        TallGrass | Dandelion | Poppy | Azure | Orchid | Allium | Cornflower | Fern
    )
}

fn is_slab(kind: BlockKind) -> bool {
    use BlockKind::*;
    matches!(
        kind,
        StoneSlab
            | CobbleSlab
            | MossyCobbleSlab
            | SandstoneSlab
            | SmoothSandstoneSlab
            | OakPlankSlab
            | BirchPlankSlab
            | SprucePlankSlab
            | JunglePlankSlab
            | AcaciaPlankSlab
            | DarkOakPlankSlab
            | BrickSlab
            | StoneBrickSlab
            | CrackedStoneBrickSlab
            | MossyStoneBrickSlab
            | SmoothStoneSlab
    )
}

fn is_leaves(kind: BlockKind) -> bool {
    use BlockKind::*;
    matches!(
        kind,
        OakLeaves | BirchLeaves | SpruceLeaves | JungleLeaves | AcaciaLeaves | DarkOakLeaves
    )
}

fn flags_of(kind: BlockKind) -> BlockFlags {
    use BlockKind::*;
    let mut flags = BlockFlags::empty();
    if is_flower(kind) {
        flags |= BlockFlags::SEE_THROUGH | BlockFlags::REQUIRES_PLANTABLE | BlockFlags::NON_SOLID;
    }
    if is_slab(kind) {
        flags |= BlockFlags::SEE_THROUGH;
    }
    if is_leaves(kind) || matches!(kind, Water | Glass) {
        flags |= BlockFlags::GROUP_CULL;
    }
    match kind {
        Grass | Dirt | Podzol => flags |= BlockFlags::PLANTABLE,
        TallGrass | Fern => flags |= BlockFlags::REPLACEABLE,
        Water => {
            flags |= BlockFlags::NON_SOLID | BlockFlags::RENDERS_LATE | BlockFlags::BLAST_RESISTANT
        }
        Bedrock | Obsidian => flags |= BlockFlags::BLAST_RESISTANT,
        _ => {}
    }
    flags
}

fn shape_of(kind: BlockKind) -> ShapeKind {
    if is_flower(kind) {
        ShapeKind::Plant
    } else if is_slab(kind) {
        ShapeKind::Slab
    } else if kind == BlockKind::Water {
        ShapeKind::Liquid
    } else {
        ShapeKind::Cube
    }
}

fn texture_layout_of(kind: BlockKind) -> TextureLayout {
    use BlockKind::*;
    use TextureLayout::{Full, Sided, Slab, Uniform};
    match kind {
        Stone => Uniform((2, 1)),
        StoneSlab => Slab((2, 1), (2, 1), (2, 1)),
        Bedrock => Uniform((7, 1)),
        Cobble => Uniform((1, 2)),
        CobbleSlab => Slab((1, 2), (1, 2), (1, 2)),
        MossyCobble => Uniform((5, 1)),
        MossyCobbleSlab => Slab((5, 1), (5, 1), (5, 1)),

        CoalOre => Uniform((4, 0)),
        IronOre => Uniform((5, 0)),
        GoldOre => Uniform((6, 0)),
        DiamondOre => Uniform((7, 0)),
        EmeraldOre => Uniform((6, 1)),

        Sand => Uniform((1, 1)),
        Sandstone => Sided((2, 3), (0, 3), (1, 3)),
        SandstoneSlab => Slab((2, 3), (0, 3), (1, 3)),
        SmoothSandstone => Uniform((2, 3)),
        SmoothSandstoneSlab => Slab((2, 3), (2, 3), (2, 3)),
        Glass => Uniform((3, 3)),
        Obsidian => Uniform((3, 4)),

        Dirt => Uniform((0, 1)),
        Grass => Sided((1, 0), (0, 1), (0, 0)),
        Podzol => Sided((6, 4), (0, 1), (5, 4)),

        TallGrass => Uniform((4, 1)),
        Dandelion => Uniform((4, 2)),
        Poppy => Uniform((4, 3)),
        Azure => Uniform((5, 3)),
        Orchid => Uniform((6, 3)),
        Allium => Uniform((7, 3)),
        Cornflower => Uniform((7, 4)),
        Fern => Uniform((4, 4)),

        Pumpkin => Sided((3, 5), (3, 5), (2, 5)),

        OakLog => Sided((3, 2), (3, 2), (3, 1)),
        OakLeaves => Uniform((3, 0)),
        OakPlanks => Uniform((2, 2)),
        OakPlankSlab => Slab((2, 2), (2, 2), (2, 2)),

        BirchLog => Sided((1, 7), (1, 7), (0, 7)),
        BirchLeaves => Uniform((2, 7)),
        BirchPlanks => Uniform((3, 7)),
        BirchPlankSlab => Slab((3, 7), (3, 7), (3, 7)),

        SpruceLog => Sided((1, 6), (1, 6), (0, 6)),
        SpruceLeaves => Uniform((2, 6)),
        SprucePlanks => Uniform((3, 6)),
        SprucePlankSlab => Slab((3, 6), (3, 6), (3, 6)),

        JungleLog => Sided((5, 7), (5, 7), (4, 7)),
        JungleLeaves => Uniform((6, 7)),
        JunglePlanks => Uniform((7, 7)),
        JunglePlankSlab => Slab((7, 7), (7, 7), (7, 7)),

        AcaciaLog => Sided((5, 6), (5, 6), (4, 6)),
        AcaciaLeaves => Uniform((6, 6)),
        AcaciaPlanks => Uniform((7, 6)),
        AcaciaPlankSlab => Slab((7, 6), (7, 6), (7, 6)),

        DarkOakLog => Sided((5, 5), (5, 5), (4, 5)),
        DarkOakLeaves => Uniform((6, 5)),
        DarkOakPlanks => Uniform((7, 5)),
        DarkOakPlankSlab => Slab((7, 5), (7, 5), (7, 5)),

        Bricks => Uniform((2, 0)),
        BrickSlab => Slab((2, 0), (2, 0), (2, 0)),
        StoneBrick => Uniform((5, 2)),
        StoneBrickSlab => Slab((5, 2), (5, 2), (5, 2)),
        CrackedStoneBrick => Uniform((6, 2)),
        CrackedStoneBrickSlab => Slab((6, 2), (6, 2), (6, 2)),
        MossyStoneBrick => Uniform((7, 2)),
        MossyStoneBrickSlab => Slab((7, 2), (7, 2), (7, 2)),
        SmoothStone => Uniform((8, 0)),
        SmoothStoneSlab => Slab((8, 0), (8, 0), (9, 0)),

        Furnace => Full([(10, 0), (10, 0), (11, 0), (11, 0), (12, 0), (11, 0)]),

        Water => Uniform((0, 2)),

        Tnt => Sided((2, 4), (0, 4), (1, 4)),
        Sponge => Uniform((0, 5)),
        WetSponge => Uniform((1, 5)),
    }
}

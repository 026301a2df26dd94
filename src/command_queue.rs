use glam::{IVec3, Vec3};
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::{
    blocks::{BlockFlags, BlockKind},
    collision::hit_test,
    renderer::MeshSink,
    voxels::VoxelWorld,
};

/// Player edits, applied in order at the next tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    /// Place `kind` against the targeted block
    PlaceBlock { kind: BlockKind },
    /// Remove the targeted block
    BreakBlock,
    /// Remove everything but blast resistant blocks around `center`
    Detonate { center: IVec3 },
}

/// Where the player stands and looks when a command is applied
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sight {
    pub origin: Vec3,
    pub direction: Vec3,
    pub max_distance: u32,
}

#[derive(Default)]
pub struct CommandQueue {
    queue: Vec<Command>,
}

impl CommandQueue {
    pub fn new() -> CommandQueue {
        Self::default()
    }

    pub fn enqueue(&mut self, cmd: Command) {
        debug!("Enqueuing command {cmd:?}");
        self.queue.push(cmd);
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn iter(&mut self) -> std::vec::Drain<'_, Command> {
        self.queue.drain(..)
    }
}

/// Applies edit commands to the world through `add`/`remove` only
pub struct EditRules {
    /// Half extent of the cube affected by explosions and sponges
    pub blast_radius: i32,
}

impl EditRules {
    pub fn apply<S: MeshSink>(&self, world: &mut VoxelWorld<S>, cmd: Command, sight: &Sight) {
        match cmd {
            Command::Detonate { center } => {
                self.detonate(world, center);
            }
            Command::BreakBlock => {
                let Some(hit) = hit_test(world, sight.origin, sight.direction, sight.max_distance)
                else {
                    return;
                };
                world.remove(hit.block, true);
            }
            Command::PlaceBlock { kind } => {
                let Some(hit) = hit_test(world, sight.origin, sight.direction, sight.max_distance)
                else {
                    return;
                };
                let Some(target) = world.get(hit.block) else {
                    return;
                };
                if target.has(BlockFlags::REPLACEABLE) {
                    world.remove(hit.block, true);
                    world.add(hit.block, kind, true);
                } else if target == BlockKind::Tnt {
                    self.detonate(world, hit.block);
                } else if let Some(previous) = hit.previous {
                    let kind = if kind == BlockKind::Sponge && self.absorb(world, hit.block) > 0 {
                        BlockKind::WetSponge
                    } else {
                        kind
                    };
                    world.add(previous, kind, true);
                }
            }
        }
    }

    /// Returns the number of removed blocks
    pub fn detonate<S: MeshSink>(&self, world: &mut VoxelWorld<S>, center: IVec3) -> usize {
        let mut removed = 0;
        for position in blast_cube(center, self.blast_radius) {
            let Some(kind) = world.get(position) else {
                continue;
            };
            if kind.has(BlockFlags::BLAST_RESISTANT) {
                continue;
            }
            world.remove(position, true);
            removed += 1;
        }
        debug!("Detonation at {center} removed {removed} blocks");
        removed
    }

    /// Removes water around `center`. Returns the number of absorbed blocks.
    pub fn absorb<S: MeshSink>(&self, world: &mut VoxelWorld<S>, center: IVec3) -> usize {
        let mut absorbed = 0;
        for position in blast_cube(center, self.blast_radius) {
            if world.get(position) == Some(BlockKind::Water) {
                world.remove(position, true);
                absorbed += 1;
            }
        }
        trace!("Sponge at {center} absorbed {absorbed} water blocks");
        absorbed
    }
}

/// Positions of the cube around `center`, `[-r, r)` on each axis
fn blast_cube(center: IVec3, r: i32) -> impl Iterator<Item = IVec3> {
    (-r..r).flat_map(move |x| {
        (-r..r).flat_map(move |y| (-r..r).map(move |z| center + IVec3::new(x, y, z)))
    })
}

#[cfg(test)]
mod tests {
    use glam::{IVec3, Vec3};

    use crate::{blocks::BlockKind, config::WorldConfig, voxels::VoxelWorld};

    use super::{Command, CommandQueue, EditRules, Sight};

    const RULES: EditRules = EditRules { blast_radius: 4 };

    /// Looking down +x from the origin at a wall at x = 3
    fn wall_world(kind: BlockKind) -> (VoxelWorld, Sight) {
        let mut world = VoxelWorld::buffered(&WorldConfig::default());
        world.add(IVec3::new(3, 0, 0), kind, true);
        let sight = Sight {
            origin: Vec3::ZERO,
            direction: Vec3::X,
            max_distance: 8,
        };
        (world, sight)
    }

    #[test]
    fn test_queue_drains_in_order() {
        let mut queue = CommandQueue::new();
        queue.enqueue(Command::BreakBlock);
        queue.enqueue(Command::Detonate { center: IVec3::ONE });
        let cmds: Vec<Command> = queue.iter().collect();
        assert_eq!(cmds, vec![Command::BreakBlock, Command::Detonate { center: IVec3::ONE }]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_commands_deserialize() {
        let cmds: Vec<Command> = serde_json::from_str(
            r#"[
                { "command": "place_block", "kind": "oak_planks" },
                { "command": "break_block" },
                { "command": "detonate", "center": [1, 2, 3] }
            ]"#,
        )
        .unwrap();
        assert_eq!(
            cmds,
            vec![
                Command::PlaceBlock {
                    kind: BlockKind::OakPlanks
                },
                Command::BreakBlock,
                Command::Detonate {
                    center: IVec3::new(1, 2, 3)
                },
            ]
        );
    }

    #[test]
    fn test_place_against_hit_block() {
        let (mut world, sight) = wall_world(BlockKind::Stone);
        RULES.apply(&mut world, Command::PlaceBlock { kind: BlockKind::Glass }, &sight);
        assert_eq!(world.get(IVec3::new(2, 0, 0)), Some(BlockKind::Glass));
        assert!(world.is_shown(IVec3::new(2, 0, 0)));
    }

    #[test]
    fn test_place_replaces_replaceable_block() {
        let (mut world, sight) = wall_world(BlockKind::Grass);
        world.add(IVec3::new(3, 1, 0), BlockKind::TallGrass, true);
        let sight = Sight {
            origin: Vec3::new(0.0, 1.0, 0.0),
            ..sight
        };
        RULES.apply(&mut world, Command::PlaceBlock { kind: BlockKind::Stone }, &sight);
        assert_eq!(world.get(IVec3::new(3, 1, 0)), Some(BlockKind::Stone));
        assert!(!world.contains(IVec3::new(2, 1, 0)));
    }

    #[test]
    fn test_break_removes_hit_block() {
        let (mut world, sight) = wall_world(BlockKind::Stone);
        RULES.apply(&mut world, Command::BreakBlock, &sight);
        assert!(world.is_empty());
        assert_eq!(world.stats().meshes, 0);
    }

    #[test]
    fn test_commands_without_target_are_ignored() {
        let mut world = VoxelWorld::buffered(&WorldConfig::default());
        let sight = Sight {
            origin: Vec3::ZERO,
            direction: Vec3::Y,
            max_distance: 8,
        };
        RULES.apply(&mut world, Command::BreakBlock, &sight);
        RULES.apply(&mut world, Command::PlaceBlock { kind: BlockKind::Stone }, &sight);
        assert!(world.is_empty());
    }

    #[test]
    fn test_detonation_spares_resistant_blocks() {
        let mut world = VoxelWorld::buffered(&WorldConfig::default());
        for x in -5..5 {
            world.add(IVec3::new(x, 0, 0), BlockKind::Stone, true);
        }
        world.add(IVec3::new(0, 1, 0), BlockKind::Bedrock, true);
        world.add(IVec3::new(1, 1, 0), BlockKind::Water, true);

        let removed = RULES.detonate(&mut world, IVec3::ZERO);
        // Stone from -4 to 3 is inside the blast cube
        assert_eq!(removed, 8);
        assert_eq!(world.get(IVec3::new(-5, 0, 0)), Some(BlockKind::Stone));
        assert_eq!(world.get(IVec3::new(4, 0, 0)), Some(BlockKind::Stone));
        assert_eq!(world.get(IVec3::new(0, 1, 0)), Some(BlockKind::Bedrock));
        assert_eq!(world.get(IVec3::new(1, 1, 0)), Some(BlockKind::Water));
    }

    #[test]
    fn test_placing_on_tnt_detonates() {
        let (mut world, sight) = wall_world(BlockKind::Tnt);
        world.add(IVec3::new(3, 1, 0), BlockKind::Stone, true);
        RULES.apply(&mut world, Command::PlaceBlock { kind: BlockKind::Stone }, &sight);
        assert!(world.is_empty());
    }

    #[test]
    fn test_sponge_absorbs_water() {
        let (mut world, sight) = wall_world(BlockKind::Stone);
        world.add(IVec3::new(3, 1, 0), BlockKind::Water, true);
        world.add(IVec3::new(2, 1, 0), BlockKind::Water, true);
        RULES.apply(&mut world, Command::PlaceBlock { kind: BlockKind::Sponge }, &sight);
        assert_eq!(world.get(IVec3::new(2, 0, 0)), Some(BlockKind::WetSponge));
        assert!(!world.contains(IVec3::new(3, 1, 0)));
        assert!(!world.contains(IVec3::new(2, 1, 0)));
    }

    #[test]
    fn test_dry_sponge_stays_dry() {
        let (mut world, sight) = wall_world(BlockKind::Stone);
        RULES.apply(&mut world, Command::PlaceBlock { kind: BlockKind::Sponge }, &sight);
        assert_eq!(world.get(IVec3::new(2, 0, 0)), Some(BlockKind::Sponge));
    }
}

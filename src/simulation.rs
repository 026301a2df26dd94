use std::time::Instant;

use glam::{IVec2, IVec3, Vec2};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::{
    command_queue::{Command, CommandQueue, EditRules, Sight},
    config::WorldConfig,
    player::Player,
    renderer::MeshSink,
    util::SimpleMovingAverage,
    voxels::{VoxelWorld, WorldStats, normalize},
};

/// Held keys and mouse movement for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerInput {
    pub strafe: IVec2,
    pub mouse_delta: Vec2,
    pub jumping: bool,
    pub sprinting: bool,
    pub crouching: bool,
    pub flying: bool,
}

/// Owns the world and the player and advances both one tick at a time
pub struct Simulation<S: MeshSink> {
    pub world: VoxelWorld<S>,
    pub player: Player,
    sector: Option<IVec3>,
    commands: CommandQueue,
    rules: EditRules,
    hit_test_distance: u32,
    sma_tick_time: SimpleMovingAverage,
    ticks: u64,
}

impl<S: MeshSink> Simulation<S> {
    pub fn new(config: &WorldConfig, world: VoxelWorld<S>) -> Self {
        Self {
            world,
            player: Player::new(config.spawn_position, config),
            sector: None,
            commands: CommandQueue::new(),
            rules: EditRules {
                blast_radius: config.blast_radius,
            },
            hit_test_distance: config.hit_test_distance,
            sma_tick_time: SimpleMovingAverage::new(100),
            ticks: 0,
        }
    }

    pub fn enqueue(&mut self, cmd: Command) {
        self.commands.enqueue(cmd);
    }

    pub fn apply_input(&mut self, input: &PlayerInput) {
        let player = &mut self.player;
        player.strafe = input.strafe;
        player.jumping = input.jumping;
        player.crouching = input.crouching;
        player.flying = input.flying;
        // Sprinting latches until the player stops moving
        if input.sprinting {
            player.sprinting = true;
        }
        player.rotate(input.mouse_delta);
    }

    /// Sector the player currently streams around
    pub fn sector(&self) -> Option<IVec3> {
        self.sector
    }

    pub fn sight(&self) -> Sight {
        Sight {
            origin: self.player.position,
            direction: self.player.sight_vector(),
            max_distance: self.hit_test_distance,
        }
    }

    pub fn tick(&mut self, dt: f32) {
        let start = Instant::now();
        self.world.process_queue();

        let sector = self
            .world
            .sectors()
            .sector_of(normalize(self.player.position));
        if self.sector != Some(sector) {
            debug!("Player moved to sector {sector}");
            self.world.change_sectors(self.sector, Some(sector));
            if self.sector.is_none() {
                self.world.process_entire_queue();
            }
            self.sector = Some(sector);
        }

        let sight = self.sight();
        for cmd in self.commands.iter() {
            self.rules.apply(&mut self.world, cmd, &sight);
        }

        self.player.tick(&self.world, dt);
        self.sma_tick_time.add_elapsed(start);
        self.ticks += 1;
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Moving average of the tick duration in microseconds
    pub fn average_tick_time(&self) -> f32 {
        self.sma_tick_time.get()
    }

    pub fn stats(&self) -> WorldStats {
        self.world.stats()
    }

    pub fn log_stats(&self) {
        let stats = self.stats();
        info!(
            "Tick {}: player at {:.2} sector {:?}, {} blocks, {} shown, {} queued, avg tick {:.1}µs",
            self.ticks,
            self.player.position,
            self.sector,
            stats.blocks,
            stats.shown,
            stats.queued,
            self.average_tick_time()
        );
    }
}

#[cfg(test)]
mod tests {
    use glam::{IVec2, IVec3, Vec2, Vec3};

    use crate::{
        blocks::BlockKind,
        command_queue::Command,
        config::WorldConfig,
        renderer::BufferedSink,
        voxels::{
            VoxelWorld,
            generators::{flat::FlatGenerator, populate},
        },
    };

    use super::{PlayerInput, Simulation};

    fn flat_simulation() -> Simulation<BufferedSink> {
        let config = WorldConfig {
            spawn_position: Vec3::new(8.0, 6.0, 8.0),
            ..WorldConfig::default()
        };
        let mut world = VoxelWorld::buffered(&config);
        populate(&mut world, &FlatGenerator::new(48, 2, BlockKind::Grass));
        Simulation::new(&config, world)
    }

    #[test]
    fn test_first_tick_streams_surroundings() {
        let mut sim = flat_simulation();
        assert_eq!(sim.stats().shown, 0);
        sim.tick(1.0 / 60.0);
        assert_eq!(sim.sector(), Some(IVec3::ZERO));
        let stats = sim.stats();
        // The whole slab lies within the streaming radius and is drained at once.
        // Every block has an exposed top or bottom face.
        assert_eq!(stats.queued, 0);
        assert_eq!(stats.shown, 2 * 48 * 48);
        assert_eq!(stats.meshes, stats.shown);
    }

    #[test]
    fn test_player_lands_and_walks() {
        let mut sim = flat_simulation();
        for _ in 0..120 {
            sim.tick(1.0 / 60.0);
        }
        assert!(sim.player.is_standing());
        let start = sim.player.position;
        sim.apply_input(&PlayerInput {
            strafe: IVec2::new(0, 1),
            ..PlayerInput::default()
        });
        for _ in 0..30 {
            sim.tick(1.0 / 60.0);
        }
        assert!(sim.player.position.x > start.x + 2.0);
        assert_eq!(sim.ticks(), 150);
    }

    #[test]
    fn test_sector_change_is_tracked() {
        let mut sim = flat_simulation();
        sim.tick(1.0 / 60.0);
        sim.player.position = Vec3::new(40.0, 6.0, 8.0);
        sim.tick(1.0 / 60.0);
        assert_eq!(sim.sector(), Some(IVec3::new(2, 0, 0)));
    }

    #[test]
    fn test_commands_apply_at_next_tick() {
        let mut sim = flat_simulation();
        for _ in 0..120 {
            sim.tick(1.0 / 60.0);
        }
        // Look straight down at the grass below
        sim.apply_input(&PlayerInput {
            mouse_delta: Vec2::new(0.0, -1000.0),
            ..PlayerInput::default()
        });
        let below = IVec3::new(8, 1, 8);
        assert_eq!(sim.world.get(below), Some(BlockKind::Grass));
        sim.enqueue(Command::BreakBlock);
        assert!(sim.world.contains(below));
        sim.tick(1.0 / 60.0);
        assert!(!sim.world.contains(below));
        assert!(sim.world.is_shown(IVec3::new(8, 0, 8)));
    }

    #[test]
    fn test_sprint_latches_until_idle() {
        let mut sim = flat_simulation();
        for _ in 0..120 {
            sim.tick(1.0 / 60.0);
        }
        sim.apply_input(&PlayerInput {
            strafe: IVec2::new(-1, 0),
            sprinting: true,
            ..PlayerInput::default()
        });
        sim.tick(1.0 / 60.0);
        assert!(sim.player.sprinting);
        sim.apply_input(&PlayerInput::default());
        sim.tick(1.0 / 60.0);
        assert!(!sim.player.sprinting);
    }
}

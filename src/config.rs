use std::{error::Error, fs, path::Path, time::Duration};

use glam::Vec3;
use log::info;
use serde::{Deserialize, Serialize};

/// Tunables of the world, the player and the reference terrain generator.
/// Every field has a default, so a config file only needs to list overrides.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    pub ticks_per_second: u32,

    // Streaming
    pub sector_size: i32,
    pub sector_pad: i32,

    // Player
    pub spawn_position: Vec3,
    pub player_height: u32,
    pub collision_padding: f32,
    pub gravity: f32,
    pub max_jump_height: f32,
    pub terminal_velocity: f32,
    pub walking_speed: f32,
    pub flying_speed: f32,
    pub crouch_speed: f32,
    pub sprint_speed: f32,
    /// Added to the horizontal speed while airborne after a jump
    pub jump_speed_bonus: f32,
    pub max_dt: f32,
    pub substeps: u32,

    // Editing
    pub hit_test_distance: u32,
    pub blast_radius: i32,

    pub generator: GeneratorConfig,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GeneratorConfig {
    pub world_size: i32,
    pub seed: u32,
    /// Columns below this height are flooded
    pub shore_height: i32,
    /// Highest y filled with water
    pub water_level: i32,
    pub base_height: f64,
    pub amplitude: f64,
    pub noise_scale: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            ticks_per_second: 60,
            sector_size: 16,
            sector_pad: 4,
            spawn_position: Vec3::new(30.0, 80.0, 80.0),
            player_height: 2,
            collision_padding: 0.25,
            gravity: 20.0,
            max_jump_height: 1.0,
            terminal_velocity: 50.0,
            walking_speed: 5.0,
            flying_speed: 15.0,
            crouch_speed: 2.0,
            sprint_speed: 7.0,
            jump_speed_bonus: 0.7,
            max_dt: 0.2,
            substeps: 8,
            hit_test_distance: 8,
            blast_radius: 4,
            generator: GeneratorConfig::default(),
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            world_size: 128,
            seed: 88960,
            shore_height: 33,
            water_level: 30,
            base_height: 38.0,
            amplitude: 14.0,
            noise_scale: 0.02,
        }
    }
}

impl WorldConfig {
    pub fn load(path: &Path) -> Result<WorldConfig, Box<dyn Error>> {
        let raw = fs::read_to_string(path)?;
        let config: WorldConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), Box<dyn Error>> {
        if self.ticks_per_second == 0 {
            return Err("ticks_per_second needs to be > 0".into());
        }
        if self.sector_size <= 0 {
            return Err("sector_size needs to be > 0".into());
        }
        if self.sector_pad < 0 {
            return Err("sector_pad needs to be >= 0".into());
        }
        if self.substeps == 0 {
            return Err("substeps needs to be > 0".into());
        }
        if !self.spawn_position.is_finite() {
            return Err("spawn_position needs to be finite".into());
        }
        if !(0.0..0.5).contains(&self.collision_padding) {
            return Err("collision_padding needs to be within [0, 0.5)".into());
        }
        Ok(())
    }

    /// Time budget of one simulation step
    pub fn tick_duration(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / self.ticks_per_second as u64)
    }

    pub fn jump_speed(&self) -> f32 {
        (2.0 * self.gravity * self.max_jump_height).sqrt()
    }
}

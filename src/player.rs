use glam::{IVec2, Vec2, Vec3};
use log::debug;

use crate::{
    collision::{Contacts, collide},
    config::WorldConfig,
    renderer::MeshSink,
    voxels::VoxelWorld,
};

/// Degrees of rotation per unit of mouse movement
const MOUSE_SENSITIVITY: f32 = 0.15;

/// Movement tunables copied out of [`WorldConfig`]
#[derive(Debug, Clone, Copy, PartialEq)]
struct MovementParams {
    height: u32,
    padding: f32,
    gravity: f32,
    jump_speed: f32,
    terminal_velocity: f32,
    walking_speed: f32,
    flying_speed: f32,
    crouch_speed: f32,
    sprint_speed: f32,
    jump_speed_bonus: f32,
    max_dt: f32,
    substeps: u32,
}

impl From<&WorldConfig> for MovementParams {
    fn from(config: &WorldConfig) -> Self {
        Self {
            height: config.player_height,
            padding: config.collision_padding,
            gravity: config.gravity,
            jump_speed: config.jump_speed(),
            terminal_velocity: config.terminal_velocity,
            walking_speed: config.walking_speed,
            flying_speed: config.flying_speed,
            crouch_speed: config.crouch_speed,
            sprint_speed: config.sprint_speed,
            jump_speed_bonus: config.jump_speed_bonus,
            max_dt: config.max_dt,
            substeps: config.substeps,
        }
    }
}

pub struct Player {
    /// Top voxel of the player's body
    pub position: Vec3,
    /// Yaw and pitch in degrees. Pitch is clamped to [-90, 90].
    pub rotation: Vec2,
    pub vertical_velocity: f32,
    /// Forward (negative) / backward (positive) and left (negative) / right (positive)
    pub strafe: IVec2,
    pub flying: bool,
    pub jumping: bool,
    pub sprinting: bool,
    pub crouching: bool,
    jumped: bool,
    contacts: Contacts,
    params: MovementParams,
}

impl Player {
    pub fn new(position: Vec3, config: &WorldConfig) -> Player {
        Self {
            position,
            rotation: Vec2::ZERO,
            vertical_velocity: 0.0,
            strafe: IVec2::ZERO,
            flying: false,
            jumping: false,
            sprinting: false,
            crouching: false,
            jumped: false,
            contacts: Contacts::empty(),
            params: MovementParams::from(config),
        }
    }

    pub fn contacts(&self) -> Contacts {
        self.contacts
    }

    pub fn is_standing(&self) -> bool {
        self.contacts.contains(Contacts::STANDING)
    }

    pub fn rotate(&mut self, mouse_delta: Vec2) {
        let rotation = self.rotation + mouse_delta * MOUSE_SENSITIVITY;
        self.rotation = Vec2::new(rotation.x, rotation.y.clamp(-90.0, 90.0));
    }

    /// Unit vector the player is looking along
    pub fn sight_vector(&self) -> Vec3 {
        let yaw = (self.rotation.x - 90.0).to_radians();
        let pitch = self.rotation.y.to_radians();
        // Horizontal share shrinks when looking up or down
        let m = pitch.cos();
        Vec3::new(yaw.cos() * m, pitch.sin(), yaw.sin() * m)
    }

    /// Direction of travel for the current strafe input, zero when idle
    pub fn motion_vector(&self) -> Vec3 {
        if self.strafe == IVec2::ZERO {
            return Vec3::ZERO;
        }
        let strafe = (self.strafe.x as f32).atan2(self.strafe.y as f32);
        let yaw = self.rotation.x.to_radians() + strafe;
        if !self.flying {
            return Vec3::new(yaw.cos(), 0.0, yaw.sin());
        }
        let pitch = self.rotation.y.to_radians();
        let (mut m, mut dy) = (pitch.cos(), pitch.sin());
        if self.strafe.y != 0 {
            // Sideways flight stays level
            m = 1.0;
            dy = 0.0;
        }
        if self.strafe.x > 0 {
            dy = -dy;
        }
        Vec3::new(yaw.cos() * m, dy, yaw.sin() * m)
    }

    /// Advances the player by `dt` seconds, split into fixed substeps
    pub fn tick<S: MeshSink>(&mut self, world: &VoxelWorld<S>, dt: f32) {
        let dt = dt.min(self.params.max_dt);
        let step = dt / self.params.substeps as f32;
        for _ in 0..self.params.substeps {
            self.step(world, step);
        }
    }

    fn speed(&self) -> f32 {
        if self.flying {
            self.params.flying_speed
        } else if self.sprinting {
            self.params.sprint_speed
        } else if self.crouching {
            self.params.crouch_speed
        } else {
            self.params.walking_speed
        }
    }

    fn step<S: MeshSink>(&mut self, world: &VoxelWorld<S>, dt: f32) {
        let mut speed = self.speed();
        if self.jumping {
            if self.is_standing() {
                self.vertical_velocity = self.params.jump_speed;
                self.jumped = true;
            }
        } else if self.is_standing() {
            self.jumped = false;
        }
        if self.jumped {
            speed += self.params.jump_speed_bonus;
        }

        let mut displacement = self.motion_vector() * dt * speed;
        if !self.flying {
            self.vertical_velocity = (self.vertical_velocity - dt * self.params.gravity)
                .max(-self.params.terminal_velocity);
            displacement.y += self.vertical_velocity * dt;
        }

        let old_position = self.position;
        let outcome = collide(
            world,
            old_position + displacement,
            self.params.height,
            self.vertical_velocity,
            self.params.padding,
        );
        self.position = outcome.position;
        self.vertical_velocity = outcome.vertical_velocity;
        self.contacts = outcome.contacts;

        if old_position.x == self.position.x && old_position.z == self.position.z {
            if self.sprinting {
                debug!("Stopped sprinting at {}", self.position);
            }
            self.sprinting = false;
        }
    }
}

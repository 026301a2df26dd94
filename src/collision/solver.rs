use bitflags::bitflags;
use glam::{IVec3, Vec3};
use log::trace;

use crate::{
    renderer::MeshSink,
    voxels::{FACES, VoxelWorld, normalize},
};

bitflags! {
    /// Faces the player touched during the last collision pass
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Contacts: u8 {
        /// Resting on a block or on the world floor
        const STANDING = 1 << 0;
        /// Head against a block above
        const CEILING = 1 << 1;
        const WALL_X = 1 << 2;
        const WALL_Z = 1 << 3;
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionOutcome {
    pub position: Vec3,
    pub contacts: Contacts,
    pub vertical_velocity: f32,
}

/// Vertical velocity handed back when the player sinks below the world floor
const FLOOR_BOUNCE_VELOCITY: f32 = 1.0;

/// Pushes a player of `height` stacked voxels out of every solid block it
/// overlaps by more than `padding`.
///
/// `position` is the top voxel of the player. Faces are resolved in the fixed
/// order of [`FACES`]: top, bottom, -x, +x, +z, -z. The voxel the player
/// occupies is computed once on entry, while each overlap is measured from the
/// position as corrected by the faces before it.
pub fn collide<S: MeshSink>(
    world: &VoxelWorld<S>,
    position: Vec3,
    height: u32,
    vertical_velocity: f32,
    padding: f32,
) -> CollisionOutcome {
    debug_assert!(position.is_finite());
    let mut p = position;
    let np = normalize(position);
    let mut contacts = Contacts::empty();
    let mut vertical_velocity = vertical_velocity;

    for face in FACES {
        for axis in 0..3 {
            let dir = face[axis];
            if dir == 0 {
                continue;
            }
            let overlap = (p[axis] - np[axis] as f32) * dir as f32;
            if overlap < padding {
                continue;
            }
            for dy in 0..height as i32 {
                if np.y < 1 {
                    contacts |= Contacts::STANDING;
                    vertical_velocity = FLOOR_BOUNCE_VELOCITY;
                    break;
                }
                let mut op = np;
                op.y -= dy;
                op[axis] += dir;
                if !world.get(op).is_some_and(|kind| kind.is_solid()) {
                    continue;
                }
                trace!("Collided with {op} on face {face}");
                p[axis] -= (overlap - padding) * dir as f32;
                contacts |= face_contact(face);
                if face.y != 0 {
                    vertical_velocity = 0.0;
                }
                break;
            }
        }
    }
    CollisionOutcome {
        position: p,
        contacts,
        vertical_velocity,
    }
}

fn face_contact(face: IVec3) -> Contacts {
    match (face.x, face.y, face.z) {
        (_, -1, _) => Contacts::STANDING,
        (_, 1, _) => Contacts::CEILING,
        (0, 0, _) => Contacts::WALL_Z,
        _ => Contacts::WALL_X,
    }
}

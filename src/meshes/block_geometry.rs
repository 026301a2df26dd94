use glam::{IVec3, Vec3};

use crate::blocks::{BlockKind, FACE_UV_FLOATS, ShapeKind};

pub const VERTICES_PER_BLOCK: usize = 24;
pub const VERTEX_FLOATS: usize = VERTICES_PER_BLOCK * 3;

const HALF: f32 = 0.5;
/// Liquid surfaces sit this far below the top of the voxel
const LIQUID_TOP_DROP: f32 = 0.2;
/// Liquid bottoms sit this far above the bottom of the voxel
const LIQUID_BOTTOM_RISE: f32 = 0.8;

/// Corner signs of the axis aligned faces, ordered top, bottom, left, right, front, back
const BOX_CORNERS: [[[f32; 3]; 4]; 6] = [
    [[-1., 1., -1.], [-1., 1., 1.], [1., 1., 1.], [1., 1., -1.]],
    [[-1., -1., -1.], [1., -1., -1.], [1., -1., 1.], [-1., -1., 1.]],
    [[-1., -1., -1.], [-1., -1., 1.], [-1., 1., 1.], [-1., 1., -1.]],
    [[1., -1., 1.], [1., -1., -1.], [1., 1., -1.], [1., 1., 1.]],
    [[-1., -1., 1.], [1., -1., 1.], [1., 1., 1.], [-1., 1., 1.]],
    [[1., -1., -1.], [-1., -1., -1.], [-1., 1., -1.], [1., 1., -1.]],
];

/// Two diagonal quads, each emitted once per winding. Top and bottom stay empty.
const CROSS_CORNERS: [[[f32; 3]; 4]; 4] = [
    [[-1., -1., -1.], [1., -1., 1.], [1., 1., 1.], [-1., 1., -1.]],
    [[1., -1., 1.], [-1., -1., -1.], [-1., 1., -1.], [1., 1., 1.]],
    [[-1., -1., 1.], [1., -1., -1.], [1., 1., -1.], [-1., 1., 1.]],
    [[1., -1., -1.], [-1., -1., 1.], [-1., 1., 1.], [1., 1., -1.]],
];

/// Fixed-stride geometry of one shown block: 24 vertices and 24 UV pairs.
/// Faces a shape does not use are zeroed rather than dropped.
#[derive(Clone, Debug, PartialEq)]
pub struct BlockGeometry {
    pub vertices: [f32; VERTEX_FLOATS],
    pub tex_coords: [f32; FACE_UV_FLOATS],
}

impl BlockGeometry {
    pub fn new(position: IVec3, kind: BlockKind) -> BlockGeometry {
        let center = position.as_vec3();
        let vertices = match kind.shape() {
            ShapeKind::Cube => box_vertices(center, -HALF, HALF, 0..6),
            ShapeKind::Slab => box_vertices(center, -HALF, 0.0, 0..6),
            ShapeKind::Liquid => box_vertices(
                center,
                -HALF + LIQUID_BOTTOM_RISE,
                HALF - LIQUID_TOP_DROP,
                0..2,
            ),
            ShapeKind::Plant => cross_vertices(center),
        };
        Self {
            vertices,
            tex_coords: kind.descriptor().tex_coords,
        }
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices[..])
    }

    pub fn tex_coord_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.tex_coords[..])
    }

    pub fn vertex(&self, index: usize) -> Vec3 {
        Vec3::from_slice(&self.vertices[index * 3..index * 3 + 3])
    }
}

/// Box spanning `bottom..top` vertically around `center`. Only faces in `faces` are emitted.
fn box_vertices(
    center: Vec3,
    bottom: f32,
    top: f32,
    faces: std::ops::Range<usize>,
) -> [f32; VERTEX_FLOATS] {
    let mut res = [0.0; VERTEX_FLOATS];
    for face in faces {
        for (corner_idx, corner) in BOX_CORNERS[face].iter().enumerate() {
            let y = if corner[1] > 0.0 { top } else { bottom };
            let offset = (face * 4 + corner_idx) * 3;
            res[offset] = center.x + corner[0] * HALF;
            res[offset + 1] = center.y + y;
            res[offset + 2] = center.z + corner[2] * HALF;
        }
    }
    res
}

fn cross_vertices(center: Vec3) -> [f32; VERTEX_FLOATS] {
    let mut res = [0.0; VERTEX_FLOATS];
    for (quad_idx, quad) in CROSS_CORNERS.iter().enumerate() {
        // Faces 0 and 1 (top, bottom) stay degenerate
        let face = quad_idx + 2;
        for (corner_idx, corner) in quad.iter().enumerate() {
            let offset = (face * 4 + corner_idx) * 3;
            let vertex = center + Vec3::from_array(*corner) * HALF;
            res[offset..offset + 3].copy_from_slice(&vertex.to_array());
        }
    }
    res
}

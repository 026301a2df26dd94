/// Number of tiles per row (and column) of the square texture atlas
pub const TEXTURE_TILES_PER_ROW: u32 = 16;

/// 6 faces * 4 corners * 2 floats
pub const FACE_UV_FLOATS: usize = 48;

type Tile = (u32, u32);

/// Atlas tiles used by the faces of a block
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TextureLayout {
    /// Same tile on every face
    Uniform(Tile),
    /// Top, bottom, sides
    Sided(Tile, Tile, Tile),
    /// Top, bottom, half-height sides
    Slab(Tile, Tile, Tile),
    /// Top, bottom, left, right, front, back
    Full([Tile; 6]),
}

fn tile_uv(tile: Tile, height: f32) -> [f32; 8] {
    let m = 1.0 / TEXTURE_TILES_PER_ROW as f32;
    let dx = tile.0 as f32 * m;
    let dy = tile.1 as f32 * m;
    let h = height * m;
    [dx, dy, dx + m, dy, dx + m, dy + h, dx, dy + h]
}

impl TextureLayout {
    pub fn tex_coords(&self) -> [f32; FACE_UV_FLOATS] {
        let faces: [[f32; 8]; 6] = match *self {
            TextureLayout::Uniform(tile) => [tile_uv(tile, 1.0); 6],
            TextureLayout::Sided(top, bottom, side) => {
                let side = tile_uv(side, 1.0);
                [tile_uv(top, 1.0), tile_uv(bottom, 1.0), side, side, side, side]
            }
            TextureLayout::Slab(top, bottom, side) => {
                let side = tile_uv(side, 0.5);
                [tile_uv(top, 1.0), tile_uv(bottom, 1.0), side, side, side, side]
            }
            TextureLayout::Full(tiles) => tiles.map(|tile| tile_uv(tile, 1.0)),
        };
        let mut res = [0.0; FACE_UV_FLOATS];
        for (chunk, face) in res.chunks_exact_mut(8).zip(faces.iter()) {
            chunk.copy_from_slice(face);
        }
        res
    }
}

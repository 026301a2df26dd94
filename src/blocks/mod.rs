mod kind;
mod properties;
mod textures;

pub use kind::BlockKind;
pub use properties::BlockDescriptor;
pub use properties::BlockFlags;
pub use properties::ShapeKind;
pub use textures::FACE_UV_FLOATS;
pub use textures::TEXTURE_TILES_PER_ROW;
pub use textures::TextureLayout;

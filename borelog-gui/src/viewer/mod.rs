//! Visualization modules for the composite figure.

pub mod annotations;
pub mod bands;
pub mod photos;
mod textures;

pub use textures::TextureStore;

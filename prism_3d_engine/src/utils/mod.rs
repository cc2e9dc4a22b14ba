//! Small containers shared by the scene and renderer modules

mod array_cache;

pub use array_cache::ArrayCache;

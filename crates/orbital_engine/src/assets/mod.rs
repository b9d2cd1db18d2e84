//! Asset loading and caching
//!
//! The renderer and components consume assets through opaque handles; this
//! module owns the path-keyed texture cache that produces them. Loads are
//! synchronous, happen once, and degrade to a sentinel handle on failure.

mod texture_cache;

pub use texture_cache::{
    AssetError, CubemapFaces, TextureCache, TextureHandle, TextureOptions, TextureRecord,
};

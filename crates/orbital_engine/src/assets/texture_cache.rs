//! Texture cache keyed by asset path
//!
//! Components request textures by file path and receive an opaque
//! [`TextureHandle`]. A failed load is logged once, cached as
//! [`TextureHandle::NOT_LOADED`], and never retried; consumers render
//! without the texture rather than failing.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Asset loading errors
#[derive(Debug, Error)]
pub enum AssetError {
    /// An image file could not be read or decoded.
    #[error("failed to read image {path}: {source}")]
    ImageLoad {
        /// Path of the image that failed
        path: PathBuf,
        /// Underlying decoder error
        #[source]
        source: image::ImageError,
    },

    /// One of a cubemap's six faces was missing.
    #[error("cubemap face missing: {path}")]
    CubemapFaceMissing {
        /// Path of the missing face
        path: PathBuf,
    },
}

/// Opaque handle to a cached texture.
///
/// Handle `0` is the "not loaded" sentinel; everything that consumes a
/// handle must be prepared to receive it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(u32);

impl TextureHandle {
    /// Sentinel returned when a texture failed to load.
    pub const NOT_LOADED: Self = Self(0);

    /// Handle wrapping a raw id, for backends that mint their own handles.
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Whether this handle refers to actual texture data.
    pub fn is_loaded(self) -> bool {
        self.0 != 0
    }
}

/// Loading options applied when a texture is first decoded.
#[derive(Debug, Clone, Copy)]
pub struct TextureOptions {
    /// Request mipmap generation from the device that uploads this texture
    pub generate_mipmaps: bool,
    /// Flip the image vertically at decode time
    pub flip_vertical: bool,
    /// Flip the image horizontally at decode time
    pub flip_horizontal: bool,
}

impl Default for TextureOptions {
    fn default() -> Self {
        Self {
            generate_mipmaps: true,
            flip_vertical: false,
            flip_horizontal: false,
        }
    }
}

/// Decoded texture data tracked by the cache.
pub struct TextureRecord {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Tightly packed RGBA8 pixel data
    pub pixels: Vec<u8>,
    /// Options the texture was decoded with
    pub options: TextureOptions,
}

/// Six face paths of a cubemap in +X, -X, +Y, -Y, +Z, -Z order.
pub type CubemapFaces = [PathBuf; 6];

/// Caches decoded textures keyed by asset path.
#[derive(Default)]
pub struct TextureCache {
    lookup: HashMap<PathBuf, TextureHandle>,
    records: HashMap<TextureHandle, TextureRecord>,
    next_id: u32,
}

impl TextureCache {
    /// Create a new empty cache
    pub fn new() -> Self {
        Self {
            lookup: HashMap::new(),
            records: HashMap::new(),
            next_id: 1,
        }
    }

    /// Returns the cached handle for `path` or decodes the file on first use.
    ///
    /// A load failure is logged, cached as [`TextureHandle::NOT_LOADED`] so
    /// it is not retried, and returned to the caller.
    pub fn get_texture_2d(&mut self, path: &Path, options: TextureOptions) -> TextureHandle {
        if let Some(handle) = self.lookup.get(path) {
            return *handle;
        }

        let handle = match Self::decode(path, options) {
            Ok(record) => {
                let handle = self.allocate();
                log::info!(
                    "TextureCache: loaded {} ({}x{})",
                    path.display(),
                    record.width,
                    record.height
                );
                self.records.insert(handle, record);
                handle
            }
            Err(err) => {
                log::warn!("TextureCache: {err}; rendering without this texture");
                TextureHandle::NOT_LOADED
            }
        };

        self.lookup.insert(path.to_path_buf(), handle);
        handle
    }

    /// Loads all six cubemap faces; any missing face degrades the whole
    /// cubemap to [`TextureHandle::NOT_LOADED`].
    pub fn get_cubemap(&mut self, faces: &CubemapFaces) -> TextureHandle {
        let options = TextureOptions {
            generate_mipmaps: false,
            ..TextureOptions::default()
        };

        let mut face_handles = [TextureHandle::NOT_LOADED; 6];
        for (slot, path) in face_handles.iter_mut().zip(faces.iter()) {
            *slot = self.get_texture_2d(path, options);
        }

        if face_handles.iter().any(|handle| !handle.is_loaded()) {
            log::warn!("TextureCache: cubemap incomplete; skybox will not be rendered");
            return TextureHandle::NOT_LOADED;
        }

        // The cubemap itself gets a fresh handle; the faces stay cached
        // individually so the uploading device can fetch their pixels.
        self.allocate()
    }

    /// Returns the decoded data behind a handle, if any.
    pub fn record(&self, handle: TextureHandle) -> Option<&TextureRecord> {
        self.records.get(&handle)
    }

    /// Number of distinct paths the cache has answered for.
    pub fn len(&self) -> usize {
        self.lookup.len()
    }

    /// Whether the cache has answered for any path yet.
    pub fn is_empty(&self) -> bool {
        self.lookup.is_empty()
    }

    /// Drops every cached texture.
    pub fn clear(&mut self) {
        self.lookup.clear();
        self.records.clear();
    }

    fn allocate(&mut self) -> TextureHandle {
        let handle = TextureHandle(self.next_id);
        self.next_id += 1;
        handle
    }

    fn decode(path: &Path, options: TextureOptions) -> Result<TextureRecord, AssetError> {
        let mut decoded = image::open(path).map_err(|source| AssetError::ImageLoad {
            path: path.to_path_buf(),
            source,
        })?;

        if options.flip_vertical {
            decoded = decoded.flipv();
        }
        if options.flip_horizontal {
            decoded = decoded.fliph();
        }

        let rgba = decoded.to_rgba8();
        Ok(TextureRecord {
            width: rgba.width(),
            height: rgba.height(),
            pixels: rgba.into_raw(),
            options,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_texture_returns_sentinel_without_panicking() {
        let mut cache = TextureCache::new();
        let handle = cache.get_texture_2d(
            Path::new("assets/textures/does_not_exist.png"),
            TextureOptions::default(),
        );
        assert_eq!(handle, TextureHandle::NOT_LOADED);
        assert!(!handle.is_loaded());
    }

    #[test]
    fn failed_load_is_cached_and_not_retried() {
        let mut cache = TextureCache::new();
        let path = Path::new("assets/textures/does_not_exist.png");
        cache.get_texture_2d(path, TextureOptions::default());
        cache.get_texture_2d(path, TextureOptions::default());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn incomplete_cubemap_degrades_to_sentinel() {
        let mut cache = TextureCache::new();
        let faces: CubemapFaces = std::array::from_fn(|i| {
            PathBuf::from(format!("assets/skybox/missing_face_{i}.png"))
        });
        assert_eq!(cache.get_cubemap(&faces), TextureHandle::NOT_LOADED);
    }

    #[test]
    fn sentinel_has_no_record() {
        let cache = TextureCache::new();
        assert!(cache.record(TextureHandle::NOT_LOADED).is_none());
    }
}

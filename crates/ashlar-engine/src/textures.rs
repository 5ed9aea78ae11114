//! Texture ownership: CPU-side RGBA images referenced by draw commands.
//!
//! The store is owned by the application (the Resource Owner, alongside
//! [`crate::text::FontSystem`]); backends borrow it read-only and convert or
//! upload entries lazily in whatever form their surface needs.

use std::fmt;

/// Error returned by [`TextureStore::add_rgba8`].
#[derive(Debug, Clone)]
pub struct TextureError(pub String);

impl fmt::Display for TextureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "texture error: {}", self.0)
    }
}

impl std::error::Error for TextureError {}

/// Opaque handle to a texture in a [`TextureStore`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TextureId(pub(crate) usize);

/// Decoded straight-alpha RGBA8 image, row-major, tightly packed.
#[derive(Debug, Clone)]
pub struct TextureData {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl TextureData {
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw pixel bytes, `width * height * 4` long.
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

/// Owns decoded images for the lifetime of the application.
#[derive(Debug, Default)]
pub struct TextureStore {
    textures: Vec<TextureData>,
}

impl TextureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a straight-alpha RGBA8 image and returns its handle.
    pub fn add_rgba8(
        &mut self,
        width: u32,
        height: u32,
        pixels: Vec<u8>,
    ) -> Result<TextureId, TextureError> {
        let expected = width as usize * height as usize * 4;
        if width == 0 || height == 0 {
            return Err(TextureError(format!("zero-sized texture {width}x{height}")));
        }
        if pixels.len() != expected {
            return Err(TextureError(format!(
                "pixel buffer is {} bytes, expected {expected} for {width}x{height} RGBA8",
                pixels.len()
            )));
        }

        let id = TextureId(self.textures.len());
        self.textures.push(TextureData { width, height, pixels });
        Ok(id)
    }

    pub fn get(&self, id: TextureId) -> Option<&TextureData> {
        self.textures.get(id.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_get_round_trip() {
        let mut store = TextureStore::new();
        let id = store.add_rgba8(2, 2, vec![255u8; 16]).unwrap();
        let tex = store.get(id).unwrap();
        assert_eq!((tex.width(), tex.height()), (2, 2));
        assert_eq!(tex.pixels().len(), 16);
    }

    #[test]
    fn mismatched_buffer_length_is_rejected() {
        let mut store = TextureStore::new();
        assert!(store.add_rgba8(2, 2, vec![0u8; 15]).is_err());
    }

    #[test]
    fn zero_size_is_rejected() {
        let mut store = TextureStore::new();
        assert!(store.add_rgba8(0, 4, Vec::new()).is_err());
    }
}

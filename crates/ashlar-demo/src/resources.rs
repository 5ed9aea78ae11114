//! Resource loading: the demo's Resource Owner.
//!
//! Fonts and textures are loaded once at startup and owned here; everything
//! downstream works with `FontId`/`TextureId` handles and read-only borrows.

use anyhow::{Context, Result};
use ashlar_engine::text::{FontId, FontSystem};
use ashlar_engine::textures::{TextureId, TextureStore};

/// Candidate font paths: a project-local font first, then common system
/// locations.
const FONT_PATHS: &[&str] = &[
    "resources/Roboto-Regular.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
];

pub struct Resources {
    pub fonts: FontSystem,
    pub textures: TextureStore,
    pub body_font: FontId,
    pub profile_picture: TextureId,
}

pub fn load() -> Result<Resources> {
    let mut fonts = FontSystem::new();
    let bytes = font_bytes().with_context(|| {
        format!(
            "no usable UI font found; place a TTF at {} or install DejaVu/Noto Sans",
            FONT_PATHS[0]
        )
    })?;
    let body_font = fonts.load_font(&bytes).context("failed to parse UI font")?;

    let mut textures = TextureStore::new();
    let (w, h, pixels) = match load_profile_picture() {
        Ok(decoded) => decoded,
        Err(e) => {
            log::warn!("profile picture unavailable ({e:#}); using placeholder");
            placeholder_picture()
        }
    };
    let profile_picture = textures
        .add_rgba8(w, h, pixels)
        .context("failed to store profile picture")?;

    Ok(Resources { fonts, textures, body_font, profile_picture })
}

fn font_bytes() -> Option<Vec<u8>> {
    FONT_PATHS.iter().find_map(|p| std::fs::read(p).ok())
}

fn load_profile_picture() -> Result<(u32, u32, Vec<u8>)> {
    let img = image::open("resources/profile-picture.png")
        .context("open resources/profile-picture.png")?
        .to_rgba8();
    Ok((img.width(), img.height(), img.into_raw()))
}

/// 64×64 avatar stand-in: a light disc with a darker ring, transparent
/// corners. Keeps the demo runnable without any bundled assets.
fn placeholder_picture() -> (u32, u32, Vec<u8>) {
    const SIZE: u32 = 64;
    let center = (SIZE - 1) as f32 / 2.0;
    let radius = center;

    let mut pixels = Vec::with_capacity((SIZE * SIZE * 4) as usize);
    for y in 0..SIZE {
        for x in 0..SIZE {
            let dx = x as f32 - center;
            let dy = y as f32 - center;
            let d = (dx * dx + dy * dy).sqrt();
            let rgba: [u8; 4] = if d > radius {
                [0, 0, 0, 0]
            } else if d > radius - 3.0 {
                [60, 60, 120, 255]
            } else {
                [235, 220, 190, 255]
            };
            pixels.extend_from_slice(&rgba);
        }
    }
    (SIZE, SIZE, pixels)
}

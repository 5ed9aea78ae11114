//! Ashlar engine crate.
//!
//! Turns per-frame draw-command lists (produced by a layout engine) into
//! pixels. The geometry builder in [`tessellate`] converts rounded shapes
//! into anti-aliased triangle meshes; the [`render`] dispatcher walks the
//! command stream and routes each command to a [`backend::Backend`].

pub mod backend;
pub mod coords;
pub mod logging;
pub mod mesh;
pub mod paint;
pub mod render;
pub mod scene;
pub mod tessellate;
pub mod text;
pub mod textures;

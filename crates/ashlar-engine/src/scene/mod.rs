//! Scene (draw stream) types.
//!
//! A frame's scene is an ordered command list produced by the layout engine:
//! back-to-front paint order with balanced clip markers. The list is consumed
//! once per frame by [`crate::render::Dispatcher`] and never persisted.

mod cmd;
mod list;

pub use cmd::{CommandData, DrawCommand};
pub use list::CommandList;

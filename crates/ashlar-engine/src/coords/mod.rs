//! Coordinate and geometry types shared by the scene model, the geometry
//! builder, and the backends.
//!
//! Canonical space:
//! - Logical pixels
//! - Origin top-left
//! - +X right, +Y down
//!
//! Backends convert to their native space (NDC, physical pixels) themselves.

mod border_widths;
mod corner_radius;
mod rect;
mod vec2;
mod viewport;

pub use border_widths::BorderWidths;
pub use corner_radius::CornerRadius;
pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::Viewport;

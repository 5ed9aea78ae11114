//! Frame rendering: the command dispatcher.
//!
//! Consumes one frame's draw stream in paint order and issues calls against a
//! [`crate::backend::Backend`]. Rounded shapes route through
//! [`crate::tessellate`]; everything else maps to a direct primitive call.

mod dispatcher;

pub use dispatcher::Dispatcher;

//! Terminal rendering for the widgets.
//!
//! The snake grid is first painted onto a [`Canvas`] bitmap; the terminal view is a
//! projection of that bitmap.

pub mod canvas;
pub mod renderer;
pub mod todo;

pub use canvas::{Canvas, Rgb};
pub use renderer::{status_text, Renderer, SnakeFrame};
pub use todo::{TodoFrame, TodoView};

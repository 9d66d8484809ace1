//! Render-request emission
//!
//! Produces draw requests as plain data; rasterizing them is the platform's
//! concern.

pub mod colors;
pub mod frame;

pub use frame::{DrawCommand, Frame, build_frame, hud_lines};

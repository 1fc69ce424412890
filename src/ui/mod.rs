//! Terminal front-end: the gate decides which screen a session state maps to,
//! `render` turns screens into text.

pub mod gate;
pub mod render;

pub use gate::{View, gate};

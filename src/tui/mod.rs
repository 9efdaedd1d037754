//! Terminal front end.
//!
//! `app` drives the full-screen session, `screen` paints frames, `keymap`
//! and `confirm` interpret key presses, and `line_mode` serves piped input.

pub mod app;
pub mod confirm;
pub mod keymap;
pub mod line_mode;
pub mod screen;
pub mod settings;

pub use app::{run, Session, Step};
pub use keymap::{map_key, KeyAction};

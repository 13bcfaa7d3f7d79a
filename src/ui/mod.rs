pub mod navigation;
pub mod render;

pub use navigation::{MenuItem, Navigator, Screen};
pub use render::{render_screen, render_story};

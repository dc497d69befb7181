pub mod nametag_renderer;

pub use nametag_renderer::{CommandRenderer, NametagRenderer};

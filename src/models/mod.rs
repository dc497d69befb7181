pub mod job;
pub mod loaders;
pub mod roster;

pub use job::NametagJob;
pub use loaders::load_roster;
pub use roster::{RosterLine, RosterRow};

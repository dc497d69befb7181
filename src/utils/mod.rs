pub mod filename;
pub mod logging;

pub use filename::sanitize_filename;

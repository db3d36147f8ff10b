pub mod image_io;
pub mod persist;

pub use image_io::{load_source_image, save_image};
pub use persist::{load_config, load_state, save_config, save_state};

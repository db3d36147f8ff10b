pub mod raster;
pub mod worker;

pub use raster::{output_size, render_crop, SourceImage};
pub use worker::{spawn_render, RenderJob};

pub mod angle;
pub mod aspect;
pub mod config;
pub mod consts;
pub mod cropper;
pub mod error;
pub mod geometry;
pub mod io;
pub mod orientation;
pub mod render;
pub mod session;
pub mod stasis;
pub mod state;
pub mod viewport;

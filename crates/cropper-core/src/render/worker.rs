use std::sync::mpsc;
use std::sync::Arc;
use std::thread;

use image::DynamicImage;
use tracing::debug;

use crate::config::RenderConfig;
use crate::error::{CropError, Result};
use crate::state::CropState;

use super::raster::{render_crop, SourceImage};

/// A crop being rendered on a background thread.
pub struct RenderJob {
    rx: mpsc::Receiver<DynamicImage>,
    handle: Option<thread::JoinHandle<()>>,
}

/// Render `state` from `image` on a dedicated thread.
///
/// The image is shared read-only; the state and config are moved in, so the
/// job never touches the live session.
pub fn spawn_render(
    image: Arc<SourceImage>,
    state: CropState,
    config: RenderConfig,
) -> Result<RenderJob> {
    let (tx, rx) = mpsc::channel();
    let handle = thread::Builder::new()
        .name("cropper-render".into())
        .spawn(move || {
            let out = render_crop(&image, &state, &config);
            debug!(width = out.width(), height = out.height(), "Render job finished");
            let _ = tx.send(out);
        })?;
    Ok(RenderJob {
        rx,
        handle: Some(handle),
    })
}

impl RenderJob {
    /// Block until the image is ready.
    pub fn wait(mut self) -> Result<DynamicImage> {
        let result = self.rx.recv();
        if let Some(handle) = self.handle.take() {
            handle
                .join()
                .map_err(|_| CropError::RenderWorker("render thread panicked".into()))?;
        }
        result.map_err(|_| CropError::RenderWorker("render thread exited without a result".into()))
    }

    /// The image, if the render already finished.
    pub fn try_result(&mut self) -> Option<DynamicImage> {
        let out = self.rx.try_recv().ok()?;
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
        Some(out)
    }
}

use image::{DynamicImage, GenericImageView, RgbaImage};
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::config::RenderConfig;
use crate::consts::{OUTPUT_CHANNEL_COUNT, PARALLEL_PIXEL_THRESHOLD};
use crate::geometry::{Affine, Point, Size};
use crate::orientation::ImageOrientation;
use crate::state::CropState;

/// Decoded pixels plus the orientation they are stored in.
#[derive(Clone, Debug)]
pub struct SourceImage {
    pub pixels: DynamicImage,
    pub orientation: ImageOrientation,
}

impl SourceImage {
    pub fn new(pixels: DynamicImage, orientation: ImageOrientation) -> Self {
        Self {
            pixels,
            orientation,
        }
    }

    /// Size once the stored orientation is applied.
    pub fn display_size(&self) -> Size {
        let (w, h) = self.pixels.dimensions();
        let size = Size::new(w as f64, h as f64);
        if self.orientation.swaps_axes() {
            size.transposed()
        } else {
            size
        }
    }
}

/// Output pixel size for a crop, before truncation to whole pixels.
pub fn output_size(state: &CropState, source: Size, config: &RenderConfig) -> Size {
    let crop = state.crop_box.size;
    let x_scale = state.image_transform.x_scale();
    let width = crop.width * source.width / (state.image_bounds_size.width * x_scale);
    let width = width.min(config.max_output_width(crop.width, crop.height));
    Size::new(width, width * crop.height / crop.width)
}

/// Render the crop described by `state` from `image`.
///
/// The state's orientation is applied to the pixels first. Each output pixel is
/// then mapped back through the crop transform (translation, total rotation,
/// zoom) and takes the nearest source pixel; anything outside the image is
/// transparent. Output is RGBA8.
///
/// Never fails: a degenerate state returns the image unchanged, and an output
/// that cannot be allocated falls back to the oriented, uncropped image.
pub fn render_crop(image: &SourceImage, state: &CropState, config: &RenderConfig) -> DynamicImage {
    let (w, h) = image.pixels.dimensions();
    if w <= 1
        || h <= 1
        || state.surface_frame.width() <= 1.0
        || state.surface_frame.height() <= 1.0
    {
        debug!(width = w, height = h, "Degenerate crop input, returning the image unchanged");
        return image.pixels.clone();
    }

    let oriented = state.image_orientation.apply(&image.pixels);
    let source = Size::new(oriented.width() as f64, oriented.height() as f64);

    let crop = state.crop_box.size;
    let bounds = state.image_bounds_size;
    if !crop.is_valid() || !bounds.is_valid() {
        warn!("Crop state has an empty crop box, returning the oriented image");
        return oriented;
    }

    let t = &state.image_transform;
    let transform = Affine::translation(state.image_translation.x, state.image_translation.y)
        .rotated(state.angle)
        .scaled(t.x_scale(), t.y_scale());
    let Some(inverse) = transform.invert() else {
        warn!("Crop transform is not invertible, returning the oriented image");
        return oriented;
    };

    let size = output_size(state, source, config);
    let out_w = size.width as u32;
    let out_h = size.height as u32;
    if out_w == 0 || out_h == 0 {
        warn!(out_w, out_h, "Empty output size, returning the oriented image");
        return oriented;
    }

    let row_len = out_w as usize * OUTPUT_CHANNEL_COUNT;
    let Some(len) = row_len.checked_mul(out_h as usize) else {
        warn!(out_w, out_h, "Output size overflows, returning the oriented image");
        return oriented;
    };
    let mut buf: Vec<u8> = Vec::new();
    if buf.try_reserve_exact(len).is_err() {
        warn!(out_w, out_h, "Cannot allocate output buffer, returning the oriented image");
        return oriented;
    }
    buf.resize(len, 0);

    let src = oriented.to_rgba8();
    let sampler = Sampler {
        src: &src,
        inverse,
        crop,
        bounds,
        out: Size::new(out_w as f64, out_h as f64),
    };

    if (out_w as usize) * (out_h as usize) >= PARALLEL_PIXEL_THRESHOLD {
        buf.par_chunks_mut(row_len)
            .enumerate()
            .for_each(|(v, row)| sampler.fill_row(v, row));
    } else {
        buf.chunks_mut(row_len)
            .enumerate()
            .for_each(|(v, row)| sampler.fill_row(v, row));
    }

    debug!(out_w, out_h, angle = state.angle, "Rendered crop");

    match RgbaImage::from_raw(out_w, out_h, buf) {
        Some(img) => DynamicImage::ImageRgba8(img),
        None => oriented,
    }
}

/// Maps output pixels back into the oriented source.
struct Sampler<'a> {
    src: &'a RgbaImage,
    inverse: Affine,
    crop: Size,
    bounds: Size,
    out: Size,
}

impl Sampler<'_> {
    fn fill_row(&self, v: usize, row: &mut [u8]) {
        let (src_w, src_h) = self.src.dimensions();
        let y = (v as f64 + 0.5) * self.crop.height / self.out.height - self.crop.height / 2.0;

        for (u, px) in row.chunks_exact_mut(OUTPUT_CHANNEL_COUNT).enumerate() {
            let x = (u as f64 + 0.5) * self.crop.width / self.out.width - self.crop.width / 2.0;
            let q = self.inverse.apply(Point::new(x, y));
            let sx = ((q.x + self.bounds.width / 2.0) * src_w as f64 / self.bounds.width).floor();
            let sy = ((q.y + self.bounds.height / 2.0) * src_h as f64 / self.bounds.height).floor();
            if sx >= 0.0 && sy >= 0.0 && sx < src_w as f64 && sy < src_h as f64 {
                px.copy_from_slice(&self.src.get_pixel(sx as u32, sy as u32).0);
            }
        }
    }
}

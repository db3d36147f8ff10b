use serde::{Deserialize, Serialize};

use crate::geometry::{Affine, Point, Rect, Size};

/// Headless model of the zoomable, rotatable scroll surface that hosts the image.
///
/// The viewport is a rectangle of `bounds_size` centered at `center` (surface
/// coordinates), rotated by `transform` about its center. Inside it, the image
/// content of `image_bounds_size * zoom_scale` is scrolled so that content point
/// `content_offset` sits at the viewport's top-left corner.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub center: Point,
    pub bounds_size: Size,
    pub content_offset: Point,
    pub zoom_scale: f64,
    pub min_zoom_scale: f64,
    pub max_zoom_scale: f64,
    pub transform: Affine,
    /// Image size at zoom 1.
    pub image_bounds_size: Size,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            center: Point::ZERO,
            bounds_size: Size::ZERO,
            content_offset: Point::ZERO,
            zoom_scale: 1.0,
            min_zoom_scale: 1.0,
            max_zoom_scale: 1.0,
            transform: Affine::IDENTITY,
            image_bounds_size: Size::ZERO,
        }
    }
}

impl Viewport {
    pub fn content_size(&self) -> Size {
        self.image_bounds_size.scaled(self.zoom_scale)
    }

    /// Scroll bounds: origin is the content offset.
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.content_offset, self.bounds_size)
    }

    /// Smallest zoom at which the content fills the bounds on both axes.
    pub fn zoom_scale_to_bounds(&self) -> f64 {
        let sw = self.bounds_size.width / self.image_bounds_size.width;
        let sh = self.bounds_size.height / self.image_bounds_size.height;
        sw.max(sh)
    }

    /// Widen the zoom range so that `zoom` is allowed.
    pub fn expand_zoom_range(&mut self, zoom: f64) {
        if zoom > self.max_zoom_scale {
            self.max_zoom_scale = zoom;
        }
        if zoom < self.min_zoom_scale {
            self.min_zoom_scale = zoom;
        }
    }

    /// Set the zoom, clamped to the current range.
    pub fn set_zoom_scale(&mut self, zoom: f64) {
        if zoom.is_finite() {
            self.zoom_scale = zoom.clamp(self.min_zoom_scale, self.max_zoom_scale);
        }
    }

    /// Clamp an offset so the content never scrolls past its edges.
    pub fn safe_content_offset(&self, offset: Point) -> Point {
        let content = self.content_size();
        let mut safe = Point::new(offset.x.max(0.0), offset.y.max(0.0));
        if content.height - safe.y <= self.bounds_size.height {
            safe.y = content.height - self.bounds_size.height;
        }
        if content.width - safe.x <= self.bounds_size.width {
            safe.x = content.width - self.bounds_size.width;
        }
        safe
    }

    /// Center of the visible part of the content, in content coordinates.
    pub fn visible_content_center(&self) -> Point {
        Point::new(
            self.content_offset.x + self.bounds_size.width / 2.0,
            self.content_offset.y + self.bounds_size.height / 2.0,
        )
    }

    /// Visible content center divided by the content size.
    pub fn normalized_visible_center(&self) -> Point {
        let c = self.visible_content_center();
        let content = self.content_size();
        Point::new(c.x / content.width, c.y / content.height)
    }

    /// Offset that puts the normalized content point `n` at the viewport center.
    pub fn offset_for_normalized_center(&self, n: Point) -> Point {
        let content = self.content_size();
        Point::new(
            n.x * content.width - self.bounds_size.width / 2.0,
            n.y * content.height - self.bounds_size.height / 2.0,
        )
    }

    pub fn surface_to_content(&self, p: Point) -> Point {
        let local = self
            .transform
            .invert()
            .unwrap_or(Affine::IDENTITY)
            .apply_vector(Point::new(p.x - self.center.x, p.y - self.center.y));
        Point::new(
            local.x + self.bounds_size.width / 2.0 + self.content_offset.x,
            local.y + self.bounds_size.height / 2.0 + self.content_offset.y,
        )
    }

    pub fn content_to_surface(&self, q: Point) -> Point {
        let local = Point::new(
            q.x - self.content_offset.x - self.bounds_size.width / 2.0,
            q.y - self.content_offset.y - self.bounds_size.height / 2.0,
        );
        let v = self.transform.apply_vector(local);
        Point::new(self.center.x + v.x, self.center.y + v.y)
    }

    /// Surface point in unzoomed image coordinates.
    pub fn surface_to_image(&self, p: Point) -> Point {
        let q = self.surface_to_content(p);
        Point::new(q.x / self.zoom_scale, q.y / self.zoom_scale)
    }

    pub fn image_center_in_surface(&self) -> Point {
        let content = self.content_size();
        self.content_to_surface(Point::new(content.width / 2.0, content.height / 2.0))
    }

    /// Whether every corner of `rect` (surface coordinates) lands on image content.
    pub fn covers(&self, rect: &Rect, eps: f64) -> bool {
        let content = self.content_size();
        rect.corners().iter().all(|&c| {
            let q = self.surface_to_content(c);
            q.x >= -eps && q.y >= -eps && q.x <= content.width + eps && q.y <= content.height + eps
        })
    }
}

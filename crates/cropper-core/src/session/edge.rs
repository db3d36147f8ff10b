//! Crop box resizing by dragging an edge or a corner.

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect, Size};

use super::EditSession;

/// The part of the crop box a drag started on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CropBoxEdge {
    #[default]
    None,
    Left,
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
}

impl CropBoxEdge {
    /// Edge or corner under `point`. The crop box is grown by half the hot
    /// area on every side, and `hot_area`-wide bands run along its inside;
    /// corner squares win over edge bands.
    pub fn hit_test(crop_box: &Rect, point: Point, hot_area: f64) -> Self {
        let frame = crop_box.inset_by(-hot_area / 2.0, -hot_area / 2.0);
        let hot = Size::new(hot_area, hot_area);
        let left_x = frame.min_x();
        let right_x = frame.max_x() - hot_area;
        let top_y = frame.min_y();
        let bottom_y = frame.max_y() - hot_area;

        let corners = [
            (Point::new(left_x, top_y), Self::TopLeft),
            (Point::new(right_x, top_y), Self::TopRight),
            (Point::new(left_x, bottom_y), Self::BottomLeft),
            (Point::new(right_x, bottom_y), Self::BottomRight),
        ];
        for (origin, edge) in corners {
            if Rect::from_origin_size(origin, hot).contains(point) {
                return edge;
            }
        }

        let horizontal = Size::new(frame.width(), hot_area);
        let vertical = Size::new(hot_area, frame.height());
        let bands = [
            (Rect::from_origin_size(Point::new(left_x, top_y), horizontal), Self::Top),
            (Rect::from_origin_size(Point::new(left_x, bottom_y), horizontal), Self::Bottom),
            (Rect::from_origin_size(Point::new(left_x, top_y), vertical), Self::Left),
            (Rect::from_origin_size(Point::new(right_x, top_y), vertical), Self::Right),
        ];
        bands
            .iter()
            .find(|(band, _)| band.contains(point))
            .map(|&(_, edge)| edge)
            .unwrap_or(Self::None)
    }

    pub fn is_corner(self) -> bool {
        matches!(
            self,
            Self::TopLeft | Self::TopRight | Self::BottomLeft | Self::BottomRight
        )
    }
}

/// Whether a touch at `point` may start a resize: it must land in the ring
/// between the crop box shrunk and grown by half the hot area.
pub fn in_hot_ring(crop_box: &Rect, point: Point, hot_area: f64) -> bool {
    let d = hot_area / 2.0;
    let inner = crop_box.inset_by(d, d);
    let outer = crop_box.inset_by(-d, -d);
    outer.contains(point) && !inner.contains(point)
}

/// A resize in progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeDrag {
    pub start_point: Point,
    pub edge: CropBoxEdge,
    pub start_frame: Rect,
}

impl EdgeDrag {
    /// Start a drag at `point`, or `None` when the touch is outside the hot ring.
    pub fn begin(session: &EditSession, point: Point, hot_area: f64) -> Option<Self> {
        if !in_hot_ring(&session.crop_box, point, hot_area) {
            return None;
        }
        Some(Self {
            start_point: point,
            edge: CropBoxEdge::hit_test(&session.crop_box, point, hot_area),
            start_frame: session.crop_box,
        })
    }

    /// Crop box for the finger at `point`, already passed through the safe setter.
    pub fn frame_for_point(&self, session: &EditSession, point: Point) -> Rect {
        let region = session.max_crop_region;
        let point = Point::new(point.x.max(region.min_x()), point.y.max(region.min_y()));
        let dx = point.x - self.start_point.x;
        let dy = point.y - self.start_point.y;

        let frame = match session.locked_ratio() {
            Some(ratio) => self.locked_frame(session, dx, dy, ratio),
            None => self.free_frame(session, dx, dy),
        };
        session.safe_crop_box_frame(frame)
    }

    /// Apply the drag to the session's crop box.
    pub fn update(&self, session: &mut EditSession, point: Point) {
        if self.edge == CropBoxEdge::None {
            return;
        }
        session.crop_box = self.frame_for_point(session, point);
    }

    fn free_frame(&self, session: &EditSession, dx: f64, dy: f64) -> Rect {
        let o = self.start_frame;
        let region = session.max_crop_region;
        let min = session.min_crop_box_size;
        let mut f = o;

        match self.edge {
            CropBoxEdge::Left => {
                f.origin.x = o.min_x() + dx;
                f.size.width = (o.width() - dx).max(min);
            }
            CropBoxEdge::Right => {
                f.size.width = o.width() + dx;
            }
            CropBoxEdge::Top => {
                f.origin.y = o.min_y() + dy;
                f.size.height = o.height() - dy;
            }
            CropBoxEdge::Bottom => {
                f.size.height = o.height() + dy;
            }
            CropBoxEdge::TopLeft => {
                f.origin.x = o.min_x() + dx;
                f.size.width = o.width() - dx;
                f.origin.y = o.min_y() + dy;
                f.size.height = o.height() - dy;
            }
            CropBoxEdge::TopRight => {
                f.size.width = o.width() + dx;
                f.origin.y = o.min_y() + dy;
                f.size.height = o.height() - dy;
            }
            CropBoxEdge::BottomLeft => {
                f.size.height = o.height() + dy;
                f.origin.x = o.min_x() + dx;
                f.size.width = o.width() - dx;
            }
            CropBoxEdge::BottomRight => {
                f.size.height = o.height() + dy;
                f.size.width = o.width() + dx;
            }
            CropBoxEdge::None => {}
        }

        f.size.width = f.size.width.max(min).min(region.width());
        f.size.height = f.size.height.max(min).min(region.height());

        // The dragged side may not cross the far side of the starting box.
        f.origin.x = f
            .origin
            .x
            .max(region.min_x())
            .min(region.max_x() - min)
            .min(o.max_x() - min);
        f.origin.y = f
            .origin
            .y
            .max(region.min_y())
            .min(region.max_y() - min)
            .min(o.max_y() - min);
        f
    }

    /// Locked-ratio resize: a width is chosen from the drag, clamped so that the
    /// box keeps its ratio, stays at least the minimum size and fits in the
    /// region when grown from its anchor (the opposite edge or corner).
    fn locked_frame(&self, session: &EditSession, dx: f64, dy: f64, ratio: f64) -> Rect {
        let o = self.start_frame;
        let region = session.max_crop_region;
        let min = session.min_crop_box_size;

        // Distance to the region border from the anchor, per side
        let room_left = |x: f64| x - region.min_x();
        let room_right = |x: f64| region.max_x() - x;
        let room_up = |y: f64| y - region.min_y();
        let room_down = |y: f64| region.max_y() - y;
        let room_around_x = |x: f64| 2.0 * room_left(x).min(room_right(x));
        let room_around_y = |y: f64| 2.0 * room_up(y).min(room_down(y));

        // (desired width, anchor, available width, available height)
        let (desired, anchor, avail_w, avail_h) = match self.edge {
            CropBoxEdge::Left => {
                let a = Point::new(o.max_x(), o.mid_y());
                (o.width() - dx, a, room_left(a.x), room_around_y(a.y))
            }
            CropBoxEdge::Right => {
                let a = Point::new(o.min_x(), o.mid_y());
                (o.width() + dx, a, room_right(a.x), room_around_y(a.y))
            }
            CropBoxEdge::Top => {
                let a = Point::new(o.mid_x(), o.max_y());
                ((o.height() - dy) * ratio, a, room_around_x(a.x), room_up(a.y))
            }
            CropBoxEdge::Bottom => {
                let a = Point::new(o.mid_x(), o.min_y());
                ((o.height() + dy) * ratio, a, room_around_x(a.x), room_down(a.y))
            }
            CropBoxEdge::TopLeft => {
                let (dx, dy) = (dx.max(0.0), dy.max(0.0));
                let scale = ((1.0 - dx / o.width()) + (1.0 - dy / o.height())) * 0.5;
                let a = Point::new(o.max_x(), o.max_y());
                (o.width() * scale, a, room_left(a.x), room_up(a.y))
            }
            CropBoxEdge::TopRight => {
                let (dx, dy) = (dx.max(0.0), dy.max(0.0));
                let scale = (((1.0 + dx / o.width()) + (1.0 - dy / o.height())) * 0.5).min(1.0);
                let a = Point::new(o.min_x(), o.max_y());
                (o.width() * scale, a, room_right(a.x), room_up(a.y))
            }
            CropBoxEdge::BottomLeft => {
                let scale = ((1.0 - dx / o.width()) + (1.0 + dy / o.height())) * 0.5;
                let a = Point::new(o.max_x(), o.min_y());
                (o.width() * scale, a, room_left(a.x), room_down(a.y))
            }
            CropBoxEdge::BottomRight => {
                let scale = ((1.0 + dx / o.width()) + (1.0 + dy / o.height())) * 0.5;
                let a = Point::new(o.min_x(), o.min_y());
                (o.width() * scale, a, room_right(a.x), room_down(a.y))
            }
            CropBoxEdge::None => return o,
        };

        let max_width = region
            .width()
            .min(region.height() * ratio)
            .min(avail_w)
            .min(avail_h * ratio);
        let min_width = min.max(min * ratio);
        let width = desired.max(min_width).min(max_width.max(min_width));
        let height = width / ratio;

        let origin = match self.edge {
            CropBoxEdge::Left => Point::new(anchor.x - width, anchor.y - height / 2.0),
            CropBoxEdge::Right => Point::new(anchor.x, anchor.y - height / 2.0),
            CropBoxEdge::Top => Point::new(anchor.x - width / 2.0, anchor.y - height),
            CropBoxEdge::Bottom => Point::new(anchor.x - width / 2.0, anchor.y),
            CropBoxEdge::TopLeft => Point::new(anchor.x - width, anchor.y - height),
            CropBoxEdge::TopRight => Point::new(anchor.x, anchor.y - height),
            CropBoxEdge::BottomLeft => Point::new(anchor.x - width, anchor.y),
            CropBoxEdge::BottomRight | CropBoxEdge::None => anchor,
        };

        let x = origin.x.min(region.max_x() - width).max(region.min_x());
        let y = origin.y.min(region.max_y() - height).max(region.min_y());
        Rect::new(x, y, width, height)
    }
}

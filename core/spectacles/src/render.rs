use image::{Rgb, RgbImage};
use imageproc::drawing::draw_line_segment_mut;

use crate::color::Color;
use crate::config::DEFAULT_THICKNESS_BREAKPOINTS;
use crate::eyes::EyePair;
use crate::geometry::BoundingBox;

/// A straight stroke between two pixel positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    /// Start point `(x, y)`.
    pub from: (i32, i32),
    /// End point `(x, y)`.
    pub to: (i32, i32),
}

impl Segment {
    fn new(from: (u32, u32), to: (u32, u32)) -> Self {
        Self {
            from: (from.0 as i32, from.1 as i32),
            to: (to.0 as i32, to.1 as i32),
        }
    }

    /// Smallest box containing both endpoints, as `(min_x, min_y, max_x, max_y)`.
    pub fn extent(&self) -> (i32, i32, i32, i32) {
        (
            self.from.0.min(self.to.0),
            self.from.1.min(self.to.1),
            self.from.0.max(self.to.0),
            self.from.1.max(self.to.1),
        )
    }
}

/// Every stroke that makes up one pair of glasses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlassesLayout {
    /// Lens outlines, left first.
    pub frames: [BoundingBox; 2],
    /// One temple per lens, in the same order as `frames`.
    pub temples: [Segment; 2],
    /// Stroke joining the inner edges of the two lenses.
    pub bridge: Segment,
}

impl GlassesLayout {
    /// Lay out frames, temples and bridge for `eyes` on `face`.
    ///
    /// Each lens gets a temple toward whichever face edge is nearer. The
    /// lenses resolved to the left and right temples anchor the bridge; if
    /// both resolve to the same side the pair's own left/right order is used.
    pub fn new(face: BoundingBox, eyes: &EyePair) -> Self {
        let frames = eyes.boxes();
        let mut left_anchor = None;
        let mut right_anchor = None;

        let temples = frames.map(|eye| {
            let to_left = eye.x as i64 - face.x as i64;
            let to_right = face.right() as i64 - eye.right() as i64;
            if to_left < to_right {
                left_anchor = Some(eye);
                Segment::new((eye.x, eye.center_y()), (face.x, eye.y))
            } else {
                right_anchor = Some(eye);
                Segment::new((eye.right(), eye.center_y()), (face.right(), eye.y))
            }
        });

        let (left, right) = match (left_anchor, right_anchor) {
            (Some(l), Some(r)) => (l, r),
            _ => (eyes.left(), eyes.right()),
        };
        let bridge = Segment::new(
            (left.right(), left.center_y()),
            (right.x, right.center_y()),
        );

        Self {
            frames,
            temples,
            bridge,
        }
    }

    /// The four sides of a lens outline.
    pub fn frame_sides(eye: BoundingBox) -> [Segment; 4] {
        let (x0, y0, x1, y1) = (eye.x, eye.y, eye.right(), eye.bottom());
        [
            Segment::new((x0, y0), (x1, y0)),
            Segment::new((x1, y0), (x1, y1)),
            Segment::new((x1, y1), (x0, y1)),
            Segment::new((x0, y1), (x0, y0)),
        ]
    }

    /// All strokes in drawing order.
    pub fn segments(&self) -> Vec<Segment> {
        let mut segments = Vec::with_capacity(11);
        for (eye, temple) in self.frames.iter().zip(self.temples.iter()) {
            segments.extend(Self::frame_sides(*eye));
            segments.push(*temple);
        }
        segments.push(self.bridge);
        segments
    }
}

/// Draws glasses onto an RGB buffer in place.
#[derive(Debug, Clone)]
pub struct GlassesRenderer {
    breakpoints: [u32; 4],
}

impl Default for GlassesRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_THICKNESS_BREAKPOINTS)
    }
}

impl GlassesRenderer {
    /// Renderer with the given face-width thickness breakpoints.
    pub fn new(breakpoints: [u32; 4]) -> Self {
        Self { breakpoints }
    }

    /// Stroke thickness for a face of `face_width` pixels.
    ///
    /// Steps by one at each breakpoint: with the defaults, widths below 100
    /// draw at 1px and widths of 450 and above at 5px.
    pub fn thickness(&self, face_width: u32) -> u32 {
        1 + self
            .breakpoints
            .iter()
            .filter(|&&b| face_width >= b)
            .count() as u32
    }

    /// Draw the glasses and return the layout that was drawn.
    ///
    /// The buffer keeps its size and format; strokes falling off the canvas
    /// are clipped.
    pub fn render(
        &self,
        image: &mut RgbImage,
        face: BoundingBox,
        eyes: &EyePair,
        color: Color,
    ) -> GlassesLayout {
        let layout = GlassesLayout::new(face, eyes);
        let thickness = self.thickness(face.width);
        let rgb = color.rgb();
        for segment in layout.segments() {
            draw_thick_segment(image, segment, thickness, rgb);
        }
        layout
    }
}

/// Offsets covered by a square brush of side `thickness` centered on a line.
///
/// For odd sizes the brush is symmetric; for even sizes the extra pixel goes
/// to the positive side.
pub(crate) fn brush_offsets(thickness: u32) -> std::ops::RangeInclusive<i32> {
    let t = thickness.max(1) as i32;
    -((t - 1) / 2)..=t / 2
}

fn draw_thick_segment(image: &mut RgbImage, segment: Segment, thickness: u32, color: Rgb<u8>) {
    for dx in brush_offsets(thickness) {
        for dy in brush_offsets(thickness) {
            let from = ((segment.from.0 + dx) as f32, (segment.from.1 + dy) as f32);
            let to = ((segment.to.0 + dx) as f32, (segment.to.1 + dy) as f32);
            draw_line_segment_mut(image, from, to, color);
        }
    }
}

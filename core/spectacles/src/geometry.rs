/// Axis-aligned rectangle in image-pixel coordinates.
///
/// Produced by detectors and consumed by the synthesizer and renderer.
/// The type does not enforce `x + width <= image_width`; use
/// [`BoundingBox::clamp_to`] to validate a detector box against its image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BoundingBox {
    /// X coordinate of the top-left corner (pixels).
    pub x: u32,
    /// Y coordinate of the top-left corner (pixels).
    pub y: u32,
    /// Width of the box (pixels).
    pub width: u32,
    /// Height of the box (pixels).
    pub height: u32,
}

impl BoundingBox {
    /// Create a box from its top-left corner and size.
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Area in square pixels. Widened so large boxes cannot overflow.
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// X coordinate one past the right edge.
    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    /// Y coordinate one past the bottom edge.
    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }

    /// Horizontal midpoint, rounded down.
    pub fn center_x(&self) -> u32 {
        self.x + self.width / 2
    }

    /// Vertical midpoint, rounded down.
    pub fn center_y(&self) -> u32 {
        self.y + self.height / 2
    }

    /// Clip the box to an image of `width` × `height`.
    ///
    /// A box lying entirely outside the image collapses to zero area at the
    /// nearest edge.
    pub fn clamp_to(&self, width: u32, height: u32) -> Self {
        let x = self.x.min(width);
        let y = self.y.min(height);
        Self {
            x,
            y,
            width: self.right().min(width) - x,
            height: self.bottom().min(height) - y,
        }
    }

    /// Build a box from signed detector coordinates, clipping anything left
    /// of or above the origin.
    pub fn from_signed(x: i32, y: i32, width: u32, height: u32) -> Self {
        let shave_x = x.min(0).unsigned_abs();
        let shave_y = y.min(0).unsigned_abs();
        Self {
            x: x.max(0) as u32,
            y: y.max(0) as u32,
            width: width.saturating_sub(shave_x),
            height: height.saturating_sub(shave_y),
        }
    }
}

//! Turning unreliable eye detections into exactly two lens boxes.

use crate::geometry::BoundingBox;

/// Two eye boxes, ordered left then right by `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EyePair {
    left: BoundingBox,
    right: BoundingBox,
}

impl EyePair {
    /// Build a pair, ordering the boxes by `x`. Ties keep argument order.
    pub fn new(a: BoundingBox, b: BoundingBox) -> Self {
        if b.x < a.x {
            Self { left: b, right: a }
        } else {
            Self { left: a, right: b }
        }
    }

    /// The box with the smaller `x`.
    pub fn left(&self) -> BoundingBox {
        self.left
    }

    /// The box with the larger `x`.
    pub fn right(&self) -> BoundingBox {
        self.right
    }

    /// Both boxes, left first.
    pub fn boxes(&self) -> [BoundingBox; 2] {
        [self.left, self.right]
    }
}

/// Which side of the face a single detected eye sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

/// Resolve any number of eye detections into a canonical pair.
///
/// - one eye: kept, and its partner is placed against the face midline on
///   the other side with the same `y` and size
/// - two eyes: kept, with the narrower width, the taller height and the
///   higher `y` applied to both
/// - zero or three or more: discarded; both eyes are laid out from face
///   proportions
pub fn synthesize(face: BoundingBox, eyes: &[BoundingBox]) -> EyePair {
    let pair = match eyes {
        [eye] => complete_single(face, *eye),
        [a, b] => harmonize(*a, *b),
        _ => from_proportions(face),
    };
    log::debug!(
        "eye layout from {} detection(s): left={:?} right={:?}",
        eyes.len(),
        pair.left,
        pair.right
    );
    pair
}

fn side_of(face: BoundingBox, eye: BoundingBox) -> Side {
    let to_left = eye.x as i64 - face.x as i64;
    let to_right = face.right() as i64 - eye.x as i64;
    if to_left < to_right {
        Side::Left
    } else {
        Side::Right
    }
}

fn complete_single(face: BoundingBox, eye: BoundingBox) -> EyePair {
    let mid = face.center_x();
    let x = match side_of(face, eye) {
        Side::Left => mid,
        Side::Right => mid.saturating_sub(eye.width),
    };
    EyePair::new(eye, BoundingBox { x, ..eye })
}

fn harmonize(a: BoundingBox, b: BoundingBox) -> EyePair {
    let width = a.width.min(b.width);
    let height = a.height.max(b.height);
    let y = a.y.min(b.y);
    EyePair::new(
        BoundingBox::new(a.x, y, width, height),
        BoundingBox::new(b.x, y, width, height),
    )
}

fn from_proportions(face: BoundingBox) -> EyePair {
    let width = face.width / 7;
    let height = face.height / 7;
    let y = face.y + face.height / 3;
    let mid = face.center_x();
    EyePair::new(
        BoundingBox::new(mid.saturating_sub(width / 2 + width), y, width, height),
        BoundingBox::new(mid + width / 2, y, width, height),
    )
}

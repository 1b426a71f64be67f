use crate::geometry::BoundingBox;

/// Pluggable face detection backend.
///
/// Implement this trait to provide a custom face detector (Haar cascade,
/// ONNX, dlib, etc.) and pass it to
/// [`crate::GlassesPipelineBuilder::face_detector`].
///
/// Boxes may be returned in any order; the selector sorts them.
pub trait FaceDetector: Send + Sync {
    /// Detect faces in a row-major grayscale buffer of `width` × `height` bytes.
    fn detect(&self, gray: &[u8], width: u32, height: u32) -> Vec<BoundingBox>;
}

/// Pluggable eye detection backend.
///
/// Only the number of boxes returned drives how the glasses are laid out,
/// so a detector that misses eyes or reports extra ones is still usable.
pub trait EyeDetector: Send + Sync {
    /// Detect eyes in a row-major grayscale buffer of `width` × `height` bytes.
    fn detect(&self, gray: &[u8], width: u32, height: u32) -> Vec<BoundingBox>;
}

/// Eye detector that never finds anything.
///
/// With no detections the lenses are placed from face proportions alone,
/// which is a usable layout for frontal portraits when no eye model is
/// available.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullEyeDetector;

impl EyeDetector for NullEyeDetector {
    fn detect(&self, _gray: &[u8], _width: u32, _height: u32) -> Vec<BoundingBox> {
        Vec::new()
    }
}

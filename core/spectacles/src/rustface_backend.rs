use std::io::Read;
use std::path::Path;

use crate::detector::FaceDetector;
use crate::error::SpectaclesError;
use crate::geometry::BoundingBox;

/// Face detector backed by the `rustface` crate (SeetaFace engine).
///
/// The SeetaFace frontal model (`seeta_fd_frontal_v1.0.bin`) is injected at
/// construction, either from a file or any reader.
pub struct RustfaceDetector {
    model: rustface::Model,
    min_face_size: u32,
}

impl RustfaceDetector {
    /// Load the SeetaFace model from `path`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SpectaclesError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .map_err(|e| SpectaclesError::ModelLoad(format!("{}: {e}", path.display())))?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// Load the SeetaFace model from an arbitrary reader.
    pub fn from_reader(reader: impl Read) -> Result<Self, SpectaclesError> {
        let model =
            rustface::read_model(reader).map_err(|e| SpectaclesError::ModelLoad(e.to_string()))?;
        Ok(Self {
            model,
            min_face_size: 20,
        })
    }

    /// Smallest face edge, in pixels, the detector will report (default: 20).
    pub fn min_face_size(mut self, size: u32) -> Self {
        self.min_face_size = size;
        self
    }
}

impl FaceDetector for RustfaceDetector {
    fn detect(&self, gray: &[u8], width: u32, height: u32) -> Vec<BoundingBox> {
        let mut detector = rustface::create_detector_with_model(self.model.clone());
        detector.set_min_face_size(self.min_face_size);
        detector.set_score_thresh(2.0);
        detector.set_pyramid_scale_factor(0.8);
        detector.set_slide_window_step(4, 4);

        let faces = detector.detect(&rustface::ImageData::new(gray, width, height));
        log::trace!("rustface found {} face(s) in {width}x{height}", faces.len());

        faces
            .iter()
            .map(|face| {
                let bbox = face.bbox();
                BoundingBox::from_signed(bbox.x(), bbox.y(), bbox.width(), bbox.height())
            })
            .collect()
    }
}

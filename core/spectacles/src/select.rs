use image::{DynamicImage, RgbImage};

use crate::codec;
use crate::detector::FaceDetector;
use crate::error::SpectaclesError;
use crate::geometry::BoundingBox;

/// Pixel payload of a [`Candidate`].
#[derive(Debug, Clone)]
pub enum CandidateImage {
    /// Raw file bytes, decoded lazily during selection.
    Encoded(Vec<u8>),
    /// An already-decoded image.
    Decoded(DynamicImage),
}

/// One image found on a page, with where it came from.
#[derive(Debug, Clone)]
pub struct Candidate {
    /// Provenance (file name or URL), reported back when this candidate wins.
    pub source: String,
    /// The image itself.
    pub image: CandidateImage,
}

impl Candidate {
    /// Candidate from raw encoded bytes (PNG, JPEG, GIF, WebP).
    pub fn encoded(source: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            source: source.into(),
            image: CandidateImage::Encoded(bytes),
        }
    }

    /// Candidate from an image that is already decoded.
    pub fn decoded(source: impl Into<String>, image: DynamicImage) -> Self {
        Self {
            source: source.into(),
            image: CandidateImage::Decoded(image),
        }
    }

    /// Decode and normalize to a single static RGB frame.
    pub fn to_rgb(&self) -> Result<RgbImage, SpectaclesError> {
        match &self.image {
            CandidateImage::Encoded(bytes) => codec::decode_rgb(bytes),
            CandidateImage::Decoded(image) => codec::normalize(image),
        }
    }
}

/// Face detections for one image.
///
/// `faces` is always sorted by area, largest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaceInfo {
    /// Width of the analyzed image.
    pub image_width: u32,
    /// Height of the analyzed image.
    pub image_height: u32,
    /// Detected faces, clipped to the image, largest first.
    pub faces: Vec<BoundingBox>,
}

impl FaceInfo {
    /// Clip raw detector output to the image and sort it largest first.
    ///
    /// The sort is stable, so faces of equal area keep detector order.
    pub fn new(image_width: u32, image_height: u32, detected: Vec<BoundingBox>) -> Self {
        let mut faces: Vec<BoundingBox> = detected
            .into_iter()
            .map(|b| b.clamp_to(image_width, image_height))
            .collect();
        faces.sort_by(|a, b| b.area().cmp(&a.area()));
        Self {
            image_width,
            image_height,
            faces,
        }
    }

    /// The largest face, if any.
    pub fn largest(&self) -> Option<&BoundingBox> {
        self.faces.first()
    }

    /// Share of the image covered by the largest face (0.0 when none).
    pub fn largest_face_fraction(&self) -> f64 {
        let image_area = self.image_width as u64 * self.image_height as u64;
        match self.largest() {
            Some(face) if image_area > 0 => face.area() as f64 / image_area as f64,
            _ => 0.0,
        }
    }

    /// Exactly one face, covering more than `min_face_fraction` of the image.
    pub fn has_single_dominant_face(&self, min_face_fraction: f64) -> bool {
        self.faces.len() == 1 && self.largest_face_fraction() > min_face_fraction
    }
}

/// The candidate chosen as the profile photo.
#[derive(Debug, Clone)]
pub struct Selection {
    /// Position of the winner in the candidate list.
    pub index: usize,
    /// Provenance of the winner.
    pub source: String,
    /// The decoded RGB image, ready for drawing.
    pub image: RgbImage,
    /// Face detections for the winner; `faces.len() == 1`.
    pub faces: FaceInfo,
}

impl Selection {
    /// The single dominant face.
    pub fn face(&self) -> BoundingBox {
        self.faces.faces[0]
    }
}

/// Picks the first candidate showing exactly one prominent face.
pub struct ProfilePhotoSelector<'d> {
    detector: &'d dyn FaceDetector,
    min_face_fraction: f64,
}

impl<'d> ProfilePhotoSelector<'d> {
    /// Create a selector using `detector` and the qualification threshold.
    pub fn new(detector: &'d dyn FaceDetector, min_face_fraction: f64) -> Self {
        Self {
            detector,
            min_face_fraction,
        }
    }

    /// Run face detection on one decoded image.
    pub fn face_info(&self, image: &RgbImage) -> FaceInfo {
        let gray = codec::to_gray(image);
        let (width, height) = gray.dimensions();
        let detected = self.detector.detect(gray.as_raw(), width, height);
        FaceInfo::new(width, height, detected)
    }

    /// Return the first qualifying candidate in input order.
    ///
    /// Later candidates are never inspected once one qualifies, even if they
    /// would show a larger face. Candidates that fail to decode are skipped.
    pub fn select(&self, candidates: &[Candidate]) -> Option<Selection> {
        for (index, candidate) in candidates.iter().enumerate() {
            let image = match candidate.to_rgb() {
                Ok(image) => image,
                Err(e) => {
                    log::warn!("skipping candidate {}: {e}", candidate.source);
                    continue;
                }
            };

            let faces = self.face_info(&image);
            let qualifies = faces.has_single_dominant_face(self.min_face_fraction);
            log::debug!(
                "candidate {} ({}x{}): {} face(s), largest covers {:.1}% -> {}",
                candidate.source,
                faces.image_width,
                faces.image_height,
                faces.faces.len(),
                faces.largest_face_fraction() * 100.0,
                if qualifies { "selected" } else { "rejected" },
            );

            if qualifies {
                return Some(Selection {
                    index,
                    source: candidate.source.clone(),
                    image,
                    faces,
                });
            }
        }
        None
    }
}

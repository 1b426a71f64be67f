//! Find the profile photo among a page's images and draw glasses on it.
//!
//! A candidate is the profile photo when exactly one face is detected and
//! that face covers more than 40% of the image. The first such candidate in
//! page order wins. Eye detections on the winner are resolved into exactly
//! two lenses, then frames, temples and a bridge are drawn with a stroke
//! weight that steps with face width.
//!
//! # Example
//!
//! ```no_run
//! use spectacles::{BoundingBox, Candidate, FaceDetector, GlassesPipeline, NullEyeDetector};
//! # struct HaarCascade;
//! # impl FaceDetector for HaarCascade {
//! #     fn detect(&self, _: &[u8], _: u32, _: u32) -> Vec<BoundingBox> { vec![] }
//! # }
//!
//! let pipeline = GlassesPipeline::builder()
//!     .face_detector(Box::new(HaarCascade))
//!     .eye_detector(Box::new(NullEyeDetector))
//!     .build()
//!     .unwrap();
//!
//! let candidates = vec![
//!     Candidate::encoded("logo.png", std::fs::read("logo.png").unwrap()),
//!     Candidate::encoded("me.jpg", std::fs::read("me.jpg").unwrap()),
//! ];
//! match pipeline.select_and_render(&candidates, "red").unwrap() {
//!     Some(photo) => photo.image.save("me_glasses.png").unwrap(),
//!     None => println!("no profile photo found"),
//! }
//! ```
#![warn(missing_docs)]

/// Image decoding, normalization and encoding.
pub mod codec;
mod color;
mod config;
/// Face and eye detection traits.
pub mod detector;
mod error;
/// Eye layout synthesis.
pub mod eyes;
mod geometry;
mod render;
#[cfg(feature = "rustface")]
/// Built-in SeetaFace-based face detector backend.
pub mod rustface_backend;
mod select;

pub use codec::OutputFormat;
pub use color::Color;
pub use config::{GlassesConfig, DEFAULT_MIN_FACE_FRACTION, DEFAULT_THICKNESS_BREAKPOINTS};
pub use detector::{EyeDetector, FaceDetector, NullEyeDetector};
/// Error type returned by spectacles operations.
pub use error::SpectaclesError;
pub use eyes::{synthesize, EyePair};
pub use geometry::BoundingBox;
pub use render::{GlassesLayout, GlassesRenderer, Segment};
#[cfg(feature = "rustface")]
/// Built-in detector that loads a SeetaFace model.
pub use rustface_backend::RustfaceDetector;
pub use select::{Candidate, CandidateImage, FaceInfo, ProfilePhotoSelector, Selection};

use image::RgbImage;

/// The profile photo with glasses drawn on it.
#[derive(Debug, Clone)]
pub struct RenderedPhoto {
    /// Position of the chosen candidate in the input list.
    pub index: usize,
    /// Provenance of the chosen candidate.
    pub source: String,
    /// The modified image, same size as the decoded original.
    pub image: RgbImage,
    /// The face the glasses were fitted to.
    pub face: BoundingBox,
    /// The lens boxes used.
    pub eyes: EyePair,
    /// Every stroke that was drawn.
    pub layout: GlassesLayout,
    /// Stroke thickness in pixels.
    pub thickness: u32,
}

impl RenderedPhoto {
    /// Encode the modified image.
    pub fn encode(&self, format: OutputFormat, quality: f32) -> Result<Vec<u8>, SpectaclesError> {
        codec::encode_image(&self.image, format, quality)
    }
}

/// Selection and rendering with injected detectors and fixed configuration.
///
/// Built with [`GlassesPipeline::builder`]. Holds no per-request state, so
/// one pipeline can serve any number of requests.
pub struct GlassesPipeline {
    face_detector: Box<dyn FaceDetector>,
    eye_detector: Box<dyn EyeDetector>,
    config: GlassesConfig,
    renderer: GlassesRenderer,
}

impl GlassesPipeline {
    /// Start configuring a pipeline.
    pub fn builder() -> GlassesPipelineBuilder {
        GlassesPipelineBuilder::default()
    }

    /// The configuration this pipeline was built with.
    pub fn config(&self) -> &GlassesConfig {
        &self.config
    }

    /// Choose the profile photo without drawing anything.
    pub fn select(&self, candidates: &[Candidate]) -> Option<Selection> {
        ProfilePhotoSelector::new(self.face_detector.as_ref(), self.config.min_face_fraction)
            .select(candidates)
    }

    /// Choose the profile photo and draw glasses in the named color.
    ///
    /// The color is checked before any candidate is decoded, so an unknown
    /// name fails with [`SpectaclesError::UnknownColor`] without touching any
    /// image. `Ok(None)` means no candidate qualified.
    pub fn select_and_render(
        &self,
        candidates: &[Candidate],
        color: &str,
    ) -> Result<Option<RenderedPhoto>, SpectaclesError> {
        let color: Color = color.parse()?;
        Ok(self
            .select(candidates)
            .map(|selection| self.render_selection(selection, color)))
    }

    /// Detect eyes on an already selected photo and draw glasses on it.
    pub fn render_selection(&self, selection: Selection, color: Color) -> RenderedPhoto {
        let Selection {
            index,
            source,
            mut image,
            faces,
        } = selection;
        let face = faces.faces[0];

        let gray = codec::to_gray(&image);
        let (width, height) = gray.dimensions();
        let detected: Vec<BoundingBox> = self
            .eye_detector
            .detect(gray.as_raw(), width, height)
            .into_iter()
            .map(|eye| eye.clamp_to(width, height))
            .collect();
        drop(gray);

        let eyes = synthesize(face, &detected);
        let thickness = self.renderer.thickness(face.width);
        let layout = self.renderer.render(&mut image, face, &eyes, color);
        log::info!(
            "drew {color} glasses on {source} (face {}x{}, {} eye detection(s), {thickness}px)",
            face.width,
            face.height,
            detected.len(),
        );

        RenderedPhoto {
            index,
            source,
            image,
            face,
            eyes,
            layout,
            thickness,
        }
    }
}

/// Builder for [`GlassesPipeline`].
///
/// Both detectors are required; [`GlassesPipelineBuilder::build`] fails
/// immediately if either is missing.
#[derive(Default)]
pub struct GlassesPipelineBuilder {
    face_detector: Option<Box<dyn FaceDetector>>,
    eye_detector: Option<Box<dyn EyeDetector>>,
    config: GlassesConfig,
}

impl GlassesPipelineBuilder {
    /// Provide the face detector used for selection.
    ///
    /// ```no_run
    /// use spectacles::{BoundingBox, FaceDetector, GlassesPipeline, NullEyeDetector};
    ///
    /// struct MyDetector;
    /// impl FaceDetector for MyDetector {
    ///     fn detect(&self, gray: &[u8], width: u32, height: u32) -> Vec<BoundingBox> {
    ///         // Your detection logic here
    ///         vec![]
    ///     }
    /// }
    ///
    /// let pipeline = GlassesPipeline::builder()
    ///     .face_detector(Box::new(MyDetector))
    ///     .eye_detector(Box::new(NullEyeDetector))
    ///     .build()
    ///     .unwrap();
    /// ```
    pub fn face_detector(mut self, detector: Box<dyn FaceDetector>) -> Self {
        self.face_detector = Some(detector);
        self
    }

    /// Provide the eye detector used when fitting the glasses.
    pub fn eye_detector(mut self, detector: Box<dyn EyeDetector>) -> Self {
        self.eye_detector = Some(detector);
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: GlassesConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the minimum face share of the image (default: 0.40).
    pub fn min_face_fraction(mut self, fraction: f64) -> Self {
        self.config.min_face_fraction = fraction;
        self
    }

    /// Set the face widths at which strokes thicken
    /// (default: `[100, 250, 350, 450]`).
    pub fn thickness_breakpoints(mut self, breakpoints: [u32; 4]) -> Self {
        self.config.thickness_breakpoints = breakpoints;
        self
    }

    /// Validate the configuration and assemble the pipeline.
    pub fn build(self) -> Result<GlassesPipeline, SpectaclesError> {
        let face_detector = self
            .face_detector
            .ok_or(SpectaclesError::MissingFaceDetector)?;
        let eye_detector = self
            .eye_detector
            .ok_or(SpectaclesError::MissingEyeDetector)?;
        self.config.validate()?;

        Ok(GlassesPipeline {
            face_detector,
            eye_detector,
            renderer: GlassesRenderer::new(self.config.thickness_breakpoints),
            config: self.config,
        })
    }
}

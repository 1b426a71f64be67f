use image::codecs::png::PngEncoder;
use image::{ImageEncoder, Rgb, RgbImage};
use spectacles::{
    BoundingBox, Candidate, Color, EyeDetector, FaceDetector, GlassesPipeline, NullEyeDetector,
    SpectaclesError,
};

/// Mock face detector keyed on image width, so each candidate can get its
/// own canned answer.
struct MockDetector {
    faces: Vec<(u32, Vec<BoundingBox>)>,
}

impl MockDetector {
    fn new() -> Self {
        Self { faces: Vec::new() }
    }

    fn with(mut self, image_width: u32, faces: Vec<BoundingBox>) -> Self {
        self.faces.push((image_width, faces));
        self
    }
}

impl FaceDetector for MockDetector {
    fn detect(&self, _gray: &[u8], width: u32, _height: u32) -> Vec<BoundingBox> {
        self.faces
            .iter()
            .find(|(w, _)| *w == width)
            .map(|(_, faces)| faces.clone())
            .unwrap_or_default()
    }
}

struct MockEyes(Vec<BoundingBox>);

impl EyeDetector for MockEyes {
    fn detect(&self, _gray: &[u8], _width: u32, _height: u32) -> Vec<BoundingBox> {
        self.0.clone()
    }
}

fn make_test_rgb(width: u32, height: u32) -> RgbImage {
    let mut img = RgbImage::new(width, height);
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        *pixel = Rgb([
            (x * 255 / width.max(1)) as u8,
            (y * 255 / height.max(1)) as u8,
            128,
        ]);
    }
    img
}

fn make_test_png(width: u32, height: u32) -> Vec<u8> {
    let img = make_test_rgb(width, height);
    let mut buffer = Vec::new();
    PngEncoder::new(&mut buffer)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
    buffer
}

fn pipeline(faces: MockDetector, eyes: Vec<BoundingBox>) -> GlassesPipeline {
    GlassesPipeline::builder()
        .face_detector(Box::new(faces))
        .eye_detector(Box::new(MockEyes(eyes)))
        .build()
        .unwrap()
}

#[test]
fn single_dominant_face_is_selected() {
    let face = BoundingBox::new(20, 20, 160, 160); // 64%
    let candidates = vec![Candidate::encoded("me.png", make_test_png(200, 200))];
    let selection = pipeline(MockDetector::new().with(200, vec![face]), vec![])
        .select(&candidates)
        .expect("profile photo");
    assert_eq!(selection.source, "me.png");
    assert_eq!(selection.face(), face);
    assert_eq!(selection.image, make_test_rgb(200, 200));
}

#[test]
fn zero_or_many_faces_are_rejected_regardless_of_size() {
    let huge = BoundingBox::new(0, 0, 300, 300);
    let detector = MockDetector::new()
        .with(300, vec![])
        .with(301, vec![huge, huge])
        .with(302, vec![huge, huge, huge]);
    let candidates = vec![
        Candidate::encoded("empty.png", make_test_png(300, 300)),
        Candidate::encoded("pair.png", make_test_png(301, 300)),
        Candidate::encoded("crowd.png", make_test_png(302, 300)),
    ];
    assert!(pipeline(detector, vec![]).select(&candidates).is_none());
}

#[test]
fn small_single_face_is_rejected() {
    let detector = MockDetector::new().with(200, vec![BoundingBox::new(0, 0, 120, 120)]); // 36%
    let candidates = vec![Candidate::encoded("group.png", make_test_png(200, 200))];
    assert!(pipeline(detector, vec![]).select(&candidates).is_none());
}

#[test]
fn first_qualifying_candidate_wins() {
    let detector = MockDetector::new()
        .with(100, vec![BoundingBox::new(10, 10, 70, 70)]) // 49%
        .with(120, vec![BoundingBox::new(0, 0, 120, 120)]); // 100%
    let candidates = vec![
        Candidate::encoded("first.png", make_test_png(100, 100)),
        Candidate::encoded("second.png", make_test_png(120, 120)),
    ];
    let selection = pipeline(detector, vec![]).select(&candidates).unwrap();
    assert_eq!(selection.index, 0);
    assert_eq!(selection.source, "first.png");
}

#[test]
fn broken_candidates_do_not_stop_selection() {
    let detector = MockDetector::new().with(90, vec![BoundingBox::new(0, 0, 80, 80)]);
    let candidates = vec![
        Candidate::encoded("truncated.jpg", vec![0xFF, 0xD8, 0xFF]),
        Candidate::encoded("readme.txt", b"hello".to_vec()),
        Candidate::encoded("ok.png", make_test_png(90, 90)),
    ];
    let selection = pipeline(detector, vec![]).select(&candidates).unwrap();
    assert_eq!(selection.index, 2);
}

#[test]
fn unknown_color_leaves_candidates_untouched() {
    let png = make_test_png(120, 120);
    let candidates = vec![Candidate::encoded("me.png", png.clone())];
    let detector = MockDetector::new().with(120, vec![BoundingBox::new(0, 0, 110, 110)]);
    let err = pipeline(detector, vec![])
        .select_and_render(&candidates, "purple")
        .unwrap_err();
    assert!(matches!(err, SpectaclesError::UnknownColor(ref c) if c == "purple"));
    match &candidates[0].image {
        spectacles::CandidateImage::Encoded(bytes) => assert_eq!(bytes, &png),
        other => panic!("unexpected candidate image {other:?}"),
    }
}

#[test]
fn black_glasses_only_touch_computed_regions() {
    let (w, h) = (240, 240);
    let face = BoundingBox::new(30, 20, 180, 200);
    let candidates = vec![Candidate::encoded("me.png", make_test_png(w, h))];
    let original = make_test_rgb(w, h);

    let photo = pipeline(MockDetector::new().with(w, vec![face]), vec![])
        .select_and_render(&candidates, "black")
        .unwrap()
        .unwrap();
    assert_eq!(photo.image.dimensions(), (w, h));
    assert_eq!(photo.thickness, 2);

    // Every stroke's bounding box, padded by the brush reach.
    let pad = photo.thickness as i32 / 2;
    let regions: Vec<(i32, i32, i32, i32)> = photo
        .layout
        .segments()
        .iter()
        .map(|s| {
            let (x0, y0, x1, y1) = s.extent();
            (x0 - pad, y0 - pad, x1 + pad, y1 + pad)
        })
        .collect();
    let inside = |x: i32, y: i32| {
        regions
            .iter()
            .any(|&(x0, y0, x1, y1)| x >= x0 && x <= x1 && y >= y0 && y <= y1)
    };

    let mut changed = 0;
    for (x, y, pixel) in photo.image.enumerate_pixels() {
        let before = original.get_pixel(x, y);
        if pixel != before {
            changed += 1;
            assert!(
                inside(x as i32, y as i32),
                "pixel ({x}, {y}) changed outside the glasses"
            );
            assert_eq!(*pixel, Color::Black.rgb());
        }
    }
    assert!(changed > 0, "nothing was drawn");
}

#[test]
fn proportional_lenses_for_noisy_eye_detections() {
    let face = BoundingBox::new(0, 0, 140, 140);
    let noisy = vec![
        BoundingBox::new(10, 40, 10, 10),
        BoundingBox::new(60, 40, 10, 10),
        BoundingBox::new(110, 40, 10, 10),
    ];
    let candidates = vec![Candidate::encoded("me.png", make_test_png(150, 150))];
    let photo = pipeline(MockDetector::new().with(150, vec![face]), noisy)
        .select_and_render(&candidates, "green")
        .unwrap()
        .unwrap();
    // 140 / 7 = 20, y = 140 / 3 = 46, midline 70
    assert_eq!(photo.eyes.left(), BoundingBox::new(40, 46, 20, 20));
    assert_eq!(photo.eyes.right(), BoundingBox::new(80, 46, 20, 20));
    assert_eq!(photo.layout.bridge.from, (60, 56));
    assert_eq!(photo.layout.bridge.to, (80, 56));
}

#[test]
fn single_eye_is_mirrored_across_the_midline() {
    let face = BoundingBox::new(0, 0, 140, 140);
    let eye = BoundingBox::new(90, 40, 24, 16);
    let candidates = vec![Candidate::encoded("me.png", make_test_png(150, 150))];
    let photo = pipeline(MockDetector::new().with(150, vec![face]), vec![eye])
        .select_and_render(&candidates, "white")
        .unwrap()
        .unwrap();
    assert_eq!(photo.eyes.right(), eye);
    assert_eq!(photo.eyes.left(), BoundingBox::new(70 - 24, 40, 24, 16));
}

#[test]
fn thickness_follows_face_width() {
    for (face_width, expected) in [(99, 1), (100, 2), (449, 4), (450, 5)] {
        let size = face_width + 10;
        let face = BoundingBox::new(5, 5, face_width, face_width);
        let candidates = vec![Candidate::encoded("me.png", make_test_png(size, size))];
        let photo = pipeline(MockDetector::new().with(size, vec![face]), vec![])
            .select_and_render(&candidates, "red")
            .unwrap()
            .unwrap();
        assert_eq!(photo.thickness, expected, "face width {face_width}");
    }
}

#[test]
fn null_eye_detector_still_renders() {
    let face = BoundingBox::new(10, 10, 100, 100);
    let candidates = vec![Candidate::encoded("me.png", make_test_png(120, 120))];
    let photo = GlassesPipeline::builder()
        .face_detector(Box::new(MockDetector::new().with(120, vec![face])))
        .eye_detector(Box::new(NullEyeDetector))
        .build()
        .unwrap()
        .select_and_render(&candidates, "blue")
        .unwrap()
        .unwrap();
    assert_ne!(photo.image, make_test_rgb(120, 120));
}

#[test]
fn custom_threshold_changes_qualification() {
    let detector = MockDetector::new().with(200, vec![BoundingBox::new(0, 0, 120, 120)]); // 36%
    let candidates = vec![Candidate::encoded("me.png", make_test_png(200, 200))];
    let pipeline = GlassesPipeline::builder()
        .face_detector(Box::new(detector))
        .eye_detector(Box::new(NullEyeDetector))
        .min_face_fraction(0.30)
        .build()
        .unwrap();
    assert!(pipeline.select(&candidates).is_some());
}

//! Print the lens layout chosen for each eye-detection count on one face and
//! write a preview of each.
//!
//! Usage:
//!   cargo run --example debug_eye_layout -- <image> <x> <y> <width> <height>
//!
//! Previews are written next to the input as `<stem>_eyes<N>.png`.

use std::path::Path;

use spectacles::{codec, synthesize, BoundingBox, Color, GlassesRenderer, OutputFormat};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() != 5 {
        eprintln!("usage: debug_eye_layout <image> <x> <y> <width> <height>");
        std::process::exit(1);
    }
    let input_path = Path::new(&args[0]);
    let nums: Vec<u32> = args[1..]
        .iter()
        .map(|a| a.parse().expect("face box values must be integers"))
        .collect();
    let face = BoundingBox::new(nums[0], nums[1], nums[2], nums[3]);

    let input = std::fs::read(input_path).unwrap();
    let image = codec::decode_rgb(&input).unwrap();
    let (width, height) = image.dimensions();
    let renderer = GlassesRenderer::default();

    println!("=== {} ({width}x{height}) ===", input_path.display());
    println!(
        "  face: ({}, {}, {}x{}), thickness {}px",
        face.x,
        face.y,
        face.width,
        face.height,
        renderer.thickness(face.width)
    );

    // Fake detections spread across the upper half of the face.
    let eye_w = (face.width / 5).max(1);
    let eye_h = (face.height / 8).max(1);
    let eye_y = face.y + face.height / 3;
    let fake: Vec<BoundingBox> = (0..3)
        .map(|i| BoundingBox::new(face.x + face.width * (i * 2 + 1) / 7, eye_y, eye_w, eye_h))
        .collect();

    let stem = input_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("preview");

    for count in 0..=3 {
        let eyes = synthesize(face, &fake[..count]);
        println!(
            "  {count} detection(s) -> left {:?}, right {:?}",
            eyes.left(),
            eyes.right()
        );

        let mut preview = image.clone();
        renderer.render(&mut preview, face, &eyes, Color::Red);
        let out = input_path.with_file_name(format!("{stem}_eyes{count}.png"));
        let data = codec::encode_image(&preview, OutputFormat::Png, 1.0).unwrap();
        std::fs::write(&out, data).unwrap();
        println!("    wrote {}", out.display());
    }
}

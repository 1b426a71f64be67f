use std::fs;
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use spectacles::{GlassesPipeline, NullEyeDetector, OutputFormat, RustfaceDetector};

mod args;
mod settings;

use args::{Args, Command};

/// Exit status when no candidate qualifies as a profile photo.
const EXIT_NOT_FOUND: u8 = 2;

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let default_filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let mut config = settings::load_config(args.config.as_deref())?;
    if let Some(fraction) = args.min_face_fraction {
        config.min_face_fraction = fraction;
    }

    let mut builder = GlassesPipeline::builder()
        .config(config)
        .eye_detector(Box::new(NullEyeDetector));
    if let Some(model) = &args.face_model {
        let detector = RustfaceDetector::from_file(model)
            .with_context(|| format!("failed to load face model {}", model.display()))?;
        builder = builder.face_detector(Box::new(detector));
    }
    let pipeline = builder.build().context("invalid pipeline setup")?;

    match args.command {
        Command::Select { images } => {
            let candidates = settings::load_candidates(&images);
            let Some(selection) = pipeline.select(&candidates) else {
                log::warn!("no profile photo among {} image(s)", images.len());
                return Ok(ExitCode::from(EXIT_NOT_FOUND));
            };
            let face = selection.face();
            println!(
                "{}\tindex={}\tface={},{},{}x{}",
                selection.source, selection.index, face.x, face.y, face.width, face.height
            );
        }
        Command::Render {
            images,
            output,
            color,
            quality,
        } => {
            let format = OutputFormat::from_path(&output).ok_or_else(|| {
                anyhow!(
                    "unsupported output extension for {} (use .png or .jpg)",
                    output.display()
                )
            })?;
            let color = color.unwrap_or_else(|| pipeline.config().color.to_string());

            let candidates = settings::load_candidates(&images);
            let Some(photo) = pipeline.select_and_render(&candidates, &color)? else {
                log::warn!("no profile photo among {} image(s)", images.len());
                return Ok(ExitCode::from(EXIT_NOT_FOUND));
            };

            let data = photo.encode(format, quality)?;
            if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            fs::write(&output, &data)
                .with_context(|| format!("failed to write {}", output.display()))?;
            log::info!(
                "wrote {} ({} bytes) from {}",
                output.display(),
                data.len(),
                photo.source
            );
            println!("{}\t{}", photo.source, output.display());
        }
    }

    Ok(ExitCode::SUCCESS)
}

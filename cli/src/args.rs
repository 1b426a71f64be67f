use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "spectacles",
    version,
    about = "Pick the profile photo among a page's images and draw glasses on it"
)]
pub struct Args {
    /// TOML file with min-face-fraction, thickness-breakpoints and color
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// SeetaFace frontal face model (seeta_fd_frontal_v1.0.bin)
    #[arg(long, value_name = "PATH", env = "SPECTACLES_FACE_MODEL", global = true)]
    pub face_model: Option<PathBuf>,

    /// Override the minimum share of the image the face must cover
    #[arg(long, value_name = "FRACTION", global = true)]
    pub min_face_fraction: Option<f64>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Report which image is the profile photo
    Select {
        /// Candidate images, in page order
        #[arg(required = true, value_name = "IMAGE")]
        images: Vec<PathBuf>,
    },
    /// Draw glasses on the profile photo and write it out
    Render {
        /// Candidate images, in page order
        #[arg(required = true, value_name = "IMAGE")]
        images: Vec<PathBuf>,

        /// Output file; .png or .jpg
        #[arg(short, long, value_name = "PATH")]
        output: PathBuf,

        /// Frame color (black, red, green, blue, white)
        #[arg(long, value_name = "NAME")]
        color: Option<String>,

        /// JPEG quality from 0.0 to 1.0
        #[arg(long, default_value_t = 0.9, value_name = "Q")]
        quality: f32,
    },
}

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use spectacles::{Candidate, GlassesConfig};

/// Load the TOML configuration, or defaults when no file is given.
pub fn load_config(path: Option<&Path>) -> Result<GlassesConfig> {
    let Some(path) = path else {
        return Ok(GlassesConfig::default());
    };
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config: GlassesConfig = toml::from_str(&content)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    log::debug!("loaded configuration from {}", path.display());
    Ok(config)
}

/// Read candidate files in the given order.
///
/// Unreadable files are logged and left out; a file that reads but does not
/// decode is kept and skipped later by the selector.
pub fn load_candidates(paths: &[PathBuf]) -> Vec<Candidate> {
    paths
        .iter()
        .filter_map(|path| match fs::read(path) {
            Ok(bytes) => Some(Candidate::encoded(path.display().to_string(), bytes)),
            Err(e) => {
                log::warn!("skipping {}: {e}", path.display());
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use spectacles::Color;

    #[test]
    fn no_path_gives_defaults() {
        assert_eq!(load_config(None).unwrap(), GlassesConfig::default());
    }

    #[test]
    fn config_file_is_parsed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spectacles.toml");
        fs::write(&path, "min-face-fraction = 0.5\ncolor = \"blue\"\n").unwrap();
        let config = load_config(Some(path.as_path())).unwrap();
        assert_eq!(config.min_face_fraction, 0.5);
        assert_eq!(config.color, Color::Blue);
    }

    #[test]
    fn bad_config_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "color = \"purple\"\n").unwrap();
        let err = load_config(Some(path.as_path())).unwrap_err();
        assert!(format!("{err:#}").contains("broken.toml"));
    }

    #[test]
    fn missing_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(Some(dir.path().join("nope.toml").as_path())).is_err());
    }

    #[test]
    fn candidates_keep_order_and_skip_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.png");
        let second = dir.path().join("second.png");
        fs::write(&first, b"one").unwrap();
        fs::write(&second, b"two").unwrap();
        let missing = dir.path().join("missing.png");

        let candidates = load_candidates(&[second.clone(), missing, first.clone()]);
        let sources: Vec<String> = candidates.iter().map(|c| c.source.clone()).collect();
        assert_eq!(
            sources,
            vec![second.display().to_string(), first.display().to_string()]
        );
    }
}

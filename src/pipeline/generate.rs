use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use palette::Srgb;
use tracing::{info, warn};

use crate::pipeline::normalize::{title_case, to_slug};
use crate::pipeline::parse::Scheme;
use crate::pipeline::spectrum::render_strip;
use crate::theme::{LessTheme, THEME_EXTENSION};

/// File extension of the preview image.
pub const PREVIEW_EXTENSION: &str = "png";

/// Whether a conversion rewrote the scheme's artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactStatus {
    Updated,
    UpToDate,
}

/// Result of converting one scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    /// Title-cased display name, used for metadata aggregation.
    pub display_name: String,
    pub slug: String,
    pub status: ArtifactStatus,
}

/// The co-located variable file and preview image for one slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub theme: PathBuf,
    pub preview: PathBuf,
}

impl ArtifactPaths {
    pub fn new(dir: &Path, slug: &str) -> Self {
        Self {
            theme: dir.join(format!("{slug}.{THEME_EXTENSION}")),
            preview: dir.join(format!("{slug}.{PREVIEW_EXTENSION}")),
        }
    }

    /// An artifact is stale if either file is missing or the variable file's
    /// bytes differ from `content`. The image is never compared.
    pub fn is_stale(&self, content: &str) -> Result<bool> {
        if !self.theme.exists() || !self.preview.exists() {
            return Ok(true);
        }
        let existing = std::fs::read(&self.theme)
            .with_context(|| format!("failed to read existing theme: {}", self.theme.display()))?;
        Ok(existing != content.as_bytes())
    }
}

/// Preview dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewSize {
    pub width: u32,
    pub height: u32,
}

/// Colors for the preview strip, in palette key order.
///
/// Entries that cannot be decoded are skipped with a warning; they still
/// appear in the variable file.
fn preview_colors(scheme: &Scheme) -> Vec<Srgb<u8>> {
    scheme
        .colors()
        .filter_map(|(key, color)| match color {
            Ok(color) => Some(color.to_srgb_u8()),
            Err(err) => {
                warn!(scheme = %scheme.name, key, "excluded from preview: {err}");
                None
            }
        })
        .collect()
}

/// Generate the variable file and preview image for `scheme` into `dir`,
/// rewriting them only when stale.
pub fn convert_scheme(scheme: &Scheme, dir: &Path, size: PreviewSize) -> Result<Conversion> {
    let slug = to_slug(&scheme.name);
    let paths = ArtifactPaths::new(dir, &slug);
    let theme = LessTheme::from_scheme(scheme);

    let status = if paths.is_stale(&theme.serialize())? {
        theme.write_to(&paths.theme)?;
        render_strip(&preview_colors(scheme), size.width, size.height)
            .save(&paths.preview)
            .with_context(|| format!("failed to write preview to {}", paths.preview.display()))?;
        info!("Update file: {slug}.{THEME_EXTENSION}");
        ArtifactStatus::Updated
    } else {
        info!("File is up to date: {slug}.{THEME_EXTENSION}");
        ArtifactStatus::UpToDate
    };

    Ok(Conversion {
        display_name: title_case(&scheme.name),
        slug,
        status,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    const SIZE: PreviewSize = PreviewSize {
        width: 32,
        height: 4,
    };

    fn scheme(name: &str, base00: &str) -> Scheme {
        Scheme {
            name: name.to_string(),
            author: "Test".to_string(),
            system: "base16".to_string(),
            palette: BTreeMap::from([
                ("base00".to_string(), base00.to_string()),
                ("base01".to_string(), "ffffff".to_string()),
            ]),
        }
    }

    #[test]
    fn first_conversion_writes_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let result = convert_scheme(&scheme("Ocean-dark", "000000"), dir.path(), SIZE).unwrap();

        assert_eq!(result.status, ArtifactStatus::Updated);
        assert_eq!(result.slug, "ocean-dark");
        assert_eq!(result.display_name, "Ocean Dark");
        let paths = ArtifactPaths::new(dir.path(), "ocean-dark");
        assert!(paths.theme.exists());
        assert!(paths.preview.exists());

        let img = image::open(&paths.preview).unwrap().to_rgb8();
        assert_eq!(img.dimensions(), (32, 4));
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0]);
        assert_eq!(img.get_pixel(31, 3).0, [255, 255, 255]);
    }

    #[test]
    fn unchanged_scheme_is_up_to_date() {
        let dir = tempfile::tempdir().unwrap();
        let s = scheme("Ocean", "000000");
        convert_scheme(&s, dir.path(), SIZE).unwrap();
        let paths = ArtifactPaths::new(dir.path(), "ocean");
        let before = std::fs::metadata(&paths.preview).unwrap().modified().unwrap();

        let result = convert_scheme(&s, dir.path(), SIZE).unwrap();

        assert_eq!(result.status, ArtifactStatus::UpToDate);
        let after = std::fs::metadata(&paths.preview).unwrap().modified().unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn changed_palette_rewrites() {
        let dir = tempfile::tempdir().unwrap();
        convert_scheme(&scheme("Ocean", "000000"), dir.path(), SIZE).unwrap();
        let result = convert_scheme(&scheme("Ocean", "111111"), dir.path(), SIZE).unwrap();
        assert_eq!(result.status, ArtifactStatus::Updated);

        let content = std::fs::read_to_string(dir.path().join("ocean.less")).unwrap();
        assert!(content.contains("@base16-color-base00: #111111;"));
    }

    #[test]
    fn missing_preview_forces_rewrite() {
        let dir = tempfile::tempdir().unwrap();
        let s = scheme("Ocean", "000000");
        convert_scheme(&s, dir.path(), SIZE).unwrap();
        std::fs::remove_file(dir.path().join("ocean.png")).unwrap();

        let result = convert_scheme(&s, dir.path(), SIZE).unwrap();

        assert_eq!(result.status, ArtifactStatus::Updated);
        assert!(dir.path().join("ocean.png").exists());
    }

    #[test]
    fn non_utf8_theme_file_is_treated_as_stale() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("ocean.less"), [0xff, 0xfe, 0x00]).unwrap();
        std::fs::write(dir.path().join("ocean.png"), b"png").unwrap();

        let s = scheme("Ocean", "000000");
        let result = convert_scheme(&s, dir.path(), SIZE).unwrap();

        assert_eq!(result.status, ArtifactStatus::Updated);
        let content = std::fs::read_to_string(dir.path().join("ocean.less")).unwrap();
        assert_eq!(content, LessTheme::from_scheme(&s).serialize());
    }

    #[test]
    fn unparsable_color_kept_in_file_but_not_in_preview() {
        let dir = tempfile::tempdir().unwrap();
        convert_scheme(&scheme("Broken", "nothex"), dir.path(), SIZE).unwrap();

        let content = std::fs::read_to_string(dir.path().join("broken.less")).unwrap();
        assert!(content.contains("@base16-color-base00: #NOTHEX;"));

        // only base01 (white) remains, so it fills the whole strip
        let img = image::open(dir.path().join("broken.png")).unwrap().to_rgb8();
        assert!(img.pixels().all(|p| p.0 == [255, 255, 255]));
    }

    #[test]
    fn unwritable_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        let err = convert_scheme(&scheme("Ocean", "000000"), &missing, SIZE).unwrap_err();
        assert!(err.to_string().contains("failed to write theme"));
    }
}

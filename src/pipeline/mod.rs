pub mod aggregate;
pub mod generate;
pub mod normalize;
pub mod parse;
pub mod spectrum;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::{debug, error};

use crate::error::SchemeError;
use crate::readme::write_readme;

use self::generate::{convert_scheme, ArtifactStatus, Conversion, PreviewSize};
use self::parse::load_scheme;

/// Where the optional README listing goes and how it links previews.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadmeConfig {
    pub path: PathBuf,
    pub preview_base_url: String,
}

/// Inputs and outputs of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub source_dir: PathBuf,
    pub output_dir: PathBuf,
    pub settings_path: PathBuf,
    pub package_path: PathBuf,
    pub readme: Option<ReadmeConfig>,
    pub preview: PreviewSize,
}

/// What a run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// One entry per scheme, in processing order.
    pub conversions: Vec<Conversion>,
    /// Number of metadata documents (settings, package, README) rewritten.
    pub metadata_written: usize,
}

impl RunSummary {
    pub fn updated(&self) -> usize {
        self.count(ArtifactStatus::Updated)
    }

    pub fn unchanged(&self) -> usize {
        self.count(ArtifactStatus::UpToDate)
    }

    /// Display names in processing order.
    pub fn names(&self) -> Vec<String> {
        self.conversions
            .iter()
            .map(|c| c.display_name.clone())
            .collect()
    }

    fn count(&self, status: ArtifactStatus) -> usize {
        self.conversions
            .iter()
            .filter(|c| c.status == status)
            .count()
    }
}

/// Whether `path` looks like a scheme document (`*.y*ml`, not hidden).
fn is_scheme_file(path: &Path) -> bool {
    let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    if file_name.starts_with('.') {
        return false;
    }
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ext.len() >= 3 && ext.starts_with('y') && ext.ends_with("ml"))
}

/// List scheme documents in `dir`, sorted by path.
pub fn discover_schemes(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read scheme directory: {}", dir.display()))?;

    let mut schemes = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("failed to read entry in {}", dir.display()))?
            .path();
        if path.is_file() && is_scheme_file(&path) {
            schemes.push(path);
        } else {
            debug!("skipping {}", path.display());
        }
    }
    schemes.sort();
    Ok(schemes)
}

/// Write `content` to `path` unless the file already holds exactly those
/// bytes.
///
/// Returns whether a write happened.
pub(crate) fn write_if_changed(path: &Path, content: &str) -> Result<bool> {
    if path.exists() {
        let existing =
            std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
        if existing == content.as_bytes() {
            return Ok(false);
        }
    }
    std::fs::write(path, content)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(true)
}

/// Convert every scheme in `config.source_dir`, then refresh the metadata
/// documents.
///
/// A malformed scheme is reported and skipped, but the run still fails
/// before any metadata is touched. I/O errors abort immediately.
pub fn run(config: &Config) -> Result<RunSummary> {
    let sources = discover_schemes(&config.source_dir)?;
    std::fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "failed to create output directory: {}",
            config.output_dir.display()
        )
    })?;

    let mut summary = RunSummary::default();
    let mut malformed = Vec::new();
    for path in &sources {
        let scheme = match load_scheme(path) {
            Ok(scheme) => scheme,
            Err(err)
                if err
                    .downcast_ref::<SchemeError>()
                    .is_some_and(SchemeError::is_malformed) =>
            {
                error!("Skipping {}: {err}", path.display());
                malformed.push(path.display().to_string());
                continue;
            }
            Err(err) => return Err(err),
        };
        summary
            .conversions
            .push(convert_scheme(&scheme, &config.output_dir, config.preview)?);
    }

    if !malformed.is_empty() {
        bail!(
            "{} malformed scheme(s), metadata not updated: {}",
            malformed.len(),
            malformed.join(", ")
        );
    }

    let names = summary.names();
    let mut written = [
        aggregate::update_settings(&config.settings_path, &names)?,
        aggregate::update_package(&config.package_path, &names)?,
    ]
    .into_iter()
    .filter(|w| *w)
    .count();
    if let Some(readme) = &config.readme {
        if write_readme(
            &readme.path,
            &summary.conversions,
            &config.output_dir,
            &readme.preview_base_url,
        )? {
            written += 1;
        }
    }
    summary.metadata_written = written;

    Ok(summary)
}

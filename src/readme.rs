use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};

use crate::pipeline::generate::{ArtifactPaths, Conversion};
use crate::pipeline::write_if_changed;
use crate::theme::read_author;

const HEADER: &str = "# Base16 Syntax Theme\n";

/// Build the README scheme listing, one entry per display name in sorted
/// order.
///
/// Each entry uses the slug its conversion actually wrote, so authors are
/// read back from the generated variable files in `artifacts`, and a preview
/// image link is added for every scheme whose image exists.
pub fn render_readme(
    conversions: &[Conversion],
    artifacts: &Path,
    preview_base_url: &str,
) -> Result<String> {
    let base = preview_base_url.trim_end_matches('/');
    let entries: BTreeMap<&str, &str> = conversions
        .iter()
        .map(|c| (c.display_name.as_str(), c.slug.as_str()))
        .collect();

    let mut out = String::from(HEADER);
    for (name, slug) in entries {
        let paths = ArtifactPaths::new(artifacts, slug);
        let content = if paths.theme.exists() {
            let bytes = std::fs::read(&paths.theme)
                .with_context(|| format!("failed to read {}", paths.theme.display()))?;
            String::from_utf8_lossy(&bytes).into_owned()
        } else {
            String::new()
        };
        let author = read_author(&content).unwrap_or("Unknown");
        out.push_str(&format!("\n- {name} (Author: {author})\n"));
        if paths.preview.exists() {
            out.push_str(&format!("![{name}]({base}/{slug}.png)\n"));
        }
    }
    Ok(out)
}

/// Regenerate the README at `path`. Returns whether the file changed.
pub fn write_readme(
    path: &Path,
    conversions: &[Conversion],
    artifacts: &Path,
    preview_base_url: &str,
) -> Result<bool> {
    let content = render_readme(conversions, artifacts, preview_base_url)?;
    write_if_changed(path, &content)
}

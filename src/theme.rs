use std::path::Path;

use anyhow::{Context, Result};

use crate::color::normalize_hex;
use crate::pipeline::parse::Scheme;

/// File extension of the generated variable file.
pub const THEME_EXTENSION: &str = "less";

/// A LESS variable file generated from one scheme.
#[derive(Debug, Clone, Copy)]
pub struct LessTheme<'a> {
    pub scheme: &'a Scheme,
}

impl<'a> LessTheme<'a> {
    /// Create a theme view over a parsed scheme.
    pub fn from_scheme(scheme: &'a Scheme) -> Self {
        Self { scheme }
    }

    /// Serialize the theme to LESS.
    ///
    /// Output is a pure function of the scheme: two header comments followed
    /// by one `@<system>-color-<key>: #RRGGBB;` line per palette entry in
    /// ascending key order.
    pub fn serialize(&self) -> String {
        let scheme = self.scheme;
        let mut out = String::new();
        out.push_str(&format!("//Name: {}\n", scheme.name));
        out.push_str(&format!("//Author: {}\n", scheme.author));
        for (key, hex) in &scheme.palette {
            out.push_str(&format!(
                "@{}-color-{}: {};\n",
                scheme.system,
                key,
                normalize_hex(hex)
            ));
        }
        out
    }

    /// Write the theme to an arbitrary path.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.serialize())
            .with_context(|| format!("failed to write theme to {}", path.display()))
    }
}

/// Read the author back out of a generated variable file.
///
/// Returns `None` when no `//Author:` header is present or it is blank.
pub fn read_author(content: &str) -> Option<&str> {
    content
        .lines()
        .find_map(|line| line.trim_start_matches('/').trim_start().strip_prefix("Author:"))
        .map(str::trim)
        .filter(|author| !author.is_empty())
}

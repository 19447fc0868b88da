use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde_yaml::{Mapping, Value};

use crate::color::Color;
use crate::error::SchemeError;

/// A parsed color scheme.
///
/// The palette is a `BTreeMap` so iteration is in ascending key order, which
/// fixes both the variable order in the generated file and the band order in
/// the preview strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scheme {
    pub name: String,
    pub author: String,
    /// Variable prefix, e.g. `base16`.
    pub system: String,
    /// Color key to raw hex string as written in the document.
    pub palette: BTreeMap<String, String>,
}

impl Scheme {
    /// Decode every palette entry, in key order.
    ///
    /// Entries that fail to decode are returned as errors alongside their key
    /// so the caller can decide how to report them.
    pub fn colors(&self) -> impl Iterator<Item = (&str, Result<Color, SchemeError>)> {
        self.palette
            .iter()
            .map(|(key, hex)| (key.as_str(), Color::from_hex(hex)))
    }
}

/// Parse a scheme from YAML source. `path` is only used for error messages.
pub fn parse_scheme(src: &str, path: &Path) -> Result<Scheme, SchemeError> {
    let doc: Value = serde_yaml::from_str(src).map_err(|source| SchemeError::InvalidYaml {
        path: path.to_path_buf(),
        source,
    })?;

    let field = |name: &'static str| -> Result<String, SchemeError> {
        match doc.get(name) {
            Some(Value::String(s)) => Ok(s.clone()),
            Some(Value::Number(n)) => Ok(n.to_string()),
            Some(Value::Bool(b)) => Ok(b.to_string()),
            Some(_) => Err(SchemeError::WrongFieldType {
                path: path.to_path_buf(),
                field: name,
            }),
            None => Err(SchemeError::MissingField {
                path: path.to_path_buf(),
                field: name,
            }),
        }
    };

    let name = field("name")?;
    let author = field("author")?;
    let system = field("system")?;

    let mapping: &Mapping = match doc.get("palette") {
        Some(Value::Mapping(m)) => m,
        Some(_) => {
            return Err(SchemeError::PaletteNotMapping {
                path: path.to_path_buf(),
            })
        }
        None => {
            return Err(SchemeError::MissingField {
                path: path.to_path_buf(),
                field: "palette",
            })
        }
    };

    let mut palette = BTreeMap::new();
    for (key, value) in mapping {
        let key = match key {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            other => {
                return Err(SchemeError::InvalidPaletteKey {
                    path: path.to_path_buf(),
                    key: format!("{other:?}"),
                })
            }
        };
        match value {
            Value::String(hex) => {
                palette.insert(key, hex.clone());
            }
            _ => {
                return Err(SchemeError::InvalidColorValue {
                    path: path.to_path_buf(),
                    key,
                })
            }
        }
    }

    Ok(Scheme {
        name,
        author,
        system,
        palette,
    })
}

/// Read and parse a scheme document from disk.
///
/// I/O failures surface as plain `anyhow` errors; a malformed document
/// surfaces as a [`SchemeError`] that callers can downcast to.
pub fn load_scheme(path: &Path) -> Result<Scheme> {
    let src = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read scheme: {}", path.display()))?;
    Ok(parse_scheme(&src, path)?)
}

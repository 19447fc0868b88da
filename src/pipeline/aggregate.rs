use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::Value;

use crate::pipeline::normalize::to_keyword;
use crate::pipeline::write_if_changed;

/// Keyword always present in the package keyword list.
pub const BASE_KEYWORD: &str = "base16";

/// Sorted, deduplicated display names.
pub fn scheme_enum<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    names
        .iter()
        .map(|n| n.as_ref().to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Family keywords of every name plus [`BASE_KEYWORD`], sorted.
///
/// Names that normalize to an empty keyword contribute nothing.
pub fn keyword_set<S: AsRef<str>>(names: &[S]) -> BTreeSet<String> {
    names
        .iter()
        .map(|n| to_keyword(n.as_ref()))
        .filter(|k| !k.is_empty())
        .chain(std::iter::once(BASE_KEYWORD.to_string()))
        .collect()
}

fn string_array<I: IntoIterator<Item = String>>(items: I) -> Value {
    Value::Array(items.into_iter().map(Value::String).collect())
}

/// Replace `config.scheme.enum` in a settings document, leaving every other
/// field untouched.
pub fn set_scheme_enum<S: AsRef<str>>(doc: &mut Value, names: &[S]) -> Result<()> {
    let Some(scheme) = doc.pointer_mut("/config/scheme").and_then(Value::as_object_mut) else {
        bail!("settings document has no `config.scheme` object");
    };
    scheme.insert("enum".to_string(), string_array(scheme_enum(names)));
    Ok(())
}

/// Replace `keywords` in a package document, leaving every other field
/// untouched.
pub fn set_keywords<S: AsRef<str>>(doc: &mut Value, names: &[S]) -> Result<()> {
    let Some(root) = doc.as_object_mut() else {
        bail!("package document is not a JSON object");
    };
    root.insert("keywords".to_string(), string_array(keyword_set(names)));
    Ok(())
}

fn read_json(path: &Path) -> Result<Value> {
    let src = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&src).with_context(|| format!("invalid JSON in {}", path.display()))
}

/// Pretty-print with two-space indentation and no trailing newline.
fn to_json_string(doc: &Value) -> Result<String> {
    Ok(serde_json::to_string_pretty(doc)?)
}

fn update_document<F>(path: &Path, edit: F) -> Result<bool>
where
    F: FnOnce(&mut Value) -> Result<()>,
{
    let mut doc = read_json(path)?;
    edit(&mut doc).with_context(|| format!("cannot update {}", path.display()))?;
    write_if_changed(path, &to_json_string(&doc)?)
}

/// Rewrite the scheme list of the settings document at `path`.
///
/// Returns whether the file changed.
pub fn update_settings<S: AsRef<str>>(path: &Path, names: &[S]) -> Result<bool> {
    update_document(path, |doc| set_scheme_enum(doc, names))
}

/// Rewrite the keyword list of the package document at `path`.
///
/// Returns whether the file changed.
pub fn update_package<S: AsRef<str>>(path: &Path, names: &[S]) -> Result<bool> {
    update_document(path, |doc| set_keywords(doc, names))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn enum_is_sorted_and_deduplicated() {
        let names = ["Ocean Light", "Ayu Dark", "Ocean Light", "Ocean Dark"];
        assert_eq!(scheme_enum(&names), ["Ayu Dark", "Ocean Dark", "Ocean Light"]);
    }

    #[test]
    fn keywords_fold_variants_and_include_base() {
        let names = ["Ocean Dark", "Ocean Light", "Ayu Mirage"];
        let keywords: Vec<_> = keyword_set(&names).into_iter().collect();
        assert_eq!(keywords, ["ayu mirage", "base16", "ocean"]);
    }

    #[test]
    fn empty_keywords_are_dropped() {
        let keywords: Vec<_> = keyword_set(&["Dark"]).into_iter().collect();
        assert_eq!(keywords, ["base16", "dark"]);
        let keywords: Vec<_> = keyword_set(&[" Dark"]).into_iter().collect();
        assert_eq!(keywords, ["base16"]);
    }

    #[test]
    fn settings_merge_preserves_unrelated_keys() {
        let mut doc = json!({
            "title": "Base16",
            "config": {
                "scheme": { "type": "string", "default": "Ocean Dark", "enum": ["Old"] },
                "other": { "type": "boolean" }
            }
        });
        set_scheme_enum(&mut doc, &["Ocean Light", "Ocean Dark"]).unwrap();

        assert_eq!(doc["title"], "Base16");
        assert_eq!(doc["config"]["other"], json!({ "type": "boolean" }));
        assert_eq!(doc["config"]["scheme"]["default"], "Ocean Dark");
        assert_eq!(doc["config"]["scheme"]["enum"], json!(["Ocean Dark", "Ocean Light"]));
    }

    #[test]
    fn settings_without_scheme_object_is_an_error() {
        let mut doc = json!({ "config": {} });
        assert!(set_scheme_enum(&mut doc, &["A"]).is_err());
    }

    #[test]
    fn package_merge_preserves_unrelated_keys() {
        let mut doc = json!({ "name": "base16-syntax", "version": "1.0.0", "keywords": [] });
        set_keywords(&mut doc, &["Ocean Dark"]).unwrap();
        assert_eq!(doc["name"], "base16-syntax");
        assert_eq!(doc["version"], "1.0.0");
        assert_eq!(doc["keywords"], json!(["base16", "ocean"]));
    }

    #[test]
    fn package_must_be_object() {
        let mut doc = json!([1, 2]);
        assert!(set_keywords(&mut doc, &["A"]).is_err());
    }

    #[test]
    fn update_keeps_key_order_and_two_space_indent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("package.json");
        std::fs::write(&path, r#"{"version":"1.0.0","name":"x","keywords":[]}"#).unwrap();

        assert!(update_package(&path, &["Ocean Dark"]).unwrap());

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            written,
            "{\n  \"version\": \"1.0.0\",\n  \"name\": \"x\",\n  \"keywords\": [\n    \"base16\",\n    \"ocean\"\n  ]\n}"
        );
    }

    #[test]
    fn update_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"config":{"scheme":{"enum":[]}}}"#).unwrap();

        assert!(update_settings(&path, &["Ocean Dark"]).unwrap());
        assert!(!update_settings(&path, &["Ocean Dark"]).unwrap());
    }

    #[test]
    fn missing_document_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = update_settings(&dir.path().join("nope.json"), &["A"]).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}

use std::sync::LazyLock;

use regex::Regex;

/// Parenthesized one- or two-word qualifier, e.g. `(Dark)` or `(Black Metal)`.
static PAREN_QUALIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\w+\s*\w+\)").expect("static regex"));

/// Variant qualifiers removed from keywords, applied in order.
///
/// A longer qualifier must precede any qualifier it contains
/// (`lighter` before `light`, `high contrast` before `contrast`).
const QUALIFIERS: &[&str] = &[
    "lighter",
    "light",
    "darker",
    "dark",
    "hard",
    "medium",
    "soft",
    "terminal",
    "high contrast",
    "contrast",
    "plus",
    "dimmed",
];

/// Ordered (pattern, replacement) rules built from [`QUALIFIERS`].
///
/// Each qualifier only matches as a whole space-separated word, so
/// `"solarized lightning"` keeps its `lightning`.
static QUALIFIER_RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    QUALIFIERS
        .iter()
        .map(|q| {
            let pattern = format!(r" {}\b", regex::escape(q));
            (Regex::new(&pattern).expect("static regex"), "")
        })
        .collect()
});

/// Convert a scheme display name to a filesystem-safe slug.
///
/// `"Gruvbox dark, hard"` becomes `"gruvbox-dark-hard"`.
pub fn to_slug(name: &str) -> String {
    name.replace(['(', ')', ','], "")
        .replace('é', "e")
        .replace(' ', "-")
        .to_lowercase()
}

/// Convert a scheme display name to its family keyword.
///
/// Variant qualifiers are dropped so that `"Solarized Dark"` and
/// `"Solarized Light"` both yield `"solarized"`. May return an empty string.
pub fn to_keyword(name: &str) -> String {
    let mut keyword = PAREN_QUALIFIER
        .replace_all(name, "")
        .to_lowercase()
        .replace(',', "")
        .replace('é', "e");
    for (pattern, replacement) in QUALIFIER_RULES.iter() {
        keyword = pattern.replace_all(&keyword, *replacement).into_owned();
    }
    keyword.split(' ').filter(|w| !w.is_empty()).collect::<Vec<_>>().join(" ")
}

/// Title-case a name the way the display list expects it.
///
/// Hyphens become spaces. Every letter that follows a non-letter is
/// uppercased and every other letter lowercased, so `"harmonic16-light"`
/// becomes `"Harmonic16 Light"`.
pub fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_alpha = false;
    for c in name.chars() {
        let c = if c == '-' { ' ' } else { c };
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

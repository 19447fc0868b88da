use palette::Srgb;

use crate::error::SchemeError;

/// A 24-bit sRGB color decoded from a scheme palette entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a hex color string like `#ff8800`, `FF8800` or `ff8800`.
    ///
    /// Exactly six hex digits are accepted; shorthand and alpha forms are not.
    pub fn from_hex(hex: &str) -> Result<Self, SchemeError> {
        let digits = hex.trim_matches('#');
        let fail = |reason: String| SchemeError::UnparsableColor {
            value: hex.to_string(),
            reason,
        };
        if digits.len() != 6 {
            return Err(fail(format!(
                "expected 6 hex digits, got {}",
                digits.chars().count()
            )));
        }
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(fail("contains non-hex characters".to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16).map_err(|e| fail(e.to_string()))
        };
        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    /// Serialize to uppercase hex `#RRGGBB`.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Convert to `palette::Srgb<u8>`, the pixel type used for previews.
    pub fn to_srgb_u8(self) -> Srgb<u8> {
        Srgb::new(self.r, self.g, self.b)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Normalize a raw palette value for emission: uppercase with one leading `#`.
///
/// The value is not validated, so an undecodable color is still emitted
/// verbatim (uppercased).
pub fn normalize_hex(raw: &str) -> String {
    let digits = raw.strip_prefix('#').unwrap_or(raw);
    format!("#{}", digits.to_uppercase())
}

//! Convert base16 color schemes into LESS theme variables and preview strips.
//!
//! The pipeline parses each YAML scheme, writes a `.less` variable file and a
//! `.png` palette strip only when the generated text changed, then merges
//! the scheme list and family keywords into the package metadata.

pub mod cli;
pub mod color;
pub mod error;
pub mod pipeline;
pub mod readme;
pub mod theme;

use std::path::PathBuf;

use clap::Parser;

use crate::pipeline::generate::PreviewSize;
use crate::pipeline::spectrum::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::pipeline::{Config, ReadmeConfig};

/// Convert base16 YAML color schemes into LESS variable files with preview
/// strips, and sync the package metadata.
#[derive(Parser, Debug)]
#[command(name = "base16c", version, about)]
pub struct Args {
    /// Directory containing the scheme YAML files
    #[arg(long, default_value = "../schemes/base16")]
    pub source: PathBuf,

    /// Directory the .less and .png files are written to
    #[arg(short, long, default_value = "../styles/schemes")]
    pub output: PathBuf,

    /// Settings JSON whose `config.scheme.enum` lists the schemes
    #[arg(long, default_value = "../lib/base16c_settings.json")]
    pub settings: PathBuf,

    /// package.json whose `keywords` are regenerated
    #[arg(long, default_value = "../package.json")]
    pub package: PathBuf,

    /// Also regenerate a README scheme listing at this path
    #[arg(long)]
    pub readme: Option<PathBuf>,

    /// URL prefix for preview images linked from the README
    #[arg(long, default_value = "styles/schemes")]
    pub preview_base_url: String,

    /// Preview strip width in pixels
    #[arg(long, default_value_t = DEFAULT_WIDTH, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: u32,

    /// Preview strip height in pixels
    #[arg(long, default_value_t = DEFAULT_HEIGHT, value_parser = clap::value_parser!(u32).range(1..))]
    pub height: u32,

    /// Only report warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Pipeline configuration described by these arguments.
    pub fn config(&self) -> Config {
        Config {
            source_dir: self.source.clone(),
            output_dir: self.output.clone(),
            settings_path: self.settings.clone(),
            package_path: self.package.clone(),
            readme: self.readme.as_ref().map(|path| ReadmeConfig {
                path: path.clone(),
                preview_base_url: self.preview_base_url.clone(),
            }),
            preview: PreviewSize {
                width: self.width,
                height: self.height,
            },
        }
    }
}

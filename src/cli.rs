//! Command-line surface
//!
//! `mhtml2pdf <input> [output] [--width <token>] [--height <token>]`

use crate::{ConvertJob, EngineConfig};
use clap::Parser;
use std::path::PathBuf;

/// Usage line printed when no input file is given
pub const USAGE: &str =
    "Usage: mhtml2pdf /path/to/file.mhtml [out.pdf] [--height <val>] [--width <val>]";

/// Convert a saved web page archive into a single-page PDF sized to its content
#[derive(Parser, Debug)]
#[command(name = "mhtml2pdf", version, about, long_about = None)]
pub struct Args {
    /// Archive to convert (.mhtml, .html)
    pub input: Option<PathBuf>,

    /// Where to write the PDF
    #[arg(default_value = "out.pdf")]
    pub output: PathBuf,

    /// Page width: a4, <n>px, <n>in, <n>mm or a bare pixel count
    #[arg(long, num_args = 0..=1, default_missing_value = "true", allow_negative_numbers = true)]
    pub width: Option<String>,

    /// Page height: a4, <n>px, <n>in, <n>mm or a bare pixel count
    #[arg(long, num_args = 0..=1, default_missing_value = "true", allow_negative_numbers = true)]
    pub height: Option<String>,

    /// Milliseconds to wait after load before measuring
    #[arg(long, default_value_t = 250)]
    pub delay_ms: u64,

    /// Navigation timeout in milliseconds
    #[arg(long, default_value_t = 30000)]
    pub timeout_ms: u64,

    /// Keep Chrome's sandbox enabled
    #[arg(long)]
    pub sandbox: bool,

    /// Path to the Chrome/Chromium executable
    #[arg(long)]
    pub chrome: Option<PathBuf>,
}

impl Args {
    /// Engine configuration requested on the command line
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            timeout_ms: self.timeout_ms,
            settle_delay_ms: self.delay_ms,
            sandbox: self.sandbox,
            chrome_path: self.chrome.clone(),
            ..Default::default()
        }
    }

    /// The conversion job, or `None` when no input file was given
    pub fn job(&self) -> Option<ConvertJob> {
        let input = self.input.as_ref()?;
        Some(ConvertJob::new(
            input,
            &self.output,
            self.width.as_deref(),
            self.height.as_deref(),
        ))
    }
}

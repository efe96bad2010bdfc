//! mhtml2pdf
//!
//! Converts a saved web page archive (`.mhtml`, `.html`) into a single-page
//! PDF whose page is as large as the rendered content, by driving a headless
//! browser.
//!
//! # Pipeline
//!
//! 1. Parse optional `--width`/`--height` overrides ([`dimension::parse`])
//! 2. Load the archive from a `file://` URL
//! 3. Measure the content extent in the page, unless both axes are overridden
//!    ([`measure::MEASURE_SCRIPT`])
//! 4. Resolve the export page size and viewport ([`resolve::resolve`])
//! 5. Resize the viewport and export the PDF
//!
//! # Example
//!
//! ```no_run
//! use mhtml2pdf::{async_api::Browser, convert, ConvertJob, EngineConfig};
//!
//! # async fn run() -> mhtml2pdf::Result<()> {
//! let job = ConvertJob::new("page.mhtml", "page.pdf", Some("8.5in"), None);
//! let browser = Browser::new(Some(EngineConfig::default())).await?;
//! let conversion = convert::run(browser, &job).await?;
//! println!("{} x {}", conversion.resolved.export.width, conversion.resolved.export.height);
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

pub mod error;
pub use error::{Error, Result};

pub mod dimension;
pub mod measure;
pub mod resolve;

pub use dimension::{SizeSpec, Unit};
pub use measure::MeasuredExtent;
pub use resolve::{PageSize, ResolvedOutput};

#[cfg(feature = "cdp")]
pub mod cdp;

// Worker-thread backed async handle over any `Engine`
pub mod async_api;

pub mod cli;
pub mod convert;

pub use convert::ConvertJob;

/// Configuration for the rendering engine
///
/// The defaults follow what a one-shot archive conversion needs:
/// - the browser sandbox is disabled, so conversion also works as root or in
///   containers
/// - a short settle delay gives script-driven layout time to finish before
///   anything is measured
///
/// # Examples
///
/// ```
/// let cfg = mhtml2pdf::EngineConfig::default();
/// assert_eq!(cfg.settle_delay_ms, 250);
/// assert!(!cfg.sandbox);
/// ```
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Initial window size, replaced by the resolved viewport before export
    pub viewport: Viewport,
    /// Timeout for navigation in milliseconds
    pub timeout_ms: u64,
    /// Delay after navigation before measuring, in milliseconds
    ///
    /// Navigation is considered done when the page has loaded, which can be
    /// before the network is idle. This delay is a heuristic for deferred
    /// script layout and late resources, not a guarantee.
    pub settle_delay_ms: u64,
    /// Whether to keep Chrome's sandbox enabled
    pub sandbox: bool,
    /// Whether backgrounds are printed into the PDF
    pub print_background: bool,
    /// Explicit browser executable, otherwise auto-detected
    pub chrome_path: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            timeout_ms: 30000,
            settle_delay_ms: 250,
            sandbox: false,
            print_background: true,
            chrome_path: None,
        }
    }
}

/// Viewport dimensions in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

/// Core trait for rendering engine implementations
///
/// An engine drives a single page. All calls are blocking; use
/// [`async_api::Browser`] to drive an engine from async code.
pub trait Engine {
    /// Create a new engine instance with the given configuration
    fn new(config: EngineConfig) -> Result<Self>
    where
        Self: Sized;

    /// Load a URL and wait for the page to settle
    ///
    /// Backends wait for navigation to complete and then sleep for
    /// `EngineConfig::settle_delay_ms`.
    fn load_url(&mut self, url: &str) -> Result<()>;

    /// Measure the full rendered content extent of the current page
    fn measure_content(&mut self) -> Result<MeasuredExtent>;

    /// Resize the rendering surface
    fn set_viewport(&mut self, viewport: Viewport) -> Result<()>;

    /// Export the current page as a single PDF page of the given size
    fn print_pdf(&mut self, page: &PageSize) -> Result<Vec<u8>>;

    /// Close the engine and clean up resources
    fn close(self) -> Result<()>;
}

/// Create a new engine instance with the default backend
#[cfg(feature = "cdp")]
pub fn new_engine(config: EngineConfig) -> Result<impl Engine> {
    cdp::CdpEngine::new(config)
}

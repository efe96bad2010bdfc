//! The conversion pipeline
//!
//! load → (measure) → resolve → resize viewport → export → write file

use crate::async_api::{Browser, Page};
use crate::dimension::{self, SizeSpec};
use crate::resolve::{self, ResolvedOutput};
use crate::{Error, Result};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use url::Url;

/// One archive-to-PDF request
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertJob {
    pub input: PathBuf,
    pub output: PathBuf,
    pub width: Option<SizeSpec>,
    pub height: Option<SizeSpec>,
}

impl ConvertJob {
    /// Build a job from raw override tokens.
    ///
    /// Tokens that don't parse leave their axis to be measured.
    pub fn new(
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
        width: Option<&str>,
        height: Option<&str>,
    ) -> Self {
        Self {
            input: input.as_ref().to_path_buf(),
            output: output.as_ref().to_path_buf(),
            width: parse_override(width, true),
            height: parse_override(height, false),
        }
    }
}

fn parse_override(token: Option<&str>, is_width: bool) -> Option<SizeSpec> {
    let token = token?;
    let spec = dimension::parse(token, is_width);
    if spec.is_none() {
        let axis = if is_width { "width" } else { "height" };
        warn!("Ignoring unrecognized {} '{}'; measuring the page instead", axis, token);
    }
    spec
}

/// Outcome of a finished conversion
#[derive(Debug, Clone)]
pub struct Conversion {
    pub resolved: ResolvedOutput,
    pub output: PathBuf,
    pub bytes_written: usize,
}

/// `file://` URL for a local path, resolved against the working directory.
pub fn file_url(path: &Path) -> Result<Url> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    Url::from_file_path(&absolute)
        .map_err(|_| Error::ConfigError(format!("Cannot build a file URL for {}", absolute.display())))
}

/// Run the conversion pipeline on an open browser.
///
/// The browser is left open; see [`run`] for the variant that always
/// closes it.
pub async fn convert(browser: &Browser, job: &ConvertJob) -> Result<Conversion> {
    let page = browser.page();

    let url = file_url(&job.input)?;
    info!("Loading {}", url);
    page.goto(url.as_str()).await?;

    let resolved = resolve_sizes(&page, job).await?;
    println!(
        "Using PDF size: {} x {}",
        resolved.export.width, resolved.export.height
    );

    page.set_viewport(resolved.viewport).await?;
    let pdf = page.print_pdf(resolved.export).await?;

    std::fs::write(&job.output, &pdf)?;
    info!("Wrote {} bytes to {}", pdf.len(), job.output.display());

    Ok(Conversion {
        resolved,
        output: job.output.clone(),
        bytes_written: pdf.len(),
    })
}

async fn resolve_sizes(page: &Page, job: &ConvertJob) -> Result<ResolvedOutput> {
    let measured = if resolve::needs_measurement(job.width.as_ref(), job.height.as_ref()) {
        Some(page.measure().await?)
    } else {
        debug!("Both dimensions given; skipping measurement");
        None
    };
    Ok(resolve::resolve(job.width, job.height, measured))
}

/// Convert and then close the browser, whether or not conversion succeeded.
///
/// A conversion error takes precedence over a close error.
pub async fn run(browser: Browser, job: &ConvertJob) -> Result<Conversion> {
    let result = convert(&browser, job).await;
    let closed = browser.close().await;
    match (result, closed) {
        (Err(e), closed) => {
            if let Err(close_err) = closed {
                warn!("Failed to close browser after error: {}", close_err);
            }
            Err(e)
        }
        (Ok(conversion), closed) => {
            closed?;
            Ok(conversion)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_parses_tokens() {
        let job = ConvertJob::new("a.mhtml", "a.pdf", Some("a4"), Some("nonsense"));
        assert_eq!(job.width, Some(SizeSpec::inches(8.27)));
        assert_eq!(job.height, None);
    }

    #[test]
    fn relative_paths_resolve_to_absolute_urls() {
        let url = file_url(Path::new("saved/page.mhtml")).unwrap();
        assert_eq!(url.scheme(), "file");
        assert!(url.path().ends_with("/saved/page.mhtml"));
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(url.to_file_path().unwrap(), cwd.join("saved/page.mhtml"));
    }
}

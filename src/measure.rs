//! In-page content measurement
//!
//! The measurement runs inside the page's own JavaScript context, which shares
//! no memory with this process. [`MEASURE_SCRIPT`] is sent to the engine as a
//! script and answers with a JSON object `{"width": .., "height": ..}` that
//! [`MeasuredExtent::from_json`] decodes.

use crate::{Error, Result};
use crate::dimension::round_px;
use serde::Deserialize;

/// Maximum rendered content size in CSS pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MeasuredExtent {
    pub width_px: u32,
    pub height_px: u32,
}

/// Wire form of the script result
#[derive(Deserialize)]
struct RawExtent {
    width: Option<f64>,
    height: Option<f64>,
}

impl MeasuredExtent {
    pub fn new(width_px: u32, height_px: u32) -> Self {
        Self { width_px, height_px }
    }

    /// Decode the value returned by [`MEASURE_SCRIPT`].
    ///
    /// Engines hand the result back either as an object or as the
    /// JSON-stringified form of one; both are accepted. Missing, negative or
    /// null axes decode as 0.
    pub fn from_json(value: &serde_json::Value) -> Result<Self> {
        let value = match value {
            serde_json::Value::String(s) => serde_json::from_str::<serde_json::Value>(s)
                .map_err(|e| Error::MeasureError(format!("Result is not JSON: {}", e)))?,
            other => other.clone(),
        };

        let raw: RawExtent = serde_json::from_value(value)
            .map_err(|e| Error::MeasureError(format!("Unexpected result shape: {}", e)))?;

        Ok(Self {
            width_px: raw.width.map(round_px).unwrap_or(0),
            height_px: raw.height.map(round_px).unwrap_or(0),
        })
    }
}

/// Script evaluated in the page to measure the full content extent.
///
/// Covers the document root and body, every element (scrollable elements
/// only contribute their scroll extent since their box is clipped), and every
/// same-origin frame. Cross-origin frames throw on access and are skipped.
/// Errors while walking elements or frames keep the maxima gathered so far.
pub const MEASURE_SCRIPT: &str = r#"(function() {
    const safeNum = v => (Number.isFinite(v) ? Math.round(v) : 0);
    const root = document.documentElement;
    const body = document.body || {};

    const docW = Math.max(
        root.scrollWidth || 0,
        body.scrollWidth || 0,
        root.offsetWidth || 0,
        body.offsetWidth || 0,
        root.clientWidth || 0
    );
    const docH = Math.max(
        root.scrollHeight || 0,
        body.scrollHeight || 0,
        root.offsetHeight || 0,
        body.offsetHeight || 0,
        window.innerHeight || 0
    );

    const scrolls = v => v === 'auto' || v === 'scroll';
    let maxChildW = 0;
    let maxChildH = 0;
    try {
        const elems = document.querySelectorAll('*');
        for (let i = 0; i < elems.length; i++) {
            const el = elems[i];
            const cs = getComputedStyle(el);
            if (scrolls(cs.overflow) || scrolls(cs.overflowY) || scrolls(cs.overflowX)) {
                maxChildW = Math.max(maxChildW, el.scrollWidth || 0);
                maxChildH = Math.max(maxChildH, el.scrollHeight || 0);
            } else {
                maxChildW = Math.max(maxChildW, el.offsetWidth || 0, el.scrollWidth || 0);
                maxChildH = Math.max(maxChildH, el.offsetHeight || 0, el.scrollHeight || 0);
            }
        }
    } catch (e) {}

    let maxIframeW = 0;
    let maxIframeH = 0;
    try {
        for (let i = 0; i < window.frames.length; i++) {
            try {
                const fdoc = window.frames[i].document;
                maxIframeW = Math.max(maxIframeW, fdoc.documentElement.scrollWidth || 0, fdoc.body.scrollWidth || 0);
                maxIframeH = Math.max(maxIframeH, fdoc.documentElement.scrollHeight || 0, fdoc.body.scrollHeight || 0);
            } catch (e) {}
        }
    } catch (e) {}

    return JSON.stringify({
        width: safeNum(Math.max(docW, maxChildW, maxIframeW)),
        height: safeNum(Math.max(docH, maxChildH, maxIframeH))
    });
})()"#;

//! Page and viewport size resolution
//!
//! Combines the user's `--width`/`--height` overrides with the measured
//! content extent. Each axis is resolved independently into an export size
//! (the physical PDF page edge, in the user's own unit when given) and a
//! viewport size in pixels for the rendering surface.

use crate::dimension::SizeSpec;
use crate::measure::MeasuredExtent;
use crate::Viewport;
use log::{debug, warn};

/// Tallest viewport, and therefore tallest page, ever produced
pub const MAX_HEIGHT_PX: u32 = 20_000;

/// Narrowest viewport handed to the rendering surface
pub const MIN_WIDTH_PX: u32 = 200;

/// Physical size of the single exported page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: SizeSpec,
    pub height: SizeSpec,
}

/// Sizes derived for one conversion run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedOutput {
    /// Page size passed to the PDF export
    pub export: PageSize,
    /// Rendering surface configured before export
    pub viewport: Viewport,
    /// Viewport height before the [`MAX_HEIGHT_PX`] clamp, when it applied
    pub clamped_from: Option<u32>,
}

/// Whether resolving these overrides needs an in-page measurement.
///
/// Measuring is skipped only when both axes are overridden.
pub fn needs_measurement(width: Option<&SizeSpec>, height: Option<&SizeSpec>) -> bool {
    width.is_none() || height.is_none()
}

/// Resolve export and viewport sizes.
///
/// `measured` is only read for axes without an override. A missing
/// measurement counts as a zero extent.
pub fn resolve(
    width: Option<SizeSpec>,
    height: Option<SizeSpec>,
    measured: Option<MeasuredExtent>,
) -> ResolvedOutput {
    let measured = measured.unwrap_or_default();

    let (export_width, viewport_width) = resolve_axis(width, measured.width_px);
    let (mut export_height, mut viewport_height) = resolve_axis(height, measured.height_px);

    let mut clamped_from = None;
    if viewport_height > MAX_HEIGHT_PX {
        warn!(
            "Measured/calc height {}px exceeds cap {}px. Capping.",
            viewport_height, MAX_HEIGHT_PX
        );
        clamped_from = Some(viewport_height);
        viewport_height = MAX_HEIGHT_PX;
        export_height = SizeSpec::px(MAX_HEIGHT_PX);
    }

    let viewport = Viewport {
        width: viewport_width.max(MIN_WIDTH_PX),
        height: viewport_height.min(MAX_HEIGHT_PX),
    };
    debug!(
        "Resolved export {} x {}, viewport {}x{}",
        export_width, export_height, viewport.width, viewport.height
    );

    ResolvedOutput {
        export: PageSize {
            width: export_width,
            height: export_height,
        },
        viewport,
        clamped_from,
    }
}

fn resolve_axis(user: Option<SizeSpec>, measured_px: u32) -> (SizeSpec, u32) {
    match user {
        Some(spec) => (spec, spec.to_px()),
        None => (SizeSpec::px(measured_px), measured_px),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimension::parse;

    #[test]
    fn measured_axes_export_in_pixels() {
        let out = resolve(None, None, Some(MeasuredExtent::new(1024, 3000)));
        assert_eq!(out.export.width.to_string(), "1024px");
        assert_eq!(out.export.height.to_string(), "3000px");
        assert_eq!(out.viewport, Viewport { width: 1024, height: 3000 });
        assert_eq!(out.clamped_from, None);
    }

    #[test]
    fn tall_scrollable_document_is_clamped() {
        let out = resolve(None, None, Some(MeasuredExtent::new(1200, 30000)));
        assert_eq!(out.export.width.to_string(), "1200px");
        assert_eq!(out.export.height.to_string(), "20000px");
        assert_eq!(out.viewport, Viewport { width: 1200, height: 20000 });
        assert_eq!(out.clamped_from, Some(30000));
    }

    #[test]
    fn user_height_is_clamped_too() {
        let out = resolve(None, parse("300in", false), Some(MeasuredExtent::new(800, 600)));
        assert_eq!(out.clamped_from, Some(28800));
        assert_eq!(out.export.height, SizeSpec::px(MAX_HEIGHT_PX));
        assert_eq!(out.viewport.height, MAX_HEIGHT_PX);
    }

    #[test]
    fn height_at_cap_is_untouched() {
        let out = resolve(None, Some(SizeSpec::px(20000)), Some(MeasuredExtent::new(800, 1)));
        assert_eq!(out.clamped_from, None);
        assert_eq!(out.export.height.to_string(), "20000px");
    }

    #[test]
    fn physical_overrides_convert_for_viewport() {
        let out = resolve(parse("8.5in", true), parse("11in", false), None);
        assert_eq!(out.export.width.to_string(), "8.5in");
        assert_eq!(out.export.height.to_string(), "11in");
        assert_eq!(out.viewport, Viewport { width: 816, height: 1056 });

        let out = resolve(parse("a4", true), parse("297mm", false), None);
        assert_eq!(out.export.width.to_string(), "8.27in");
        assert_eq!(out.export.height.to_string(), "297mm");
        assert_eq!(out.viewport, Viewport { width: 794, height: 1123 });
    }

    #[test]
    fn width_floor_leaves_export_alone() {
        let out = resolve(Some(SizeSpec::px(50)), None, Some(MeasuredExtent::new(10, 400)));
        assert_eq!(out.viewport.width, MIN_WIDTH_PX);
        assert_eq!(out.export.width.to_string(), "50px");

        let out = resolve(None, None, Some(MeasuredExtent::new(120, 400)));
        assert_eq!(out.viewport.width, MIN_WIDTH_PX);
        assert_eq!(out.export.width.to_string(), "120px");
    }

    #[test]
    fn one_override_mixes_with_measurement() {
        let out = resolve(parse("210mm", true), None, Some(MeasuredExtent::new(1500, 900)));
        assert_eq!(out.export.width.to_string(), "210mm");
        assert_eq!(out.export.height.to_string(), "900px");
        assert_eq!(out.viewport, Viewport { width: 794, height: 900 });
    }

    #[test]
    fn clamp_and_floor_hold_across_heights_and_widths() {
        for h in [0u32, 1, 199, 19_999, 20_000, 20_001, 1_000_000] {
            for w in [0u32, 199, 200, 201, 5000] {
                let out = resolve(None, None, Some(MeasuredExtent::new(w, h)));
                assert_eq!(out.viewport.height, h.min(MAX_HEIGHT_PX));
                assert_eq!(out.viewport.width, w.max(MIN_WIDTH_PX));
                if h > MAX_HEIGHT_PX {
                    assert_eq!(out.export.height.to_string(), "20000px");
                }
            }
        }
    }

    #[test]
    fn export_strings_parse_back_to_overrides() {
        for (w, h) in [("8.5in", "11in"), ("210mm", "297mm"), ("a4", "a4")] {
            let (w, h) = (parse(w, true), parse(h, false));
            let out = resolve(w, h, None);
            assert_eq!(parse(&out.export.width.to_string(), true), w);
            assert_eq!(parse(&out.export.height.to_string(), false), h);
        }
    }

    #[test]
    fn measurement_needed_unless_both_overridden() {
        let spec = SizeSpec::px(100);
        assert!(needs_measurement(None, None));
        assert!(needs_measurement(Some(&spec), None));
        assert!(needs_measurement(None, Some(&spec)));
        assert!(!needs_measurement(Some(&spec), Some(&spec)));
    }
}

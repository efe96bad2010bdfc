//! Page dimension tokens
//!
//! Turns user-supplied size tokens such as `"8.5in"`, `"210mm"`, `"a4"` or a
//! bare `"900"` into a normalized [`SizeSpec`]. Parsing is permissive: a
//! token that doesn't match any known form yields `None` and the caller
//! measures that axis instead.

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// CSS reference pixels per inch
pub const PX_PER_INCH: f64 = 96.0;

/// Millimetres per inch
pub const MM_PER_INCH: f64 = 25.4;

/// A4 portrait width in inches
pub const A4_WIDTH_IN: f64 = 8.27;

/// A4 portrait height in inches
pub const A4_HEIGHT_IN: f64 = 11.69;

/// Length unit of a [`SizeSpec`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    Px,
    In,
    Mm,
}

impl Unit {
    /// Suffix used when formatting a size for export
    pub fn suffix(self) -> &'static str {
        match self {
            Unit::Px => "px",
            Unit::In => "in",
            Unit::Mm => "mm",
        }
    }
}

/// A normalized page dimension
///
/// Pixel magnitudes are always whole numbers. Use [`SizeSpec::px`],
/// [`SizeSpec::inches`] or [`SizeSpec::mm`] to build one, or [`parse`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeSpec {
    unit: Unit,
    magnitude: f64,
}

impl SizeSpec {
    /// A whole-pixel size.
    pub fn px(value: u32) -> Self {
        Self {
            unit: Unit::Px,
            magnitude: f64::from(value),
        }
    }

    pub fn inches(value: f64) -> Self {
        Self {
            unit: Unit::In,
            magnitude: value,
        }
    }

    pub fn mm(value: f64) -> Self {
        Self {
            unit: Unit::Mm,
            magnitude: value,
        }
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    /// Size in CSS pixels, rounded to the nearest whole pixel.
    pub fn to_px(&self) -> u32 {
        let px = match self.unit {
            Unit::Px => self.magnitude,
            Unit::In => self.magnitude * PX_PER_INCH,
            Unit::Mm => self.magnitude / MM_PER_INCH * PX_PER_INCH,
        };
        round_px(px)
    }

    /// Size in inches, unrounded. The DevTools print API takes paper sizes in inches.
    pub fn to_inches(&self) -> f64 {
        match self.unit {
            Unit::Px => self.magnitude / PX_PER_INCH,
            Unit::In => self.magnitude,
            Unit::Mm => self.magnitude / MM_PER_INCH,
        }
    }
}

impl fmt::Display for SizeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.magnitude, self.unit.suffix())
    }
}

/// Round a non-negative pixel value half-up, saturating into `u32`.
///
/// Negative and non-finite values become 0.
pub(crate) fn round_px(value: f64) -> u32 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    let rounded = value.round();
    if rounded >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        rounded as u32
    }
}

fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([0-9]*\.?[0-9]+)\s*(px|in|mm)?$").expect("dimension pattern is valid")
    })
}

/// Parse a size token for one axis.
///
/// `"a4"` maps to the A4 portrait edge for the requested axis. Anything else
/// must be a non-negative decimal with an optional `px`, `in` or `mm` suffix;
/// a missing suffix means pixels. Physical sizes must be greater than zero.
pub fn parse(token: &str, is_width: bool) -> Option<SizeSpec> {
    let token = token.trim().to_lowercase();

    if token == "a4" {
        let inches = if is_width { A4_WIDTH_IN } else { A4_HEIGHT_IN };
        return Some(SizeSpec::inches(inches));
    }

    let caps = token_pattern().captures(&token)?;
    let value: f64 = caps.get(1)?.as_str().parse().ok()?;

    match caps.get(2).map(|m| m.as_str()).unwrap_or("px") {
        "px" => Some(SizeSpec::px(round_px(value))),
        // a zero-sized physical page can't be printed
        "in" if value > 0.0 => Some(SizeSpec::inches(value)),
        "mm" if value > 0.0 => Some(SizeSpec::mm(value)),
        _ => None,
    }
}

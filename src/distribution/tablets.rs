//! Tablet-count formatting for 5 mg tablets

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Strength of one tablet, mg
pub const TABLET_MG: Decimal = dec!(5);

const QUARTER_GLYPHS: [&str; 4] = ["", "¼", "½", "¾"];

/// Express `mg` as a count of 5 mg tablets
///
/// Quarter-tablet amounts use glyphs (`"½"`, `"1 ¾"`, `"2"`). Anything not on a
/// quarter boundary falls back to a numeric remainder: 6 mg → `"1 +0.2"`.
pub fn format_tablets(mg: Decimal) -> String {
    let tablets = mg / TABLET_MG;
    let quarters = tablets * dec!(4);

    if quarters.fract().is_zero() {
        let whole = (quarters / dec!(4)).trunc();
        let glyph = (quarters % dec!(4))
            .to_usize()
            .and_then(|r| QUARTER_GLYPHS.get(r).copied())
            .unwrap_or("");
        return match (whole.is_zero(), glyph.is_empty()) {
            (true, true) => "0".to_string(),
            (true, false) => glyph.to_string(),
            (false, true) => whole.normalize().to_string(),
            (false, false) => format!("{} {}", whole.normalize(), glyph),
        };
    }

    let whole = tablets.trunc();
    let fraction = (tablets - whole).round_dp(2).normalize();
    format!("{} +{}", whole.normalize(), fraction)
}

/// [`format_tablets`] followed by "tablet" or "tablets"
///
/// Amounts up to one tablet read as singular: `"½ tablet"`, `"1 tablet"`,
/// `"1 ½ tablets"`.
pub fn describe_tablets(mg: Decimal) -> String {
    let noun = if mg > Decimal::ZERO && mg <= TABLET_MG {
        "tablet"
    } else {
        "tablets"
    };
    format!("{} {}", format_tablets(mg), noun)
}

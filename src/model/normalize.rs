//! Cell value normalization.
//!
//! Worksheet cells arrive as a mix of integers, decimals with either `.` or
//! `,` as separator, spreadsheet placeholders (`nan`, `None`), and free text
//! ("ca. 4"). Numeric fields are canonicalized to a base-10 integer string;
//! anything that does not parse is kept as trimmed text. Every function here
//! is total and idempotent.

use super::types::{Field, Record};

/// Values that spreadsheet exports use for "no value".
fn is_placeholder(trimmed: &str) -> bool {
    trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("nan")
        || trimmed.eq_ignore_ascii_case("none")
}

/// Canonicalize a numeric cell.
///
/// - `None`, blank, `nan`, `none` (any case) → `""`.
/// - Parses after trimming and replacing `,` with `.`; a finite result is
///   truncated toward zero and rendered as an integer string.
/// - Otherwise the trimmed input is returned unchanged.
///
/// ```
/// use glasstock::model::normalize::normalize_numeric;
///
/// assert_eq!(normalize_numeric(Some("5,0")), "5");
/// assert_eq!(normalize_numeric(Some(" 7.9 ")), "7");
/// assert_eq!(normalize_numeric(Some("ca")), "ca");
/// assert_eq!(normalize_numeric(None), "");
/// ```
#[must_use]
pub fn normalize_numeric(value: Option<&str>) -> String {
    let Some(value) = value else {
        return String::new();
    };
    let trimmed = value.trim();
    if is_placeholder(trimmed) {
        return String::new();
    }

    match trimmed.replace(',', ".").parse::<f64>() {
        Ok(parsed) if parsed.is_finite() => integer_string(parsed.trunc()),
        _ => trimmed.to_owned(),
    }
}

/// Render an already-truncated finite float as an integer string.
#[allow(clippy::cast_possible_truncation)]
fn integer_string(truncated: f64) -> String {
    // i64 covers every quantity that can occur; the float path keeps huge
    // inputs exact without exponent notation.
    const LIMIT: f64 = 9_007_199_254_740_992.0; // 2^53
    if truncated == 0.0 {
        "0".to_owned()
    } else if truncated.abs() <= LIMIT {
        (truncated as i64).to_string()
    } else {
        format!("{truncated:.0}")
    }
}

/// Coerce a text cell: `None` and spreadsheet placeholders become `""`,
/// everything else is kept as is.
#[must_use]
pub fn normalize_text(value: Option<&str>) -> String {
    match value {
        Some(v) if !is_placeholder(v.trim()) => v.to_owned(),
        _ => String::new(),
    }
}

/// Normalize one field value according to its kind.
#[must_use]
pub fn normalize_field(field: Field, value: Option<&str>) -> String {
    if field.is_numeric() {
        normalize_numeric(value)
    } else {
        normalize_text(value)
    }
}

/// Normalize every field of `record` in place. Returns `true` if anything
/// changed.
pub fn normalize_record(record: &mut Record) -> bool {
    let mut changed = false;
    for field in Field::ALL {
        let normalized = normalize_field(field, Some(record.get(field)));
        if normalized != record.get(field) {
            record.set(field, normalized);
            changed = true;
        }
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documented_examples() {
        assert_eq!(normalize_numeric(Some("5,0")), "5");
        assert_eq!(normalize_numeric(Some(" 7.9 ")), "7");
        assert_eq!(normalize_numeric(Some("ca")), "ca");
        assert_eq!(normalize_numeric(None), "");
        assert_eq!(normalize_numeric(Some("nan")), "");
    }

    #[test]
    fn placeholders_are_empty() {
        for input in ["", "   ", "NaN", "NAN", "None", "none", " nan "] {
            assert_eq!(normalize_numeric(Some(input)), "", "input {input:?}");
            assert_eq!(normalize_text(Some(input)), "", "input {input:?}");
        }
        assert_eq!(normalize_text(None), "");
    }

    #[test]
    fn truncates_toward_zero() {
        assert_eq!(normalize_numeric(Some("-3.7")), "-3");
        assert_eq!(normalize_numeric(Some("-0.5")), "0");
        assert_eq!(normalize_numeric(Some("0,99")), "0");
        assert_eq!(normalize_numeric(Some("12")), "12");
    }

    #[test]
    fn accepts_float_syntax() {
        assert_eq!(normalize_numeric(Some("+4")), "4");
        assert_eq!(normalize_numeric(Some(".5")), "0");
        assert_eq!(normalize_numeric(Some("1e3")), "1000");
        assert_eq!(normalize_numeric(Some("6.")), "6");
    }

    #[test]
    fn large_values_have_no_exponent() {
        assert_eq!(normalize_numeric(Some("1e20")), "100000000000000000000");
    }

    #[test]
    fn non_numeric_text_is_trimmed_only() {
        assert_eq!(normalize_numeric(Some("  ca. 4 ")), "ca. 4");
        assert_eq!(normalize_numeric(Some("4,5,6")), "4,5,6");
        assert_eq!(normalize_numeric(Some("12 mm")), "12 mm");
    }

    #[test]
    fn infinities_are_text() {
        assert_eq!(normalize_numeric(Some("inf")), "inf");
        assert_eq!(normalize_numeric(Some("-Infinity")), "-Infinity");
    }

    #[test]
    fn text_fields_keep_inner_whitespace() {
        assert_eq!(normalize_text(Some(" Float 4mm ")), " Float 4mm ");
    }

    #[test]
    fn normalize_record_touches_numeric_fields() {
        let mut record = Record::new("x")
            .with(Field::Quantity, "5,0")
            .with(Field::CavityGap, "15.9")
            .with(Field::Width, "1200,5")
            .with(Field::Description, "nan");
        assert!(normalize_record(&mut record));
        assert_eq!(record.get(Field::Quantity), "5");
        assert_eq!(record.get(Field::CavityGap), "15");
        assert_eq!(record.get(Field::Width), "1200,5");
        assert_eq!(record.get(Field::Description), "");
        assert!(!normalize_record(&mut record));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_cell() -> impl Strategy<Value = Option<String>> {
        prop_oneof![
            Just(None),
            any::<String>().prop_map(Some),
            "[ ]{0,2}-?[0-9]{1,8}([.,][0-9]{0,4})?[ ]{0,2}".prop_map(Some),
            any::<f64>().prop_map(|f| Some(f.to_string())),
        ]
    }

    proptest! {
        #[test]
        fn prop_numeric_idempotent(cell in arb_cell()) {
            let once = normalize_numeric(cell.as_deref());
            let twice = normalize_numeric(Some(&once));
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_text_idempotent(cell in arb_cell()) {
            let once = normalize_text(cell.as_deref());
            let twice = normalize_text(Some(&once));
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_numbers_become_integers(n in -1_000_000i64..1_000_000, frac in 0u32..1000) {
            let input = format!("{n},{frac}");
            let out = normalize_numeric(Some(&input));
            prop_assert!(out.parse::<i64>().is_ok(), "{} -> {}", input, out);
        }
    }
}

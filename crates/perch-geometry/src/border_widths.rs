//! Border widths from computed style

use perch_dom::{Document, NodeId};

/// Border widths in pixels
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BorderWidths {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Length parsing error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LengthParseError {
    #[error("Length has no leading integer: {0:?}")]
    NotANumber(String),
    #[error("Length out of range: {0:?}")]
    OutOfRange(String),
}

/// Parse the leading integer of a CSS length, like `parseInt(value, 10)`
///
/// `"2px"` and `"1.75px"` give `2` and `1`; `"thin"` and `""` are errors.
pub fn parse_css_int(value: &str) -> Result<i32, LengthParseError> {
    let trimmed = value.trim_start();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = unsigned.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return Err(LengthParseError::NotANumber(value.to_string()));
    }

    let magnitude: i64 = unsigned[..digits_len]
        .parse()
        .map_err(|_| LengthParseError::OutOfRange(value.to_string()))?;
    let signed = if negative { -magnitude } else { magnitude };

    i32::try_from(signed).map_err(|_| LengthParseError::OutOfRange(value.to_string()))
}

/// Border widths of an element
///
/// Unparsable values count as `0` so they cannot poison later area math.
pub fn get_border_widths(document: &Document, element: NodeId) -> BorderWidths {
    let Some(style) = document.computed_style(element) else {
        return BorderWidths::default();
    };

    let parse = |side: &str, value: &str| -> f64 {
        match parse_css_int(value) {
            Ok(px) => f64::from(px),
            Err(err) => {
                tracing::debug!("Treating border-{}-width of {:?} as 0: {}", side, element, err);
                0.0
            }
        }
    };

    BorderWidths {
        top: parse("top", &style.border_top_width),
        right: parse("right", &style.border_right_width),
        bottom: parse("bottom", &style.border_bottom_width),
        left: parse("left", &style.border_left_width),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_int_prefix() {
        assert_eq!(parse_css_int("2px"), Ok(2));
        assert_eq!(parse_css_int("  15px"), Ok(15));
        assert_eq!(parse_css_int("1.75px"), Ok(1));
        assert_eq!(parse_css_int("-3px"), Ok(-3));
        assert_eq!(parse_css_int("+4"), Ok(4));
        assert_eq!(parse_css_int("0"), Ok(0));
    }

    #[test]
    fn test_parse_int_errors() {
        assert!(matches!(parse_css_int(""), Err(LengthParseError::NotANumber(_))));
        assert!(matches!(parse_css_int("thin"), Err(LengthParseError::NotANumber(_))));
        assert!(matches!(parse_css_int("-px"), Err(LengthParseError::NotANumber(_))));
        assert!(matches!(parse_css_int("99999999999px"), Err(LengthParseError::OutOfRange(_))));
    }

    #[test]
    fn test_border_widths() {
        let mut doc = Document::default();
        let div = doc.append_element(doc.body(), "div").unwrap();
        {
            let style = doc.tree_mut().style_mut(div).unwrap();
            style.border_top_width = "1px".to_string();
            style.border_right_width = "2px".to_string();
            style.border_bottom_width = "3.9px".to_string();
            style.border_left_width = "medium".to_string();
        }

        assert_eq!(
            get_border_widths(&doc, div),
            BorderWidths { top: 1.0, right: 2.0, bottom: 3.0, left: 0.0 }
        );
    }

    #[test]
    fn test_border_widths_of_non_element() {
        let mut doc = Document::default();
        let text = doc.tree_mut().create_text("x");

        assert_eq!(get_border_widths(&doc, text), BorderWidths::default());
    }
}

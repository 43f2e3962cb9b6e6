use crate::error::{Result, StudioError};

/// A replacement for the half-open span `[start, end)` of some original
/// text. Offsets are byte positions into that original text and must land
/// on character boundaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Correction {
    pub start: usize,
    pub end: usize,
    pub replacement: String,
}

impl Correction {
    pub fn new(start: usize, end: usize, replacement: impl Into<String>) -> Self {
        Self {
            start,
            end,
            replacement: replacement.into(),
        }
    }
}

/// Apply corrections to `text` without positional drift: every span is
/// validated against the original text, then replacements are spliced in
/// descending start order so earlier offsets stay valid. Overlapping or
/// out-of-bounds spans are rejected before any edit is made.
pub fn apply_corrections(text: &str, corrections: &[Correction]) -> Result<String> {
    for c in corrections {
        if c.start > c.end {
            return Err(StudioError::invalid_span(c.start, c.end, "start is past end"));
        }
        if c.end > text.len() {
            return Err(StudioError::invalid_span(c.start, c.end, "span is out of bounds"));
        }
        if !text.is_char_boundary(c.start) || !text.is_char_boundary(c.end) {
            return Err(StudioError::invalid_span(
                c.start,
                c.end,
                "span does not land on character boundaries",
            ));
        }
    }

    let mut ordered: Vec<&Correction> = corrections.iter().collect();
    ordered.sort_by(|a, b| b.start.cmp(&a.start));

    for pair in ordered.windows(2) {
        let (later, earlier) = (pair[0], pair[1]);
        if earlier.end > later.start {
            return Err(StudioError::invalid_span(
                earlier.start,
                earlier.end,
                format!("span overlaps {}..{}", later.start, later.end),
            ));
        }
    }

    let mut result = text.to_string();
    for c in ordered {
        result.replace_range(c.start..c.end, &c.replacement);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_correction() {
        let result = apply_corrections("The qick fox", &[Correction::new(4, 8, "quick")]).unwrap();
        assert_eq!(result, "The quick fox");
    }

    #[test]
    fn test_corrections_apply_in_descending_order() {
        // Given in ascending order; sorting must keep the second span valid
        // even though the first replacement changes the string length.
        let corrections = vec![
            Correction::new(2, 4, "BEE"),
            Correction::new(5, 8, "SEE"),
        ];
        let result = apply_corrections("a bb ccc", &corrections).unwrap();
        assert_eq!(result, "a BEE SEE");
    }

    #[test]
    fn test_overlapping_spans_rejected() {
        let corrections = vec![
            Correction::new(0, 4, "aaaa"),
            Correction::new(3, 6, "bbb"),
        ];
        let err = apply_corrections("abcdef", &corrections);
        assert!(matches!(err, Err(StudioError::InvalidSpan { .. })));
    }

    #[test]
    fn test_out_of_bounds_span_rejected() {
        let err = apply_corrections("short", &[Correction::new(2, 99, "x")]);
        assert!(matches!(err, Err(StudioError::InvalidSpan { .. })));

        let err = apply_corrections("short", &[Correction::new(4, 2, "x")]);
        assert!(matches!(err, Err(StudioError::InvalidSpan { .. })));
    }

    #[test]
    fn test_non_char_boundary_rejected() {
        // "é" is two bytes; offset 1 splits it.
        let err = apply_corrections("é", &[Correction::new(1, 2, "x")]);
        assert!(matches!(err, Err(StudioError::InvalidSpan { .. })));
    }
}

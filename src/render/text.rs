/// Backend-independent width estimate for a single-line label.
///
/// Layout decisions (legend truncation, tick bar fitting) use this so they
/// stay deterministic under the headless renderer.
#[must_use]
pub fn estimate_text_width_px(text: &str, font_size_px: f64) -> f64 {
    if text.is_empty() {
        return 0.0;
    }
    let units = text.chars().fold(0.0, |acc, ch| {
        acc + match ch {
            '0'..='9' => 0.62,
            '.' | ',' => 0.34,
            '-' | '+' | '%' => 0.42,
            ' ' => 0.33,
            _ => 0.58,
        }
    });
    (units * font_size_px).max(font_size_px)
}

#[cfg(test)]
mod tests {
    use super::estimate_text_width_px;

    #[test]
    fn width_grows_with_text_and_font() {
        assert_eq!(estimate_text_width_px("", 12.0), 0.0);
        assert_eq!(estimate_text_width_px("1", 10.0), 10.0);
        let short = estimate_text_width_px("0.50", 12.0);
        let long = estimate_text_width_px("100.50", 12.0);
        assert!(long > short);
        assert!(estimate_text_width_px("0.50", 24.0) > short);
    }
}

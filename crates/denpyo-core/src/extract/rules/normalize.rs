//! Whitespace normalization for OCR and text-layer output.
//!
//! OCR engines and PDF text layers frequently insert spaces between the
//! ideographs of a single word ("見 積 書"), and mix ASCII, full-width and
//! line-break whitespace freely. Every whitespace character is mapped to one
//! canonical delimiter so the pattern matchers only have to tolerate a single
//! character class.

/// Canonical token delimiter.
pub const DELIMITER: char = ' ';

/// Text with every whitespace variant replaced by [`DELIMITER`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText {
    text: String,
}

impl NormalizedText {
    /// Normalize raw document text.
    pub fn new(raw: &str) -> Self {
        Self {
            text: raw.chars().map(fold_char).collect(),
        }
    }

    /// The delimiter-substituted text, for pattern matchers.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Non-empty fragments between delimiters, in text order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.text.split(DELIMITER).filter(|w| !w.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.words().next().is_none()
    }
}

impl From<&str> for NormalizedText {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// Normalize raw document text.
pub fn normalize(raw: &str) -> NormalizedText {
    NormalizedText::new(raw)
}

fn fold_char(c: char) -> char {
    match c {
        c if c.is_whitespace() => DELIMITER,
        // Full-width digits
        '\u{FF10}'..='\u{FF19}' => {
            char::from_digit(c as u32 - 0xFF10, 10).unwrap_or(c)
        }
        '，' => ',',
        '／' => '/',
        '－' => '-',
        _ => c,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_whitespace_variants_become_delimiter() {
        let text = normalize("見\t積\n書\r\n株式会社\u{3000}ABC");
        assert_eq!(text.as_str(), "見 積 書  株式会社 ABC");
    }

    #[test]
    fn test_words_skip_empty_fragments() {
        let text = normalize("  見積書\n\n\u{3000}株式会社ABC  ");
        let words: Vec<&str> = text.words().collect();
        assert_eq!(words, vec!["見積書", "株式会社ABC"]);
    }

    #[test]
    fn test_full_width_digits_folded() {
        let text = normalize("令和５年４月１日 合計 ９８，０００円 ２０２４／１／２");
        assert_eq!(text.as_str(), "令和5年4月1日 合計 98,000円 2024/1/2");
    }

    #[test]
    fn test_empty_input() {
        assert!(normalize("").is_empty());
        assert!(normalize(" \n\t\u{3000}").is_empty());
        assert!(!normalize("x").is_empty());
    }
}

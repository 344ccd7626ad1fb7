//! Unicode escaping for generated sources.
//!
//! Every character outside ASCII is written as `\uXXXX`, one escape per
//! UTF-16 code unit, so generated files read the same in any platform
//! encoding.

use std::fmt;

/// A [`fmt::Write`] adapter that escapes non-ASCII characters.
#[derive(Debug, Default)]
pub struct UnicodeEscaper<W> {
    inner: W,
}

impl<W: fmt::Write> UnicodeEscaper<W> {
    /// Wraps `inner`.
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Returns the wrapped writer.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: fmt::Write> fmt::Write for UnicodeEscaper<W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let mut start = 0;
        for (i, c) in s.char_indices() {
            if c.is_ascii() {
                continue;
            }
            self.inner.write_str(&s[start..i])?;
            let mut units = [0u16; 2];
            for unit in c.encode_utf16(&mut units) {
                write!(self.inner, "\\u{unit:04X}")?;
            }
            start = i + c.len_utf8();
        }
        self.inner.write_str(&s[start..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt::Write;

    fn escape_unicode(text: &str) -> String {
        let mut escaper = UnicodeEscaper::new(String::new());
        escaper.write_str(text).unwrap();
        escaper.into_inner()
    }

    #[test]
    fn ascii_passes_through() {
        assert_eq!(escape_unicode("public int size();\n"), "public int size();\n");
    }

    #[test]
    fn bmp_character_is_one_escape() {
        assert_eq!(escape_unicode("café"), "caf\\u00E9");
        assert_eq!(escape_unicode("Ωmega"), "\\u03A9mega");
    }

    #[test]
    fn supplementary_character_is_surrogate_pair() {
        assert_eq!(escape_unicode("a😀b"), "a\\uD83D\\uDE00b");
    }

    #[test]
    fn escaper_works_across_writes() {
        let mut escaper = UnicodeEscaper::new(String::new());
        write!(escaper, "{}-{}", "ü", 42).unwrap();
        escaper.write_str("ß").unwrap();
        assert_eq!(escaper.into_inner(), "\\u00FC-42\\u00DF");
    }
}

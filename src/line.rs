//! Fixed width display rows

use core::fmt;
use core::iter;

/// A row of exactly [`FixedRow::width`] characters
///
/// Only [`FixedRow::render`] builds one, so a row shorter or longer than
/// its width can't exist. Width is counted in characters, not bytes.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FixedRow {
    text: String,
    width: usize,
}

impl FixedRow {
    /// Truncate `text` to `width` characters, or left-justify it and pad with spaces
    ///
    /// Control characters are kept as they are, mapping them is up to the display driver.
    pub fn render(text: &str, width: usize) -> Self {
        let text = text.chars().chain(iter::repeat(' ')).take(width).collect();
        Self { text, width }
    }

    /// A row of spaces only
    pub fn blank(width: usize) -> Self {
        Self::render("", width)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn chars(&self) -> core::str::Chars<'_> {
        self.text.chars()
    }
}

impl fmt::Display for FixedRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for FixedRow {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

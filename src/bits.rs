use std::fmt;

/// A string of `'0'` and `'1'` characters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BitString(String);

impl BitString {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for BitString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Renders each character's code point as binary, most significant bit
/// first, zero padded to at least 8 digits.
///
/// Code points above `U+00FF` are widened rather than truncated, so only
/// text whose characters are all at or below `U+00FF` keeps exactly 8 bits
/// per character.
///
/// ```
/// assert_eq!(text_to_image::text_to_bits("A").as_str(), "01000001");
/// ```
pub fn text_to_bits(text: &str) -> BitString {
    BitString(
        text.chars()
            .map(|c| format!("{:08b}", u32::from(c)))
            .collect(),
    )
}

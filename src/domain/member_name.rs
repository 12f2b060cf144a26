use unicode_segmentation::UnicodeSegmentation;

const MIN_CHAR_LENGTH: usize = 1;
const MAX_CHAR_LENGTH: usize = 25;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct MemberName(String);

impl MemberName {
    /// Length is measured in extended grapheme clusters, what a reader sees as
    /// characters: 25 emoji fit, even though each one takes two UTF-16 code units.
    /// Digits are the ASCII `0-9` only.
    pub fn parse(name: String) -> Result<MemberName, String> {
        let length = name.graphemes(true).count();

        if !(MIN_CHAR_LENGTH..=MAX_CHAR_LENGTH).contains(&length) {
            return Err(format!(
                "size must be between {} and {}",
                MIN_CHAR_LENGTH, MAX_CHAR_LENGTH
            ));
        }

        if name.chars().any(|char| char.is_ascii_digit()) {
            return Err(String::from("Must not contain numbers"));
        }

        Ok(Self(name))
    }
}

impl AsRef<str> for MemberName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

//! Transaction categories and their grouping keys.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// A transaction category, e.g. "🛒 Groceries".
///
/// Categories are entered as an emoji decoration followed by a space and a
/// name. The decoration is for display only, so the emoji-free `key` is
/// derived once when the category is created and grouping never has to
/// re-parse the label.
///
/// Serialized as the plain label string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Category {
    label: String,
    key: String,
}

impl Category {
    /// Create a category from its display label.
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_owned(),
            key: strip_emoji(label).to_owned(),
        }
    }

    /// The full display label including any leading emoji.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The label with the leading emoji removed, used as the semantic key.
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl From<String> for Category {
    fn from(label: String) -> Self {
        let key = strip_emoji(&label).to_owned();
        Self { label, key }
    }
}

impl From<&str> for Category {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.label
    }
}

impl AsRef<str> for Category {
    fn as_ref(&self) -> &str {
        &self.label
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label)
    }
}

/// Remove the leading emoji (and the whitespace after it) from a label.
///
/// The first grapheme cluster counts as an emoji if it starts with a
/// non-ASCII character that is not alphanumeric, which also covers
/// multi-codepoint emoji such as flags and ZWJ sequences. Keycaps like
/// "1️⃣" start with an ASCII character and are recognised by their emoji
/// presentation selector or combining keycap mark. Labels without a
/// leading emoji are returned trimmed but otherwise unchanged.
pub fn strip_emoji(label: &str) -> &str {
    let label = label.trim();

    let Some(first) = label.graphemes(true).next() else {
        return label;
    };

    if is_emoji_grapheme(first) {
        label[first.len()..].trim_start()
    } else {
        label
    }
}

const EMOJI_PRESENTATION_SELECTOR: char = '\u{FE0F}';
const COMBINING_ENCLOSING_KEYCAP: char = '\u{20E3}';

fn is_emoji_grapheme(grapheme: &str) -> bool {
    let starts_with_symbol = grapheme
        .chars()
        .next()
        .is_some_and(|c| !c.is_ascii() && !c.is_alphanumeric());

    starts_with_symbol
        || grapheme
            .chars()
            .any(|c| c == EMOJI_PRESENTATION_SELECTOR || c == COMBINING_ENCLOSING_KEYCAP)
}

//! Description entry normalization
//!
//! The `descriptions` array of a product is mostly `{"text": "..."}` objects,
//! but older payloads carry other shapes. Entries are classified once, when
//! they are deserialized, and flattened into a bullet list here.

use serde::{Deserialize, Serialize};

/// Legal boilerplate that separates shop notices from the product text
pub const FREE_RETURN_MARKER: &str = "gün içinde ücretsiz iade. Detaylı bilgi";

/// One entry of the `descriptions` array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DescriptionEntry {
    /// An object with a string `text` field
    Text { text: String },

    /// Anything else, kept verbatim
    Unknown(serde_json::Value),
}

impl DescriptionEntry {
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text { text } => Some(text),
            Self::Unknown(_) => None,
        }
    }
}

/// Flattens description entries into a `- ` bullet list
///
/// Everything up to and including the first entry carrying
/// [`FREE_RETURN_MARKER`] is dropped; without the marker every entry is kept.
/// Blank and non-text entries are skipped.
///
/// If the first entry is not text-bearing, the payload is of an unknown layout
/// and the whole sequence is returned as compact JSON instead.
///
/// # Example
///
/// ```
/// use price_ladder::extract::{process_descriptions, DescriptionEntry};
///
/// let entries: Vec<DescriptionEntry> =
///     serde_json::from_str(r#"[{"text":"X"},{"text":"Y"}]"#).unwrap();
/// assert_eq!(process_descriptions(&entries), "- X\n- Y");
/// ```
pub fn process_descriptions(entries: &[DescriptionEntry]) -> String {
    let Some(first) = entries.first() else {
        return String::new();
    };

    if first.text().is_none() {
        return serde_json::to_string(entries).unwrap_or_default();
    }

    let start = entries
        .iter()
        .position(|entry| {
            entry
                .text()
                .is_some_and(|text| text.contains(FREE_RETURN_MARKER))
        })
        .map_or(0, |marker| marker + 1);

    entries[start..]
        .iter()
        .filter_map(DescriptionEntry::text)
        .filter(|text| !text.trim().is_empty())
        .map(|text| format!("- {}", text))
        .collect::<Vec<_>>()
        .join("\n")
}

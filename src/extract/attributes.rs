//! Attribute pair normalization

use crate::catalog::ProductAttribute;
use serde::Deserialize;

/// A `{"name": ...}` holder as used on both sides of an attribute
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NameHolder {
    #[serde(default)]
    pub name: Option<String>,
}

/// One raw `{"key": {...}, "value": {...}}` entry of the `attributes` array
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AttributePair {
    #[serde(default)]
    pub key: Option<NameHolder>,

    #[serde(default)]
    pub value: Option<NameHolder>,
}

impl AttributePair {
    fn trimmed(holder: &Option<NameHolder>) -> Option<&str> {
        holder
            .as_ref()
            .and_then(|holder| holder.name.as_deref())
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

/// Keeps the attribute pairs whose key and value both carry a name
///
/// Names are trimmed; order and duplicates are preserved.
pub fn process_attributes(pairs: &[AttributePair]) -> Vec<ProductAttribute> {
    pairs
        .iter()
        .filter_map(|pair| {
            let key = AttributePair::trimmed(&pair.key)?;
            let value = AttributePair::trimmed(&pair.value)?;
            Some(ProductAttribute {
                key: key.to_string(),
                value: value.to_string(),
            })
        })
        .collect()
}

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tag entity - a free-text label grouping posts for filtered listing.
///
/// Labels are normalized to lower case on ingest so `Rust` and `rust`
/// address the same tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
}

impl Tag {
    /// Create a tag with a normalized label.
    pub fn new(name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: normalize_label(name),
        }
    }
}

/// Normalize a tag label: trimmed, lower-cased.
pub fn normalize_label(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_are_normalized() {
        let tag = Tag::new("  Rust ");
        assert_eq!(tag.name, "rust");
    }
}

// ABOUTME: The Preview record holding the extracted title, description, and image fields.
// ABOUTME: All fields are optional; absent fields serialize as JSON null.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The three-field summary produced for a URL.
///
/// Any subset of fields may be populated; a preview with no fields at all is
/// never returned (the assembler reports NotFound instead). Absent fields are
/// preserved as `null` in serialized form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preview {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}

impl Preview {
    /// Returns true if all three fields are absent.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.image.is_none()
    }
}

impl fmt::Display for Preview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nullify = |s: &Option<String>| s.as_deref().unwrap_or("null").to_string();

        write!(
            f,
            "Title: {}\nDescription: {}\nImage: {}",
            nullify(&self.title),
            nullify(&self.description),
            nullify(&self.image)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn is_empty_requires_all_fields_absent() {
        assert!(Preview::default().is_empty());

        let partial = Preview {
            image: Some("https://example.com/a.png".to_string()),
            ..Default::default()
        };
        assert!(!partial.is_empty());
    }

    #[test]
    fn display_renders_null_for_absent_fields() {
        let preview = Preview {
            title: Some("Hello".to_string()),
            ..Default::default()
        };

        assert_eq!(
            preview.to_string(),
            "Title: Hello\nDescription: null\nImage: null"
        );
    }

    #[test]
    fn absent_fields_serialize_as_null() {
        let preview = Preview {
            title: Some("T".to_string()),
            description: None,
            image: None,
        };

        let json = serde_json::to_value(&preview).expect("serialize");
        assert_eq!(json["title"], serde_json::json!("T"));
        assert!(json["description"].is_null());
        assert!(json["image"].is_null());
    }
}

//! Note model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A note attached to a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    /// Present when the note was listed outside its project
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub visibility: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Note {
    /// First line of the content, trimmed to `max_chars`
    pub fn preview(&self, max_chars: usize) -> String {
        let first_line = self
            .content
            .as_deref()
            .and_then(|content| content.lines().find(|line| !line.trim().is_empty()))
            .unwrap_or_default()
            .trim();
        if first_line.chars().count() <= max_chars {
            first_line.to_string()
        } else {
            let truncated = first_line.chars().take(max_chars).collect::<String>();
            format!("{truncated}...")
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoteInput {
    pub project_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub labels: Vec<String>,
    pub pinned: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn note_with_content(content: Option<&str>) -> Note {
        Note {
            id: "n1".to_string(),
            title: "Shopping".to_string(),
            content: content.map(str::to_string),
            project_id: None,
            labels: Vec::new(),
            pinned: false,
            visibility: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn missing_optional_fields_take_defaults() {
        let note: Note = serde_json::from_value(json!({ "id": "n1", "title": "Shopping" })).unwrap();
        assert!(note.labels.is_empty());
        assert!(!note.pinned);
        assert_eq!(note, note_with_content(None));
    }

    #[test]
    fn preview_uses_first_non_empty_line() {
        let note = note_with_content(Some("\n  eggs and milk  \nbread"));
        assert_eq!(note.preview(40), "eggs and milk");
        assert_eq!(note.preview(4), "eggs...");
        assert_eq!(note_with_content(None).preview(10), "");
    }

    #[test]
    fn create_input_serializes_project_id_camel_case() {
        let input = CreateNoteInput {
            project_id: "p1".to_string(),
            title: "Idea".to_string(),
            content: None,
            labels: vec!["later".to_string()],
            pinned: true,
            visibility: None,
        };
        assert_eq!(
            serde_json::to_value(&input).unwrap(),
            json!({ "projectId": "p1", "title": "Idea", "labels": ["later"], "pinned": true })
        );
    }
}

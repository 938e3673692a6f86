//! Search results

use serde::{Deserialize, Serialize};

use super::{Note, Project};

/// One hit of a cross-project search, discriminated by GraphQL `__typename`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "__typename")]
pub enum SearchHit {
    Project(Project),
    Note(Note),
}

impl SearchHit {
    pub fn id(&self) -> &str {
        match self {
            Self::Project(project) => &project.id,
            Self::Note(note) => &note.id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Project(project) => &project.name,
            Self::Note(note) => &note.title,
        }
    }

    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Project(_) => "project",
            Self::Note(_) => "note",
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn hits_are_discriminated_by_typename() {
        let hits: Vec<SearchHit> = serde_json::from_value(json!([
            { "__typename": "Project", "id": "p1", "name": "Garden", "isArchive": false, "noteCount": 2 },
            { "__typename": "Note", "id": "n1", "title": "Tomatoes", "projectId": "p1", "labels": ["summer"] }
        ]))
        .unwrap();

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].kind(), "project");
        assert_eq!(hits[0].title(), "Garden");
        assert_eq!(hits[1].kind(), "note");
        assert_eq!(hits[1].id(), "n1");
        match &hits[1] {
            SearchHit::Note(note) => assert_eq!(note.project_id.as_deref(), Some("p1")),
            SearchHit::Project(_) => panic!("expected a note"),
        }
    }

    #[test]
    fn unknown_typename_is_rejected() {
        let result = serde_json::from_value::<SearchHit>(json!({ "__typename": "User", "id": "u1" }));
        assert!(result.is_err());
    }
}

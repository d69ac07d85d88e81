#![allow(dead_code)]

//! Resume data model — the canonical in-session aggregate every other
//! module reads or writes.
//!
//! List items carry two identities:
//! - `uid`: a session-local edit key, assigned when the item is created and
//!   round-tripped through the draft so edit keys survive a reload. Never
//!   part of a remote payload.
//! - `id`: the remote entity id, present only once the item has been synced.
//!   Items without an `id` are local-only; losing an `id` after a successful
//!   create would cause the item to be recreated on the next sync.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

fn new_uid() -> Uuid {
    Uuid::new_v4()
}

// ────────────────────────────────────────────────────────────────────────────
// Personal info
// ────────────────────────────────────────────────────────────────────────────

/// Field-level personal details. No field is structurally required — the
/// renderers degrade gracefully (placeholder or omission) when one is absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonalInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cgpa: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// List sections
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default = "new_uid")]
    pub uid: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl Project {
    /// Blank local-only item appended by the section editor.
    pub fn blank() -> Self {
        Self {
            uid: new_uid(),
            id: None,
            title: String::new(),
            description: String::new(),
            technologies: Vec::new(),
            link: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Internship {
    #[serde(default = "new_uid")]
    pub uid: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    /// While true, renderers print "Present" and ignore `end_date`.
    #[serde(default)]
    pub current: bool,
    #[serde(default)]
    pub description: String,
}

impl Internship {
    pub fn blank() -> Self {
        Self {
            uid: new_uid(),
            id: None,
            company: String::new(),
            role: String::new(),
            start_date: String::new(),
            end_date: None,
            current: false,
            description: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    #[serde(default = "new_uid")]
    pub uid: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
}

impl Skill {
    pub fn blank() -> Self {
        Self {
            uid: new_uid(),
            id: None,
            name: String::new(),
            level: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certificate {
    #[serde(default = "new_uid")]
    pub uid: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub issuer: String,
    #[serde(default)]
    pub date: String,
}

impl Certificate {
    pub fn blank() -> Self {
        Self {
            uid: new_uid(),
            id: None,
            name: String::new(),
            issuer: String::new(),
            date: String::new(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Root aggregate
// ────────────────────────────────────────────────────────────────────────────

/// The root aggregate for one editing session. List order is insertion order
/// and is display-significant: every template surfaces items top-to-bottom
/// in stored order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeRecord {
    #[serde(default)]
    pub personal_info: PersonalInfo,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub internships: Vec<Internship>,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub certificates: Vec<Certificate>,
}

// ────────────────────────────────────────────────────────────────────────────
// Template selection
// ────────────────────────────────────────────────────────────────────────────

/// The four layout strategies. Pure configuration — never persisted remotely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Template {
    Classic,
    #[default]
    Modern,
    Minimal,
    Professional,
}

impl Template {
    pub fn as_str(&self) -> &'static str {
        match self {
            Template::Classic => "classic",
            Template::Modern => "modern",
            Template::Minimal => "minimal",
            Template::Professional => "professional",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_items_are_local_only() {
        assert!(Project::blank().id.is_none());
        assert!(Internship::blank().id.is_none());
        assert!(Skill::blank().id.is_none());
        assert!(Certificate::blank().id.is_none());
    }

    #[test]
    fn test_blank_items_get_distinct_uids() {
        let a = Project::blank();
        let b = Project::blank();
        assert_ne!(a.uid, b.uid, "every blank item needs its own edit key");
    }

    #[test]
    fn test_record_round_trips_through_json() {
        let record = ResumeRecord {
            personal_info: PersonalInfo {
                name: Some("Asha Rao".to_string()),
                cgpa: Some(8.9),
                ..PersonalInfo::default()
            },
            projects: vec![Project {
                title: "Tracker".to_string(),
                technologies: vec!["React".to_string(), "Node".to_string()],
                link: Some("https://example.com".to_string()),
                ..Project::blank()
            }],
            internships: vec![Internship {
                company: "Acme".to_string(),
                current: true,
                ..Internship::blank()
            }],
            ..ResumeRecord::default()
        };

        let json = serde_json::to_string(&record).expect("serialize");
        let back: ResumeRecord = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, record, "draft persistence relies on a lossless round trip");
    }

    #[test]
    fn test_missing_fields_deserialize_to_defaults() {
        // Older drafts may lack fields added later; they must still load.
        let record: ResumeRecord =
            serde_json::from_str(r#"{"projects":[{"title":"Solo"}]}"#).expect("sparse record");
        assert_eq!(record.projects.len(), 1);
        assert_eq!(record.projects[0].title, "Solo");
        assert!(record.projects[0].id.is_none());
        assert!(record.skills.is_empty());
        assert!(record.personal_info.name.is_none());
    }

    #[test]
    fn test_template_default_is_modern() {
        assert_eq!(Template::default(), Template::Modern);
        let parsed: Template = serde_json::from_str("\"classic\"").expect("lowercase tag");
        assert_eq!(parsed, Template::Classic);
    }
}

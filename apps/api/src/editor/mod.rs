//! Section editor — uniform create/update/remove semantics over a
//! `ResumeRecord`.
//!
//! Edits address list items by their session-local `uid` rather than by
//! numeric position, so a concurrent add or remove can never shift an edit
//! onto the wrong row. An unknown `uid` is rejected, not a panic.
//!
//! All operations are synchronous and touch only the named section; the
//! caller persists the draft after every accepted edit.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::models::resume::{Certificate, Internship, Project, ResumeRecord, Skill};

// ────────────────────────────────────────────────────────────────────────────
// Sections and errors
// ────────────────────────────────────────────────────────────────────────────

/// The four list-valued sections of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Projects,
    Internships,
    Skills,
    Certificates,
}

impl Section {
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Projects => "projects",
            Section::Internships => "internships",
            Section::Skills => "skills",
            Section::Certificates => "certificates",
        }
    }
}

#[derive(Debug, Error)]
pub enum EditError {
    #[error("no {section} item with uid {item}")]
    UnknownItem { section: &'static str, item: Uuid },
}

// ────────────────────────────────────────────────────────────────────────────
// Field patches
// ────────────────────────────────────────────────────────────────────────────

/// One field-level change to `personal_info`. `null` clears the field.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum PersonalPatch {
    Name(Option<String>),
    Email(Option<String>),
    Phone(Option<String>),
    Linkedin(Option<String>),
    Github(Option<String>),
    Bio(Option<String>),
    Branch(Option<String>),
    Year(Option<String>),
    Cgpa(Option<f64>),
    Location(Option<String>),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum ProjectPatch {
    Title(String),
    Description(String),
    Technologies(Vec<String>),
    Link(Option<String>),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum InternshipPatch {
    Company(String),
    Role(String),
    StartDate(String),
    EndDate(Option<String>),
    Current(bool),
    Description(String),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum SkillPatch {
    Name(String),
    Level(Option<String>),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum CertificatePatch {
    Name(String),
    Issuer(String),
    Date(String),
}

// ────────────────────────────────────────────────────────────────────────────
// The edit union
// ────────────────────────────────────────────────────────────────────────────

/// One editor operation, as accepted on the wire:
/// `{"op": "set_project", "item": "<uid>", "field": "title", "value": "…"}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SectionEdit {
    SetPersonal {
        #[serde(flatten)]
        patch: PersonalPatch,
    },
    SetProject {
        item: Uuid,
        #[serde(flatten)]
        patch: ProjectPatch,
    },
    SetInternship {
        item: Uuid,
        #[serde(flatten)]
        patch: InternshipPatch,
    },
    SetSkill {
        item: Uuid,
        #[serde(flatten)]
        patch: SkillPatch,
    },
    SetCertificate {
        item: Uuid,
        #[serde(flatten)]
        patch: CertificatePatch,
    },
    AddItem {
        section: Section,
    },
    RemoveItem {
        section: Section,
        item: Uuid,
    },
}

// ────────────────────────────────────────────────────────────────────────────
// Application
// ────────────────────────────────────────────────────────────────────────────

/// Applies one edit in place. Every other item, and every identity, is left
/// untouched.
pub fn apply_edit(record: &mut ResumeRecord, edit: SectionEdit) -> Result<(), EditError> {
    match edit {
        SectionEdit::SetPersonal { patch } => {
            apply_personal(record, patch);
            Ok(())
        }
        SectionEdit::SetProject { item, patch } => {
            let project = find_project(record, item)?;
            match patch {
                ProjectPatch::Title(v) => project.title = v,
                ProjectPatch::Description(v) => project.description = v,
                ProjectPatch::Technologies(v) => project.technologies = v,
                ProjectPatch::Link(v) => project.link = v,
            }
            Ok(())
        }
        SectionEdit::SetInternship { item, patch } => {
            let internship = find_internship(record, item)?;
            match patch {
                InternshipPatch::Company(v) => internship.company = v,
                InternshipPatch::Role(v) => internship.role = v,
                InternshipPatch::StartDate(v) => internship.start_date = v,
                InternshipPatch::EndDate(v) => internship.end_date = v,
                InternshipPatch::Current(v) => internship.current = v,
                InternshipPatch::Description(v) => internship.description = v,
            }
            Ok(())
        }
        SectionEdit::SetSkill { item, patch } => {
            let skill = find_skill(record, item)?;
            match patch {
                SkillPatch::Name(v) => skill.name = v,
                SkillPatch::Level(v) => skill.level = v,
            }
            Ok(())
        }
        SectionEdit::SetCertificate { item, patch } => {
            let certificate = find_certificate(record, item)?;
            match patch {
                CertificatePatch::Name(v) => certificate.name = v,
                CertificatePatch::Issuer(v) => certificate.issuer = v,
                CertificatePatch::Date(v) => certificate.date = v,
            }
            Ok(())
        }
        SectionEdit::AddItem { section } => {
            // New items are always local-only (no remote id) until synced.
            match section {
                Section::Projects => record.projects.push(Project::blank()),
                Section::Internships => record.internships.push(Internship::blank()),
                Section::Skills => record.skills.push(Skill::blank()),
                Section::Certificates => record.certificates.push(Certificate::blank()),
            }
            Ok(())
        }
        SectionEdit::RemoveItem { section, item } => remove_item(record, section, item),
    }
}

fn apply_personal(record: &mut ResumeRecord, patch: PersonalPatch) {
    let info = &mut record.personal_info;
    match patch {
        PersonalPatch::Name(v) => info.name = v,
        PersonalPatch::Email(v) => info.email = v,
        PersonalPatch::Phone(v) => info.phone = v,
        PersonalPatch::Linkedin(v) => info.linkedin = v,
        PersonalPatch::Github(v) => info.github = v,
        PersonalPatch::Bio(v) => info.bio = v,
        PersonalPatch::Branch(v) => info.branch = v,
        PersonalPatch::Year(v) => info.year = v,
        PersonalPatch::Cgpa(v) => info.cgpa = v,
        PersonalPatch::Location(v) => info.location = v,
    }
}

/// Removal is local; it is realized remotely at the next sync.
fn remove_item(record: &mut ResumeRecord, section: Section, item: Uuid) -> Result<(), EditError> {
    let missing = || EditError::UnknownItem {
        section: section.as_str(),
        item,
    };
    match section {
        Section::Projects => {
            let pos = record.projects.iter().position(|p| p.uid == item).ok_or_else(missing)?;
            record.projects.remove(pos);
        }
        Section::Internships => {
            let pos = record.internships.iter().position(|i| i.uid == item).ok_or_else(missing)?;
            record.internships.remove(pos);
        }
        Section::Skills => {
            let pos = record.skills.iter().position(|s| s.uid == item).ok_or_else(missing)?;
            record.skills.remove(pos);
        }
        Section::Certificates => {
            let pos = record.certificates.iter().position(|c| c.uid == item).ok_or_else(missing)?;
            record.certificates.remove(pos);
        }
    }
    Ok(())
}

fn find_project(record: &mut ResumeRecord, item: Uuid) -> Result<&mut Project, EditError> {
    record.projects.iter_mut().find(|p| p.uid == item).ok_or(EditError::UnknownItem {
        section: Section::Projects.as_str(),
        item,
    })
}

fn find_internship(record: &mut ResumeRecord, item: Uuid) -> Result<&mut Internship, EditError> {
    record.internships.iter_mut().find(|i| i.uid == item).ok_or(EditError::UnknownItem {
        section: Section::Internships.as_str(),
        item,
    })
}

fn find_skill(record: &mut ResumeRecord, item: Uuid) -> Result<&mut Skill, EditError> {
    record.skills.iter_mut().find(|s| s.uid == item).ok_or(EditError::UnknownItem {
        section: Section::Skills.as_str(),
        item,
    })
}

fn find_certificate(record: &mut ResumeRecord, item: Uuid) -> Result<&mut Certificate, EditError> {
    record.certificates.iter_mut().find(|c| c.uid == item).ok_or(EditError::UnknownItem {
        section: Section::Certificates.as_str(),
        item,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use uuid::Uuid;

    fn make_record() -> ResumeRecord {
        ResumeRecord {
            projects: vec![
                Project {
                    title: "Tracker".to_string(),
                    id: Some(Uuid::new_v4()),
                    ..Project::blank()
                },
                Project {
                    title: "Portfolio".to_string(),
                    ..Project::blank()
                },
            ],
            skills: vec![Skill {
                name: "Rust".to_string(),
                ..Skill::blank()
            }],
            ..ResumeRecord::default()
        }
    }

    #[test]
    fn test_set_personal_field_sets_and_clears() {
        let mut record = make_record();
        apply_edit(
            &mut record,
            SectionEdit::SetPersonal {
                patch: PersonalPatch::Name(Some("Asha".to_string())),
            },
        )
        .expect("set name");
        assert_eq!(record.personal_info.name.as_deref(), Some("Asha"));

        apply_edit(
            &mut record,
            SectionEdit::SetPersonal {
                patch: PersonalPatch::Name(None),
            },
        )
        .expect("clear name");
        assert!(record.personal_info.name.is_none());
    }

    #[test]
    fn test_set_project_field_leaves_other_items_untouched() {
        let mut record = make_record();
        let target = record.projects[1].uid;
        let untouched = record.projects[0].clone();

        apply_edit(
            &mut record,
            SectionEdit::SetProject {
                item: target,
                patch: ProjectPatch::Title("Portfolio v2".to_string()),
            },
        )
        .expect("edit");

        assert_eq!(record.projects[1].title, "Portfolio v2");
        assert_eq!(record.projects[0], untouched, "sibling item must not change");
    }

    #[test]
    fn test_edit_preserves_remote_identity() {
        let mut record = make_record();
        let target = record.projects[0].uid;
        let id = record.projects[0].id;

        apply_edit(
            &mut record,
            SectionEdit::SetProject {
                item: target,
                patch: ProjectPatch::Description("rewritten".to_string()),
            },
        )
        .expect("edit");

        assert_eq!(record.projects[0].id, id, "editing a field must not drop the remote id");
    }

    #[test]
    fn test_unknown_item_is_rejected() {
        let mut record = make_record();
        let err = apply_edit(
            &mut record,
            SectionEdit::SetSkill {
                item: Uuid::new_v4(),
                patch: SkillPatch::Name("Go".to_string()),
            },
        )
        .expect_err("unknown uid");
        assert!(matches!(err, EditError::UnknownItem { section: "skills", .. }));
    }

    #[test]
    fn test_add_item_appends_blank_at_end() {
        let mut record = make_record();
        apply_edit(
            &mut record,
            SectionEdit::AddItem {
                section: Section::Internships,
            },
        )
        .expect("add");
        assert_eq!(record.internships.len(), 1);
        let added = &record.internships[0];
        assert!(added.id.is_none(), "new items are local-only until synced");
        assert!(added.company.is_empty());
    }

    #[test]
    fn test_remove_item_by_uid() {
        let mut record = make_record();
        let target = record.projects[0].uid;
        apply_edit(
            &mut record,
            SectionEdit::RemoveItem {
                section: Section::Projects,
                item: target,
            },
        )
        .expect("remove");
        assert_eq!(record.projects.len(), 1);
        assert_eq!(record.projects[0].title, "Portfolio");
    }

    #[test]
    fn test_remove_unknown_item_is_rejected() {
        let mut record = make_record();
        let err = apply_edit(
            &mut record,
            SectionEdit::RemoveItem {
                section: Section::Certificates,
                item: Uuid::new_v4(),
            },
        )
        .expect_err("nothing to remove");
        assert!(matches!(err, EditError::UnknownItem { section: "certificates", .. }));
    }

    #[test]
    fn test_edit_wire_shape_deserializes() {
        let record = make_record();
        let uid = record.projects[0].uid;
        let edit: SectionEdit = serde_json::from_value(json!({
            "op": "set_project",
            "item": uid,
            "field": "technologies",
            "value": ["React", "Node"],
        }))
        .expect("wire shape");
        assert!(matches!(
            edit,
            SectionEdit::SetProject {
                patch: ProjectPatch::Technologies(_),
                ..
            }
        ));

        let edit: SectionEdit = serde_json::from_value(json!({
            "op": "set_personal",
            "field": "cgpa",
            "value": 9.1,
        }))
        .expect("personal wire shape");
        assert!(matches!(
            edit,
            SectionEdit::SetPersonal {
                patch: PersonalPatch::Cgpa(Some(_)),
            }
        ));
    }
}

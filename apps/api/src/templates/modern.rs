//! Modern template — two columns. Sidebar: contact, education, skills and
//! certificates; main: summary, experience, projects. Sidebar sections are
//! omitted when empty, like everywhere else.

use crate::layout::document::{Block, Column};
use crate::models::resume::ResumeRecord;

use super::{
    contact_parts, date_range, display_name, education_entry, join_nonempty, non_empty,
    section_heading, skill_line, technologies_line,
};

pub(super) fn compose(record: &ResumeRecord) -> Vec<(Column, Vec<Block>)> {
    let info = &record.personal_info;

    let mut sidebar = Vec::new();
    let contact = contact_parts(info);
    if !contact.is_empty() {
        sidebar.push(section_heading("Contact"));
        sidebar.push(Block::Bullets { items: contact });
    }
    sidebar.push(section_heading("Education"));
    sidebar.push(education_entry(info));
    if !record.skills.is_empty() {
        sidebar.push(section_heading("Skills"));
        sidebar.push(Block::Bullets {
            items: record.skills.iter().map(skill_line).collect(),
        });
    }
    if !record.certificates.is_empty() {
        sidebar.push(section_heading("Certificates"));
        for certificate in &record.certificates {
            sidebar.push(Block::Entry {
                lead: certificate.name.trim().to_string(),
                detail: non_empty(&certificate.issuer),
                meta: non_empty(&certificate.date),
            });
        }
    }

    let mut main = vec![Block::Heading {
        level: 1,
        text: display_name(info),
    }];
    if let Some(bio) = info.bio.as_deref().and_then(non_empty) {
        main.push(section_heading("Summary"));
        main.push(Block::Paragraph {
            text: bio,
            justified: false,
        });
    }
    if !record.internships.is_empty() {
        main.push(section_heading("Experience"));
        for internship in &record.internships {
            main.push(Block::Entry {
                lead: join_nonempty(&[&internship.role, &internship.company], ", "),
                detail: non_empty(&internship.description),
                meta: non_empty(&date_range(
                    &internship.start_date,
                    internship.end_date.as_deref(),
                    internship.current,
                )),
            });
        }
    }
    if !record.projects.is_empty() {
        main.push(section_heading("Projects"));
        for project in &record.projects {
            main.push(Block::Entry {
                lead: project.title.trim().to_string(),
                detail: non_empty(&project.description),
                meta: project.link.as_deref().and_then(non_empty),
            });
            if let Some(technologies) = technologies_line(&project.technologies) {
                main.push(Block::Paragraph {
                    text: technologies,
                    justified: false,
                });
            }
        }
    }

    vec![(Column::Sidebar, sidebar), (Column::Main, main)]
}

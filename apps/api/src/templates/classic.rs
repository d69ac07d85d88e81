//! Classic template — single column with the fixed section order
//! Header → Education → Skills → Internships → Projects → Certificates.
//! Sections with empty lists are omitted entirely, headings included.

use crate::layout::document::{Block, Column};
use crate::models::resume::ResumeRecord;

use super::{
    contact_parts, date_range, display_name, education_entry, join_nonempty, non_empty,
    section_heading, skill_line, technologies_line,
};

pub(super) fn compose(record: &ResumeRecord) -> Vec<(Column, Vec<Block>)> {
    let info = &record.personal_info;
    let mut blocks = vec![Block::Heading {
        level: 1,
        text: display_name(info),
    }];

    let contact = contact_parts(info);
    if !contact.is_empty() {
        blocks.push(Block::Paragraph {
            text: contact.join(" | "),
            justified: false,
        });
    }
    if let Some(bio) = info.bio.as_deref().and_then(non_empty) {
        blocks.push(Block::Paragraph {
            text: bio,
            justified: false,
        });
    }
    blocks.push(Block::Rule);

    blocks.push(section_heading("Education"));
    blocks.push(education_entry(info));

    if !record.skills.is_empty() {
        blocks.push(section_heading("Skills"));
        blocks.push(Block::Bullets {
            items: record.skills.iter().map(skill_line).collect(),
        });
    }

    if !record.internships.is_empty() {
        blocks.push(section_heading("Internships"));
        for internship in &record.internships {
            blocks.push(Block::Entry {
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
        blocks.push(section_heading("Projects"));
        for project in &record.projects {
            blocks.push(Block::Entry {
                lead: project.title.trim().to_string(),
                detail: non_empty(&project.description),
                meta: project.link.as_deref().and_then(non_empty),
            });
            if let Some(technologies) = technologies_line(&project.technologies) {
                blocks.push(Block::Paragraph {
                    text: technologies,
                    justified: false,
                });
            }
        }
    }

    if !record.certificates.is_empty() {
        blocks.push(section_heading("Certificates"));
        for certificate in &record.certificates {
            blocks.push(Block::Entry {
                lead: certificate.name.trim().to_string(),
                detail: non_empty(&certificate.issuer),
                meta: non_empty(&certificate.date),
            });
        }
    }

    vec![(Column::Full, blocks)]
}

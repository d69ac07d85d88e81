//! Minimal template — condensed single column. Date ranges show years only,
//! skills flatten into one delimited line, certificates fold the issuer into
//! the entry lead.

use crate::layout::document::{Block, Column};
use crate::models::resume::ResumeRecord;

use super::{
    contact_parts, display_name, education_entry, join_nonempty, non_empty, section_heading,
    technologies_line, year_range, year_text_of,
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

    blocks.push(section_heading("Education"));
    blocks.push(education_entry(info));

    if !record.skills.is_empty() {
        blocks.push(section_heading("Skills"));
        blocks.push(Block::Paragraph {
            text: record
                .skills
                .iter()
                .map(|skill| skill.name.trim())
                .filter(|name| !name.is_empty())
                .collect::<Vec<_>>()
                .join(", "),
            justified: false,
        });
    }

    if !record.internships.is_empty() {
        blocks.push(section_heading("Internships"));
        for internship in &record.internships {
            blocks.push(Block::Entry {
                lead: join_nonempty(&[&internship.role, &internship.company], ", "),
                detail: non_empty(&internship.description),
                meta: non_empty(&year_range(
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
                meta: None,
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
                lead: join_nonempty(&[&certificate.name, &certificate.issuer], ", "),
                detail: None,
                meta: non_empty(&year_text_of(&certificate.date)),
            });
        }
    }

    vec![(Column::Full, blocks)]
}

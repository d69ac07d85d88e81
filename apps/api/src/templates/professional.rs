//! Professional template — single column with justified paragraph style and
//! bullet-point descriptions. Education renders from the user's own data,
//! the same source as every other template.

use crate::layout::document::{Block, Column};
use crate::models::resume::ResumeRecord;

use super::{
    contact_parts, date_range, description_bullets, display_name, education_entry, join_nonempty,
    non_empty, section_heading, skill_line, technologies_line,
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
    blocks.push(Block::Rule);

    if let Some(bio) = info.bio.as_deref().and_then(non_empty) {
        blocks.push(section_heading("Professional Summary"));
        blocks.push(Block::Paragraph {
            text: bio,
            justified: true,
        });
    }

    blocks.push(section_heading("Education"));
    blocks.push(education_entry(info));

    if !record.internships.is_empty() {
        blocks.push(section_heading("Experience"));
        for internship in &record.internships {
            blocks.push(Block::Entry {
                lead: join_nonempty(&[&internship.role, &internship.company], ", "),
                detail: None,
                meta: non_empty(&date_range(
                    &internship.start_date,
                    internship.end_date.as_deref(),
                    internship.current,
                )),
            });
            let bullets = description_bullets(&internship.description);
            if !bullets.is_empty() {
                blocks.push(Block::Bullets { items: bullets });
            }
        }
    }

    if !record.projects.is_empty() {
        blocks.push(section_heading("Projects"));
        for project in &record.projects {
            blocks.push(Block::Entry {
                lead: project.title.trim().to_string(),
                detail: None,
                meta: project.link.as_deref().and_then(non_empty),
            });
            let mut bullets = description_bullets(&project.description);
            if let Some(technologies) = technologies_line(&project.technologies) {
                bullets.push(format!("Technologies: {technologies}"));
            }
            if !bullets.is_empty() {
                blocks.push(Block::Bullets { items: bullets });
            }
        }
    }

    if !record.skills.is_empty() {
        blocks.push(section_heading("Skills"));
        blocks.push(Block::Bullets {
            items: record.skills.iter().map(skill_line).collect(),
        });
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

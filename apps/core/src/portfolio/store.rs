//! Read-only access to the portfolio document.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use validator::Validate;

use super::models::{
    Activity, Education, Experience, PortfolioData, Profile, Project, Publication, Skills,
};
use crate::error::AppError;

/// Characters of a STAR situation shown in prompt summaries.
const SITUATION_PREVIEW_CHARS: usize = 100;

/// Validated portfolio data, loaded once at startup.
#[derive(Debug, Clone)]
pub struct PortfolioStore {
    data: PortfolioData,
    source: Option<PathBuf>,
}

impl PortfolioStore {
    /// Reads, parses and validates the document at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| {
            error!(path = %path.display(), error = %e, "Portfolio data file unreadable");
            e
        })?;
        let data: PortfolioData = serde_json::from_str(&raw)?;
        let mut store = Self::from_data(data)?;
        store.source = Some(path.to_path_buf());

        info!(
            path = %path.display(),
            projects = store.data.projects.len(),
            experience = store.data.experience.len(),
            publications = store.data.publications.len(),
            "Portfolio data loaded"
        );
        Ok(store)
    }

    pub fn from_data(data: PortfolioData) -> Result<Self, AppError> {
        data.validate()?;
        Ok(Self { data, source: None })
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn data(&self) -> &PortfolioData {
        &self.data
    }

    pub fn profile(&self) -> &Profile {
        &self.data.profile
    }

    pub fn education(&self) -> &Education {
        &self.data.education
    }

    pub fn experience(&self) -> &[Experience] {
        &self.data.experience
    }

    pub fn projects(&self) -> &[Project] {
        &self.data.projects
    }

    pub fn skills(&self) -> &Skills {
        &self.data.skills
    }

    pub fn publications(&self) -> &[Publication] {
        &self.data.publications
    }

    pub fn activities(&self) -> &[Activity] {
        &self.data.activities
    }

    /// Looks a project up by id, ignoring case.
    pub fn project(&self, id: &str) -> Option<&Project> {
        self.data
            .projects
            .iter()
            .find(|project| project.id.eq_ignore_ascii_case(id.trim()))
    }

    // --- Prompt summaries ---

    pub fn profile_summary(&self) -> String {
        let profile = &self.data.profile;
        let education = &self.data.education;

        let highlights = bullet_list(profile.highlights.iter().map(String::as_str));
        let experience = self
            .data
            .experience
            .iter()
            .map(|exp| {
                format!(
                    "- {} at {}: {}...",
                    exp.role,
                    exp.company,
                    preview(&exp.star.situation, SITUATION_PREVIEW_CHARS)
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
        let featured = self
            .data
            .projects
            .iter()
            .filter(|project| project.featured)
            .map(|project| {
                format!(
                    "- {}: {}...",
                    project.title,
                    preview(&project.star.situation, SITUATION_PREVIEW_CHARS)
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "Name: {}\nTitle: {}\nSummary: {}\nLocation: {}\nEducation: {} from {}\n\n\
Key Highlights:\n{}\n\nKey Experience:\n{}\n\nFeatured Projects:\n{}\n",
            profile.name,
            profile.title,
            profile.summary,
            profile.location,
            education.degree,
            education.university,
            highlights,
            experience,
            featured
        )
    }

    pub fn skills_summary(&self) -> String {
        self.data
            .skills
            .categories()
            .iter()
            .map(|(heading, entries)| format!("{}: {}", heading, entries.join(", ")))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn projects_summary(&self) -> String {
        self.data
            .projects
            .iter()
            .map(|project| {
                format!(
                    "Project: {}\nSituation: {}\nTask: {}\nAction: {}\nResult: {}\nImpact: {}\nTechnologies: {}",
                    project.title,
                    project.star.situation,
                    project.star.task,
                    project.star.action,
                    project.star.result,
                    project.star.impact,
                    project.technologies.join(", ")
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    pub fn core_competencies_summary(&self) -> String {
        self.per_role_summary("Core Competencies (from experience):", |exp| &exp.competencies)
    }

    pub fn soft_skills_summary(&self) -> String {
        self.per_role_summary("Soft Skills (from experience):", |exp| &exp.soft_skills)
    }

    fn per_role_summary(&self, heading: &str, field: impl Fn(&Experience) -> &Vec<String>) -> String {
        let mut summary = format!("{}\n", heading);
        for exp in &self.data.experience {
            let entries = field(exp);
            if entries.is_empty() {
                continue;
            }
            summary.push_str(&format!("\n{} at {}:\n", exp.role, exp.company));
            summary.push_str(&bullet_list(entries.iter().map(String::as_str)));
            summary.push('\n');
        }
        summary
    }
}

fn bullet_list<'a>(items: impl Iterator<Item = &'a str>) -> String {
    items.map(|item| format!("- {}", item)).collect::<Vec<_>>().join("\n")
}

fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

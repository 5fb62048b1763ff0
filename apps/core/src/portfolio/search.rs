//! Free-text search over projects and experience.
//!
//! Case-insensitive substring matching of query terms against the
//! concatenated text fields of each entry. Stop words are dropped first.

use serde::Serialize;

use super::models::{Experience, Project};
use super::store::PortfolioStore;

/// Words that carry no search signal.
const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "can", "did", "do", "does", "for", "from",
    "have", "how", "i", "in", "is", "it", "me", "my", "of", "on", "or", "show", "tell", "that",
    "the", "this", "to", "was", "what", "when", "where", "which", "who", "with", "you", "your",
];

/// A matching portfolio entry.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SearchHit {
    Project {
        id: String,
        title: String,
        matched_terms: Vec<String>,
    },
    Experience {
        id: u32,
        role: String,
        company: String,
        matched_terms: Vec<String>,
    },
}

/// Lowercased query terms with punctuation and stop words removed.
pub fn query_terms(query: &str) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();
    for word in query.split_whitespace() {
        let term = word
            .trim_matches(|c: char| !c.is_alphanumeric() && c != '+' && c != '#')
            .to_lowercase();
        if term.is_empty() || STOP_WORDS.contains(&term.as_str()) || terms.contains(&term) {
            continue;
        }
        terms.push(term);
    }
    terms
}

fn project_text(project: &Project) -> String {
    let technologies = project.technologies.join(" ");
    [
        project.title.as_str(),
        project.star.situation.as_str(),
        project.star.task.as_str(),
        project.star.action.as_str(),
        project.star.result.as_str(),
        project.star.impact.as_str(),
        project.star.architecture.as_str(),
        technologies.as_str(),
    ]
    .join(" ")
    .to_lowercase()
}

fn experience_text(exp: &Experience) -> String {
    let technologies = exp.technologies.join(" ");
    let competencies = exp.competencies.join(" ");
    [
        exp.role.as_str(),
        exp.company.as_str(),
        exp.location.as_str(),
        exp.star.situation.as_str(),
        exp.star.task.as_str(),
        exp.star.action.as_str(),
        exp.star.result.as_str(),
        exp.star.impact.as_str(),
        technologies.as_str(),
        competencies.as_str(),
    ]
    .join(" ")
    .to_lowercase()
}

fn matching_terms(haystack: &str, terms: &[String]) -> Vec<String> {
    terms
        .iter()
        .filter(|term| haystack.contains(term.as_str()))
        .cloned()
        .collect()
}

impl PortfolioStore {
    /// Projects first, then experience, each in document order.
    /// A query made only of stop words matches nothing.
    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        let terms = query_terms(query);
        if terms.is_empty() {
            return Vec::new();
        }

        let projects = self.projects().iter().filter_map(|project| {
            let matched_terms = matching_terms(&project_text(project), &terms);
            (!matched_terms.is_empty()).then(|| SearchHit::Project {
                id: project.id.clone(),
                title: project.title.clone(),
                matched_terms,
            })
        });

        let experience = self.experience().iter().filter_map(|exp| {
            let matched_terms = matching_terms(&experience_text(exp), &terms);
            (!matched_terms.is_empty()).then(|| SearchHit::Experience {
                id: exp.id,
                role: exp.role.clone(),
                company: exp.company.clone(),
                matched_terms,
            })
        });

        projects.chain(experience).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_terms_drop_stop_words_and_punctuation() {
        assert_eq!(
            query_terms("What did you do with Rust, and C++?"),
            vec!["rust".to_string(), "c++".to_string()]
        );
    }

    #[test]
    fn test_query_terms_dedupe() {
        assert_eq!(query_terms("python Python PYTHON"), vec!["python".to_string()]);
    }

    #[test]
    fn test_matching_terms_is_substring_based() {
        let terms = vec!["learn".to_string(), "golang".to_string()];
        assert_eq!(matching_terms("machine learning", &terms), vec!["learn".to_string()]);
    }
}

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkType {
    Github,
    Linkedin,
    Publications,
    Resume,
    Website,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Link {
    #[serde(rename = "type")]
    pub kind: LinkType,
    #[validate(url)]
    pub url: String,
}

/// Who the portfolio belongs to.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Profile {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 10, max = 1000))]
    pub summary: String,
    #[validate(length(min = 1, max = 200))]
    pub location: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub highlights: Vec<String>,
    #[validate(length(min = 1), nested)]
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Education {
    #[validate(length(min = 1, max = 200))]
    pub degree: String,
    #[validate(length(min = 1, max = 200))]
    pub university: String,
    /// Four-digit year.
    #[validate(length(equal = 4))]
    pub graduation: String,
    #[serde(default)]
    pub gpa: Option<String>,
    #[serde(default)]
    pub coursework: Vec<String>,
}

/// Situation / Task / Action / Result write-up, plus impact and architecture notes.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Star {
    #[validate(length(min = 10, max = 1000))]
    pub situation: String,
    #[validate(length(min = 10, max = 1000))]
    pub task: String,
    #[validate(length(min = 10, max = 2000))]
    pub action: String,
    #[validate(length(min = 10, max = 1000))]
    pub result: String,
    #[validate(length(min = 10, max = 1000))]
    pub impact: String,
    #[validate(length(min = 10, max = 1000))]
    pub architecture: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Experience {
    #[validate(range(min = 1))]
    pub id: u32,
    #[validate(length(min = 1, max = 200))]
    pub role: String,
    #[validate(length(min = 1, max = 200))]
    pub company: String,
    #[validate(length(min = 1, max = 100))]
    pub duration: String,
    #[validate(length(min = 1, max = 200))]
    pub location: String,
    #[validate(nested)]
    pub star: Star,
    #[validate(length(min = 1))]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub competencies: Vec<String>,
    #[serde(default)]
    pub soft_skills: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Project {
    #[validate(length(min = 1, max = 10))]
    pub id: String,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(url)]
    pub github_url: String,
    #[serde(default)]
    pub demo_urls: Vec<String>,
    #[validate(nested)]
    pub star: Star,
    #[validate(length(min = 1))]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub featured: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Skills {
    #[validate(length(min = 1))]
    pub languages_and_tools: Vec<String>,
    #[validate(length(min = 1))]
    pub databases: Vec<String>,
    #[validate(length(min = 1))]
    pub ml_and_nlp: Vec<String>,
    #[validate(length(min = 1))]
    pub cloud_and_mlops: Vec<String>,
    #[validate(length(min = 1))]
    pub visualization: Vec<String>,
}

impl Skills {
    /// `(heading, entries)` pairs in display order.
    pub fn categories(&self) -> [(&'static str, &[String]); 5] {
        [
            ("Languages & Tools", self.languages_and_tools.as_slice()),
            ("Databases", self.databases.as_slice()),
            ("ML & NLP", self.ml_and_nlp.as_slice()),
            ("Cloud & MLOps", self.cloud_and_mlops.as_slice()),
            ("Visualization", self.visualization.as_slice()),
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Publication {
    #[validate(range(min = 1))]
    pub id: u32,
    #[validate(length(min = 1, max = 300))]
    pub title: String,
    #[validate(length(min = 1, max = 200))]
    pub outlet: String,
    #[validate(length(min = 1, max = 50))]
    pub date: String,
    #[serde(default)]
    pub related_project_id: Option<String>,
}

/// A timeline entry.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Activity {
    #[validate(length(min = 1))]
    pub time: String,
    pub category: String,
    #[validate(length(min = 1))]
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// The whole portfolio document.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct PortfolioData {
    #[validate(nested)]
    pub profile: Profile,
    #[validate(nested)]
    pub education: Education,
    #[validate(length(min = 1), nested)]
    pub experience: Vec<Experience>,
    #[validate(length(min = 1), nested)]
    pub projects: Vec<Project>,
    #[validate(nested)]
    pub skills: Skills,
    #[validate(length(min = 1), nested)]
    pub publications: Vec<Publication>,
    #[serde(default)]
    #[validate(nested)]
    pub activities: Vec<Activity>,
}
